//! The visible symbol grid.

use crate::symbol::Symbol;

/// The visible symbol matrix, reel-major: `reels` columns of `rows` cells.
///
/// A plain value object decoupled from any animation or transform state;
/// rendering reads from it, never the reverse. One grid lives for one spin:
/// `refill_with` replaces every cell at spin start and individual cells are
/// redrawn as cascades consume wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Symbol>,
    reels: u8,
    rows: u8,
}

impl Grid {
    /// A grid with every cell set to `symbol`.
    pub fn filled(reels: u8, rows: u8, symbol: Symbol) -> Self {
        Self {
            cells: vec![symbol; reels as usize * rows as usize],
            reels,
            rows,
        }
    }

    /// Build a grid from reel-major columns. `None` when the columns are
    /// empty or ragged.
    pub fn from_columns(columns: &[Vec<Symbol>]) -> Option<Self> {
        let reels = columns.len();
        let rows = columns.first()?.len();
        if rows == 0 || reels > u8::MAX as usize || rows > u8::MAX as usize {
            return None;
        }
        if columns.iter().any(|column| column.len() != rows) {
            return None;
        }
        let mut cells = Vec::with_capacity(reels * rows);
        for column in columns {
            cells.extend_from_slice(column);
        }
        Some(Self {
            cells,
            reels: reels as u8,
            rows: rows as u8,
        })
    }

    pub fn reels(&self) -> u8 {
        self.reels
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    fn index(&self, reel: u8, row: u8) -> usize {
        debug_assert!(reel < self.reels && row < self.rows);
        reel as usize * self.rows as usize + row as usize
    }

    /// Symbol at `(reel, row)`.
    pub fn cell(&self, reel: u8, row: u8) -> Symbol {
        self.cells[self.index(reel, row)]
    }

    /// Replace the symbol at `(reel, row)`.
    pub fn set_cell(&mut self, reel: u8, row: u8, symbol: Symbol) {
        let index = self.index(reel, row);
        self.cells[index] = symbol;
    }

    /// Replace every cell with a fresh draw, reel by reel, top row first.
    pub fn refill_with(&mut self, mut draw: impl FnMut() -> Symbol) {
        for cell in &mut self.cells {
            *cell = draw();
        }
    }
}
