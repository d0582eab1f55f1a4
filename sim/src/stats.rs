//! Running aggregates over simulated spins.

/// Per-spin net-result aggregate, mergeable across worker threads.
#[derive(Default, Clone, Debug)]
pub struct Stats {
    pub trials: u64,
    total_net: f64,
    total_net_sq: f64,
    total_wagered: f64,
}

impl Stats {
    /// Record one spin: `net` is payout minus stake, `wagered` the stake.
    pub fn add(&mut self, net: i64, wagered: u64) {
        let n = net as f64;
        self.trials += 1;
        self.total_net += n;
        self.total_net_sq += n * n;
        self.total_wagered += wagered as f64;
    }

    pub fn merge(&mut self, other: &Stats) {
        self.trials += other.trials;
        self.total_net += other.total_net;
        self.total_net_sq += other.total_net_sq;
        self.total_wagered += other.total_wagered;
    }

    pub fn mean_net(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_net / self.trials as f64
        }
    }

    pub fn mean_wagered(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_wagered / self.trials as f64
        }
    }

    /// Empirical return to player: payout per unit wagered.
    pub fn rtp(&self) -> f64 {
        let wagered = self.mean_wagered();
        if wagered == 0.0 {
            0.0
        } else {
            1.0 + self.mean_net() / wagered
        }
    }

    pub fn house_edge(&self) -> f64 {
        let wagered = self.mean_wagered();
        if wagered == 0.0 {
            0.0
        } else {
            -self.mean_net() / wagered
        }
    }

    /// Standard error of the mean per-spin net.
    pub fn stderr(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let mean = self.mean_net();
        let var = (self.total_net_sq / self.trials as f64) - mean * mean;
        let var = if var < 0.0 { 0.0 } else { var };
        (var / self.trials as f64).sqrt()
    }
}
