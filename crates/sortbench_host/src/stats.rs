//! Elapsed-tick statistics over repeated benchmark runs.

/// Running min / max / mean of tick counts.
pub struct CycleStats {
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub count: u64,
}

impl CycleStats {
    /// Creates an empty tracker. `min` starts at `u64::MAX` so the first
    /// sample becomes the minimum.
    pub fn new() -> Self {
        Self {
            min: u64::MAX,
            max: 0,
            sum: 0,
            count: 0,
        }
    }

    pub fn update(&mut self, ticks: u64) {
        self.min = self.min.min(ticks);
        self.max = self.max.max(ticks);
        self.sum += ticks;
        self.count += 1;
    }

    /// Mean of all samples, or 0.0 before the first one.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// Prints one report line, scaling nanoseconds to microseconds when the
    /// mean exceeds a microsecond.
    pub fn print_row(&self, label: &str) {
        if self.count == 0 {
            println!("{:<10} no samples", label);
            return;
        }
        let avg = self.avg();
        if avg < 1000.0 {
            println!(
                "{:<10} min {:>10.2} ns  avg {:>10.2} ns  max {:>10.2} ns",
                label, self.min as f64, avg, self.max as f64
            );
        } else {
            println!(
                "{:<10} min {:>10.2} us  avg {:>10.2} us  max {:>10.2} us",
                label,
                self.min as f64 / 1000.0,
                avg / 1000.0,
                self.max as f64 / 1000.0
            );
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests min, max and mean tracking.
    #[test]
    fn test_cycle_stats() {
        let mut stats = CycleStats::new();
        assert_eq!(stats.avg(), 0.0);
        for t in [30, 10, 20] {
            stats.update(t);
        }
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 30);
        assert_eq!(stats.avg(), 20.0);
    }
}
