//! Timing and counters for a completed run.

/// Counters collected by [`Driver::full_solve`](crate::Driver::full_solve).
///
/// All durations are in microseconds. `spatial_us` covers boundary
/// application, logging, and right-hand-side evaluation; `step_us`
/// covers the time stepper.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Steps taken.
    pub steps: u64,
    /// Wall-clock time for the whole run.
    pub total_us: u64,
    /// Time spent in the spatial driver.
    pub spatial_us: u64,
    /// Time spent in the time stepper.
    pub step_us: u64,
    /// Snapshots held by the logger when the run finished.
    pub log_entries: usize,
}

impl RunMetrics {
    /// Mean wall-clock time per step, or `None` before any step ran.
    pub fn mean_step_us(&self) -> Option<f64> {
        if self.steps == 0 {
            None
        } else {
            Some(self.total_us as f64 / self.steps as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let m = RunMetrics::default();
        assert_eq!(m.steps, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.log_entries, 0);
        assert_eq!(m.mean_step_us(), None);
    }

    #[test]
    fn mean_step() {
        let m = RunMetrics {
            steps: 4,
            total_us: 100,
            ..Default::default()
        };
        assert_eq!(m.mean_step_us(), Some(25.0));
    }
}
