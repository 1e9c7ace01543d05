use std::time::Instant;

use hdrhistogram::Histogram;
use log::{debug, info, warn};

/// Wall-clock duration of single generations, in microseconds.
pub struct GenerationTimer {
    histogram: Option<Histogram<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub generations: u64,
    pub mean_us: f64,
    pub p50_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

impl GenerationTimer {
    pub fn new() -> Self {
        let histogram = match Histogram::new(3) {
            Ok(histogram) => Some(histogram),
            Err(e) => {
                warn!("Generation timing disabled: {:?}", e);
                None
            }
        };
        Self { histogram }
    }

    /// Runs `step` and records how long it took.
    pub fn time<T>(&mut self, step: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = step();
        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        if let Some(histogram) = &mut self.histogram {
            if let Err(e) = histogram.record(elapsed) {
                debug!("Dropped timing sample {}us: {:?}", elapsed, e);
            }
        }
        result
    }

    pub fn summary(&self) -> Option<TimingSummary> {
        let histogram = self.histogram.as_ref().filter(|h| !h.is_empty())?;
        Some(TimingSummary {
            generations: histogram.len(),
            mean_us: histogram.mean(),
            p50_us: histogram.value_at_quantile(0.5),
            p99_us: histogram.value_at_quantile(0.99),
            max_us: histogram.max(),
        })
    }

    pub fn report(&self) {
        if let Some(s) = self.summary() {
            info!(
                "{} generations: mean {:.1}us, p50 {}us, p99 {}us, max {}us",
                s.generations, s.mean_us, s.p50_us, s.p99_us, s.max_us
            );
        }
    }
}

impl Default for GenerationTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_step() {
        let mut timer = GenerationTimer::new();
        assert!(timer.summary().is_none());
        for i in 0..5 {
            assert_eq!(timer.time(|| i * 2), i * 2);
        }
        let summary = timer.summary().unwrap();
        assert_eq!(summary.generations, 5);
        assert!(summary.p50_us <= summary.max_us);
    }
}
