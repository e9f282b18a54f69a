// Path: crates/status/src/rate.rs

//! Average rate of change of a scalar series over a bounded window.
//!
//! A [`DeltaSampler`] keeps at most `max_samples` timestamped values. When
//! averaging, samples older than `now - sample_ttl` are ignored (but not
//! evicted), and the rate is taken between the earliest and the latest live
//! sample. Fewer than two live samples yield `NaN`, never zero, so callers can
//! tell "no data yet" apart from "not moving".

use crate::clock::Clock;
use nodestat_types::config::SamplerConfig;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// A recorded value and the clock reading it was taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub at: Duration,
}

/// Calculates the average change per second of a value sampled at various times.
#[derive(Debug, Clone)]
pub struct DeltaSampler {
    sample_ttl: Duration,
    max_samples: usize,
    samples: VecDeque<Sample>,
    clock: Arc<dyn Clock>,
}

impl DeltaSampler {
    pub fn new(config: &SamplerConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_window(config.sample_ttl(), config.max_samples, clock)
    }

    pub fn with_window(sample_ttl: Duration, max_samples: usize, clock: Arc<dyn Clock>) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            sample_ttl,
            max_samples,
            samples: VecDeque::with_capacity(max_samples + 1),
            clock,
        }
    }

    /// Records `value` at the current time and returns the updated
    /// [`average`](Self::average).
    pub fn sample(&mut self, value: f64) -> f64 {
        self.samples.push_back(Sample {
            value,
            at: self.clock.now(),
        });
        while self.samples.len() > self.max_samples {
            self.samples.pop_front();
        }
        self.average()
    }

    /// Returns the average growth of the value per second across the live
    /// window, or `NaN` when fewer than two live samples exist.
    ///
    /// The result is negative when the value is shrinking. Two live samples
    /// sharing a timestamp divide by zero and produce an infinite or `NaN`
    /// rate; [`rate`](Self::rate) filters those out.
    pub fn average(&self) -> f64 {
        let cutoff = self.clock.now().saturating_sub(self.sample_ttl);
        let mut live = self.samples.iter().filter(|s| s.at >= cutoff);

        let Some(earliest) = live.next() else {
            return f64::NAN;
        };
        let Some(latest) = live.last() else {
            return f64::NAN;
        };

        (latest.value - earliest.value) / signed_secs(latest.at, earliest.at)
    }

    /// The average as an `Option`, `None` whenever it is not a finite number.
    pub fn rate(&self) -> Option<f64> {
        Some(self.average()).filter(|r| r.is_finite())
    }

    /// Number of retained samples, live or expired.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Retained samples in insertion order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

fn signed_secs(later: Duration, earlier: Duration) -> f64 {
    match later.checked_sub(earlier) {
        Some(d) => d.as_secs_f64(),
        None => -(earlier - later).as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use proptest::prelude::*;

    fn sampler(ttl_ms: u64, max: usize) -> (DeltaSampler, ManualClock) {
        let clock = ManualClock::new();
        let sampler = DeltaSampler::with_window(
            Duration::from_millis(ttl_ms),
            max,
            Arc::new(clock.clone()),
        );
        (sampler, clock)
    }

    #[test]
    fn test_insufficient_samples_is_nan() {
        let (mut s, _clock) = sampler(10_000, 60);
        assert!(s.average().is_nan());
        assert!(s.sample(5.0).is_nan());
        assert_eq!(s.rate(), None);
    }

    #[test]
    fn test_two_samples() {
        let (mut s, clock) = sampler(10_000, 60);
        s.sample(100.0);
        clock.advance(Duration::from_millis(500));
        let rate = s.sample(300.0);
        assert_eq!(rate, 400.0);
        assert_eq!(s.rate(), Some(400.0));
    }

    #[test]
    fn test_negative_rate() {
        let (mut s, clock) = sampler(10_000, 60);
        s.sample(20.0);
        clock.advance(Duration::from_secs(2));
        assert_eq!(s.sample(10.0), -5.0);
    }

    #[test]
    fn test_uses_earliest_and_latest_live_samples() {
        let (mut s, clock) = sampler(10_000, 60);
        s.sample(0.0);
        clock.advance(Duration::from_secs(1));
        s.sample(1000.0);
        clock.advance(Duration::from_secs(1));
        // Middle samples do not matter, only the endpoints.
        assert_eq!(s.sample(20.0), 10.0);
    }

    #[test]
    fn test_expired_samples_are_ignored_but_retained() {
        let (mut s, clock) = sampler(10_000, 60);
        s.sample(0.0);
        clock.advance(Duration::from_secs(11));
        s.sample(50.0);
        clock.advance(Duration::from_secs(1));
        assert_eq!(s.sample(60.0), 10.0);
        assert_eq!(s.len(), 3);

        clock.advance(Duration::from_secs(20));
        assert!(s.average().is_nan());
    }

    #[test]
    fn test_sample_at_cutoff_is_live() {
        let (mut s, clock) = sampler(10_000, 60);
        s.sample(0.0);
        clock.advance(Duration::from_secs(10));
        assert_eq!(s.sample(100.0), 10.0);
    }

    #[test]
    fn test_window_drops_oldest() {
        let (mut s, clock) = sampler(60_000, 3);
        for v in [0.0, 10.0, 20.0, 30.0] {
            s.sample(v);
            clock.advance(Duration::from_secs(1));
        }
        assert_eq!(s.len(), 3);
        assert_eq!(s.samples().next().map(|x| x.value), Some(10.0));
    }

    #[test]
    fn test_duplicate_timestamps_do_not_panic() {
        let (mut s, _clock) = sampler(10_000, 60);
        s.sample(1.0);
        let rate = s.sample(2.0);
        assert!(rate.is_infinite());
        assert_eq!(s.rate(), None);
        s.sample(2.0);
        assert_eq!(s.rate(), None);
    }

    proptest! {
        #[test]
        fn prop_window_is_bounded(max in 1usize..20, extra in 1usize..20) {
            let (mut s, clock) = sampler(10_000, max);
            for i in 0..(max + extra) {
                s.sample(i as f64);
                clock.advance(Duration::from_millis(10));
            }
            prop_assert_eq!(s.len(), max);
        }

        #[test]
        fn prop_two_sample_rate(v1 in -1e6f64..1e6, v2 in -1e6f64..1e6, dt_ms in 1u64..10_000) {
            let (mut s, clock) = sampler(10_000, 60);
            s.sample(v1);
            clock.advance(Duration::from_millis(dt_ms));
            let rate = s.sample(v2);
            let expected = 1000.0 * (v2 - v1) / dt_ms as f64;
            prop_assert!((rate - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }
}
