//! Sine generator node.

use crate::{Result, SignalError};
use chrono::{DateTime, Utc};
use corriente_core::{Source, TimestampedBatch, span_series};
use std::f64::consts::TAU;

/// One sine component with its own accumulated phase.
#[derive(Debug, Clone)]
struct Partial {
    frequency: f64,
    amplitude: f64,
    /// Current phase in radians, wrapped to [0, 2π).
    radian: f64,
}

/// Periodic signal source summing one or more sine partials.
///
/// Batches tile wall-clock time: a poll over elapsed interval `e` at
/// resolution `r` lays `floor(e * r) + 1` evenly spaced points over the
/// interval, emits all but the one overlapping the previous endpoint, and
/// folds that overlap into the carried phase. Consecutive batches abut
/// exactly, and the phase offset carried per partial keeps the summed
/// waveform continuous at every batch boundary no matter how irregularly
/// the scheduler polls.
///
/// The time-driven step is [`advance`](Sine::advance), which takes an
/// explicit `now`; [`Source::poll`] feeds it the wall clock.
#[derive(Debug, Clone)]
pub struct Sine {
    partials: Vec<Partial>,
    resolution: u32,
    last: DateTime<Utc>,
}

impl Sine {
    /// Create a generator from parallel frequency and amplitude lists.
    ///
    /// `start` is the instant the first batch tiles from (callers outside
    /// tests pass `Utc::now()`). Mismatched or empty lists and a zero
    /// resolution are fatal configuration errors.
    pub fn new(
        frequencies: &[f64],
        amplitudes: &[f64],
        resolution: u32,
        start: DateTime<Utc>,
    ) -> Result<Self> {
        if frequencies.len() != amplitudes.len() {
            return Err(SignalError::MismatchedPartials {
                frequencies: frequencies.len(),
                amplitudes: amplitudes.len(),
            });
        }
        if frequencies.is_empty() {
            return Err(SignalError::NoPartials);
        }
        if resolution == 0 {
            return Err(SignalError::ZeroResolution);
        }

        let partials = frequencies
            .iter()
            .zip(amplitudes)
            .map(|(&frequency, &amplitude)| Partial {
                frequency,
                amplitude,
                radian: 0.0,
            })
            .collect();

        Ok(Self {
            partials,
            resolution,
            last: start,
        })
    }

    /// Points per second of the generated series.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Produce the batch covering the interval from the previous step to
    /// `now`.
    ///
    /// Returns `None` when `now` is not ahead of the previous step, or
    /// when the interval is shorter than one resolution step - in the
    /// latter case the reference instant still advances so the next batch
    /// tiles from `now`.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<TimestampedBatch> {
        let elapsed = (now - self.last).num_microseconds()? as f64 / 1e6;
        if elapsed <= 0.0 {
            return None;
        }

        let count = (elapsed * f64::from(self.resolution)).floor() as usize;
        if count == 0 {
            self.last = now;
            return None;
        }

        let mut samples = vec![0.0f32; count];
        for partial in &mut self.partials {
            let sweep = TAU * partial.frequency * elapsed;
            let step = sweep / count as f64;
            for (k, sample) in samples.iter_mut().enumerate() {
                *sample += (partial.amplitude * (partial.radian + k as f64 * step).sin()) as f32;
            }
            partial.radian = (partial.radian + sweep).rem_euclid(TAU);
        }

        // count + 1 points tile [last, now); the first one is the previous
        // batch's endpoint and is not re-emitted.
        let timestamps: Vec<_> = span_series(self.last, now, count + 1)
            .into_iter()
            .skip(1)
            .collect();
        self.last = now;

        Some(TimestampedBatch::new(
            samples,
            timestamps,
            f64::from(self.resolution),
        ))
    }
}

impl Source for Sine {
    fn poll(&mut self) -> Option<TimestampedBatch> {
        self.advance(Utc::now())
    }

    fn shutdown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn origin() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn rejects_mismatched_lists() {
        let err = Sine::new(&[440.0, 880.0], &[1.0], 200, origin()).unwrap_err();
        assert!(matches!(
            err,
            SignalError::MismatchedPartials {
                frequencies: 2,
                amplitudes: 1,
            }
        ));
    }

    #[test]
    fn rejects_empty_lists() {
        assert!(matches!(
            Sine::new(&[], &[], 200, origin()),
            Err(SignalError::NoPartials)
        ));
    }

    #[test]
    fn rejects_zero_resolution() {
        assert!(matches!(
            Sine::new(&[440.0], &[1.0], 0, origin()),
            Err(SignalError::ZeroResolution)
        ));
    }

    #[test]
    fn batch_count_tiles_the_elapsed_interval() {
        let t0 = origin();
        let mut sine = Sine::new(&[10.0], &[1.0], 200, t0).unwrap();

        // 10 ms at 200 pts/s: floor(2) + 1 points, 2 samples emitted.
        let first = sine.advance(t0 + TimeDelta::milliseconds(10)).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.rate, 200.0);

        // 37 ms: 7 samples.
        let second = sine.advance(t0 + TimeDelta::milliseconds(47)).unwrap();
        assert_eq!(second.len(), 7);
    }

    #[test]
    fn phase_is_continuous_across_polls() {
        let t0 = origin();
        let frequency = 10.0;
        let mut sine = Sine::new(&[frequency], &[1.0], 200, t0).unwrap();

        let first = sine.advance(t0 + TimeDelta::milliseconds(10)).unwrap();
        let second = sine.advance(t0 + TimeDelta::milliseconds(47)).unwrap();

        // The second batch starts exactly where the first left off: its
        // initial sample is the sine of the phase accumulated over the
        // first interval.
        let carried = TAU * frequency * 0.010;
        assert!((f64::from(second.samples[0]) - carried.sin()).abs() < 1e-6);

        // And the first batch started at phase zero.
        assert!(f64::from(first.samples[0]).abs() < 1e-9);
    }

    #[test]
    fn join_has_no_discontinuity() {
        let t0 = origin();
        let frequency = 10.0;
        let resolution = 200;
        let mut sine = Sine::new(&[frequency], &[1.0], resolution, t0).unwrap();

        let first = sine.advance(t0 + TimeDelta::milliseconds(10)).unwrap();
        let second = sine.advance(t0 + TimeDelta::milliseconds(47)).unwrap();

        // The jump across the join is bounded by the waveform's maximum
        // slope (2πf) over one emission step, same as any in-batch jump.
        let join = f64::from(second.samples[0]) - f64::from(first.samples[1]);
        let max_step = TAU * frequency / f64::from(resolution) * 2.0;
        assert!(join.abs() <= max_step, "join jump {join} exceeds {max_step}");
    }

    #[test]
    fn partials_sum() {
        let t0 = origin();
        let mut sine = Sine::new(&[10.0, 20.0], &[1.0, 0.5], 200, t0).unwrap();

        let out = sine.advance(t0 + TimeDelta::milliseconds(20)).unwrap();
        assert_eq!(out.len(), 4);

        // k = 1 sample: both partials advanced by one in-batch step.
        let e = 0.020;
        let expected = (TAU * 10.0 * e / 4.0).sin() + 0.5 * (TAU * 20.0 * e / 4.0).sin();
        assert!((f64::from(out.samples[1]) - expected).abs() < 1e-6);
    }

    #[test]
    fn timestamps_tile_between_reference_instants() {
        let t0 = origin();
        let mut sine = Sine::new(&[1.0], &[1.0], 100, t0).unwrap();

        let end = t0 + TimeDelta::milliseconds(30);
        let out = sine.advance(end).unwrap();
        assert_eq!(out.len(), 3);

        // 4 points tile [t0, end); the previous endpoint is dropped.
        assert_eq!(out.timestamps[0], t0 + TimeDelta::microseconds(7500));
        assert!(out.timestamps[2] < end);
        for pair in out.timestamps.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::microseconds(7500));
        }
    }

    #[test]
    fn sub_step_interval_advances_reference_without_emitting() {
        let t0 = origin();
        let mut sine = Sine::new(&[10.0], &[1.0], 200, t0).unwrap();

        // 1 ms is below one 5 ms step: nothing comes out, but the next
        // batch tiles from the new instant.
        assert!(sine.advance(t0 + TimeDelta::milliseconds(1)).is_none());

        let out = sine.advance(t0 + TimeDelta::milliseconds(7)).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.timestamps[0] > t0 + TimeDelta::milliseconds(1));
    }

    #[test]
    fn non_advancing_clock_is_a_no_op() {
        let t0 = origin();
        let mut sine = Sine::new(&[10.0], &[1.0], 200, t0).unwrap();

        assert!(sine.advance(t0).is_none());
        assert!(sine.advance(t0 - TimeDelta::seconds(1)).is_none());

        // The reference instant did not move backwards.
        let out = sine.advance(t0 + TimeDelta::milliseconds(10)).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn amplitude_scales_output() {
        let t0 = origin();
        let mut unit = Sine::new(&[50.0], &[1.0], 1000, t0).unwrap();
        let mut doubled = Sine::new(&[50.0], &[2.0], 1000, t0).unwrap();

        let now = t0 + TimeDelta::milliseconds(10);
        let a = unit.advance(now).unwrap();
        let b = doubled.advance(now).unwrap();

        for (x, y) in a.samples.iter().zip(b.samples.iter()) {
            assert!((y - 2.0 * x).abs() < 1e-6);
        }
    }
}
