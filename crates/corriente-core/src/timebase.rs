//! Reconstruction of wall-clock timestamp series from sample counts.

use chrono::{DateTime, TimeDelta, Utc};

/// Maps sample counts to evenly spaced wall-clock instants at a fixed
/// sample rate.
///
/// The transport records a single instant per accumulation window - the
/// completion of the most recent hardware append - and treats it as the
/// instant of the *last* sample in the window. [`end_to_series`] spreads
/// the rest of the batch uniformly behind it at `1/rate` spacing. When
/// several hardware callbacks fed one window the true per-sample instants
/// are not uniform; the uniform series is a deliberate approximation.
///
/// [`end_to_series`]: Timebase::end_to_series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timebase {
    rate: f64,
}

impl Timebase {
    /// Create a timebase for a fixed sample rate in Hz.
    pub fn new(rate: f64) -> Self {
        debug_assert!(rate > 0.0);
        Self { rate }
    }

    /// The sample rate in Hz.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Timestamp series for `count` samples known to have ended at `end`.
    ///
    /// Instants are spaced exactly `1/rate` seconds apart, the last equal
    /// to `end` and instant `i` equal to `end - (count-1-i)/rate`. Each
    /// offset is computed independently from `end` in whole microseconds,
    /// so rounding never accumulates across the series.
    pub fn end_to_series(&self, end: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        let step_us = 1e6 / self.rate;
        (0..count)
            .map(|i| {
                let back = (count - 1 - i) as f64 * step_us;
                end - TimeDelta::microseconds(back.round() as i64)
            })
            .collect()
    }
}

/// `points` evenly spaced instants over `[start, end)`, endpoint excluded.
///
/// Successive calls whose `start` equals the previous `end` produce
/// abutting series with neither gap nor overlap, which is what lets the
/// signal generators tile their batches across polls.
pub fn span_series(start: DateTime<Utc>, end: DateTime<Utc>, points: usize) -> Vec<DateTime<Utc>> {
    if points == 0 {
        return Vec::new();
    }
    // Spans here are poll intervals; microseconds cannot overflow i64.
    let total_us = (end - start).num_microseconds().unwrap_or(0) as f64;
    (0..points)
        .map(|j| start + TimeDelta::microseconds((j as f64 * total_us / points as f64).round() as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn end_to_series_spacing_and_anchors() {
        let end = instant(1_700_000_000);
        let series = Timebase::new(100.0).end_to_series(end, 10);

        assert_eq!(series.len(), 10);
        assert_eq!(series[9], end);
        assert_eq!(series[0], end - TimeDelta::milliseconds(90));
        for pair in series.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::milliseconds(10));
        }
    }

    #[test]
    fn end_to_series_single_sample_is_the_end() {
        let end = instant(42);
        let series = Timebase::new(48000.0).end_to_series(end, 1);
        assert_eq!(series, vec![end]);
    }

    #[test]
    fn end_to_series_zero_count_is_empty() {
        assert!(Timebase::new(100.0).end_to_series(instant(0), 0).is_empty());
    }

    #[test]
    fn end_to_series_rounds_fractional_steps() {
        // 3 Hz has a fractional microsecond step; every offset is rounded
        // independently from the end, so the last instant stays exact.
        let end = instant(10);
        let series = Timebase::new(3.0).end_to_series(end, 4);
        assert_eq!(series[3], end);
        assert_eq!(series[0], end - TimeDelta::microseconds(1_000_000));
    }

    #[test]
    fn span_series_excludes_endpoint() {
        let start = instant(0);
        let end = start + TimeDelta::milliseconds(10);
        let series = span_series(start, end, 4);

        assert_eq!(series.len(), 4);
        assert_eq!(series[0], start);
        assert!(series[3] < end);
        assert_eq!(series[1] - series[0], TimeDelta::microseconds(2500));
    }

    #[test]
    fn span_series_tiles_without_gap_or_overlap() {
        let a = instant(0);
        let b = a + TimeDelta::milliseconds(20);
        let c = b + TimeDelta::milliseconds(30);

        let first = span_series(a, b, 4);
        let second = span_series(b, c, 6);

        // The second span starts exactly where the first would have ended.
        assert_eq!(second[0], b);
        assert!(first[3] < second[0]);
    }

    #[test]
    fn span_series_zero_points() {
        let start = instant(0);
        assert!(span_series(start, start + TimeDelta::seconds(1), 0).is_empty());
    }
}
