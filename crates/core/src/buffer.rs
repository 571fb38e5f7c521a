use crate::sample::Sample;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;

/// Default retention window: the last two hours of samples.
pub const DEFAULT_WINDOW_MINUTES: u32 = 120;

/// Summary figures over the retained samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    /// Lowest present temperature, `None` if no sample has one.
    pub min_temp: Option<f64>,
    /// Highest present temperature, `None` if no sample has one.
    pub max_temp: Option<f64>,
    /// `current - previous` temperature; `0.0` unless both are present.
    pub delta_since_last: f64,
}

/// Time-ordered history of weather samples, trimmed relative to the latest one.
///
/// Invariants upheld by every mutation:
/// - samples are sorted ascending by timestamp
/// - no two samples share a timestamp
/// - every stored sample has a timestamp
///
/// Trimming is anchored on the newest sample, not on wall-clock time, so a
/// stalled feed keeps its last window of data indefinitely.
#[derive(Debug, Clone)]
pub struct RollingSampleBuffer {
    samples: VecDeque<Sample>,
    window:  TimeDelta,
}

impl Default for RollingSampleBuffer {
    fn default() -> Self {
        Self::with_window_minutes(DEFAULT_WINDOW_MINUTES)
    }
}

impl RollingSampleBuffer {
    pub fn new(window: TimeDelta) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
        }
    }

    pub fn with_window_minutes(minutes: u32) -> Self {
        Self::new(TimeDelta::minutes(i64::from(minutes)))
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }

    /// Change the retention window.  Does not trim; call [`Self::enforce_window`].
    pub fn set_window(&mut self, window: TimeDelta) {
        self.window = window;
    }

    /// Insert `sample` in timestamp order.
    ///
    /// Returns `false` (and leaves the buffer untouched) when the sample has
    /// no timestamp or one already present in the buffer.
    pub fn append(&mut self, sample: Sample) -> bool {
        let Some(ts) = sample.timestamp else {
            tracing::debug!("dropping sample without timestamp");
            return false;
        };

        // Fast path: samples normally arrive in time order.
        match self.latest_timestamp() {
            None => {
                self.samples.push_back(sample);
                true
            }
            Some(latest) if ts > latest => {
                self.samples.push_back(sample);
                true
            }
            Some(latest) if ts == latest => false,
            Some(_) => match self.samples.binary_search_by_key(&Some(ts), |s| s.timestamp) {
                Ok(_) => false,
                Err(idx) => {
                    self.samples.insert(idx, sample);
                    true
                }
            },
        }
    }

    /// Drop every sample older than `latest - window`.
    pub fn trim(&mut self, window: TimeDelta) {
        let Some(latest) = self.latest_timestamp() else {
            return;
        };
        let Some(cutoff) = latest.checked_sub_signed(window) else {
            return;
        };

        let stale = self
            .samples
            .partition_point(|s| s.timestamp.is_some_and(|ts| ts < cutoff));
        if stale > 0 {
            tracing::debug!("trimming {stale} sample(s) older than {cutoff}");
            self.samples.drain(..stale);
        }
    }

    /// Trim using the buffer's own window.
    pub fn enforce_window(&mut self) {
        self.trim(self.window);
    }

    /// Most recent sample.
    pub fn current(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Sample immediately before [`Self::current`].
    pub fn previous(&self) -> Option<&Sample> {
        self.samples.len().checked_sub(2).and_then(|i| self.samples.get(i))
    }

    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.current().and_then(|s| s.timestamp)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest → newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }

    /// Newest → oldest, for tabular display.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().rev()
    }

    /// `(timestamp, temperature)` points for charting; samples without a
    /// temperature are skipped.
    pub fn temperature_series(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.samples
            .iter()
            .filter_map(|s| Some((s.timestamp?, s.temperature?)))
            .collect()
    }

    pub fn metrics(&self) -> Metrics {
        let mut temps = self.samples.iter().filter_map(|s| s.temperature);
        let (min_temp, max_temp) = match temps.next() {
            Some(first) => {
                let (lo, hi) = temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
                (Some(lo), Some(hi))
            }
            None => (None, None),
        };

        let delta_since_last = match (self.current(), self.previous()) {
            (Some(curr), Some(prev)) => match (curr.temperature, prev.temperature) {
                (Some(c), Some(p)) => c - p,
                _ => 0.0,
            },
            _ => 0.0,
        };

        Metrics {
            min_temp,
            max_temp,
            delta_since_last,
        }
    }
}
