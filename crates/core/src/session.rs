use crate::buffer::RollingSampleBuffer;
use crate::error::FetchError;
use crate::sample::Sample;
use chrono::{DateTime, Local, TimeDelta, Utc};

/// Appended to every fetch warning shown above the chart.
pub const FALLBACK_NOTICE: &str = "Showing sample data so the demo continues.";

/// Per-window dashboard state, owned by the application and handed to each
/// refresh callback.  Nothing here outlives the process.
#[derive(Debug, Clone)]
pub struct Session {
    pub buffer: RollingSampleBuffer,
    /// Text of the last fetch failure; cleared by the next success.
    pub warning: Option<String>,
    /// Wall-clock time of the last ingest.
    pub last_refreshed: DateTime<Local>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            buffer:         RollingSampleBuffer::default(),
            warning:        None,
            last_refreshed: Local::now(),
        }
    }
}

impl Session {
    pub fn new(window_minutes: u32) -> Self {
        Self {
            buffer: RollingSampleBuffer::with_window_minutes(window_minutes),
            ..Self::default()
        }
    }

    /// Fold one fetch outcome into the history.
    ///
    /// A failed fetch is replaced by [`Sample::fallback`] stamped `now`, so
    /// the buffer always has something to render.  Returns the sample that
    /// was offered to the buffer.
    pub fn ingest(&mut self, result: Result<Sample, FetchError>, now: DateTime<Utc>) -> Sample {
        let sample = match result {
            Ok(sample) => {
                self.warning = None;
                sample
            }
            Err(e) => {
                tracing::warn!("weather fetch failed: {e}");
                self.warning = Some(format!("{e}\n{FALLBACK_NOTICE}"));
                Sample::fallback(now)
            }
        };

        self.buffer.append(sample);
        self.buffer.enforce_window();
        self.last_refreshed = now.with_timezone(&Local);
        sample
    }

    /// Change the retention window and trim right away.
    pub fn set_window_minutes(&mut self, minutes: u32) {
        self.buffer.set_window(TimeDelta::minutes(i64::from(minutes)));
        self.buffer.enforce_window();
    }
}
