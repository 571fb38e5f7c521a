use chrono::{DateTime, Utc};

/// Placeholder temperature shown when a live fetch fails (°C).
pub const FALLBACK_TEMPERATURE: f64 = 22.0;
/// Placeholder wind speed shown when a live fetch fails (m/s).
pub const FALLBACK_WIND_SPEED: f64 = 3.2;

/// One timestamped weather observation.
///
/// Every field is optional because upstream parsing is lenient: a response
/// missing `time` still yields a `Sample`, it just never makes it into a
/// [`RollingSampleBuffer`](crate::RollingSampleBuffer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: Option<DateTime<Utc>>,
    /// Air temperature at 2 m, °C.
    pub temperature: Option<f64>,
    /// Wind speed at 10 m, m/s.
    pub wind_speed: Option<f64>,
}

impl Sample {
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        temperature: Option<f64>,
        wind_speed: Option<f64>,
    ) -> Self {
        Self { timestamp, temperature, wind_speed }
    }

    /// The sample substituted for a failed fetch so the display stays populated.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            timestamp:   Some(now),
            temperature: Some(FALLBACK_TEMPERATURE),
            wind_speed:  Some(FALLBACK_WIND_SPEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fallback_uses_placeholder_readings() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let s = Sample::fallback(now);
        assert_eq!(s, Sample::new(Some(now), Some(22.0), Some(3.2)));
    }
}
