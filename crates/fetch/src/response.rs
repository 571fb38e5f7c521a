//! Open-Meteo `current` weather payload.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use wx_core::{FetchError, Sample};

/// Subset of the forecast response we read.  Everything is optional:
/// a missing block yields absent values rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    /// Offset of the response's local time from UTC (`timezone=auto`).
    pub utc_offset_seconds: i32,
    pub current: CurrentBlock,
}

/// The `current` object: local ISO time plus requested variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentBlock {
    /// Local time without zone, e.g. `"2024-05-01T12:15"`.
    pub time:           Option<String>,
    pub temperature_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
}

/// Decode a response body into a [`Sample`].
pub fn parse_sample(body: &str) -> Result<Sample, FetchError> {
    let resp: ForecastResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let timestamp = match resp.current.time.as_deref() {
        Some(raw) => Some(parse_local_time(raw, resp.utc_offset_seconds)?),
        None => None,
    };

    Ok(Sample::new(
        timestamp,
        resp.current.temperature_2m,
        resp.current.wind_speed_10m,
    ))
}

/// Interpret `raw` as local time at `offset_secs` east of UTC.
///
/// Accepts Open-Meteo's minute-resolution form, a seconds form, or a full
/// RFC 3339 timestamp (whose own offset then wins).
fn parse_local_time(raw: &str, offset_secs: i32) -> Result<DateTime<Utc>, FetchError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| FetchError::Parse(format!("invalid time '{raw}': {e}")))?;

    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| FetchError::Parse(format!("invalid utc_offset_seconds {offset_secs}")))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| FetchError::Parse(format!("ambiguous local time '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_time_is_shifted_to_utc() {
        let body = r#"{
            "utc_offset_seconds": -21600,
            "current": {"time": "2024-05-01T12:15", "temperature_2m": 18.3, "wind_speed_10m": 4.1}
        }"#;
        let sample = parse_sample(body).unwrap();
        assert_eq!(
            sample.timestamp.unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 18, 15, 0).unwrap()
        );
        assert_eq!(sample.temperature, Some(18.3));
        assert_eq!(sample.wind_speed, Some(4.1));
    }

    #[test]
    fn missing_current_block_yields_empty_sample() {
        let sample = parse_sample(r#"{"latitude": 39.7}"#).unwrap();
        assert_eq!(sample, Sample::new(None, None, None));
    }

    #[test]
    fn null_temperature_is_absent() {
        let body = r#"{"current": {"time": "2024-05-01T12:15:30", "temperature_2m": null}}"#;
        let sample = parse_sample(body).unwrap();
        assert!(sample.timestamp.is_some());
        assert_eq!(sample.temperature, None);
    }

    #[test]
    fn garbage_time_is_a_parse_error() {
        let err = parse_sample(r#"{"current": {"time": "yesterday"}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn non_json_is_a_parse_error() {
        assert!(matches!(parse_sample("<html>"), Err(FetchError::Parse(_))));
    }
}
