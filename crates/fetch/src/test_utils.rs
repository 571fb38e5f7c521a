#![cfg(test)]

use wiremock::MockServer;
use wx_config::ApiConfig;

/// Point the client at `server` with a short timeout and the default TTL.
pub(crate) fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/v1/forecast", server.uri()),
        timeout_seconds: 5,
        ..ApiConfig::default()
    }
}

/// Minimal Open-Meteo body in UTC.
pub(crate) fn forecast_body(time: &str, temperature: f64) -> String {
    format!(
        r#"{{"utc_offset_seconds":0,"current":{{"time":"{time}","interval":900,"temperature_2m":{temperature},"wind_speed_10m":3.4}}}}"#
    )
}
