use crate::response::parse_sample;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};
use wx_config::ApiConfig;
use wx_core::{FetchError, Result, Sample, WxError};

/// Variables requested from the `current` block.
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m";

/// Build the current-weather URL for a location.
///
/// Wind speed is requested in m/s; the API default is km/h.
pub fn build_url(base: &Url, latitude: f64, longitude: f64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("latitude", &latitude.to_string())
        .append_pair("longitude", &longitude.to_string())
        .append_pair("current", CURRENT_FIELDS)
        .append_pair("wind_speed_unit", "ms")
        .append_pair("timezone", "auto");
    url
}

/// HTTP client for the Open-Meteo forecast API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base: Url,
}

impl WeatherClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&cfg.base_url)
            .map_err(|e| WxError::Config(format!("invalid api.base_url '{}': {e}", cfg.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&cfg.user_agent)
                .map_err(|e| WxError::Config(format!("invalid api.user_agent: {e}")))?,
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .gzip(true)
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| WxError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    pub fn url_for(&self, latitude: f64, longitude: f64) -> Url {
        build_url(&self.base, latitude, longitude)
    }

    /// Fetch the current conditions at a location.
    ///
    /// Never fails with anything but a [`FetchError`] value.
    pub async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<Sample, FetchError> {
        self.fetch_url(self.url_for(latitude, longitude)).await
    }

    pub(crate) async fn fetch_url(&self, url: Url) -> std::result::Result<Sample, FetchError> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("a bit")
                .to_string();
            warn!("rate limited by weather API (retry after {retry_after})");
            return Err(FetchError::RateLimited { retry_after });
        }

        let resp = resp
            .error_for_status()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        parse_sample(&body)
    }
}
