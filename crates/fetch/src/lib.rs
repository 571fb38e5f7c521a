//! Weather data source: Open-Meteo client plus a TTL response cache.

pub mod cache;
pub mod client;
pub mod response;

mod test_utils;

pub use cache::CachedClient;
pub use client::{build_url, WeatherClient};

use std::time::Duration;
use wx_config::ApiConfig;
use wx_core::Result;

/// Build the cached client described by the `[api]` config section.
pub fn from_config(cfg: &ApiConfig) -> Result<CachedClient> {
    let client = WeatherClient::new(cfg)?;
    Ok(CachedClient::new(
        client,
        Duration::from_secs(cfg.cache_ttl_seconds),
    ))
}
