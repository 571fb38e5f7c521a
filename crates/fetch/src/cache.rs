use crate::client::WeatherClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use wx_core::{FetchError, Sample};

type Outcome = Result<Sample, FetchError>;

#[derive(Debug, Clone)]
struct Entry {
    fetched_at: Instant,
    outcome:    Outcome,
}

/// [`WeatherClient`] that remembers each URL's last outcome for `ttl`.
///
/// Errors are cached too, so a rate-limited API is not hammered by every
/// non-forced refresh.  Clones share the same cache.
#[derive(Debug, Clone)]
pub struct CachedClient {
    client:  WeatherClient,
    ttl:     Duration,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl CachedClient {
    pub fn new(client: WeatherClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Current conditions at a location, from cache unless stale or `force`.
    ///
    /// The cache lock is held across the request so concurrent refreshes
    /// for the same URL collapse into one upstream call.
    pub async fn get(&self, latitude: f64, longitude: f64, force: bool) -> Outcome {
        let url = self.client.url_for(latitude, longitude);
        let key = url.to_string();

        let mut entries = self.entries.lock().await;
        if !force {
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!("cache hit for {key}");
                    return entry.outcome.clone();
                }
            }
        }

        let outcome = self.client.fetch_url(url).await;
        entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                outcome:    outcome.clone(),
            },
        );
        outcome
    }

    /// Forget every cached outcome.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
