use thiserror::Error;

/// Why a weather fetch produced no sample.
///
/// Fetch failures are values, never panics: the window maps any of these to
/// a warning banner plus a fallback sample.  `Clone` so it can ride inside a
/// [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// HTTP 429.  Carries the `Retry-After` header value (or `"a bit"`).
    #[error("429 Too Many Requests: try again after {retry_after}s")]
    RateLimited { retry_after: String },

    #[error("Network/HTTP error: {0}")]
    Http(String),

    #[error("Parsing error: {0}")]
    Parse(String),
}

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum WxError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = WxError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_mentions_retry_after() {
        let err = FetchError::RateLimited { retry_after: "30".into() };
        assert_eq!(err.to_string(), "429 Too Many Requests: try again after 30s");
    }

    #[test]
    fn fetch_error_converts_into_wx_error() {
        let err: WxError = FetchError::Parse("missing field".into()).into();
        assert!(matches!(err, WxError::Fetch(FetchError::Parse(_))));
    }
}
