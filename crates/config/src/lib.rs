pub mod schema;
pub mod watcher;

pub use schema::{ApiConfig, DashConfig, HistoryConfig, LocationConfig, RefreshConfig, ThemeConfig};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use wx_core::{Result, WxError};

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
///
/// Out-of-range values are clamped (see [`DashConfig::sanitize`]).
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| WxError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and sanitize a config document.
pub fn parse(raw: &str) -> Result<DashConfig> {
    let mut config: DashConfig =
        toml::from_str(raw).map_err(|e| WxError::Config(format!("TOML parse error: {e}")))?;
    config.sanitize();
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("wxdash").join("wxdash.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.refresh.interval_seconds, 30);
        assert_eq!(cfg.history.window_minutes, 120);
        assert!(!cfg.refresh.auto_refresh);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[refresh]\nauto_refresh = true\n\n[location]\nname = \"Oslo\"").unwrap();

        let cfg = load(file.path()).unwrap();
        assert!(cfg.refresh.auto_refresh);
        assert_eq!(cfg.refresh.interval_seconds, 30);
        assert_eq!(cfg.location.name, "Oslo");
        assert_eq!(cfg.api.cache_ttl_seconds, 600);
    }

    #[test]
    fn documented_example_matches_defaults() {
        let text = r##"
            [refresh]
            interval_seconds = 30
            auto_refresh     = false

            [history]
            window_minutes = 120

            [location]
            name      = "Denver"
            latitude  = 39.7392
            longitude = -104.9903

            [api]
            base_url          = "https://api.open-meteo.com/v1/forecast"
            timeout_seconds   = 10
            cache_ttl_seconds = 600

            [theme]
            background    = "#1e1e2e"
            foreground    = "#cdd6f4"
            accent        = "#89b4fa"
            warning       = "#f9e2af"
            card          = "#313244"
            font_size     = 14.0
            border_radius = 8.0
            padding       = 16
            gap           = 12
            chart_height  = 280.0
        "##;
        let cfg = parse(text).unwrap();
        assert_eq!(cfg, DashConfig::default());
        assert_eq!(cfg.api.user_agent, format!("wxdash/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = parse("[refresh]\ninterval_seconds = 5\n[history]\nwindow_minutes = 1000").unwrap();
        assert_eq!(cfg.refresh.interval_seconds, 10);
        assert_eq!(cfg.history.window_minutes, 240);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = parse("[refresh\ninterval_seconds = ").unwrap_err();
        assert!(matches!(err, WxError::Config(_)));
    }
}
