use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed refresh interval, seconds.
pub const REFRESH_INTERVAL_RANGE: RangeInclusive<u32> = 10..=120;
/// Allowed history window, minutes.
pub const WINDOW_MINUTES_RANGE: RangeInclusive<u32> = 10..=240;

/// Root configuration structure parsed from `wxdash.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashConfig {
    pub refresh:  RefreshConfig,
    pub history:  HistoryConfig,
    pub location: LocationConfig,
    pub api:      ApiConfig,
    pub theme:    ThemeConfig,
}

impl DashConfig {
    /// Clamp every bounded option into its allowed range.
    pub fn sanitize(&mut self) {
        self.refresh.interval_seconds = clamp_logged(
            "refresh.interval_seconds",
            self.refresh.interval_seconds,
            REFRESH_INTERVAL_RANGE,
        );
        self.history.window_minutes = clamp_logged(
            "history.window_minutes",
            self.history.window_minutes,
            WINDOW_MINUTES_RANGE,
        );
        if self.api.timeout_seconds == 0 {
            tracing::warn!("api.timeout_seconds must be positive; using 10");
            self.api.timeout_seconds = 10;
        }
    }
}

fn clamp_logged(key: &str, value: u32, range: RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!(
            "{key} = {value} is outside {}..={}; using {clamped}",
            range.start(),
            range.end()
        );
    }
    clamped
}

/// Polling behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between automatic refreshes (10 – 120).
    pub interval_seconds: u32,
    /// Start with auto-refresh switched on.
    pub auto_refresh: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
            auto_refresh:     false,
        }
    }
}

/// Rolling history retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Minutes of history kept, relative to the newest sample (10 – 240).
    pub window_minutes: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { window_minutes: wx_core::buffer::DEFAULT_WINDOW_MINUTES }
    }
}

/// Where to fetch weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Display name used in titles.
    pub name:      String,
    pub latitude:  f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name:      "Denver".to_string(),
            latitude:  39.7392,
            longitude: -104.9903,
        }
    }
}

/// Upstream API client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Open-Meteo forecast endpoint.
    pub base_url:          String,
    pub user_agent:        String,
    /// Whole-request timeout.
    pub timeout_seconds:   u64,
    /// How long a fetch result is reused by non-forced refreshes.
    pub cache_ttl_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url:          "https://api.open-meteo.com/v1/forecast".to_string(),
            user_agent:        concat!("wxdash/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds:   10,
            cache_ttl_seconds: 600,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent color: chart line and markers.
    pub accent: String,
    /// Warning banner color.
    pub warning: String,
    /// Metric card background.
    pub card: String,
    /// Font size in points.
    pub font_size: f32,
    /// Corner radius for cards (pixels).
    pub border_radius: f32,
    /// Outer padding (pixels).
    pub padding: u16,
    /// Gap between sections (pixels).
    pub gap: u16,
    /// Height of the temperature chart (pixels).
    pub chart_height: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:    "#1e1e2e".to_string(), // Catppuccin Mocha: base
            foreground:    "#cdd6f4".to_string(), // Catppuccin Mocha: text
            accent:        "#89b4fa".to_string(), // Catppuccin Mocha: blue
            warning:       "#f9e2af".to_string(), // Catppuccin Mocha: yellow
            card:          "#313244".to_string(), // Catppuccin Mocha: surface0
            font_size:     14.0,
            border_radius: 8.0,
            padding:       16,
            gap:           12,
            chart_height:  280.0,
        }
    }
}
