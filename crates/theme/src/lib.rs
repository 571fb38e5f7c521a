pub mod colors;
pub mod style;

pub use colors::Color;

use wx_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible; invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background:    Color,
    pub foreground:    Color,
    /// Chart line and markers.
    pub accent:        Color,
    pub warning:       Color,
    pub card:          Color,
    pub font_size:     f32,
    pub border_radius: f32,
    pub padding:       u16,
    pub gap:           u16,
    pub chart_height:  f32,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background:    Color::from_hex(&cfg.background).unwrap_or(Color::BASE),
            foreground:    Color::from_hex(&cfg.foreground).unwrap_or(Color::TEXT),
            accent:        Color::from_hex(&cfg.accent).unwrap_or(Color::BLUE),
            warning:       Color::from_hex(&cfg.warning).unwrap_or(Color::YELLOW),
            card:          Color::from_hex(&cfg.card).unwrap_or(Color::SURFACE),
            font_size:     cfg.font_size.max(8.0),
            border_radius: cfg.border_radius.max(0.0),
            padding:       cfg.padding,
            gap:           cfg.gap,
            chart_height:  cfg.chart_height.max(120.0),
        }
    }

    /// Secondary text: captions, axis labels.
    pub fn muted(&self) -> Color {
        self.foreground.with_alpha(0.6)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
