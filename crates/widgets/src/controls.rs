use chrono::{DateTime, Local};
use iced::{
    widget::{button, column, row, slider, text, toggler},
    Alignment, Element, Length,
};
use wx_config::{
    schema::{REFRESH_INTERVAL_RANGE, WINDOW_MINUTES_RANGE},
    DashConfig,
};
use wx_core::event::Message;
use wx_theme::Theme;

/// Runtime refresh settings; seeded from config, then driven by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub interval_seconds: u32,
    pub auto_refresh:     bool,
    pub window_minutes:   u32,
}

impl Controls {
    pub fn from_config(cfg: &DashConfig) -> Self {
        Self {
            interval_seconds: cfg.refresh.interval_seconds,
            auto_refresh:     cfg.refresh.auto_refresh,
            window_minutes:   cfg.history.window_minutes,
        }
    }

    pub fn set_interval(&mut self, seconds: u32) {
        self.interval_seconds = seconds.clamp(*REFRESH_INTERVAL_RANGE.start(), *REFRESH_INTERVAL_RANGE.end());
    }

    pub fn set_window(&mut self, minutes: u32) {
        self.window_minutes = minutes.clamp(*WINDOW_MINUTES_RANGE.start(), *WINDOW_MINUTES_RANGE.end());
    }
}

/// Sliders, auto-refresh toggle, refresh button and last-refresh caption.
#[derive(Debug, Default)]
pub struct ControlsWidget;

impl ControlsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        controls: &Controls,
        last_refreshed: DateTime<Local>,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let caption = theme.font_size - 2.0;
        let muted = theme.muted().to_iced();

        let interval = column![
            text(format!("Refresh every (sec): {}", controls.interval_seconds)).size(caption),
            slider(
                REFRESH_INTERVAL_RANGE,
                controls.interval_seconds,
                Message::RefreshIntervalChanged,
            ),
        ]
        .spacing(4)
        .width(Length::FillPortion(2));

        let auto = toggler(controls.auto_refresh)
            .label("Enable auto-refresh")
            .on_toggle(Message::AutoRefreshToggled);

        let window = column![
            text(format!("History window (minutes): {}", controls.window_minutes)).size(caption),
            slider(WINDOW_MINUTES_RANGE, controls.window_minutes, Message::WindowChanged),
        ]
        .spacing(4)
        .width(Length::FillPortion(2));

        let refreshed = column![
            text(format!("Last refreshed at: {}", last_refreshed.format("%H:%M:%S")))
                .size(caption)
                .color(muted),
            button(text("Refresh now")).on_press(Message::Refresh { force: true }),
        ]
        .spacing(6)
        .width(Length::FillPortion(2));

        row![interval, auto, window, refreshed]
            .spacing(f32::from(theme.gap) * 2.0)
            .align_y(Alignment::Center)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_from_config() {
        let cfg = DashConfig::default();
        let controls = Controls::from_config(&cfg);
        assert_eq!(controls.interval_seconds, 30);
        assert!(!controls.auto_refresh);
        assert_eq!(controls.window_minutes, 120);
    }

    #[test]
    fn setters_clamp_to_slider_ranges() {
        let mut controls = Controls::from_config(&DashConfig::default());
        controls.set_interval(500);
        controls.set_window(1);
        assert_eq!(controls.interval_seconds, 120);
        assert_eq!(controls.window_minutes, 10);
    }
}
