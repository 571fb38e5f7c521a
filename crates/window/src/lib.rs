//! Desktop window for `wxdash`.
//!
//! Owns the Iced application loop and wires together:
//! - weather fetches (boot, "Refresh now", auto-refresh timer)
//! - the rolling sample session and its widgets
//! - config file watcher (live reload on change)
//! - 1-second timer (clock)

use chrono::{DateTime, Local, Utc};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{column, container, row, scrollable, text},
    Element, Length, Size, Subscription, Task,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use wx_config::{default_path, load as load_config, ConfigWatcher, DashConfig};
use wx_core::{event::Message, FetchError, Session};
use wx_fetch::CachedClient;
use wx_theme::Theme;
use wx_widgets::{Controls, ControlsWidget, HistoryTable, MetricsWidget, StatusBanner, TemperatureChart};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(Dashboard::title)
        .subscription(Dashboard::subscription)
        .style(Dashboard::style)
        .window_size(Size::new(1120.0, 860.0))
        .run()
}

fn load_or_default() -> DashConfig {
    load_config(default_path()).unwrap_or_else(|e| {
        warn!("{e}; using default configuration");
        DashConfig::default()
    })
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    session:  Session,
    config:   DashConfig,
    theme:    Theme,
    controls: Controls,
    /// `Err` holds the reason the client could not be built from config.
    client:   Result<CachedClient, String>,
    /// Wall clock, advanced by `Tick`.
    now:      DateTime<Local>,
    // Widgets
    metrics:  MetricsWidget,
    history:  HistoryTable,
    panel:    ControlsWidget,
    banner:   StatusBanner,
}

impl Dashboard {
    fn boot() -> (Self, Task<Message>) {
        let dashboard = Self::from_config(load_or_default());
        // Populate the chart right away instead of waiting for the first tick.
        let task = dashboard.fetch(false);
        (dashboard, task)
    }

    fn from_config(config: DashConfig) -> Self {
        let controls = Controls::from_config(&config);
        Self {
            session:  Session::new(controls.window_minutes),
            theme:    Theme::from_config(&config.theme),
            client:   build_client(&config),
            controls,
            config,
            now:      Local::now(),
            metrics:  MetricsWidget::new(),
            history:  HistoryTable::new(),
            panel:    ControlsWidget::new(),
            banner:   StatusBanner::new(),
        }
    }

    fn title(&self) -> String {
        format!("Live Weather: {} (Open-Meteo)", self.config.location.name)
    }

    /// Fetch one sample; `force` drops cached responses first.
    fn fetch(&self, force: bool) -> Task<Message> {
        let client = match &self.client {
            Ok(c) => c.clone(),
            Err(reason) => {
                return Task::done(Message::Fetched(Err(FetchError::Http(reason.clone()))));
            }
        };
        let (lat, lon) = (self.config.location.latitude, self.config.location.longitude);

        Task::perform(
            async move {
                if force {
                    client.clear().await;
                }
                client.get(lat, lon, force).await
            },
            Message::Fetched,
        )
    }

    /// Adopt a freshly loaded config.  Runtime control changes are replaced
    /// by the file's values; the sample history is kept.
    fn apply_config(&mut self, config: DashConfig) {
        if config.api != self.config.api {
            self.client = build_client(&config);
        }
        self.theme = Theme::from_config(&config.theme);
        self.controls = Controls::from_config(&config);
        self.session.set_window_minutes(self.controls.window_minutes);
        self.config = config;
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh { force } => return self.fetch(force),
            Message::Fetched(result) => {
                self.session.ingest(result, Utc::now());
            }
            Message::RefreshIntervalChanged(secs) => {
                self.controls.set_interval(secs);
            }
            Message::AutoRefreshToggled(enabled) => {
                info!(
                    "Auto-refresh {}",
                    if enabled { "enabled" } else { "disabled" }
                );
                self.controls.auto_refresh = enabled;
            }
            Message::WindowChanged(minutes) => {
                self.controls.set_window(minutes);
                self.session.set_window_minutes(self.controls.window_minutes);
            }
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => {
                    info!("Config reloaded");
                    self.apply_config(cfg);
                    return self.fetch(false);
                }
                Err(e) => warn!("Config reload failed: {e}"),
            },
            Message::Tick => {
                self.now = Local::now();
            }
        }
        Task::none()
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let theme = &self.theme;
        let gap = f32::from(theme.gap);
        let muted = theme.muted().to_iced();
        let heading = |label: &'static str| {
            text(label).size(theme.font_size + 4.0)
        };

        let header = row![
            column![
                text(format!("Live Weather: {}", self.config.location.name))
                    .size(theme.font_size * 2.0),
                text("Auto-refreshing line chart with cached API calls and a short rolling history.")
                    .size(theme.font_size - 1.0)
                    .color(muted),
            ]
            .spacing(4)
            .width(Length::Fill),
            text(self.now.format("%H:%M:%S").to_string()).color(muted),
        ];

        let mut body = column![
            header,
            heading("Auto Refresh"),
            self.panel.view(&self.controls, self.session.last_refreshed, theme),
        ]
        .spacing(gap);

        if let Some(banner) = self.banner.view(&self.session, theme) {
            body = body.push(banner);
        }

        body = body
            .push(heading("Metrics"))
            .push(self.metrics.view(&self.session, theme))
            .push(heading("Temperature over Time"))
            .push(TemperatureChart::view(
                &self.session.buffer,
                &self.config.location.name,
                theme,
            ));

        if !self.session.buffer.is_empty() {
            body = body.push(self.history.view(&self.session.buffer, theme));
        }

        scrollable(container(body).padding(theme.padding).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![
            iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick),
            Subscription::run(config_stream),
        ];

        // `every` is keyed on its duration, so moving the slider restarts it.
        if self.controls.auto_refresh {
            let interval = Duration::from_secs(u64::from(self.controls.interval_seconds));
            subs.push(iced::time::every(interval).map(|_| Message::Refresh { force: true }));
        }

        Subscription::batch(subs)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}

fn build_client(config: &DashConfig) -> Result<CachedClient, String> {
    wx_fetch::from_config(&config.api).map_err(|e| {
        error!("Weather client unavailable: {e}");
        e.to_string()
    })
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches `~/.config/wxdash/wxdash.toml` for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            queue_reload(&mut sender);
        }

        // Watcher task exited; stall rather than end the subscription.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Queue a `ConfigReloaded`.  A full channel already holds a pending reload,
/// which re-reads the file anyway, so the extra one is dropped.
fn queue_reload(sender: &mut Sender<Message>) -> bool {
    match sender.try_send(Message::ConfigReloaded) {
        Ok(()) => true,
        Err(e) => {
            debug!("Config reload not queued ({e}); one is already pending");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use wx_core::Sample;

    fn dashboard() -> Dashboard {
        Dashboard::from_config(DashConfig::default())
    }

    #[test]
    fn failed_fetch_shows_fallback_and_warning() {
        let mut d = dashboard();
        let _ = d.update(Message::Fetched(Err(FetchError::Http("connection refused".into()))));

        assert_eq!(d.session.buffer.len(), 1);
        assert_eq!(d.session.buffer.current().unwrap().temperature, Some(22.0));
        assert!(d.session.warning.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn window_slider_trims_history() {
        let mut d = dashboard();
        let t0 = Utc::now() - TimeDelta::minutes(200);
        for m in [0, 100, 200] {
            let ts = t0 + TimeDelta::minutes(m);
            let _ = d.update(Message::Fetched(Ok(Sample::new(Some(ts), Some(20.0), None))));
        }
        assert_eq!(d.session.buffer.len(), 2); // default 120 min window

        let _ = d.update(Message::WindowChanged(30));
        assert_eq!(d.controls.window_minutes, 30);
        assert_eq!(d.session.buffer.len(), 1);
    }

    #[test]
    fn controls_follow_messages() {
        let mut d = dashboard();
        let _ = d.update(Message::AutoRefreshToggled(true));
        let _ = d.update(Message::RefreshIntervalChanged(5));
        assert!(d.controls.auto_refresh);
        assert_eq!(d.controls.interval_seconds, 10);
    }

    #[test]
    fn applying_config_keeps_history() {
        let mut d = dashboard();
        let _ = d.update(Message::Fetched(Ok(Sample::new(Some(Utc::now()), Some(5.0), None))));

        let mut cfg = DashConfig::default();
        cfg.location.name = "Oslo".into();
        cfg.history.window_minutes = 60;
        d.apply_config(cfg);

        assert_eq!(d.title(), "Live Weather: Oslo (Open-Meteo)");
        assert_eq!(d.controls.window_minutes, 60);
        assert_eq!(d.session.buffer.len(), 1);
    }

    #[test]
    fn reload_burst_collapses_into_pending_message() {
        let (mut tx, mut rx) = futures::channel::mpsc::channel(1);
        let queued = (0..5).filter(|_| queue_reload(&mut tx)).count();
        assert!(queued >= 1 && queued < 5);

        let first = rx.try_next().unwrap();
        assert!(matches!(first, Some(Message::ConfigReloaded)));
    }

    #[test]
    fn broken_api_config_disables_client() {
        let mut cfg = DashConfig::default();
        cfg.api.base_url = "::not a url::".into();
        let d = Dashboard::from_config(cfg);
        assert!(d.client.is_err());
    }
}
