use crate::{format_delta, format_range, format_value, PLACEHOLDER};
use iced::{
    widget::{column, container, row, text},
    Element, Length,
};
use wx_core::{event::Message, Session};
use wx_theme::{style, Theme};

/// The four summary figures above the chart.
#[derive(Debug, Default)]
pub struct MetricsWidget;

/// Labels and rendered values, left to right.
pub fn figures(session: &Session) -> [(&'static str, String); 4] {
    let buffer = &session.buffer;
    let Some(current) = buffer.current() else {
        return [
            ("Current Temp (°C)", PLACEHOLDER.to_string()),
            ("Wind (m/s)", PLACEHOLDER.to_string()),
            ("Window Min/Max (°C)", PLACEHOLDER.to_string()),
            ("Δ since last (°C)", PLACEHOLDER.to_string()),
        ];
    };

    let m = buffer.metrics();
    [
        ("Current Temp (°C)", format_value(current.temperature)),
        ("Wind (m/s)", format_value(current.wind_speed)),
        ("Window Min/Max (°C)", format_range(m.min_temp, m.max_temp)),
        ("Δ since last (°C)", format_delta(m.delta_since_last)),
    ]
}

impl MetricsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, session: &'a Session, theme: &'a Theme) -> Element<'a, Message> {
        let cards = figures(session).into_iter().map(|(label, value)| {
            container(column![
                text(label).size(theme.font_size - 2.0).color(theme.muted().to_iced()),
                text(value).size(theme.font_size * 1.8),
            ]
            .spacing(4))
            .padding(theme.padding)
            .width(Length::FillPortion(1))
            .style(style::card(theme))
            .into()
        });

        row(cards).spacing(f32::from(theme.gap)).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use wx_core::Sample;

    #[test]
    fn empty_session_shows_placeholders() {
        let session = Session::new(120);
        assert!(figures(&session).iter().all(|(_, v)| v == PLACEHOLDER));
    }

    #[test]
    fn populated_session_shows_readings() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut session = Session::new(120);
        session.ingest(Ok(Sample::new(Some(t0), Some(23.5), Some(2.0))), t0);
        let t1 = t0 + TimeDelta::minutes(15);
        session.ingest(Ok(Sample::new(Some(t1), Some(19.0), Some(5.25))), t1);

        let values: Vec<_> = figures(&session).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["19.00", "5.25", "19.00 / 23.50", "-4.50"]);
    }
}
