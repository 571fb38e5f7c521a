use iced::{
    widget::{container, text},
    Element, Length,
};
use wx_core::{event::Message, Session};
use wx_theme::{style, Theme};

/// Warning shown while the display is running on fallback data.
#[derive(Debug, Default)]
pub struct StatusBanner;

impl StatusBanner {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when the last fetch succeeded; callers should skip rendering.
    pub fn view<'a>(&'a self, session: &'a Session, theme: &'a Theme) -> Option<Element<'a, Message>> {
        let warning = session.warning.as_deref()?;
        Some(
            container(text(warning).size(theme.font_size))
                .padding(theme.padding / 2)
                .width(Length::Fill)
                .style(style::warning_banner(theme))
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use wx_core::{FetchError, Sample};

    #[test]
    fn hidden_until_a_fetch_fails() {
        let banner = StatusBanner::new();
        let theme = Theme::default();
        let session = Session::new(120);
        assert!(banner.view(&session, &theme).is_none());
    }

    #[test]
    fn shown_on_error_and_cleared_by_next_success() {
        let banner = StatusBanner::new();
        let theme = Theme::default();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut session = Session::new(120);

        session.ingest(Err(FetchError::Http("connection refused".into())), t0);
        assert!(banner.view(&session, &theme).is_some());

        let t1 = t0 + TimeDelta::minutes(1);
        session.ingest(Ok(Sample::new(Some(t1), Some(20.0), Some(1.0))), t1);
        assert!(banner.view(&session, &theme).is_none());
    }
}
