//! Container styles shared by the dashboard widgets.

use crate::Theme;
use iced::widget::container;
use iced::{Background, Border};

/// Rounded card behind each metric and the chart.
pub fn card(theme: &Theme) -> impl Fn(&iced::Theme) -> container::Style {
    let bg = theme.card.to_iced();
    let fg = theme.foreground.to_iced();
    let radius = theme.border_radius;
    move |_| container::Style {
        background: Some(Background::Color(bg)),
        text_color: Some(fg),
        border: Border { radius: radius.into(), ..Default::default() },
        ..Default::default()
    }
}

/// Outlined banner for fetch warnings.
pub fn warning_banner(theme: &Theme) -> impl Fn(&iced::Theme) -> container::Style {
    let tint = theme.warning.with_alpha(0.12).to_iced();
    let edge = theme.warning.to_iced();
    let radius = theme.border_radius;
    move |_| container::Style {
        background: Some(Background::Color(tint)),
        text_color: Some(edge),
        border: Border { color: edge, width: 1.0, radius: radius.into() },
        ..Default::default()
    }
}
