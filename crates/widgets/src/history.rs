use crate::format_value;
use chrono::Local;
use iced::{
    widget::{column, container, row, scrollable, text, Column, Row},
    Element, Length,
};
use wx_core::{event::Message, RollingSampleBuffer, Sample};
use wx_theme::{style, Theme};

/// Table of retained samples, newest first.
#[derive(Debug, Default)]
pub struct HistoryTable;

/// `[time, temperature, wind]` cells for one sample, in local time.
pub fn cells(sample: &Sample) -> [String; 3] {
    let time = sample
        .timestamp
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();
    [time, format_value(sample.temperature), format_value(sample.wind_speed)]
}

impl HistoryTable {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, buffer: &'a RollingSampleBuffer, theme: &'a Theme) -> Element<'a, Message> {
        let size = theme.font_size - 1.0;
        let line = |[a, b, c]: [String; 3]| -> Row<'a, Message> {
            row![
                text(a).size(size).width(Length::FillPortion(2)),
                text(b).size(size).width(Length::FillPortion(1)),
                text(c).size(size).width(Length::FillPortion(1)),
            ]
        };

        let header = line([
            "time".to_string(),
            "temperature".to_string(),
            "wind".to_string(),
        ]);
        let rows = buffer
            .iter_newest_first()
            .map(|s| line(cells(s)).into());

        container(column![
            header,
            scrollable(Column::with_children(rows).spacing(2)).height(Length::Fixed(180.0)),
        ]
        .spacing(6))
        .padding(theme.padding)
        .width(Length::Fill)
        .style(style::card(theme))
        .into()
    }
}
