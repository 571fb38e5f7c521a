use chrono::{DateTime, Local, Utc};
use iced::{
    mouse,
    widget::{canvas, column, container, text},
    Color, Element, Length, Point, Rectangle, Renderer, Size,
};
use wx_core::{event::Message, RollingSampleBuffer};
use wx_theme::{style, Theme};

/// Shown instead of the chart while the buffer is empty.
pub const EMPTY_HINT: &str =
    "No samples yet. Enable auto-refresh or click the Refresh button below.";

/// Space reserved around the plot for axis labels (left, right, top, bottom).
const MARGIN: (f32, f32, f32, f32) = (44.0, 12.0, 10.0, 22.0);
const MARKER_RADIUS: f32 = 3.5;

/// Line chart of temperature against time, with a marker per sample.
pub struct TemperatureChart {
    points:   Vec<(DateTime<Utc>, f64)>,
    line:     Color,
    axis:     Color,
    label:    Color,
    label_px: f32,
}

impl TemperatureChart {
    pub fn new(buffer: &RollingSampleBuffer, theme: &Theme) -> Self {
        Self {
            points:   buffer.temperature_series(),
            line:     theme.accent.to_iced(),
            axis:     theme.muted().with_alpha(0.35).to_iced(),
            label:    theme.muted().to_iced(),
            label_px: (theme.font_size - 3.0).max(9.0),
        }
    }

    /// Titled chart card, or the empty-state hint.
    pub fn view<'a>(
        buffer: &RollingSampleBuffer,
        location: &str,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let title = text(format!("{location}: Temperature (°C) vs Time")).size(theme.font_size + 2.0);

        let body: Element<'a, Message> = if buffer.is_empty() {
            text(EMPTY_HINT).color(theme.muted().to_iced()).into()
        } else {
            canvas(Self::new(buffer, theme))
                .width(Length::Fill)
                .height(Length::Fixed(theme.chart_height))
                .into()
        };

        container(column![title, body].spacing(f32::from(theme.gap)))
            .padding(theme.padding)
            .width(Length::Fill)
            .style(style::card(theme))
            .into()
    }
}

/// Value ranges mapped onto the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    t0:   i64,
    t1:   i64,
    y0:   f64,
    y1:   f64,
    plot: Rectangle,
}

impl Scale {
    /// Fit `points` into `size` minus the label margins.  Degenerate ranges
    /// (one sample, flat temperature) are widened so the point sits mid-plot.
    fn fit(points: &[(DateTime<Utc>, f64)], size: Size) -> Option<Self> {
        let (first, last) = (points.first()?, points.last()?);
        let (mut t0, mut t1) = (first.0.timestamp(), last.0.timestamp());
        if t0 == t1 {
            t0 -= 60;
            t1 += 60;
        }

        let (mut y0, mut y1) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let pad = ((y1 - y0) * 0.1).max(0.5);
        y0 -= pad;
        y1 += pad;

        let (left, right, top, bottom) = MARGIN;
        let plot = Rectangle {
            x:      left,
            y:      top,
            width:  (size.width - left - right).max(1.0),
            height: (size.height - top - bottom).max(1.0),
        };

        Some(Self { t0, t1, y0, y1, plot })
    }

    fn project(&self, t: DateTime<Utc>, y: f64) -> Point {
        let fx = (t.timestamp() - self.t0) as f32 / (self.t1 - self.t0) as f32;
        let fy = ((y - self.y0) / (self.y1 - self.y0)) as f32;
        Point::new(
            self.plot.x + fx * self.plot.width,
            self.plot.y + (1.0 - fy) * self.plot.height,
        )
    }
}

impl canvas::Program<Message> for TemperatureChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let Some(scale) = Scale::fit(&self.points, bounds.size()) else {
            return vec![frame.into_geometry()];
        };

        self.draw_axes(&mut frame, &scale);

        let projected: Vec<Point> = self.points.iter().map(|&(t, y)| scale.project(t, y)).collect();
        if projected.len() > 1 {
            let line = canvas::Path::new(|b| {
                b.move_to(projected[0]);
                for p in &projected[1..] {
                    b.line_to(*p);
                }
            });
            frame.stroke(&line, canvas::Stroke::default().with_color(self.line).with_width(2.0));
        }
        for p in &projected {
            frame.fill(&canvas::Path::circle(*p, MARKER_RADIUS), self.line);
        }

        vec![frame.into_geometry()]
    }
}

impl TemperatureChart {
    fn draw_axes(&self, frame: &mut canvas::Frame, scale: &Scale) {
        let plot = scale.plot;
        let stroke = || canvas::Stroke::default().with_color(self.axis).with_width(1.0);
        let bottom_left = Point::new(plot.x, plot.y + plot.height);

        frame.stroke(&canvas::Path::line(Point::new(plot.x, plot.y), bottom_left), stroke());
        frame.stroke(
            &canvas::Path::line(bottom_left, Point::new(plot.x + plot.width, plot.y + plot.height)),
            stroke(),
        );

        // y: top and bottom of the range
        for (value, y) in [(scale.y1, plot.y), (scale.y0, plot.y + plot.height - self.label_px)] {
            self.label_at(frame, format!("{value:.1}"), Point::new(2.0, y));
        }

        // x: first and last sample times in local time
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            let y = plot.y + plot.height + 4.0;
            self.label_at(frame, local_hm(first.0), Point::new(plot.x, y));
            if last.0 != first.0 {
                let x = (plot.x + plot.width - 36.0).max(plot.x);
                self.label_at(frame, local_hm(last.0), Point::new(x, y));
            }
        }
    }

    fn label_at(&self, frame: &mut canvas::Frame, content: String, position: Point) {
        frame.fill_text(canvas::Text {
            content,
            position,
            color: self.label,
            size: self.label_px.into(),
            ..canvas::Text::default()
        });
    }
}

fn local_hm(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    }

    #[test]
    fn empty_series_has_no_scale() {
        assert!(Scale::fit(&[], Size::new(400.0, 200.0)).is_none());
    }

    #[test]
    fn endpoints_map_to_plot_edges() {
        let points = [(at(0), 10.0), (at(60), 20.0)];
        let scale = Scale::fit(&points, Size::new(400.0, 200.0)).unwrap();

        let first = scale.project(points[0].0, points[0].1);
        let last = scale.project(points[1].0, points[1].1);
        assert_eq!(first.x, scale.plot.x);
        assert!((last.x - (scale.plot.x + scale.plot.width)).abs() < 1e-3);
        // warmer sample sits higher on screen
        assert!(last.y < first.y);
    }

    #[test]
    fn single_point_is_centred() {
        let points = [(at(0), 21.0)];
        let scale = Scale::fit(&points, Size::new(300.0, 150.0)).unwrap();
        let p = scale.project(points[0].0, points[0].1);
        let mid_x = scale.plot.x + scale.plot.width / 2.0;
        let mid_y = scale.plot.y + scale.plot.height / 2.0;
        assert!((p.x - mid_x).abs() < 1e-3);
        assert!((p.y - mid_y).abs() < 1e-3);
    }

    #[test]
    fn all_points_stay_inside_plot() {
        let points: Vec<_> = (0..10).map(|i| (at(i * 7), 15.0 + (i as f64).sin() * 4.0)).collect();
        let scale = Scale::fit(&points, Size::new(640.0, 280.0)).unwrap();
        let plot = scale.plot;
        for &(t, y) in &points {
            let p = scale.project(t, y);
            let inside = p.x >= plot.x - 1e-3
                && p.x <= plot.x + plot.width + 1e-3
                && p.y >= plot.y - 1e-3
                && p.y <= plot.y + plot.height + 1e-3;
            assert!(inside, "{p:?} outside {plot:?}");
        }
    }
}
