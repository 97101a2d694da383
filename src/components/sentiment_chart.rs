use crate::state::cursor::{BAND_END, BAND_START};
use crate::theme::Palette;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Modifier, Style};
use tui::symbols::Marker;
use tui::text::Line;
use tui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap};

const CURSOR_SYMBOL: &str = "│";
const NEUTRAL: f64 = 0.5;

/// Column of the cursor line for a ratio over the whole surface width.
pub fn cursor_column(area: Rect, ratio: f64) -> Option<u16> {
    if area.width == 0 || !ratio.is_finite() {
        return None;
    }
    let offset = (ratio.clamp(0.0, 1.0) * f64::from(area.width - 1)).round() as u16;
    Some(area.x + offset)
}

/// Columns `[start, end]` the plot occupies: the cursor band of the surface.
pub fn plot_span(area: Rect) -> Option<(u16, u16)> {
    Some((cursor_column(area, BAND_START)?, cursor_column(area, BAND_END)?))
}

/// One of the two synchronized chart surfaces. The plot is squeezed into the
/// cursor band so a cursor at the band edges sits on the first and last
/// sample; the margins carry axis labels.
pub struct SentimentChart<'a> {
    pub line: &'a [(f64, f64)],
    pub scatter: &'a [(f64, f64)],
    pub highlights: &'a [(f64, f64)],
    pub lowlights: &'a [(f64, f64)],
    pub time_range: Option<(f64, f64)>,
    pub cursor: Option<f64>,
    pub locked: bool,
    /// Shown instead of the plot when there is nothing to draw.
    pub notice: Vec<Line<'a>>,
    pub palette: &'a Palette,
}

impl<'a> SentimentChart<'a> {
    pub fn new(line: &'a [(f64, f64)], palette: &'a Palette) -> Self {
        Self {
            line,
            scatter: &[],
            highlights: &[],
            lowlights: &[],
            time_range: None,
            cursor: None,
            locked: false,
            notice: vec![Line::from("No sentiment data")],
            palette,
        }
    }

    pub fn scatter(mut self, points: &'a [(f64, f64)]) -> Self {
        self.scatter = points;
        self
    }

    /// Best and worst comment markers, plotted at `(minute, score)`.
    pub fn comments(mut self, best: &'a [(f64, f64)], worst: &'a [(f64, f64)]) -> Self {
        self.highlights = best;
        self.lowlights = worst;
        self
    }

    pub fn time_range(mut self, range: Option<(f64, f64)>) -> Self {
        self.time_range = range;
        self
    }

    pub fn cursor(mut self, ratio: Option<f64>, locked: bool) -> Self {
        self.cursor = ratio;
        self.locked = locked;
        self
    }

    pub fn notice(mut self, lines: Vec<Line<'a>>) -> Self {
        self.notice = lines;
        self
    }

    fn x_bounds(&self) -> [f64; 2] {
        match self.time_range {
            Some((min, max)) if max > min => [min, max],
            Some((min, _)) => [min - 0.5, min + 0.5],
            None => [0.0, 1.0],
        }
    }

    fn render_labels(&self, area: Rect, plot: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(self.palette.text_secondary);
        let margin = plot.x.saturating_sub(area.x).saturating_sub(1);
        if margin > 0 {
            let left = Rect::new(area.x, plot.y, margin, 1);
            Paragraph::new("1.0").alignment(Alignment::Right).style(dim).render(left, buf);
            let bottom = Rect::new(area.x, plot.bottom().saturating_sub(1), margin, 1);
            Paragraph::new("0.0").alignment(Alignment::Right).style(dim).render(bottom, buf);
        }

        if area.height > plot.height
            && let Some((min, max)) = self.time_range
        {
            let row = Rect::new(plot.x, plot.bottom(), plot.width, 1);
            Paragraph::new(cfb_data::format_minute(min)).style(dim).render(row, buf);
            Paragraph::new(cfb_data::format_minute(max))
                .alignment(Alignment::Right)
                .style(dim)
                .render(row, buf);
        }
    }

    fn render_cursor(&self, area: Rect, buf: &mut Buffer) {
        let Some(column) = self.cursor.and_then(|ratio| cursor_column(area, ratio)) else {
            return;
        };
        let style = if self.locked {
            Style::default().fg(self.palette.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.primary)
        };
        for y in area.top()..area.bottom() {
            if let Some(cell) = buf.cell_mut((column, y)) {
                cell.set_symbol(CURSOR_SYMBOL).set_style(style);
            }
        }
    }
}

impl Widget for SentimentChart<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let Some((start, end)) = plot_span(area) else {
            return;
        };
        // Bottom row holds the time labels when there is room for it.
        let plot_height = if area.height > 3 { area.height - 1 } else { area.height };
        let plot = Rect::new(start, area.y, end - start + 1, plot_height);

        if self.line.is_empty() && self.scatter.is_empty() {
            let notice = std::mem::take(&mut self.notice);
            let height = (notice.len() as u16).min(area.height);
            let top = area.y + (area.height - height) / 2;
            Paragraph::new(notice)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(self.palette.text_secondary))
                .render(Rect::new(area.x, top, area.width, area.height - (top - area.y)), buf);
            self.render_cursor(area, buf);
            return;
        }

        let [x_min, x_max] = self.x_bounds();
        let neutral = [(x_min, NEUTRAL), (x_max, NEUTRAL)];

        let mut datasets = vec![
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.palette.border))
                .data(&neutral),
        ];
        if !self.scatter.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(self.palette.text_secondary))
                    .data(self.scatter),
            );
        }
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.palette.primary))
                .data(self.line),
        );
        for (points, color) in [(self.lowlights, self.palette.error), (self.highlights, self.palette.success)] {
            if !points.is_empty() {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Block)
                        .graph_type(GraphType::Scatter)
                        .style(Style::default().fg(color))
                        .data(points),
                );
            }
        }

        Chart::new(datasets)
            .x_axis(Axis::default().bounds([x_min, x_max]))
            .y_axis(Axis::default().bounds([0.0, 1.0]))
            .render(plot, buf);

        self.render_labels(area, plot, buf);
        self.render_cursor(area, buf);
    }
}

/// Caption under a chart: the cursor minute, the sentiment there, and the
/// lock marker.
pub fn cursor_caption(time: Option<f64>, value: Option<f64>, locked: bool) -> Option<Line<'static>> {
    let time = time?;
    let value = value.map(|v| format!(" · {v:.2}")).unwrap_or_default();
    let suffix = if locked { " (Locked)" } else { "" };
    Some(Line::from(format!(" Cursor: {}{value}{suffix} ", cfb_data::format_minute(time))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DARK;

    #[test]
    fn cursor_column_spans_full_width() {
        let area = Rect::new(10, 0, 101, 5);
        assert_eq!(cursor_column(area, 0.0), Some(10));
        assert_eq!(cursor_column(area, 1.0), Some(110));
        assert_eq!(cursor_column(area, 0.5), Some(60));
        assert_eq!(cursor_column(Rect::new(0, 0, 0, 5), 0.5), None);
    }

    #[test]
    fn plot_fills_cursor_band() {
        let area = Rect::new(0, 0, 101, 5);
        assert_eq!(plot_span(area), Some((20, 80)));
    }

    #[test]
    fn cursor_line_is_drawn_full_height() {
        let area = Rect::new(0, 0, 41, 8);
        let mut buf = Buffer::empty(area);
        let line = [(0.0, 0.2), (10.0, 0.8)];
        SentimentChart::new(&line, &DARK)
            .time_range(Some((0.0, 10.0)))
            .cursor(Some(0.5), true)
            .render(area, &mut buf);

        for y in 0..8u16 {
            assert_eq!(buf[(20u16, y)].symbol(), CURSOR_SYMBOL);
            assert_eq!(buf[(20u16, y)].fg, DARK.warning);
        }
    }

    #[test]
    fn empty_series_shows_notice() {
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        SentimentChart::new(&[], &DARK).render(area, &mut buf);
        let row: String = (0..40u16).map(|x| buf[(x, 2u16)].symbol().to_string()).collect();
        assert!(row.contains("No sentiment data"));
    }

    #[test]
    fn custom_notice_replaces_default() {
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        SentimentChart::new(&[], &DARK)
            .notice(vec![Line::from("No graph available for: x.json")])
            .cursor(Some(0.2), false)
            .render(area, &mut buf);
        let row: String = (0..50u16).map(|x| buf[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains("graph available for: x.json"));
        assert_eq!(buf[(10u16, 0u16)].symbol(), CURSOR_SYMBOL);
    }

    #[test]
    fn caption_reports_lock() {
        let caption = cursor_caption(Some(12.5), Some(0.613), true).expect("time present");
        assert_eq!(caption.to_string(), " Cursor: 12:30 · 0.61 (Locked) ");
        let caption = cursor_caption(Some(3.0), None, false).expect("time present");
        assert_eq!(caption.to_string(), " Cursor: 3:00 ");
        assert!(cursor_caption(None, Some(0.5), false).is_none());
    }
}
