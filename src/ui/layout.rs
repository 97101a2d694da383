use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const WIDE_DETAIL_WIDTH: u16 = 100;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    /// Log pane, only sized while logs are shown.
    pub logs: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (body, logs) = if show_logs {
            let [body, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Percentage(30)]).areas(area);
            (body, logs)
        } else {
            (area, Rect::ZERO)
        };

        if full_screen {
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main: body,
                logs,
            };
        }

        let [tab, main] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(body);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            main,
            logs,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

/// Cards of the game detail view. Wide terminals get video and comments on
/// the left with both charts stacked on the right; narrow ones stack
/// everything.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetailLayout {
    pub header: Rect,
    pub video: Rect,
    pub overview: Rect,
    pub breakdown: Rect,
    pub comments: Rect,
    pub info: Rect,
}

impl DetailLayout {
    pub fn new(area: Rect) -> Self {
        let [header, body, info] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(7),
        ])
        .areas(area);

        if area.width >= WIDE_DETAIL_WIDTH {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);
            let [video, comments] =
                Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(left);
            let [overview, breakdown] =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(right);
            return Self { header, video, overview, breakdown, comments, info };
        }

        let [video, overview, breakdown, comments] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Min(6),
            Constraint::Fill(1),
        ])
        .areas(body);
        Self { header, video, overview, breakdown, comments, info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_hides_tab_bar() {
        let mut layout = LayoutAreas::new(Size::new(80, 24));
        layout.update(Rect::new(0, 0, 80, 24), true, false);
        assert_eq!(layout.tab_bar, [Rect::ZERO, Rect::ZERO]);
        assert_eq!(layout.main, Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn log_pane_takes_bottom_of_screen() {
        let mut layout = LayoutAreas::new(Size::new(80, 40));
        layout.update(Rect::new(0, 0, 80, 40), false, true);
        assert_eq!(layout.logs.height, 12);
        assert_eq!(layout.main.y, TAB_BAR_HEIGHT);
        assert_eq!(layout.main.bottom(), layout.logs.y);
    }

    #[test]
    fn wide_detail_puts_charts_side_by_side_with_video() {
        let layout = DetailLayout::new(Rect::new(0, 0, 150, 50));
        assert_eq!(layout.overview.width, layout.breakdown.width);
        assert!(layout.overview.x > layout.video.x);
        assert_eq!(layout.overview.bottom(), layout.breakdown.y);
    }

    #[test]
    fn narrow_detail_stacks_cards() {
        let layout = DetailLayout::new(Rect::new(0, 0, 80, 60));
        assert_eq!(layout.overview.x, layout.breakdown.x);
        assert!(layout.video.bottom() <= layout.overview.y);
        assert!(layout.breakdown.bottom() <= layout.comments.y);
    }
}
