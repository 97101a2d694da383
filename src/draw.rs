use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::{Line, Span};
use tui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Row, Sparkline, Table,
    Tabs, Wrap,
};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::sentiment_chart::{SentimentChart, cursor_caption};
use crate::components::video::VideoPanel;
use crate::state::app_state::{GameDetailState, LoadFailure};
use crate::state::cursor::Surface;
use crate::state::worker::{ERROR_CHAR, LoadingState};
use crate::theme::Palette;
use crate::ui::layout::{DetailLayout, LayoutAreas};
use crate::theme::parse_hex;
use cfb_data::catalog::{
    COMMUNITY_POSTS, CONFIDENCE_FACTORS, KEY_METRICS, LIVE_GAMES, MATCHUPS, ODDS_MOVEMENT,
    RECOMMENDATIONS, SENTIMENT_TREND, odds_for, team_color,
};
use cfb_data::{
    BettingOdds, Comment, GameStatus, Lean, Matchup, Tone, format_american, format_minute,
    sentiment_label, sentiment_tone,
};
use log::error;

static TABS: &[&str; 4] = &["Dashboard", "Games", "Game Detail", "Sentiment"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        let palette = app.state.theme.palette();
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            f.area(),
        );

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
            MenuItem::Games => draw_games(f, layout.main, app),
            MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
            MenuItem::Sentiment => draw_sentiment(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main, palette),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs, palette);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn card<'a>(palette: &Palette, title: &'a str) -> Block<'a> {
    default_border(palette.border)
        .title(Span::styled(title, Style::default().fg(palette.text).add_modifier(Modifier::BOLD)))
        .style(Style::default().bg(palette.card))
}

fn tone_color(palette: &Palette, tone: Tone) -> Color {
    match tone {
        Tone::Positive => palette.success,
        Tone::Negative => palette.error,
        Tone::Warning => palette.warning,
    }
}

fn status_color(palette: &Palette, status: GameStatus) -> Color {
    match status {
        GameStatus::Live => palette.error,
        GameStatus::Upcoming => palette.primary,
        GameStatus::Completed => palette.text_secondary,
    }
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let palette = app.state.theme.palette();
    let style = Style::default().fg(palette.text);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::Games => 1,
        MenuItem::GameDetail => 2,
        MenuItem::Sentiment => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .border_style(Style::default().fg(palette.border)),
        )
        .highlight_style(Style::default().fg(palette.primary).add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new(format!("{} | Help: ? ", app.state.theme.label()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .border_style(Style::default().fg(palette.border)),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let [header, body, notice] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1), Constraint::Length(4)]).areas(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "College Football Dashboard",
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Live Sentiment Analytics", Style::default().fg(palette.text_secondary))),
        ])
        .alignment(Alignment::Center),
        header,
    );

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);
    let [games_area, posts_area] =
        Layout::vertical([Constraint::Length(LIVE_GAMES.len() as u16 * 3 + 2), Constraint::Fill(1)])
            .areas(left);

    draw_live_games(f, games_area, palette);
    draw_community_posts(f, posts_area, palette);
    let [recs_area, odds_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(right);
    draw_recommendations(f, recs_area, app, palette);
    draw_betting_odds(f, odds_area, app, palette);

    let block = card(palette, " Integration Ready ");
    f.render_widget(
        Paragraph::new(
            "Real-time sentiment data and live game statistics will be integrated soon. \
             Open Games (2) to explore recorded sentiment exports.",
        )
        .style(Style::default().fg(palette.text_secondary))
        .wrap(Wrap { trim: true })
        .block(block),
        notice,
    );
}

/// Horizontal bar for a [-100, 100] sentiment; the midpoint is neutral.
fn sentiment_bar(sentiment: i8, width: usize) -> String {
    let sentiment = f64::from(sentiment).clamp(-100.0, 100.0);
    let filled = ((sentiment + 100.0) / 200.0 * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Solid bar `pct` percent of `width` long.
fn percent_bar(pct: u8, width: usize) -> String {
    "█".repeat((usize::from(pct.min(100)) * width / 100).min(width))
}

fn draw_live_games(f: &mut Frame, area: Rect, palette: &Palette) {
    let block = card(palette, " Live & Upcoming Games ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bar_width = inner.width.saturating_sub(22).max(4) as usize;
    let mut lines = Vec::new();
    for game in LIVE_GAMES {
        lines.push(Line::from(vec![
            Span::styled(format!("{} vs {}", game.home, game.away), Style::default().fg(palette.text)),
            Span::raw("  "),
            Span::styled(game.score, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(game.status.label(), Style::default().fg(status_color(palette, game.status))),
        ]));
        let color = tone_color(palette, sentiment_tone(game.sentiment));
        lines.push(Line::from(vec![
            Span::styled(sentiment_bar(game.sentiment, bar_width), Style::default().fg(color)),
            Span::styled(
                format!(" {:+} {}", game.sentiment, sentiment_label(game.sentiment)),
                Style::default().fg(color),
            ),
        ]));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_community_posts(f: &mut Frame, area: Rect, palette: &Palette) {
    let block = card(palette, " Trending Community Posts ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        "Most popular fan reactions and discussions",
        Style::default().fg(palette.text_secondary),
    ))];
    for post in COMMUNITY_POSTS {
        let color = tone_color(palette, sentiment_tone(post.sentiment));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(post.platform.label(), Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {:+}%", post.sentiment), Style::default().fg(color)),
            Span::styled(format!("  {}", post.age), Style::default().fg(palette.text_secondary)),
        ]));
        lines.push(Line::from(Span::styled(post.content, Style::default().fg(palette.text))));
        lines.push(Line::from(Span::styled(
            format!("{} engagements", post.engagement),
            Style::default().fg(palette.primary),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_recommendations(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = card(palette, " AI Recommendations (j/k) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();
    for (idx, rec) in RECOMMENDATIONS.iter().enumerate() {
        let selected = idx == app.state.dashboard.selected_recommendation;
        let marker = if selected { "> " } else { "  " };
        let lean_color = match rec.lean {
            Lean::Over => palette.success,
            Lean::Under => palette.error,
            Lean::NoBet => palette.text_secondary,
        };
        let title_style = if selected {
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.primary)),
            Span::styled(rec.matchup, title_style),
            Span::styled(format!("  O/U {:.1} ", rec.total), Style::default().fg(palette.text_secondary)),
            Span::styled(rec.lean.label(), Style::default().fg(lean_color).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}%", rec.confidence), Style::default().fg(palette.warning)),
        ]));
        if selected {
            let fans = rec.fan_sentiment;
            lines.push(Line::from(Span::styled(
                format!("    {}", rec.reasoning),
                Style::default().fg(palette.text_secondary),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "    EV +{:.0}%  |  fans {}% bull / {}% bear / {}% neutral ({} posts)",
                    rec.expected_value * 100.0,
                    fans.bullish,
                    fans.bearish,
                    fans.neutral,
                    fans.total_posts
                ),
                Style::default().fg(palette.text_secondary),
            )));
        }
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Odds for the selected recommendation next to the line movement chart.
fn draw_betting_odds(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = card(palette, " Betting Odds ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let odds = RECOMMENDATIONS
        .get(app.state.dashboard.selected_recommendation)
        .and_then(|rec| odds_for(rec.game_id));
    let [summary, movement] =
        Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]).areas(inner);

    f.render_widget(Paragraph::new(odds_summary(odds, palette)), summary);
    draw_odds_movement(f, movement, odds.map(|o| o.over_under), palette);
}

fn odds_summary(odds: Option<&BettingOdds>, palette: &Palette) -> Vec<Line<'static>> {
    let dim = Style::default().fg(palette.text_secondary);
    let Some(odds) = odds else {
        return vec![Line::from(Span::styled("No odds posted", dim))];
    };
    let value = |text: String, color: Color| Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD));
    vec![
        Line::from(vec![
            Span::styled("Over/Under  ", dim),
            value(format!("{:.1}", odds.over_under), palette.text),
        ]),
        Line::from(vec![Span::styled("Over        ", dim), value(format_american(odds.over_odds), palette.success)]),
        Line::from(vec![Span::styled("Under       ", dim), value(format_american(odds.under_odds), palette.error)]),
        Line::from(""),
        Line::from(Span::styled(format!("Source: {}", odds.sportsbook), dim)),
        Line::from(Span::styled(odds.last_updated, dim)),
    ]
}

/// Y bounds for the line chart, padded to whole points around every value
/// including the current line.
fn odds_bounds(line: &[(f64, f64)], current: Option<f64>) -> Option<(f64, f64)> {
    let (min, max) = line
        .iter()
        .map(|&(_, y)| y)
        .chain(current)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    Some(((min - 0.5).floor(), (max + 0.5).ceil()))
}

fn draw_odds_movement(f: &mut Frame, area: Rect, current: Option<f32>, palette: &Palette) {
    let line: Vec<(f64, f64)> = ODDS_MOVEMENT
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, f64::from(p.over_under)))
        .collect();
    let current = current.map(f64::from);
    let Some((min, max)) = odds_bounds(&line, current) else {
        return;
    };
    let last = line.len().saturating_sub(1).max(1) as f64;
    let reference: Vec<(f64, f64)> = current.map(|c| vec![(0.0, c), (last, c)]).unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.primary))
            .data(&line),
    ];
    if !reference.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette.warning))
                .data(&reference),
        );
    }

    let dim = Style::default().fg(palette.text_secondary);
    let first_hour = ODDS_MOVEMENT.first().map(|p| p.hour).unwrap_or_default();
    let last_hour = ODDS_MOVEMENT.last().map(|p| p.hour).unwrap_or_default();
    let chart = Chart::new(datasets)
        .block(Block::default().title(Span::styled("Over/Under Line Movement", dim)))
        .x_axis(Axis::default().bounds([0.0, last]).labels([first_hour, last_hour]).style(dim))
        .y_axis(
            Axis::default()
                .bounds([min, max])
                .labels([format!("{min:.1}"), format!("{max:.1}")])
                .style(dim),
        );
    f.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Game selection
// ---------------------------------------------------------------------------

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let block = card(palette, " Select a Game (j/k, Enter) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = Row::new(["", "Matchup", "Kickoff", "Week", "Venue", "Status", "Graph"])
        .style(Style::default().fg(palette.text_secondary).add_modifier(Modifier::BOLD));

    let rows = MATCHUPS.iter().enumerate().map(|(idx, m)| {
        let selected = idx == app.state.games.selected;
        let has_graph = app.state.known_keys.iter().any(|k| k == m.export_key);
        let home = team_color(m.home)
            .and_then(parse_hex)
            .unwrap_or(palette.text);
        let away = team_color(m.away)
            .and_then(parse_hex)
            .unwrap_or(palette.text);
        let matchup = Line::from(vec![
            Span::styled(m.home, Style::default().fg(home).add_modifier(Modifier::BOLD)),
            Span::raw(" vs "),
            Span::styled(m.away, Style::default().fg(away).add_modifier(Modifier::BOLD)),
        ]);
        let row_style = if selected {
            Style::default().bg(palette.surface)
        } else {
            Style::default()
        };
        Row::new(vec![
            Line::from(if selected { ">" } else { " " }),
            matchup,
            Line::from(format!("{} {}", m.date, m.kickoff)),
            Line::from(m.week),
            Line::from(m.venue),
            Line::from(Span::styled(m.status.label(), Style::default().fg(status_color(palette, m.status)))),
            Line::from(if has_graph { "yes" } else { "-" }),
        ])
        .style(row_style)
    });

    let widths = [
        Constraint::Length(1),
        Constraint::Fill(2),
        Constraint::Length(26),
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Length(8),
        Constraint::Length(5),
    ];
    f.render_widget(
        Table::new(rows, widths).header(header).style(Style::default().fg(palette.text)),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Game detail
// ---------------------------------------------------------------------------

fn draw_game_detail(f: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.state.theme.palette();
    let block = card(palette, " Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(matchup) = app.state.game_detail.route else {
        app.state.game_detail.surfaces = [Rect::ZERO; 2];
        f.render_widget(
            Paragraph::new("Select a game in Games (2) and press Enter")
                .style(Style::default().fg(palette.text_secondary))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let layout = DetailLayout::new(inner);
    draw_detail_header(f, layout.header, matchup, app);

    let video_block = card(palette, " Video ");
    let video_inner = video_block.inner(layout.video);
    f.render_widget(video_block, layout.video);
    f.render_widget(VideoPanel { surface: &app.state.video, palette }, video_inner);

    let surfaces = draw_charts(f, layout.overview, layout.breakdown, &app.state.game_detail, &app.state.known_keys, palette);
    app.state.game_detail.surfaces = surfaces;

    draw_comments(f, layout.comments, &app.state.game_detail, palette);
    draw_info(f, layout.info, matchup, app);
}

fn draw_detail_header(f: &mut Frame, area: Rect, matchup: &Matchup, app: &App) {
    let palette = app.state.theme.palette();
    let message = match (&app.state.last_error, &app.state.status) {
        (Some(err), _) => Span::styled(format!("  {err}"), Style::default().fg(palette.error)),
        (None, Some(status)) => Span::styled(format!("  {status}"), Style::default().fg(palette.primary)),
        (None, None) => Span::raw(""),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(matchup.title(), Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                matchup.status.label(),
                Style::default().fg(status_color(palette, matchup.status)).add_modifier(Modifier::BOLD),
            ),
            message,
        ]),
        Line::from(Span::styled(
            format!("{} · {} · {} · {}", matchup.date, matchup.kickoff, matchup.week, matchup.venue),
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(Span::styled(
            "mouse/←→ move line  click/space lock  c clear  s smoothing  m more  v video  Esc back",
            Style::default().fg(palette.text_secondary),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Draw both chart cards and return their plot surfaces for hit testing.
fn draw_charts(
    f: &mut Frame,
    overview_area: Rect,
    breakdown_area: Rect,
    detail: &GameDetailState,
    known_keys: &[String],
    palette: &Palette,
) -> [Rect; 2] {
    let cursor = &detail.cursor;
    let mut overview_block = card(palette, " Game Analysis · Overall Overview ");
    let value = cursor
        .time()
        .and_then(|t| detail.cache.active(detail.smoothing_enabled).value_near(t));
    if let Some(caption) = cursor_caption(cursor.time(), value, cursor.locked()) {
        overview_block = overview_block.title_bottom(caption.style(Style::default().fg(palette.text_secondary)));
    }
    let mode = if detail.smoothing_enabled { "smoothed" } else { "raw" };
    let breakdown_block = card(palette, " Sentiment Breakdown ")
        .title_bottom(Line::from(format!(" {mode} ")).style(Style::default().fg(palette.text_secondary)));

    let mut surfaces = [Rect::ZERO; 2];
    surfaces[Surface::Overview.index()] = overview_block.inner(overview_area);
    surfaces[Surface::Breakdown.index()] = breakdown_block.inner(breakdown_area);
    f.render_widget(overview_block, overview_area);
    f.render_widget(breakdown_block, breakdown_area);

    let notice = detail_notice(detail, known_keys, palette);
    let time_range = detail.time_range();
    let best = comment_points(detail.export.as_ref().map(|e| e.best.as_slice()));
    let worst = comment_points(detail.export.as_ref().map(|e| e.worst.as_slice()));

    f.render_widget(
        SentimentChart::new(detail.active_points(), palette)
            .time_range(time_range)
            .cursor(cursor.ratio(), cursor.locked())
            .notice(notice.clone()),
        surfaces[Surface::Overview.index()],
    );
    f.render_widget(
        SentimentChart::new(detail.active_points(), palette)
            .scatter(detail.cache.aggregated_points())
            .comments(&best, &worst)
            .time_range(time_range)
            .cursor(cursor.ratio(), cursor.locked())
            .notice(notice),
        surfaces[Surface::Breakdown.index()],
    );
    surfaces
}

fn comment_points(comments: Option<&[Comment]>) -> Vec<(f64, f64)> {
    comments
        .unwrap_or_default()
        .iter()
        .filter(|c| c.minute.is_finite() && c.minute >= 0.0)
        .map(|c| (c.minute, c.score))
        .collect()
}

fn detail_notice(detail: &GameDetailState, known_keys: &[String], palette: &Palette) -> Vec<Line<'static>> {
    let key = detail.export_key().unwrap_or_default();
    match &detail.load_failure {
        Some(LoadFailure::NotFound) => vec![
            Line::from(format!("No graph available for: {key}")),
            Line::from(Span::styled(
                format!("Expected one of: {}", known_keys.join(", ")),
                Style::default().fg(palette.text_secondary),
            )),
        ],
        Some(LoadFailure::Failed(message)) => vec![
            Line::from(Span::styled(format!("Load failed: {message}"), Style::default().fg(palette.error))),
        ],
        None if detail.export.is_none() => vec![Line::from(format!("Loading {key}..."))],
        None => vec![Line::from("No sentiment data")],
    }
}

fn comment_lines<'a>(
    comments: &[&'a Comment],
    badge: Color,
    highlight: bool,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for comment in comments {
        let marker = if highlight {
            Span::styled("▌", Style::default().fg(palette.primary))
        } else {
            Span::raw(" ")
        };
        lines.push(Line::from(vec![
            marker,
            Span::styled(
                format!("{:>3.0}%", comment.score * 100.0),
                Style::default().fg(palette.background).bg(badge).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {:>6} ", format_minute(comment.minute)), Style::default().fg(palette.text_secondary)),
            Span::styled(format!("\"{}\"", comment.text), Style::default().fg(palette.text)),
        ]));
    }
    lines
}

fn draw_comments(f: &mut Frame, area: Rect, detail: &GameDetailState, palette: &Palette) {
    let block = card(palette, " Fan Reactions (j/k scroll) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if detail.export.is_none() {
        return;
    }

    let time = detail.cursor.time();
    let mut lines = Vec::new();
    if let Some(time) = time {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Showing comments from {} ± 2min", format_minute(time)),
                Style::default().fg(palette.primary),
            ),
            Span::styled("  (a: show all)", Style::default().fg(palette.text_secondary)),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Best Fan Reactions (Top 5)",
        Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
    )));
    lines.extend(comment_lines(&detail.best_comments(), palette.success, time.is_some(), palette));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Worst Fan Reactions (Bottom 15)",
        Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
    )));
    lines.extend(comment_lines(&detail.worst_comments(), palette.error, time.is_some(), palette));

    let hidden = detail.hidden_worst();
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("m: show all {hidden} negative comments"),
            Style::default().fg(palette.primary),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll_offset, 0)),
        inner,
    );
}

fn draw_info(f: &mut Frame, area: Rect, matchup: &Matchup, app: &App) {
    let palette = app.state.theme.palette();
    let detail = &app.state.game_detail;
    let block = card(palette, " Game Information ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dim = Style::default().fg(palette.text_secondary);
    let mut lines = vec![
        Line::from(Span::styled(format!("JSON File: {}", matchup.export_key), dim)),
        Line::from(Span::styled(format!("Game ID: {}", matchup.id), dim)),
    ];
    if let Some(export) = &detail.export {
        lines.push(Line::from(Span::styled(format!("Data Points: {}", export.series.len()), dim)));
        if let Some((min, max)) = export.time_range() {
            lines.push(Line::from(Span::styled(format!("Time Range: {min} - {max} minutes"), dim)));
        }
        if let Some((min, max)) = export.value_range() {
            lines.push(Line::from(Span::styled(format!("Sentiment Range: {min:.3} - {max:.3}"), dim)));
        }
        let smoothing = if detail.smoothing_enabled {
            format!("on, prominence > {:.2}", app.settings.smoothing.prominence_threshold)
        } else {
            "off".to_string()
        };
        let loaded = detail.loaded_at.as_deref().unwrap_or("-");
        lines.push(Line::from(Span::styled(format!("Smoothing: {smoothing} ([ ])  Loaded: {loaded}"), dim)));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Sentiment analysis
// ---------------------------------------------------------------------------

fn draw_sentiment(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.state.theme.palette();
    let [header, trend_area, bottom] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(12),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Sentiment Analysis",
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Fan Mood Analytics", Style::default().fg(palette.text_secondary))),
        ])
        .alignment(Alignment::Center),
        header,
    );

    let first = SENTIMENT_TREND.first().map(|p| p.hour).unwrap_or_default();
    let last = SENTIMENT_TREND.last().map(|p| p.hour).unwrap_or_default();
    let trend_block = card(palette, " Sentiment Trends ")
        .title_bottom(Line::from(format!(" {first} - {last} ")).style(Style::default().fg(palette.text_secondary)));
    let trend: Vec<u64> = SENTIMENT_TREND.iter().map(|p| u64::from(p.sentiment)).collect();
    f.render_widget(
        Sparkline::default()
            .block(trend_block)
            .data(trend)
            .max(100)
            .style(Style::default().fg(palette.primary)),
        trend_area,
    );

    let [metrics_area, split_area, confidence_area] = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .areas(bottom);

    let metrics: Vec<Line> = KEY_METRICS
        .iter()
        .map(|m| {
            Line::from(vec![
                Span::styled(format!("{:<30}", m.label), Style::default().fg(palette.text_secondary)),
                Span::styled(m.value, Style::default().fg(tone_color(palette, m.tone)).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(metrics).block(card(palette, " Key Metrics ")), metrics_area);

    let mut splits = Vec::new();
    if let Some(rec) = RECOMMENDATIONS.get(app.state.dashboard.selected_recommendation) {
        let fans = rec.fan_sentiment;
        splits.push(Line::from(Span::styled(rec.matchup, Style::default().fg(palette.text))));
        for (label, pct, color) in [
            ("Bullish", fans.bullish, palette.success),
            ("Bearish", fans.bearish, palette.error),
            ("Neutral", fans.neutral, palette.text_secondary),
        ] {
            let width = split_area.width.saturating_sub(18) as usize;
            splits.push(Line::from(vec![
                Span::styled(format!("{label:<8}"), Style::default().fg(palette.text_secondary)),
                Span::styled(percent_bar(pct, width), Style::default().fg(color)),
                Span::styled(format!(" {pct}%"), Style::default().fg(color)),
            ]));
        }
        splits.push(Line::from(Span::styled(
            format!("{} posts analysed", fans.total_posts),
            Style::default().fg(palette.text_secondary),
        )));
    }
    f.render_widget(Paragraph::new(splits).block(card(palette, " Fan Sentiment ")), split_area);

    draw_confidence(f, confidence_area, palette);
}

fn draw_confidence(f: &mut Frame, area: Rect, palette: &Palette) {
    let block = card(palette, " Model Confidence ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(5) as usize;
    let mut lines = Vec::new();
    for factor in CONFIDENCE_FACTORS {
        let color = parse_hex(factor.color).unwrap_or(palette.primary);
        lines.push(Line::from(Span::styled(factor.category, Style::default().fg(palette.text_secondary))));
        lines.push(Line::from(vec![
            Span::styled(percent_bar(factor.confidence, width), Style::default().fg(color)),
            Span::styled(format!(" {}%", factor.confidence), Style::default().fg(color)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect, palette: &Palette) {
    let rows = [
        ("q / Ctrl-c", "quit"),
        ("1 2 3 4", "Dashboard, Games, Game Detail, Sentiment"),
        ("t", "toggle light/dark theme"),
        ("f", "full screen"),
        ("\"", "show logs"),
        ("j / k", "move selection or scroll comments"),
        ("Enter", "open the selected game"),
        ("mouse", "scrub the charts; click to lock, double-click to toggle"),
        ("← / →", "move the cursor line one column"),
        ("space", "lock the cursor (twice quickly toggles)"),
        ("c / a", "clear the line / show all comments"),
        ("s", "toggle smoothing"),
        ("[ / ]", "lower / raise peak preservation threshold"),
        ("m", "show all negative comments"),
        ("v", "play game highlights"),
        ("r", "reload the open export"),
        ("Esc", "back"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)),
                Span::styled(*action, Style::default().fg(palette.text)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(card(palette, " Help ")), area);
}

fn draw_logs(f: &mut Frame, area: Rect, palette: &Palette) {
    let logs = TuiLoggerWidget::default()
        .block(card(palette, " Logs "))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(palette.error))
        .style_warn(Style::default().fg(palette.warning))
        .style_info(Style::default().fg(palette.text))
        .style_debug(Style::default().fg(palette.text_secondary));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let palette = app.state.theme.palette();
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(palette.error),
        _ => Style::default().fg(palette.text),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::video::VideoSurface;
    use crate::state::app_settings::AppSettings;
    use tui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn sentiment_bar_is_centered_on_neutral() {
        assert_eq!(sentiment_bar(0, 10), "█████░░░░░");
        assert_eq!(sentiment_bar(100, 4), "████");
        assert_eq!(sentiment_bar(-100, 4), "░░░░");
    }

    #[test]
    fn bars_clamp_out_of_range_values() {
        assert_eq!(sentiment_bar(127, 4), "████");
        assert_eq!(sentiment_bar(-128, 4), "░░░░");
        assert_eq!(percent_bar(250, 4), "████");
        assert_eq!(percent_bar(50, 4), "██");
    }

    #[test]
    fn odds_bounds_cover_current_line() {
        let line = [(0.0, 52.5), (1.0, 54.0)];
        assert_eq!(odds_bounds(&line, None), Some((52.0, 55.0)));
        assert_eq!(odds_bounds(&line, Some(48.5)), Some((48.0, 55.0)));
        assert_eq!(odds_bounds(&[], None), None);
    }

    #[test]
    fn dashboard_shows_odds_for_selected_recommendation() {
        let mut app = App::with_settings(AppSettings::default(), VideoSurface::Thumbnail, Vec::new());
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).expect("test backend");
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = buffer_text(&terminal);
        assert!(text.contains("Betting Odds"));
        assert!(text.contains("Source: DraftKings"));
        assert!(text.contains("Over/Under Line Movement"));

        app.state.dashboard.next();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(buffer_text(&terminal).contains("Source: FanDuel"));
    }

    #[test]
    fn sentiment_view_lists_confidence_factors() {
        let mut app = App::with_settings(AppSettings::default(), VideoSurface::Thumbnail, Vec::new());
        app.update_tab(MenuItem::Sentiment);
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).expect("test backend");
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = buffer_text(&terminal);
        assert!(text.contains("Model Confidence"));
        assert!(text.contains("Historical Pattern Match"));
    }

    #[test]
    fn detail_view_records_chart_surfaces() {
        let mut app = App::with_settings(AppSettings::default(), VideoSurface::Thumbnail, Vec::new());
        app.open_selected_game();
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).expect("test backend");
        draw(&mut terminal, &mut app, LoadingState::default());

        let [overview, breakdown] = app.state.game_detail.surfaces;
        assert!(overview.width > 0 && overview.height > 0);
        assert_eq!(overview.width, breakdown.width);
        assert!(buffer_text(&terminal).contains("Loading cincinativskansas.json"));
    }

    #[test]
    fn missing_graph_lists_known_exports() {
        let keys = vec!["lsuvolemiss.json".to_string()];
        let mut app = App::with_settings(AppSettings::default(), VideoSurface::Link, keys);
        app.open_selected_game();
        app.on_load_failed("cincinativskansas.json".into(), true, "No export found".into());
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).expect("test backend");
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = buffer_text(&terminal);
        assert!(text.contains("No graph available for: cincinativskansas.json"));
        assert!(text.contains("Expected one of: lsuvolemiss.json"));
    }

    #[test]
    fn every_tab_draws() {
        let mut app = App::with_settings(AppSettings::default(), VideoSurface::Thumbnail, Vec::new());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test backend");
        for tab in [MenuItem::Dashboard, MenuItem::Games, MenuItem::GameDetail, MenuItem::Sentiment, MenuItem::Help] {
            app.update_tab(tab);
            draw(&mut terminal, &mut app, LoadingState::default());
        }
        app.toggle_theme();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(buffer_text(&terminal).contains("Help"));
    }
}
