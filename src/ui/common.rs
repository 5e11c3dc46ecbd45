//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar: task and run counts, display unit, refresh state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" TASK DURATION ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref chart) = app.chart else {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (refresh_label, refresh_style) = if app.refresh.is_on() {
        (
            format!("● live {}", interval_label(app.refresh.interval())),
            Style::default().fg(app.theme.live),
        )
    } else {
        ("○ paused".to_string(), Style::default().add_modifier(Modifier::DIM))
    };

    let line = Line::from(vec![
        title,
        Span::raw("│ "),
        Span::styled(
            format!("{}", chart.task_ids.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" tasks "),
        Span::styled(
            format!("{}", chart.run_count()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" runs │ unit "),
        Span::styled(chart.unit.label(), Style::default().fg(app.theme.highlight)),
        Span::raw(format!(" ({}) │ ", app.unit_choice.label())),
        Span::styled(refresh_label, refresh_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Refresh interval for the header, e.g. "5s", "500ms".
fn interval_label(interval: Duration) -> String {
    format!("{:?}", interval)
}

/// Render the tab bar, highlighting the active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Chart "), Line::from(" 2:Table ")];

    let selected = match app.current_view {
        View::Chart => 0,
        View::Table => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Temporary status messages take priority, then load errors, then the
/// regular source/age/controls line.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let style = if app.load_error.is_some() {
            Style::default().fg(app.theme.error)
        } else {
            Style::default().fg(app.theme.highlight)
        };
        frame.render_widget(Paragraph::new(format!(" {} ", msg)).style(style), area);
        return;
    }

    const CONTROLS: &str = "Tab:switch u:unit a:auto-refresh r:reload e:export ?:help q:quit";

    let status = match (&app.chart, &app.load_error) {
        (_, Some(err)) => format!(" Error: {} | r:retry q:quit", err),
        (Some(chart), None) => format!(
            " {} | Updated {:.1}s ago | {}",
            app.source_description(),
            chart.last_updated.elapsed().as_secs_f64(),
            CONTROLS,
        ),
        (None, None) => " Loading... | q:quit".to_string(),
    };

    let style = if app.load_error.is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab 1 2     Switch views"),
        Line::from("  ↑/↓ j/k     Select task"),
        Line::from("  Home/End    First/last task"),
        Line::from(""),
        section(" Chart"),
        Line::from("  u           Cycle unit (auto/s/min/h/d)"),
        Line::from("  a           Toggle auto-refresh"),
        Line::from("  r           Reload now"),
        Line::from(""),
        section(" General"),
        Line::from("  e           Export chart option JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
