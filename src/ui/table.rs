//! Table view rendering.
//!
//! One row per task, one column per run (most recent runs that fit the
//! width), each cell the total duration of the task in that run.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_seconds;

const TASK_COLUMN_WIDTH: u16 = 24;
const RUN_COLUMN_WIDTH: u16 = 12;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(ref chart) = app.chart else {
        frame.render_widget(Paragraph::new(" Waiting for data...").block(block), area);
        return;
    };

    let visible = visible_runs(chart.run_count(), area.width);
    let first_run = chart.run_count() - visible;

    let mut header_cells = vec![Cell::from("Task")];
    header_cells.extend(
        chart.execution_dates[first_run..]
            .iter()
            .map(|d| Cell::from(d.format("%m-%d %H:%M").to_string())),
    );
    let header = Row::new(header_cells).height(1).style(app.theme.header);

    let rows: Vec<Row> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let mut cells = vec![Cell::from(series.name.clone())
                .style(Style::default().fg(app.theme.series_color(i)))];
            cells.extend(series.values[first_run..].iter().map(|v| {
                Cell::from(v.map(format_seconds).unwrap_or_else(|| "-".to_string()))
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Min(TASK_COLUMN_WIDTH)];
    widths.extend(std::iter::repeat(Constraint::Length(RUN_COLUMN_WIDTH)).take(visible));

    let title = format!(
        " Durations ({} of {} runs) [{}/{}] ",
        visible,
        chart.run_count(),
        (app.selected_task_index + 1).min(chart.task_ids.len()),
        chart.task_ids.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !chart.is_empty() {
        state.select(Some(app.selected_task_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// How many run columns fit next to the task column.
fn visible_runs(run_count: usize, width: u16) -> usize {
    // Borders, highlight symbol and column spacing
    let usable = width.saturating_sub(TASK_COLUMN_WIDTH + 4);
    let fit = (usable / (RUN_COLUMN_WIDTH + 1)) as usize;
    run_count.min(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_runs() {
        assert_eq!(visible_runs(10, 20), 0);
        assert_eq!(visible_runs(10, 28 + 13 * 3), 3);
        assert_eq!(visible_runs(2, 200), 2);
    }
}
