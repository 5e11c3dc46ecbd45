//! Chart view rendering.
//!
//! Draws one line per task. The x axis is the run index (oldest run on the
//! left), the y axis the duration in the chart's display unit.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_scaled;
use crate::data::DurationChart;

/// Headroom above the tallest point.
const Y_MARGIN: f64 = 1.1;

/// Label format for execution dates on the x axis.
const DATE_LABEL: &str = "%m-%d %H:%M";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(ref chart) = app.chart else {
        frame.render_widget(Paragraph::new(" Waiting for data...").block(block), area);
        return;
    };

    if chart.is_empty() {
        frame.render_widget(
            Paragraph::new(" No task instances in this payload").block(block),
            area,
        );
        return;
    }

    let points = line_points(chart);
    let selected = app.selected_task();

    let datasets: Vec<Dataset> = chart
        .task_ids
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (task_id, data))| {
            let mut style = Style::default().fg(app.theme.series_color(i));
            if selected == Some(task_id.as_str()) {
                style = style.add_modifier(Modifier::BOLD);
            }
            Dataset::default()
                .name(task_id.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(data)
        })
        .collect();

    let x_max = chart.run_count().saturating_sub(1).max(1) as f64;
    let y_max = (chart.max_scaled() * Y_MARGIN).max(1.0);

    let x_axis = Axis::default()
        .title("Execution date")
        .style(Style::default().fg(app.theme.border))
        .bounds([0.0, x_max])
        .labels(x_labels(chart));

    let y_axis = Axis::default()
        .title(format!("Duration ({})", chart.unit))
        .style(Style::default().fg(app.theme.border))
        .bounds([0.0, y_max])
        .labels(vec![
            format_scaled(0.0, chart.unit),
            format_scaled(y_max / 2.0, chart.unit),
            format_scaled(y_max, chart.unit),
        ]);

    let title = format!(
        " Task Duration ({} tasks, {} runs, {}) ",
        chart.task_ids.len(),
        chart.run_count(),
        chart.unit
    );

    let widget = Chart::new(datasets)
        .block(block.title(title))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(widget, area);
}

/// Plot points per task. Runs where the task has no duration are skipped.
fn line_points(chart: &DurationChart) -> Vec<Vec<(f64, f64)>> {
    chart
        .scaled()
        .into_iter()
        .map(|(_, values)| {
            values
                .into_iter()
                .enumerate()
                .filter_map(|(x, v)| v.map(|y| (x as f64, y)))
                .collect()
        })
        .collect()
}

fn x_labels(chart: &DurationChart) -> Vec<String> {
    let dates = &chart.execution_dates;
    match dates.len() {
        0 => Vec::new(),
        1 => vec![dates[0].format(DATE_LABEL).to_string()],
        n => vec![
            dates[0].format(DATE_LABEL).to_string(),
            dates[n - 1].format(DATE_LABEL).to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UnitChoice;
    use crate::source::TaskDurationData;

    fn chart() -> DurationChart {
        let data = TaskDurationData::parse(
            r#"{"task_instances": [
                {"task_id": "a", "execution_date": "2024-05-01T06:00:00Z", "duration": 60},
                {"task_id": "a", "execution_date": "2024-05-02T06:00:00Z", "duration": 180},
                {"task_id": "b", "execution_date": "2024-05-02T06:00:00Z", "duration": 120}
            ]}"#,
        )
        .unwrap();
        DurationChart::from_data(&data, UnitChoice::Auto)
    }

    #[test]
    fn test_line_points_skip_gaps() {
        let points = line_points(&chart());
        assert_eq!(points[0], vec![(0.0, 1.0), (1.0, 3.0)]);
        assert_eq!(points[1], vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_x_labels() {
        assert_eq!(x_labels(&chart()), vec!["05-01 06:00", "05-02 06:00"]);
    }
}
