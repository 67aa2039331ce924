//! Latency chart rendered to text.
//!
//! The chart is drawn with ratatui's `Chart` widget into an off-screen buffer, which
//! is then flattened into coloured lines so it can be printed as part of a frame.

use crate::monitor::constants::*;
use crate::monitor::error::{MonitorError, Result};
use crate::monitor::history::History;
use colored::Colorize;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Widget};
use tracing::debug;

const CHART_TITLE: &str = "Real-time Internet Latency";
const Y_AXIS_TITLE: &str = "(ms)";
const X_AXIS_TITLE: &str = "(Press Ctrl+C to Exit)";

/// Dimensions of the chart in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    pub width: u16,
    pub height: u16,
    /// The terminal was smaller than the floors and the floors were used instead
    pub undersized: bool,
}

impl PlotArea {
    /// Derive the chart size from the terminal size in columns and rows
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        let overhead = STATUS_MESSAGE_RESERVED_LINES as u16 + PLOT_ESTIMATED_OVERHEAD_LINES;
        let height = rows.saturating_sub(overhead);
        let width = columns.saturating_sub(PLOT_HORIZONTAL_MARGIN);
        let undersized = width < PLOT_MIN_WIDTH_CHARS || height < PLOT_MIN_HEIGHT_LINES;

        // Very large terminals lose rows first, then columns
        let max_width = (PLOT_MAX_CELLS / u32::from(PLOT_MIN_HEIGHT_LINES)) as u16;
        let width = width.max(PLOT_MIN_WIDTH_CHARS).min(max_width);
        let max_height = (PLOT_MAX_CELLS / u32::from(width)) as u16;
        let height = height.max(PLOT_MIN_HEIGHT_LINES).min(max_height);

        Self {
            width,
            height,
            undersized,
        }
    }

    /// Number of cells covered by the chart
    pub fn cells(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

/// Upper bound of the Y-axis.
///
/// The greater of the reference maximum and 110% of the largest positive value,
/// never below [`PLOT_MIN_Y_LIM_UPPER`].
pub fn y_axis_upper_bound(reference_max: f64, max_plot_value: Option<f64>) -> f64 {
    let candidate = match max_plot_value {
        Some(max) if max > 0.0 => max * PLOT_Y_HEADROOM_FACTOR,
        _ => reference_max,
    };
    reference_max.max(candidate).max(PLOT_MIN_Y_LIM_UPPER)
}

/// `count` evenly spaced tick positions from 0 to `upper`, both inclusive
pub fn y_tick_positions(upper: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = upper / (count - 1) as f64;
            (0..count).map(|i| i as f64 * step).collect()
        }
    }
}

fn tick_labels(upper: f64, count: usize) -> Vec<Line<'static>> {
    let ticks = y_tick_positions(upper, count);
    let step = if count > 1 { upper / (count - 1) as f64 } else { upper };
    ticks
        .into_iter()
        .map(|tick| {
            if step >= 1.0 {
                Line::from(format!("{:.0}", tick))
            } else {
                Line::from(format!("{:.1}", tick))
            }
        })
        .collect()
}

/// Render the latency series of `history` into `area.height` lines of text
pub fn render_chart(history: &History, reference_max: f64, y_ticks: usize, area: PlotArea) -> Result<Vec<String>> {
    if area.width == 0 || area.height == 0 {
        return Err(MonitorError::Render(format!(
            "plot area {}x{} is empty",
            area.width, area.height
        )));
    }
    if area.cells() > PLOT_MAX_CELLS {
        return Err(MonitorError::Render(format!(
            "plot area {}x{} exceeds {} cells",
            area.width, area.height, PLOT_MAX_CELLS
        )));
    }

    let upper = y_axis_upper_bound(reference_max, history.max_plot_value());
    if !upper.is_finite() {
        return Err(MonitorError::Render(format!("invalid Y-axis bound {}", upper)));
    }

    let series: Vec<(f64, f64)> = history
        .plot_values()
        .enumerate()
        .map(|(i, v)| (i as f64, v))
        .collect();
    if let Some((i, v)) = series.iter().find(|(_, v)| !v.is_finite()) {
        return Err(MonitorError::Render(format!("non-finite latency {} at index {}", v, i)));
    }

    let failures: Vec<(f64, f64)> = history
        .failure_indices()
        .into_iter()
        .map(|i| (i as f64, PLOT_FAILURE_MARKER_Y_BASE))
        .collect();

    debug!(
        width = area.width,
        height = area.height,
        points = series.len(),
        failures = failures.len(),
        y_upper = upper,
        "Rendering chart"
    );

    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&series),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&failures),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(CHART_TITLE))
        .x_axis(
            Axis::default()
                .title(X_AXIS_TITLE)
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .title(Y_AXIS_TITLE)
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, upper])
                .labels(tick_labels(upper, y_ticks)),
        );

    let rect = Rect::new(0, 0, area.width, area.height);
    let mut buffer = Buffer::empty(rect);
    chart.render(rect, &mut buffer);

    Ok(buffer_lines(&buffer))
}

/// Flatten a buffer into one string per row, colouring runs of equal foreground
fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut run = String::new();
        let mut run_color = Color::Reset;

        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            if cell.fg != run_color && !run.is_empty() {
                line.push_str(&paint(&run, run_color));
                run.clear();
            }
            run_color = cell.fg;
            run.push_str(cell.symbol());
        }
        line.push_str(&paint(run.trim_end(), run_color));
        lines.push(line.trim_end().to_string());
    }

    lines
}

fn paint(text: &str, color: Color) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    match color {
        Color::Cyan => text.cyan().to_string(),
        Color::Red => text.red().bold().to_string(),
        Color::Gray => text.white().to_string(),
        Color::DarkGray => text.bright_black().to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Sample;

    fn history_of(samples: &[Sample]) -> History {
        let mut history = History::new(MAX_DATA_POINTS);
        for sample in samples {
            history.push(*sample);
        }
        history
    }

    #[test]
    fn test_upper_bound_uses_reference_when_data_is_low() {
        assert_eq!(y_axis_upper_bound(200.0, Some(50.0)), 200.0);
    }

    #[test]
    fn test_upper_bound_scales_with_data() {
        let upper = y_axis_upper_bound(200.0, Some(250.0));
        assert!((upper - 275.0).abs() < 1e-9);
    }

    #[test]
    fn test_upper_bound_floor() {
        assert_eq!(y_axis_upper_bound(2.0, None), PLOT_MIN_Y_LIM_UPPER);
        assert_eq!(y_axis_upper_bound(2.0, Some(3.0)), PLOT_MIN_Y_LIM_UPPER);
    }

    #[test]
    fn test_tick_positions() {
        assert_eq!(y_tick_positions(200.0, 5), vec![0.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(y_tick_positions(10.0, 2), vec![0.0, 10.0]);
        assert_eq!(y_tick_positions(10.0, 6).len(), 6);
    }

    #[test]
    fn test_plot_area_from_terminal() {
        let area = PlotArea::from_terminal(80, 40);
        assert_eq!(area.width, 78);
        assert_eq!(area.height, 40 - 3 - PLOT_ESTIMATED_OVERHEAD_LINES);
        assert!(!area.undersized);
    }

    #[test]
    fn test_plot_area_floors() {
        let area = PlotArea::from_terminal(10, 10);
        assert_eq!(area.width, PLOT_MIN_WIDTH_CHARS);
        assert_eq!(area.height, PLOT_MIN_HEIGHT_LINES);
        assert!(area.undersized);
    }

    #[test]
    fn test_plot_area_capped_on_large_terminal() {
        let area = PlotArea::from_terminal(300, 250);
        assert_eq!(area.width, 298);
        assert_eq!(area.height, (PLOT_MAX_CELLS / 298) as u16);
        assert!(area.cells() <= PLOT_MAX_CELLS);
        assert!(!area.undersized);

        let widest = PlotArea::from_terminal(u16::MAX, u16::MAX);
        assert!(widest.cells() <= PLOT_MAX_CELLS);
        assert!(widest.height >= PLOT_MIN_HEIGHT_LINES);
    }

    #[test]
    fn test_render_chart_on_large_terminal() -> Result<()> {
        let history = history_of(&[Sample::Reply(12.0), Sample::Failed, Sample::Reply(48.0)]);
        let area = PlotArea::from_terminal(300, 250);
        let lines = render_chart(&history, 200.0, 6, area)?;
        assert_eq!(lines.len(), area.height as usize);
        Ok(())
    }

    #[test]
    fn test_render_chart_rejects_oversized_area() {
        let history = history_of(&[Sample::Reply(10.0)]);
        let area = PlotArea {
            width: 300,
            height: 250,
            undersized: false,
        };
        assert!(matches!(
            render_chart(&history, 200.0, 6, area),
            Err(MonitorError::Render(_))
        ));
    }

    #[test]
    fn test_render_chart_has_requested_height() -> Result<()> {
        let history = history_of(&[Sample::Reply(10.0), Sample::Failed, Sample::Reply(30.0)]);
        let area = PlotArea::from_terminal(80, 40);
        let lines = render_chart(&history, 200.0, 6, area)?;
        assert_eq!(lines.len(), area.height as usize);
        assert!(lines.iter().any(|l| l.contains(CHART_TITLE)));
        Ok(())
    }

    #[test]
    fn test_render_chart_rejects_empty_area() {
        let history = history_of(&[Sample::Reply(10.0)]);
        let area = PlotArea {
            width: 0,
            height: 10,
            undersized: false,
        };
        assert!(matches!(
            render_chart(&history, 200.0, 6, area),
            Err(MonitorError::Render(_))
        ));
    }

    #[test]
    fn test_render_chart_rejects_non_finite_values() {
        let history = history_of(&[Sample::Reply(f64::NAN)]);
        let area = PlotArea::from_terminal(80, 40);
        assert!(render_chart(&history, 200.0, 6, area).is_err());
    }
}
