//! Dashboard rendering
//!
//! Everything here is a pure function of the scheduler state; no values are
//! computed beyond formatting.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
};

use super::format::{format_change, format_count, format_metric};
use crate::error::StatsError;
use crate::refresh::SchedulerState;
use crate::stats::{DeltaView, Metric, StatsSnapshot, Trend};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const BAR_GAP: u16 = 2;

const CONTROLS: &str = "[r] refresh  [a] auto  [1-4] period  [p] cycle  [q] quit";

pub fn spinner_frame(frame_count: usize) -> char {
    SPINNER_FRAMES[frame_count % SPINNER_FRAMES.len()]
}

/// Render the whole dashboard for one frame
pub fn render_dashboard(frame: &mut Frame, state: &SchedulerState, frame_count: usize) {
    let layout = Layout::vertical([
        Constraint::Length(3), // Header with refresh controls
        Constraint::Min(3),    // Cards and chart, or a status screen
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    render_header(frame, layout[0], state, frame_count);

    match (&state.current, &state.last_error) {
        (Some(snapshot), _) => {
            render_body(frame, layout[1], snapshot, state.delta_view());
        }
        (None, Some(error)) if !state.is_loading() => {
            render_error_screen(frame, layout[1], error);
        }
        (None, _) => render_loading_screen(frame, layout[1], frame_count),
    }

    render_footer(frame, layout[2], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &SchedulerState, frame_count: usize) {
    let auto = if state.auto_refresh_enabled {
        Span::styled(
            format!("Auto-refresh: every {}", state.period),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!("Auto-refresh: off ({})", state.period),
            Style::default().fg(Color::DarkGray),
        )
    };

    let mut spans = vec![auto, Span::raw("  "), Span::raw(CONTROLS)];
    if state.is_loading() {
        spans.push(Span::styled(
            format!("  {}", spinner_frame(frame_count)),
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Hive Stats ")
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_body(frame: &mut Frame, area: Rect, snapshot: &StatsSnapshot, delta: DeltaView) {
    let layout = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);

    let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(layout[0]);
    for (metric, card_area) in Metric::ALL.into_iter().zip(cards.iter()) {
        render_card(frame, *card_area, metric, snapshot, delta.get(metric));
    }

    render_chart(frame, layout[1], snapshot);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    metric: Metric,
    snapshot: &StatsSnapshot,
    change: f64,
) {
    let change_color = match Trend::of(change) {
        Trend::Up => Color::Green,
        Trend::Down => Color::Red,
        Trend::Flat => Color::DarkGray,
    };

    let lines = vec![
        Line::from(Span::styled(
            format_metric(metric, snapshot.value(metric)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_change(change),
            Style::default().fg(change_color),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", metric.title()))
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(frame: &mut Frame, area: Rect, snapshot: &StatsSnapshot) {
    let bars: Vec<Bar> = Metric::ALL
        .into_iter()
        .map(|metric| {
            let value = chart_value(metric, snapshot);
            Bar::default()
                .value(value)
                .label(Line::from(metric.title()))
                .text_value(format_count(value))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(BAR_GAP * 3) / 4).max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Metrics ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(Color::Cyan));

    frame.render_widget(chart, area);
}

/// Bar height for a metric; the average is rounded to a whole number
pub fn chart_value(metric: Metric, snapshot: &StatsSnapshot) -> u64 {
    match metric {
        Metric::AverageTransactions => snapshot.average_transactions.round() as u64,
        _ => snapshot.value(metric) as u64,
    }
}

fn render_loading_screen(frame: &mut Frame, area: Rect, frame_count: usize) {
    let text = format!("{} Loading ledger stats...", spinner_frame(frame_count));
    let content = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(content, centered_rect(area, 40, 3));
}

fn render_error_screen(frame: &mut Frame, area: Rect, error: &StatsError) {
    let lines = vec![
        Line::from(Span::styled(
            "Could not load ledger stats",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(content, centered_rect(area, 60, 9));
}

fn render_footer(frame: &mut Frame, area: Rect, state: &SchedulerState) {
    let mut spans = Vec::new();

    if let Some(snapshot) = &state.current {
        spans.push(Span::raw(format!(
            "Last updated: {}",
            snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )));
    }

    // Shown only alongside data; without data the error screen covers it
    if let (Some(_), Some(error)) = (&state.current, &state.last_error) {
        spans.push(Span::styled(
            format!("  Last poll failed: {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Rect of at most `width` x `height` centered within `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
