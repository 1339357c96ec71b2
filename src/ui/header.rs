use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_gb, format_percent};
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

/// Title plus a one-line CPU and memory summary.
pub fn render_summary(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    quit_key: &str,
    theme: &Theme,
) {
    let title = Line::from(Span::styled(
        format!("  System Monitor (press {quit_key} to quit)"),
        Style::default()
            .fg(theme.title_fg)
            .add_modifier(Modifier::BOLD),
    ));
    let stats = Line::from(Span::styled(
        format!(
            "  CPU Usage: {} | Memory Usage: {} of {}",
            format_percent(snapshot.cpu_percent as f64),
            format_percent(snapshot.memory.used_percent),
            format_gb(snapshot.memory.total_bytes),
        ),
        Style::default().fg(theme.stats_fg),
    ));
    frame.render_widget(Paragraph::new(vec![title, stats]), area);
}

/// CPU and memory gauges side by side.
pub fn render_gauges(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let cpu = snapshot.cpu_percent as f64;
    render_gauge(
        frame,
        chunks[0],
        " CPU ",
        cpu,
        format_percent(cpu),
        theme,
    );

    let mem = snapshot.memory.used_percent;
    render_gauge(
        frame,
        chunks[1],
        " Memory ",
        mem,
        format!("{} of {}", format_percent(mem), format_gb(snapshot.memory.total_bytes)),
        theme,
    );
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    percent: f64,
    label: String,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ));

    let ratio = if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.heat(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}
