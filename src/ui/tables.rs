use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::app::View;
use crate::format::{format_bytes, format_rate, truncate_unicode};
use crate::system::snapshot::{DiskSample, NetworkRate, ProcessSample};
use crate::ui::theme::Theme;

const NAME_WIDTH: u16 = 30;

fn panel_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.header_fg)
                .add_modifier(Modifier::BOLD),
        ))
}

fn header_row<'a>(titles: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(titles.iter().map(|t| Cell::from(*t))).style(
        Style::default()
            .fg(theme.header_fg)
            .add_modifier(Modifier::BOLD),
    )
}

/// Ranked process table. The single-table view shows name, CPU and IO; the
/// panel view adds the PID column.
pub fn render_processes(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessSample],
    view: View,
    selected: usize,
    theme: &Theme,
) {
    let name_width = NAME_WIDTH as usize;
    let (header, widths, rows): (Row, Vec<Constraint>, Vec<Row>) = match view {
        View::Table => (
            header_row(&["Process", "CPU%", "IO"], theme),
            vec![
                Constraint::Length(NAME_WIDTH),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
            processes
                .iter()
                .map(|p| {
                    Row::new(vec![
                        Cell::from(truncate_unicode(&p.name, name_width)),
                        Cell::from(format!("{:.2}%", p.cpu_percent))
                            .style(Style::default().fg(theme.heat(p.cpu_percent as f64))),
                        Cell::from(p.io_priority.to_string()),
                    ])
                })
                .collect(),
        ),
        View::Panels => (
            header_row(&["PID", "Program", "CPU%", "IO"], theme),
            vec![
                Constraint::Length(8),
                Constraint::Length(NAME_WIDTH),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
            processes
                .iter()
                .map(|p| {
                    Row::new(vec![
                        Cell::from(p.pid.to_string()),
                        Cell::from(truncate_unicode(&p.name, name_width)),
                        Cell::from(format!("{:.2}%", p.cpu_percent))
                            .style(Style::default().fg(theme.heat(p.cpu_percent as f64))),
                        Cell::from(p.io_priority.to_string()),
                    ])
                })
                .collect(),
        ),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel_block(" Processes ", theme))
        .style(Style::default().fg(theme.text_primary))
        .row_highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !processes.is_empty() {
        state.select(Some(selected.min(processes.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_disks(frame: &mut Frame, area: Rect, disks: &[DiskSample], theme: &Theme) {
    let rows: Vec<Row> = disks
        .iter()
        .map(|d| {
            Row::new(vec![
                Cell::from(truncate_unicode(&d.mount_name, 20)),
                Cell::from(format_bytes(d.used_bytes)),
                Cell::from(format_bytes(d.total_bytes)),
                Cell::from(format!("{:.1}%", d.used_percent))
                    .style(Style::default().fg(theme.heat(d.used_percent))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(7),
        ],
    )
    .header(header_row(&["Mount", "Used", "Total", "Use%"], theme))
    .block(panel_block(" Disks ", theme))
    .style(Style::default().fg(theme.text_primary));

    frame.render_widget(table, area);
}

pub fn render_networks(frame: &mut Frame, area: Rect, networks: &[NetworkRate], theme: &Theme) {
    let rows: Vec<Row> = networks
        .iter()
        .map(|n| {
            Row::new(vec![
                Cell::from(truncate_unicode(&n.interface_name, 16)),
                Cell::from(format_rate(n.download_bytes_per_sec)),
                Cell::from(format_rate(n.upload_bytes_per_sec)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(8),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header_row(&["Interface", "Down", "Up"], theme))
    .block(panel_block(" Network ", theme))
    .style(Style::default().fg(theme.text_secondary));

    frame.render_widget(table, area);
}
