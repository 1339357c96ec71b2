pub mod header;
pub mod statusbar;
pub mod tables;
pub mod theme;

use color_eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, View};
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

/// Consumer of finished snapshots. Owns everything about presentation; the
/// sampling side never sees how a snapshot is shown.
pub trait Renderer {
    fn render(&mut self, snapshot: Snapshot) -> Result<()>;
}

/// Interactive ratatui dashboard.
pub struct TerminalRenderer {
    terminal: ratatui::DefaultTerminal,
    pub app: App,
    theme: Theme,
}

impl TerminalRenderer {
    pub fn new(terminal: ratatui::DefaultTerminal, app: App) -> Self {
        Self {
            terminal,
            app,
            theme: Theme::default(),
        }
    }

    pub fn redraw(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| draw(frame, &self.app, &self.theme))?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: Snapshot) -> Result<()> {
        self.app.on_snapshot(snapshot);
        self.redraw()
    }
}

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let body = chunks[0];
    match &app.snapshot {
        None => render_message(
            frame,
            body,
            "Collecting first sample\u{2026}",
            theme.text_secondary,
        ),
        Some(snapshot) => match &snapshot.error {
            Some(err) => {
                render_message(frame, body, &format!("Error: {err}"), theme.error_fg)
            }
            None => match app.view {
                View::Table => draw_table_view(frame, body, snapshot, app, theme),
                View::Panels => draw_panel_view(frame, body, snapshot, app, theme),
            },
        },
    }

    statusbar::render(
        frame,
        chunks[1],
        app.view,
        &app.keybinds,
        app.refresh_rate_ms,
        theme,
    );
}

fn draw_table_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    app: &App,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    header::render_summary(
        frame,
        chunks[0],
        snapshot,
        &app.keybinds.quit_label(),
        theme,
    );
    tables::render_processes(
        frame,
        chunks[1],
        &snapshot.processes,
        View::Table,
        app.selected_index,
        theme,
    );
}

fn draw_panel_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    app: &App,
    theme: &Theme,
) {
    // Header row plus two border rows, capped so processes keep most of the screen.
    let io_rows = snapshot.disks.len().max(snapshot.networks.len()).clamp(1, 6) as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(io_rows),
            Constraint::Min(3),
        ])
        .split(area);

    header::render_gauges(frame, chunks[0], snapshot, theme);

    let io = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    tables::render_disks(frame, io[0], &snapshot.disks, theme);
    tables::render_networks(frame, io[1], &snapshot.networks, theme);

    tables::render_processes(
        frame,
        chunks[2],
        &snapshot.processes,
        View::Panels,
        app.selected_index,
        theme,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    let line = Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(vec![Line::default(), line]), area);
}
