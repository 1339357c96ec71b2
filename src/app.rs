use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{KeybindsConfig, parse_key};
use crate::system::snapshot::Snapshot;

/// Which layout the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Summary line plus the ranked process table.
    Table,
    /// System gauges, disks, networks and the process table.
    #[default]
    Panels,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Table => View::Panels,
            View::Panels => View::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Table => "profile",
            View::Panels => "scan",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "profile" | "table" => View::Table,
            _ => View::Panels,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub toggle_view: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            toggle_view: parse_key(&kb.toggle_view).unwrap_or(KeyCode::Tab),
        }
    }

    pub fn quit_label(&self) -> String {
        key_label(self.quit)
    }

    pub fn toggle_view_label(&self) -> String {
        key_label(self.toggle_view)
    }
}

impl Default for ResolvedKeybinds {
    fn default() -> Self {
        Self::from_config(&KeybindsConfig::default())
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub view: View,
    /// Latest snapshot; `None` until the first tick lands.
    pub snapshot: Option<Snapshot>,
    pub selected_index: usize,
    pub refresh_rate_ms: u64,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(view: View, refresh_rate_ms: u64, keybinds: ResolvedKeybinds) -> Self {
        App {
            running: true,
            view,
            snapshot: None,
            selected_index: 0,
            refresh_rate_ms,
            keybinds,
        }
    }

    pub fn on_snapshot(&mut self, snapshot: Snapshot) {
        let rows = snapshot.processes.len();
        self.selected_index = self.selected_index.min(rows.saturating_sub(1));
        self.snapshot = Some(snapshot);
    }

    pub fn process_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.processes.len())
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        let kb = &self.keybinds;
        match key.code {
            c if c == kb.quit => Action::Quit,
            c if c == kb.toggle_view => Action::ToggleView,
            KeyCode::Up => Action::Navigate(Direction::Up),
            KeyCode::Down => Action::Navigate(Direction::Down),
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleView => self.view = self.view.next(),
            Action::Navigate(direction) => self.navigate(direction),
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let rows = self.process_count();
        if rows == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(rows - 1),
        };
    }
}
