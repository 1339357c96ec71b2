use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, View};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: View,
    keybinds: &ResolvedKeybinds,
    refresh_rate_ms: u64,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);
    let quit = keybinds.quit_label();
    let toggle = keybinds.toggle_view_label();
    let other = view.next().label();
    let refresh = format!("{:.1}s", refresh_rate_ms as f64 / 1000.0);

    let mut spans = Vec::new();
    spans.extend(pill_spans(&quit, "Quit", theme));
    spans.extend(pill_spans(&toggle, other, theme));
    spans.extend(pill_spans("\u{2191}\u{2193}", "Select", theme));
    spans.push(Span::styled(
        format!("  {} every {refresh}", view.label()),
        Style::default().fg(theme.text_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg),
        ),
    ]
}
