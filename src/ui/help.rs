use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(84, 30, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" zplan: Keybindings (? or Esc to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Split into two columns
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        key_line(theme, "Global", ""),
        key_line(theme, "  q / Ctrl-C",      "Quit"),
        key_line(theme, "  Tab / Shift-Tab", "Next / previous tab"),
        key_line(theme, "  ↑↓ / j k",        "Select row"),
        key_line(theme, "  g / G",           "Jump first / last"),
        key_line(theme, "  y",               "Copy command for this tab"),
        key_line(theme, "  t",               "Cycle color theme"),
        key_line(theme, "  ? / F1",          "Toggle this help"),
        Line::from(""),
        key_line(theme, "Designer", ""),
        key_line(theme, "  ←→ / h l",        "Change type / size / ashift"),
        key_line(theme, "  a",               "Add drive, spare or vdev"),
        key_line(theme, "  A",               "Append a vdev"),
        key_line(theme, "  d / Del",         "Remove selected item"),
        key_line(theme, "  e / Enter",       "Rename pool / type a size"),
        key_line(theme, "  u",               "Toggle TB / GB"),
        key_line(theme, "  m",               "Toggle uniform sizing"),
        key_line(theme, "  s / c",           "Toggle SLOG / L2ARC"),
    ];

    let right = vec![
        key_line(theme, "Tools", ""),
        key_line(theme, "  ←→",              "Cycle option"),
        key_line(theme, "  e / Enter",       "Edit text field"),
        key_line(theme, "  d",               "Clear quota / property / schedule"),
        Line::from(""),
        key_line(theme, "Reference", ""),
        key_line(theme, "  / or e",          "Search commands"),
        key_line(theme, "  ←→",              "Cycle category"),
        key_line(theme, "  Esc",             "Clear search"),
        Line::from(""),
        key_line(theme, "Line editor", ""),
        key_line(theme, "  Enter / Esc",     "Save / cancel"),
        Line::from(""),
        key_line(theme, "CLI modes", ""),
        key_line(theme, "  --plan FILE",     "Start from a TOML/JSON plan"),
        key_line(theme, "  --json",          "Plan summary as JSON"),
        key_line(theme, "  --report",        "Human-readable plan report"),
        key_line(theme, "  --command",       "Print zpool create only"),
        key_line(theme, "  --reference [T]", "Search command reference"),
        key_line(theme, "  --config",        "Print config values"),
        key_line(theme, "  --completions",   "Shell completion script"),
        Line::from(""),
        key_line(theme, "Config  ~/.config/zplan/zplan.toml", ""),
        key_line(theme, "Log     ~/.local/share/zplan/zplan.log", ""),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        // Section header
        Line::from(vec![
            Span::styled(key, theme.title),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<20}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

/// A centered Rect of `width` x `height` cells, capped at the available area.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
