use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const DISCLAIMER: &str =
    "Estimates only: real usable space depends on metadata, padding and compression. \
     Check device paths before running any command.";

/// Draw the header, disclaimer and footer shared by every tab; returns the body area.
pub fn render_chrome(f: &mut Frame, app: &App) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, root[0], app);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", DISCLAIMER), app.theme.text_dim))),
        root[2],
    );
    render_footer(f, root[3], app);
    root[1]
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(format!(" zplan: {} ", app.pool.name), theme.title)];
    for tab in Tab::ALL {
        let style = if tab == app.tab { theme.selected } else { theme.header };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::styled(" ", theme.header));
    }
    spans.push(Span::styled(format!("  {} ", app.theme_variant.name()), theme.header));
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.header), area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    // Line editor takes over the footer
    if let Some(input) = &app.input {
        let line = Line::from(vec![
            Span::styled(format!(" {}: ", input.target.prompt()), theme.footer_key),
            Span::styled(format!("{}\u{2588}", input.buffer), theme.footer_bg),
            Span::styled("   Enter save  Esc cancel", theme.footer_text),
        ]);
        f.render_widget(Paragraph::new(line).style(theme.footer_bg), area);
        return;
    }

    let base: &[(&str, &str)] = match app.tab {
        Tab::Designer => &[
            ("q", "Quit"), ("Tab", "Tabs"), ("\u{2191}\u{2193}", "Select"), ("\u{2190}\u{2192}", "Adjust"),
            ("a/A", "Add/Vdev"), ("d", "Remove"), ("e", "Edit"), ("u", "Unit"),
            ("s", "SLOG"), ("c", "L2ARC"), ("y", "Copy"),
        ],
        Tab::PoolMap => &[
            ("q", "Quit"), ("Tab", "Tabs"), ("\u{2191}\u{2193}", "Scroll"), ("y", "Copy"),
        ],
        Tab::Tools => &[
            ("q", "Quit"), ("Tab", "Tabs"), ("\u{2191}\u{2193}", "Field"), ("\u{2190}\u{2192}", "Change"),
            ("e", "Edit"), ("d", "Clear"), ("y", "Copy"),
        ],
        Tab::Reference => &[
            ("q", "Quit"), ("Tab", "Tabs"), ("/", "Search"), ("\u{2190}\u{2192}", "Category"),
            ("Esc", "Clear"), ("y", "Copy syntax"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in base {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }
    spans.push(Span::styled(" t ", theme.footer_key));
    spans.push(Span::styled("Theme  ", theme.footer_text));
    spans.push(Span::styled(" ? ", theme.footer_key));
    spans.push(Span::styled("Help  ", theme.footer_text));

    if let Some(msg) = app.status_text() {
        spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
        spans.push(Span::styled(msg.to_string(), theme.footer_key));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
