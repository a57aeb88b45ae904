use crate::app::App;
use crate::ui::footer::render_chrome;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let body  = render_chrome(f, app);
    let theme = app.theme.clone();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body);

    let results = app.ref_results();

    let search = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", theme.text_dim),
        Span::styled(if app.ref_term.is_empty() { "(all)".to_string() } else { app.ref_term.clone() }, theme.text),
        Span::styled("    Category: ", theme.text_dim),
        Span::styled(app.ref_category.label(), theme.title),
        Span::styled(format!("    {} matches", results.len()), theme.text_dim),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(theme.border));
    f.render_widget(search, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    let items: Vec<ListItem> = results.iter()
        .map(|e| ListItem::new(Line::from(Span::styled(e.command, theme.text))))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused)
            .title(Span::styled(" Commands ", theme.title)))
        .highlight_style(theme.selected)
        .highlight_symbol("\u{25b6} ");
    f.render_stateful_widget(list, cols[0], &mut app.ref_state);

    let lines: Vec<Line> = match app.selected_entry() {
        None => vec![Line::from(Span::styled("No commands match.", theme.text_dim))],
        Some(e) => {
            let mut lines = vec![
                Line::from(Span::styled(e.command, theme.title)),
                Line::from(Span::styled(e.syntax, theme.footer_key)),
                Line::from(""),
                Line::from(Span::styled(e.description, theme.text)),
                Line::from(""),
                Line::from(Span::styled("Manual", theme.title)),
                Line::from(Span::styled(e.manpage, theme.text_dim)),
                Line::from(""),
                Line::from(Span::styled("Examples", theme.title)),
            ];
            for ex in e.examples {
                lines.push(Line::from(Span::styled(format!("  $ {}", ex.cmd), theme.data)));
                lines.push(Line::from(Span::styled(format!("    {}", ex.desc), theme.text_dim)));
            }
            lines
        }
    };
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled(" Details ", theme.title)));
    f.render_widget(para, cols[1]);
}
