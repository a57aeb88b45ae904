use crate::app::{App, ToolField};
use crate::commands::{dataset, snapshot};
use crate::ui::footer::render_chrome;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

/// Display value of each field.
fn field_value(app: &App, field: ToolField) -> String {
    let ds = &app.dataset;
    let snap = &app.snapshot;
    let or_none = |s: &str, none: &str| if s.is_empty() { none.to_string() } else { s.to_string() };
    match field {
        ToolField::DsName           => or_none(&ds.name, "(required)"),
        ToolField::DsMountpoint     => or_none(&ds.mountpoint, "(inherit)"),
        ToolField::DsCompression    => format!("{}  ({})", ds.compression.algorithm.name(), ds.compression.algorithm.hint()),
        ToolField::DsLevel          => {
            if ds.compression.algorithm.levels().is_empty() {
                "n/a".to_string()
            } else {
                ds.compression.level.clone().unwrap_or_else(|| "default".to_string())
            }
        }
        ToolField::DsRecordsize     => ds.recordsize.to_string(),
        ToolField::DsPrimaryCache   => ds.primary_cache.to_string(),
        ToolField::DsSecondaryCache => ds.secondary_cache.to_string(),
        ToolField::DsAtime          => on_off(ds.atime).to_string(),
        ToolField::DsExec           => on_off(ds.exec).to_string(),
        ToolField::DsQuota          => ds.quota.as_ref().map(|q| q.value()).unwrap_or_else(|| "none".to_string()),
        ToolField::DsReservation    => ds.reservation.as_ref().map(|r| r.value()).unwrap_or_else(|| "none".to_string()),
        ToolField::DsProperty       => {
            if ds.custom_properties.is_empty() {
                "(none, e to add name=value)".to_string()
            } else {
                ds.custom_properties.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join(" ")
            }
        }
        ToolField::SnapPath         => or_none(&snap.dataset_path, "(pool root)"),
        ToolField::SnapRecursive    => on_off(snap.recursive).to_string(),
        ToolField::SnapName         => or_none(&snap.custom_name, "(timestamp)"),
        ToolField::SnapSchedule     => snap.schedule.as_ref().map(|s| format!("every {}", s.interval)).unwrap_or_else(|| "off".to_string()),
        ToolField::SnapRetain       => snap.schedule.as_ref().map(|s| s.retain.to_string()).unwrap_or_else(|| "-".to_string()),
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    let body  = render_chrome(f, app);
    let theme = app.theme.clone();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(body);

    let mut items: Vec<ListItem> = Vec::new();
    for field in ToolField::ALL {
        let section = match field {
            ToolField::DsName   => Some("Dataset"),
            ToolField::SnapPath => Some("Snapshot"),
            _ => None,
        };
        let marker = match section {
            Some(s) => Span::styled(format!("{:<9}", s), theme.title),
            None    => Span::raw("         "),
        };
        items.push(ListItem::new(Line::from(vec![
            marker,
            Span::styled(format!("{:<16}", field.label()), theme.text_dim),
            Span::styled(field_value(app, field), theme.text),
        ])));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused)
            .title(Span::styled(" Builders ", theme.title)))
        .highlight_style(theme.selected)
        .highlight_symbol("\u{25b6} ");
    f.render_stateful_widget(list, cols[0], &mut app.tool_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(cols[1]);

    let pool_name = app.pool.name.clone();
    let (title, preview, explanation) = if app.selected_field().is_snapshot() {
        let script = snapshot::script(&pool_name, &app.snapshot, chrono::Utc::now());
        (" zfs snapshot ", script, snapshot::explain(&pool_name, &app.snapshot))
    } else {
        (" zfs create ", dataset::create_command(&pool_name, &app.dataset), Vec::new())
    };

    let preview = Paragraph::new(preview)
        .style(theme.text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled(title, theme.title)));
    f.render_widget(preview, right[0]);

    let mut lines: Vec<Line> = Vec::new();
    if explanation.is_empty() {
        let field = app.selected_field();
        lines.push(Line::from(Span::styled(field.label(), theme.title)));
        lines.push(Line::from(Span::styled(
            if field.is_text() { "e to edit, d to clear" } else { "\u{2190}\u{2192} to change" },
            theme.text_dim,
        )));
    } else {
        for (token, text) in explanation {
            lines.push(Line::from(Span::styled(token, theme.footer_key)));
            lines.push(Line::from(Span::styled(format!("  {}", text), theme.text_dim)));
        }
    }
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled(" Explanation ", theme.title)));
    f.render_widget(para, right[1]);
}
