use crate::app::{designer_rows, App, Row};
use crate::capacity;
use crate::models::pool::drive_roles;
use crate::ui::footer::render_chrome;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_pct, fmt_tb, plural};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let body  = render_chrome(f, app);
    let theme = app.theme.clone();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(body);

    render_tree(f, cols[0], app, &theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4), Constraint::Length(12)])
        .split(cols[1]);

    render_summary(f, right[0], app, &theme);
    render_advisories(f, right[1], app, &theme);
    render_command(f, right[2], app, &theme);
}

fn row_line<'a>(app: &App, row: Row, theme: &Theme) -> Line<'a> {
    let pool = &app.pool;
    let d = app.config.general.decimals;
    match row {
        Row::Name => Line::from(vec![
            Span::styled("Pool name    ", theme.text_dim),
            Span::styled(pool.name.clone(), theme.title),
        ]),
        Row::Ashift => Line::from(vec![
            Span::styled("Sector size  ", theme.text_dim),
            Span::styled(format!("{} B (ashift={})", 1u64 << pool.ashift.min(63), pool.ashift), theme.text),
        ]),
        Row::Vdev(i) => {
            let v = &pool.vdevs[i];
            let invalid = app.validation.iter().any(|(idx, _)| *idx == i);
            Line::from(vec![
                Span::styled(format!("\u{25be} vdev {}  ", i + 1), theme.title),
                Span::styled(v.kind.label(), if invalid { theme.crit } else { theme.text }),
                Span::styled(
                    format!("  {}  {}{}", plural(v.drives.len(), "drive"),
                        fmt_tb(capacity::group_capacity(v), d),
                        if v.uniform { "" } else { "  (mixed sizes)" }),
                    theme.text_dim,
                ),
            ])
        }
        Row::Drive(i, j) => {
            let v = &pool.vdevs[i];
            let role = drive_roles(v).get(j).copied();
            let mut spans = vec![
                Span::styled(format!("   \u{251c} drive {:<3}", j + 1), theme.text_dim),
                Span::styled(format!("{:>8}  ", v.drives[j].label()), theme.text),
            ];
            if let Some(r) = role {
                spans.push(Span::styled(r.label(), theme.role_style(r)));
            }
            Line::from(spans)
        }
        Row::Spares => Line::from(vec![
            Span::styled("Hot spares   ", theme.text_dim),
            Span::styled(pool.spares.len().to_string(), theme.spare),
        ]),
        Row::Spare(k) => Line::from(vec![
            Span::styled(format!("   \u{251c} spare {:<3}", k + 1), theme.text_dim),
            Span::styled(format!("{:>8}", pool.spares[k].label()), theme.spare),
        ]),
        Row::Slog => Line::from(vec![
            Span::styled("SLOG         ", theme.text_dim),
            match pool.slog {
                Some(s) => Span::styled(s.label(), theme.log),
                None    => Span::styled("off", theme.text_dim),
            },
        ]),
        Row::SlogMirror => Line::from(vec![
            Span::styled("   \u{2514} mirrored ", theme.text_dim),
            Span::styled(if pool.slog_mirrored { "yes" } else { "no" }, theme.log),
        ]),
        Row::L2arc => Line::from(vec![
            Span::styled("L2ARC        ", theme.text_dim),
            match pool.l2arc {
                Some(c) => Span::styled(c.label(), theme.cache),
                None    => Span::styled("off", theme.text_dim),
            },
        ]),
    }
}

fn render_tree(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let items: Vec<ListItem> = designer_rows(&app.pool).into_iter()
        .map(|row| ListItem::new(row_line(app, row, theme)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused)
            .title(Span::styled(" Pool layout ", theme.title)))
        .highlight_style(theme.selected)
        .highlight_symbol("\u{25b6} ");

    f.render_stateful_widget(list, area, &mut app.designer_state);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let r = &app.result;
    let d = app.config.general.decimals;
    let block = Block::default().borders(Borders::ALL).border_style(theme.border)
        .title(Span::styled(" Capacity ", theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1)])
        .split(inner);

    let lines = vec![
        Line::from(vec![Span::styled("Raw         ", theme.text_dim), Span::styled(fmt_tb(r.total_raw, d), theme.text)]),
        Line::from(vec![Span::styled("Usable      ", theme.text_dim), Span::styled(fmt_tb(r.usable_space, d), theme.title)]),
        Line::from(vec![Span::styled("Protection  ", theme.text_dim), Span::styled(r.protection.clone(), theme.text)]),
        Line::from(vec![Span::styled("Drives      ", theme.text_dim), Span::styled(app.pool.drive_count().to_string(), theme.text)]),
    ];
    f.render_widget(Paragraph::new(lines), rows[0]);

    let ratio = if r.efficiency.is_nan() { 0.0 } else { (r.efficiency / 100.0).clamp(0.0, 1.0) };
    let gauge = Gauge::default()
        .gauge_style(theme.efficiency_style(r.efficiency))
        .ratio(ratio)
        .label(format!("efficiency {}", fmt_pct(r.efficiency)));
    f.render_widget(gauge, rows[1]);
}

fn render_advisories(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();
    for (idx, msg) in &app.validation {
        lines.push(Line::from(vec![
            Span::styled(format!("[vdev {}] ", idx + 1), theme.crit),
            Span::styled(msg.clone(), theme.text),
        ]));
    }
    for a in &app.advisories {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", a.severity.label()), theme.severity_style(a.severity)),
            Span::styled(a.message, theme.text),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("\u{25cf} No advisories", theme.ok)));
    }

    let count = app.validation.len() + app.advisories.len();
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled(format!(" Advisories ({}) ", count), theme.title)));
    f.render_widget(para, area);
}

fn render_command(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let lines: Vec<Line> = app.command.lines()
        .map(|l| Line::from(Span::styled(l.to_string(), theme.text)))
        .collect();
    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled(" zpool create (y to copy) ", theme.title)));
    f.render_widget(para, area);
}
