use crate::app::App;
use crate::capacity;
use crate::models::pool::{drive_roles, Drive, DriveRole};
use crate::ui::footer::render_chrome;
use crate::ui::theme::Theme;
use crate::util::human::fmt_tb;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const LEGEND: [DriveRole; 8] = [
    DriveRole::Data, DriveRole::MirrorPrimary, DriveRole::MirrorCopy, DriveRole::Parity,
    DriveRole::DistributedParity, DriveRole::Spare, DriveRole::Slog, DriveRole::L2arc,
];

fn cell<'a>(drive: &Drive, role: DriveRole, theme: &Theme) -> Span<'a> {
    Span::styled(format!("[{:^7}|{:>7}]", role.label(), drive.label()), theme.role_style(role))
}

/// Cells for a row of drives, wrapped to fit `width` columns.
fn cell_rows<'a>(cells: Vec<Span<'a>>, width: usize) -> Vec<Line<'a>> {
    let per_row = (width.saturating_sub(4) / 18).max(1);
    let mut out = Vec::new();
    let mut it = cells.into_iter().peekable();
    while it.peek().is_some() {
        let mut spans = vec![Span::raw("    ")];
        for c in it.by_ref().take(per_row) {
            spans.push(c);
            spans.push(Span::raw(" "));
        }
        out.push(Line::from(spans));
    }
    out
}

pub fn render(f: &mut Frame, app: &mut App) {
    let body  = render_chrome(f, app);
    let theme = &app.theme;
    let pool  = &app.pool;
    let d     = app.config.general.decimals;
    let width = body.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();

    let mut legend = vec![Span::styled(" Legend: ", theme.text_dim)];
    for role in LEGEND {
        legend.push(Span::styled(format!("\u{25a0} {}  ", role.label()), theme.role_style(role)));
    }
    lines.push(Line::from(legend));
    lines.push(Line::from(""));

    for (i, v) in pool.vdevs.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" vdev {}: {}", i + 1, v.kind.keyword()), theme.title),
            Span::styled(
                format!("   raw {}  usable {}", fmt_tb(capacity::raw_capacity(v), d), fmt_tb(capacity::group_capacity(v), d)),
                theme.text_dim,
            ),
        ]));
        let cells = v.drives.iter().zip(drive_roles(v))
            .map(|(drive, role)| cell(drive, role, theme))
            .collect();
        lines.extend(cell_rows(cells, width));
        lines.push(Line::from(""));
    }

    if !pool.spares.is_empty() {
        lines.push(Line::from(Span::styled(" spares", theme.title)));
        let cells = pool.spares.iter().map(|s| cell(s, DriveRole::Spare, theme)).collect();
        lines.extend(cell_rows(cells, width));
        lines.push(Line::from(""));
    }

    if let Some(slog) = &pool.slog {
        lines.push(Line::from(Span::styled(
            if pool.slog_mirrored { " log (mirrored)" } else { " log" },
            theme.title,
        )));
        let count = if pool.slog_mirrored { 2 } else { 1 };
        let cells = (0..count).map(|_| cell(slog, DriveRole::Slog, theme)).collect();
        lines.extend(cell_rows(cells, width));
        lines.push(Line::from(""));
    }

    if let Some(l2arc) = &pool.l2arc {
        lines.push(Line::from(Span::styled(" cache", theme.title)));
        lines.extend(cell_rows(vec![cell(l2arc, DriveRole::L2arc, theme)], width));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        " Parity is drawn on the last drives of each group; raidz and draid spread it over every member.",
        theme.text_dim,
    )));

    let max_scroll = lines.len().saturating_sub(1);
    app.map_scroll = app.map_scroll.min(max_scroll);

    let para = Paragraph::new(lines)
        .scroll((app.map_scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused)
            .title(Span::styled(format!(" Pool map: {} ", pool.name), theme.title)));
    f.render_widget(para, body);
}
