use crate::advisories::{self, Advisory};
use crate::capacity::{self, CapacityResult};
use crate::commands::dataset::{self, DatasetOptions, SizeLimit, CACHE_MODES, RECORD_SIZES, SIZE_SUFFIXES};
use crate::commands::reference::{self, Category, RefEntry};
use crate::commands::snapshot::{self, Schedule, SnapshotOptions, INTERVALS};
use crate::commands::zpool;
use crate::config::Config;
use crate::input::{handle_edit_key, handle_key, Action, EditAction};
use crate::models::edit;
use crate::models::pool::{ashift_for_sector, Drive, Pool, Unit, DRIVE_SIZES, SECTOR_SIZES};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{designer, help, pool_map, reference_view, tools_view};
use crate::util::clipboard;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

// ── Tabs ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Designer,
    PoolMap,
    Tools,
    Reference,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Designer, Tab::PoolMap, Tab::Tools, Tab::Reference];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Designer  => "Designer",
            Tab::PoolMap   => "Pool map",
            Tab::Tools     => "Tools",
            Tab::Reference => "Reference",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── Designer rows ─────────────────────────────────────────────────────

/// One selectable line of the pool tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Name,
    Ashift,
    Vdev(usize),
    Drive(usize, usize),
    Spares,
    Spare(usize),
    Slog,
    SlogMirror,
    L2arc,
}

pub fn designer_rows(pool: &Pool) -> Vec<Row> {
    let mut rows = vec![Row::Name, Row::Ashift];
    for (i, v) in pool.vdevs.iter().enumerate() {
        rows.push(Row::Vdev(i));
        rows.extend((0..v.drives.len()).map(|j| Row::Drive(i, j)));
    }
    rows.push(Row::Spares);
    rows.extend((0..pool.spares.len()).map(Row::Spare));
    rows.push(Row::Slog);
    if pool.slog.is_some() {
        rows.push(Row::SlogMirror);
    }
    rows.push(Row::L2arc);
    rows
}

// ── Tools fields ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolField {
    DsName,
    DsMountpoint,
    DsCompression,
    DsLevel,
    DsRecordsize,
    DsPrimaryCache,
    DsSecondaryCache,
    DsAtime,
    DsExec,
    DsQuota,
    DsReservation,
    DsProperty,
    SnapPath,
    SnapRecursive,
    SnapName,
    SnapSchedule,
    SnapRetain,
}

impl ToolField {
    pub const ALL: [ToolField; 17] = [
        ToolField::DsName, ToolField::DsMountpoint, ToolField::DsCompression, ToolField::DsLevel,
        ToolField::DsRecordsize, ToolField::DsPrimaryCache, ToolField::DsSecondaryCache,
        ToolField::DsAtime, ToolField::DsExec, ToolField::DsQuota, ToolField::DsReservation,
        ToolField::DsProperty,
        ToolField::SnapPath, ToolField::SnapRecursive, ToolField::SnapName,
        ToolField::SnapSchedule, ToolField::SnapRetain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolField::DsName           => "Dataset name",
            ToolField::DsMountpoint     => "Mountpoint",
            ToolField::DsCompression    => "Compression",
            ToolField::DsLevel          => "Level",
            ToolField::DsRecordsize     => "Record size",
            ToolField::DsPrimaryCache   => "Primary cache",
            ToolField::DsSecondaryCache => "Secondary cache",
            ToolField::DsAtime          => "Access time",
            ToolField::DsExec           => "Exec",
            ToolField::DsQuota          => "Quota",
            ToolField::DsReservation    => "Reservation",
            ToolField::DsProperty       => "Custom property",
            ToolField::SnapPath         => "Dataset path",
            ToolField::SnapRecursive    => "Recursive",
            ToolField::SnapName         => "Snapshot name",
            ToolField::SnapSchedule     => "Schedule",
            ToolField::SnapRetain       => "Retain",
        }
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self,
            ToolField::SnapPath | ToolField::SnapRecursive | ToolField::SnapName
            | ToolField::SnapSchedule | ToolField::SnapRetain)
    }

    /// Free-text fields open the line editor; the rest cycle with ←→.
    pub fn is_text(&self) -> bool {
        matches!(self,
            ToolField::DsName | ToolField::DsMountpoint | ToolField::DsQuota
            | ToolField::DsReservation | ToolField::DsProperty
            | ToolField::SnapPath | ToolField::SnapName | ToolField::SnapRetain)
    }
}

// ── Text input ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    PoolName,
    DriveSize(usize, usize),
    SpareSize(usize),
    SlogSize,
    L2arcSize,
    Tool(ToolField),
    Search,
}

impl EditTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            EditTarget::PoolName        => "Pool name",
            EditTarget::DriveSize(_, _) => "Drive size",
            EditTarget::SpareSize(_)    => "Spare size",
            EditTarget::SlogSize        => "SLOG size",
            EditTarget::L2arcSize       => "L2ARC size",
            EditTarget::Tool(f)         => f.label(),
            EditTarget::Search          => "Search",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub target: EditTarget,
    pub buffer: String,
}

/// Sizes offered by ←→ for GB devices.
const GB_SIZES: [f64; 10] = [8.0, 16.0, 32.0, 64.0, 128.0, 256.0, 512.0, 1000.0, 2000.0, 4000.0];

const POLL_TIMEOUT: Duration = Duration::from_millis(250);
const FLASH_FOR:    Duration = Duration::from_secs(2);

/// Next table entry above (`dir > 0`) or below the current size, clamped at the ends.
fn step_size(current: f64, unit: Unit, dir: i32) -> f64 {
    let table: &[f64] = if unit == Unit::Gb { &GB_SIZES } else { &DRIVE_SIZES };
    let (first, last) = (table[0], table[table.len() - 1]);
    if dir > 0 {
        table.iter().copied().find(|s| *s > current).unwrap_or(last)
    } else {
        table.iter().rev().copied().find(|s| *s < current).unwrap_or(first)
    }
}

fn cycle(options: &[&'static str], current: &str, dir: i32) -> &'static str {
    let n = options.len() as i32;
    let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
    options[(idx + dir).rem_euclid(n) as usize]
}

fn parse_size(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    pub config: Config,

    // Theme
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    pub tab:       Tab,
    pub show_help: bool,

    // Pool under design and everything derived from it
    pub pool:       Pool,
    pub result:     CapacityResult,
    pub command:    String,
    pub advisories: Vec<Advisory>,
    pub validation: Vec<(usize, String)>,

    // Designer / pool map
    pub designer_state: ListState,
    pub map_scroll:     usize,

    // Tools
    pub tool_state: ListState,
    pub dataset:    DatasetOptions,
    pub snapshot:   SnapshotOptions,

    // Reference
    pub ref_term:     String,
    pub ref_category: Category,
    pub ref_state:    ListState,

    pub input:  Option<TextInput>,
    status:     Option<(String, Instant)>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, pool: Pool, initial_theme: ThemeVariant) -> Self {
        let mut app = Self {
            config,
            theme:          Theme::for_variant(initial_theme),
            theme_variant:  initial_theme,
            tab:            Tab::Designer,
            show_help:      false,
            result:         capacity::pool_capacity(&pool),
            command:        String::new(),
            advisories:     Vec::new(),
            validation:     Vec::new(),
            pool,
            designer_state: ListState::default(),
            map_scroll:     0,
            tool_state:     ListState::default(),
            dataset:        DatasetOptions::default(),
            snapshot:       SnapshotOptions::default(),
            ref_term:       String::new(),
            ref_category:   Category::All,
            ref_state:      ListState::default(),
            input:          None,
            status:         None,
            should_quit:    false,
        };
        app.designer_state.select(Some(0));
        app.tool_state.select(Some(0));
        app.ref_state.select(Some(0));
        app.recompute();
        app
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            let theme_snap = self.theme.clone();
            let show_help  = self.show_help;

            terminal.draw(|f| {
                match self.tab {
                    Tab::Designer  => designer::render(f, self),
                    Tab::PoolMap   => pool_map::render(f, self),
                    Tab::Tools     => tools_view::render(f, self),
                    Tab::Reference => reference_view::render(f, self),
                }
                if show_help {
                    help::render(f, &theme_snap);
                }
            })?;

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if self.input.is_some() {
                            self.handle_edit(handle_edit_key(key));
                        } else {
                            self.handle_action(handle_key(key));
                        }
                    }
                }
            }

            if self.should_quit { break; }
        }
        Ok(())
    }

    // ── Derived state ─────────────────────────────────────────────────

    /// Re-derive capacity, command and advisories after any pool edit.
    fn recompute(&mut self) {
        self.result     = capacity::pool_capacity(&self.pool);
        self.command    = zpool::create_command(&self.pool);
        self.advisories = advisories::evaluate(&self.pool);
        self.validation = advisories::validate(&self.pool);

        let rows = designer_rows(&self.pool).len();
        let sel = self.designer_state.selected().unwrap_or(0).min(rows.saturating_sub(1));
        self.designer_state.select(Some(sel));

        tracing::debug!(
            vdevs      = self.pool.vdevs.len(),
            drives     = self.pool.drive_count(),
            raw_tb     = self.result.total_raw,
            usable_tb  = self.result.usable_space,
            advisories = self.advisories.len(),
            "recomputed plan"
        );
    }

    fn apply(&mut self, pool: Pool) {
        self.pool = pool;
        self.recompute();
    }

    pub fn selected_row(&self) -> Row {
        let rows = designer_rows(&self.pool);
        let idx = self.designer_state.selected().unwrap_or(0);
        rows.get(idx).copied().unwrap_or(Row::Name)
    }

    fn select_row(&mut self, row: Row) {
        if let Some(idx) = designer_rows(&self.pool).iter().position(|r| *r == row) {
            self.designer_state.select(Some(idx));
        }
    }

    pub fn selected_field(&self) -> ToolField {
        let idx = self.tool_state.selected().unwrap_or(0);
        ToolField::ALL.get(idx).copied().unwrap_or(ToolField::DsName)
    }

    pub fn ref_results(&self) -> Vec<&'static RefEntry> {
        reference::search(&self.ref_term, self.ref_category)
    }

    pub fn selected_entry(&self) -> Option<&'static RefEntry> {
        let results = self.ref_results();
        results.get(self.ref_state.selected().unwrap_or(0)).copied()
    }

    // ── Status flash ──────────────────────────────────────────────────

    fn flash(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref()
            .filter(|(_, at)| at.elapsed() < FLASH_FOR)
            .map(|(m, _)| m.as_str())
    }

    // ── Input dispatch ────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        if self.show_help {
            match action {
                Action::Quit     => self.should_quit = true,
                Action::ShowHelp | Action::Back => { self.show_help = false; }
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit     => self.should_quit = true,
            Action::ShowHelp => { self.show_help = true; }
            Action::NextTab  => { self.tab = self.tab.next(); }
            Action::PrevTab  => { self.tab = self.tab.prev(); }

            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }

            Action::SelectUp   => self.select_delta(-1),
            Action::SelectDown => self.select_delta(1),
            Action::JumpTop    => self.select_delta(i32::MIN / 2),
            Action::JumpBottom => self.select_delta(i32::MAX / 2),

            Action::Copy => self.copy(),

            Action::Back => {
                if self.tab == Tab::Reference && !self.ref_term.is_empty() {
                    self.ref_term.clear();
                    self.ref_state.select(Some(0));
                }
            }

            _ => match self.tab {
                Tab::Designer  => self.designer_action(action),
                Tab::PoolMap   => {}
                Tab::Tools     => self.tools_action(action),
                Tab::Reference => self.reference_action(action),
            },
        }
    }

    fn select_delta(&mut self, delta: i32) {
        let (state, len) = match self.tab {
            Tab::Designer  => (&mut self.designer_state, designer_rows(&self.pool).len()),
            Tab::Tools     => (&mut self.tool_state, ToolField::ALL.len()),
            Tab::Reference => {
                let len = reference::search(&self.ref_term, self.ref_category).len();
                (&mut self.ref_state, len)
            }
            Tab::PoolMap => {
                self.map_scroll = (self.map_scroll as i64 + delta as i64).max(0) as usize;
                return;
            }
        };
        if len == 0 {
            state.select(Some(0));
            return;
        }
        let cur = state.selected().unwrap_or(0) as i64;
        let next = (cur + delta as i64).clamp(0, len as i64 - 1);
        state.select(Some(next as usize));
    }

    // ── Designer ──────────────────────────────────────────────────────

    fn designer_action(&mut self, action: Action) {
        let row = self.selected_row();
        match action {
            Action::Decrease => self.adjust(row, -1),
            Action::Increase => self.adjust(row, 1),
            Action::Add      => self.add(row),
            Action::AddVdev  => self.add_vdev(),
            Action::Remove   => self.remove(row),
            Action::Edit     => self.begin_designer_edit(row),

            Action::ToggleUnit => match row {
                Row::Drive(i, j) => {
                    let unit = self.pool.vdevs[i].drives[j].unit.toggle();
                    self.apply(edit::set_drive_unit(&self.pool, i, j, unit));
                }
                Row::Spare(k) => {
                    let d = self.pool.spares[k];
                    self.apply(edit::set_spare(&self.pool, k, Drive { unit: d.unit.toggle(), ..d }));
                }
                Row::Slog | Row::SlogMirror => {
                    if let Some(d) = self.pool.slog {
                        self.apply(edit::update_slog(&self.pool, Drive { unit: d.unit.toggle(), ..d }));
                    }
                }
                Row::L2arc => {
                    if let Some(d) = self.pool.l2arc {
                        self.apply(edit::update_l2arc(&self.pool, Drive { unit: d.unit.toggle(), ..d }));
                    }
                }
                _ => {}
            },

            Action::ToggleUniform => {
                if let Row::Vdev(i) | Row::Drive(i, _) = row {
                    let uniform = !self.pool.vdevs[i].uniform;
                    self.apply(edit::set_vdev_uniform(&self.pool, i, uniform));
                }
            }

            Action::ToggleSlog => {
                let enable = self.pool.slog.is_none();
                let default = self.config.defaults.slog();
                self.apply(edit::toggle_slog(&self.pool, enable, default));
            }

            Action::ToggleL2arc => {
                let enable = self.pool.l2arc.is_none();
                let default = self.config.defaults.l2arc();
                self.apply(edit::toggle_l2arc(&self.pool, enable, default));
            }

            _ => {}
        }
    }

    fn adjust(&mut self, row: Row, dir: i32) {
        let next = match row {
            Row::Ashift => {
                let sectors: Vec<u8> = SECTOR_SIZES.iter().map(|s| ashift_for_sector(*s)).collect();
                let idx = sectors.iter().position(|a| *a == self.pool.ashift).unwrap_or(1) as i32;
                let idx = (idx + dir).rem_euclid(sectors.len() as i32) as usize;
                edit::set_ashift(&self.pool, sectors[idx])
            }
            Row::Vdev(i) => {
                let kind = self.pool.vdevs[i].kind;
                edit::set_vdev_type(&self.pool, i, if dir > 0 { kind.next() } else { kind.prev() })
            }
            Row::Drive(i, j) => {
                let d = self.pool.vdevs[i].drives[j];
                edit::set_drive_size(&self.pool, i, j, step_size(d.size, d.unit, dir))
            }
            Row::Spare(k) => {
                let d = self.pool.spares[k];
                edit::set_spare(&self.pool, k, Drive { size: step_size(d.size, d.unit, dir), ..d })
            }
            Row::Slog => match self.pool.slog {
                Some(d) => edit::update_slog(&self.pool, Drive { size: step_size(d.size, d.unit, dir), ..d }),
                None    => return,
            },
            Row::SlogMirror => edit::set_slog_mirrored(&self.pool, !self.pool.slog_mirrored),
            Row::L2arc => match self.pool.l2arc {
                Some(d) => edit::update_l2arc(&self.pool, Drive { size: step_size(d.size, d.unit, dir), ..d }),
                None    => return,
            },
            Row::Name | Row::Spares => return,
        };
        self.apply(next);
    }

    fn add(&mut self, row: Row) {
        match row {
            Row::Vdev(i) | Row::Drive(i, _) => {
                let drive = self.pool.vdevs[i].drives.first().copied()
                    .unwrap_or_else(|| self.config.defaults.drive());
                self.apply(edit::add_drive(&self.pool, i, drive));
            }
            Row::Spares | Row::Spare(_) => {
                let drive = self.config.defaults.drive();
                self.apply(edit::add_spare(&self.pool, drive));
            }
            _ => self.add_vdev(),
        }
    }

    fn add_vdev(&mut self) {
        let vdev = self.config.defaults.vdev();
        self.apply(edit::add_vdev(&self.pool, vdev));
        let last = self.pool.vdevs.len() - 1;
        self.select_row(Row::Vdev(last));
    }

    fn remove(&mut self, row: Row) {
        match row {
            Row::Drive(i, j) => {
                let vdev = &self.pool.vdevs[i];
                if advisories::can_remove_drive(vdev) {
                    self.apply(edit::remove_drive(&self.pool, i, j));
                } else {
                    let msg = format!(
                        "{} requires at least {} drives",
                        vdev.kind.keyword(), advisories::min_drives(vdev.kind)
                    );
                    self.flash(msg);
                }
            }
            Row::Vdev(i) => {
                if self.pool.vdevs.len() > 1 {
                    self.apply(edit::remove_vdev(&self.pool, i));
                } else {
                    self.flash("A pool needs at least one vdev");
                }
            }
            Row::Spare(k)               => self.apply(edit::remove_spare(&self.pool, k)),
            Row::Slog | Row::SlogMirror => self.apply(edit::toggle_slog_default(&self.pool, false)),
            Row::L2arc                  => self.apply(edit::toggle_l2arc_default(&self.pool, false)),
            _ => {}
        }
    }

    fn begin_designer_edit(&mut self, row: Row) {
        let (target, buffer) = match row {
            Row::Name        => (EditTarget::PoolName, self.pool.name.clone()),
            Row::Drive(i, j) => (EditTarget::DriveSize(i, j), self.pool.vdevs[i].drives[j].size.to_string()),
            Row::Spare(k)    => (EditTarget::SpareSize(k), self.pool.spares[k].size.to_string()),
            Row::Slog | Row::SlogMirror => match self.pool.slog {
                Some(d) => (EditTarget::SlogSize, d.size.to_string()),
                None    => return,
            },
            Row::L2arc => match self.pool.l2arc {
                Some(d) => (EditTarget::L2arcSize, d.size.to_string()),
                None    => return,
            },
            _ => return,
        };
        self.input = Some(TextInput { target, buffer });
    }

    // ── Tools ─────────────────────────────────────────────────────────

    fn tools_action(&mut self, action: Action) {
        let field = self.selected_field();
        match action {
            Action::Decrease => self.adjust_tool(field, -1),
            Action::Increase => self.adjust_tool(field, 1),
            Action::Edit if field.is_text() => {
                let buffer = self.tool_value(field);
                self.input = Some(TextInput { target: EditTarget::Tool(field), buffer });
            }
            Action::Edit => self.adjust_tool(field, 1),
            Action::Remove => match field {
                ToolField::DsProperty    => { self.dataset.custom_properties.pop(); }
                ToolField::DsQuota       => self.dataset.quota = None,
                ToolField::DsReservation => self.dataset.reservation = None,
                ToolField::SnapSchedule  => self.snapshot.schedule = None,
                _ => {}
            },
            _ => {}
        }
    }

    /// Current text of a free-text field, as the editor should start.
    fn tool_value(&self, field: ToolField) -> String {
        match field {
            ToolField::DsName        => self.dataset.name.clone(),
            ToolField::DsMountpoint  => self.dataset.mountpoint.clone(),
            ToolField::DsQuota       => self.dataset.quota.as_ref().map(SizeLimit::value).unwrap_or_default(),
            ToolField::DsReservation => self.dataset.reservation.as_ref().map(SizeLimit::value).unwrap_or_default(),
            ToolField::SnapPath      => self.snapshot.dataset_path.clone(),
            ToolField::SnapName      => self.snapshot.custom_name.clone(),
            ToolField::SnapRetain    => self.snapshot.schedule.as_ref().map(|s| s.retain.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn adjust_tool(&mut self, field: ToolField, dir: i32) {
        let ds = &mut self.dataset;
        match field {
            ToolField::DsCompression => {
                ds.compression = if dir > 0 { ds.compression.next_algorithm() } else { ds.compression.prev_algorithm() };
            }
            ToolField::DsLevel          => ds.compression = ds.compression.next_level(),
            ToolField::DsRecordsize     => ds.recordsize = cycle(&RECORD_SIZES, ds.recordsize, dir),
            ToolField::DsPrimaryCache   => ds.primary_cache = cycle(&CACHE_MODES, ds.primary_cache, dir),
            ToolField::DsSecondaryCache => ds.secondary_cache = cycle(&CACHE_MODES, ds.secondary_cache, dir),
            ToolField::DsAtime          => ds.atime = !ds.atime,
            ToolField::DsExec           => ds.exec = !ds.exec,
            ToolField::DsQuota => {
                if let Some(q) = ds.quota.as_mut() { q.suffix = cycle(&SIZE_SUFFIXES, q.suffix, dir); }
            }
            ToolField::DsReservation => {
                if let Some(r) = ds.reservation.as_mut() { r.suffix = cycle(&SIZE_SUFFIXES, r.suffix, dir); }
            }
            ToolField::SnapRecursive => self.snapshot.recursive = !self.snapshot.recursive,
            ToolField::SnapSchedule => {
                // Off, then each interval, then off again.
                let n = INTERVALS.len() as i32 + 1;
                let cur = self.snapshot.schedule.as_ref()
                    .and_then(|s| INTERVALS.iter().position(|i| *i == s.interval))
                    .map(|p| p as i32 + 1)
                    .unwrap_or(0);
                let next = (cur + dir).rem_euclid(n);
                let retain = self.snapshot.schedule.as_ref().map(|s| s.retain).unwrap_or(Schedule::default().retain);
                self.snapshot.schedule = (next > 0)
                    .then(|| Schedule { interval: INTERVALS[next as usize - 1], retain });
            }
            ToolField::SnapRetain => {
                if let Some(s) = self.snapshot.schedule.as_mut() {
                    s.retain = (s.retain as i64 + dir as i64).max(1) as u32;
                }
            }
            _ => {}
        }
    }

    fn commit_tool(&mut self, field: ToolField, text: String) {
        match field {
            ToolField::DsName       => self.dataset.name = text.trim().to_string(),
            ToolField::DsMountpoint => self.dataset.mountpoint = text.trim().to_string(),
            ToolField::DsQuota | ToolField::DsReservation => {
                let limit = if text.trim().is_empty() {
                    None
                } else {
                    match SizeLimit::parse(&text) {
                        Some(l) => Some(l),
                        None    => return self.flash("Size must look like 500G (K, M, G or T)"),
                    }
                };
                if field == ToolField::DsQuota { self.dataset.quota = limit } else { self.dataset.reservation = limit }
            }
            ToolField::DsProperty => match text.split_once('=') {
                Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
                    self.dataset = dataset::add_property(&self.dataset, k.trim(), v.trim());
                }
                _ => self.flash("Use name=value"),
            },
            ToolField::SnapPath => self.snapshot.dataset_path = text.trim().trim_matches('/').to_string(),
            ToolField::SnapName => self.snapshot.custom_name = text.trim().to_string(),
            ToolField::SnapRetain => match text.trim().parse::<u32>() {
                Ok(n) if n > 0 => {
                    let interval = self.snapshot.schedule.as_ref().map(|s| s.interval).unwrap_or(Schedule::default().interval);
                    self.snapshot.schedule = Some(Schedule { interval, retain: n });
                }
                _ => self.flash("Retain must be a positive number"),
            },
            _ => {}
        }
    }

    // ── Reference ─────────────────────────────────────────────────────

    fn reference_action(&mut self, action: Action) {
        match action {
            Action::Decrease => { self.ref_category = self.ref_category.prev(); self.ref_state.select(Some(0)); }
            Action::Increase => { self.ref_category = self.ref_category.next(); self.ref_state.select(Some(0)); }
            Action::Edit => {
                self.input = Some(TextInput { target: EditTarget::Search, buffer: self.ref_term.clone() });
            }
            _ => {}
        }
    }

    // ── Line editor ───────────────────────────────────────────────────

    pub fn handle_edit(&mut self, action: EditAction) {
        let Some(input) = self.input.as_mut() else { return };
        match action {
            EditAction::Insert(c) => input.buffer.push(c),
            EditAction::Backspace => { input.buffer.pop(); }
            EditAction::Cancel    => self.input = None,
            EditAction::Quit      => {
                self.input = None;
                self.should_quit = true;
            }
            EditAction::Commit    => {
                if let Some(TextInput { target, buffer }) = self.input.take() {
                    self.commit(target, buffer);
                }
            }
            EditAction::None => {}
        }
    }

    fn commit(&mut self, target: EditTarget, text: String) {
        let size = parse_size(&text);
        let next = match target {
            EditTarget::PoolName => edit::rename(&self.pool, text.trim()),
            EditTarget::Tool(field) => return self.commit_tool(field, text),
            EditTarget::Search => {
                self.ref_term = text;
                self.ref_state.select(Some(0));
                return;
            }
            EditTarget::DriveSize(i, j) => match size {
                Some(s) => edit::set_drive_size(&self.pool, i, j, s),
                None    => return self.flash("Invalid size"),
            },
            EditTarget::SpareSize(k) => match size {
                Some(s) => edit::set_spare(&self.pool, k, Drive { size: s, ..self.pool.spares[k] }),
                None    => return self.flash("Invalid size"),
            },
            EditTarget::SlogSize => match (size, self.pool.slog) {
                (Some(s), Some(d)) => edit::update_slog(&self.pool, Drive { size: s, ..d }),
                _ => return self.flash("Invalid size"),
            },
            EditTarget::L2arcSize => match (size, self.pool.l2arc) {
                (Some(s), Some(d)) => edit::update_l2arc(&self.pool, Drive { size: s, ..d }),
                _ => return self.flash("Invalid size"),
            },
        };
        self.apply(next);
    }

    // ── Clipboard ─────────────────────────────────────────────────────

    /// What `y` copies on the current tab.
    pub fn clipboard_text(&self) -> Option<String> {
        match self.tab {
            Tab::Designer | Tab::PoolMap => Some(self.command.clone()),
            Tab::Tools if self.selected_field().is_snapshot() => {
                Some(snapshot::script(&self.pool.name, &self.snapshot, chrono::Utc::now()))
            }
            Tab::Tools     => Some(dataset::create_command(&self.pool.name, &self.dataset)),
            Tab::Reference => self.selected_entry().map(|e| e.syntax.to_string()),
        }
    }

    fn copy(&mut self) {
        let Some(text) = self.clipboard_text() else { return };
        match clipboard::copy(&text, &self.config.clipboard.command) {
            Ok(())  => self.flash("Copied to clipboard"),
            Err(e)  => self.flash(format!("Copy failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pool::GroupType;

    fn app() -> App {
        App::new(Config::default(), Pool::default(), ThemeVariant::Default)
    }

    fn select(app: &mut App, row: Row) {
        app.select_row(row);
        assert_eq!(app.selected_row(), row);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_edit(EditAction::Insert(c));
        }
        app.handle_edit(EditAction::Commit);
    }

    #[test]
    fn starts_with_derived_state() {
        let app = app();
        assert_eq!(app.result.total_raw, 12.0);
        assert!(app.command.starts_with("zpool create"));
        assert!(app.advisories.is_empty());
        assert_eq!(app.selected_row(), Row::Name);
    }

    #[test]
    fn row_layout_follows_pool() {
        let mut pool = Pool::default();
        pool.spares.push(Drive::tb(4.0));
        pool.slog = Some(Drive::gb(16.0));
        let rows = designer_rows(&pool);
        assert_eq!(rows, vec![
            Row::Name, Row::Ashift, Row::Vdev(0),
            Row::Drive(0, 0), Row::Drive(0, 1), Row::Drive(0, 2),
            Row::Spares, Row::Spare(0), Row::Slog, Row::SlogMirror, Row::L2arc,
        ]);
    }

    #[test]
    fn drive_removal_stops_at_minimum() {
        let mut app = app();
        select(&mut app, Row::Drive(0, 2));
        app.handle_action(Action::Remove);
        assert_eq!(app.pool.vdevs[0].drives.len(), 3);
        assert_eq!(app.status_text(), Some("raidz1 requires at least 3 drives"));
    }

    #[test]
    fn adding_a_drive_recomputes() {
        let mut app = app();
        select(&mut app, Row::Vdev(0));
        app.handle_action(Action::Add);
        assert_eq!(app.pool.vdevs[0].drives.len(), 4);
        assert_eq!(app.result.usable_space, 12.0);
        assert_eq!(app.advisories.len(), 1);
    }

    #[test]
    fn last_vdev_cannot_be_removed() {
        let mut app = app();
        select(&mut app, Row::Vdev(0));
        app.handle_action(Action::Remove);
        assert_eq!(app.pool.vdevs.len(), 1);

        app.handle_action(Action::AddVdev);
        assert_eq!(app.pool.vdevs.len(), 2);
        assert_eq!(app.selected_row(), Row::Vdev(1));
        app.handle_action(Action::Remove);
        assert_eq!(app.pool.vdevs.len(), 1);
    }

    #[test]
    fn type_change_pads_group() {
        let mut app = app();
        select(&mut app, Row::Vdev(0));
        app.handle_action(Action::Increase);
        assert_eq!(app.pool.vdevs[0].kind, GroupType::Raidz2);
        assert_eq!(app.pool.vdevs[0].drives.len(), 4);
        app.handle_action(Action::Decrease);
        app.handle_action(Action::Decrease);
        assert_eq!(app.pool.vdevs[0].kind, GroupType::Mirror);
    }

    #[test]
    fn slog_toggle_uses_configured_default() {
        let mut app = app();
        app.config.defaults.slog_size_gb = 32.0;
        app.handle_action(Action::ToggleSlog);
        assert_eq!(app.pool.slog, Some(Drive::gb(32.0)));
        assert!(app.command.contains("log /dev/sdX"));
        assert_eq!(app.advisories.len(), 1);

        select(&mut app, Row::SlogMirror);
        app.handle_action(Action::Increase);
        assert!(app.pool.slog_mirrored);
        assert!(app.advisories.is_empty());

        app.handle_action(Action::ToggleSlog);
        assert_eq!(app.pool.slog, None);
        assert!(!app.pool.slog_mirrored);
    }

    #[test]
    fn drive_size_steps_and_uniform_propagation() {
        let mut app = app();
        select(&mut app, Row::Drive(0, 1));
        app.handle_action(Action::Increase);
        assert!(app.pool.vdevs[0].drives.iter().all(|d| d.size == 6.0));

        app.handle_action(Action::ToggleUniform);
        app.handle_action(Action::Decrease);
        let sizes: Vec<f64> = app.pool.vdevs[0].drives.iter().map(|d| d.size).collect();
        assert_eq!(sizes, vec![6.0, 4.0, 6.0]);
    }

    #[test]
    fn size_steps_clamp() {
        assert_eq!(step_size(30.0, Unit::Tb, 1), 30.0);
        assert_eq!(step_size(0.5, Unit::Tb, -1), 1.0);
        assert_eq!(step_size(5.0, Unit::Tb, 1), 6.0);
        assert_eq!(step_size(16.0, Unit::Gb, -1), 8.0);
    }

    #[test]
    fn ashift_cycles_sector_sizes() {
        let mut app = app();
        select(&mut app, Row::Ashift);
        app.handle_action(Action::Increase);
        assert_eq!(app.pool.ashift, 13);
        app.handle_action(Action::Decrease);
        app.handle_action(Action::Decrease);
        assert_eq!(app.pool.ashift, 9);
        app.handle_action(Action::Decrease);
        assert_eq!(app.pool.ashift, 14);
    }

    #[test]
    fn rename_through_line_editor() {
        let mut app = app();
        app.handle_action(Action::Edit);
        assert_eq!(app.input.as_ref().map(|i| i.buffer.as_str()), Some("tank"));
        for _ in 0..4 { app.handle_edit(EditAction::Backspace); }
        type_text(&mut app, "vault");
        assert_eq!(app.pool.name, "vault");
        assert!(app.command.contains("vault"));
        assert!(app.input.is_none());
    }

    #[test]
    fn invalid_size_is_rejected() {
        let mut app = app();
        select(&mut app, Row::Drive(0, 0));
        app.handle_action(Action::Edit);
        app.handle_edit(EditAction::Backspace);
        type_text(&mut app, "x");
        assert_eq!(app.pool, Pool::default());
        assert_eq!(app.status_text(), Some("Invalid size"));
    }

    #[test]
    fn cancel_leaves_pool_alone() {
        let mut app = app();
        app.handle_action(Action::Edit);
        app.handle_edit(EditAction::Insert('z'));
        app.handle_edit(EditAction::Cancel);
        assert_eq!(app.pool.name, "tank");
    }

    #[test]
    fn ctrl_c_in_editor_quits_without_saving() {
        let mut app = app();
        app.handle_action(Action::Edit);
        app.handle_edit(EditAction::Insert('z'));
        app.handle_edit(EditAction::Quit);
        assert!(app.should_quit);
        assert!(app.input.is_none());
        assert_eq!(app.pool.name, "tank");
    }

    #[test]
    fn tabs_wrap() {
        let mut app = app();
        app.handle_action(Action::PrevTab);
        assert_eq!(app.tab, Tab::Reference);
        app.handle_action(Action::NextTab);
        assert_eq!(app.tab, Tab::Designer);
    }

    #[test]
    fn help_swallows_other_keys() {
        let mut app = app();
        app.handle_action(Action::ShowHelp);
        app.handle_action(Action::NextTab);
        assert_eq!(app.tab, Tab::Designer);
        app.handle_action(Action::Back);
        assert!(!app.show_help);
    }

    #[test]
    fn dataset_builder_via_tools_tab() {
        let mut app = app();
        app.handle_action(Action::NextTab);
        app.handle_action(Action::NextTab);
        assert_eq!(app.tab, Tab::Tools);

        app.handle_action(Action::Edit);
        type_text(&mut app, "media");
        app.handle_action(Action::SelectDown);
        app.handle_action(Action::SelectDown);
        app.handle_action(Action::Increase);
        assert_eq!(app.dataset.compression.algorithm, dataset::Algorithm::Gzip);

        assert_eq!(
            app.clipboard_text().as_deref(),
            Some("zfs create -o compression=gzip -o recordsize=128K -o primarycache=all \
                  -o secondarycache=all -o atime=off -o exec=on tank/media")
        );
    }

    #[test]
    fn quota_and_property_parsing() {
        let mut app = app();
        app.tab = Tab::Tools;
        app.commit_tool(ToolField::DsQuota, "100g".into());
        assert_eq!(app.dataset.quota, Some(SizeLimit { amount: 100, suffix: "G" }));
        app.commit_tool(ToolField::DsQuota, "lots".into());
        assert_eq!(app.status_text(), Some("Size must look like 500G (K, M, G or T)"));
        app.commit_tool(ToolField::DsProperty, "sync=disabled".into());
        app.commit_tool(ToolField::DsProperty, "sync".into());
        assert_eq!(app.dataset.custom_properties, vec![("sync".to_string(), "disabled".to_string())]);
    }

    #[test]
    fn snapshot_schedule_cycles_through_off() {
        let mut app = app();
        app.adjust_tool(ToolField::SnapSchedule, 1);
        assert_eq!(app.snapshot.schedule, Some(Schedule { interval: "15m", retain: 24 }));
        app.adjust_tool(ToolField::SnapRetain, -1);
        app.adjust_tool(ToolField::SnapSchedule, -1);
        assert_eq!(app.snapshot.schedule, None);
        app.adjust_tool(ToolField::SnapSchedule, -1);
        assert_eq!(app.snapshot.schedule, Some(Schedule { interval: "1w", retain: 24 }));
    }

    #[test]
    fn snapshot_copy_uses_pool_name() {
        let mut app = app();
        app.tab = Tab::Tools;
        let idx = ToolField::ALL.iter().position(|f| *f == ToolField::SnapName).unwrap();
        app.tool_state.select(Some(idx));
        app.commit_tool(ToolField::SnapName, "manual".into());
        assert_eq!(app.clipboard_text().as_deref(), Some("zfs snapshot tank@manual"));
    }

    #[test]
    fn reference_search_and_category() {
        let mut app = app();
        app.tab = Tab::Reference;
        let all = app.ref_results().len();
        app.handle_action(Action::Edit);
        type_text(&mut app, "scrub");
        assert!(app.ref_results().len() < all);
        assert!(app.selected_entry().is_some());

        app.handle_action(Action::Back);
        assert!(app.ref_term.is_empty());
        app.handle_action(Action::Increase);
        assert_eq!(app.ref_category, Category::Pool);
        assert!(app.ref_results().iter().all(|e| e.category == Category::Pool));
    }
}
