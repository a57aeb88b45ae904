mod advisories;
mod app;
mod capacity;
mod commands;
mod config;
mod input;
mod models;
mod plan;
mod ui;
mod util;

use app::App;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::pool::Pool;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zplan", about = "ZFS pool planning calculator", version = "0.1")]
struct Cli {
    /// Start from a pool description (TOML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Print the plan (pool, capacity, command, advisories) as JSON and exit
    #[arg(long)]
    json: bool,

    /// Print a human-readable plan report and exit
    #[arg(long)]
    report: bool,

    /// Print only the zpool create command and exit
    #[arg(long)]
    command: bool,

    /// Search the command reference (all entries without a term) and exit
    #[arg(long, value_name = "TERM", num_args = 0..=1, default_missing_value = "")]
    reference: Option<String>,

    /// Reference category: all, pool, dataset, snapshot, properties, maintenance
    #[arg(long, default_value = "all", requires = "reference")]
    category: String,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "zplan", &mut io::stdout());
        return Ok(());
    }

    let headless = cli.json || cli.report || cli.command || cli.reference.is_some() || cli.config;
    if headless {
        util::logging::init_stderr();
    } else {
        util::logging::init_file();
    }

    let cfg = Config::load();

    if cli.config {
        return run_print_config(&cfg);
    }
    if let Some(term) = &cli.reference {
        return run_reference(term, &cli.category);
    }

    let pool = initial_pool(&cli, &cfg)?;

    if cli.json {
        return run_json(&pool);
    }
    if cli.report {
        print!("{}", util::report::generate(&pool, cfg.general.decimals));
        return Ok(());
    }
    if cli.command {
        println!("{}", commands::zpool::create_command(&pool));
        return Ok(());
    }

    let theme_name = cli.theme.clone().unwrap_or_else(|| cfg.general.theme.clone());
    let initial_theme = ui::theme::ThemeVariant::from_name(&theme_name);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    tracing::info!(pool = %pool.name, theme = initial_theme.name(), "starting TUI");
    let result = run(cfg, pool, initial_theme);
    restore_terminal()?;
    result
}

fn initial_pool(cli: &Cli, cfg: &Config) -> Result<Pool> {
    match &cli.plan {
        Some(path) => plan::load(path).with_context(|| format!("loading plan {}", path.display())),
        None       => Ok(cfg.defaults.pool()),
    }
}

fn run_json(pool: &Pool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&plan_json(pool))?);
    Ok(())
}

fn plan_json(pool: &Pool) -> serde_json::Value {
    use serde_json::json;

    let validation: Vec<_> = advisories::validate(pool).into_iter()
        .map(|(idx, message)| json!({ "vdev": idx, "message": message }))
        .collect();

    // NaN efficiency (no drives) serializes as null
    json!({
        "zplan_version": "0.1",
        "timestamp":     chrono::Local::now().to_rfc3339(),
        "pool":          pool,
        "capacity":      capacity::pool_capacity(pool),
        "command":       commands::zpool::create_command(pool),
        "advisories":    advisories::evaluate(pool),
        "validation":    validation,
    })
}

fn run_reference(term: &str, category: &str) -> Result<()> {
    use commands::reference::{self, Category};

    let cat = Category::from_name(category)
        .ok_or_else(|| anyhow::anyhow!("unknown category {:?}", category))?;
    let entries = reference::search(term, cat);
    if entries.is_empty() {
        println!("No commands match {:?}.", term);
        return Ok(());
    }
    for e in entries {
        println!("{}  [{}]", e.command, e.category.label());
        println!("  {}", e.syntax);
        println!("  {}", e.description);
        for ex in e.examples {
            println!("    $ {:<40} # {}", ex.cmd, ex.desc);
        }
        println!();
    }
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let d = &cfg.defaults;
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  theme    = {}", cfg.general.theme);
    println!("  decimals = {}", cfg.general.decimals);
    println!();
    println!("[defaults]");
    println!("  pool_name     = {}", d.pool_name);
    println!("  vdev_type     = {} ({})", d.vdev_type, d.group_type().keyword());
    println!("  drive_size_tb = {}", d.drive_size_tb);
    println!("  ashift        = {}", d.ashift);
    println!("  slog_size_gb  = {}", d.slog_size_gb);
    println!("  l2arc_size_gb = {}", d.l2arc_size_gb);
    println!();
    println!("[clipboard]");
    if cfg.clipboard.command.is_empty() {
        println!("  command = (auto: wl-copy, xclip, xsel, pbcopy)");
    } else {
        println!("  command = {:?}", cfg.clipboard.command);
    }
    Ok(())
}

fn run(cfg: Config, pool: Pool, initial_theme: ui::theme::ThemeVariant) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(cfg, pool, initial_theme);
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
