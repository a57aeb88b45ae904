use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directives are read from this variable, e.g. `ZPLAN_LOG=zplan=debug`.
pub const ENV_VAR: &str = "ZPLAN_LOG";
const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Headless modes log to stderr so stdout stays clean for piping.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

/// The TUI owns the terminal; log to `<data dir>/zplan.log` instead.
/// Falls back to no logging when the file cannot be opened.
pub fn init_file() {
    let Some(dir) = crate::config::Config::data_dir() else { return };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let file = match OpenOptions::new().create(true).append(true).open(dir.join("zplan.log")) {
        Ok(f)  => f,
        Err(_) => return,
    };
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
}
