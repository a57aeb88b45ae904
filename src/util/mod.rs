pub mod clipboard;
pub mod human;
pub mod logging;
pub mod report;
