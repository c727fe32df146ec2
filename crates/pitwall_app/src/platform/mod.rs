mod app;
mod effects;
pub mod persistence;
mod ui;

pub use app::{run_monitor, MonitorOptions};
pub use ui::table::{cell, Table};
