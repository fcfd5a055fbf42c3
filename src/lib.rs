#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod error;
pub mod format;
pub mod icon;
pub mod loader;
pub mod probe;
pub mod report;
pub mod settings;

pub use app::SystemInfoApp;
pub use error::{Error, Result};
pub use report::SystemReport;

pub const WINDOW_TITLE: &str = "System Information";

/// Window size while the report is being gathered.
pub const LOADING_WINDOW_SIZE: [f32; 2] = [520.0, 180.0];

/// Window size once the report is on screen, before clamping to the monitor.
pub const REPORT_WINDOW_SIZE: [f32; 2] = [760.0, 720.0];
