pub mod args;
pub mod config;
pub mod logging;
pub mod report;
pub mod scenario_loader;
