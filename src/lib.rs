extern crate argparse;
extern crate thiserror;
extern crate tracing;
extern crate tracing_subscriber;

#[cfg(windows)]
extern crate winapi;

pub mod error;
pub mod drive;
pub mod volume;
pub mod platform;
pub mod tray;
pub mod cli;
pub mod logging;
pub mod tuning;
