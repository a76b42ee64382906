//! `underwriter` library crate.
//!
//! The binary (`uw`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod artifacts;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod explain;
pub mod features;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
pub mod sample;
pub mod telemetry;
pub mod tui;

#[cfg(test)]
pub(crate) mod testkit;
