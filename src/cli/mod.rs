// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for drawing poses.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! console logging and the `render` and `angles` command implementations.

// Modules
/// CLI arguments.
pub mod args;

/// Console logging macros and verbosity switch.
pub mod logging;

/// Render and angle-report commands.
pub mod render;
