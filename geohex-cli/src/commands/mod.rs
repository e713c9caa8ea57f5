//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, list, init)
//! - [`generate`] - Stream a tessellation as WKT lines
//! - [`locate`] - Find the cell containing a point

pub mod common;
pub mod config;
pub mod generate;
pub mod locate;
