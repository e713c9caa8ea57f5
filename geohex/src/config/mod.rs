//! Configuration for geohex.
//!
//! Two layers, kept apart:
//!
//! - [`TessellationConfig`] is the typed configuration the engine consumes.
//! - [`ConfigFile`] is the user's `~/.geohex/config.ini`, read by the CLI
//!   and converted into engine configuration and a pitch-class rule.
//!
//! # Example
//!
//! ```
//! use geohex::config::{ConfigFile, TessellationConfig};
//!
//! let file = ConfigFile::default();
//! let config: TessellationConfig = file.tessellation_config();
//! assert_eq!(config, TessellationConfig::default());
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod tessellation;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, RuleSettings, TessellationSettings};
pub use tessellation::TessellationConfig;
