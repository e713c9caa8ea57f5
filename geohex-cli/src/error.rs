//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geohex::config::ConfigFileError;
use geohex::coord::GeoPoint;
use geohex::export::ExportError;
use geohex::tessellation::TessellationError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Generator could not start or failed mid-stream
    Tessellation(TessellationError),
    /// Writing exported cells failed
    Export(ExportError),
    /// Failed to create output file
    FileWrite { path: String, error: std::io::Error },
    /// Point lies outside every generated cell
    NotCovered(GeoPoint),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Tessellation(TessellationError::Projection(_))
            | CliError::Export(ExportError::Tessellation { .. }) => {
                eprintln!();
                eprintln!("UTM zones cover latitudes from 80°S to 84°N.");
                eprintln!("Shrink the bounding box to stay inside that band.");
            }
            CliError::NotCovered(_) => {
                eprintln!();
                eprintln!("The point must lie inside the --bbox region.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Tessellation(e) => write!(f, "Tessellation failed: {}", e),
            CliError::Export(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::NotCovered(point) => write!(f, "No cell contains point {}", point),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Tessellation(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<TessellationError> for CliError {
    fn from(e: TessellationError) -> Self {
        CliError::Tessellation(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_message() {
        let err = CliError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad value");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_tessellation_error_has_source() {
        let err = CliError::from(TessellationError::InvalidConfig("size".to_string()));
        assert!(err.to_string().contains("Invalid tessellation config"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_covered_message() {
        let err = CliError::NotCovered(GeoPoint::new(1.5, 2.5));
        assert_eq!(err.to_string(), "No cell contains point (1.500000, 2.500000)");
    }
}
