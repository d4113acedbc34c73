//! Shared error type and exit codes for CLI commands.

use crate::models::Block;
use crate::services::BlockService;
use crate::units::{init_registry, UnitRegistry};
use std::fmt;
use std::path::Path;

/// Process exit codes returned by `quiltkit` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// The block (or placement) failed validation
    ValidationFailed = 1,
    /// File could not be read, parsed or written
    IoError = 2,
    /// Command-line arguments are unusable
    InvalidInput = 3,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Validation failure
    Validation,
    /// I/O or parse failure
    Io,
    /// Bad arguments
    InvalidInput,
}

/// A CLI failure with the message shown to the user.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Failure category, decides the exit code
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Unusable arguments (exit code 3).
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    /// Exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationFailed,
            CliErrorKind::Io => ExitCode::IoError,
            CliErrorKind::InvalidInput => ExitCode::InvalidInput,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// The process-wide unit registry.
pub fn registry() -> CliResult<&'static UnitRegistry> {
    init_registry()
        .map_err(|e| CliError::io(format!("Failed to initialize unit registry: {e}")))
}

/// Loads a block file, mapping failures to an I/O error.
pub fn load_block(registry: &UnitRegistry, path: &Path) -> CliResult<Block> {
    BlockService::load(registry, path).map_err(|e| CliError::io(format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code().code(), 1);
        assert_eq!(CliError::io("x").exit_code().code(), 2);
        assert_eq!(CliError::invalid_input("x").exit_code().code(), 3);
        assert_eq!(ExitCode::Success.code(), 0);
    }
}
