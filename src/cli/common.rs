//! Shared CLI plumbing: error type, exit codes and config loading.

use crate::config::Config;
use crate::error::DashboardError;
use crate::services::DashboardSession;
use std::fmt;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was rejected
    Validation = 1,
    /// Reading or writing failed
    Io = 2,
    /// A referenced item does not exist
    NotFound = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process should end with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Input was rejected.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Reading or writing failed.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// A referenced item does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::NotFound,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DashboardError> for CliError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::NotFound(_) => Self::not_found(err.to_string()),
            DashboardError::Validation(_) | DashboardError::Boundary(_) => {
                Self::validation(err.to_string())
            }
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration file (defaults when absent).
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Starts a dashboard session from configuration.
pub fn start_session(config: &Config) -> CliResult<DashboardSession> {
    DashboardSession::from_config(config)
        .map_err(|e| CliError::validation(format!("Failed to start session: {e:#}")))
}

/// Prints a value as compact JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_errors_map_to_exit_codes() {
        let not_found: CliError = DashboardError::not_found("preset x").into();
        assert_eq!(not_found.exit_code, ExitCode::NotFound);

        let boundary: CliError = DashboardError::boundary("busy").into();
        assert_eq!(boundary.exit_code, ExitCode::Validation);
        assert_eq!(boundary.to_string(), "limit reached: busy");
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Io.code(), 2);
        assert_eq!(ExitCode::NotFound.code(), 3);
    }
}
