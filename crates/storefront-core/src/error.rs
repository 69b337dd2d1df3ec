//! Failure classes the CLI distinguishes when choosing an exit code

use std::path::PathBuf;
use thiserror::Error;

/// Scaffolding failures that abort the run
///
/// Anything else (filesystem, network) travels as a plain `anyhow::Error`
/// with context attached at the call site.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Unknown template '{name}'. Available templates: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Template directory not found: {}", .0.display())]
    MissingTemplateDir(PathBuf),

    #[error("Template variant directory not found: {}", .0.display())]
    MissingVariant(PathBuf),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("Directory {} already exists and is not empty", .0.display())]
    DestinationNotEmpty(PathBuf),

    #[error("No readable package.json in {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Dependency installation failed with exit code {code}")]
    InstallFailed { code: i32 },
}

impl ScaffoldError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::InstallFailed { code } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_failure_keeps_tool_exit_code() {
        assert_eq!(ScaffoldError::InstallFailed { code: 127 }.exit_code(), 127);
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = ScaffoldError::MissingTemplateDir(PathBuf::from("/tmp/nope"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("/tmp/nope"));
    }
}
