//! Error types for the Brik compiler

use std::fmt;
use thiserror::Error;

/// A single field-level violation found while validating an IR root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `tree.children.0.progress`
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Invalid IR for root '{root_id}':\n{}", format_issues(.issues))]
    Validation {
        root_id: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Unsupported IR version {found} in '{root_id}' (expected {expected})")]
    UnsupportedVersion {
        root_id: String,
        found: u64,
        expected: u32,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Code generation error: {message}")]
    CodeGen { message: String },

    #[error("{failed} of {total} files failed to compile")]
    CompilationFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CompilerError>;

impl CompilerError {
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn validation(root_id: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self::Validation {
            root_id: root_id.into(),
            issues,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn codegen(message: impl Into<String>) -> Self {
        Self::CodeGen {
            message: message.into(),
        }
    }

    /// Stable error code shown to users next to the message
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "BR002",
            Self::Validation { .. } => "BR008",
            Self::Json(_) | Self::InvalidFormat { .. } => "BR101",
            Self::CodeGen { .. } => "BR100",
            Self::Io(_) | Self::FileNotFound { .. } => "BR104",
            Self::Config { .. } => "BR300",
            Self::UnsupportedVersion { .. } => "BR302",
            Self::CompilationFailed { .. } => "BR001",
        }
    }

    /// Field-level issues for validation failures, empty otherwise
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation { issues, .. } => issues,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_issue() {
        let err = CompilerError::validation(
            "src_Widget_tsx",
            vec![
                ValidationIssue::new("tree.progress", "must be between 0 and 1"),
                ValidationIssue::new("rootId", "must not be empty"),
            ],
        );
        let message = err.to_string();
        assert!(message.contains("src_Widget_tsx"));
        assert!(message.contains("tree.progress: must be between 0 and 1"));
        assert!(message.contains("rootId: must not be empty"));
        assert_eq!(err.code(), "BR008");
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CompilerError::parse("a.tsx", "boom").code(), "BR002");
        assert_eq!(CompilerError::config("bad").code(), "BR300");
        assert!(CompilerError::codegen("x").issues().is_empty());
    }
}
