//! Error types for definition loading and rendering.

use std::path::PathBuf;

use thiserror::Error;

use crate::theme::FontRole;

/// Structural problem in a definition. Raised before any layout happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDefinitionError {
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: label must not be empty")]
    EmptyLabel { path: String },

    #[error("{path}: goal needs either `criteria` or `tools`")]
    GoalWithoutChildren { path: String },

    #[error("{path}: goal may declare `criteria` or `tools`, not both")]
    GoalWithBothChildKinds { path: String },

    #[error("{path}: criterion is missing its `tools` list")]
    CriterionWithoutTools { path: String },
}

impl MalformedDefinitionError {
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path, .. }
            | Self::EmptyLabel { path }
            | Self::GoalWithoutChildren { path }
            | Self::GoalWithBothChildKinds { path }
            | Self::CriterionWithoutTools { path } => path,
        }
    }
}

/// None of the candidate font files for a role exist. Only ever logged; the
/// caller falls back to a system face.
#[derive(Debug, Clone, Error)]
#[error("no {role:?} font found (tried {}), falling back to system sans-serif", display_paths(.tried))]
pub struct FontUnavailableError {
    pub role: FontRole,
    pub tried: Vec<PathBuf>,
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidates".to_string();
    }
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("malformed definition: {0}")]
    Malformed(#[from] MalformedDefinitionError),

    #[error("invalid definition syntax: {0}")]
    Syntax(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_error_reports_location() {
        let err = MalformedDefinitionError::GoalWithoutChildren {
            path: "goals[0]".to_string(),
        };
        assert_eq!(err.path(), "goals[0]");
        assert_eq!(
            err.to_string(),
            "goals[0]: goal needs either `criteria` or `tools`"
        );
    }

    #[test]
    fn font_error_lists_candidates() {
        let err = FontUnavailableError {
            role: FontRole::Bold,
            tried: vec![PathBuf::from("/a.ttf"), PathBuf::from("/b.ttf")],
        };
        let message = err.to_string();
        assert!(message.contains("/a.ttf, /b.ttf"), "{message}");
    }
}
