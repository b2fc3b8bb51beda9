//! Error types for cash flow analysis

use thiserror::Error;

/// Errors raised before any analysis is attempted.
///
/// Numeric edge conditions (no payback within the horizon, IRR that does not
/// converge) are not errors; they surface as `None` fields on
/// [`AnalysisResult`](crate::analysis::AnalysisResult).
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("At least one cash flow period is required")]
    EmptyCashFlows,

    #[error("Failed to load input: {0}")]
    Load(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::Load(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Load(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
