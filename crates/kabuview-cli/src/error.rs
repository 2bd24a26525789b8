use thiserror::Error;

use kabuview_core::{ReportError, ServiceError, SourceError, SourceErrorKind, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ServiceError> for CliError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Source(source) => Self::Source(source),
            ServiceError::Report(report) => Self::Report(report),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Report(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }

    /// Extra guidance printed under fetch failures.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Source(source) if matches!(source.kind(), SourceErrorKind::NoData) => Some(
                "check the ticker format: Japanese listings need a .T suffix (e.g. 7203.T)",
            ),
            _ => None,
        }
    }
}
