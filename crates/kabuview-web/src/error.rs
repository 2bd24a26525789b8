use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use kabuview_core::{ServiceError, SourceError, SourceErrorKind, ValidationError};

/// API error mapped onto HTTP status codes: input validation is the
/// caller's fault (400), an unknown symbol/period is 404, an upstream
/// outage is 502, everything else is 500.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Source(SourceError),
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Source(source) => Self::Source(source),
            ServiceError::Report(report) => Self::Internal(report.to_string()),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Source(source) => match source.kind() {
                SourceErrorKind::NoData => StatusCode::NOT_FOUND,
                SourceErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
                SourceErrorKind::Unavailable => StatusCode::BAD_GATEWAY,
                SourceErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "input.invalid",
            Self::Source(source) => source.code(),
            Self::Internal(_) => "internal",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(error) => error.to_string(),
            Self::Source(source) => source.message().to_owned(),
            Self::Internal(message) => message.clone(),
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Source(source) if matches!(source.kind(), SourceErrorKind::NoData) => Some(
                "check the ticker format: Japanese listings need a .T suffix (e.g. 7203.T)",
            ),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code(),
            "error": self.message(),
            "hint": self.hint(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_maps_to_not_found_with_hint() {
        let error = ApiError::Source(SourceError::no_data("no rows"));
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert!(error.hint().is_some());
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let error = ApiError::Validation(ValidationError::EmptyTicker);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "input.invalid");
        assert!(error.hint().is_none());
    }

    #[test]
    fn upstream_failure_maps_to_bad_gateway() {
        let error = ApiError::Source(SourceError::unavailable("status 500"));
        assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
    }
}
