use application_ports::scholarship_application::ScholarshipApplicationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ScholarshipApplicationError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ScholarshipApplicationError::Forbidden => StatusCode::FORBIDDEN,
            ScholarshipApplicationError::InvalidScholarshipName => StatusCode::UNPROCESSABLE_ENTITY,
            ScholarshipApplicationError::NotFound => StatusCode::NOT_FOUND,
            ScholarshipApplicationError::TemporaryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, self.to_string()).into_response()
    }
}
