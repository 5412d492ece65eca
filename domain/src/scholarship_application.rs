use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_shared::authentication::Email;
use domain_shared::scholarship::TrackingCode;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipApplication {
    pub tracking_code: TrackingCode,
    pub scholarship_name: String,
    pub applicant_email: Email,
    pub submitted_at: DateTime<Utc>,
}

#[instrument(level = "trace")]
pub fn create_scholarship_application(
    tracking_code: TrackingCode,
    scholarship_name: String,
    applicant_email: Email,
) -> ScholarshipApplication {
    ScholarshipApplication {
        tracking_code,
        scholarship_name,
        applicant_email,
        submitted_at: Utc::now(),
    }
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ScholarshipApplicationRepository {
    async fn save(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), ScholarshipApplicationRepositoryError>;
    async fn find_all(
        &self,
    ) -> Result<Vec<ScholarshipApplication>, ScholarshipApplicationRepositoryError>;
    /// Fallback codes may repeat, so every application carrying the code is
    /// returned, oldest submission first.
    async fn find_by_tracking_code(
        &self,
        tracking_code: &TrackingCode,
    ) -> Result<Vec<ScholarshipApplication>, ScholarshipApplicationRepositoryError>;
}

#[derive(Debug, Error)]
pub enum ScholarshipApplicationRepositoryError {
    #[error("Service is temporarily unavailable")]
    ServiceUnavailable,
}
