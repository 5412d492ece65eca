use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_shared::authentication::Identity;
use domain_shared::scholarship::TrackingCode;
use thiserror::Error;

#[async_trait]
pub trait ScholarshipApplicationPort {
    async fn submit_application(
        &self,
        identity: Option<&Identity>,
        scholarship_name: &str,
    ) -> Result<ScholarshipApplicationDto, ScholarshipApplicationError>;
    async fn list_applications(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<ScholarshipApplicationDto>, ScholarshipApplicationError>;
    /// All applications carrying the code. More than one is possible when
    /// codes were issued by the timestamp fallback.
    async fn find_applications(
        &self,
        identity: Option<&Identity>,
        tracking_code: &str,
    ) -> Result<Vec<ScholarshipApplicationDto>, ScholarshipApplicationError>;
}

#[derive(Debug, Error)]
pub enum ScholarshipApplicationError {
    #[error("Not allowed for the current identity")]
    Forbidden,
    #[error("Scholarship name must not be blank")]
    InvalidScholarshipName,
    #[error("Scholarship application not found")]
    NotFound,
    #[error("Service is temporarily unavailable")]
    TemporaryUnavailable,
}

#[derive(Debug, Clone)]
pub struct ScholarshipApplicationDto {
    pub tracking_code: TrackingCode,
    pub scholarship_name: String,
    pub applicant_email: String,
    pub submitted_at: DateTime<Utc>,
}
