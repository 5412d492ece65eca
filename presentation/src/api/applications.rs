use crate::api::error::ApiError;
use crate::api::identity::identity_from_headers;
use crate::application_ports::Locator;
use application_ports::scholarship_application::ScholarshipApplicationDto;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SubmitApplicationRequest {
    pub scholarship_name: String,
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub tracking_code: String,
    pub scholarship_name: String,
    pub applicant_email: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<ScholarshipApplicationDto> for ApplicationResponse {
    fn from(dto: ScholarshipApplicationDto) -> Self {
        Self {
            tracking_code: dto.tracking_code.0,
            scholarship_name: dto.scholarship_name,
            applicant_email: dto.applicant_email,
            submitted_at: dto.submitted_at,
        }
    }
}

pub async fn submit_handler<L: Locator>(
    State(locator): State<L>,
    headers: HeaderMap,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let identity = identity_from_headers(&headers);
    let application = locator
        .get_scholarship_application_port()
        .submit_application(identity.as_ref(), &request.scholarship_name)
        .await?;

    Ok((StatusCode::CREATED, Json(application.into())))
}

pub async fn list_handler<L: Locator>(
    State(locator): State<L>,
    headers: HeaderMap,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let identity = identity_from_headers(&headers);
    let applications = locator
        .get_scholarship_application_port()
        .list_applications(identity.as_ref())
        .await?;

    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

pub async fn find_handler<L: Locator>(
    State(locator): State<L>,
    headers: HeaderMap,
    Path(tracking_code): Path<String>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let identity = identity_from_headers(&headers);
    let applications = locator
        .get_scholarship_application_port()
        .find_applications(identity.as_ref(), &tracking_code)
        .await?;

    Ok(Json(applications.into_iter().map(Into::into).collect()))
}
