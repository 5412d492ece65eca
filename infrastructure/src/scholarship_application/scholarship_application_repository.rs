use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::scholarship_application::{
    ScholarshipApplication, ScholarshipApplicationRepository,
    ScholarshipApplicationRepositoryError,
};
use domain_shared::authentication::Email;
use domain_shared::scholarship::TrackingCode;
use sqlx::{query, query_as, PgPool};
use tracing::{instrument, warn};

type ScholarshipApplicationRow = (String, String, String, NaiveDateTime);

pub struct PostgresScholarshipApplicationRepository {
    pool: PgPool,
}

impl PostgresScholarshipApplicationRepository {
    #[instrument(level = "trace", skip_all)]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScholarshipApplicationRepository for PostgresScholarshipApplicationRepository {
    #[instrument(level = "debug", err, skip_all)]
    async fn save(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), ScholarshipApplicationRepositoryError> {
        query(
            "INSERT INTO scholarship_applications (tracking_code, scholarship_name, applicant_email, submitted_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&application.tracking_code.0)
        .bind(&application.scholarship_name)
        .bind(&application.applicant_email.0)
        .bind(application.submitted_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            warn!(error = ?err, "Failed to save scholarship application");
            ScholarshipApplicationRepositoryError::ServiceUnavailable
        })?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip_all)]
    async fn find_all(
        &self,
    ) -> Result<Vec<ScholarshipApplication>, ScholarshipApplicationRepositoryError> {
        let rows: Vec<ScholarshipApplicationRow> = query_as(
            "SELECT tracking_code, scholarship_name, applicant_email, submitted_at FROM scholarship_applications ORDER BY submitted_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            warn!(error = ?err, "Failed to fetch scholarship applications");
            ScholarshipApplicationRepositoryError::ServiceUnavailable
        })?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn find_by_tracking_code(
        &self,
        tracking_code: &TrackingCode,
    ) -> Result<Vec<ScholarshipApplication>, ScholarshipApplicationRepositoryError> {
        let rows: Vec<ScholarshipApplicationRow> = query_as(
            "SELECT tracking_code, scholarship_name, applicant_email, submitted_at FROM scholarship_applications WHERE tracking_code = $1 ORDER BY submitted_at, id",
        )
        .bind(&tracking_code.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            warn!(error = ?err, "Failed to fetch scholarship application");
            ScholarshipApplicationRepositoryError::ServiceUnavailable
        })?;

        Ok(rows.into_iter().map(from_row).collect())
    }
}

fn from_row(
    (tracking_code, scholarship_name, applicant_email, submitted_at): ScholarshipApplicationRow,
) -> ScholarshipApplication {
    ScholarshipApplication {
        tracking_code: TrackingCode(tracking_code),
        scholarship_name,
        applicant_email: Email(applicant_email),
        submitted_at: submitted_at.and_utc(),
    }
}
