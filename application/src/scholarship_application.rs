use application_ports::scholarship_application::{
    ScholarshipApplicationDto, ScholarshipApplicationError, ScholarshipApplicationPort,
};
use application_ports::tracking_code::TrackingCodePort;
use async_trait::async_trait;
use domain::roles::RoleResolver;
use domain::scholarship_application::{
    create_scholarship_application, ScholarshipApplication, ScholarshipApplicationRepository,
    ScholarshipApplicationRepositoryError,
};
use domain_shared::authentication::{Email, Identity};
use domain_shared::scholarship::TrackingCode;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub struct ScholarshipApplicationService {
    role_resolver: RoleResolver,
    tracking_code_port: Arc<dyn TrackingCodePort + Send + Sync>,
    scholarship_application_repository: Arc<dyn ScholarshipApplicationRepository + Send + Sync>,
}

impl ScholarshipApplicationService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        role_resolver: RoleResolver,
        tracking_code_port: Arc<dyn TrackingCodePort + Send + Sync>,
        scholarship_application_repository: Arc<
            dyn ScholarshipApplicationRepository + Send + Sync,
        >,
    ) -> Self {
        Self {
            role_resolver,
            tracking_code_port,
            scholarship_application_repository,
        }
    }

    fn require_admin(&self, identity: Option<&Identity>) -> Result<(), ScholarshipApplicationError> {
        if self.role_resolver.is_admin(identity) {
            Ok(())
        } else {
            warn!(
                role = self.role_name(identity),
                "Non-admin identity tried to read applications",
            );
            Err(ScholarshipApplicationError::Forbidden)
        }
    }

    fn role_name(&self, identity: Option<&Identity>) -> &'static str {
        self.role_resolver
            .role_of(identity)
            .map_or("unauthenticated", |role| role.as_str())
    }
}

#[async_trait]
impl ScholarshipApplicationPort for ScholarshipApplicationService {
    #[instrument(level = "info", skip(self, identity))]
    async fn submit_application(
        &self,
        identity: Option<&Identity>,
        scholarship_name: &str,
    ) -> Result<ScholarshipApplicationDto, ScholarshipApplicationError> {
        let applicant_email = match identity.and_then(Identity::email) {
            Some(email) if self.role_resolver.is_student(identity) => Email(email.to_string()),
            _ => {
                warn!(
                    role = self.role_name(identity),
                    "Non-student identity tried to submit an application",
                );
                return Err(ScholarshipApplicationError::Forbidden);
            }
        };

        let scholarship_name = scholarship_name.trim();
        if scholarship_name.is_empty() {
            return Err(ScholarshipApplicationError::InvalidScholarshipName);
        }

        let tracking_code = self
            .tracking_code_port
            .allocate_code(scholarship_name)
            .await;

        let application = create_scholarship_application(
            tracking_code,
            scholarship_name.to_string(),
            applicant_email,
        );

        self.scholarship_application_repository
            .save(&application)
            .await
            .map_err(map_repo_err)?;

        info!(
            tracking_code = application.tracking_code.0,
            "Scholarship application submitted",
        );

        Ok(to_dto(application))
    }

    #[instrument(level = "info", skip(self, identity))]
    async fn list_applications(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<ScholarshipApplicationDto>, ScholarshipApplicationError> {
        self.require_admin(identity)?;

        let applications = self
            .scholarship_application_repository
            .find_all()
            .await
            .map_err(map_repo_err)?;

        Ok(applications.into_iter().map(to_dto).collect())
    }

    #[instrument(level = "info", skip(self, identity))]
    async fn find_applications(
        &self,
        identity: Option<&Identity>,
        tracking_code: &str,
    ) -> Result<Vec<ScholarshipApplicationDto>, ScholarshipApplicationError> {
        self.require_admin(identity)?;

        let tracking_code =
            TrackingCode::parse(tracking_code).ok_or(ScholarshipApplicationError::NotFound)?;

        let applications = self
            .scholarship_application_repository
            .find_by_tracking_code(&tracking_code)
            .await
            .map_err(map_repo_err)?;

        if applications.is_empty() {
            return Err(ScholarshipApplicationError::NotFound);
        }

        Ok(applications.into_iter().map(to_dto).collect())
    }
}

fn to_dto(application: ScholarshipApplication) -> ScholarshipApplicationDto {
    ScholarshipApplicationDto {
        tracking_code: application.tracking_code,
        scholarship_name: application.scholarship_name,
        applicant_email: application.applicant_email.0,
        submitted_at: application.submitted_at,
    }
}

#[instrument(level = "trace", skip_all)]
fn map_repo_err(err: ScholarshipApplicationRepositoryError) -> ScholarshipApplicationError {
    match err {
        ScholarshipApplicationRepositoryError::ServiceUnavailable => {
            error!("ScholarshipApplicationRepositoryError::ServiceUnavailable");
            ScholarshipApplicationError::TemporaryUnavailable
        }
    }
}
