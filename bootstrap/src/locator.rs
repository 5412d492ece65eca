use application_ports::access::AccessPort;
use application_ports::scholarship_application::ScholarshipApplicationPort;
use presentation::application_ports::Locator;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    access_adapter: Arc<dyn AccessPort + Send + Sync>,
    scholarship_application_adapter: Arc<dyn ScholarshipApplicationPort + Send + Sync>,
}

impl ApplicationPortLocator {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        access_adapter: Arc<dyn AccessPort + Send + Sync>,
        scholarship_application_adapter: Arc<dyn ScholarshipApplicationPort + Send + Sync>,
    ) -> Self {
        Self {
            access_adapter,
            scholarship_application_adapter,
        }
    }
}

impl Locator for ApplicationPortLocator {
    #[instrument(level = "trace", skip(self))]
    fn get_access_port(&self) -> Arc<dyn AccessPort + Send + Sync> {
        self.access_adapter.clone()
    }

    #[instrument(level = "trace", skip(self))]
    fn get_scholarship_application_port(
        &self,
    ) -> Arc<dyn ScholarshipApplicationPort + Send + Sync> {
        self.scholarship_application_adapter.clone()
    }
}
