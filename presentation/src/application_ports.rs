use application_ports::access::AccessPort;
use application_ports::scholarship_application::ScholarshipApplicationPort;
use std::sync::Arc;

pub trait Locator {
    fn get_access_port(&self) -> Arc<dyn AccessPort + Send + Sync>;
    fn get_scholarship_application_port(
        &self,
    ) -> Arc<dyn ScholarshipApplicationPort + Send + Sync>;
}
