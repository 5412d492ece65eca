use domain_shared::authentication::{Email, Identity, Role};
use tracing::instrument;

pub const ADMIN_ROUTE_PREFIX: &str = "/admin";
pub const STUDENT_ROUTE_PREFIX: &str = "/student";

/// Derives a role from an identity on every call. Nothing is cached, so
/// changing the admin email takes effect immediately.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    admin_email: Email,
}

impl RoleResolver {
    pub fn new(admin_email: Email) -> Self {
        Self { admin_email }
    }

    #[instrument(level = "trace", skip(self, identity))]
    pub fn is_admin(&self, identity: Option<&Identity>) -> bool {
        identity
            .and_then(Identity::email)
            .is_some_and(|email| email == self.admin_email.0)
    }

    #[instrument(level = "trace", skip(self, identity))]
    pub fn is_student(&self, identity: Option<&Identity>) -> bool {
        identity
            .and_then(Identity::email)
            .is_some_and(|email| email != self.admin_email.0)
    }

    #[instrument(level = "trace", skip(self, identity))]
    pub fn role_of(&self, identity: Option<&Identity>) -> Option<Role> {
        if self.is_admin(identity) {
            Some(Role::Admin)
        } else if self.is_student(identity) {
            Some(Role::Student)
        } else {
            None
        }
    }

    #[instrument(level = "trace", skip(self, identity))]
    pub fn can_access(&self, identity: Option<&Identity>, route: &str) -> bool {
        if identity.is_none() {
            return false;
        }

        if route.starts_with(ADMIN_ROUTE_PREFIX) {
            self.is_admin(identity)
        } else if route.starts_with(STUDENT_ROUTE_PREFIX) {
            self.is_student(identity)
        } else {
            true
        }
    }
}
