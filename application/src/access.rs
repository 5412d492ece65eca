use application_ports::access::AccessPort;
use domain::roles::RoleResolver;
use domain_shared::authentication::{Identity, Role};
use tracing::instrument;

pub struct AccessService {
    role_resolver: RoleResolver,
}

impl AccessService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(role_resolver: RoleResolver) -> Self {
        Self { role_resolver }
    }
}

impl AccessPort for AccessService {
    #[instrument(level = "debug", skip(self, identity))]
    fn role_of(&self, identity: Option<&Identity>) -> Option<Role> {
        self.role_resolver.role_of(identity)
    }

    #[instrument(level = "debug", skip(self, identity))]
    fn can_access(&self, identity: Option<&Identity>, route: &str) -> bool {
        self.role_resolver.can_access(identity, route)
    }
}
