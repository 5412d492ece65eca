use domain_shared::authentication::{Identity, Role};

pub trait AccessPort {
    fn role_of(&self, identity: Option<&Identity>) -> Option<Role>;
    fn can_access(&self, identity: Option<&Identity>, route: &str) -> bool;
}
