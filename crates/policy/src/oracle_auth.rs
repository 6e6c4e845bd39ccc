use acl_relay_core::{AccessControlOracle, AuthorizationOracle, Entity, InternalRole, Resource};
use std::sync::Arc;

/// Internal roles stored as entries in an access-control oracle, with the
/// relay itself as the resource.
///
/// Nothing is cached: a change in the oracle applies to the next check.
pub struct OracleAuthorization {
    oracle: Arc<dyn AccessControlOracle>,
    relay: Resource,
}

impl OracleAuthorization {
    pub fn new(oracle: Arc<dyn AccessControlOracle>, relay: Resource) -> Self {
        Self { oracle, relay }
    }
}

impl AuthorizationOracle for OracleAuthorization {
    fn is_authorized(&self, caller: Entity, role: InternalRole) -> bool {
        self.oracle.has_permission(caller, self.relay, role.role())
    }
}
