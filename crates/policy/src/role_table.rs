use crate::policy::RelayPolicy;
use acl_relay_core::{AuthorizationOracle, Entity, InternalRole};
use std::collections::{HashMap, HashSet};

/// Local, immutable internal-role assignments.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    holders: HashMap<InternalRole, HashSet<Entity>>,
}

impl RoleTable {
    pub(crate) fn from_policy(policy: &RelayPolicy) -> Self {
        let holders = policy
            .roles
            .iter()
            .map(|(role, grantees)| (*role, grantees.iter().copied().collect()))
            .collect();
        Self { holders }
    }

    pub fn holders(&self, role: InternalRole) -> impl Iterator<Item = &Entity> {
        self.holders.get(&role).into_iter().flatten()
    }
}

impl AuthorizationOracle for RoleTable {
    fn is_authorized(&self, caller: Entity, role: InternalRole) -> bool {
        self.holders(role).any(|holder| holder.covers(caller))
    }
}
