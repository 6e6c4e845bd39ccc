use crate::error::RelayError;
use crate::roles::InternalRole;
use crate::types::{Entity, Resource, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Grantees and manager of one (resource, role) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub grantees: BTreeSet<Entity>,
    pub manager: Entity,
}

impl PermissionEntry {
    /// A `None` grantee yields an entry nobody holds.
    pub fn new(grantee: Entity, manager: Entity) -> Self {
        let mut grantees = BTreeSet::new();
        if grantee != Entity::None {
            grantees.insert(grantee);
        }
        Self { grantees, manager }
    }

    pub fn permits(&self, subject: Entity) -> bool {
        self.grantees.iter().any(|grantee| grantee.covers(subject))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Grant,
    Revoke,
    SetManager,
}

impl Operation {
    pub fn required_role(self) -> InternalRole {
        match self {
            Operation::Grant => InternalRole::Grant,
            Operation::Revoke => InternalRole::Remove,
            Operation::SetManager => InternalRole::SetManager,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Forwarded,
    Unauthorized,
    ForwardingFailed(String),
    InvalidReference(String),
}

impl Outcome {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Outcome::Forwarded)
    }
}

impl From<&Result<(), RelayError>> for Outcome {
    fn from(result: &Result<(), RelayError>) -> Self {
        match result {
            Ok(()) => Outcome::Forwarded,
            Err(RelayError::Unauthorized { .. }) => Outcome::Unauthorized,
            Err(RelayError::ForwardingFailed(e)) => Outcome::ForwardingFailed(e.to_string()),
            Err(RelayError::InvalidReference(reason)) => Outcome::InvalidReference(reason.clone()),
        }
    }
}

/// One relay operation as written to the audit trail.
///
/// `subject` is the grantee for grant/revoke and the new manager for
/// set-manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub relay: Entity,
    pub caller: Entity,
    pub operation: Operation,
    pub subject: Entity,
    pub resource: Resource,
    pub role: Role,
    pub outcome: Outcome,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::types::Address;

    #[test]
    fn test_entry_with_none_grantee_is_empty() {
        let manager = Entity::account(Address::from_low_u64(9));
        let entry = PermissionEntry::new(Entity::None, manager);
        assert!(entry.grantees.is_empty());
        assert!(!entry.permits(manager));
    }

    #[test]
    fn test_wildcard_entry_permits_accounts() {
        let manager = Entity::account(Address::from_low_u64(9));
        let entry = PermissionEntry::new(Entity::Any, manager);
        assert!(entry.permits(Entity::account(Address::from_low_u64(3))));
        assert!(!entry.permits(Entity::None));
    }

    #[test]
    fn test_outcome_from_result() {
        let resource = Resource::new(Address::from_low_u64(5));
        let role = Role::named("ROLE");
        let failed: Result<(), RelayError> =
            Err(OracleError::EntryNotFound { resource, role }.into());

        assert_eq!(Outcome::from(&Ok(())), Outcome::Forwarded);
        assert!(matches!(Outcome::from(&failed), Outcome::ForwardingFailed(_)));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::InvalidReference("zero".into())).unwrap();
        assert_eq!(json["status"], "invalid_reference");
        assert_eq!(json["reason"], "zero");
    }
}
