use crate::contracts::AuditEntry;
use crate::error::OracleError;
use crate::roles::InternalRole;
use crate::types::{Address, Entity, Resource, Role};

/// Authoritative store of permission entries.
///
/// Every mutation names its `sender`, the entity on whose authority the call
/// is made. Implementations serialize mutations of the same entry.
pub trait AccessControlOracle: Send + Sync {
    /// Identity of the oracle itself.
    fn address(&self) -> Address;

    /// Creates the entry for (`resource`, `role`). Bootstrap only.
    fn create_permission(
        &self,
        sender: Entity,
        grantee: Entity,
        resource: Resource,
        role: Role,
        manager: Entity,
    ) -> Result<(), OracleError>;

    /// Adds `entity` to the grantees. Granting twice is not an error.
    fn grant_permission(
        &self,
        sender: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError>;

    /// Removes `entity` from the grantees. Revoking an absent grantee is not an error.
    fn revoke_permission(
        &self,
        sender: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError>;

    fn set_permission_manager(
        &self,
        sender: Entity,
        new_manager: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError>;

    fn has_permission(&self, entity: Entity, resource: Resource, role: Role) -> bool;

    fn permission_manager(&self, resource: Resource, role: Role) -> Option<Entity>;
}

/// Decides whether a caller may invoke a relay operation.
pub trait AuthorizationOracle: Send + Sync {
    fn is_authorized(&self, caller: Entity, role: InternalRole) -> bool;
}

/// Receives one record per relay operation. Must never fail the operation.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}
