//! Relay forwarding grant, revoke and manager-transfer requests to an
//! access-control oracle after checking the caller against its own roles.

pub mod relay;

pub use acl_relay_core::{
    AccessControlOracle, Address, AuditEntry, AuditSink, AuthorizationOracle, Entity,
    InternalRole, Operation, OracleError, Outcome, RelayError, Resource, Role,
};
pub use relay::PermissionRelay;
