use crate::roles::InternalRole;
use crate::types::{Entity, Resource, Role};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} hex digits, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// Rejections reported by an access-control oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Permission entry not found: {role} on {resource}")]
    EntryNotFound { resource: Resource, role: Role },

    #[error("Permission entry already exists: {role} on {resource}")]
    EntryExists { resource: Resource, role: Role },

    #[error("{sender} is not the manager of {role} on {resource}")]
    NotManager {
        sender: Entity,
        resource: Resource,
        role: Role,
    },

    #[error("{0} may not create permissions")]
    NotCreator(Entity),

    #[error("Invalid permission manager: {0}")]
    InvalidManager(Entity),

    #[error("Oracle rejected call: {0}")]
    Rejected(String),
}

/// Errors surfaced by relay operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Unauthorized: {caller} lacks {role}")]
    Unauthorized { caller: Entity, role: InternalRole },

    #[error("Forwarding failed: {0}")]
    ForwardingFailed(#[from] OracleError),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}
