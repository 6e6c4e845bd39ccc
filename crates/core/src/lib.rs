pub mod contracts;
pub mod error;
pub mod roles;
pub mod traits;
pub mod types;

pub use contracts::{AuditEntry, Operation, Outcome, PermissionEntry};
pub use error::{IdentityError, OracleError, RelayError};
pub use roles::InternalRole;
pub use traits::{AccessControlOracle, AuditSink, AuthorizationOracle};
pub use types::{Address, Entity, Resource, Role};
