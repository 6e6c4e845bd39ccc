pub mod bootstrap;
pub mod oracle_auth;
pub mod policy;
pub mod role_table;

pub use bootstrap::install_internal_roles;
pub use oracle_auth::OracleAuthorization;
pub use policy::{PolicyError, RelayPolicy};
pub use role_table::RoleTable;
