pub mod audit_trail;
pub mod memory_acl;

pub use audit_trail::{AuditTrail, AuditTrailError};
pub use memory_acl::MemoryAcl;
