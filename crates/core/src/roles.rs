use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles gating the relay's own operations.
///
/// Each maps to a [`Role`] derived from its name, so the relay's gating can be
/// stored in an oracle as ordinary entries with the relay as the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InternalRole {
    #[serde(rename = "GRANT_ROLE")]
    Grant,
    #[serde(rename = "REMOVE_ROLE")]
    Remove,
    #[serde(rename = "SET_MANAGER_ROLE")]
    SetManager,
}

impl InternalRole {
    pub const ALL: [InternalRole; 3] = [
        InternalRole::Grant,
        InternalRole::Remove,
        InternalRole::SetManager,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            InternalRole::Grant => "GRANT_ROLE",
            InternalRole::Remove => "REMOVE_ROLE",
            InternalRole::SetManager => "SET_MANAGER_ROLE",
        }
    }

    pub fn role(self) -> Role {
        Role::named(self.name())
    }
}

impl fmt::Display for InternalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
