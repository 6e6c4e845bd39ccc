use crate::role_table::RoleTable;
use acl_relay_core::{Entity, InternalRole, OracleError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid policy: {0}")]
    Validation(String),
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Which entities hold each of the relay's internal roles.
///
/// ```yaml
/// roles:
///   GRANT_ROLE: ["0x00000000000000000000000000000000000000aa"]
///   REMOVE_ROLE: [any]
///   SET_MANAGER_ROLE: []
/// ```
///
/// Roles missing from the map are held by nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPolicy {
    #[serde(default)]
    pub roles: BTreeMap<InternalRole, Vec<Entity>>,
}

impl RelayPolicy {
    /// Every internal role granted to `Entity::Any`.
    pub fn permissive() -> Self {
        let roles = InternalRole::ALL
            .iter()
            .map(|role| (*role, vec![Entity::Any]))
            .collect();
        Self { roles }
    }

    pub fn with_grantee(mut self, role: InternalRole, entity: Entity) -> Self {
        let grantees = self.roles.entry(role).or_default();
        if !grantees.contains(&entity) {
            grantees.push(entity);
        }
        self
    }

    pub fn grantees(&self, role: InternalRole) -> &[Entity] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        for (role, grantees) in &self.roles {
            if grantees.len() > 1 && grantees.contains(&Entity::None) {
                return Err(PolicyError::Validation(format!(
                    "{} lists `none` alongside other grantees",
                    role
                )));
            }
            if let Some(zero) = grantees
                .iter()
                .find(|e| matches!(e, Entity::Account(a) if a.is_zero()))
            {
                return Err(PolicyError::Validation(format!(
                    "{} lists zero account {}",
                    role, zero
                )));
            }
        }
        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, PolicyError> {
        let policy: RelayPolicy = serde_yaml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let content = tokio::fs::read_to_string(&path).await?;
        Self::from_yaml_str(&content)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PolicyError> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub fn role_table(&self) -> Result<RoleTable, PolicyError> {
        self.validate()?;
        Ok(RoleTable::from_policy(self))
    }
}
