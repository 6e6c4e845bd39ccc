//! In-process access-control oracle.

use acl_relay_core::{
    AccessControlOracle, Address, Entity, OracleError, PermissionEntry, Resource, Role,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Permission entries held in memory behind one lock.
///
/// Only `root` may create entries; afterwards each entry is mutated by its
/// manager alone. The write lock is the serialization point for mutations.
pub struct MemoryAcl {
    address: Address,
    root: Entity,
    entries: RwLock<HashMap<(Resource, Role), PermissionEntry>>,
}

impl MemoryAcl {
    pub fn new(address: Address, root: Entity) -> Self {
        Self {
            address,
            root,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of one entry.
    pub fn entry(&self, resource: Resource, role: Role) -> Option<PermissionEntry> {
        self.entries.read().get(&(resource, role)).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn mutate<F>(
        &self,
        sender: Entity,
        resource: Resource,
        role: Role,
        apply: F,
    ) -> Result<(), OracleError>
    where
        F: FnOnce(&mut PermissionEntry),
    {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(&(resource, role))
            .ok_or(OracleError::EntryNotFound { resource, role })?;

        if entry.manager != sender || !sender.is_concrete() {
            return Err(OracleError::NotManager {
                sender,
                resource,
                role,
            });
        }

        apply(entry);
        Ok(())
    }
}

impl AccessControlOracle for MemoryAcl {
    fn address(&self) -> Address {
        self.address
    }

    fn create_permission(
        &self,
        sender: Entity,
        grantee: Entity,
        resource: Resource,
        role: Role,
        manager: Entity,
    ) -> Result<(), OracleError> {
        if sender != self.root || !sender.is_concrete() {
            return Err(OracleError::NotCreator(sender));
        }
        if !manager.is_concrete() {
            return Err(OracleError::InvalidManager(manager));
        }

        let mut entries = self.entries.write();
        if entries.contains_key(&(resource, role)) {
            return Err(OracleError::EntryExists { resource, role });
        }
        entries.insert((resource, role), PermissionEntry::new(grantee, manager));
        debug!("Created permission {} on {} for {}", role, resource, grantee);
        Ok(())
    }

    fn grant_permission(
        &self,
        sender: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError> {
        self.mutate(sender, resource, role, |entry| {
            if entity != Entity::None {
                entry.grantees.insert(entity);
            }
        })
    }

    fn revoke_permission(
        &self,
        sender: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError> {
        self.mutate(sender, resource, role, |entry| {
            entry.grantees.remove(&entity);
        })
    }

    fn set_permission_manager(
        &self,
        sender: Entity,
        new_manager: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), OracleError> {
        if !new_manager.is_concrete() {
            return Err(OracleError::InvalidManager(new_manager));
        }
        self.mutate(sender, resource, role, |entry| {
            entry.manager = new_manager;
        })
    }

    fn has_permission(&self, entity: Entity, resource: Resource, role: Role) -> bool {
        self.entries
            .read()
            .get(&(resource, role))
            .is_some_and(|entry| entry.permits(entity))
    }

    fn permission_manager(&self, resource: Resource, role: Role) -> Option<Entity> {
        self.entries
            .read()
            .get(&(resource, role))
            .map(|entry| entry.manager)
    }
}
