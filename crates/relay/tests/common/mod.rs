#![allow(dead_code)]

use acl_relay::{
    AccessControlOracle, Address, AuditEntry, AuditSink, AuthorizationOracle, Entity,
    PermissionRelay, Resource, Role,
};
use acl_relay_infra::MemoryAcl;
use acl_relay_policy::{install_internal_roles, OracleAuthorization, RelayPolicy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn account(n: u64) -> Entity {
    Entity::account(Address::from_low_u64(n))
}

/// A resource with one protected action that bumps a counter.
pub struct ExecutionTarget {
    resource: Resource,
    counter: AtomicU64,
}

impl ExecutionTarget {
    pub fn new(address: Address) -> Self {
        Self {
            resource: Resource::new(address),
            counter: AtomicU64::new(0),
        }
    }

    pub fn role() -> Role {
        Role::named("EXECUTION_ROLE")
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn execute(&self, acl: &dyn AccessControlOracle, caller: Entity) -> Result<u64, String> {
        if !acl.has_permission(caller, self.resource, Self::role()) {
            return Err(format!("{} may not execute {}", caller, self.resource));
        }
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingSink {
    fn record(&self, entry: &AuditEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// An ACL owned by `root`, a relay whose internal roles live in that ACL,
/// and an execution target whose role is managed by the relay.
pub struct Deployment {
    pub acl: Arc<MemoryAcl>,
    pub root: Entity,
    pub relay: PermissionRelay,
    pub target: ExecutionTarget,
    pub audit: Arc<RecordingSink>,
}

impl Deployment {
    pub fn self_hosted(policy: &RelayPolicy) -> Self {
        init_tracing();
        let root = account(1);
        let acl = Arc::new(MemoryAcl::new(Address::from_low_u64(0xac1), root));
        let relay_address = Address::from_low_u64(0x5e1a);

        install_internal_roles(acl.as_ref(), root, Resource::new(relay_address), policy).unwrap();
        let authorization = Arc::new(OracleAuthorization::new(
            acl.clone(),
            Resource::new(relay_address),
        ));
        Self::assemble(acl, root, relay_address, authorization)
    }

    pub fn with_authorization(authorization: Arc<dyn AuthorizationOracle>) -> Self {
        init_tracing();
        let root = account(1);
        let acl = Arc::new(MemoryAcl::new(Address::from_low_u64(0xac1), root));
        Self::assemble(acl, root, Address::from_low_u64(0x5e1a), authorization)
    }

    fn assemble(
        acl: Arc<MemoryAcl>,
        root: Entity,
        relay_address: Address,
        authorization: Arc<dyn AuthorizationOracle>,
    ) -> Self {
        let audit = Arc::new(RecordingSink::default());
        let relay = PermissionRelay::new(relay_address, authorization)
            .unwrap()
            .with_audit(audit.clone());

        let target = ExecutionTarget::new(Address::from_low_u64(0x7a));
        acl.create_permission(
            root,
            Entity::None,
            target.resource(),
            ExecutionTarget::role(),
            relay.entity(),
        )
        .unwrap();

        Self {
            acl,
            root,
            relay,
            target,
            audit,
        }
    }

    pub fn oracle(&self) -> &dyn AccessControlOracle {
        self.acl.as_ref()
    }

    pub fn grant(&self, caller: Entity, entity: Entity) -> Result<(), acl_relay::RelayError> {
        self.relay.grant_permission(
            self.oracle(),
            caller,
            entity,
            self.target.resource(),
            ExecutionTarget::role(),
        )
    }

    pub fn revoke(&self, caller: Entity, entity: Entity) -> Result<(), acl_relay::RelayError> {
        self.relay.revoke_permission(
            self.oracle(),
            caller,
            entity,
            self.target.resource(),
            ExecutionTarget::role(),
        )
    }

    pub fn set_manager(
        &self,
        caller: Entity,
        new_manager: Entity,
    ) -> Result<(), acl_relay::RelayError> {
        self.relay.set_permission_manager(
            self.oracle(),
            caller,
            new_manager,
            self.target.resource(),
            ExecutionTarget::role(),
        )
    }

    pub fn can_execute(&self, entity: Entity) -> bool {
        self.acl
            .has_permission(entity, self.target.resource(), ExecutionTarget::role())
    }
}
