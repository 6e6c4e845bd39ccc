use acl_relay_core::{
    AccessControlOracle, Address, AuditEntry, AuditSink, AuthorizationOracle, Entity, Operation,
    OracleError, Outcome, RelayError, Resource, Role,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Forwards permission mutations to an oracle on behalf of authorized callers.
///
/// The relay keeps no permission state of its own. Each call validates its
/// references, asks the authorization oracle whether the caller holds the
/// matching internal role, and only then forwards the mutation with the relay
/// as sender. The oracle is passed to every call and is the only place state
/// changes.
pub struct PermissionRelay {
    address: Address,
    authorization: Arc<dyn AuthorizationOracle>,
    audit: Option<Arc<dyn AuditSink>>,
}

struct Request {
    operation: Operation,
    caller: Entity,
    subject: Entity,
    resource: Resource,
    role: Role,
}

impl PermissionRelay {
    pub fn new(
        address: Address,
        authorization: Arc<dyn AuthorizationOracle>,
    ) -> Result<Self, RelayError> {
        if !Entity::account(address).is_concrete() {
            return Err(RelayError::InvalidReference(format!(
                "relay address {} is not a concrete account",
                address
            )));
        }
        Ok(Self {
            address,
            authorization,
            audit: None,
        })
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The relay as a sender of oracle calls.
    pub fn entity(&self) -> Entity {
        Entity::Account(self.address)
    }

    /// The relay as the resource its internal roles are stored on.
    pub fn resource(&self) -> Resource {
        Resource::new(self.address)
    }

    /// Adds `entity` to the grantees of (`resource`, `role`). Requires `GRANT_ROLE`.
    pub fn grant_permission(
        &self,
        oracle: &dyn AccessControlOracle,
        caller: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), RelayError> {
        let request = Request {
            operation: Operation::Grant,
            caller,
            subject: entity,
            resource,
            role,
        };
        self.run(oracle, &request, || {
            oracle.grant_permission(self.entity(), entity, resource, role)
        })
    }

    /// Removes `entity` from the grantees of (`resource`, `role`). Requires `REMOVE_ROLE`.
    pub fn revoke_permission(
        &self,
        oracle: &dyn AccessControlOracle,
        caller: Entity,
        entity: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), RelayError> {
        let request = Request {
            operation: Operation::Revoke,
            caller,
            subject: entity,
            resource,
            role,
        };
        self.run(oracle, &request, || {
            oracle.revoke_permission(self.entity(), entity, resource, role)
        })
    }

    /// Hands management of (`resource`, `role`) to `new_manager`. Requires
    /// `SET_MANAGER_ROLE`.
    ///
    /// Once the relay is no longer the manager, forwarded grants and revokes
    /// for that entry fail with [`RelayError::ForwardingFailed`].
    pub fn set_permission_manager(
        &self,
        oracle: &dyn AccessControlOracle,
        caller: Entity,
        new_manager: Entity,
        resource: Resource,
        role: Role,
    ) -> Result<(), RelayError> {
        let request = Request {
            operation: Operation::SetManager,
            caller,
            subject: new_manager,
            resource,
            role,
        };
        self.run(oracle, &request, || {
            oracle.set_permission_manager(self.entity(), new_manager, resource, role)
        })
    }

    fn run<F>(
        &self,
        oracle: &dyn AccessControlOracle,
        request: &Request,
        forward: F,
    ) -> Result<(), RelayError>
    where
        F: FnOnce() -> Result<(), OracleError>,
    {
        let result = Self::validate(oracle, request)
            .and_then(|()| self.authorize(request))
            .and_then(|()| forward().map_err(RelayError::from));

        self.report(request, &result);
        result
    }

    // Runs before anything touches an oracle, the authorization one included.
    fn validate(oracle: &dyn AccessControlOracle, request: &Request) -> Result<(), RelayError> {
        let oracle_address = oracle.address();
        if !Entity::account(oracle_address).is_concrete() {
            return Err(RelayError::InvalidReference(format!(
                "oracle address {} is not a concrete account",
                oracle_address
            )));
        }

        if !request.caller.is_concrete() {
            return Err(RelayError::InvalidReference(format!(
                "caller {} is not a concrete account",
                request.caller
            )));
        }

        let subject_ok = match request.operation {
            Operation::Grant | Operation::Revoke => {
                request.subject == Entity::Any || request.subject.is_concrete()
            }
            Operation::SetManager => request.subject.is_concrete(),
        };
        if !subject_ok {
            return Err(RelayError::InvalidReference(format!(
                "{} is not a valid {} target",
                request.subject,
                match request.operation {
                    Operation::SetManager => "manager",
                    Operation::Grant | Operation::Revoke => "grantee",
                }
            )));
        }

        if !request.resource.is_valid() {
            return Err(RelayError::InvalidReference(format!(
                "resource {} is the zero address",
                request.resource
            )));
        }

        Ok(())
    }

    fn authorize(&self, request: &Request) -> Result<(), RelayError> {
        let role = request.operation.required_role();
        if self.authorization.is_authorized(request.caller, role) {
            Ok(())
        } else {
            Err(RelayError::Unauthorized {
                caller: request.caller,
                role,
            })
        }
    }

    fn report(&self, request: &Request, result: &Result<(), RelayError>) {
        match result {
            Ok(()) => info!(
                "Forwarded {:?} of {} on {} to {} for caller {}",
                request.operation, request.role, request.resource, request.subject, request.caller
            ),
            Err(e) => warn!(
                "Rejected {:?} on {} requested by {}: {}",
                request.operation, request.resource, request.caller, e
            ),
        }

        let Some(audit) = &self.audit else {
            return;
        };
        audit.record(&AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            relay: self.entity(),
            caller: request.caller,
            operation: request.operation,
            subject: request.subject,
            resource: request.resource,
            role: request.role,
            outcome: Outcome::from(result),
        });
    }
}
