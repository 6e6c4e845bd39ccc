#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use acl_relay::{AccessControlOracle, InternalRole, Outcome, RelayError};
use acl_relay_policy::RelayPolicy;
use common::{account, Deployment};
use std::sync::Arc;

fn restricted(granter: u64, remover: u64) -> RelayPolicy {
    RelayPolicy::default()
        .with_grantee(InternalRole::Grant, account(granter))
        .with_grantee(InternalRole::Remove, account(remover))
}

#[test]
fn test_grant_without_role_is_unauthorized() {
    let d = Deployment::self_hosted(&restricted(10, 11));
    let outsider = account(99);

    let result = d.grant(outsider, outsider);

    assert_eq!(
        result,
        Err(RelayError::Unauthorized {
            caller: outsider,
            role: InternalRole::Grant
        })
    );
    assert!(!d.can_execute(outsider));
    assert!(d.target.execute(d.oracle(), outsider).is_err());
}

#[test]
fn test_revoke_without_role_keeps_grant() {
    let d = Deployment::self_hosted(&restricted(10, 11));
    let grantee = account(50);
    d.grant(account(10), grantee).unwrap();

    // Holding GRANT_ROLE does not allow revoking.
    let result = d.revoke(account(10), grantee);

    assert_eq!(
        result,
        Err(RelayError::Unauthorized {
            caller: account(10),
            role: InternalRole::Remove
        })
    );
    assert!(d.can_execute(grantee));
}

#[test]
fn test_separate_granter_and_remover() {
    let d = Deployment::self_hosted(&restricted(10, 11));
    let grantee = account(50);

    d.grant(account(10), grantee).unwrap();
    assert!(d.can_execute(grantee));

    d.revoke(account(11), grantee).unwrap();
    assert!(!d.can_execute(grantee));
}

#[test]
fn test_set_manager_requires_role() {
    let d = Deployment::self_hosted(&restricted(10, 11));

    let result = d.set_manager(account(10), account(12));

    assert!(matches!(
        result,
        Err(RelayError::Unauthorized {
            role: InternalRole::SetManager,
            ..
        })
    ));
    assert_eq!(
        d.acl
            .permission_manager(d.target.resource(), common::ExecutionTarget::role()),
        Some(d.relay.entity())
    );
}

#[test]
fn test_default_policy_denies_everyone() {
    let d = Deployment::self_hosted(&RelayPolicy::default());

    assert!(matches!(
        d.grant(d.root, d.root),
        Err(RelayError::Unauthorized { .. })
    ));
    assert!(matches!(
        d.revoke(d.root, d.root),
        Err(RelayError::Unauthorized { .. })
    ));
    assert!(matches!(
        d.set_manager(d.root, d.root),
        Err(RelayError::Unauthorized { .. })
    ));
}

#[test]
fn test_revoking_internal_role_applies_immediately() {
    let d = Deployment::self_hosted(&restricted(10, 11));
    d.grant(account(10), account(50)).unwrap();

    d.acl
        .revoke_permission(
            d.root,
            account(10),
            d.relay.resource(),
            InternalRole::Grant.role(),
        )
        .unwrap();

    assert!(matches!(
        d.grant(account(10), account(51)),
        Err(RelayError::Unauthorized { .. })
    ));
    assert!(!d.can_execute(account(51)));
}

#[test]
fn test_local_role_table_authorization() {
    let table = restricted(10, 11).role_table().unwrap();
    let d = Deployment::with_authorization(Arc::new(table));

    d.grant(account(10), account(50)).unwrap();
    assert!(matches!(
        d.grant(account(11), account(51)),
        Err(RelayError::Unauthorized { .. })
    ));
    assert!(d.can_execute(account(50)));
    assert!(!d.can_execute(account(51)));
}

#[test]
fn test_denial_is_audited() {
    let d = Deployment::self_hosted(&restricted(10, 11));

    let _ = d.grant(account(99), account(99));

    let entries = d.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].caller, account(99));
    assert_eq!(entries[0].outcome, Outcome::Unauthorized);
}
