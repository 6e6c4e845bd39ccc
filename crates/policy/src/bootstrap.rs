use crate::policy::{PolicyError, RelayPolicy};
use acl_relay_core::{AccessControlOracle, Entity, InternalRole, Resource};
use tracing::info;

/// Writes `policy` into `oracle` as entries on the relay's own resource.
///
/// `manager` must be allowed to create entries in the oracle; it becomes the
/// manager of all three internal-role entries. A role with no grantees is
/// created with `Entity::None` so the entry exists but nobody holds it.
/// An invalid policy is rejected before the oracle is touched.
pub fn install_internal_roles(
    oracle: &dyn AccessControlOracle,
    manager: Entity,
    relay: Resource,
    policy: &RelayPolicy,
) -> Result<(), PolicyError> {
    policy.validate()?;

    for role in InternalRole::ALL {
        let grantees = policy.grantees(role);
        let (first, rest) = match grantees.split_first() {
            Some((first, rest)) => (*first, rest),
            None => (Entity::None, &[][..]),
        };

        oracle.create_permission(manager, first, relay, role.role(), manager)?;
        for grantee in rest {
            oracle.grant_permission(manager, *grantee, relay, role.role())?;
        }
        info!("Installed {} on {} for {} grantee(s)", role, relay, grantees.len());
    }
    Ok(())
}
