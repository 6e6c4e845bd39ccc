//! Identity types shared by the relay, its policy and the oracles it talks to.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// 20-byte account or contract identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);
    pub const MAX: Address = Address([0xff; 20]);

    /// Builds an address whose last eight bytes hold `value` big-endian.
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        decode_hex(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

fn decode_hex(s: &str, out: &mut [u8]) -> Result<(), IdentityError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != out.len() * 2 {
        return Err(IdentityError::InvalidLength {
            expected: out.len() * 2,
            found: digits.len(),
        });
    }
    hex::decode_to_slice(digits, out).map_err(|e| IdentityError::InvalidHex(e.to_string()))
}

/// A principal: caller, grantee or manager.
///
/// `Any` and `None` are the two sentinels used when wiring permissions:
/// a grant to `Any` permits every concrete account, while `None` is a
/// grantee no query ever matches. They serialize as `"any"` and `"none"`;
/// accounts serialize as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Entity {
    Any,
    None,
    Account(Address),
}

impl Entity {
    /// Wraps an address, mapping the all-`ff` and all-zero addresses to
    /// their sentinel variants.
    pub fn account(address: Address) -> Self {
        if address == Address::MAX {
            Entity::Any
        } else if address.is_zero() {
            Entity::None
        } else {
            Entity::Account(address)
        }
    }

    /// True for an account outside the two sentinel addresses, the only kind
    /// of entity that can act.
    pub fn is_concrete(&self) -> bool {
        matches!(self, Entity::Account(address) if !address.is_zero() && *address != Address::MAX)
    }

    /// Whether a grant held by `self` applies to `subject`.
    pub fn covers(&self, subject: Entity) -> bool {
        if !subject.is_concrete() {
            return false;
        }
        match self {
            Entity::Any => true,
            Entity::None => false,
            Entity::Account(_) => *self == subject,
        }
    }
}

impl From<Address> for Entity {
    fn from(address: Address) -> Self {
        Entity::account(address)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Any => f.write_str("any"),
            Entity::None => f.write_str("none"),
            Entity::Account(address) => address.fmt(f),
        }
    }
}

impl FromStr for Entity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "*" => Ok(Entity::Any),
            "none" => Ok(Entity::None),
            other => other.parse::<Address>().map(Entity::account),
        }
    }
}

impl TryFrom<String> for Entity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Entity> for String {
    fn from(entity: Entity) -> Self {
        entity.to_string()
    }
}

/// An addressable target whose behavior is gated by permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(Address);

impl Resource {
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_zero()
    }
}

impl From<Address> for Resource {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Resource {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl TryFrom<String> for Resource {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.to_string()
    }
}

/// Identifier of one action kind on a resource.
///
/// Role ids are the SHA-256 digest of the role name, so the same name
/// yields the same id in every process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role([u8; 32]);

impl Role {
    pub fn named(name: &str) -> Self {
        Self(Sha256::digest(name.as_bytes()).into())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role({})", self)
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        decode_hex(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Role {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}
