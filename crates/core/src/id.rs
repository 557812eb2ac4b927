//! Strongly-typed identifiers used across the domain.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a cat.
///
/// Displays and serializes as the canonical lowercase hyphenated UUID string,
/// which is also its storage representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatId(Uuid);

impl CatId {
    /// Create a new random identifier (UUIDv4).
    ///
    /// Services receive ids from an `IdGenerator`; call this directly only
    /// where determinism does not matter.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl From<Uuid> for CatId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<CatId> for Uuid {
    fn from(value: CatId) -> Self {
        value.0
    }
}

impl FromStr for CatId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("CatId: {e}")))?;
        Ok(Self(uuid))
    }
}
