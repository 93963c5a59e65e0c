//! Strongly-typed identifier for persisted beers.
//!
//! Identifiers are UUID v7, generated by the store when a record is first
//! persisted and never reused.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Unique identifier for beers (UUID v7 for time-ordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeerId(Uuid);

impl BeerId {
    /// Create a new ID with a time-ordered UUID v7
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an ID from an existing UUID
    #[inline]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get a reference to the underlying UUID
    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Convert to the underlying UUID
    #[inline]
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for BeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BeerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BeerId> for Uuid {
    fn from(id: BeerId) -> Self {
        id.0
    }
}

impl std::str::FromStr for BeerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
