//! Unique identifier types for the elevator dataset generator
//!
//! Persisted elevator states carry a UUID-based identifier in place of the
//! auto-incremented primary key a database table would assign.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

const STATE_ID_PREFIX: &str = "STATE_";

/// Unique identifier for a persisted elevator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElevatorStateId(pub Uuid);

impl ElevatorStateId {
    /// Create a new random elevator state ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElevatorStateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElevatorStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", STATE_ID_PREFIX, self.0.simple())
    }
}

impl Serialize for ElevatorStateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ElevatorStateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix(STATE_ID_PREFIX).unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(ElevatorStateId(uuid))
    }
}
