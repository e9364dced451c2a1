//! Persisted elevator state record

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{StoreError, StoreResult};
use crate::types::{ElevatorStateId, DATETIME_FORMAT};

/// One generated elevator call as stored by an [`ElevatorStateStore`](crate::store::ElevatorStateStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorState {
    /// Identifier assigned by the store
    pub id: ElevatorStateId,
    /// Floor the elevator is on when the call happens
    pub current_floor: i32,
    /// Floor the call was made from
    pub demand_floor: i32,
    /// Floor the elevator travels to
    pub next_floor: i32,
    /// When the call happens, second precision
    #[serde(with = "call_datetime_format")]
    pub call_datetime: NaiveDateTime,
}

impl ElevatorState {
    /// Create a new state with a fresh identifier
    pub fn new(
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        call_datetime: NaiveDateTime,
    ) -> Self {
        Self { id: ElevatorStateId::new(), current_floor, demand_floor, next_floor, call_datetime }
    }

    /// Create a new state from a `YYYY-MM-DD HH:MM:SS` date string
    pub fn from_date_str(
        current_floor: i32,
        demand_floor: i32,
        next_floor: i32,
        date_str: &str,
    ) -> StoreResult<Self> {
        let call_datetime = parse_call_datetime(date_str)?;
        Ok(Self::new(current_floor, demand_floor, next_floor, call_datetime))
    }

    /// The call datetime in store format
    pub fn date_string(&self) -> String {
        format_call_datetime(&self.call_datetime)
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] current={} demand={} next={}",
            self.id,
            self.date_string(),
            self.current_floor,
            self.demand_floor,
            self.next_floor
        )
    }
}

/// Format a datetime the way stores persist it
pub fn format_call_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored datetime string
pub fn parse_call_datetime(value: &str) -> StoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|source| StoreError::InvalidDatetime { value: value.to_string(), source })
}

mod call_datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::DATETIME_FORMAT;

    pub(super) fn serialize<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&datetime.format(DATETIME_FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
