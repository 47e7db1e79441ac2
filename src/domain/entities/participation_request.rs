//! Participation request and its status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;

/// Status of a participation request.
///
/// `Pending` is the only non-terminal state: it moves to `Confirmed` or
/// `Rejected` by the event initiator, or to `Canceled` by the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Canceled,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Confirmed => "CONFIRMED",
            RequestStatus::Canceled => "CANCELED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "CONFIRMED" => Ok(RequestStatus::Confirmed),
            "CANCELED" => Ok(RequestStatus::Canceled),
            "REJECTED" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A user's request to participate in an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationRequest {
    pub id: i64,
    pub created: NaiveDateTime,
    pub event_id: i64,
    pub requester_id: i64,
    pub status: RequestStatus,
}

impl sqlx::FromRow<'_, PgRow> for ParticipationRequest {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = RequestStatus::from_str(&status).map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: e.into(),
        })?;

        Ok(ParticipationRequest {
            id: row.try_get("id")?,
            created: row.try_get("created")?,
            event_id: row.try_get("event_id")?,
            requester_id: row.try_get("requester_id")?,
            status,
        })
    }
}

/// Input data for creating a participation request.
///
/// When `status` is `Confirmed` the event's confirmed counter is incremented
/// in the same transaction as the insert.
#[derive(Debug, Clone)]
pub struct NewParticipationRequest {
    pub event_id: i64,
    pub requester_id: i64,
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Confirmed,
            RequestStatus::Canceled,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::from_str(status.as_str()), Ok(status));
        }
    }
}
