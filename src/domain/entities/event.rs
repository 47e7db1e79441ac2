//! Event entity and its moderation lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{Category, Location, User};

/// Moderation state of an event.
///
/// New events start as `Pending`. Admins move them to `Published` or
/// `Canceled`; the initiator can also cancel a pending event. Published
/// events cannot be edited by their initiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Pending => "PENDING",
            EventState::Published => "PUBLISHED",
            EventState::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EventState::Pending),
            "PUBLISHED" => Ok(EventState::Published),
            "CANCELED" => Ok(EventState::Canceled),
            other => Err(format!("unknown event state: {other}")),
        }
    }
}

/// An event as stored, with plain foreign-key ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub annotation: String,
    pub category_id: i64,
    pub confirmed_requests: i32,
    pub created_on: NaiveDateTime,
    pub description: String,
    pub event_date: NaiveDateTime,
    pub initiator_id: i64,
    pub location_id: i64,
    pub paid: bool,
    pub participant_limit: i32,
    pub published_on: Option<NaiveDateTime>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
}

impl Event {
    /// Returns true when the participant limit is set and already reached.
    pub fn is_full(&self) -> bool {
        self.participant_limit > 0 && self.confirmed_requests >= self.participant_limit
    }
}

impl sqlx::FromRow<'_, PgRow> for Event {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let state: String = row.try_get("state")?;
        let state = EventState::from_str(&state).map_err(|e| sqlx::Error::ColumnDecode {
            index: "state".to_string(),
            source: e.into(),
        })?;

        Ok(Event {
            id: row.try_get("id")?,
            annotation: row.try_get("annotation")?,
            category_id: row.try_get("category_id")?,
            confirmed_requests: row.try_get("confirmed_requests")?,
            created_on: row.try_get("created_on")?,
            description: row.try_get("description")?,
            event_date: row.try_get("event_date")?,
            initiator_id: row.try_get("initiator_id")?,
            location_id: row.try_get("location_id")?,
            paid: row.try_get("paid")?,
            participant_limit: row.try_get("participant_limit")?,
            published_on: row.try_get("published_on")?,
            request_moderation: row.try_get("request_moderation")?,
            state,
            title: row.try_get("title")?,
        })
    }
}

/// An event together with its referenced category, initiator, and location.
///
/// Built from one joined query; replaces the managed entity graph of an ORM
/// with an explicit struct.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub event: Event,
    pub category: Category,
    pub initiator: User,
    pub location: Location,
}

impl sqlx::FromRow<'_, PgRow> for EventDetails {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let event = Event::from_row(row)?;
        let category = Category {
            id: event.category_id,
            name: row.try_get("category_name")?,
        };
        let initiator = User {
            id: event.initiator_id,
            name: row.try_get("initiator_name")?,
            email: row.try_get("initiator_email")?,
        };
        let location = Location {
            id: event.location_id,
            name: row.try_get("location_name")?,
            lat: row.try_get("location_lat")?,
            lon: row.try_get("location_lon")?,
            radius: row.try_get("location_radius")?,
        };

        Ok(EventDetails {
            event,
            category,
            initiator,
            location,
        })
    }
}

/// Input data for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub annotation: String,
    pub category_id: i64,
    pub description: String,
    pub event_date: NaiveDateTime,
    pub initiator_id: i64,
    pub location_id: i64,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_str() {
        for state in [
            EventState::Pending,
            EventState::Published,
            EventState::Canceled,
        ] {
            assert_eq!(EventState::from_str(state.as_str()), Ok(state));
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!(EventState::from_str("ARCHIVED").is_err());
    }

    #[test]
    fn is_full_only_applies_with_nonzero_limit() {
        let mut event = sample_event();
        event.participant_limit = 0;
        event.confirmed_requests = 100;
        assert!(!event.is_full());

        event.participant_limit = 2;
        event.confirmed_requests = 1;
        assert!(!event.is_full());

        event.confirmed_requests = 2;
        assert!(event.is_full());
    }

    fn sample_event() -> Event {
        let now = chrono::Utc::now().naive_utc();
        Event {
            id: 1,
            annotation: "a".repeat(20),
            category_id: 1,
            confirmed_requests: 0,
            created_on: now,
            description: "d".repeat(20),
            event_date: now,
            initiator_id: 1,
            location_id: 1,
            paid: false,
            participant_limit: 0,
            published_on: None,
            request_moderation: true,
            state: EventState::Pending,
            title: "Sample".to_string(),
        }
    }
}
