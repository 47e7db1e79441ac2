//! Event DTOs.

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::category::CategoryDto;
use super::datetime::{date_format, option_date_format};
use super::location::LocationDto;
use super::user::UserShortDto;
use crate::application::services::{AdminEventUpdate, EnrichedEvent, EventDraft, EventUpdate};
use crate::domain::entities::{EventDetails, EventState};

/// Body of `POST /users/{userId}/events`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDto {
    #[validate(length(
        min = 20,
        max = 2000,
        message = "annotation must be 20 to 2000 characters long"
    ))]
    pub annotation: String,
    pub category: i64,
    #[validate(length(
        min = 20,
        max = 7000,
        message = "description must be 20 to 7000 characters long"
    ))]
    pub description: String,
    #[serde(with = "date_format")]
    #[validate(custom(function = validate_event_date))]
    pub event_date: NaiveDateTime,
    pub location: LocationDto,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "participantLimit must be zero or positive"))]
    pub participant_limit: i32,
    #[serde(default)]
    pub request_moderation: bool,
    #[validate(length(min = 3, max = 120, message = "title must be 3 to 120 characters long"))]
    pub title: String,
}

impl NewEventDto {
    pub fn into_draft(self) -> EventDraft {
        EventDraft {
            annotation: self.annotation,
            category_id: self.category,
            description: self.description,
            event_date: self.event_date,
            location: self.location.to_draft(),
            paid: self.paid,
            participant_limit: self.participant_limit,
            request_moderation: self.request_moderation,
            title: self.title,
        }
    }
}

/// Body of `PATCH /users/{userId}/events`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub event_id: i64,
    #[validate(length(
        min = 20,
        max = 2000,
        message = "annotation must be 20 to 2000 characters long"
    ))]
    pub annotation: Option<String>,
    pub category: Option<i64>,
    #[validate(length(
        min = 20,
        max = 7000,
        message = "description must be 20 to 7000 characters long"
    ))]
    pub description: Option<String>,
    #[serde(default, with = "option_date_format")]
    #[validate(custom(function = validate_optional_event_date))]
    pub event_date: Option<NaiveDateTime>,
    pub paid: Option<bool>,
    #[validate(range(min = 0, message = "participantLimit must be zero or positive"))]
    pub participant_limit: Option<i32>,
    #[validate(length(min = 3, max = 120, message = "title must be 3 to 120 characters long"))]
    pub title: Option<String>,
}

impl UpdateEventRequest {
    pub fn into_update(self) -> EventUpdate {
        EventUpdate {
            event_id: self.event_id,
            annotation: self.annotation,
            category_id: self.category,
            description: self.description,
            event_date: self.event_date,
            paid: self.paid,
            participant_limit: self.participant_limit,
            title: self.title,
        }
    }
}

/// Body of `PUT /admin/events/{eventId}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateEventRequest {
    #[validate(length(
        min = 20,
        max = 2000,
        message = "annotation must be 20 to 2000 characters long"
    ))]
    pub annotation: Option<String>,
    pub category: Option<i64>,
    #[validate(length(
        min = 20,
        max = 7000,
        message = "description must be 20 to 7000 characters long"
    ))]
    pub description: Option<String>,
    #[serde(default, with = "option_date_format")]
    pub event_date: Option<NaiveDateTime>,
    pub location: Option<LocationDto>,
    pub paid: Option<bool>,
    #[validate(range(min = 0, message = "participantLimit must be zero or positive"))]
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    #[validate(length(min = 3, max = 120, message = "title must be 3 to 120 characters long"))]
    pub title: Option<String>,
}

impl AdminUpdateEventRequest {
    pub fn into_update(self) -> AdminEventUpdate {
        AdminEventUpdate {
            annotation: self.annotation,
            category_id: self.category,
            description: self.description,
            event_date: self.event_date,
            location: self.location.map(|l| l.to_draft()),
            paid: self.paid,
            participant_limit: self.participant_limit,
            request_moderation: self.request_moderation,
            title: self.title,
        }
    }
}

/// Full event representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFullDto {
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub created_on: NaiveDateTime,
    pub description: String,
    #[serde(with = "date_format")]
    pub event_date: NaiveDateTime,
    pub id: i64,
    pub initiator: UserShortDto,
    pub location: LocationDto,
    pub paid: bool,
    pub participant_limit: i32,
    #[serde(with = "option_date_format")]
    pub published_on: Option<NaiveDateTime>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
    pub views: i64,
}

impl EventFullDto {
    pub fn from_details(details: &EventDetails, views: i64) -> Self {
        Self {
            annotation: details.event.annotation.clone(),
            category: (&details.category).into(),
            confirmed_requests: details.event.confirmed_requests,
            created_on: details.event.created_on,
            description: details.event.description.clone(),
            event_date: details.event.event_date,
            id: details.event.id,
            initiator: (&details.initiator).into(),
            location: (&details.location).into(),
            paid: details.event.paid,
            participant_limit: details.event.participant_limit,
            published_on: details.event.published_on,
            request_moderation: details.event.request_moderation,
            state: details.event.state,
            title: details.event.title.clone(),
            views,
        }
    }

    pub fn from_enriched(enriched: &EnrichedEvent) -> Self {
        Self::from_details(&enriched.details, enriched.views)
    }
}

/// Short event representation used in lists and compilations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventShortDto {
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub event_date: NaiveDateTime,
    pub id: i64,
    pub initiator: UserShortDto,
    pub paid: bool,
    pub title: String,
    pub views: i64,
}

impl EventShortDto {
    pub fn from_details(details: &EventDetails, views: i64) -> Self {
        Self {
            annotation: details.event.annotation.clone(),
            category: (&details.category).into(),
            confirmed_requests: details.event.confirmed_requests,
            event_date: details.event.event_date,
            id: details.event.id,
            initiator: (&details.initiator).into(),
            paid: details.event.paid,
            title: details.event.title.clone(),
            views,
        }
    }

    pub fn from_enriched(enriched: &EnrichedEvent) -> Self {
        Self::from_details(&enriched.details, enriched.views)
    }
}

/// Event date must leave at least two hours for moderation.
fn validate_event_date(event_date: &NaiveDateTime) -> Result<(), ValidationError> {
    if *event_date <= Utc::now().naive_utc() + Duration::hours(2) {
        let mut error = ValidationError::new("event_date");
        error.message = Some("eventDate must be at least two hours in the future".into());
        return Err(error);
    }
    Ok(())
}

fn validate_optional_event_date(event_date: &NaiveDateTime) -> Result<(), ValidationError> {
    validate_event_date(event_date)
}
