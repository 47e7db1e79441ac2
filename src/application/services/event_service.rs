//! Event lifecycle, search, and view enrichment.
//!
//! The search paths implement the platform's only nontrivial flow: dynamic
//! filtering in SQL, an optional radius post-filter, and best-effort view
//! counts fetched from the stats server.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Timelike, Utc};

use super::category_service::CategoryService;
use super::location_service::{LocationDraft, LocationService};
use super::user_service::UserService;
use crate::domain::entities::{EventDetails, EventState, NewEvent};
use crate::domain::geo;
use crate::domain::repositories::{
    AdminSearchFilter, EventRepository, EventSort, PublicSearchFilter,
};
use crate::error::AppError;
use crate::infrastructure::stats_client::StatsGateway;

/// Sentinel span standing in for "no practical bound", in days.
const MAX_RANGE_DAYS: i64 = 36_500;

/// An event with its unique-IP view count attached.
#[derive(Debug, Clone)]
pub struct EnrichedEvent {
    pub details: EventDetails,
    pub views: i64,
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub annotation: String,
    pub category_id: i64,
    pub description: String,
    pub event_date: NaiveDateTime,
    pub location: LocationDraft,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub title: String,
}

/// Partial update applied by the initiator. `None` fields are unchanged.
#[derive(Debug, Clone)]
pub struct EventUpdate {
    pub event_id: i64,
    pub annotation: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub paid: Option<bool>,
    pub participant_limit: Option<i32>,
    pub title: Option<String>,
}

/// Partial update applied by an admin; unlike the initiator's update it can
/// touch the location and moderation flag and ignores the event state.
#[derive(Debug, Clone)]
pub struct AdminEventUpdate {
    pub annotation: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub location: Option<LocationDraft>,
    pub paid: Option<bool>,
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub title: Option<String>,
}

/// Public search parameters as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct PublicSearchQuery {
    pub text: Option<String>,
    pub categories: Option<Vec<i64>>,
    pub paid: Option<bool>,
    pub range_start: Option<NaiveDateTime>,
    pub range_end: Option<NaiveDateTime>,
    pub only_available: bool,
    pub sort: Option<String>,
    pub from: i64,
    pub size: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Admin search parameters.
#[derive(Debug, Clone, Default)]
pub struct AdminSearchQuery {
    pub initiators: Option<Vec<i64>>,
    pub states: Option<Vec<EventState>>,
    pub categories: Option<Vec<i64>>,
    pub range_start: Option<NaiveDateTime>,
    pub range_end: Option<NaiveDateTime>,
    pub from: i64,
    pub size: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Service owning the event lifecycle and both search surfaces.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    users: Arc<UserService>,
    categories: Arc<CategoryService>,
    locations: Arc<LocationService>,
    stats: Arc<dyn StatsGateway>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        users: Arc<UserService>,
        categories: Arc<CategoryService>,
        locations: Arc<LocationService>,
        stats: Arc<dyn StatsGateway>,
    ) -> Self {
        Self {
            events,
            users,
            categories,
            locations,
            stats,
        }
    }

    /// Creates a PENDING event owned by `user_id`.
    pub async fn add_event(
        &self,
        user_id: i64,
        draft: EventDraft,
    ) -> Result<EventDetails, AppError> {
        self.users.ensure_exists(user_id).await?;
        self.categories.ensure_exists(draft.category_id).await?;
        let location = self.locations.resolve_for_event(&draft.location).await?;

        let details = self
            .events
            .create(NewEvent {
                annotation: draft.annotation,
                category_id: draft.category_id,
                description: draft.description,
                event_date: draft.event_date,
                initiator_id: user_id,
                location_id: location.id,
                paid: draft.paid,
                participant_limit: draft.participant_limit,
                request_moderation: draft.request_moderation,
                title: draft.title,
            })
            .await?;
        tracing::debug!(event_id = details.event.id, "event created");
        Ok(details)
    }

    /// Applies the initiator's partial update and resets the state to
    /// PENDING for re-moderation.
    pub async fn update_event(
        &self,
        user_id: i64,
        update: EventUpdate,
    ) -> Result<EventDetails, AppError> {
        let details = self.ensure_event(update.event_id).await?;
        self.users.ensure_exists(user_id).await?;
        ensure_initiator(user_id, &details)?;

        if details.event.state == EventState::Published {
            return Err(AppError::illegal_state(
                "Published events cannot be modified",
            ));
        }

        if let Some(category_id) = update.category_id {
            self.categories.ensure_exists(category_id).await?;
        }

        let mut event = details.event;
        if let Some(annotation) = update.annotation {
            event.annotation = annotation;
        }
        if let Some(category_id) = update.category_id {
            event.category_id = category_id;
        }
        if let Some(description) = update.description {
            event.description = description;
        }
        if let Some(event_date) = update.event_date {
            event.event_date = event_date;
        }
        if let Some(paid) = update.paid {
            event.paid = paid;
        }
        if let Some(participant_limit) = update.participant_limit {
            event.participant_limit = participant_limit;
        }
        if let Some(title) = update.title {
            event.title = title;
        }
        event.state = EventState::Pending;

        let updated = self.events.update(&event).await?;
        tracing::debug!(event_id = updated.event.id, "event updated by initiator");
        Ok(updated)
    }

    /// Events created by the user, without view enrichment.
    pub async fn get_user_events(
        &self,
        user_id: i64,
        from: i64,
        size: i64,
    ) -> Result<Vec<EventDetails>, AppError> {
        self.users.ensure_exists(user_id).await?;
        self.events.find_by_initiator(user_id, size, from).await
    }

    /// Full info about one of the user's own events.
    pub async fn get_user_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<EventDetails, AppError> {
        self.users.ensure_exists(user_id).await?;
        let details = self.ensure_event(event_id).await?;
        ensure_initiator(user_id, &details)?;
        Ok(details)
    }

    /// Initiator cancels their own PENDING event.
    pub async fn cancel_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<EventDetails, AppError> {
        self.users.ensure_exists(user_id).await?;
        let details = self.ensure_event(event_id).await?;
        ensure_initiator(user_id, &details)?;
        ensure_pending(&details)?;

        let mut event = details.event;
        event.state = EventState::Canceled;
        let updated = self.events.update(&event).await?;
        tracing::debug!(event_id, user_id, "event canceled by initiator");
        Ok(updated)
    }

    /// Admin publishes a PENDING event, stamping the publication time at
    /// second precision.
    pub async fn publish_event(&self, event_id: i64) -> Result<EventDetails, AppError> {
        let details = self.ensure_event(event_id).await?;
        ensure_pending(&details)?;

        let now = Utc::now().naive_utc();
        let mut event = details.event;
        event.state = EventState::Published;
        event.published_on = Some(now.with_nanosecond(0).unwrap_or(now));
        let updated = self.events.update(&event).await?;
        tracing::debug!(event_id, "event published");
        Ok(updated)
    }

    /// Admin rejects a PENDING event.
    pub async fn reject_event(&self, event_id: i64) -> Result<EventDetails, AppError> {
        let details = self.ensure_event(event_id).await?;
        ensure_pending(&details)?;

        let mut event = details.event;
        event.state = EventState::Canceled;
        let updated = self.events.update(&event).await?;
        tracing::debug!(event_id, "event rejected");
        Ok(updated)
    }

    /// Admin edit; unrestricted by event state.
    pub async fn admin_update_event(
        &self,
        event_id: i64,
        update: AdminEventUpdate,
    ) -> Result<EventDetails, AppError> {
        let details = self.ensure_event(event_id).await?;

        if let Some(category_id) = update.category_id {
            self.categories.ensure_exists(category_id).await?;
        }

        let mut event = details.event;
        if let Some(location) = &update.location {
            let resolved = match location.id {
                Some(id) => self.locations.ensure_exists(id).await?,
                None => self.locations.resolve_for_event(location).await?,
            };
            event.location_id = resolved.id;
        }
        if let Some(annotation) = update.annotation {
            event.annotation = annotation;
        }
        if let Some(category_id) = update.category_id {
            event.category_id = category_id;
        }
        if let Some(description) = update.description {
            event.description = description;
        }
        if let Some(event_date) = update.event_date {
            event.event_date = event_date;
        }
        if let Some(paid) = update.paid {
            event.paid = paid;
        }
        if let Some(participant_limit) = update.participant_limit {
            event.participant_limit = participant_limit;
        }
        if let Some(request_moderation) = update.request_moderation {
            event.request_moderation = request_moderation;
        }
        if let Some(title) = update.title {
            event.title = title;
        }

        let updated = self.events.update(&event).await?;
        tracing::debug!(event_id, "event updated by admin");
        Ok(updated)
    }

    /// Public search. An omitted date range implicitly means "future events
    /// only". Records one synthetic hit for the search endpoint itself.
    pub async fn search_public(
        &self,
        query: PublicSearchQuery,
        ip: &str,
        uri: &str,
    ) -> Result<Vec<EnrichedEvent>, AppError> {
        let now = Utc::now().naive_utc();
        let sort = parse_sort(query.sort.as_deref())?;

        let filter = PublicSearchFilter {
            text: query.text,
            categories: query.categories,
            paid: query.paid,
            range_start: query.range_start.unwrap_or(now),
            range_end: query
                .range_end
                .unwrap_or(now + Duration::days(MAX_RANGE_DAYS)),
            only_available: query.only_available,
            sort,
            offset: query.from,
            limit: query.size,
        };

        let mut found = self.events.search_public(&filter).await?;
        if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
            found.retain(|d| within_radius(d, lat, lon));
        }

        let mut result = self.enrich(found).await;
        if sort == Some(EventSort::Views) {
            result.sort_by_key(|e| e.views);
        }

        self.stats.record_hit(uri, ip).await;
        Ok(result)
    }

    /// Admin search. An omitted date range means "all history" rather than
    /// the public path's "future only" default.
    pub async fn search_admin(
        &self,
        query: AdminSearchQuery,
    ) -> Result<Vec<EnrichedEvent>, AppError> {
        let now = Utc::now().naive_utc();

        let filter = AdminSearchFilter {
            initiators: query.initiators,
            states: query.states,
            categories: query.categories,
            range_start: query
                .range_start
                .unwrap_or(now - Duration::days(MAX_RANGE_DAYS)),
            range_end: query
                .range_end
                .unwrap_or(now + Duration::days(MAX_RANGE_DAYS)),
            offset: query.from,
            limit: query.size,
        };

        let mut found = self.events.search_admin(&filter).await?;
        if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
            found.retain(|d| within_radius(d, lat, lon));
        }

        Ok(self.enrich(found).await)
    }

    /// Public single-event view: records a hit for the request URI, then
    /// returns the event with its unique-IP view count.
    pub async fn get_public_event(
        &self,
        event_id: i64,
        ip: &str,
        uri: &str,
    ) -> Result<EnrichedEvent, AppError> {
        let details = self.ensure_event(event_id).await?;
        self.stats.record_hit(uri, ip).await;

        let views = self
            .stats
            .view_counts(&[uri.to_string()])
            .await
            .and_then(|counts| counts.get(uri).copied())
            .unwrap_or(0);

        Ok(EnrichedEvent { details, views })
    }

    /// Events whose location radius covers the given point.
    pub async fn search_in_location(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<EventDetails>, AppError> {
        self.events.find_within_radius(lat, lon).await
    }

    /// Loads an event or fails with not-found; shared by the request
    /// service.
    pub async fn ensure_event(&self, event_id: i64) -> Result<EventDetails, AppError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event with id {event_id} was not found")))
    }

    /// Attaches view counts fetched from the stats server; a failed fetch
    /// degrades to zero views everywhere.
    async fn enrich(&self, found: Vec<EventDetails>) -> Vec<EnrichedEvent> {
        let uris: Vec<String> = found.iter().map(|d| event_uri(d.event.id)).collect();
        let counts = self.stats.view_counts(&uris).await.unwrap_or_default();

        found
            .into_iter()
            .map(|details| {
                let views = counts
                    .get(&event_uri(details.event.id))
                    .copied()
                    .unwrap_or(0);
                EnrichedEvent { details, views }
            })
            .collect()
    }
}

/// Canonical stats URI of an event.
fn event_uri(event_id: i64) -> String {
    format!("/event/{event_id}")
}

fn within_radius(details: &EventDetails, lat: f64, lon: f64) -> bool {
    geo::distance_km(details.location.lat, details.location.lon, lat, lon)
        <= details.location.radius
}

fn ensure_initiator(user_id: i64, details: &EventDetails) -> Result<(), AppError> {
    if details.event.initiator_id != user_id {
        return Err(AppError::illegal_state(format!(
            "User with id {user_id} is not the initiator of event {}",
            details.event.id
        )));
    }
    Ok(())
}

fn ensure_pending(details: &EventDetails) -> Result<(), AppError> {
    if details.event.state != EventState::Pending {
        return Err(AppError::illegal_state(format!(
            "Event {} is {} and can no longer change state",
            details.event.id, details.event.state
        )));
    }
    Ok(())
}

fn parse_sort(sort: Option<&str>) -> Result<Option<EventSort>, AppError> {
    match sort {
        None => Ok(None),
        Some("EVENT_DATE") => Ok(Some(EventSort::EventDate)),
        Some("VIEWS") => Ok(Some(EventSort::Views)),
        Some(other) => Err(AppError::bad_request(format!(
            "Unknown sort mode: {other}"
        ))),
    }
}
