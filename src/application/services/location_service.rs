//! Location lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{Location, NewLocation};
use crate::domain::repositories::{EventRepository, LocationRepository};
use crate::error::AppError;

/// Location input as supplied by clients: either a reference to an existing
/// row by id, or inline coordinates with an optional name and radius.
#[derive(Debug, Clone)]
pub struct LocationDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<f64>,
}

/// Service for managing named places and inline event coordinates.
pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
    events: Arc<dyn EventRepository>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { locations, events }
    }

    /// Creates a named place.
    ///
    /// Refused while another location's radius already covers the point.
    pub async fn add_location(&self, draft: LocationDraft) -> Result<Location, AppError> {
        if self
            .locations
            .find_covering(draft.lat, draft.lon)
            .await?
            .is_some()
        {
            return Err(AppError::illegal_state(format!(
                "A location already covers the coordinates {}, {}",
                draft.lat, draft.lon
            )));
        }

        let location = self
            .locations
            .create(NewLocation {
                name: draft.name,
                lat: draft.lat,
                lon: draft.lon,
                radius: draft.radius.unwrap_or(0.0),
            })
            .await?;
        tracing::debug!(location_id = location.id, "location created");
        Ok(location)
    }

    /// Named locations ordered by id.
    pub async fn get_locations(&self, from: i64, size: i64) -> Result<Vec<Location>, AppError> {
        self.locations.list_named(size, from).await
    }

    /// Deletes a location.
    ///
    /// Refused while any event lies within the location's radius.
    pub async fn delete_location(&self, id: i64) -> Result<(), AppError> {
        let location = self.ensure_exists(id).await?;
        let events = self
            .events
            .find_within_radius(location.lat, location.lon)
            .await?;
        if !events.is_empty() {
            return Err(AppError::illegal_state(
                "Cannot delete a location while events are attached to it",
            ));
        }

        self.locations.delete(id).await?;
        tracing::debug!(location_id = id, "location deleted");
        Ok(())
    }

    /// Resolves the location reference of an event.
    ///
    /// An id reference must point at an existing row whose coordinates match
    /// the supplied ones. Inline coordinates reuse a covering row when one
    /// exists, otherwise a new unnamed row is created.
    pub async fn resolve_for_event(&self, draft: &LocationDraft) -> Result<Location, AppError> {
        if let Some(id) = draft.id {
            let stored = self.ensure_exists(id).await?;
            if stored.lat != draft.lat || stored.lon != draft.lon {
                return Err(AppError::illegal_state(format!(
                    "Location {id} does not match the supplied coordinates"
                )));
            }
            return Ok(stored);
        }

        if let Some(existing) = self.locations.find_covering(draft.lat, draft.lon).await? {
            return Ok(existing);
        }

        self.locations
            .create(NewLocation {
                name: draft.name.clone(),
                lat: draft.lat,
                lon: draft.lon,
                radius: draft.radius.unwrap_or(0.0),
            })
            .await
    }

    /// Loads a location or fails with not-found.
    pub async fn ensure_exists(&self, id: i64) -> Result<Location, AppError> {
        self.locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Location with id {id} was not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockEventRepository, MockLocationRepository};

    fn details_at(lat: f64, lon: f64) -> crate::domain::entities::EventDetails {
        use crate::domain::entities::{Category, Event, EventDetails, EventState, User};

        let now = chrono::Utc::now().naive_utc();
        EventDetails {
            event: Event {
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
            },
            category: Category {
                id: 1,
                name: "Music".to_string(),
            },
            initiator: User {
                id: 1,
                name: "Boris".to_string(),
                email: "boris@x.com".to_string(),
            },
            location: location(1, lat, lon),
        }
    }

    fn location(id: i64, lat: f64, lon: f64) -> Location {
        Location {
            id,
            name: Some("Park".to_string()),
            lat,
            lon,
            radius: 5.0,
        }
    }

    fn draft(lat: f64, lon: f64) -> LocationDraft {
        LocationDraft {
            id: None,
            name: Some("Park".to_string()),
            lat,
            lon,
            radius: Some(5.0),
        }
    }

    #[tokio::test]
    async fn add_location_refuses_covered_coordinates() {
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_covering()
            .returning(|lat, lon| Ok(Some(location(1, lat, lon))));
        locations.expect_create().times(0);

        let service = LocationService::new(Arc::new(locations), Arc::new(MockEventRepository::new()));
        let result = service.add_location(draft(55.0, 37.0)).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn resolve_reuses_covering_row_for_inline_coordinates() {
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_covering()
            .returning(|lat, lon| Ok(Some(location(9, lat, lon))));
        locations.expect_create().times(0);

        let service = LocationService::new(Arc::new(locations), Arc::new(MockEventRepository::new()));
        let resolved = service.resolve_for_event(&draft(55.0, 37.0)).await.unwrap();

        assert_eq!(resolved.id, 9);
    }

    #[tokio::test]
    async fn resolve_creates_row_when_nothing_covers() {
        let mut locations = MockLocationRepository::new();
        locations.expect_find_covering().returning(|_, _| Ok(None));
        locations.expect_create().times(1).returning(|new_location| {
            Ok(Location {
                id: 10,
                name: new_location.name,
                lat: new_location.lat,
                lon: new_location.lon,
                radius: new_location.radius,
            })
        });

        let service = LocationService::new(Arc::new(locations), Arc::new(MockEventRepository::new()));
        let resolved = service.resolve_for_event(&draft(55.0, 37.0)).await.unwrap();

        assert_eq!(resolved.id, 10);
    }

    #[tokio::test]
    async fn resolve_rejects_mismatched_reference() {
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_by_id()
            .returning(|id| Ok(Some(location(id, 50.0, 30.0))));

        let service = LocationService::new(Arc::new(locations), Arc::new(MockEventRepository::new()));
        let mut d = draft(55.0, 37.0);
        d.id = Some(4);
        let result = service.resolve_for_event(&d).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn delete_location_with_events_is_refused() {
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_by_id()
            .returning(|id| Ok(Some(location(id, 55.0, 37.0))));
        locations.expect_delete().times(0);

        let mut events = MockEventRepository::new();
        events
            .expect_find_within_radius()
            .returning(|lat, lon| Ok(vec![details_at(lat, lon)]));

        let service = LocationService::new(Arc::new(locations), Arc::new(events));
        let result = service.delete_location(1).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }
}
