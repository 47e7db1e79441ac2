//! Participation request lifecycle.
//!
//! Requests follow a small state machine: PENDING is the only non-terminal
//! status. Counter updates ride in the same transaction as the request row
//! change, inside the repository.

use std::sync::Arc;

use super::event_service::EventService;
use super::user_service::UserService;
use crate::domain::entities::{
    EventDetails, NewParticipationRequest, ParticipationRequest, RequestStatus,
};
use crate::domain::repositories::RequestRepository;
use crate::error::AppError;

/// Service for submitting and moderating participation requests.
pub struct ParticipationRequestService {
    requests: Arc<dyn RequestRepository>,
    events: Arc<EventService>,
    users: Arc<UserService>,
}

impl ParticipationRequestService {
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        events: Arc<EventService>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            requests,
            events,
            users,
        }
    }

    /// Submits a request from `user_id` to participate in `event_id`.
    ///
    /// When the event skips moderation the request is created CONFIRMED and
    /// the event's confirmed counter increments atomically with it.
    pub async fn add_request(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<ParticipationRequest, AppError> {
        self.users.ensure_exists(user_id).await?;
        let details = self.events.ensure_event(event_id).await?;

        if details.event.initiator_id == user_id {
            return Err(AppError::illegal_state(
                "The initiator cannot request participation in their own event",
            ));
        }
        if details.event.is_full() {
            return Err(AppError::illegal_state(
                "Participant limit for the event has been reached",
            ));
        }
        if self
            .requests
            .find_by_event_and_requester(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::illegal_state("Request already exists"));
        }

        let status = if details.event.request_moderation {
            RequestStatus::Pending
        } else {
            RequestStatus::Confirmed
        };

        let request = self
            .requests
            .create(NewParticipationRequest {
                event_id,
                requester_id: user_id,
                status,
            })
            .await?;
        tracing::debug!(request_id = request.id, event_id, user_id, "request created");
        Ok(request)
    }

    /// All requests submitted by the user.
    pub async fn get_user_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<ParticipationRequest>, AppError> {
        self.users.ensure_exists(user_id).await?;
        self.requests.find_by_requester(user_id).await
    }

    /// Requests targeting one of the user's own events.
    pub async fn get_event_requests(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Vec<ParticipationRequest>, AppError> {
        self.users.ensure_exists(user_id).await?;
        let details = self.events.ensure_event(event_id).await?;
        ensure_initiator(user_id, &details)?;
        self.requests.find_by_event(event_id).await
    }

    /// Requester withdraws their own PENDING request.
    pub async fn cancel_request(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequest, AppError> {
        self.users.ensure_exists(user_id).await?;
        let request = self.ensure_request(request_id).await?;

        if request.requester_id != user_id {
            return Err(AppError::illegal_state(
                "Only the requester can cancel their request",
            ));
        }
        ensure_pending(&request)?;

        let canceled = self
            .requests
            .update_status(request_id, RequestStatus::Canceled)
            .await?;
        tracing::debug!(request_id, user_id, "request canceled");
        Ok(canceled)
    }

    /// Event initiator confirms a PENDING request, consuming one slot of the
    /// participant limit.
    pub async fn confirm_request(
        &self,
        user_id: i64,
        event_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequest, AppError> {
        let (details, request) = self
            .load_for_moderation(user_id, event_id, request_id)
            .await?;

        if details.event.is_full() {
            return Err(AppError::illegal_state(
                "Participant limit for the event has been reached",
            ));
        }

        let confirmed = self.requests.confirm(request.id, event_id).await?;
        tracing::debug!(request_id, event_id, "request confirmed");
        Ok(confirmed)
    }

    /// Event initiator rejects a PENDING request.
    pub async fn reject_request(
        &self,
        user_id: i64,
        event_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequest, AppError> {
        let (_, request) = self
            .load_for_moderation(user_id, event_id, request_id)
            .await?;

        let rejected = self
            .requests
            .update_status(request.id, RequestStatus::Rejected)
            .await?;
        tracing::debug!(request_id, event_id, "request rejected");
        Ok(rejected)
    }

    /// Shared checks for confirm/reject: actors exist, the request targets
    /// the given event, the caller initiated it, and the request is still
    /// PENDING.
    async fn load_for_moderation(
        &self,
        user_id: i64,
        event_id: i64,
        request_id: i64,
    ) -> Result<(EventDetails, ParticipationRequest), AppError> {
        self.users.ensure_exists(user_id).await?;
        let details = self.events.ensure_event(event_id).await?;
        ensure_initiator(user_id, &details)?;

        let request = self.ensure_request(request_id).await?;
        if request.event_id != event_id {
            return Err(AppError::bad_request(format!(
                "Request {request_id} does not belong to event {event_id}"
            )));
        }
        ensure_pending(&request)?;

        Ok((details, request))
    }

    async fn ensure_request(&self, request_id: i64) -> Result<ParticipationRequest, AppError> {
        self.requests.find_by_id(request_id).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "Participation request with id {request_id} was not found"
            ))
        })
    }
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

fn ensure_pending(request: &ParticipationRequest) -> Result<(), AppError> {
    if request.status != RequestStatus::Pending {
        return Err(AppError::illegal_state(format!(
            "Request {} is already {}",
            request.id, request.status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::application::services::{CategoryService, LocationService};
    use crate::domain::entities::{Category, Event, EventState, Location, User};
    use crate::domain::repositories::{
        EventRepository, MockCategoryRepository, MockEventRepository, MockLocationRepository,
        MockRequestRepository, MockUserRepository,
    };
    use crate::infrastructure::stats_client::MockStatsGateway;

    fn event_details(id: i64, initiator_id: i64, limit: i32, moderated: bool) -> EventDetails {
        let now = Utc::now().naive_utc();
        EventDetails {
            event: Event {
                id,
                annotation: "a".repeat(20),
                category_id: 1,
                confirmed_requests: 0,
                created_on: now,
                description: "d".repeat(20),
                event_date: now + Duration::days(60),
                initiator_id,
                location_id: 1,
                paid: false,
                participant_limit: limit,
                published_on: None,
                request_moderation: moderated,
                state: EventState::Pending,
                title: "Concert".to_string(),
            },
            category: Category {
                id: 1,
                name: "Music".to_string(),
            },
            initiator: User {
                id: initiator_id,
                name: "Boris".to_string(),
                email: "boris@x.com".to_string(),
            },
            location: Location {
                id: 1,
                name: None,
                lat: 55.75,
                lon: 37.61,
                radius: 10.0,
            },
        }
    }

    fn request(id: i64, event_id: i64, requester_id: i64, status: RequestStatus) -> ParticipationRequest {
        ParticipationRequest {
            id,
            created: Utc::now().naive_utc(),
            event_id,
            requester_id,
            status,
        }
    }

    struct Fixture {
        requests: MockRequestRepository,
        events: MockEventRepository,
        users: MockUserRepository,
    }

    impl Fixture {
        fn new() -> Self {
            let mut users = MockUserRepository::new();
            users.expect_find_by_id().returning(|id| {
                Ok(Some(User {
                    id,
                    name: format!("user-{id}"),
                    email: format!("user-{id}@example.com"),
                }))
            });

            Self {
                requests: MockRequestRepository::new(),
                events: MockEventRepository::new(),
                users,
            }
        }

        fn into_service(self) -> ParticipationRequestService {
            let events: Arc<dyn EventRepository> = Arc::new(self.events);
            let users = Arc::new(UserService::new(Arc::new(self.users)));
            let categories = Arc::new(CategoryService::new(
                Arc::new(MockCategoryRepository::new()),
                events.clone(),
            ));
            let locations = Arc::new(LocationService::new(
                Arc::new(MockLocationRepository::new()),
                events.clone(),
            ));
            let event_service = Arc::new(EventService::new(
                events,
                users.clone(),
                categories,
                locations,
                Arc::new(MockStatsGateway::new()),
            ));

            ParticipationRequestService::new(Arc::new(self.requests), event_service, users)
        }
    }

    #[tokio::test]
    async fn initiator_cannot_request_own_event() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));

        let service = fixture.into_service();
        let result = service.add_request(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn full_event_rejects_new_requests() {
        let mut fixture = Fixture::new();
        fixture.events.expect_find_by_id().returning(|id| {
            let mut details = event_details(id, 1, 1, true);
            details.event.confirmed_requests = 1;
            Ok(Some(details))
        });

        let service = fixture.into_service();
        let result = service.add_request(2, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn duplicate_request_is_refused() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));
        fixture
            .requests
            .expect_find_by_event_and_requester()
            .returning(|event_id, user_id| {
                Ok(Some(request(1, event_id, user_id, RequestStatus::Pending)))
            });
        fixture.requests.expect_create().times(0);

        let service = fixture.into_service();
        let result = service.add_request(2, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn unmoderated_event_auto_confirms_requests() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 1, false))));
        fixture
            .requests
            .expect_find_by_event_and_requester()
            .returning(|_, _| Ok(None));
        fixture
            .requests
            .expect_create()
            .withf(|new_request| new_request.status == RequestStatus::Confirmed)
            .times(1)
            .returning(|new_request| {
                Ok(request(
                    1,
                    new_request.event_id,
                    new_request.requester_id,
                    new_request.status,
                ))
            });

        let service = fixture.into_service();
        let created = service.add_request(2, 5).await.unwrap();

        assert_eq!(created.status, RequestStatus::Confirmed);
    }

    #[tokio::test]
    async fn moderated_event_creates_pending_requests() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));
        fixture
            .requests
            .expect_find_by_event_and_requester()
            .returning(|_, _| Ok(None));
        fixture
            .requests
            .expect_create()
            .withf(|new_request| new_request.status == RequestStatus::Pending)
            .times(1)
            .returning(|new_request| {
                Ok(request(
                    1,
                    new_request.event_id,
                    new_request.requester_id,
                    new_request.status,
                ))
            });

        let service = fixture.into_service();
        let created = service.add_request(2, 5).await.unwrap();

        assert_eq!(created.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn cancel_by_other_user_is_refused() {
        let mut fixture = Fixture::new();
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 5, 2, RequestStatus::Pending))));

        let service = fixture.into_service();
        let result = service.cancel_request(3, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn terminal_request_cannot_be_canceled_again() {
        let mut fixture = Fixture::new();
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 5, 2, RequestStatus::Confirmed))));

        let service = fixture.into_service();
        let result = service.cancel_request(2, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn confirm_increments_through_repository_transaction() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 5, 2, RequestStatus::Pending))));
        fixture
            .requests
            .expect_confirm()
            .withf(|id, event_id| *id == 9 && *event_id == 5)
            .times(1)
            .returning(|id, event_id| Ok(request(id, event_id, 2, RequestStatus::Confirmed)));

        let service = fixture.into_service();
        let confirmed = service.confirm_request(1, 5, 9).await.unwrap();

        assert_eq!(confirmed.status, RequestStatus::Confirmed);
    }

    #[tokio::test]
    async fn confirm_on_full_event_is_refused() {
        let mut fixture = Fixture::new();
        fixture.events.expect_find_by_id().returning(|id| {
            let mut details = event_details(id, 1, 1, true);
            details.event.confirmed_requests = 1;
            Ok(Some(details))
        });
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 5, 2, RequestStatus::Pending))));
        fixture.requests.expect_confirm().times(0);

        let service = fixture.into_service();
        let result = service.confirm_request(1, 5, 9).await;

        assert!(matches!(result.unwrap_err(), AppError::IllegalState(_)));
    }

    #[tokio::test]
    async fn reject_moves_request_to_rejected() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 5, 2, RequestStatus::Pending))));
        fixture
            .requests
            .expect_update_status()
            .withf(|_, status| *status == RequestStatus::Rejected)
            .times(1)
            .returning(|id, status| Ok(request(id, 5, 2, status)));

        let service = fixture.into_service();
        let rejected = service.reject_request(1, 5, 9).await.unwrap();

        assert_eq!(rejected.status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn request_for_wrong_event_is_a_bad_request() {
        let mut fixture = Fixture::new();
        fixture
            .events
            .expect_find_by_id()
            .returning(|id| Ok(Some(event_details(id, 1, 10, true))));
        fixture
            .requests
            .expect_find_by_id()
            .returning(|id| Ok(Some(request(id, 777, 2, RequestStatus::Pending))));

        let service = fixture.into_service();
        let result = service.confirm_request(1, 5, 9).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
