//! Attendee registration with reference resolution.

use std::sync::Arc;

use super::event::with_organizer;
use super::or_not_found;
use crate::domain::{Attendee, AttendeeDetails, EventDetails, User};
use crate::error::DomainError;
use crate::ports::{AttendeeRepository, EventRepository, UserRepository};

pub struct AttendeeService {
    attendees: Arc<dyn AttendeeRepository>,
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventRepository>,
}

impl AttendeeService {
    pub fn new(
        attendees: Arc<dyn AttendeeRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            attendees,
            users,
            events,
        }
    }

    /// Register `user_id` as attending `event_id`. Both must exist.
    pub async fn register(&self, user_id: i64, event_id: i64) -> Result<AttendeeDetails, DomainError> {
        let (user, event) = self.resolve(user_id, event_id).await?;
        let saved = self.attendees.save(Attendee::new(user_id, event_id)).await?;

        tracing::info!(attendee_id = saved.id, user_id, event_id, "Attendee registered");
        Ok(AttendeeDetails {
            attendee: saved,
            user: Some(user),
            event: Some(event),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<AttendeeDetails>, DomainError> {
        match self.attendees.find_by_id(id).await? {
            Some(attendee) => Ok(Some(self.details(attendee).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<AttendeeDetails>, DomainError> {
        let mut details = Vec::new();
        for attendee in self.attendees.find_all().await? {
            details.push(self.details(attendee).await?);
        }
        Ok(details)
    }

    /// Point attendee `id` at a new user and event, re-validating both.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        event_id: i64,
    ) -> Result<AttendeeDetails, DomainError> {
        let mut attendee = self
            .attendees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendee", id))?;

        let (user, event) = self.resolve(user_id, event_id).await?;
        attendee.user_id = user_id;
        attendee.event_id = event_id;

        let saved = self
            .attendees
            .save(attendee)
            .await
            .map_err(or_not_found("Attendee", id))?;

        tracing::info!(attendee_id = id, user_id, event_id, "Attendee updated");
        Ok(AttendeeDetails {
            attendee: saved,
            user: Some(user),
            event: Some(event),
        })
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.attendees
            .delete(id)
            .await
            .map_err(or_not_found("Attendee", id))?;

        tracing::info!(attendee_id = id, "Attendee deleted");
        Ok(())
    }

    async fn resolve(&self, user_id: i64, event_id: i64) -> Result<(User, EventDetails), DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::missing_reference("User", user_id))?;
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::missing_reference("Event", event_id))?;

        Ok((user, with_organizer(self.users.as_ref(), event).await?))
    }

    async fn details(&self, attendee: Attendee) -> Result<AttendeeDetails, DomainError> {
        let user = self.users.find_by_id(attendee.user_id).await?;
        let event = match self.events.find_by_id(attendee.event_id).await? {
            Some(event) => Some(with_organizer(self.users.as_ref(), event).await?),
            None => None,
        };

        Ok(AttendeeDetails {
            attendee,
            user,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Event;
    use crate::ports::BaseRepository;
    use crate::testing::Fixture;

    async fn seed_event(fx: &Fixture) -> i64 {
        fx.events
            .create(Event {
                title: Some("Conf".to_string()),
                ..Event::default()
            })
            .await
            .unwrap()
            .event
            .id
    }

    #[tokio::test]
    async fn test_register_resolves_user_and_event() {
        let fx = Fixture::new();
        let user = fx.seed_user("dave").await;
        let event_id = seed_event(&fx).await;

        let details = fx.attendees.register(user.id, event_id).await.unwrap();

        assert!(details.attendee.id > 0);
        assert_eq!(details.user, Some(user));
        assert_eq!(details.event.unwrap().event.id, event_id);
    }

    #[tokio::test]
    async fn test_register_unknown_user_persists_nothing() {
        let fx = Fixture::new();
        let event_id = seed_event(&fx).await;

        let err = fx.attendees.register(404, event_id).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::ReferenceNotFound { entity_type: "User", id: 404 }
        ));
        assert_eq!(err.to_string(), "User not found with ID: 404");
        assert_eq!(fx.attendee_repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_register_unknown_event_persists_nothing() {
        let fx = Fixture::new();
        let user = fx.seed_user("erin").await;

        let err = fx.attendees.register(user.id, 77).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::ReferenceNotFound { entity_type: "Event", id: 77 }
        ));
        assert_eq!(fx.attendee_repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_revalidates_references() {
        let fx = Fixture::new();
        let first = fx.seed_user("frank").await;
        let second = fx.seed_user("grace").await;
        let event_id = seed_event(&fx).await;
        let created = fx.attendees.register(first.id, event_id).await.unwrap();

        let updated = fx
            .attendees
            .update(created.attendee.id, second.id, event_id)
            .await
            .unwrap();
        assert_eq!(updated.attendee.user_id, second.id);

        let err = fx
            .attendees
            .update(created.attendee.id, second.id, 999)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReferenceNotFound { id: 999, .. }));

        let stored = fx.attendee_repo.find_by_id(created.attendee.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, second.id);
        assert_eq!(stored.event_id, event_id);
    }

    #[tokio::test]
    async fn test_update_unknown_attendee_is_not_found() {
        let fx = Fixture::new();
        let user = fx.seed_user("heidi").await;
        let event_id = seed_event(&fx).await;

        let err = fx.attendees.update(5, user.id, event_id).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity_type: "Attendee", id: 5 }));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_attendee() {
        let fx = Fixture::new();
        let user = fx.seed_user("ivan").await;
        let event_id = seed_event(&fx).await;
        let created = fx.attendees.register(user.id, event_id).await.unwrap();

        fx.attendees.delete(created.attendee.id).await.unwrap();

        assert!(fx.attendees.get_by_id(created.attendee.id).await.unwrap().is_none());
        assert!(matches!(
            fx.attendees.delete(created.attendee.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_get_all_lists_with_references() {
        let fx = Fixture::new();
        let user = fx.seed_user("judy").await;
        let event_id = seed_event(&fx).await;
        fx.attendees.register(user.id, event_id).await.unwrap();
        fx.attendees.register(user.id, event_id).await.unwrap();

        let all = fx.attendees.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|a| a.user.as_ref() == Some(&user)));
    }
}
