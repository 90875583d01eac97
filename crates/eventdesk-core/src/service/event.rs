//! Event CRUD with organizer resolution.

use std::sync::Arc;

use super::or_not_found;
use crate::domain::{Event, EventDetails, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AttendeeRepository, EventRepository, UserRepository};

pub struct EventService {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
    attendees: Arc<dyn AttendeeRepository>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserRepository>,
        attendees: Arc<dyn AttendeeRepository>,
    ) -> Self {
        Self {
            events,
            users,
            attendees,
        }
    }

    /// Create an event. The id of `event` is ignored.
    pub async fn create(&self, event: Event) -> Result<EventDetails, DomainError> {
        let organizer = self.resolve_organizer(event.organizer_id).await?;
        let saved = self.events.save(Event { id: 0, ..event }).await?;

        tracing::info!(event_id = saved.id, "Event created");
        Ok(EventDetails {
            event: saved,
            organizer,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<EventDetails>, DomainError> {
        match self.events.find_by_id(id).await? {
            Some(event) => Ok(Some(with_organizer(self.users.as_ref(), event).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<EventDetails>, DomainError> {
        let mut details = Vec::new();
        for event in self.events.find_all().await? {
            details.push(with_organizer(self.users.as_ref(), event).await?);
        }
        Ok(details)
    }

    /// Replace every mutable field of event `id` with `values`.
    pub async fn update(&self, id: i64, values: Event) -> Result<EventDetails, DomainError> {
        let mut event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", id))?;

        let organizer = self.resolve_organizer(values.organizer_id).await?;
        event.replace_with(values);

        let saved = self
            .events
            .save(event)
            .await
            .map_err(or_not_found("Event", id))?;

        tracing::info!(event_id = id, "Event updated");
        Ok(EventDetails {
            event: saved,
            organizer,
        })
    }

    /// Delete event `id`. Refused while attendees are still registered against it.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let registered = self.attendees.count_by_event(id).await?;
        if registered > 0 {
            return Err(DomainError::Validation(format!(
                "Event {id} still has {registered} registered attendee(s)"
            )));
        }

        self.events.delete(id).await.map_err(|err| match err {
            RepoError::Constraint(_) => {
                DomainError::Validation(format!("Event {id} still has registered attendees"))
            }
            other => or_not_found("Event", id)(other),
        })?;

        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }

    async fn resolve_organizer(&self, organizer_id: Option<i64>) -> Result<Option<User>, DomainError> {
        let Some(id) = organizer_id else {
            return Ok(None);
        };

        match self.users.find_by_id(id).await? {
            Some(user) => Ok(Some(user)),
            None => Err(DomainError::missing_reference("User", id)),
        }
    }
}

/// Attach the organizer to an event read from the store.
pub(super) async fn with_organizer(
    users: &dyn UserRepository,
    event: Event,
) -> Result<EventDetails, DomainError> {
    let organizer = match event.organizer_id {
        Some(id) => users.find_by_id(id).await?,
        None => None,
    };
    Ok(EventDetails { event, organizer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attendee;
    use crate::ports::BaseRepository;
    use crate::testing::Fixture;

    fn conf() -> Event {
        Event {
            title: Some("Conf".to_string()),
            location: Some("Hall".to_string()),
            ..Event::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let fx = Fixture::new();

        let created = fx.events.create(conf()).await.unwrap();
        let fetched = fx.events.get_by_id(created.event.id).await.unwrap().unwrap();

        assert_eq!(fetched.event.title.as_deref(), Some("Conf"));
        assert_eq!(fetched.event.location.as_deref(), Some("Hall"));
        assert!(fetched.organizer.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let fx = Fixture::new();

        assert!(fx.events.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_resolves_organizer() {
        let fx = Fixture::new();
        let organizer = fx.seed_user("org").await;

        let created = fx
            .events
            .create(Event {
                organizer_id: Some(organizer.id),
                ..conf()
            })
            .await
            .unwrap();

        assert_eq!(created.organizer, Some(organizer));
    }

    #[tokio::test]
    async fn test_create_with_unknown_organizer_persists_nothing() {
        let fx = Fixture::new();

        let err = fx
            .events
            .create(Event {
                organizer_id: Some(99),
                ..conf()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::ReferenceNotFound { entity_type: "User", id: 99 }
        ));
        assert!(fx.event_repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let fx = Fixture::new();
        let organizer = fx.seed_user("org").await;
        let created = fx
            .events
            .create(Event {
                description: Some("Yearly".to_string()),
                date_time: Some("2024-05-01T10:00".to_string()),
                organizer_id: Some(organizer.id),
                ..conf()
            })
            .await
            .unwrap();

        let updated = fx
            .events
            .update(
                created.event.id,
                Event {
                    title: Some("Meetup".to_string()),
                    ..Event::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.event.id, created.event.id);
        assert_eq!(updated.event.title.as_deref(), Some("Meetup"));
        assert_eq!(updated.event.description, None);
        assert_eq!(updated.event.date_time, None);
        assert_eq!(updated.event.location, None);
        assert_eq!(updated.event.organizer_id, None);
        assert!(updated.organizer.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let fx = Fixture::new();

        let err = fx.events.update(7, conf()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity_type: "Event", id: 7 }));
    }

    #[tokio::test]
    async fn test_delete_removes_event_once() {
        let fx = Fixture::new();
        let created = fx.events.create(conf()).await.unwrap();

        fx.events.delete(created.event.id).await.unwrap();
        let again = fx.events.delete(created.event.id).await.unwrap_err();

        assert!(matches!(again, DomainError::NotFound { .. }));
        assert!(fx.events.get_by_id(created.event.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_refused_while_attendees_registered() {
        let fx = Fixture::new();
        let user = fx.seed_user("carol").await;
        let created = fx.events.create(conf()).await.unwrap();
        fx.attendee_repo
            .save(Attendee::new(user.id, created.event.id))
            .await
            .unwrap();

        let err = fx.events.delete(created.event.id).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(fx.events.get_by_id(created.event.id).await.unwrap().is_some());
    }
}
