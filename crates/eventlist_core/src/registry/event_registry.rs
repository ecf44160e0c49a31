//! Event registry backed by a single coarse-grained lock.
//!
//! # Responsibility
//! - Serve snapshot reads of events (`list_all`, `get_by_id`).
//! - Serialize `create` and `register_attendee` against each other.
//!
//! # Invariants
//! - No I/O happens while the lock is held.
//! - A missing event is a normal outcome and is not logged as an error.

use crate::model::event::{Attendee, Event, EventId, NewEvent};
use crate::registry::seed::{default_events, SeedError};
use log::{debug, info};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EventNotFound(EventId),
    /// Initial events contained the same id more than once.
    DuplicateEventId(EventId),
    /// Initial event arrived with attendees; rosters only grow through
    /// `register_attendee`.
    PrefilledRoster(EventId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::DuplicateEventId(id) => write!(f, "duplicate event id: {id}"),
            Self::PrefilledRoster(id) => {
                write!(f, "event {id} must start with an empty roster")
            }
        }
    }
}

impl Error for RegistryError {}

/// Authoritative set of events and their attendee rosters.
///
/// Construct once at startup and share by reference (or `Arc`) with every
/// caller; all state is reachable only through these methods.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: Mutex<Vec<Event>>,
}

impl EventRegistry {
    /// Creates an empty registry; its first created event gets id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `events` in the given order.
    ///
    /// # Contract
    /// - Ids must be unique, else `DuplicateEventId`.
    /// - Rosters must be empty, else `PrefilledRoster`; attendees are only
    ///   added through `register_attendee` so codes stay derived from emails.
    pub fn from_events(events: Vec<Event>) -> RegistryResult<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(event.id) {
                return Err(RegistryError::DuplicateEventId(event.id));
            }
            if !event.attending.is_empty() {
                return Err(RegistryError::PrefilledRoster(event.id));
            }
        }
        Ok(Self {
            events: Mutex::new(events),
        })
    }

    /// Creates a registry loaded with the default seed dataset.
    ///
    /// Seed ids are 1, 2, 3 and 5; id 4 is intentionally absent.
    pub fn with_default_events() -> Result<Self, SeedError> {
        let (events, registrations) = default_events()?;
        let registry = Self::from_events(events)?;
        for (event_id, email) in registrations {
            registry.register_attendee(event_id, email)?;
        }
        info!(
            "event=registry_seed module=registry status=ok events={}",
            registry.len()
        );
        Ok(registry)
    }

    /// Returns copies of all events in creation order.
    pub fn list_all(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Returns a copy of the event with `id`, or `None` when unknown.
    pub fn get_by_id(&self, id: EventId) -> Option<Event> {
        let found = self
            .events
            .lock()
            .iter()
            .find(|event| event.id == id)
            .cloned();
        if found.is_none() {
            debug!("event=event_get module=registry status=not_found event_id={id}");
        }
        found
    }

    /// Stores a new event and returns it with its assigned id.
    ///
    /// # Contract
    /// - `id = max(existing ids, default -1) + 1`.
    /// - Id computation and append happen under one lock acquisition, so two
    ///   concurrent creates never share an id.
    pub fn create(&self, new_event: NewEvent) -> Event {
        let event = {
            let mut events = self.events.lock();
            let id = next_event_id(&events);
            let event = new_event.into_event(id);
            events.push(event.clone());
            event
        };
        info!(
            "event=event_create module=registry status=ok event_id={}",
            event.id
        );
        event
    }

    /// Appends a registration for `email` to the roster of `event_id`.
    ///
    /// # Contract
    /// - Unknown `event_id` returns `EventNotFound` and mutates nothing.
    /// - Duplicate emails are appended again with the same code.
    pub fn register_attendee(
        &self,
        event_id: EventId,
        email: impl Into<String>,
    ) -> RegistryResult<Attendee> {
        let attendee = Attendee::new(email);
        {
            let mut events = self.events.lock();
            let Some(event) = events.iter_mut().find(|event| event.id == event_id) else {
                debug!(
                    "event=attendee_register module=registry status=not_found event_id={event_id}"
                );
                return Err(RegistryError::EventNotFound(event_id));
            };
            event.attending.push(attendee.clone());
        }
        info!(
            "event=attendee_register module=registry status=ok event_id={event_id} code={}",
            attendee.confirmation_code
        );
        Ok(attendee)
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

fn next_event_id(events: &[Event]) -> EventId {
    events.iter().map(|event| event.id).max().unwrap_or(-1) + 1
}

#[cfg(test)]
mod tests {
    use super::{next_event_id, EventRegistry, RegistryError};
    use crate::model::event::{Attendee, NewEvent};
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            location: "Somewhere".to_string(),
            image: "http://example.com/x.gif".to_string(),
            date: New_York
                .with_ymd_and_hms(2024, 5, 4, 12, 0, 0)
                .single()
                .unwrap(),
        }
    }

    #[test]
    fn next_id_defaults_to_zero_for_empty_collection() {
        assert_eq!(next_event_id(&[]), 0);
    }

    #[test]
    fn create_on_empty_registry_assigns_zero_then_one() {
        let registry = EventRegistry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.create(new_event("first")).id, 0);
        assert_eq!(registry.create(new_event("second")).id, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn list_all_returns_detached_copies() {
        let registry = EventRegistry::new();
        let created = registry.create(new_event("party"));

        let mut snapshot = registry.list_all();
        snapshot[0].attending.push(Attendee::new("x@y.z"));
        snapshot[0].title.push_str(" (edited)");

        let stored = registry.get_by_id(created.id).unwrap();
        assert!(stored.attending.is_empty());
        assert_eq!(stored.title, "party");
    }

    #[test]
    fn from_events_rejects_duplicate_ids() {
        let first = new_event("first").into_event(1);
        let again = new_event("again").into_event(1);

        let err = EventRegistry::from_events(vec![first, again]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateEventId(1));
    }

    #[test]
    fn from_events_rejects_prefilled_rosters() {
        let mut event = new_event("forged").into_event(7);
        event.attending.push(Attendee {
            email: "kyle.jensen@yale.edu".to_string(),
            confirmation_code: "zzzzzzz".to_string(),
        });

        let err = EventRegistry::from_events(vec![event]).unwrap_err();
        assert_eq!(err, RegistryError::PrefilledRoster(7));
    }

    #[test]
    fn from_events_keeps_gaps_and_order() {
        let events = vec![
            new_event("a").into_event(3),
            new_event("b").into_event(1),
        ];
        let registry = EventRegistry::from_events(events).unwrap();

        let ids = registry.list_all().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(registry.create(new_event("c")).id, 4);
    }
}
