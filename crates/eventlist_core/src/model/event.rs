//! Event and attendee records.
//!
//! # Responsibility
//! - Hold the listing data for one event and its registration roster.
//! - Fix the serialized shape consumed by JSON/template rendering.
//!
//! # Invariants
//! - `attending` keeps registration order; duplicate emails are allowed.
//! - `Attendee::confirmation_code` is derived from `email`, never supplied.
//!
//! # See also
//! - `crate::confirmation`

use crate::confirmation::generate_code;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// Registry-assigned event identifier.
pub type EventId = i64;

/// Zone-aware event timestamp.
pub type EventDate = DateTime<Tz>;

/// One listed event with its attendee roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub location: String,
    /// Image URL, validated by the caller.
    pub image: String,
    /// Serialized as RFC 3339 with the zone's offset.
    pub date: EventDate,
    pub attending: Vec<Attendee>,
}

/// One registration on an event roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub email: String,
    #[serde(rename = "confirmationCode")]
    pub confirmation_code: String,
}

impl Attendee {
    /// Creates an attendee and derives its confirmation code from `email`.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        let confirmation_code = generate_code(email.as_str());
        Self {
            email,
            confirmation_code,
        }
    }
}

/// Caller-validated fields for a new event.
///
/// Carries everything except the id, which the registry assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub location: String,
    pub image: String,
    pub date: EventDate,
}

impl NewEvent {
    pub(crate) fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            location: self.location,
            image: self.image,
            date: self.date,
            attending: Vec::new(),
        }
    }
}

/// Listing envelope rendered as `{"events": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventList {
    pub events: Vec<Event>,
}

impl From<Vec<Event>> for EventList {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
