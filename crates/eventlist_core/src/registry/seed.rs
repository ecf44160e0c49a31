//! Default seed dataset loaded at process start.
//!
//! # Invariants
//! - Ids are 1, 2, 3, 5. The gap at 4 stands in for a removed event and
//!   keeps not-found handling exercised.
//! - All dates are anchored to `America/New_York`.

use crate::model::event::{Event, EventDate, EventId};
use crate::registry::event_registry::RegistryError;
use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while building the seed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// A seed wall-clock time does not map to exactly one instant.
    InvalidDate(String),
    /// The seed events or registrations were refused by the registry.
    Registry(RegistryError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid seed date: {value}"),
            Self::Registry(err) => write!(f, "seed data rejected: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(_) => None,
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<RegistryError> for SeedError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Registration applied on top of the seed events, in order.
pub type SeedRegistration = (EventId, &'static str);

const SEED_REGISTRATIONS: &[SeedRegistration] = &[
    (1, "kyle.jensen@yale.edu"),
    (1, "kim.kardashian@yale.edu"),
    (2, "kyle.jensen@yale.edu"),
    (2, "kim.kardashian@yale.edu"),
    (3, "kim.kardashian@yale.edu"),
    (5, "homer.simpson@yale.edu"),
];

/// Returns the seed events (empty rosters) and the registrations to replay.
pub fn default_events() -> Result<(Vec<Event>, Vec<SeedRegistration>), SeedError> {
    let events = vec![
        seed_event(
            1,
            "SOM House Party",
            eastern(2023, 10, 17, 16, 30)?,
            "http://i.imgur.com/pXjrQ.gif",
            "Kyle's house",
        ),
        seed_event(
            2,
            "BBQ party for hackers and nerds",
            eastern(2023, 10, 19, 19, 0)?,
            "http://i.imgur.com/7pe2k.gif",
            "Judy Chevalier's house",
        ),
        seed_event(
            3,
            "BBQ for managers",
            eastern(2023, 12, 2, 18, 0)?,
            "http://i.imgur.com/CJLrRqh.gif",
            "Barry Nalebuff's house",
        ),
        seed_event(
            5,
            "Cooking lessons for the busy business student",
            eastern(2023, 12, 21, 19, 0)?,
            "http://i.imgur.com/02KT9.gif",
            "Yale Farm",
        ),
    ];

    Ok((events, SEED_REGISTRATIONS.to_vec()))
}

fn seed_event(id: EventId, title: &str, date: EventDate, image: &str, location: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        location: location.to_string(),
        image: image.to_string(),
        date,
        attending: Vec::new(),
    }
}

fn eastern(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<EventDate, SeedError> {
    let describe =
        || format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} America/New_York");
    let local = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| SeedError::InvalidDate(describe()))?;
    New_York
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| SeedError::InvalidDate(describe()))
}
