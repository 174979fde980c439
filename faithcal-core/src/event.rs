//! Calendar event types.
//!
//! Two kinds of events exist: catalog-origin `ReligiousEvent`s (immutable,
//! possibly multi-day) and user-origin `PersonalEvent`s (single-day).
//! `CalendarEvent` is the closed sum of the two; consumers match on it
//! instead of inspecting runtime tags.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FaithcalError;

/// A religious grouping used as a filter tag on catalog events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tradition {
    Christianity,
    Islam,
    Judaism,
    Hinduism,
    Buddhism,
}

impl Tradition {
    pub const ALL: [Tradition; 5] = [
        Tradition::Christianity,
        Tradition::Islam,
        Tradition::Judaism,
        Tradition::Hinduism,
        Tradition::Buddhism,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tradition::Christianity => "Christianity",
            Tradition::Islam => "Islam",
            Tradition::Judaism => "Judaism",
            Tradition::Hinduism => "Hinduism",
            Tradition::Buddhism => "Buddhism",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tradition {
    type Err = FaithcalError;

    /// Case-insensitive parse, used for CLI input and the persisted filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tradition::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                let known: Vec<_> = Tradition::ALL.iter().map(|t| t.name()).collect();
                FaithcalError::UnknownTradition(trimmed.to_string(), known.join(", "))
            })
    }
}

/// What kind of observance a catalog event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Holiday,
    Observance,
    Fast,
    Celebration,
    Pilgrimage,
    Ceremony,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Holiday => "holiday",
            EventKind::Observance => "observance",
            EventKind::Fast => "fast",
            EventKind::Celebration => "celebration",
            EventKind::Pilgrimage => "pilgrimage",
            EventKind::Ceremony => "ceremony",
        };
        f.write_str(label)
    }
}

/// A catalog observance, single or multi-day.
///
/// Invariant: `end_date`, when present, is on or after `start_date`.
/// Catalog entries are defined at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReligiousEvent {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    /// Present only for multi-day spans
    pub end_date: Option<NaiveDate>,
    pub tradition: Tradition,
    pub kind: EventKind,
    pub description: Option<String>,
    pub significance: Option<String>,
    /// Free-text customs associated with the observance
    pub customs: Vec<String>,
}

impl ReligiousEvent {
    /// The last day of the span; the start day itself for single-day events.
    pub fn span_end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// A user-created event. Always a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fixed `"personal"` discriminator in the persisted JSON
    #[serde(rename = "type", default)]
    tag: PersonalTag,
}

impl PersonalEvent {
    pub fn new(id: String, title: String, date: NaiveDate, description: Option<String>) -> Self {
        PersonalEvent {
            id,
            title,
            date,
            description,
            tag: PersonalTag::Personal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
enum PersonalTag {
    #[default]
    #[serde(rename = "personal")]
    Personal,
}

/// Either kind of event, as consumed by calendar views.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEvent {
    Religious(ReligiousEvent),
    Personal(PersonalEvent),
}

impl CalendarEvent {
    pub fn id(&self) -> &str {
        match self {
            CalendarEvent::Religious(e) => &e.id,
            CalendarEvent::Personal(e) => &e.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarEvent::Religious(e) => &e.title,
            CalendarEvent::Personal(e) => &e.title,
        }
    }

    pub fn start(&self) -> NaiveDate {
        match self {
            CalendarEvent::Religious(e) => e.start_date,
            CalendarEvent::Personal(e) => e.date,
        }
    }

    /// Inclusive end of the span; equals `start()` for single-day events.
    pub fn end(&self) -> NaiveDate {
        match self {
            CalendarEvent::Religious(e) => e.span_end(),
            CalendarEvent::Personal(e) => e.date,
        }
    }
}

impl From<ReligiousEvent> for CalendarEvent {
    fn from(event: ReligiousEvent) -> Self {
        CalendarEvent::Religious(event)
    }
}

impl From<PersonalEvent> for CalendarEvent {
    fn from(event: PersonalEvent) -> Self {
        CalendarEvent::Personal(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tradition_parses_case_insensitively() {
        assert_eq!("islam".parse::<Tradition>().unwrap(), Tradition::Islam);
        assert_eq!(
            " Christianity ".parse::<Tradition>().unwrap(),
            Tradition::Christianity
        );
        assert!("Pastafarianism".parse::<Tradition>().is_err());
    }

    #[test]
    fn personal_event_serializes_with_type_tag() {
        let event = PersonalEvent::new(
            "p1".to_string(),
            "Checkup".to_string(),
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            None,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "personal");
        assert_eq!(json["date"], "2025-06-10");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn personal_event_roundtrips_from_stored_layout() {
        let json = r#"{"id":"p2","title":"Dentist","date":"2025-03-01","type":"personal"}"#;
        let event: PersonalEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "p2");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
