//! Event record and the form-boundary draft that produces it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::EventId;

/// A timed event on a single day.
///
/// Times are fixed-width `HH:MM` strings, so lexicographic comparison is
/// chronological within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier.
    pub id: EventId,
    /// Display title.
    pub name: String,
    /// Start time, `HH:MM` 24h.
    pub start_time: String,
    /// End time, `HH:MM` 24h.
    pub end_time: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Builds an event from its parts.
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            description: None,
        }
    }

    /// Returns `self` with `description` set.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
    }
}

/// Rejection reasons for form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Event name is blank.
    #[error("event name is required")]
    MissingName,
    /// Start time is blank.
    #[error("start time is required")]
    MissingStartTime,
    /// End time is blank.
    #[error("end time is required")]
    MissingEndTime,
    /// A time is not a valid `HH:MM` clock time.
    #[error("`{0}` is not a HH:MM time")]
    MalformedTime(String),
    /// End time does not come after start time.
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart {
        /// Submitted start.
        start: String,
        /// Submitted end.
        end: String,
    },
}

/// Raw add/edit form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDraft {
    /// Event name field.
    pub name: String,
    /// Start time field.
    pub start_time: String,
    /// End time field.
    pub end_time: String,
    /// Description field; blank means absent.
    pub description: String,
}

impl EventDraft {
    /// Copies an existing event back into form fields.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone().unwrap_or_default(),
        }
    }

    /// Validates the fields without consuming the draft.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.start_time.is_empty() {
            return Err(DraftError::MissingStartTime);
        }
        if self.end_time.is_empty() {
            return Err(DraftError::MissingEndTime);
        }
        for time in [&self.start_time, &self.end_time] {
            if !is_clock_time(time) {
                return Err(DraftError::MalformedTime(time.clone()));
            }
        }
        if self.start_time >= self.end_time {
            return Err(DraftError::EndNotAfterStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(())
    }

    /// Validates and builds a new event with a freshly generated id.
    pub fn into_new_event(self) -> Result<Event, DraftError> {
        self.into_event(Uuid::new_v4().to_string())
    }

    /// Validates and builds an event carrying `id`, as an edit does.
    pub fn into_event(self, id: impl Into<EventId>) -> Result<Event, DraftError> {
        self.validate()?;
        let description = (!self.description.trim().is_empty()).then_some(self.description);
        Ok(Event {
            id: id.into(),
            name: self.name,
            start_time: self.start_time,
            end_time: self.end_time,
            description,
        })
    }
}

/// True for `HH:MM` with `HH` in `00..=23` and `MM` in `00..=59`.
pub fn is_clock_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hh = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let mm = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hh < 24 && mm < 60
}
