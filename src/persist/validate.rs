use hashbrown::HashSet;
use thiserror::Error;

use crate::{date::is_day_key, event::is_clock_time, types::DayEvents};

/// Schema violations found in stored events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A mapping key is not a canonical day key.
    #[error("`{0}` is not a YYYY-MM-DD day key")]
    InvalidDayKey(String),
    /// An event has an empty id.
    #[error("event with empty id on {day}")]
    EmptyId {
        /// Day holding the event.
        day: String,
    },
    /// Two events share an id.
    #[error("event id `{0}` appears more than once")]
    DuplicateId(String),
    /// A start or end time is not `HH:MM`.
    #[error("event `{id}` has malformed time `{value}`")]
    MalformedTime {
        /// Offending event.
        id: String,
        /// Offending value.
        value: String,
    },
}

/// Checks day keys, id uniqueness and clock-time shape.
///
/// Overlaps are not checked: edits may legitimately leave overlapping events.
pub fn validate_day_events(days: &DayEvents) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for (day, events) in days {
        if !is_day_key(day) {
            return Err(SchemaError::InvalidDayKey(day.clone()));
        }
        for event in events {
            if event.id.is_empty() {
                return Err(SchemaError::EmptyId { day: day.clone() });
            }
            if !seen.insert(event.id.as_str()) {
                return Err(SchemaError::DuplicateId(event.id.clone()));
            }
            for value in [&event.start_time, &event.end_time] {
                if !is_clock_time(value) {
                    return Err(SchemaError::MalformedTime {
                        id: event.id.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
