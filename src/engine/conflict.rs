use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A proposed event collides with one already on the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clash {
    /// Event already scheduled on the target day.
    pub existing: Event,
    /// Event that was being added or moved.
    pub candidate: Event,
}

impl fmt::Display for Clash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` ({}-{}) conflicts with `{}` ({}-{})",
            self.candidate.name,
            self.candidate.start_time,
            self.candidate.end_time,
            self.existing.name,
            self.existing.start_time,
            self.existing.end_time,
        )
    }
}

/// Time-overlap test between a `candidate` and an `existing` event of one day.
///
/// The candidate conflicts when its start falls in `[existing.start, existing.end)`
/// or its end falls in `(existing.start, existing.end]`. Back-to-back events do
/// not conflict. A candidate that strictly contains the existing event is not
/// reported either; callers rely on this exact boundary policy.
pub fn conflicts(candidate: &Event, existing: &Event) -> bool {
    (candidate.start_time < existing.end_time && candidate.start_time >= existing.start_time)
        || (candidate.end_time > existing.start_time && candidate.end_time <= existing.end_time)
}

/// First event of `day` that `candidate` conflicts with.
///
/// An entry with the candidate's own id is skipped so an event is never
/// checked against itself.
pub fn find_clash<'a>(day: &'a [Event], candidate: &Event) -> Option<&'a Event> {
    day.iter()
        .filter(|existing| existing.id != candidate.id)
        .find(|existing| conflicts(candidate, existing))
}
