use hashbrown::HashMap;

use crate::types::{DayEvents, DayKey, EventId};

/// Which day each event id currently lives on.
pub type LocationIndex = HashMap<EventId, DayKey>;

/// Builds the location index, failing with the first id seen twice.
pub fn build_location_index(days: &DayEvents) -> Result<LocationIndex, EventId> {
    let mut index = LocationIndex::with_capacity(days.values().map(Vec::len).sum());
    for (day, events) in days {
        for event in events {
            if index.insert(event.id.clone(), day.clone()).is_some() {
                return Err(event.id.clone());
            }
        }
    }
    Ok(index)
}
