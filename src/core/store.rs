use log::{debug, info};
use thiserror::Error;

use crate::{
    date::is_day_key,
    engine::{
        conflict::{Clash, find_clash},
        drop::{DropOutcome, DropPlan, plan_drop},
    },
    event::Event,
    op::{DropSlot, MoveIntent, Op},
    types::{DayEvents, DayKey, EventId},
};

use super::index::{LocationIndex, build_location_index};

/// Reasons a store mutation is refused. A refused mutation changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The event overlaps one already on the target day.
    #[error("{0}")]
    Clash(Clash),
    /// Another event already uses this id.
    #[error("event id `{0}` already exists")]
    DuplicateId(EventId),
    /// Day key is not a canonical `YYYY-MM-DD` date.
    #[error("`{0}` is not a YYYY-MM-DD day key")]
    InvalidDayKey(DayKey),
    /// No event at the given position.
    #[error("no event at index {index} of {day}")]
    NoEventAt {
        /// Day looked up.
        day: DayKey,
        /// Index looked up.
        index: usize,
    },
}

/// Ordered events per day plus an id index.
///
/// Every mutation either applies completely or returns an error with the
/// store untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    days: DayEvents,
    locations: LocationIndex,
}

impl EventStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store over previously persisted days.
    ///
    /// Rejects invalid day keys and ids that appear more than once.
    pub fn from_days(days: DayEvents) -> Result<Self, StoreError> {
        if let Some(bad) = days.keys().find(|day| !is_day_key(day)) {
            return Err(StoreError::InvalidDayKey(bad.clone()));
        }
        let locations = build_location_index(&days).map_err(StoreError::DuplicateId)?;
        Ok(Self { days, locations })
    }

    /// All days, in ascending day-key order.
    pub fn days(&self) -> &DayEvents {
        &self.days
    }

    /// Consumes the store, returning its days.
    pub fn into_days(self) -> DayEvents {
        self.days
    }

    /// Events of `day` in display order; empty when the day has none.
    pub fn day(&self, day: &str) -> &[Event] {
        self.days.get(day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Looks an event up by id, returning it with its day.
    pub fn get(&self, id: &str) -> Option<(&DayKey, &Event)> {
        let day = self.locations.get(id)?;
        let (key, events) = self.days.get_key_value(day)?;
        events.iter().find(|e| e.id == id).map(|e| (key, e))
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when no day holds an event.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// First event of `day` that `candidate` would clash with.
    pub fn find_clash(&self, day: &str, candidate: &Event) -> Option<&Event> {
        find_clash(self.day(day), candidate)
    }

    /// True when `candidate` clashes with any event of `day`.
    pub fn check_clash(&self, day: &str, candidate: &Event) -> bool {
        self.find_clash(day, candidate).is_some()
    }

    /// Appends `event` to the end of `day`.
    pub fn add(&mut self, day: &str, event: Event) -> Result<(), StoreError> {
        if !is_day_key(day) {
            return Err(StoreError::InvalidDayKey(day.to_string()));
        }
        if self.locations.contains_key(&event.id) {
            return Err(StoreError::DuplicateId(event.id));
        }
        if let Some(existing) = self.find_clash(day, &event) {
            let clash = Clash {
                existing: existing.clone(),
                candidate: event,
            };
            info!("add refused on {day}: {clash}");
            return Err(StoreError::Clash(clash));
        }

        debug!("add {} to {day}", event.id);
        self.locations.insert(event.id.clone(), day.to_string());
        self.days.entry(day.to_string()).or_default().push(event);
        Ok(())
    }

    /// Replaces the event of `day` whose id matches `event.id`.
    ///
    /// The replacement is not clash-checked. Returns false when `day` holds no
    /// such event.
    pub fn edit(&mut self, day: &str, event: Event) -> bool {
        let Some(slot) = self
            .days
            .get_mut(day)
            .and_then(|events| events.iter_mut().find(|e| e.id == event.id))
        else {
            return false;
        };
        debug!("edit {} on {day}", event.id);
        *slot = event;
        true
    }

    /// Removes the event `id` from `day`, returning it when present.
    pub fn delete(&mut self, day: &str, id: &str) -> Option<Event> {
        let events = self.days.get_mut(day)?;
        let pos = events.iter().position(|e| e.id == id)?;
        let removed = events.remove(pos);
        self.locations.remove(id);
        debug!("delete {id} from {day}");
        Some(removed)
    }

    /// Moves the event at `from` to `to` within `day`.
    ///
    /// `to` past the end places the event last.
    pub fn reorder(&mut self, day: &str, from: usize, to: usize) -> Result<(), StoreError> {
        self.reorder_within(day, from, to).map(|_| ())
    }

    /// Moves the event at `from` in `source` to `to` in `destination`.
    ///
    /// Within one day this is [`EventStore::reorder`]. Across days the event is
    /// clash-checked against the destination; on a clash both days keep their
    /// exact prior sequences and the clash is returned.
    pub fn move_event(
        &mut self,
        source: &str,
        destination: &str,
        from: usize,
        to: usize,
    ) -> Result<(), StoreError> {
        let intent = MoveIntent::new(DropSlot::new(source, from), DropSlot::new(destination, to));
        match self.apply_drop(intent)? {
            DropOutcome::Clashed(clash) => Err(StoreError::Clash(clash)),
            DropOutcome::NoDestination
            | DropOutcome::Reordered { .. }
            | DropOutcome::Moved { .. } => Ok(()),
        }
    }

    /// Applies a completed drag gesture.
    pub fn apply_drop(&mut self, intent: MoveIntent) -> Result<DropOutcome, StoreError> {
        match plan_drop(&self.days, &intent)? {
            DropPlan::NoDestination => Ok(DropOutcome::NoDestination),
            DropPlan::Reorder { day, from, to } => {
                let to = self.reorder_within(&day, from, to)?;
                Ok(DropOutcome::Reordered { day, from, to })
            }
            DropPlan::Move {
                source,
                destination,
            } => self.relocate(source, destination),
            DropPlan::Rejected(clash) => {
                info!(
                    "move {} -> {:?} refused: {clash}",
                    intent.source.day,
                    intent.destination.map(|d| d.day)
                );
                Ok(DropOutcome::Clashed(clash))
            }
        }
    }

    /// Applies one [`Op`], returning whether any day changed.
    ///
    /// An edit or delete that finds no matching event and a drop outside
    /// every day return `Ok(false)`. A drop that ends in a clash is reported
    /// as [`StoreError::Clash`].
    pub fn apply(&mut self, op: Op) -> Result<bool, StoreError> {
        match op {
            Op::Add { day, event } => self.add(&day, event).map(|()| true),
            Op::Edit { day, event } => Ok(self.edit(&day, event)),
            Op::Delete { day, id } => Ok(self.delete(&day, &id).is_some()),
            Op::Reorder { day, from, to } => self.reorder(&day, from, to).map(|()| true),
            Op::Drop(intent) => match self.apply_drop(intent)? {
                DropOutcome::Clashed(clash) => Err(StoreError::Clash(clash)),
                DropOutcome::NoDestination => Ok(false),
                DropOutcome::Reordered { .. } | DropOutcome::Moved { .. } => Ok(true),
            },
        }
    }

    /// Events whose name or description contains `query`, ignoring case.
    ///
    /// Results follow day-key order, then sequence order. An empty query
    /// matches every event.
    pub fn filter_events(&self, query: &str) -> Vec<(&DayKey, &Event)> {
        let needle = query.to_lowercase();
        self.days
            .iter()
            .flat_map(|(day, events)| events.iter().map(move |e| (day, e)))
            .filter(|(_, e)| e.matches_lowercase(&needle))
            .collect()
    }

    fn reorder_within(&mut self, day: &str, from: usize, to: usize) -> Result<usize, StoreError> {
        let events = self
            .days
            .get_mut(day)
            .filter(|events| from < events.len())
            .ok_or_else(|| StoreError::NoEventAt {
                day: day.to_string(),
                index: from,
            })?;

        let event = events.remove(from);
        let to = to.min(events.len());
        events.insert(to, event);
        debug!("reorder {day}: {from} -> {to}");
        Ok(to)
    }

    fn relocate(
        &mut self,
        source: DropSlot,
        destination: DropSlot,
    ) -> Result<DropOutcome, StoreError> {
        let events = self
            .days
            .get_mut(&source.day)
            .filter(|events| source.index < events.len())
            .ok_or_else(|| StoreError::NoEventAt {
                day: source.day.clone(),
                index: source.index,
            })?;
        let event = events.remove(source.index);
        let id = event.id.clone();

        let target = self.days.entry(destination.day.clone()).or_default();
        let index = destination.index.min(target.len());
        target.insert(index, event);
        self.locations.insert(id.clone(), destination.day.clone());

        debug!("move {id}: {}[{}] -> {}[{index}]", source.day, source.index, destination.day);
        Ok(DropOutcome::Moved {
            id,
            source,
            destination: DropSlot::new(destination.day, index),
        })
    }
}
