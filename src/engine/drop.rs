use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::store::{EventStore, StoreError},
    date::is_day_key,
    op::{DropSlot, MoveIntent},
    types::{DayEvents, DayKey, EventId},
};

use super::conflict::{Clash, find_clash};

/// What a drop would do, decided without touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Released outside every day.
    NoDestination,
    /// Same-day permutation.
    Reorder {
        /// Day being reordered.
        day: DayKey,
        /// Current index.
        from: usize,
        /// New index.
        to: usize,
    },
    /// Cross-day move that passed the clash check.
    Move {
        /// Slot the event leaves.
        source: DropSlot,
        /// Slot the event lands on.
        destination: DropSlot,
    },
    /// Cross-day move refused because of a clash on the destination day.
    Rejected(Clash),
}

/// Result of an applied drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Released outside every day; nothing changed.
    NoDestination,
    /// Same-day permutation applied.
    Reordered {
        /// Day reordered.
        day: DayKey,
        /// Previous index.
        from: usize,
        /// Index the event now occupies.
        to: usize,
    },
    /// Event relocated to another day.
    Moved {
        /// Moved event.
        id: EventId,
        /// Slot it left.
        source: DropSlot,
        /// Slot it now occupies.
        destination: DropSlot,
    },
    /// Move refused; both days are exactly as before the drag.
    Clashed(Clash),
}

/// Decides the effect of `intent` on `days`.
///
/// Fails when the source slot holds no event or the destination is not a
/// valid day key.
pub fn plan_drop(days: &DayEvents, intent: &MoveIntent) -> Result<DropPlan, StoreError> {
    let Some(destination) = &intent.destination else {
        return Ok(DropPlan::NoDestination);
    };
    let source = &intent.source;

    let moved = days
        .get(&source.day)
        .and_then(|seq| seq.get(source.index))
        .ok_or_else(|| StoreError::NoEventAt {
            day: source.day.clone(),
            index: source.index,
        })?;

    if source.day == destination.day {
        return Ok(DropPlan::Reorder {
            day: source.day.clone(),
            from: source.index,
            to: destination.index,
        });
    }

    if !is_day_key(&destination.day) {
        return Err(StoreError::InvalidDayKey(destination.day.clone()));
    }

    let target = days.get(&destination.day).map(Vec::as_slice).unwrap_or_default();
    if let Some(existing) = find_clash(target, moved) {
        return Ok(DropPlan::Rejected(Clash {
            existing: existing.clone(),
            candidate: moved.clone(),
        }));
    }

    Ok(DropPlan::Move {
        source: source.clone(),
        destination: destination.clone(),
    })
}

/// Drag lifecycle misuse or a failed drop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    /// `begin` called while a drag is in flight.
    #[error("a drag is already in progress")]
    AlreadyDragging,
    /// `finish` called with no drag in flight.
    #[error("no drag in progress")]
    NotDragging,
    /// The drop referenced a missing event or an invalid day.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drag gesture state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture.
    #[default]
    Idle,
    /// An event is picked up.
    Dragging {
        /// Slot the event was lifted from.
        source: DropSlot,
    },
    /// Last gesture finished with this outcome.
    Dropped(DropOutcome),
}

/// Tracks one drag gesture at a time: `Idle -> Dragging -> Dropped`.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    /// Idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// True while an event is picked up.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Picks up the event at `source`.
    pub fn begin(&mut self, store: &EventStore, source: DropSlot) -> Result<(), DragError> {
        if self.is_dragging() {
            return Err(DragError::AlreadyDragging);
        }
        if store.day(&source.day).get(source.index).is_none() {
            return Err(StoreError::NoEventAt {
                day: source.day,
                index: source.index,
            }
            .into());
        }
        self.state = DragState::Dragging { source };
        Ok(())
    }

    /// Abandons the gesture without touching the store.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Releases the event on `destination` and applies the result to `store`.
    ///
    /// A failed drop returns the session to idle.
    pub fn finish(
        &mut self,
        store: &mut EventStore,
        destination: Option<DropSlot>,
    ) -> Result<DropOutcome, DragError> {
        let DragState::Dragging { source } = &self.state else {
            return Err(DragError::NotDragging);
        };
        let source = source.clone();
        self.state = DragState::Idle;

        let outcome = store.apply_drop(MoveIntent {
            source,
            destination,
        })?;
        self.state = DragState::Dropped(outcome.clone());
        Ok(outcome)
    }
}
