//! Mutation actions and the toolkit-neutral drag/drop intent.

use serde::{Deserialize, Serialize};

use crate::{
    event::Event,
    types::{DayKey, EventId},
};

/// A position inside one day's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropSlot {
    /// Day container.
    pub day: DayKey,
    /// Index within the day's sequence.
    pub index: usize,
}

impl DropSlot {
    /// Slot at `index` of `day`.
    pub fn new(day: impl Into<DayKey>, index: usize) -> Self {
        Self {
            day: day.into(),
            index,
        }
    }
}

/// A completed drag gesture: where it started and where it was released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Dragged event's slot.
    pub source: DropSlot,
    /// Release slot, or `None` when dropped outside every day.
    pub destination: Option<DropSlot>,
}

impl MoveIntent {
    /// Intent that ends on `destination`.
    pub fn new(source: DropSlot, destination: DropSlot) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// Intent released outside any day.
    pub fn nowhere(source: DropSlot) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// A user action applied to the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Append an event to a day, unless it clashes.
    Add {
        /// Target day.
        day: DayKey,
        /// New event.
        event: Event,
    },
    /// Replace the event with the same id in a day.
    Edit {
        /// Day holding the event.
        day: DayKey,
        /// Replacement.
        event: Event,
    },
    /// Remove an event from a day.
    Delete {
        /// Day holding the event.
        day: DayKey,
        /// Event to remove.
        id: EventId,
    },
    /// Permute one day's sequence.
    Reorder {
        /// Day to reorder.
        day: DayKey,
        /// Current index.
        from: usize,
        /// New index.
        to: usize,
    },
    /// Apply a drag gesture.
    Drop(MoveIntent),
}
