//! Shared identifiers and the day-keyed event mapping.

use std::collections::BTreeMap;

use crate::event::Event;

/// Opaque, immutable event identifier.
pub type EventId = String;
/// Canonical `YYYY-MM-DD` day key.
pub type DayKey = String;
/// Ordered events per day key. Sequence order is display/drag order.
pub type DayEvents = BTreeMap<DayKey, Vec<Event>>;

/// Key under which the whole [`DayEvents`] snapshot is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "events";
