//! Scheduling rules: conflict detection and drag/drop planning.

/// Conflict predicate and clash search.
pub mod conflict;
/// Drop planning and the drag gesture state machine.
pub mod drop;
