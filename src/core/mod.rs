//! In-memory event store and its id index.

/// Event id to day-key index.
pub mod index;
/// Authoritative day-keyed event store.
pub mod store;
