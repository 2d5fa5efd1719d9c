//! Day-keyed event calendar with clash detection and drag/drop moves.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::EventStore`]:
//! ```
//! use daycal::{core::store::{EventStore, StoreError}, event::Event};
//!
//! let mut store = EventStore::new();
//! store.add("2024-03-10", Event::new("1", "Standup", "09:00", "10:00")).expect("add");
//!
//! let err = store
//!     .add("2024-03-10", Event::new("2", "Review", "09:30", "09:45"))
//!     .unwrap_err();
//! assert!(matches!(err, StoreError::Clash(ref c) if c.existing.id == "1"));
//!
//! store.add("2024-03-10", Event::new("3", "Planning", "10:00", "11:00")).expect("adjacent");
//! let ids: Vec<_> = store.day("2024-03-10").iter().map(|e| e.id.as_str()).collect();
//! assert_eq!(ids, ["1", "3"]);
//! ```
//!
//! Session usage with a SQLite-backed store:
//! ```no_run
//! use chrono::NaiveDate;
//! use daycal::{
//!     event::EventDraft,
//!     persist::sqlite::SqliteKv,
//!     session::{CalendarSession, SessionConfig},
//! };
//!
//! let kv = SqliteKv::open("calendar.db").expect("open sqlite");
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).expect("date");
//! let mut session = CalendarSession::open(kv, SessionConfig::default(), today).expect("open");
//! let _id = session.create_event("2024-03-10", EventDraft {
//!     name: "Standup".to_string(),
//!     start_time: "09:00".to_string(),
//!     end_time: "09:15".to_string(),
//!     description: String::new(),
//! }).expect("create");
//! ```
#![deny(missing_docs)]

/// Event store and its indexes.
pub mod core;
/// Calendar math and day keys.
pub mod date;
/// Conflict detection and drag/drop planning.
pub mod engine;
/// Event record and form draft.
pub mod event;
/// JSON and CSV export.
pub mod export;
/// Mutation actions and move intents.
pub mod op;
/// Persistence abstraction with memory and SQLite stores.
pub mod persist;
/// Session tying store, persistence and view state together.
pub mod session;
/// Shared aliases and constants.
pub mod types;
