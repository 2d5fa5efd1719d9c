//! The calendar object the presentation layer drives.
//!
//! A [`CalendarSession`] owns the event store, the repository it persists
//! through, the viewed month and the drag gesture state. Every successful
//! mutation writes the full snapshot back to the repository.

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::store::{EventStore, StoreError},
    date::MonthCursor,
    engine::drop::{DragError, DragSession, DragState, DropOutcome},
    event::{DraftError, Event, EventDraft},
    export::{ExportFile, ExportFormat, export},
    op::{DropSlot, Op},
    persist::{EventRepository, KvStore, PersistError},
    types::{DEFAULT_STORAGE_KEY, DayKey, EventId},
};

/// What to do when writing the snapshot fails after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFailurePolicy {
    /// Log a warning and keep going with the in-memory state.
    #[default]
    Warn,
    /// Return the error to the caller. The mutation stays applied in memory.
    Fail,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Save failure handling.
    pub save_failure: SaveFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            save_failure: SaveFailurePolicy::Warn,
        }
    }
}

/// Errors surfaced by [`CalendarSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Mutation refused by the store.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Loading or saving failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// Drag gesture misuse.
    #[error(transparent)]
    Drag(#[from] DragError),
    /// Form input rejected.
    #[error(transparent)]
    Draft(#[from] DraftError),
    /// Rendering an export failed.
    #[error("export rendering failed: {0}")]
    Export(#[source] serde_json::Error),
}

/// Calendar state plus its persistence.
pub struct CalendarSession<K: KvStore> {
    store: EventStore,
    repo: EventRepository<K>,
    cursor: MonthCursor,
    drag: DragSession,
    config: SessionConfig,
    last_save_error: Option<String>,
}

impl<K: KvStore> CalendarSession<K> {
    /// Loads the stored events and opens the view on the month of `today`.
    ///
    /// Unreadable or invalid stored content fails the open.
    pub fn open(kv: K, config: SessionConfig, today: NaiveDate) -> Result<Self, SessionError> {
        let repo = EventRepository::with_key(kv, config.storage_key.clone());
        let store = EventStore::from_days(repo.load()?)?;
        info!(
            "calendar opened: {} events across {} days",
            store.len(),
            store.days().len()
        );
        Ok(Self {
            store,
            repo,
            cursor: MonthCursor::from_date(today),
            drag: DragSession::new(),
            config,
            last_save_error: None,
        })
    }

    /// Read access to the events.
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Read access to the repository.
    pub fn repository(&self) -> &EventRepository<K> {
        &self.repo
    }

    /// Active settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The viewed month.
    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    /// Shows the previous month.
    pub fn prev_month(&mut self) -> MonthCursor {
        self.cursor = self.cursor.prev();
        self.cursor
    }

    /// Shows the next month.
    pub fn next_month(&mut self) -> MonthCursor {
        self.cursor = self.cursor.next();
        self.cursor
    }

    /// Current drag gesture state.
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Message of the last failed save under [`SaveFailurePolicy::Warn`],
    /// cleared by the next successful save.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Adds `event` to `day`.
    pub fn add_event(&mut self, day: &str, event: Event) -> Result<(), SessionError> {
        self.store.add(day, event)?;
        self.persist()
    }

    /// Validates form input and adds it as a new event with a fresh id.
    pub fn create_event(&mut self, day: &str, draft: EventDraft) -> Result<EventId, SessionError> {
        let event = draft.into_new_event()?;
        let id = event.id.clone();
        self.add_event(day, event)?;
        Ok(id)
    }

    /// Replaces the event of `day` with the same id. Not clash-checked.
    pub fn edit_event(&mut self, day: &str, event: Event) -> Result<bool, SessionError> {
        let replaced = self.store.edit(day, event);
        if replaced {
            self.persist()?;
        }
        Ok(replaced)
    }

    /// Removes event `id` from `day`.
    pub fn delete_event(&mut self, day: &str, id: &str) -> Result<Option<Event>, SessionError> {
        let removed = self.store.delete(day, id);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Reorders `day`.
    pub fn reorder(&mut self, day: &str, from: usize, to: usize) -> Result<(), SessionError> {
        self.store.reorder(day, from, to)?;
        self.persist()
    }

    /// Moves an event between days, or within one.
    pub fn move_event(
        &mut self,
        source: &str,
        destination: &str,
        from: usize,
        to: usize,
    ) -> Result<(), SessionError> {
        self.store.move_event(source, destination, from, to)?;
        self.persist()
    }

    /// Applies one action, saving only when it changed something.
    ///
    /// Returns whether the action changed any day.
    pub fn dispatch(&mut self, op: Op) -> Result<bool, SessionError> {
        debug!("dispatch {op:?}");
        let changed = self.store.apply(op)?;
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Picks up the event at `source`.
    pub fn begin_drag(&mut self, source: DropSlot) -> Result<(), SessionError> {
        self.drag.begin(&self.store, source)?;
        Ok(())
    }

    /// Releases the dragged event on `destination`, or outside every day.
    ///
    /// A clash is a normal outcome here, not an error.
    pub fn finish_drag(
        &mut self,
        destination: Option<DropSlot>,
    ) -> Result<DropOutcome, SessionError> {
        let outcome = self.drag.finish(&mut self.store, destination)?;
        if matches!(outcome, DropOutcome::Reordered { .. } | DropOutcome::Moved { .. }) {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Drops the gesture without changing anything.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Events matching `query` in name or description, ignoring case.
    pub fn filter_events(&self, query: &str) -> Vec<(&DayKey, &Event)> {
        self.store.filter_events(query)
    }

    /// Export dated today (UTC).
    pub fn export(&self, format: ExportFormat) -> Result<ExportFile, SessionError> {
        self.export_on(format, Utc::now().date_naive())
    }

    /// Export dated `date`.
    pub fn export_on(
        &self,
        format: ExportFormat,
        date: NaiveDate,
    ) -> Result<ExportFile, SessionError> {
        export(self.store.days(), format, date).map_err(SessionError::Export)
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        match self.repo.save(self.store.days()) {
            Ok(()) => {
                self.last_save_error = None;
                Ok(())
            }
            Err(err) => match self.config.save_failure {
                SaveFailurePolicy::Warn => {
                    warn!("saving events failed, keeping in-memory state: {err}");
                    self.last_save_error = Some(err.to_string());
                    Ok(())
                }
                SaveFailurePolicy::Fail => Err(err.into()),
            },
        }
    }
}
