use tempfile::TempDir;

use daycal::{
    core::store::EventStore,
    event::Event,
    persist::{
        EventRepository, KvStore, PersistError, memory::MemoryKv, sqlite::SqliteKv,
        validate::SchemaError,
    },
    types::{DEFAULT_STORAGE_KEY, DayEvents},
};

fn sample_days() -> DayEvents {
    let mut store = EventStore::new();
    store
        .add("2024-03-10", Event::new("1", "Standup", "09:00", "09:15"))
        .expect("add 1");
    store
        .add(
            "2024-03-10",
            Event::new("2", "Review", "10:00", "11:00").with_description("quarterly"),
        )
        .expect("add 2");
    store
        .add("2024-03-11", Event::new("3", "Gym", "18:00", "19:00"))
        .expect("add 3");
    store.delete("2024-03-11", "3");
    store.into_days()
}

#[test]
fn missing_key_loads_empty() {
    let repo = EventRepository::new(MemoryKv::new());
    assert!(repo.load().expect("load").is_empty());
}

#[test]
fn persisted_shape_uses_camel_case_and_omits_absent_description() {
    let mut repo = EventRepository::new(MemoryKv::new());
    repo.save(&sample_days()).expect("save");

    let raw = repo.kv().raw(DEFAULT_STORAGE_KEY).expect("stored");
    let json: serde_json::Value = serde_json::from_slice(raw).expect("json");
    assert_eq!(
        json,
        serde_json::json!({
            "2024-03-10": [
                {"id": "1", "name": "Standup", "startTime": "09:00", "endTime": "09:15"},
                {"id": "2", "name": "Review", "startTime": "10:00", "endTime": "11:00", "description": "quarterly"}
            ],
            "2024-03-11": []
        })
    );
}

#[test]
fn loads_snapshot_written_by_the_browser_app() {
    let stored = r#"{"2024-03-10":[{"id":"1710054000000","name":"Standup","startTime":"09:00","endTime":"09:15","description":""}]}"#;
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, stored));

    let days = repo.load().expect("load");
    let event = &days["2024-03-10"][0];
    assert_eq!(event.id, "1710054000000");
    assert_eq!(event.description.as_deref(), Some(""));
}

#[test]
fn malformed_content_fails_loudly() {
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, "{not json"));
    assert!(matches!(repo.load(), Err(PersistError::Serde(_))));

    let wrong_shape = r#"{"2024-03-10":{"id":"1"}}"#;
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, wrong_shape));
    assert!(matches!(repo.load(), Err(PersistError::Serde(_))));

    let bad_key = r#"{"March 10":[]}"#;
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, bad_key));
    assert!(matches!(
        repo.load(),
        Err(PersistError::Schema(SchemaError::InvalidDayKey(_)))
    ));

    let dupes = r#"{
        "2024-03-10":[{"id":"1","name":"a","startTime":"09:00","endTime":"10:00"}],
        "2024-03-11":[{"id":"1","name":"b","startTime":"09:00","endTime":"10:00"}]
    }"#;
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, dupes));
    assert!(matches!(
        repo.load(),
        Err(PersistError::Schema(SchemaError::DuplicateId(id))) if id == "1"
    ));

    let bad_time = r#"{"2024-03-10":[{"id":"1","name":"a","startTime":"9am","endTime":"10:00"}]}"#;
    let repo = EventRepository::new(MemoryKv::with_entry(DEFAULT_STORAGE_KEY, bad_time));
    assert!(matches!(
        repo.load(),
        Err(PersistError::Schema(SchemaError::MalformedTime { .. }))
    ));
}

#[test]
fn custom_key_is_isolated_from_default() {
    let mut kv = MemoryKv::new();
    kv.set(DEFAULT_STORAGE_KEY, b"garbage").expect("seed");

    let mut repo = EventRepository::with_key(kv, "calendar-v2");
    assert!(repo.load().expect("load").is_empty());
    repo.save(&sample_days()).expect("save");
    assert_eq!(repo.load().expect("reload"), sample_days());
    assert_eq!(repo.kv().raw(DEFAULT_STORAGE_KEY), Some(&b"garbage"[..]));
}

#[test]
fn sqlite_store_round_trips_across_reopen() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("calendar.db");

    let mut repo = EventRepository::new(SqliteKv::open(&db_path).expect("open sqlite"));
    repo.save(&sample_days()).expect("save");

    let mut days = sample_days();
    days.entry("2024-03-12".to_string())
        .or_default()
        .push(Event::new("4", "Flight", "06:00", "08:30"));
    repo.save(&days).expect("overwrite");
    drop(repo);

    let reopened = EventRepository::new(SqliteKv::open(&db_path).expect("reopen"));
    assert_eq!(reopened.load().expect("load"), days);
    assert!(
        reopened
            .kv()
            .updated_ms(DEFAULT_STORAGE_KEY)
            .expect("updated_ms")
            .is_some()
    );
}

#[test]
fn sqlite_missing_key_is_absent() {
    let kv = SqliteKv::open_in_memory().expect("open");
    assert_eq!(kv.get("events").expect("get"), None);
    assert_eq!(kv.updated_ms("events").expect("updated_ms"), None);
}
