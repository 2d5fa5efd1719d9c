use chrono::NaiveDate;

use daycal::{
    event::Event,
    export::{CSV_HEADER, ExportFormat, export, export_file_name, to_csv, to_json},
    types::DayEvents,
};

fn days() -> DayEvents {
    let mut days = DayEvents::new();
    days.insert(
        "2024-03-11".to_string(),
        vec![Event::new("3", "Gym", "18:00", "19:00")],
    );
    days.insert(
        "2024-03-10".to_string(),
        vec![
            Event::new("1", "Standup", "09:00", "09:15").with_description("daily"),
            Event::new("2", "Lunch, with \"Sam\"", "12:00", "13:00"),
        ],
    );
    days
}

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("date")
}

#[test]
fn csv_has_header_and_one_quoted_row_per_event() {
    let csv = to_csv(&days());
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(
        lines,
        [
            CSV_HEADER,
            r#"2024-03-10,"1","Standup","daily","09:00","09:15""#,
            r#"2024-03-10,"2","Lunch, with "Sam"","","12:00","13:00""#,
            r#"2024-03-11,"3","Gym","","18:00","19:00""#,
        ]
    );
    assert!(!csv.ends_with('\n'));
}

#[test]
fn csv_of_empty_calendar_is_header_only() {
    assert_eq!(to_csv(&DayEvents::new()), CSV_HEADER);
}

#[test]
fn json_is_two_space_indented_and_parses_back() {
    let json = to_json(&days()).expect("json");
    assert!(json.starts_with("{\n  \"2024-03-10\": [\n    {\n      \"id\": \"1\","));
    let parsed: DayEvents = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, days());
}

#[test]
fn file_names_carry_export_date() {
    assert_eq!(
        export_file_name(ExportFormat::Json, export_date()),
        "events_export_2024-03-15.json"
    );
    assert_eq!(
        export_file_name(ExportFormat::Csv, export_date()),
        "events_export_2024-03-15.csv"
    );

    let file = export(&days(), ExportFormat::Csv, export_date()).expect("export");
    assert_eq!(file.file_name, "events_export_2024-03-15.csv");
    assert_eq!(file.mime_type, "text/csv");
    assert_eq!(file.body, to_csv(&days()));
}
