//! JSON and CSV renderings of the whole calendar for download.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{date::format_date_key, types::DayEvents};

/// CSV header row.
pub const CSV_HEADER: &str = "Date,ID,Title,Description,Start Time,End Time";

/// Download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Pretty-printed JSON of the whole mapping.
    Json,
    /// One row per event.
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// MIME type for the download.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

/// A rendered export ready to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested download name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: &'static str,
    /// File contents.
    pub body: String,
}

/// `events_export_<YYYY-MM-DD>.<ext>` for an export made on `date`.
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("events_export_{}.{}", format_date_key(date), format.extension())
}

/// The whole mapping as JSON with 2-space indentation.
pub fn to_json(days: &DayEvents) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(days)
}

/// The whole mapping as CSV, rows joined by `\n` with no trailing newline.
///
/// Every field but the date is wrapped in double quotes. Quotes and commas
/// inside values are written as-is.
pub fn to_csv(days: &DayEvents) -> String {
    let rows = days.iter().flat_map(|(day, events)| {
        events.iter().map(move |e| {
            format!(
                "{day},\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
                e.id,
                e.name,
                e.description.as_deref().unwrap_or_default(),
                e.start_time,
                e.end_time,
            )
        })
    });

    std::iter::once(CSV_HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `days` in `format` for an export made on `date`.
pub fn export(
    days: &DayEvents,
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportFile, serde_json::Error> {
    let body = match format {
        ExportFormat::Json => to_json(days)?,
        ExportFormat::Csv => to_csv(days),
    };
    Ok(ExportFile {
        file_name: export_file_name(format, date),
        mime_type: format.mime_type(),
        body,
    })
}
