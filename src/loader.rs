use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::models::{generated_id, AppointmentRecord, TimeSlotRecord};

/// Reads an appointment export, picking the format from the file extension.
pub fn load_appointments(path: &Path) -> anyhow::Result<Vec<AppointmentRecord>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_json(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        Some("csv") => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            parse_csv(file).with_context(|| format!("failed to parse {}", path.display()))?
        }
        _ => bail!(
            "unsupported appointment export {}; expected a .json or .csv file",
            path.display()
        ),
    };

    info!(path = %path.display(), records = records.len(), "loaded appointments");
    Ok(records)
}

/// Accepts a bare array of appointments or the backend's `{ "data": [...] }`
/// envelope. Entries that do not look like appointments are skipped.
pub fn parse_json(content: &str) -> anyhow::Result<Vec<AppointmentRecord>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Export {
        Bare(Vec<Value>),
        Envelope { data: Vec<Value> },
    }

    let export: Export =
        serde_json::from_str(content).context("expected an array of appointments")?;
    let entries = match export {
        Export::Bare(entries) | Export::Envelope { data: entries } => entries,
    };

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<AppointmentRecord>(entry) {
            Ok(record) => records.push(record),
            Err(err) => warn!(position, error = %err, "skipping malformed appointment entry"),
        }
    }

    Ok(records)
}

pub fn parse_csv<R: Read>(reader: R) -> anyhow::Result<Vec<AppointmentRecord>> {
    #[derive(Deserialize)]
    struct CsvRow {
        #[serde(default)]
        id: Option<String>,
        scheduled_date: String,
        start: String,
        end: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        customer: Option<String>,
        #[serde(default)]
        pet: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        staff: Option<String>,
    }

    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_number, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid appointment row {}", row_number + 1))?;

        let id = row
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generated_id("csv"));

        let mut payload = Map::new();
        for (key, value) in [
            ("title", row.title),
            ("customer", row.customer),
            ("pet", row.pet),
            ("status", row.status),
            ("staff", row.staff),
        ] {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                payload.insert(key.to_string(), Value::String(value));
            }
        }

        records.push(AppointmentRecord {
            id,
            scheduled_date: row.scheduled_date,
            scheduled_time_slot: TimeSlotRecord {
                start: row.start,
                end: row.end,
            },
            payload,
        });
    }

    Ok(records)
}
