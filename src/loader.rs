use crate::error::{AppError, Result};
use crate::types::{Activity, DemandSource, Equipment, RawActivity, Status};
use crate::util::{
    format_date, parse_date_value, parse_flag, parse_i32_value, parse_u32_value, value_to_string,
    DateFormat,
};
use chrono::Datelike;
use serde_json::Value;
use std::path::Path;

/// Property names under which some export versions nest the record list.
pub const RECORD_KEYS: [&str; 4] = ["atividades", "activities", "data", "records"];

const TASK_COLUMN: &str = "TAREFA (TASK)";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub unparsed_dates: usize,
    pub unrecognized_status: usize,
}

pub fn load_and_clean(path: &Path, date_format: DateFormat) -> Result<(Vec<Activity>, LoadReport)> {
    log::info!("Loading dataset from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_dataset(&text, date_format)
}

/// Parse an export held in memory. Rows that are not objects, or whose
/// cells cannot be read at all, are counted and skipped.
pub fn parse_dataset(json: &str, date_format: DateFormat) -> Result<(Vec<Activity>, LoadReport)> {
    let root: Value = serde_json::from_str(json)?;
    let rows = extract_rows(root)?;

    let mut report = LoadReport {
        total_rows: rows.len(),
        ..LoadReport::default()
    };
    let mut activities = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        if !row.is_object() {
            log::debug!("Row {} is not an object, skipping", idx);
            report.skipped_rows += 1;
            continue;
        }
        let raw: RawActivity = match serde_json::from_value(row) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Row {} could not be read: {}", idx, e);
                report.skipped_rows += 1;
                continue;
            }
        };
        let activity = to_activity(raw, date_format);
        if activity.start_date.is_none() {
            report.unparsed_dates += 1;
        }
        if activity.status == Status::Unrecognized {
            log::trace!(
                "Row {} has unrecognized status '{}'",
                idx,
                activity.status_raw
            );
            report.unrecognized_status += 1;
        }
        activities.push(activity);
    }

    report.loaded_rows = activities.len();
    log::info!(
        "Loaded {} of {} rows ({} skipped, {} unparsed dates, {} unrecognized status)",
        report.loaded_rows,
        report.total_rows,
        report.skipped_rows,
        report.unparsed_dates,
        report.unrecognized_status
    );
    Ok((activities, report))
}

fn extract_rows(root: Value) -> Result<Vec<Value>> {
    match root {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => {
            for key in RECORD_KEYS {
                if let Some(Value::Array(rows)) = map.remove(key) {
                    log::debug!("Records found under '{}'", key);
                    return Ok(rows);
                }
            }
            Err(AppError::MissingRecords(
                RECORD_KEYS.iter().map(|k| k.to_string()).collect(),
            ))
        }
        _ => Err(AppError::MissingRecords(
            RECORD_KEYS.iter().map(|k| k.to_string()).collect(),
        )),
    }
}

/// Map one raw row of any supported export version onto the canonical record.
pub fn to_activity(raw: RawActivity, date_format: DateFormat) -> Activity {
    let start_raw = value_to_string(raw.start.as_ref());
    let start_date = parse_date_value(raw.start.as_ref(), date_format);
    let start_display = start_date
        .map(format_date)
        .unwrap_or_else(|| start_raw.clone());

    let end_display = match parse_date_value(raw.end.as_ref(), date_format) {
        Some(d) => format_date(d),
        None => value_to_string(raw.end.as_ref()),
    };

    // Month/year columns are trusted as given; the parsed date only fills gaps.
    let month = parse_u32_value(raw.month.as_ref()).or_else(|| start_date.map(|d| d.month()));
    let year = parse_i32_value(raw.year.as_ref()).or_else(|| start_date.map(|d| d.year()));
    let day = parse_u32_value(raw.day.as_ref()).or_else(|| start_date.map(|d| d.day()));

    let equipment = Equipment::ALL
        .into_iter()
        .filter(|e| parse_flag(raw.columns.get(e.label())))
        .collect();
    let demand = DemandSource::ALL
        .into_iter()
        .filter(|d| parse_flag(raw.columns.get(d.label())))
        .collect();

    let status_raw = value_to_string(raw.status.as_ref());

    Activity {
        search_id: value_to_string(raw.search_id.as_ref()),
        udo_id: value_to_string(raw.udo_id.as_ref()),
        tp_sigitm: value_to_string(raw.tp_sigitm.as_ref()),
        start_raw,
        start_date,
        start_display,
        end_display,
        week: parse_u32_value(raw.week.as_ref()),
        day,
        month,
        year,
        status: Status::parse(&status_raw),
        status_raw,
        severity: value_to_string(raw.severity.as_ref()),
        criticality: value_to_string(raw.criticality.as_ref()),
        requester_area: value_to_string(raw.requester_area.as_ref()),
        executor: value_to_string(raw.executor.as_ref()),
        event: value_to_string(raw.event.as_ref()),
        notes: value_to_string(raw.notes.as_ref()),
        validation: value_to_string(raw.validation.as_ref()),
        equipment,
        demand,
        is_task: parse_flag(raw.columns.get(TASK_COLUMN)),
        executed_global: parse_flag(raw.executed_global.as_ref()),
        executed_platform_br: parse_flag(raw.executed_platform_br.as_ref()),
    }
}
