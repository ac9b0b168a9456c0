use crate::adherence::{LogStatus, aggregate, parse_timestamp, round_rate};
use crate::errors::AppError;
use crate::models::{AdherenceSummary, NewReminderLog, PeriodQuery, ReminderLogEntry};
use crate::period::ReportPeriod;
use crate::state::AppState;
use crate::storage::persist_data;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use serde_json::{json, Value};
use std::cmp::Reverse;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Longest explicit `start`/`end` window, matching the `1year` period.
pub const MAX_WINDOW_DAYS: i64 = 366;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<AdherenceSummary>, AppError> {
    let summary = analytics_at(&state, &query, now()).await?;
    Ok(Json(summary))
}

pub async fn analytics_at(
    state: &AppState,
    query: &PeriodQuery,
    now: NaiveDateTime,
) -> Result<AdherenceSummary, AppError> {
    let (start, end) = resolve_window(query, now)?;
    let logs = state.logs_between(start, end).await;

    let summary = aggregate(&logs, start, end).inspect_err(|err| {
        warn!(id = err.id(), "stored reminder log is malformed: {err}");
    })?;
    info!(
        %start,
        %end,
        logs = summary.overall.total,
        rate = round_rate(summary.overall.adherence_rate),
        "computed adherence summary"
    );
    Ok(summary)
}

pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<ReminderLogEntry>>, AppError> {
    let (start, end) = resolve_window(&query, now())?;
    let mut logs = state.logs_between(start, end).await;
    logs.sort_by_cached_key(|entry| Reverse(parse_timestamp(&entry.occurred_at)));
    Ok(Json(logs))
}

pub async fn create_log(
    State(state): State<AppState>,
    Json(payload): Json<NewReminderLog>,
) -> Result<(StatusCode, Json<ReminderLogEntry>), AppError> {
    let entry = new_entry(payload, now())?;

    let mut data = state.data.lock().await;
    data.logs.push(entry.clone());
    persist_data(&state.data_path, &data).await?;

    info!(
        id = %entry.id,
        medicine = %entry.medicine_id,
        status = %entry.status,
        "recorded reminder log"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

fn new_entry(payload: NewReminderLog, now: NaiveDateTime) -> Result<ReminderLogEntry, AppError> {
    let medicine_id = payload.medicine_id.trim();
    if medicine_id.is_empty() {
        return Err(AppError::bad_request("medicineId must not be empty"));
    }

    let status = payload
        .status
        .parse::<LogStatus>()
        .map_err(|value| AppError::bad_request(format!(
            "status must be 'taken', 'missed' or 'skipped' (got '{value}')"
        )))?;

    let scheduled_time = payload.scheduled_time.trim();
    if NaiveTime::parse_from_str(scheduled_time, "%H:%M").is_err() {
        return Err(AppError::bad_request("scheduledTime must be HH:MM"));
    }

    let occurred_at = match payload.occurred_at.as_deref().map(str::trim) {
        Some(value) => {
            if parse_timestamp(value).is_none() {
                return Err(AppError::bad_request(format!(
                    "occurredAt is not a valid timestamp: '{value}'"
                )));
            }
            value.to_string()
        }
        None => now.format("%Y-%m-%dT%H:%M:%S").to_string(),
    };

    Ok(ReminderLogEntry {
        id: Uuid::new_v4().to_string(),
        medicine_id: medicine_id.to_string(),
        medicine_name: payload.medicine_name.trim().to_string(),
        dosage: payload.dosage.trim().to_string(),
        status: status_name(status).to_string(),
        scheduled_time: scheduled_time.to_string(),
        occurred_at,
    })
}

/// An explicit `start`/`end` pair wins over `period`.
fn resolve_window(
    query: &PeriodQuery,
    now: NaiveDateTime,
) -> Result<(NaiveDateTime, NaiveDateTime), AppError> {
    match (query.start.as_deref(), query.end.as_deref()) {
        (Some(start), Some(end)) => {
            let start = parse_timestamp(start)
                .ok_or_else(|| AppError::bad_request(format!("invalid start: '{start}'")))?;
            let end = parse_timestamp(end)
                .ok_or_else(|| AppError::bad_request(format!("invalid end: '{end}'")))?;
            if start > end {
                return Err(AppError::bad_request("start must not be after end"));
            }
            if end - start > Duration::days(MAX_WINDOW_DAYS) {
                return Err(AppError::bad_request(format!(
                    "window must not be longer than {MAX_WINDOW_DAYS} days"
                )));
            }
            Ok((start, end))
        }
        (Some(_), None) | (None, Some(_)) => Err(AppError::bad_request(
            "start and end must be given together",
        )),
        (None, None) => {
            let period = match query.period.as_deref() {
                Some(value) => value.parse::<ReportPeriod>().map_err(AppError::bad_request)?,
                None => ReportPeriod::default(),
            };
            debug!(period = period.as_str(), "resolved reporting period");
            Ok(period.window_ending(now))
        }
    }
}

fn status_name(status: LogStatus) -> &'static str {
    match status {
        LogStatus::Taken => "taken",
        LogStatus::Missed => "missed",
        LogStatus::Skipped => "skipped",
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
