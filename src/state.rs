use crate::adherence::parse_timestamp;
use crate::models::{AppData, ReminderLogEntry};
use chrono::NaiveDateTime;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Copies out the logs whose `occurredAt` lies in `[start, end]`.
    ///
    /// Stored logs with an unreadable `occurredAt` cannot be placed in any
    /// window and are skipped. The lock is released before the caller
    /// aggregates.
    pub async fn logs_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<ReminderLogEntry> {
        let data = self.data.lock().await;
        let mut logs = Vec::new();
        for entry in &data.logs {
            match parse_timestamp(&entry.occurred_at) {
                Some(occurred_at) if occurred_at >= start && occurred_at <= end => {
                    logs.push(entry.clone());
                }
                Some(_) => {}
                None => warn!(
                    id = %entry.id,
                    occurred_at = %entry.occurred_at,
                    "skipping stored reminder log with invalid timestamp"
                ),
            }
        }
        logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn stored(id: &str, status: &str, occurred_at: &str) -> ReminderLogEntry {
        ReminderLogEntry {
            id: id.to_string(),
            medicine_id: "med-1".to_string(),
            medicine_name: "Aspirin".to_string(),
            dosage: "81mg".to_string(),
            status: status.to_string(),
            scheduled_time: "08:00".to_string(),
            occurred_at: occurred_at.to_string(),
        }
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let state = AppState::new(
            PathBuf::from("unused.json"),
            AppData {
                logs: vec![
                    stored("before", "taken", "2023-06-03T23:59:59"),
                    stored("first", "taken", "2023-06-04T00:00:00"),
                    stored("last", "missed", "2023-06-11T00:00:00"),
                    stored("after", "taken", "2023-06-11T00:00:01"),
                ],
            },
        );
        let ids: Vec<_> = state
            .logs_between(at(4, 0), at(11, 0))
            .await
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, ["first", "last"]);
    }

    #[tokio::test]
    async fn unreadable_timestamps_are_skipped() {
        let state = AppState::new(
            PathBuf::from("unused.json"),
            AppData {
                logs: vec![
                    stored("corrupt", "taken", "last tuesday"),
                    stored("good", "taken", "2023-06-05T08:00:00"),
                ],
            },
        );
        let logs = state.logs_between(at(4, 0), at(11, 0)).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, "good");
    }

    #[tokio::test]
    async fn bad_status_outside_the_window_is_not_returned() {
        let state = AppState::new(
            PathBuf::from("unused.json"),
            AppData {
                logs: vec![
                    stored("old", "sometimes", "2022-01-01T08:00:00"),
                    stored("good", "skipped", "2023-06-05T08:00:00"),
                ],
            },
        );
        let logs = state.logs_between(at(4, 0), at(11, 0)).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, "good");
    }
}
