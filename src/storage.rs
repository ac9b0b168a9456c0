use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from("data/state.json"),
    }
}

/// Loads the log store, starting empty when the file is missing or unreadable.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(logs = data.logs.len(), path = %path.display(), "loaded reminder logs");
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "no data file yet, starting empty");
            AppData::default()
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReminderLogEntry;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("med_adherence_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.logs.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.logs.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_logs_load_back() {
        let path = temp_path("persist");
        let data = AppData {
            logs: vec![ReminderLogEntry {
                id: "log-1".to_string(),
                medicine_id: "med-1".to_string(),
                medicine_name: "Aspirin".to_string(),
                dosage: "81mg".to_string(),
                status: "taken".to_string(),
                scheduled_time: "08:00".to_string(),
                occurred_at: "2023-06-05T08:00:00".to_string(),
            }],
        };
        persist_data(&path, &data).await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"medicineId\": \"med-1\""));
        assert!(raw.contains("\"occurredAt\""));

        let loaded = load_data(&path).await;
        assert_eq!(loaded.logs, data.logs);
        let _ = fs::remove_file(&path).await;
    }
}
