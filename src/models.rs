use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One scheduled dose and how it was resolved, as stored.
///
/// `status` and `occurred_at` stay as text; the aggregator parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderLogEntry {
    pub id: String,
    pub medicine_id: String,
    pub medicine_name: String,
    pub dosage: String,
    pub status: String,
    pub scheduled_time: String,
    pub occurred_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub logs: Vec<ReminderLogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminderLog {
    pub medicine_id: String,
    pub medicine_name: String,
    #[serde(default)]
    pub dosage: String,
    pub status: String,
    pub scheduled_time: String,
    pub occurred_at: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total: u64,
    pub taken: u64,
    pub skipped: u64,
    pub missed: u64,
    pub adherence_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub total: u64,
    pub taken: u64,
    pub adherence_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekStats {
    pub day: String,
    pub total: u64,
    pub taken: u64,
    pub adherence_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeOfDayStats {
    pub morning: BucketStats,
    pub afternoon: BucketStats,
    pub evening: BucketStats,
    pub night: BucketStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineStats {
    pub medicine_id: String,
    pub name: String,
    pub dosage: String,
    pub total: u64,
    pub taken: u64,
    pub skipped: u64,
    pub missed: u64,
    pub adherence_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub week_start: NaiveDateTime,
    pub week_end: NaiveDateTime,
    pub total: u64,
    pub taken: u64,
    pub adherence_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceSummary {
    pub overall: OverallStats,
    pub day_of_week: Vec<DayOfWeekStats>,
    pub time_of_day: TimeOfDayStats,
    pub by_medicine: Vec<MedicineStats>,
    pub trend: Vec<TrendPoint>,
}
