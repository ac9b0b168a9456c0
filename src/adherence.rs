use crate::errors::MalformedInputError;
use crate::models::{
    AdherenceSummary, BucketStats, DayOfWeekStats, MedicineStats, OverallStats, ReminderLogEntry,
    TimeOfDayStats, TrendPoint,
};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike};
use std::collections::HashMap;
use std::str::FromStr;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    Taken,
    Missed,
    Skipped,
}

impl FromStr for LogStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "taken" => Ok(Self::Taken),
            "missed" => Ok(Self::Missed),
            "skipped" => Ok(Self::Skipped),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u64,
    taken: u64,
    skipped: u64,
    missed: u64,
}

impl Tally {
    fn record(&mut self, status: LogStatus) {
        self.total = self.total.saturating_add(1);
        match status {
            LogStatus::Taken => self.taken = self.taken.saturating_add(1),
            LogStatus::Skipped => self.skipped = self.skipped.saturating_add(1),
            LogStatus::Missed => self.missed = self.missed.saturating_add(1),
        }
    }

    fn rate(&self) -> f64 {
        adherence_rate(self.taken, self.total)
    }

    fn bucket(&self) -> BucketStats {
        BucketStats {
            total: self.total,
            taken: self.taken,
            adherence_rate: self.rate(),
        }
    }
}

/// Percentage of `total` doses that were taken, 0 when there were none.
pub fn adherence_rate(taken: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        taken as f64 / total as f64 * 100.0
    }
}

/// Rounds a rate to one decimal place for display.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 10.0).round() / 10.0
}

/// Parses RFC 3339 (keeping the wall-clock time of its offset) or a naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` timestamp.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

pub fn parse_occurred_at(entry: &ReminderLogEntry) -> Result<NaiveDateTime, MalformedInputError> {
    parse_timestamp(&entry.occurred_at).ok_or_else(|| MalformedInputError::Timestamp {
        id: entry.id.clone(),
        value: entry.occurred_at.clone(),
    })
}

pub fn parse_status(entry: &ReminderLogEntry) -> Result<LogStatus, MalformedInputError> {
    entry
        .status
        .parse()
        .map_err(|value| MalformedInputError::Status {
            id: entry.id.clone(),
            value,
        })
}

/// Summarizes `logs` over `[period_start, period_end]`.
///
/// Every entry is validated before anything is counted, so a malformed entry
/// fails the whole call. Entries are assumed to lie inside the period; one
/// that does not is still counted everywhere except the weekly trend.
pub fn aggregate(
    logs: &[ReminderLogEntry],
    period_start: NaiveDateTime,
    period_end: NaiveDateTime,
) -> Result<AdherenceSummary, MalformedInputError> {
    let parsed = logs
        .iter()
        .map(|entry| Ok((entry, parse_occurred_at(entry)?, parse_status(entry)?)))
        .collect::<Result<Vec<_>, MalformedInputError>>()?;

    let weeks = week_windows(period_start, period_end);

    let mut overall = Tally::default();
    let mut by_day = [Tally::default(); 7];
    let mut by_time = [Tally::default(); 4];
    let mut by_week = vec![Tally::default(); weeks.len()];
    let mut medicines: Vec<(&ReminderLogEntry, Tally)> = Vec::new();
    let mut medicine_slots: HashMap<&str, usize> = HashMap::new();

    for (entry, occurred_at, status) in parsed {
        overall.record(status);
        by_day[occurred_at.weekday().num_days_from_sunday() as usize].record(status);
        by_time[TimeOfDay::from_hour(occurred_at.hour()) as usize].record(status);

        let slot = *medicine_slots
            .entry(entry.medicine_id.as_str())
            .or_insert_with(|| {
                medicines.push((entry, Tally::default()));
                medicines.len() - 1
            });
        medicines[slot].1.record(status);

        if let Some(week) = week_slot(period_start, period_end, weeks.len(), occurred_at) {
            by_week[week].record(status);
        }
    }

    let day_of_week = by_day
        .iter()
        .zip(DAY_NAMES)
        .map(|(tally, day)| DayOfWeekStats {
            day: day.to_string(),
            total: tally.total,
            taken: tally.taken,
            adherence_rate: tally.rate(),
        })
        .collect();

    let by_medicine = medicines
        .into_iter()
        .map(|(entry, tally)| MedicineStats {
            medicine_id: entry.medicine_id.clone(),
            name: entry.medicine_name.clone(),
            dosage: entry.dosage.clone(),
            total: tally.total,
            taken: tally.taken,
            skipped: tally.skipped,
            missed: tally.missed,
            adherence_rate: tally.rate(),
        })
        .collect();

    let trend = weeks
        .into_iter()
        .zip(by_week)
        .map(|((week_start, week_end), tally)| TrendPoint {
            week_start,
            week_end,
            total: tally.total,
            taken: tally.taken,
            adherence_rate: tally.rate(),
        })
        .collect();

    Ok(AdherenceSummary {
        overall: OverallStats {
            total: overall.total,
            taken: overall.taken,
            skipped: overall.skipped,
            missed: overall.missed,
            adherence_rate: overall.rate(),
        },
        day_of_week,
        time_of_day: TimeOfDayStats {
            morning: by_time[TimeOfDay::Morning as usize].bucket(),
            afternoon: by_time[TimeOfDay::Afternoon as usize].bucket(),
            evening: by_time[TimeOfDay::Evening as usize].bucket(),
            night: by_time[TimeOfDay::Night as usize].bucket(),
        },
        by_medicine,
        trend,
    })
}

fn week_windows(start: NaiveDateTime, end: NaiveDateTime) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let mut windows = Vec::new();
    let mut week_start = start;
    while week_start < end {
        let week_end = week_start
            .checked_add_signed(Duration::days(7))
            .map_or(end, |next| next.min(end));
        windows.push((week_start, week_end));
        week_start = week_end;
    }
    windows
}

// Buckets are half-open except the last, which also takes `end` itself.
fn week_slot(
    start: NaiveDateTime,
    end: NaiveDateTime,
    weeks: usize,
    at: NaiveDateTime,
) -> Option<usize> {
    if weeks == 0 || at < start || at > end {
        return None;
    }
    let index = ((at - start).num_seconds() / WEEK_SECONDS) as usize;
    Some(index.min(weeks - 1))
}
