use chrono::{Duration, Months, NaiveDateTime};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    SevenDays,
    #[default]
    ThirtyDays,
    NinetyDays,
    SixMonths,
    OneYear,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7days",
            Self::ThirtyDays => "30days",
            Self::NinetyDays => "90days",
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
        }
    }

    /// The `[start, end]` window of this period ending at `now`.
    ///
    /// Month-based periods step back calendar months, clamping to the last
    /// day of a shorter month.
    pub fn window_ending(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let start = match self {
            Self::SevenDays => now - Duration::days(7),
            Self::ThirtyDays => now - Duration::days(30),
            Self::NinetyDays => now - Duration::days(90),
            Self::SixMonths => now
                .checked_sub_months(Months::new(6))
                .unwrap_or(now - Duration::days(182)),
            Self::OneYear => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        };
        (start, now)
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7days" => Ok(Self::SevenDays),
            "30days" => Ok(Self::ThirtyDays),
            "90days" => Ok(Self::NinetyDays),
            "6months" => Ok(Self::SixMonths),
            "1year" => Ok(Self::OneYear),
            other => Err(format!(
                "period must be one of 7days, 30days, 90days, 6months, 1year (got '{other}')"
            )),
        }
    }
}
