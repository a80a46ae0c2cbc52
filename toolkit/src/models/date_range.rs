use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "2W")]
    TwoWeeks,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "2M")]
    TwoMonths,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
    #[serde(rename = "ALL")]
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::TwoWeeks => "2W",
            TimeRange::OneMonth => "1M",
            TimeRange::TwoMonths => "2M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::TwoYears => "2Y",
            TimeRange::All => "ALL",
        }
    }

    /// Length of the range in calendar units, `None` for ALL
    fn lookback(&self) -> Option<Lookback> {
        match self {
            TimeRange::OneWeek => Some(Lookback::Days(7)),
            TimeRange::TwoWeeks => Some(Lookback::Days(14)),
            TimeRange::OneMonth => Some(Lookback::Months(1)),
            TimeRange::TwoMonths => Some(Lookback::Months(2)),
            TimeRange::ThreeMonths => Some(Lookback::Months(3)),
            TimeRange::SixMonths => Some(Lookback::Months(6)),
            TimeRange::OneYear => Some(Lookback::Months(12)),
            TimeRange::TwoYears => Some(Lookback::Months(24)),
            TimeRange::All => None,
        }
    }

    /// First day of the range when it ends on `anchor`. Month steps clamp to
    /// the end of shorter months, so 1M before March 31 is February 29 in a
    /// leap year. `None` for ALL or when the start would precede the
    /// earliest representable date.
    pub fn start_before(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        match self.lookback()? {
            Lookback::Days(days) => anchor.checked_sub_days(Days::new(days)),
            Lookback::Months(months) => anchor.checked_sub_months(Months::new(months)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Lookback {
    Days(u64),
    Months(u32),
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1W" => Ok(TimeRange::OneWeek),
            "2W" => Ok(TimeRange::TwoWeeks),
            "1M" => Ok(TimeRange::OneMonth),
            "2M" => Ok(TimeRange::TwoMonths),
            "3M" => Ok(TimeRange::ThreeMonths),
            "6M" => Ok(TimeRange::SixMonths),
            "1Y" => Ok(TimeRange::OneYear),
            "2Y" => Ok(TimeRange::TwoYears),
            "ALL" => Ok(TimeRange::All),
            other => Err(format!("unknown time range {:?}", other)),
        }
    }
}

/// Inclusive date bounds; a missing bound is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No bounds: every date is in range
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Trailing range ending at `anchor`, e.g. the last trading day of a dataset
    pub fn trailing(range: TimeRange, anchor: NaiveDate) -> Self {
        match range {
            TimeRange::All => Self::all(),
            _ => Self::from_bounds(range.start_before(anchor), Some(anchor)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn describe(&self) -> String {
        let fmt = |d: Option<NaiveDate>| d.map_or("..".to_string(), |d| d.to_string());
        match (self.start, self.end) {
            (None, None) => "ALL".to_string(),
            _ => format!("{} to {}", fmt(self.start), fmt(self.end)),
        }
    }
}
