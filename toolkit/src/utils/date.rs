use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default format for date columns (YYYY-MM-DD)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// 1970-01-01 counted from 0001-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date stored as days since the Unix epoch, as date columns hold them
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Calendar period a date can be bucketed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    Year,
    Month,
    Week,
}

impl DatePart {
    /// Output column name of the sub-period, if any
    pub fn sub_label(self) -> Option<&'static str> {
        match self {
            DatePart::Year => None,
            DatePart::Month => Some("month"),
            DatePart::Week => Some("week"),
        }
    }
}

impl std::str::FromStr for DatePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" | "yearly" => Ok(DatePart::Year),
            "month" | "monthly" => Ok(DatePart::Month),
            "week" | "weekly" => Ok(DatePart::Week),
            other => Err(format!("unknown period {:?}, expected year, month or week", other)),
        }
    }
}

/// Format a duration in days for logging
pub fn format_span_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_days() {
        assert_eq!(date_from_days(0), NaiveDate::from_ymd_opt(1970, 1, 1));
        assert_eq!(date_from_days(19_724), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(date_from_days(-1), NaiveDate::from_ymd_opt(1969, 12, 31));
        assert_eq!(date_from_days(i32::MAX), None);
    }

    #[test]
    fn test_date_part_from_str() {
        assert_eq!("Month".parse::<DatePart>().unwrap(), DatePart::Month);
        assert_eq!("weekly".parse::<DatePart>().unwrap(), DatePart::Week);
        assert!("decade".parse::<DatePart>().is_err());
        assert_eq!(DatePart::Week.sub_label(), Some("week"));
        assert_eq!(DatePart::Year.sub_label(), None);
    }

    #[test]
    fn test_format_span_days() {
        assert_eq!(format_span_days(1), "1 day");
        assert_eq!(format_span_days(31), "31 days");
    }
}
