use crate::error::{PipelineError, Result};
use chrono::{Datelike, NaiveDate};

/// Normalizes a date to the first day of its calendar month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the month immediately after `date`'s month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    // Day 1 of any month in chrono's supported range always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// The contiguous run of `horizon` month starts immediately following
/// `last_month`: month *i* of the result is `last_month + (i + 1)` calendar
/// months, day normalized to the 1st.
pub fn future_months(last_month: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut months = Vec::with_capacity(horizon);
    let mut current = month_start(last_month);
    for _ in 0..horizon {
        current = next_month_start(current);
        months.push(current);
    }
    months
}

/// Parses a month string from the input data contract: "YYYY-MM-DD" (day is
/// discarded) or bare "YYYY-MM". Anything else is an error for the caller to
/// wrap with row context.
pub fn parse_month(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(month_start(date));
    }

    let padded = format!("{}-01", trimmed);
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .map_err(|_| {
            PipelineError::DateError(format!(
                "Invalid month '{}': expected YYYY-MM-DD or YYYY-MM",
                value
            ))
        })
        .map(month_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2023, 5, 17)), date(2023, 5, 1));
        assert_eq!(month_start(date(2023, 5, 1)), date(2023, 5, 1));
    }

    #[test]
    fn test_next_month_start() {
        assert_eq!(next_month_start(date(2023, 1, 1)), date(2023, 2, 1));
        assert_eq!(next_month_start(date(2023, 12, 1)), date(2024, 1, 1));
        assert_eq!(next_month_start(date(2023, 6, 30)), date(2023, 7, 1));
    }

    #[test]
    fn test_future_months_contiguous() {
        let months = future_months(date(2023, 11, 1), 4);
        assert_eq!(
            months,
            vec![
                date(2023, 12, 1),
                date(2024, 1, 1),
                date(2024, 2, 1),
                date(2024, 3, 1),
            ]
        );
    }

    #[test]
    fn test_future_months_zero_horizon() {
        assert!(future_months(date(2023, 11, 1), 0).is_empty());
    }

    #[test]
    fn test_parse_month_formats() {
        assert_eq!(parse_month("2023-04-01").unwrap(), date(2023, 4, 1));
        assert_eq!(parse_month("2023-04-17").unwrap(), date(2023, 4, 1));
        assert_eq!(parse_month("2023-04").unwrap(), date(2023, 4, 1));
        assert!(parse_month("April 2023").is_err());
        assert!(parse_month("").is_err());
    }
}
