//! Per-account variance composition.
//!
//! Unions an account's historical months with its forecast months into one
//! table. Historical rows carry only the actual, forecast rows only the
//! forecast; variance materializes only where both coexist for a month.

use crate::schema::{AccountHistory, CombinedRow, ForecastPoint};

/// Null-propagating subtraction: `Some(a - f)` only when both sides exist.
fn variance_of(actual: Option<f64>, forecast: Option<f64>) -> Option<f64> {
    match (actual, forecast) {
        (Some(a), Some(f)) => Some(a - f),
        _ => None,
    }
}

/// variance / forecast, guarded: no forecast or a zero forecast yields None,
/// never a division by zero.
fn variance_pct_of(variance: Option<f64>, forecast: Option<f64>) -> Option<f64> {
    match (variance, forecast) {
        (Some(v), Some(f)) if f != 0.0 => Some(v / f),
        _ => None,
    }
}

/// Combines one account's history and forecast into chronological rows:
/// historical months first, then forecast months. Should a month appear on
/// both sides, its row carries both values and a real variance.
pub fn compose_account(history: &AccountHistory, forecast: &[ForecastPoint]) -> Vec<CombinedRow> {
    let mut rows: Vec<CombinedRow> = Vec::with_capacity(history.points().len() + forecast.len());

    for &(month, actual) in history.points() {
        rows.push(CombinedRow {
            month,
            account: history.account.clone(),
            actual_amount: Some(actual),
            forecast_amount: None,
            variance: None,
            variance_pct: None,
        });
    }

    for point in forecast {
        // Overlap with a historical month folds into the existing row.
        if let Some(row) = rows.iter_mut().find(|r| r.month == point.month) {
            row.forecast_amount = Some(point.forecast_amount);
        } else {
            rows.push(CombinedRow {
                month: point.month,
                account: history.account.clone(),
                actual_amount: None,
                forecast_amount: Some(point.forecast_amount),
                variance: None,
                variance_pct: None,
            });
        }
    }

    for row in &mut rows {
        row.variance = variance_of(row.actual_amount, row.forecast_amount);
        row.variance_pct = variance_pct_of(row.variance, row.forecast_amount);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn point(y: i32, m: u32, amount: f64) -> ForecastPoint {
        ForecastPoint {
            month: date(y, m),
            account: "A".to_string(),
            forecast_amount: amount,
        }
    }

    fn history(points: Vec<(NaiveDate, f64)>) -> AccountHistory {
        AccountHistory::new("A".to_string(), points).unwrap()
    }

    #[test]
    fn test_disjoint_months_have_null_variance() {
        let h = history(vec![(date(2023, 1), 100.0), (date(2023, 2), 110.0)]);
        let fc = vec![point(2023, 3, 105.0), point(2023, 4, 115.0)];

        let rows = compose_account(&h, &fc);
        assert_eq!(rows.len(), 4);

        // Historical rows first, chronological, forecast-side null.
        assert_eq!(rows[0].month, date(2023, 1));
        assert_eq!(rows[0].actual_amount, Some(100.0));
        assert_eq!(rows[0].forecast_amount, None);
        assert_eq!(rows[0].variance, None);
        assert_eq!(rows[0].variance_pct, None);

        // Forecast rows after, actual-side null.
        assert_eq!(rows[2].month, date(2023, 3));
        assert_eq!(rows[2].actual_amount, None);
        assert_eq!(rows[2].forecast_amount, Some(105.0));
        assert_eq!(rows[2].variance, None);
        assert_eq!(rows[2].variance_pct, None);
    }

    #[test]
    fn test_overlapping_month_computes_variance() {
        let h = history(vec![(date(2023, 1), 110.0)]);
        let fc = vec![point(2023, 1, 100.0)];

        let rows = compose_account(&h, &fc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].actual_amount, Some(110.0));
        assert_eq!(rows[0].forecast_amount, Some(100.0));
        assert_eq!(rows[0].variance, Some(10.0));
        assert!((rows[0].variance_pct.unwrap() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_zero_forecast_guards_percentage() {
        let h = history(vec![(date(2023, 1), 5.0)]);
        let fc = vec![point(2023, 1, 0.0)];

        let rows = compose_account(&h, &fc);
        assert_eq!(rows[0].variance, Some(5.0));
        assert_eq!(rows[0].variance_pct, None);
    }

    #[test]
    fn test_rows_tagged_with_account() {
        let h = history(vec![(date(2023, 1), 1.0)]);
        let fc = vec![point(2023, 2, 1.0)];
        let rows = compose_account(&h, &fc);
        assert!(rows.iter().all(|r| r.account == "A"));
    }
}
