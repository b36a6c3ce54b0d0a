use crate::error::Result;
use crate::forecast::forecast_account;
use crate::schema::{AccountHistory, CombinedRow, MonthlyActual};
use crate::variance::compose_account;
use log::{debug, info};

/// Splits the query output into per-account histories, preserving the order
/// accounts are first encountered. Input rows arrive ordered by (account,
/// month), so each account's points are already chronological.
pub fn group_by_account(rows: &[MonthlyActual]) -> Result<Vec<AccountHistory>> {
    let mut histories: Vec<(String, Vec<(chrono::NaiveDate, f64)>)> = Vec::new();

    for row in rows {
        match histories.last_mut() {
            Some((account, points)) if *account == row.account => {
                points.push((row.month, row.actual_amount));
            }
            _ => {
                histories.push((row.account.clone(), vec![(row.month, row.actual_amount)]));
            }
        }
    }

    histories
        .into_iter()
        .map(|(account, points)| AccountHistory::new(account, points))
        .collect()
}

/// The forecast stage proper: per account, forecast `horizon` months ahead
/// and compose the combined actual/forecast/variance table, then concatenate
/// account blocks in encounter order. Pure and deterministic — identical
/// input always yields identical rows.
pub fn build_combined_rows(
    rows: &[MonthlyActual],
    horizon: usize,
    season_length: usize,
) -> Result<Vec<CombinedRow>> {
    let histories = group_by_account(rows)?;
    info!(
        "Forecasting {} accounts, horizon {} months, season length {}",
        histories.len(),
        horizon,
        season_length
    );

    let mut combined = Vec::new();
    for history in &histories {
        let forecast = forecast_account(history, horizon, season_length)?;
        let account_rows = compose_account(history, &forecast);
        debug!(
            "Account '{}': {} combined rows",
            history.account,
            account_rows.len()
        );
        combined.extend(account_rows);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn actual(account: &str, y: i32, m: u32, amount: f64) -> MonthlyActual {
        MonthlyActual {
            month: date(y, m),
            account: account.to_string(),
            actual_amount: amount,
        }
    }

    #[test]
    fn test_grouping_preserves_encounter_order() {
        let rows = vec![
            actual("B", 2023, 1, 1.0),
            actual("B", 2023, 2, 2.0),
            actual("A", 2023, 1, 3.0),
        ];
        let histories = group_by_account(&rows).unwrap();
        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].account, "B");
        assert_eq!(histories[1].account, "A");
        assert_eq!(histories[0].points().len(), 2);
    }

    #[test]
    fn test_combined_rows_per_account_counts() {
        // 13 months of constant actuals per account, horizon 6:
        // 13 actual rows + 6 forecast rows each.
        let mut rows = Vec::new();
        for account in ["A", "B"] {
            let value = if account == "A" { 100.0 } else { 200.0 };
            for i in 0..13u32 {
                let (y, m) = (2023 + (i / 12) as i32, i % 12 + 1);
                rows.push(actual(account, y, m, value));
            }
        }

        let combined = build_combined_rows(&rows, 6, 12).unwrap();
        assert_eq!(combined.len(), 38);

        let a_rows: Vec<_> = combined.iter().filter(|r| r.account == "A").collect();
        assert_eq!(a_rows.len(), 19);

        let a_forecast: Vec<_> = a_rows
            .iter()
            .filter(|r| r.forecast_amount.is_some())
            .collect();
        assert_eq!(a_forecast.len(), 6);
        assert!(a_forecast.iter().all(|r| r.forecast_amount == Some(100.0)));
        assert!(a_forecast.iter().all(|r| r.actual_amount.is_none()));
        assert!(a_forecast.iter().all(|r| r.variance.is_none()));

        // Forecast months continue from the last actual month.
        assert_eq!(a_forecast[0].month, date(2024, 2));
        assert_eq!(a_forecast[5].month, date(2024, 7));
    }

    #[test]
    fn test_determinism() {
        let rows = vec![
            actual("A", 2023, 1, 10.0),
            actual("A", 2023, 2, 20.0),
            actual("B", 2023, 1, 30.0),
        ];
        let first = build_combined_rows(&rows, 6, 12).unwrap();
        let second = build_combined_rows(&rows, 6, 12).unwrap();
        assert_eq!(first, second);
    }
}
