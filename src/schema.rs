use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw actuals row as loaded from the input file.
///
/// `month` is always normalized to the first day of its calendar month.
/// (month, account) pairs are not unique in the source data; the store keeps
/// every row and the query layer sums amounts sharing a (month, account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualRecord {
    pub month: NaiveDate,
    pub account: String,
    pub amount: f64,
}

/// The query-layer row shape: amounts aggregated per (account, month).
///
/// This is the only shape the forecast stage depends on — how the store
/// produces it is its own business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActual {
    pub month: NaiveDate,
    pub account: String,
    pub actual_amount: f64,
}

/// An account's observed history, ordered by month.
#[derive(Debug, Clone)]
pub struct AccountHistory {
    pub account: String,
    points: Vec<(NaiveDate, f64)>,
}

impl AccountHistory {
    /// Builds a history from (month, amount) points already sorted by month.
    /// An empty history is rejected outright rather than flowing into the
    /// forecast stage and producing silently wrong output.
    pub fn new(account: String, points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        if points.is_empty() {
            return Err(PipelineError::EmptyHistory(account));
        }
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        Ok(Self { account, points })
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Last observed month. Non-empty is guaranteed by construction.
    pub fn last_month(&self) -> NaiveDate {
        self.points[self.points.len() - 1].0
    }
}

/// A single forecast value for one future month of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: NaiveDate,
    pub account: String,
    pub forecast_amount: f64,
}

/// One output row of the combined actuals + forecast table.
///
/// `variance` and `variance_pct` are only ever populated for rows that carry
/// a forecast; `variance_pct` additionally requires a non-zero forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub month: NaiveDate,
    pub account: String,
    pub actual_amount: Option<f64>,
    pub forecast_amount: Option<f64>,
    pub variance: Option<f64>,
    pub variance_pct: Option<f64>,
}
