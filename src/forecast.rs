//! Seasonal-naive forecasting.
//!
//! Each future month repeats the actual observed one full season earlier:
//! with monthly data and a 12-period season, next March is forecast as last
//! March. Accounts without a full season of history fall back to a flat
//! forecast of their most recent value.

use crate::error::{PipelineError, Result};
use crate::schema::{AccountHistory, ForecastPoint};
use crate::utils::future_months;
use log::debug;

/// Forecasts `horizon` values from an ordered value history.
///
/// Purely positional: no date arithmetic, no randomness, no external state.
/// The same inputs always produce the same output.
pub fn seasonal_naive(history: &[f64], horizon: usize, season_length: usize) -> Result<Vec<f64>> {
    let last = *history
        .last()
        .ok_or_else(|| PipelineError::EmptyHistory("<unnamed>".to_string()))?;

    if history.len() >= season_length {
        // The last full seasonal cycle, cycled until horizon entries exist.
        let base = &history[history.len() - season_length..];
        Ok(base.iter().cycle().take(horizon).copied().collect())
    } else {
        Ok(vec![last; horizon])
    }
}

/// Forecasts one account: `horizon` contiguous future months starting the
/// month after the account's last observed month, each carrying the
/// seasonal-naive value for its position.
pub fn forecast_account(
    history: &AccountHistory,
    horizon: usize,
    season_length: usize,
) -> Result<Vec<ForecastPoint>> {
    let values = seasonal_naive(&history.values(), horizon, season_length)
        .map_err(|_| PipelineError::EmptyHistory(history.account.clone()))?;
    let months = future_months(history.last_month(), horizon);

    debug!(
        "Account '{}': {} historical months, forecasting {} ahead",
        history.account,
        history.points().len(),
        horizon
    );

    Ok(months
        .into_iter()
        .zip(values)
        .map(|(month, forecast_amount)| ForecastPoint {
            month,
            account: history.account.clone(),
            forecast_amount,
        })
        .collect())
}
