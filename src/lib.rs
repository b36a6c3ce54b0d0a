//! # FP&A Forecast Pipeline
//!
//! A small batch pipeline for financial planning & analysis:
//!
//! 1. **Load**: ingest a CSV of monthly actuals (month, account, amount) and
//!    full-replace them into a SQLite store.
//! 2. **Forecast**: per account, project the next `horizon_months` with a
//!    seasonal-naive model (each future month repeats the actual from one
//!    full season earlier; accounts with less than one season of history get
//!    a flat forecast of their last value).
//! 3. **Report**: union actuals and forecast per (account, month) with
//!    variance columns, written to a flat CSV and a two-sheet XLSX report.
//!
//! The whole run is synchronous and deterministic: the same input data
//! produces byte-identical output files.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fpa_pipeline::{run_load_stage, run_forecast_stage, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! run_load_stage(&config)?;
//! let outputs = run_forecast_stage(&config)?;
//! println!("wrote {}", outputs.forecast_csv.display());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod ingestion;
pub mod inspect;
pub mod report;
pub mod schema;
pub mod store;
pub mod utils;
pub mod variance;

pub use config::PipelineConfig;
pub use engine::{build_combined_rows, group_by_account};
pub use error::{PipelineError, Result};
pub use forecast::{forecast_account, seasonal_naive};
pub use ingestion::read_actuals_csv;
pub use report::{write_forecast_csv, write_variance_xlsx};
pub use schema::*;
pub use store::Store;
pub use variance::compose_account;

use log::info;
use std::path::PathBuf;

/// Paths produced by a successful forecast stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastOutputs {
    pub forecast_csv: PathBuf,
    pub variance_xlsx: PathBuf,
}

/// Stage 1: read the actuals CSV and full-replace the store with it.
/// Returns the number of rows loaded.
pub fn run_load_stage(config: &PipelineConfig) -> Result<usize> {
    let records = read_actuals_csv(&config.input_csv)?;
    let mut store = Store::open(&config.db_path)?;
    store.load_actuals(&records)
}

/// Stage 2: query the store, forecast every account, compose the variance
/// table, and emit both reports.
pub fn run_forecast_stage(config: &PipelineConfig) -> Result<ForecastOutputs> {
    let store = Store::open_read_only(&config.db_path)?;
    let monthly = store.monthly_actuals()?;

    let rows = build_combined_rows(&monthly, config.horizon_months, config.season_length)?;

    std::fs::create_dir_all(&config.out_dir)?;
    let outputs = ForecastOutputs {
        forecast_csv: config.forecast_csv_path(),
        variance_xlsx: config.variance_xlsx_path(),
    };
    write_forecast_csv(&rows, &outputs.forecast_csv)?;
    write_variance_xlsx(&rows, config.horizon_months, &outputs.variance_xlsx)?;

    info!(
        "Forecast stage complete: {} combined rows, outputs in {}",
        rows.len(),
        config.out_dir.display()
    );
    Ok(outputs)
}
