//! Pipeline runner: load the actuals into SQLite, then generate the forecast
//! and variance reports. Halts at the first failing stage with a
//! stage-specific exit code (1 = load, 2 = forecast).

use clap::Parser;
use fpa_pipeline::{run_forecast_stage, run_load_stage, PipelineConfig};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "fpa",
    version,
    about = "Financial forecasting pipeline: load actuals, then forecast and report"
)]
struct Args {
    /// JSON config file; CLI flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Actuals CSV to load (columns: month, account, amount)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Directory for the CSV and XLSX reports
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Number of future months to forecast
    #[arg(long, value_name = "N")]
    horizon: Option<usize>,

    /// Periods per seasonal cycle
    #[arg(long, value_name = "N")]
    season_length: Option<usize>,
}

impl Args {
    fn into_config(self) -> fpa_pipeline::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = self.input {
            config.input_csv = input;
        }
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if let Some(horizon) = self.horizon {
            config.horizon_months = horizon;
        }
        if let Some(season_length) = self.season_length {
            config.season_length = season_length;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Error: invalid configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    println!("{}", "=".repeat(60));
    println!("Financial Forecasting Pipeline");
    println!("{}", "=".repeat(60));

    println!("\n[Step 1/2] Loading actuals into SQLite...");
    match run_load_stage(&config) {
        Ok(count) => println!("Loaded {} rows into {}", count, config.db_path.display()),
        Err(e) => {
            error!("Load stage failed: {}", e);
            eprintln!("Error: load stage failed: {}", e);
            return ExitCode::from(1);
        }
    }

    println!("\n[Step 2/2] Generating forecast and variance report...");
    let outputs = match run_forecast_stage(&config) {
        Ok(outputs) => outputs,
        Err(e) => {
            error!("Forecast stage failed: {}", e);
            eprintln!("Error: forecast stage failed: {}", e);
            return ExitCode::from(2);
        }
    };

    println!("\n{}", "=".repeat(60));
    println!("Pipeline completed! Output files:");
    println!("  - {}", outputs.forecast_csv.display());
    println!("  - {}", outputs.variance_xlsx.display());
    println!("{}", "=".repeat(60));
    ExitCode::SUCCESS
}
