use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_horizon() -> usize {
    6
}

fn default_season_length() -> usize {
    12
}

fn default_input() -> PathBuf {
    PathBuf::from("data/actuals.csv")
}

fn default_db() -> PathBuf {
    PathBuf::from("data/fpa.db")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("outputs")
}

/// Pipeline configuration. Every stage receives the paths and parameters it
/// needs from here; nothing reads a module-level constant, so tests can point
/// a run at throwaway files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of future months to forecast.
    #[serde(default = "default_horizon")]
    pub horizon_months: usize,
    /// Periods per seasonal cycle.
    #[serde(default = "default_season_length")]
    pub season_length: usize,
    /// Actuals CSV consumed by the load stage.
    #[serde(default = "default_input")]
    pub input_csv: PathBuf,
    /// SQLite database holding the `actuals` table.
    #[serde(default = "default_db")]
    pub db_path: PathBuf,
    /// Directory receiving the CSV and XLSX reports.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizon_months: default_horizon(),
            season_length: default_season_length(),
            input_csv: default_input(),
            db_path: default_db(),
            out_dir: default_out_dir(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn forecast_csv_path(&self) -> PathBuf {
        self.out_dir.join("forecast_output.csv")
    }

    pub fn variance_xlsx_path(&self) -> PathBuf {
        self.out_dir.join("variance_report.xlsx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.horizon_months, 6);
        assert_eq!(config.season_length, 12);
        assert_eq!(config.forecast_csv_path(), PathBuf::from("outputs/forecast_output.csv"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"horizon_months": 3}"#).unwrap();
        assert_eq!(config.horizon_months, 3);
        assert_eq!(config.season_length, 12);
        assert_eq!(config.db_path, PathBuf::from("data/fpa.db"));
    }
}
