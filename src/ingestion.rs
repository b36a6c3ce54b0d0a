use crate::error::{PipelineError, Result};
use crate::schema::ActualRecord;
use crate::utils::parse_month;
use log::info;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["month", "account", "amount"];

/// Reads the actuals CSV into normalized records.
///
/// The file must carry `month`, `account` and `amount` columns (any order,
/// extra columns ignored). A missing column, an unparseable date, or an
/// unparseable amount is a hard failure for the whole load; there is no
/// partial ingestion.
pub fn read_actuals_csv(path: &Path) -> Result<Vec<ActualRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut column_index = [0usize; 3];
    for (i, name) in REQUIRED_COLUMNS.iter().enumerate() {
        column_index[i] = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| PipelineError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;
    }
    let [month_col, account_col, amount_col] = column_index;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        // Data rows are 1-based in diagnostics; the header is row 0.
        let row_number = idx + 1;

        let month_str = row.get(month_col).unwrap_or("");
        let month = parse_month(month_str).map_err(|_| PipelineError::InvalidMonth {
            path: path.to_path_buf(),
            row: row_number,
            value: month_str.to_string(),
        })?;

        let account = row.get(account_col).unwrap_or("").trim().to_string();

        let amount_str = row.get(amount_col).unwrap_or("");
        let amount: f64 =
            amount_str
                .trim()
                .parse()
                .map_err(|_| PipelineError::InvalidAmount {
                    path: path.to_path_buf(),
                    row: row_number,
                    value: amount_str.to_string(),
                })?;

        records.push(ActualRecord {
            month,
            account,
            amount,
        });
    }

    info!("Read {} actuals rows from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_and_normalizes_months() {
        let file = write_csv(
            "month,account,amount\n\
             2023-01-15,Revenue,1000.5\n\
             2023-02,Revenue,1100\n",
        );
        let records = read_actuals_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].month, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(records[0].amount, 1000.5);
        assert_eq!(records[1].month, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let file = write_csv("amount,month,account\n50,2023-03-01,Rent\n");
        let records = read_actuals_csv(file.path()).unwrap();
        assert_eq!(records[0].account, "Rent");
        assert_eq!(records[0].amount, 50.0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv("month,amount\n2023-01-01,5\n");
        let result = read_actuals_csv(file.path());
        assert!(
            matches!(result, Err(PipelineError::MissingColumn { column, .. }) if column == "account")
        );
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let file = write_csv("month,account,amount\nJan-2023,Revenue,5\n");
        let result = read_actuals_csv(file.path());
        assert!(matches!(
            result,
            Err(PipelineError::InvalidMonth { row: 1, .. })
        ));
    }

    #[test]
    fn test_bad_amount_is_fatal() {
        let file = write_csv("month,account,amount\n2023-01-01,Revenue,abc\n");
        let result = read_actuals_csv(file.path());
        assert!(matches!(
            result,
            Err(PipelineError::InvalidAmount { row: 1, .. })
        ));
    }
}
