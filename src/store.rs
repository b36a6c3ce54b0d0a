//! SQLite store for actuals.
//!
//! One table, `actuals (month TEXT, account TEXT, amount REAL)`, replaced
//! wholesale on every load. Months are stored as ISO `YYYY-MM-DD` strings
//! normalized to the first of the month. No uniqueness constraint: duplicate
//! (month, account) rows are kept and summed at query time.

use crate::error::{PipelineError, Result};
use crate::schema::{ActualRecord, MonthlyActual};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

const MONTHLY_ACTUALS_SQL: &str = "
    SELECT month, account, SUM(amount) AS actual_amount
    FROM actuals
    GROUP BY account, month
    ORDER BY account, month
";

fn parse_stored_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        PipelineError::SchemaMismatch(format!("actuals.month holds non-ISO value '{}'", value))
    })
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if necessary) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Opens an existing database without write access. Fails if the file
    /// does not exist — the inspection utility must never create one.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Full-replace load: drops and recreates `actuals`, then inserts every
    /// record inside a single transaction.
    pub fn load_actuals(&mut self, records: &[ActualRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS actuals;
             CREATE TABLE actuals (
                 month   TEXT NOT NULL,
                 account TEXT NOT NULL,
                 amount  REAL NOT NULL
             );",
        )?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO actuals (month, account, amount) VALUES (?1, ?2, ?3)")?;
            for record in records {
                stmt.execute(params![
                    record.month.format("%Y-%m-%d").to_string(),
                    record.account,
                    record.amount,
                ])?;
            }
        }
        tx.commit()?;

        info!("Loaded {} rows into actuals", records.len());
        Ok(records.len())
    }

    /// The query contract the forecast stage depends on: one row per
    /// (account, month) with amounts summed, ordered by account then month.
    pub fn monthly_actuals(&self) -> Result<Vec<MonthlyActual>> {
        self.validate_schema()?;

        let mut stmt = self.conn.prepare(MONTHLY_ACTUALS_SQL)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (month_str, account, actual_amount) = row?;
            result.push(MonthlyActual {
                month: parse_stored_month(&month_str)?,
                account,
                actual_amount,
            });
        }
        Ok(result)
    }

    /// Verifies the `actuals` table exists with the expected columns before
    /// any stage reads from it, instead of letting a malformed store surface
    /// as a confusing SQL error mid-query.
    pub fn validate_schema(&self) -> Result<()> {
        let columns = self.actuals_columns()?;
        if columns.is_empty() {
            return Err(PipelineError::SchemaMismatch(
                "table 'actuals' does not exist (run the load stage first)".to_string(),
            ));
        }
        for required in ["month", "account", "amount"] {
            if !columns.iter().any(|c| c.name == required) {
                return Err(PipelineError::SchemaMismatch(format!(
                    "table 'actuals' is missing column '{}'",
                    required
                )));
            }
        }
        Ok(())
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn actuals_columns(&self) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(actuals)")?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    type_name: row.get(2)?,
                    not_null: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    pub fn row_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM actuals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Per-account aggregate over the raw rows: record count, first/last
    /// month, total and average amount.
    pub fn account_summaries(&self) -> Result<Vec<crate::inspect::AccountSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT account, COUNT(*), MIN(month), MAX(month), SUM(amount), AVG(amount)
             FROM actuals
             GROUP BY account
             ORDER BY account",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (account, count, first, last, total, avg) = row?;
            summaries.push(crate::inspect::AccountSummary {
                account,
                record_count: count as usize,
                first_month: parse_stored_month(&first)?,
                last_month: parse_stored_month(&last)?,
                total_amount: total,
                avg_amount: avg,
            });
        }
        Ok(summaries)
    }

    /// The first `limit` raw rows in insertion order.
    pub fn sample_rows(&self, limit: usize) -> Result<Vec<ActualRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT month, account, amount FROM actuals LIMIT ?1")?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (month_str, account, amount) = row?;
            result.push(ActualRecord {
                month: parse_stored_month(&month_str)?,
                account,
                amount,
            });
        }
        Ok(result)
    }
}

/// One column of the `actuals` table, straight from `PRAGMA table_info`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub type_name: String,
    pub not_null: bool,
}
