//! Read-only inspection of the actuals store: table list, schema, row count,
//! a row sample, and a per-account summary aggregate. Informational only.

use crate::error::Result;
use crate::schema::ActualRecord;
use crate::store::{ColumnInfo, Store};
use chrono::NaiveDate;
use serde::Serialize;

/// Per-account aggregate mirroring the summary query:
/// count, first/last month, total and average amount.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub record_count: usize,
    pub first_month: NaiveDate,
    pub last_month: NaiveDate,
    pub total_amount: f64,
    pub avg_amount: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreOverview {
    pub tables: Vec<String>,
    pub columns: Vec<ColumnInfo>,
    pub row_count: usize,
    pub sample_rows: Vec<ActualRecord>,
    pub account_summaries: Vec<AccountSummary>,
}

/// Gathers everything the inspection CLI shows in one pass.
pub fn overview(store: &Store, sample_limit: usize) -> Result<StoreOverview> {
    store.validate_schema()?;
    Ok(StoreOverview {
        tables: store.table_names()?,
        columns: store.actuals_columns()?,
        row_count: store.row_count()?,
        sample_rows: store.sample_rows(sample_limit)?,
        account_summaries: store.account_summaries()?,
    })
}

/// Plain-text rendering for the terminal.
pub fn render_text(overview: &StoreOverview) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    out.push_str(&rule);
    out.push_str("\nTables:\n");
    for table in &overview.tables {
        out.push_str(&format!("  - {}\n", table));
    }

    out.push_str(&format!("\n{}\nactuals schema:\n", rule));
    for column in &overview.columns {
        out.push_str(&format!(
            "  {:<10} {:<6} {}\n",
            column.name,
            column.type_name,
            if column.not_null { "NOT NULL" } else { "" }
        ));
    }

    out.push_str(&format!("\nTotal records: {}\n", overview.row_count));

    out.push_str(&format!(
        "\n{}\nFirst {} rows:\n",
        rule,
        overview.sample_rows.len()
    ));
    for row in &overview.sample_rows {
        out.push_str(&format!(
            "  {}  {:<20} {:>12.2}\n",
            row.month.format("%Y-%m-%d"),
            row.account,
            row.amount
        ));
    }

    out.push_str(&format!("\n{}\nSummary by account:\n", rule));
    for s in &overview.account_summaries {
        out.push_str(&format!(
            "  {:<20} {:>5} rows  {} .. {}  total {:>14.2}  avg {:>12.2}\n",
            s.account,
            s.record_count,
            s.first_month.format("%Y-%m"),
            s.last_month.format("%Y-%m"),
            s.total_amount,
            s.avg_amount
        ));
    }

    out
}
