//! Report emission: the flat CSV and the two-sheet XLSX variance report.

use crate::error::Result;
use crate::schema::CombinedRow;
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const HEADERS: [&str; 6] = [
    "month",
    "account",
    "actual_amount",
    "forecast_amount",
    "variance",
    "variance_pct",
];

fn field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes every combined row to a flat CSV, preserving row order. Nulls are
/// empty fields.
pub fn write_forecast_csv(rows: &[CombinedRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    for row in rows {
        writer.write_record([
            row.month.format("%Y-%m-%d").to_string(),
            row.account.clone(),
            field(row.actual_amount),
            field(row.forecast_amount),
            field(row.variance),
            field(row.variance_pct),
        ])?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_sheet(sheet: &mut Worksheet, rows: &[CombinedRow]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, row.month.format("%Y-%m-%d").to_string())?;
        sheet.write_string(r, 1, &row.account)?;
        for (col, value) in [
            (2, row.actual_amount),
            (3, row.forecast_amount),
            (4, row.variance),
            (5, row.variance_pct),
        ] {
            if let Some(v) = value {
                sheet.write_number(r, col, v)?;
            }
        }
    }
    Ok(())
}

/// The per-account tail window shown on the Summary sheet: rows re-sorted by
/// (account, month), then each account trimmed to its most recent
/// `3 + horizon` rows — the last three actual months plus the whole forecast.
pub fn summary_window(rows: &[CombinedRow], horizon: usize) -> Vec<CombinedRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| (&a.account, a.month).cmp(&(&b.account, b.month)));

    let window = 3 + horizon;
    let mut summary = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let account = &sorted[start].account;
        let end = start
            + sorted[start..]
                .iter()
                .take_while(|r| &r.account == account)
                .count();
        let from = end.saturating_sub(window).max(start);
        summary.extend_from_slice(&sorted[from..end]);
        start = end;
    }
    summary
}

/// Writes the XLSX report: "Forecast+Variance" holds the full combined table,
/// "Summary" the per-account tail window.
pub fn write_variance_xlsx(rows: &[CombinedRow], horizon: usize, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let detail = workbook.add_worksheet().set_name("Forecast+Variance")?;
    write_sheet(detail, rows)?;

    let summary_rows = summary_window(rows, horizon);
    let summary = workbook.add_worksheet().set_name("Summary")?;
    write_sheet(summary, &summary_rows)?;

    workbook.save(path)?;
    info!("Wrote variance report to {}", path.display());
    Ok(())
}
