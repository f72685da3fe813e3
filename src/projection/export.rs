//! CSV export of yearly projection rows
//!
//! Numbers are written with `Display`, which gives the shortest decimal that
//! parses back to the same value: no exponent, no separators, no currency
//! symbol.

use super::results::YearlyResult;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

fn to_record(row: &YearlyResult) -> [String; 18] {
    [
        row.year.to_string(),
        row.units.to_string(),
        row.capacity_mw.to_string(),
        row.sites.to_string(),
        row.attach_rate.to_string(),
        row.attached_sites.to_string(),
        row.hardware_revenue.to_string(),
        row.subscription_revenue.to_string(),
        row.arbitrage_revenue.to_string(),
        row.capacity_revenue.to_string(),
        row.event_revenue.to_string(),
        row.market_fees.to_string(),
        row.total_revenue.to_string(),
        row.gross_profit.to_string(),
        row.core_ebitda.to_string(),
        row.amortization.to_string(),
        row.reported_ebitda.to_string(),
        row.enterprise_value.to_string(),
    ]
}

/// Write a header plus one row per year
pub fn write_csv<W: Write>(writer: W, rows: &[YearlyResult]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(YearlyResult::CSV_HEADER)?;
    for row in rows {
        csv_writer.write_record(to_record(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file, replacing any existing file
pub fn write_csv_path<P: AsRef<Path>>(path: P, rows: &[YearlyResult]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(file, rows)?;
    info!("Wrote {} projection years to {}", rows.len(), path.display());
    Ok(())
}

/// Read rows previously written by `write_csv`
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<YearlyResult>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: YearlyResult = result?;
        rows.push(row);
    }

    Ok(rows)
}
