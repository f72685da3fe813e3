//! Load market regions from CSV
//!
//! Expected columns: `region,housing_units,retrofit_fraction,demand_fraction`.
//! The two fraction columns may be left empty or omitted.

use super::region::MarketRegion;
use crate::error::Result;
use csv::Reader;
use log::info;
use std::io::Read;
use std::path::Path;

/// Load all regions from a CSV file
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<Vec<MarketRegion>> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;
    let regions = collect_regions(&mut reader)?;
    info!("Loaded {} market regions from {}", regions.len(), path.display());
    Ok(regions)
}

/// Load regions from any reader (e.g., string buffer, network stream)
pub fn load_regions_from_reader<R: Read>(reader: R) -> Result<Vec<MarketRegion>> {
    let mut csv_reader = Reader::from_reader(reader);
    collect_regions(&mut csv_reader)
}

fn collect_regions<R: Read>(reader: &mut Reader<R>) -> Result<Vec<MarketRegion>> {
    let mut regions = Vec::new();
    for result in reader.deserialize() {
        let region: MarketRegion = result?;
        regions.push(region);
    }
    Ok(regions)
}
