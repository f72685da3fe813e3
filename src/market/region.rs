//! Market regions and per-run region settings

use serde::{Deserialize, Serialize};

/// Default demand-qualifying fraction when a region carries none
pub const DEFAULT_DEMAND_FRACTION: f64 = 0.5;

/// Default attach-rate ramp
pub const DEFAULT_ATTACH_START: f64 = 0.6;
pub const DEFAULT_ATTACH_END: f64 = 0.9;

/// Static reference data for one region (state, ISO zone, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRegion {
    /// Region identifier
    #[serde(rename = "region")]
    pub id: String,

    /// Housing units in the region
    pub housing_units: f64,

    /// Share of homes qualifying for the hardware retrofit.
    /// Overrides the run-wide qualifying fraction when present.
    #[serde(default)]
    pub retrofit_fraction: Option<f64>,

    /// Share of qualifying homes with EV-readiness or equivalent demand
    #[serde(default)]
    pub demand_fraction: Option<f64>,
}

impl MarketRegion {
    pub fn new(id: impl Into<String>, housing_units: f64) -> Self {
        Self {
            id: id.into(),
            housing_units,
            retrofit_fraction: None,
            demand_fraction: None,
        }
    }

    /// Total addressable homes
    pub fn tam(&self, qualifying_fraction: f64) -> f64 {
        self.housing_units * self.retrofit_fraction.unwrap_or(qualifying_fraction)
    }
}

/// Per-run settings for one selected region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionParams {
    /// Years before the region's demand ramp starts
    pub activation_delay: u32,

    /// Share of TAM that is serviceable
    pub demand_fraction: f64,

    /// Attach rate in the first active year
    pub attach_start: f64,

    /// Attach rate in the final projection year
    pub attach_end: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            activation_delay: 0,
            demand_fraction: DEFAULT_DEMAND_FRACTION,
            attach_start: DEFAULT_ATTACH_START,
            attach_end: DEFAULT_ATTACH_END,
        }
    }
}

impl RegionParams {
    /// Default settings seeded from the region's own reference data
    pub fn for_region(region: &MarketRegion) -> Self {
        Self {
            demand_fraction: region.demand_fraction.unwrap_or(DEFAULT_DEMAND_FRACTION),
            ..Default::default()
        }
    }
}
