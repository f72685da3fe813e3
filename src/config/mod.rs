//! Simulation configuration: one immutable bundle per projection run

mod params;
pub mod loader;

pub use params::{
    DevelopmentParams, FleetParams, GridCapacityParams, GrossMarginMethod, HardwareParams,
    MarginParams, MarketFeeParams, RecurringParams, RevenueStreams, ValuationMethod,
    DEFAULT_SITES_PER_MW,
};

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Everything the projection engine needs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of yearly periods to project
    pub horizon: u32,

    pub hardware: HardwareParams,
    pub development: DevelopmentParams,
    pub fleet: FleetParams,
    pub recurring: Option<RecurringParams>,
    pub grid_capacity: Option<GridCapacityParams>,
    pub streams: RevenueStreams,
    pub margins: MarginParams,
    pub valuation: ValuationMethod,
    pub market_fees: MarketFeeParams,

    /// Per-year attach rate, one entry per projection year.
    /// When absent every enrolled site counts as attached.
    pub attach_rate_curve: Option<Vec<f64>>,

    /// Discount rate for the NPV summary figure
    pub discount_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon: 5,
            hardware: HardwareParams::default(),
            development: DevelopmentParams::default(),
            fleet: FleetParams::default(),
            recurring: Some(RecurringParams::default()),
            grid_capacity: None,
            streams: RevenueStreams::default(),
            margins: MarginParams::default(),
            valuation: ValuationMethod::default(),
            market_fees: MarketFeeParams::default(),
            attach_rate_curve: None,
            discount_rate: 0.10,
        }
    }
}

impl SimulationConfig {
    /// Check the invariants the engine relies on but does not enforce
    pub fn validate(&self) -> Result<()> {
        if let Some(curve) = &self.attach_rate_curve {
            if curve.len() != self.horizon as usize {
                return Err(ModelError::AttachCurveLength {
                    expected: self.horizon as usize,
                    actual: curve.len(),
                });
            }
        }
        Ok(())
    }

    /// Replace the attach-rate curve, rejecting curves that do not match the horizon
    pub fn with_attach_rate_curve(mut self, curve: Vec<f64>) -> Result<Self> {
        self.attach_rate_curve = Some(curve);
        self.validate()?;
        Ok(self)
    }

    /// Attach rate for a 0-based year index
    pub fn attach_rate(&self, year_index: usize) -> Option<f64> {
        match &self.attach_rate_curve {
            Some(curve) => curve.get(year_index).copied(),
            None => Some(1.0),
        }
    }
}
