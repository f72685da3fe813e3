//! State carried from one projection year to the next

use crate::config::SimulationConfig;

/// Compounding business state at the start of a projection year
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Current projection year (1-indexed)
    pub year: u32,

    /// Hardware kits shipped this year
    pub units: u64,

    /// Managed flexible capacity this year (MW)
    pub capacity_mw: f64,
}

impl ProjectionState {
    /// Year-1 state taken straight from the configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            year: 1,
            units: config.hardware.units_year1,
            capacity_mw: config.fleet.managed_capacity_year1,
        }
    }

    /// Grow shipments and capacity into the next year.
    ///
    /// Shipments are truncated to whole kits every year, so growth compounds
    /// on the truncated figure.
    pub fn advance_year(&mut self, config: &SimulationConfig) {
        self.year += 1;
        self.units = grow_units(self.units, config.hardware.unit_growth_rate);
        self.capacity_mw *= 1.0 + config.fleet.capacity_growth_rate;
    }

    /// Homes aggregated behind the managed capacity
    pub fn sites(&self, sites_per_mw: f64) -> f64 {
        self.capacity_mw * sites_per_mw
    }
}

/// `floor(units * (1 + rate))`, never below zero
fn grow_units(units: u64, rate: f64) -> u64 {
    let grown = (units as f64 * (1.0 + rate)).floor();
    if grown <= 0.0 {
        0
    } else {
        grown as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_truncate() {
        assert_eq!(grow_units(1000, 0.5), 1500);
        assert_eq!(grow_units(1500, 0.5), 2250);
        assert_eq!(grow_units(2250, 0.5), 3375);
        assert_eq!(grow_units(3375, 0.5), 5062);
        assert_eq!(grow_units(7, 0.1), 7);
        assert_eq!(grow_units(100, -2.0), 0);
    }

    #[test]
    fn test_advance_year() {
        let mut config = SimulationConfig::default();
        config.hardware.units_year1 = 1000;
        config.hardware.unit_growth_rate = 1.5;
        config.fleet.managed_capacity_year1 = 4.0;
        config.fleet.capacity_growth_rate = 0.5;

        let mut state = ProjectionState::from_config(&config);
        assert_eq!(state.year, 1);
        assert_eq!(state.sites(250.0), 1000.0);

        state.advance_year(&config);
        assert_eq!(state.year, 2);
        assert_eq!(state.units, 2500);
        assert_eq!(state.capacity_mw, 6.0);
    }
}
