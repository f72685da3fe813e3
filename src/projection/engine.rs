//! Core projection engine for yearly revenue, EBITDA and valuation

use super::results::{ProjectionResult, YearlyResult};
use super::state::ProjectionState;
use crate::config::{GrossMarginMethod, SimulationConfig};
use log::{debug, warn};

/// kWh per MWh
const KWH_PER_MWH: f64 = 1000.0;

/// kW per MW
const KW_PER_MW: f64 = 1000.0;

/// Main projection engine
pub struct ProjectionEngine {
    config: SimulationConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine for one configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the projection over the configured horizon
    pub fn project(&self) -> ProjectionResult {
        let config = &self.config;
        let mut result = ProjectionResult::new(config.development.total_cost, config.discount_rate);
        let mut state = ProjectionState::from_config(config);

        if let Some(curve) = &config.attach_rate_curve {
            if curve.len() != config.horizon as usize {
                warn!(
                    "Attach-rate curve has {} entries for a {}-year horizon; missing years use 1.0",
                    curve.len(),
                    config.horizon
                );
            }
        }

        // Straight-line, identical every year
        let amortization = config.development.annual_charge();

        for year in 1..=config.horizon {
            let row = self.calculate_year(&state, amortization);
            debug!(
                "Year {}: units={} capacity={:.3}MW revenue={:.2} reported_ebitda={:.2} ev={:.2}",
                year,
                row.units,
                row.capacity_mw,
                row.total_revenue,
                row.reported_ebitda,
                row.enterprise_value
            );
            result.add_row(row);

            state.advance_year(config);
        }

        result
    }

    /// Calculate all figures for one year from the state carried into it
    fn calculate_year(&self, state: &ProjectionState, amortization: f64) -> YearlyResult {
        let config = &self.config;
        let streams = config.streams;
        let mut row = YearlyResult::new(state.year);

        // Volumes
        row.units = state.units;
        row.capacity_mw = state.capacity_mw;
        row.sites = state.sites(config.fleet.sites_per_mw);
        row.attach_rate = config
            .attach_rate((state.year - 1) as usize)
            .unwrap_or(1.0);
        row.attached_sites = row.sites * row.attach_rate;

        // Hardware
        if streams.hardware {
            row.hardware_revenue = state.units as f64 * config.hardware.sale_price;
        }

        // Subscription and arbitrage
        let mut mwh_bid = 0.0;
        if let Some(recurring) = &config.recurring {
            if streams.subscription {
                row.subscription_revenue = row.attached_sites * recurring.arr_per_site;
            }
            if streams.arbitrage {
                let kwh_shifted = row.attached_sites * recurring.annual_kwh_per_site();
                row.arbitrage_revenue =
                    kwh_shifted * recurring.price_spread * recurring.platform_share;
                mwh_bid += kwh_shifted / KWH_PER_MWH;
            }
        }

        // Capacity market and dispatch events
        if let (true, Some(grid)) = (streams.grid_capacity, &config.grid_capacity) {
            row.capacity_revenue = state.capacity_mw * KW_PER_MW * grid.capacity_price_per_kw_year;
            let event_mwh = state.capacity_mw * grid.event_hours_per_year * grid.event_probability;
            row.event_revenue = event_mwh * grid.event_price_per_mwh;
            mwh_bid += event_mwh;
        }

        row.market_fees = mwh_bid * config.market_fees.fee_per_mwh;

        let gross_streams = row.hardware_revenue + row.subscription_revenue + row.grid_revenue();
        row.total_revenue = if config.market_fees.deduct_from_revenue {
            gross_streams - row.market_fees
        } else {
            gross_streams
        };

        // Margins
        row.gross_profit = match config.margins.gross_margin_method {
            GrossMarginMethod::FlatRate => row.total_revenue * config.margins.gross_margin,
            GrossMarginMethod::CogsDerived => {
                row.total_revenue - state.units as f64 * config.hardware.cogs_per_unit()
            }
        };
        row.core_ebitda = row.total_revenue * config.margins.core_ebitda_margin;
        row.amortization = amortization;
        row.reported_ebitda = row.core_ebitda - amortization;

        // Valuation
        row.enterprise_value = config
            .valuation
            .enterprise_value(row.total_revenue, row.reported_ebitda);

        row
    }
}

/// Project a configuration and return its yearly rows
pub fn simulate(config: &SimulationConfig) -> Vec<YearlyResult> {
    ProjectionEngine::new(config.clone()).project().years
}
