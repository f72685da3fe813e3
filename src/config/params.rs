//! Parameter groups that make up a simulation configuration

use serde::{Deserialize, Serialize};

/// Default site density per MW of aggregated flexible load
pub const DEFAULT_SITES_PER_MW: f64 = 250.0;

/// Hardware kit economics and shipment volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareParams {
    /// Bill of materials plus landed cost per kit
    pub unit_cost: f64,

    /// Installer payment per kit
    pub install_cost: f64,

    /// Price the homeowner pays per kit
    pub sale_price: f64,

    /// Kits shipped in year 1
    pub units_year1: u64,

    /// Annual shipment growth (0.6 = +60% a year, may exceed 1.0)
    pub unit_growth_rate: f64,
}

impl Default for HardwareParams {
    fn default() -> Self {
        Self {
            unit_cost: 450.0,
            install_cost: 250.0,
            sale_price: 1500.0,
            units_year1: 1000,
            unit_growth_rate: 0.4,
        }
    }
}

impl HardwareParams {
    /// Cost of goods for one installed kit
    pub fn cogs_per_unit(&self) -> f64 {
        self.unit_cost + self.install_cost
    }
}

/// Up-front development and certification spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevelopmentParams {
    /// Total R&D and certification cost
    pub total_cost: f64,

    /// Years over which the cost is expensed straight-line
    pub amortization_years: u32,
}

impl Default for DevelopmentParams {
    fn default() -> Self {
        Self {
            total_cost: 3_000_000.0,
            amortization_years: 5,
        }
    }
}

impl DevelopmentParams {
    /// Constant yearly amortization charge, zero when no amortization period is set
    pub fn annual_charge(&self) -> f64 {
        if self.amortization_years == 0 {
            0.0
        } else {
            self.total_cost / self.amortization_years as f64
        }
    }
}

/// Aggregated flexible-load fleet, shared by the recurring and grid streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetParams {
    /// Managed flexible capacity in year 1 (MW)
    pub managed_capacity_year1: f64,

    /// Annual capacity growth
    pub capacity_growth_rate: f64,

    /// Homes aggregated per MW of flexible load
    pub sites_per_mw: f64,
}

impl Default for FleetParams {
    fn default() -> Self {
        Self {
            managed_capacity_year1: 4.0,
            capacity_growth_rate: 0.6,
            sites_per_mw: DEFAULT_SITES_PER_MW,
        }
    }
}

/// Subscription and energy-arbitrage economics per enrolled site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringParams {
    /// Annual subscription fee per attached site
    pub arr_per_site: f64,

    /// Controllable loads per site (EV, heat pump, water heater, ...)
    pub loads_per_site: f64,

    /// Energy shifted off-peak per load per day (kWh)
    pub kwh_shift_per_load_day: f64,

    /// Average peak/off-peak price difference ($/kWh)
    pub price_spread: f64,

    /// Platform's share of the arbitrage savings
    pub platform_share: f64,
}

impl Default for RecurringParams {
    fn default() -> Self {
        Self {
            arr_per_site: 60.0,
            loads_per_site: 4.0,
            kwh_shift_per_load_day: 3.0,
            price_spread: 0.10,
            platform_share: 0.4,
        }
    }
}

impl RecurringParams {
    /// kWh shifted per attached site per year
    pub fn annual_kwh_per_site(&self) -> f64 {
        self.loads_per_site * self.kwh_shift_per_load_day * 365.0
    }
}

/// Capacity-market and dispatch-event prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridCapacityParams {
    /// Capacity payment ($/kW-year)
    pub capacity_price_per_kw_year: f64,

    /// Payment per MWh curtailed during events
    pub event_price_per_mwh: f64,

    /// Expected event hours per year
    pub event_hours_per_year: f64,

    /// Probability that the expected events are actually called
    pub event_probability: f64,
}

impl Default for GridCapacityParams {
    fn default() -> Self {
        Self {
            capacity_price_per_kw_year: 40.0,
            event_price_per_mwh: 200.0,
            event_hours_per_year: 50.0,
            event_probability: 1.0,
        }
    }
}

/// Which revenue streams a run composes into total revenue
///
/// A stream contributes only when its flag is set and the parameter group it
/// needs is present on the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueStreams {
    pub hardware: bool,
    pub subscription: bool,
    pub arbitrage: bool,
    pub grid_capacity: bool,
}

impl Default for RevenueStreams {
    fn default() -> Self {
        Self {
            hardware: true,
            subscription: true,
            arbitrage: true,
            grid_capacity: false,
        }
    }
}

impl RevenueStreams {
    /// Only hardware sales
    pub fn hardware_only() -> Self {
        Self {
            hardware: true,
            subscription: false,
            arbitrage: false,
            grid_capacity: false,
        }
    }
}

/// How gross profit is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrossMarginMethod {
    /// Flat percentage of total revenue
    #[default]
    FlatRate,
    /// Total revenue less `units * (unit_cost + install_cost)`
    CogsDerived,
}

/// Margin assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginParams {
    /// Blended gross margin, used by `GrossMarginMethod::FlatRate`
    pub gross_margin: f64,

    /// EBITDA margin before development amortization
    pub core_ebitda_margin: f64,

    pub gross_margin_method: GrossMarginMethod,
}

impl Default for MarginParams {
    fn default() -> Self {
        Self {
            gross_margin: 0.35,
            core_ebitda_margin: 0.15,
            gross_margin_method: GrossMarginMethod::FlatRate,
        }
    }
}

/// Valuation heuristic applied to each year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "multiple", rename_all = "snake_case")]
pub enum ValuationMethod {
    /// Enterprise value = reported EBITDA * multiple
    EbitdaMultiple(f64),
    /// Enterprise value = total revenue * multiple
    RevenueMultiple(f64),
    /// No valuation; enterprise value is zero
    None,
}

impl Default for ValuationMethod {
    fn default() -> Self {
        ValuationMethod::EbitdaMultiple(8.0)
    }
}

impl ValuationMethod {
    /// Pick a method from a pair of multiples where zero means "not set".
    ///
    /// A nonzero revenue multiple wins over the EBITDA multiple.
    pub fn from_multiples(ebitda_multiple: f64, revenue_multiple: f64) -> Self {
        if revenue_multiple != 0.0 {
            ValuationMethod::RevenueMultiple(revenue_multiple)
        } else if ebitda_multiple != 0.0 {
            ValuationMethod::EbitdaMultiple(ebitda_multiple)
        } else {
            ValuationMethod::None
        }
    }

    /// The (EBITDA, revenue) multiples this method stands for, zero when unused
    pub fn multiples(&self) -> (f64, f64) {
        match *self {
            ValuationMethod::EbitdaMultiple(multiple) => (multiple, 0.0),
            ValuationMethod::RevenueMultiple(multiple) => (0.0, multiple),
            ValuationMethod::None => (0.0, 0.0),
        }
    }

    /// Replace either multiple, keeping the other one as configured.
    ///
    /// The precedence of [`ValuationMethod::from_multiples`] still applies, so a
    /// configured revenue multiple survives an EBITDA-multiple override.
    pub fn with_overrides(
        self,
        ebitda_multiple: Option<f64>,
        revenue_multiple: Option<f64>,
    ) -> Self {
        let (ebitda, revenue) = self.multiples();
        ValuationMethod::from_multiples(
            ebitda_multiple.unwrap_or(ebitda),
            revenue_multiple.unwrap_or(revenue),
        )
    }

    /// Enterprise value for one year
    pub fn enterprise_value(&self, total_revenue: f64, reported_ebitda: f64) -> f64 {
        match *self {
            ValuationMethod::EbitdaMultiple(multiple) => reported_ebitda * multiple,
            ValuationMethod::RevenueMultiple(multiple) => total_revenue * multiple,
            ValuationMethod::None => 0.0,
        }
    }
}

/// Fees paid to the ISO/utility for energy bid into markets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketFeeParams {
    /// All-in fee per MWh bid
    pub fee_per_mwh: f64,

    /// Report total revenue net of fees instead of only listing them
    pub deduct_from_revenue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amortization_guard() {
        let dev = DevelopmentParams {
            total_cost: 1_000_000.0,
            amortization_years: 0,
        };
        assert_eq!(dev.annual_charge(), 0.0);

        let dev = DevelopmentParams {
            total_cost: 1_000_000.0,
            amortization_years: 4,
        };
        assert_eq!(dev.annual_charge(), 250_000.0);
    }

    #[test]
    fn test_revenue_multiple_takes_precedence() {
        assert_eq!(
            ValuationMethod::from_multiples(8.0, 3.0),
            ValuationMethod::RevenueMultiple(3.0)
        );
        assert_eq!(
            ValuationMethod::from_multiples(8.0, 0.0),
            ValuationMethod::EbitdaMultiple(8.0)
        );
        assert_eq!(ValuationMethod::from_multiples(0.0, 0.0), ValuationMethod::None);
    }

    #[test]
    fn test_enterprise_value() {
        assert_eq!(ValuationMethod::EbitdaMultiple(8.0).enterprise_value(1000.0, 100.0), 800.0);
        assert_eq!(ValuationMethod::RevenueMultiple(2.0).enterprise_value(1000.0, 100.0), 2000.0);
        assert_eq!(ValuationMethod::None.enterprise_value(1000.0, 100.0), 0.0);
    }

    #[test]
    fn test_overrides_keep_configured_revenue_multiple() {
        let configured = ValuationMethod::RevenueMultiple(3.0);
        assert_eq!(configured.with_overrides(Some(10.0), None), configured);
        assert_eq!(
            configured.with_overrides(Some(10.0), Some(0.0)),
            ValuationMethod::EbitdaMultiple(10.0)
        );

        let configured = ValuationMethod::EbitdaMultiple(8.0);
        assert_eq!(
            configured.with_overrides(None, Some(2.0)),
            ValuationMethod::RevenueMultiple(2.0)
        );
        assert_eq!(
            configured.with_overrides(Some(12.0), None),
            ValuationMethod::EbitdaMultiple(12.0)
        );
        assert_eq!(ValuationMethod::None.with_overrides(None, None), ValuationMethod::None);
    }

    #[test]
    fn test_valuation_json_shape() {
        let json = serde_json::to_string(&ValuationMethod::RevenueMultiple(4.5)).unwrap();
        assert_eq!(json, r#"{"method":"revenue_multiple","multiple":4.5}"#);

        let none: ValuationMethod = serde_json::from_str(r#"{"method":"none"}"#).unwrap();
        assert_eq!(none, ValuationMethod::None);
    }
}
