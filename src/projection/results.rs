//! Yearly output records and run-level summaries

use super::irr::{irr, npv, DEFAULT_IRR_GUESS};
use serde::{Deserialize, Serialize};

/// One simulated year. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YearlyResult {
    // Timing and volumes
    pub year: u32,
    pub units: u64,
    pub capacity_mw: f64,
    pub sites: f64,
    pub attach_rate: f64,
    pub attached_sites: f64,

    // Revenue by stream
    pub hardware_revenue: f64,
    pub subscription_revenue: f64,
    pub arbitrage_revenue: f64,
    pub capacity_revenue: f64,
    pub event_revenue: f64,
    pub market_fees: f64,
    pub total_revenue: f64,

    // Profitability and valuation
    pub gross_profit: f64,
    pub core_ebitda: f64,
    pub amortization: f64,
    pub reported_ebitda: f64,
    pub enterprise_value: f64,
}

impl YearlyResult {
    /// Column names in declaration order
    pub const CSV_HEADER: [&'static str; 18] = [
        "year",
        "units",
        "capacity_mw",
        "sites",
        "attach_rate",
        "attached_sites",
        "hardware_revenue",
        "subscription_revenue",
        "arbitrage_revenue",
        "capacity_revenue",
        "event_revenue",
        "market_fees",
        "total_revenue",
        "gross_profit",
        "core_ebitda",
        "amortization",
        "reported_ebitda",
        "enterprise_value",
    ];

    /// Empty record for a 1-indexed year
    pub fn new(year: u32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Sum of the grid-facing streams
    pub fn grid_revenue(&self) -> f64 {
        self.arbitrage_revenue + self.capacity_revenue + self.event_revenue
    }
}

/// Complete projection output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly rows, ascending by year
    pub years: Vec<YearlyResult>,

    /// Up-front development spend, the initial outflow for investor cashflows
    pub upfront_investment: f64,

    /// Rate used for the NPV summary figure
    pub discount_rate: f64,
}

impl ProjectionResult {
    pub fn new(upfront_investment: f64, discount_rate: f64) -> Self {
        Self {
            years: Vec::new(),
            upfront_investment,
            discount_rate,
        }
    }

    /// Add a yearly row
    pub fn add_row(&mut self, row: YearlyResult) {
        self.years.push(row);
    }

    /// Development spend at t=0, then reported EBITDA each year with the
    /// final year's enterprise value realised as an exit.
    pub fn investor_cashflows(&self) -> Vec<f64> {
        let mut cashflows = Vec::with_capacity(self.years.len() + 1);
        cashflows.push(-self.upfront_investment);
        cashflows.extend(self.years.iter().map(|r| r.reported_ebitda));
        if let Some(final_year) = self.years.last() {
            if let Some(exit) = cashflows.last_mut() {
                *exit += final_year.enterprise_value;
            }
        }
        cashflows
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_units: u64 = self.years.iter().map(|r| r.units).sum();
        let total_revenue: f64 = self.years.iter().map(|r| r.total_revenue).sum();
        let total_reported_ebitda: f64 = self.years.iter().map(|r| r.reported_ebitda).sum();
        let ebitda_stream: Vec<f64> = self.years.iter().map(|r| r.reported_ebitda).collect();

        ProjectionSummary {
            total_years: self.years.len() as u32,
            total_units,
            total_revenue,
            total_reported_ebitda,
            final_revenue: self.years.last().map(|r| r.total_revenue).unwrap_or(0.0),
            final_enterprise_value: self.years.last().map(|r| r.enterprise_value).unwrap_or(0.0),
            npv_reported_ebitda: npv(&ebitda_stream, self.discount_rate),
            investor_irr: irr(&self.investor_cashflows(), DEFAULT_IRR_GUESS).ok(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_units: u64,
    pub total_revenue: f64,
    pub total_reported_ebitda: f64,
    pub final_revenue: f64,
    pub final_enterprise_value: f64,
    pub npv_reported_ebitda: f64,

    /// None when the investor cashflows have no rate of return
    pub investor_irr: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(year: u32, reported_ebitda: f64, enterprise_value: f64) -> YearlyResult {
        YearlyResult {
            reported_ebitda,
            enterprise_value,
            total_revenue: 1000.0,
            units: 10,
            ..YearlyResult::new(year)
        }
    }

    #[test]
    fn test_investor_cashflows() {
        let mut result = ProjectionResult::new(100.0, 0.0);
        result.add_row(row(1, 10.0, 50.0));
        result.add_row(row(2, 20.0, 120.0));

        assert_eq!(result.investor_cashflows(), vec![-100.0, 10.0, 140.0]);
    }

    #[test]
    fn test_investor_cashflows_without_years() {
        let result = ProjectionResult::new(100.0, 0.0);
        assert_eq!(result.investor_cashflows(), vec![-100.0]);
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new(100.0, 0.0);
        result.add_row(row(1, 0.0, 0.0));
        result.add_row(row(2, 0.0, 110.0));

        let summary = result.summary();
        assert_eq!(summary.total_years, 2);
        assert_eq!(summary.total_units, 20);
        assert_eq!(summary.total_revenue, 2000.0);
        assert_eq!(summary.final_enterprise_value, 110.0);
        assert_eq!(summary.npv_reported_ebitda, 0.0);

        // -100 now, +110 two years out
        let irr = summary.investor_irr.unwrap();
        assert_relative_eq!(irr, 1.1_f64.sqrt() - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_header_matches_fields() {
        let json = serde_json::to_value(YearlyResult::new(1)).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), YearlyResult::CSV_HEADER.len());
        for name in YearlyResult::CSV_HEADER {
            assert!(json.get(name).is_some(), "missing field {}", name);
        }
    }
}
