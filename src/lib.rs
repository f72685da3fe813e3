//! Flexload Model - revenue, margin and valuation projections for a
//! home-energy hardware plus grid-services business
//!
//! This library provides:
//! - Year-by-year projection of hardware, subscription, arbitrage and
//!   capacity-market revenue with compounding shipments and managed capacity
//! - EBITDA after straight-line development amortization and EV/EBITDA or
//!   EV/revenue valuation
//! - TAM → SAM → SOM market sizing across regions with activation delays
//! - IRR/NPV helpers and CSV export of yearly results
//! - Parallel scenario and sensitivity runs

pub mod config;
pub mod error;
pub mod market;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use config::{SimulationConfig, ValuationMethod};
pub use error::ModelError;
pub use market::{size_market, MarketRegion, RegionParams};
pub use projection::{simulate, ProjectionEngine, ProjectionResult, YearlyResult};
pub use scenario::ScenarioRunner;
