//! Market sizing: regions, TAM/SAM/SOM curves and attach-rate derivation

mod region;
mod sizing;
pub mod loader;

pub use region::{MarketRegion, RegionParams};
pub use sizing::{
    blended_attach_curve, linspace, size_market, size_market_detailed, MarketCurve,
    RegionSelection,
};
pub use loader::{load_regions, load_regions_from_reader};
