//! Year-by-year revenue, EBITDA and valuation projection

mod state;
mod engine;
mod results;
pub mod export;
pub mod irr;

pub use state::ProjectionState;
pub use engine::{simulate, ProjectionEngine};
pub use results::{ProjectionResult, ProjectionSummary, YearlyResult};
pub use irr::{irr, npv, IrrError, DEFAULT_IRR_GUESS};
