//! Scenario runner for batch and sensitivity projections
//!
//! Holds a base configuration and fans independent variants of it out across
//! threads. Projections share nothing, so results come back in input order.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::projection::{ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// Base configuration plus helpers for running variants of it
///
/// # Example
/// ```
/// use flexload_model::ScenarioRunner;
///
/// let runner = ScenarioRunner::new();
/// let results = runner.sweep(&[0.2, 0.4, 0.6], |config, rate| {
///     config.hardware.unit_growth_rate = rate;
/// });
/// assert_eq!(results.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self {
            base_config: SimulationConfig::default(),
        }
    }

    /// Create runner with a pre-built configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { base_config: config }
    }

    /// Create runner from a JSON configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            base_config: SimulationConfig::from_json_path(path)?,
        })
    }

    /// Project the base configuration
    pub fn run(&self) -> ProjectionResult {
        ProjectionEngine::new(self.base_config.clone()).project()
    }

    /// Project a modified copy of the base configuration
    pub fn run_variant<F>(&self, modify: F) -> ProjectionResult
    where
        F: FnOnce(&mut SimulationConfig),
    {
        let mut config = self.base_config.clone();
        modify(&mut config);
        ProjectionEngine::new(config).project()
    }

    /// Project several independent configurations in parallel
    pub fn run_scenarios(&self, configs: &[SimulationConfig]) -> Vec<ProjectionResult> {
        info!("Running {} scenarios", configs.len());
        configs
            .par_iter()
            .map(|config| ProjectionEngine::new(config.clone()).project())
            .collect()
    }

    /// Apply each value to a copy of the base configuration and project them
    /// in parallel, pairing every result with the value that produced it
    pub fn sweep<F>(&self, values: &[f64], apply: F) -> Vec<(f64, ProjectionResult)>
    where
        F: Fn(&mut SimulationConfig, f64) + Sync,
    {
        values
            .par_iter()
            .map(|&value| {
                let mut config = self.base_config.clone();
                apply(&mut config, value);
                (value, ProjectionEngine::new(config).project())
            })
            .collect()
    }

    /// Get reference to the base configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.base_config
    }

    /// Get mutable reference to the base configuration
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
