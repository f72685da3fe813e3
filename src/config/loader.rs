//! JSON configuration loader
//!
//! Omitted fields fall back to `SimulationConfig::default()`.

use super::SimulationConfig;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl SimulationConfig {
    /// Parse and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from any reader
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config = Self::from_json_reader(BufReader::new(file))?;
        info!("Loaded {}-year configuration from {}", config.horizon, path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GrossMarginMethod, ValuationMethod};
    use crate::error::ModelError;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{
                "horizon": 3,
                "hardware": { "units_year1": 250, "sale_price": 999.0 },
                "margins": { "gross_margin_method": "cogs_derived" },
                "valuation": { "method": "revenue_multiple", "multiple": 5.0 },
                "recurring": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.horizon, 3);
        assert_eq!(config.hardware.units_year1, 250);
        assert_eq!(config.hardware.sale_price, 999.0);
        assert_eq!(config.hardware.unit_growth_rate, 0.4);
        assert_eq!(config.margins.gross_margin_method, GrossMarginMethod::CogsDerived);
        assert_eq!(config.margins.core_ebitda_margin, 0.15);
        assert_eq!(config.valuation, ValuationMethod::RevenueMultiple(5.0));
        assert!(config.recurring.is_none());
        assert_eq!(config.fleet.sites_per_mw, 250.0);
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let config = SimulationConfig::from_json_path("data/base_config.json")
            .expect("Failed to load sample config");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_rejects_short_attach_curve() {
        let json = r#"{ "horizon": 4, "attach_rate_curve": [0.5, 0.6] }"#;
        let err = SimulationConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ModelError::AttachCurveLength { expected: 4, actual: 2 }));
    }

    #[test]
    fn test_event_probability_defaults_to_certain() {
        let json = r#"{ "grid_capacity": { "event_price_per_mwh": 100.0 } }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();

        let grid = config.grid_capacity.expect("grid capacity group present");
        assert_eq!(grid.event_price_per_mwh, 100.0);
        assert_eq!(grid.event_probability, 1.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimulationConfig::from_json_str("{ horizon: }").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }
}
