//! Unit-growth sensitivity sweep
//!
//! Projects the base configuration once per growth rate, in parallel, and
//! prints final-year revenue, enterprise value and investor IRR per rate.
//!
//! Usage: growth-sweep [--config base.json] [--rates 0.2,0.4,0.6] [--output sweep.csv]

use anyhow::{Context, Result};
use clap::Parser;
use flexload_model::ScenarioRunner;
use log::info;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "growth-sweep", about = "Sweep annual unit growth and compare outcomes")]
struct Cli {
    /// JSON base configuration; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Growth rates to try
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.2, 0.4, 0.6, 0.8, 1.0])]
    rates: Vec<f64>,

    /// Optional CSV with one row per rate
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let runner = match &cli.config {
        Some(path) => ScenarioRunner::from_json_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ScenarioRunner::new(),
    };

    let start = Instant::now();
    let results = runner.sweep(&cli.rates, |config, rate| {
        config.hardware.unit_growth_rate = rate;
    });
    info!("Swept {} growth rates in {:?}", results.len(), start.elapsed());

    println!(
        "{:>8} {:>12} {:>16} {:>16} {:>10}",
        "Growth", "Final Units", "Final Revenue", "Final EV", "IRR"
    );
    println!("{}", "-".repeat(66));

    let mut writer = match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record([
                "unit_growth_rate",
                "final_units",
                "final_revenue",
                "final_enterprise_value",
                "investor_irr",
            ])?;
            Some(writer)
        }
        None => None,
    };

    for (rate, result) in &results {
        let summary = result.summary();
        let final_units = result.years.last().map(|r| r.units).unwrap_or(0);
        let irr_text = summary
            .investor_irr
            .map(|irr| format!("{:.2}%", irr * 100.0))
            .unwrap_or_else(|| "n/a".to_string());

        println!(
            "{:>8.2} {:>12} {:>16.0} {:>16.0} {:>10}",
            rate, final_units, summary.final_revenue, summary.final_enterprise_value, irr_text
        );

        if let Some(writer) = writer.as_mut() {
            writer.write_record([
                rate.to_string(),
                final_units.to_string(),
                summary.final_revenue.to_string(),
                summary.final_enterprise_value.to_string(),
                summary.investor_irr.map(|irr| irr.to_string()).unwrap_or_default(),
            ])?;
        }
    }

    if let Some(mut writer) = writer {
        writer.flush()?;
    }

    Ok(())
}
