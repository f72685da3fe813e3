//! Flexload Model CLI
//!
//! Runs a projection from a JSON configuration (or the built-in defaults),
//! optionally sizes the market from a regions CSV and feeds the derived
//! attach-rate curve into the engine, then prints the yearly table and
//! writes it to CSV.

use anyhow::{Context, Result};
use clap::Parser;
use flexload_model::config::SimulationConfig;
use flexload_model::market::{
    blended_attach_curve, load_regions, size_market_detailed, MarketCurve, RegionParams,
    RegionSelection,
};
use flexload_model::projection::{export, ProjectionEngine, ProjectionSummary, YearlyResult};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flexload-model",
    version,
    about = "Project revenue, EBITDA and enterprise value year by year"
)]
struct Cli {
    /// JSON configuration file; omitted fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the projection horizon (years)
    #[arg(long)]
    years: Option<u32>,

    /// Override the EV/EBITDA multiple
    #[arg(long)]
    ebitda_multiple: Option<f64>,

    /// Override the EV/revenue multiple (nonzero replaces EBITDA valuation)
    #[arg(long)]
    revenue_multiple: Option<f64>,

    /// Regions CSV; when given, every region is selected and the derived
    /// attach-rate curve drives recurring revenue
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Share of homes qualifying for the retrofit
    #[arg(long, default_value_t = 0.4)]
    qualifying_fraction: f64,

    /// SAM penetration in year 1
    #[arg(long, default_value_t = 0.005)]
    penetration_start: f64,

    /// SAM penetration in the final year
    #[arg(long, default_value_t = 0.05)]
    penetration_end: f64,

    /// CSV output path
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProjectionResponse<'a> {
    config: &'a SimulationConfig,
    years: &'a [YearlyResult],
    summary: ProjectionSummary,
    market: Option<MarketCurve>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(years) = cli.years {
        config.horizon = years;
        // A curve sized for the old horizon no longer applies
        if config.validate().is_err() {
            config.attach_rate_curve = None;
        }
    }

    if cli.ebitda_multiple.is_some() || cli.revenue_multiple.is_some() {
        config.valuation = config
            .valuation
            .with_overrides(cli.ebitda_multiple, cli.revenue_multiple);
    }

    let market = match &cli.regions {
        Some(path) => {
            let regions = load_regions(path)
                .with_context(|| format!("loading regions from {}", path.display()))?;
            let selection: RegionSelection = regions
                .iter()
                .map(|r| (r.id.clone(), RegionParams::for_region(r)))
                .collect();

            let curve = size_market_detailed(
                &regions,
                &selection,
                cli.qualifying_fraction,
                cli.penetration_start,
                cli.penetration_end,
                config.horizon,
            );
            let attach_curve = blended_attach_curve(&selection, config.horizon);
            config = config.with_attach_rate_curve(attach_curve)?;
            Some(curve)
        }
        None => None,
    };

    info!("Projecting {} years", config.horizon);
    let result = ProjectionEngine::new(config.clone()).project();
    let summary = result.summary();

    export::write_csv_path(&cli.output, &result.years)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    if cli.json {
        let response = ProjectionResponse {
            config: &config,
            years: &result.years,
            summary,
            market,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Flexload Model v{}", env!("CARGO_PKG_VERSION"));
    println!("=====================\n");

    println!(
        "{:>4} {:>10} {:>8} {:>10} {:>14} {:>14} {:>14} {:>14} {:>16}",
        "Year", "Units", "MW", "Attach", "HW Rev", "Recurring", "Total Rev", "Rpt EBITDA", "EV"
    );
    println!("{}", "-".repeat(112));
    for row in &result.years {
        println!(
            "{:>4} {:>10} {:>8.2} {:>10.4} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>16.0}",
            row.year,
            row.units,
            row.capacity_mw,
            row.attach_rate,
            row.hardware_revenue,
            row.subscription_revenue + row.grid_revenue(),
            row.total_revenue,
            row.reported_ebitda,
            row.enterprise_value,
        );
    }

    if let Some(curve) = &market {
        println!("\nMarket sizing (SOM homes):");
        let coverage = curve.coverage(&result.years);
        for (i, (som, share)) in curve.som.iter().zip(coverage).enumerate() {
            match share {
                Some(share) => println!(
                    "  Year {:>2}: SOM={:>12.0}  shipments/SOM={:.2}",
                    i + 1,
                    som,
                    share
                ),
                None => println!("  Year {:>2}: SOM={:>12.0}", i + 1, som),
            }
        }
    }

    println!("\nSummary:");
    println!("  Years: {}", summary.total_years);
    println!("  Total Units: {}", summary.total_units);
    println!("  Total Revenue: ${:.2}", summary.total_revenue);
    println!("  Total Reported EBITDA: ${:.2}", summary.total_reported_ebitda);
    println!("  Final Enterprise Value: ${:.2}", summary.final_enterprise_value);
    println!(
        "  NPV of Reported EBITDA @ {:.1}%: ${:.2}",
        result.discount_rate * 100.0,
        summary.npv_reported_ebitda
    );
    match summary.investor_irr {
        Some(rate) => println!("  Investor IRR: {:.2}%", rate * 100.0),
        None => println!("  Investor IRR: n/a"),
    }

    println!("\nFull results written to: {}", cli.output.display());
    Ok(())
}
