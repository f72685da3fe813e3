//! TAM → SAM → SOM curve builder and attach-rate derivation

use super::region::{MarketRegion, RegionParams};
use crate::projection::YearlyResult;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Region id → settings for the regions selected for a run
pub type RegionSelection = BTreeMap<String, RegionParams>;

/// `n` evenly spaced points from `start` to `end` inclusive.
///
/// A single point is `start`; the last point is always exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// Yearly market-sizing totals across the selected regions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketCurve {
    /// Addressable homes in regions active that year
    pub tam: Vec<f64>,

    /// Serviceable homes in regions active that year
    pub sam: Vec<f64>,

    /// Obtainable homes
    pub som: Vec<f64>,
}

impl MarketCurve {
    /// Shipments as a share of SOM, `None` where SOM is zero
    pub fn coverage(&self, years: &[YearlyResult]) -> Vec<Option<f64>> {
        years
            .iter()
            .zip(&self.som)
            .map(|(row, &som)| {
                if som > 0.0 {
                    Some(row.units as f64 / som)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Obtainable market per year, summed over the selected regions.
///
/// Regions without an entry in `params` are not selected and contribute
/// nothing. A region contributes only from year `activation_delay` onwards
/// (0-indexed), and its ramps start from their first point when it activates.
pub fn size_market(
    regions: &[MarketRegion],
    params: &RegionSelection,
    qualifying_fraction: f64,
    penetration_start: f64,
    penetration_end: f64,
    horizon: u32,
) -> Vec<f64> {
    size_market_detailed(
        regions,
        params,
        qualifying_fraction,
        penetration_start,
        penetration_end,
        horizon,
    )
    .som
}

/// Same as [`size_market`], also reporting the TAM and SAM of active regions
pub fn size_market_detailed(
    regions: &[MarketRegion],
    params: &RegionSelection,
    qualifying_fraction: f64,
    penetration_start: f64,
    penetration_end: f64,
    horizon: u32,
) -> MarketCurve {
    let years = horizon as usize;
    let mut curve = MarketCurve {
        tam: vec![0.0; years],
        sam: vec![0.0; years],
        som: vec![0.0; years],
    };

    for id in params.keys() {
        if !regions.iter().any(|r| &r.id == id) {
            warn!("Settings given for unknown region {}; ignoring", id);
        }
    }

    let penetration = linspace(penetration_start, penetration_end, years);

    for region in regions {
        let Some(p) = params.get(&region.id) else {
            continue;
        };

        let tam = region.tam(qualifying_fraction);
        let sam = tam * p.demand_fraction;
        let attach = linspace(p.attach_start, p.attach_end, years);
        debug!("Region {}: TAM={:.0} SAM={:.0} delay={}", region.id, tam, sam, p.activation_delay);

        let delay = p.activation_delay as usize;
        for year in delay..years {
            let active_year = year - delay;
            curve.tam[year] += tam;
            curve.sam[year] += sam;
            curve.som[year] += sam * penetration[active_year] * attach[active_year];
        }
    }

    curve
}

/// Fleet-wide attach rate per year: the mean over all selected regions of
/// each region's attach ramp, where a region not yet active counts as zero.
///
/// Ramps are indexed by calendar year rather than years since activation.
/// No selected regions gives a zero curve.
pub fn blended_attach_curve(params: &RegionSelection, horizon: u32) -> Vec<f64> {
    let years = horizon as usize;
    let mut curve = vec![0.0; years];
    if params.is_empty() {
        return curve;
    }

    for p in params.values() {
        let attach = linspace(p.attach_start, p.attach_end, years);
        for (year, rate) in attach.into_iter().enumerate().skip(p.activation_delay as usize) {
            curve[year] += rate;
        }
    }

    let count = params.len() as f64;
    for rate in &mut curve {
        *rate /= count;
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn saturated_params(delay: u32) -> RegionParams {
        RegionParams {
            activation_delay: delay,
            demand_fraction: 1.0,
            attach_start: 1.0,
            attach_end: 1.0,
        }
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 0.9, 1), vec![0.3]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.6, 0.9, 4).last(), Some(&0.9));
        assert_eq!(linspace(2.0, 0.0, 3), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_full_saturation() {
        let regions = vec![MarketRegion::new("CA", 14_000_000.0)];
        let params = RegionSelection::from([("CA".to_string(), saturated_params(0))]);

        let som = size_market(&regions, &params, 1.0, 1.0, 1.0, 5);
        assert_eq!(som, vec![14_000_000.0; 5]);
    }

    #[test]
    fn test_delay_beyond_horizon_contributes_nothing() {
        let regions = vec![MarketRegion::new("CA", 1000.0), MarketRegion::new("TX", 500.0)];
        let params = RegionSelection::from([
            ("CA".to_string(), saturated_params(5)),
            ("TX".to_string(), saturated_params(0)),
        ]);

        let som = size_market(&regions, &params, 1.0, 1.0, 1.0, 5);
        assert_eq!(som, vec![500.0; 5]);
    }

    #[test]
    fn test_delayed_region_starts_ramp_on_activation() {
        let regions = vec![MarketRegion::new("NY", 1000.0)];
        let params = RegionSelection::from([(
            "NY".to_string(),
            RegionParams {
                activation_delay: 2,
                demand_fraction: 0.5,
                attach_start: 1.0,
                attach_end: 1.0,
            },
        )]);

        // Penetration ramp 0.0, 0.25, 0.5, 0.75, 1.0 applied from year index 2
        let curve = size_market_detailed(&regions, &params, 1.0, 0.0, 1.0, 5);
        assert_eq!(curve.som, vec![0.0, 0.0, 0.0, 125.0, 250.0]);
        assert_eq!(curve.tam, vec![0.0, 0.0, 1000.0, 1000.0, 1000.0]);
        assert_eq!(curve.sam, vec![0.0, 0.0, 500.0, 500.0, 500.0]);
    }

    #[test]
    fn test_funnel_arithmetic() {
        let regions = vec![MarketRegion::new("FL", 9_600_000.0)];
        let params = RegionSelection::from([(
            "FL".to_string(),
            RegionParams {
                activation_delay: 0,
                demand_fraction: 0.5,
                attach_start: 0.6,
                attach_end: 0.9,
            },
        )]);

        let som = size_market(&regions, &params, 0.4, 0.005, 0.05, 2);
        // SAM = 9.6M * 0.4 * 0.5 = 1.92M
        assert_relative_eq!(som[0], 1_920_000.0 * 0.005 * 0.6, epsilon = 1e-6);
        assert_relative_eq!(som[1], 1_920_000.0 * 0.05 * 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_unselected_and_unknown_regions() {
        let regions = vec![MarketRegion::new("CA", 1000.0), MarketRegion::new("IL", 1000.0)];
        let params = RegionSelection::from([
            ("CA".to_string(), saturated_params(0)),
            ("ZZ".to_string(), saturated_params(0)),
        ]);

        let som = size_market(&regions, &params, 1.0, 1.0, 1.0, 3);
        assert_eq!(som, vec![1000.0; 3]);
    }

    #[test]
    fn test_zero_horizon() {
        let regions = vec![MarketRegion::new("CA", 1000.0)];
        let params = RegionSelection::from([("CA".to_string(), saturated_params(0))]);
        assert!(size_market(&regions, &params, 1.0, 1.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_blended_attach_curve() {
        let params = RegionSelection::from([
            (
                "CA".to_string(),
                RegionParams {
                    activation_delay: 0,
                    demand_fraction: 0.5,
                    attach_start: 0.5,
                    attach_end: 1.0,
                },
            ),
            (
                "TX".to_string(),
                RegionParams {
                    activation_delay: 1,
                    demand_fraction: 0.5,
                    attach_start: 0.0,
                    attach_end: 1.0,
                },
            ),
        ]);

        // CA ramp 0.5, 0.75, 1.0; TX ramp 0.0, 0.5, 1.0 counted from year index 1
        let curve = blended_attach_curve(&params, 3);
        assert_eq!(curve, vec![0.25, 0.625, 1.0]);
    }

    #[test]
    fn test_blended_attach_curve_without_regions() {
        assert_eq!(blended_attach_curve(&RegionSelection::new(), 4), vec![0.0; 4]);
    }

    #[test]
    fn test_coverage() {
        let curve = MarketCurve {
            tam: vec![0.0; 2],
            sam: vec![0.0; 2],
            som: vec![0.0, 4000.0],
        };
        let years = vec![
            YearlyResult { units: 1000, ..YearlyResult::new(1) },
            YearlyResult { units: 1000, ..YearlyResult::new(2) },
        ];

        assert_eq!(curve.coverage(&years), vec![None, Some(0.25)]);
    }
}
