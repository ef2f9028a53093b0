//! Combined lap analysis.
//!
//! Runs both technique detectors over the same sample sequence and merges
//! their zones into one result with summary counts and durations. This is
//! the entry point typical callers use; the individual detectors stay
//! public for unit testing and custom parameterization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lap::LapTelemetry;
use super::lift_coast::{detect_lift_and_coast_zones, LiftAndCoastZone, LiftCoastConfig};
use super::signal::round_to;
use super::super_clipping::{
    detect_super_clipping_zones, SuperClippingConfig, SuperClippingZone,
};
use super::validation::TelemetryResult;

/// Optional per-call parameter overlay for [`analyze_lap`].
///
/// One field per recognized detector parameter; each detector takes only
/// the fields its config knows, so a single overlay can be shared across
/// call sites with partially overlapping options. `min_duration_s` is the
/// one shared name and applies to both detectors when set.
///
/// When the overlay is deserialized from a caller-supplied document,
/// unrecognized keys are dropped rather than rejected. That permissiveness
/// is deliberate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOverrides {
    /// Minimum zone duration for both detectors, in seconds.
    pub min_duration_s: Option<f64>,
    /// Maximum throttle percentage considered "off" (lift-and-coast).
    pub throttle_off_threshold: Option<f64>,
    /// Maximum brake value considered "off" (lift-and-coast).
    pub brake_off_threshold: Option<u8>,
    /// Minimum throttle percentage considered "full" (super-clipping).
    pub throttle_full_threshold: Option<f64>,
    /// Maximum rolling speed std-dev for a plateau (super-clipping).
    pub speed_plateau_tolerance_kph: Option<f64>,
    /// Maximum per-sample RPM increase (super-clipping).
    pub rpm_stutter_threshold: Option<f64>,
    /// Minimum gear (super-clipping).
    pub min_gear: Option<i32>,
    /// Acceleration lookback window in samples (super-clipping).
    pub accel_lookback_samples: Option<usize>,
    /// Minimum speed gain over the lookback window (super-clipping).
    pub min_speed_gain_kph: Option<f64>,
}

impl AnalysisOverrides {
    /// Lift-and-coast config with the recognized overrides applied.
    fn lift_coast_config(&self) -> LiftCoastConfig {
        let mut config = LiftCoastConfig::default();
        if let Some(v) = self.min_duration_s {
            config.min_duration_s = v;
        }
        if let Some(v) = self.throttle_off_threshold {
            config.throttle_off_threshold = v;
        }
        if let Some(v) = self.brake_off_threshold {
            config.brake_off_threshold = v;
        }
        config
    }

    /// Super-clipping config with the recognized overrides applied.
    fn super_clipping_config(&self) -> SuperClippingConfig {
        let mut config = SuperClippingConfig::default();
        if let Some(v) = self.min_duration_s {
            config.min_duration_s = v;
        }
        if let Some(v) = self.throttle_full_threshold {
            config.throttle_full_threshold = v;
        }
        if let Some(v) = self.speed_plateau_tolerance_kph {
            config.speed_plateau_tolerance_kph = v;
        }
        if let Some(v) = self.rpm_stutter_threshold {
            config.rpm_stutter_threshold = v;
        }
        if let Some(v) = self.min_gear {
            config.min_gear = v;
        }
        if let Some(v) = self.accel_lookback_samples {
            config.accel_lookback_samples = v;
        }
        if let Some(v) = self.min_speed_gain_kph {
            config.min_speed_gain_kph = v;
        }
        config
    }
}

/// Combined analysis result for one lap.
///
/// Immutable once produced; zone lists are empty, never null, when no
/// qualifying run exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Lift-and-coast zones in ascending distance order.
    pub lift_and_coast_zones: Vec<LiftAndCoastZone>,
    /// Super-clipping zones in ascending distance order.
    pub super_clipping_zones: Vec<SuperClippingZone>,
    /// Sum of lift-and-coast zone durations, in seconds.
    pub total_lift_coast_duration_s: f64,
    /// Sum of super-clipping zone durations, in seconds.
    pub total_clipping_duration_s: f64,
    /// Number of lift-and-coast zones.
    pub lift_coast_count: usize,
    /// Number of super-clipping zones.
    pub clipping_count: usize,
}

/// Run both detectors over *lap* and return the combined result.
///
/// Each detector validates its own required channels first; if either
/// validation fails no partial result is returned and the
/// [`ValidationError`](super::validation::ValidationError) propagates
/// unchanged to the caller.
pub fn analyze_lap(
    lap: &LapTelemetry,
    overrides: &AnalysisOverrides,
) -> TelemetryResult<AnalysisResult> {
    let lift_and_coast_zones = detect_lift_and_coast_zones(lap, &overrides.lift_coast_config())?;
    let super_clipping_zones =
        detect_super_clipping_zones(lap, &overrides.super_clipping_config())?;

    let total_lift_coast_duration_s = round_to(
        lift_and_coast_zones.iter().map(|z| z.duration_s).sum::<f64>(),
        3,
    );
    let total_clipping_duration_s = round_to(
        super_clipping_zones.iter().map(|z| z.duration_s).sum::<f64>(),
        3,
    );

    debug!(
        lift_coast = lift_and_coast_zones.len(),
        clipping = super_clipping_zones.len(),
        "lap analysis complete"
    );

    Ok(AnalysisResult {
        lift_coast_count: lift_and_coast_zones.len(),
        clipping_count: super_clipping_zones.len(),
        lift_and_coast_zones,
        super_clipping_zones,
        total_lift_coast_duration_s,
        total_clipping_duration_s,
    })
}
