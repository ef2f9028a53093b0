//! Lift-and-coast detection.
//!
//! A driver releases the throttle before the braking point and lets
//! aerodynamic and rolling drag slow the car, saving fuel or managing
//! tyres. The signature is a contiguous throttle-off, brake-off region
//! where speed declines gradually.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lap::{Channel, LapTelemetry};
use super::signal::{contiguous_true_runs, mode, round_to};
use super::validation::{validate_channels, TelemetryResult};

/// Channels lift-and-coast detection reads.
const REQUIRED_CHANNELS: [Channel; 7] = Channel::ALL;

/// Tuning parameters for lift-and-coast detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftCoastConfig {
    /// Minimum zone duration in seconds.
    pub min_duration_s: f64,
    /// Maximum throttle percentage considered "off".
    pub throttle_off_threshold: f64,
    /// Maximum brake value considered "off" (0 or 1).
    pub brake_off_threshold: u8,
}

impl Default for LiftCoastConfig {
    fn default() -> Self {
        Self {
            min_duration_s: 0.5,
            throttle_off_threshold: 5.0,
            brake_off_threshold: 0,
        }
    }
}

/// A detected lift-and-coast zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftAndCoastZone {
    /// Distance along the lap where the coast begins, in metres.
    pub start_distance_m: f64,
    /// Distance where the coast ends, in metres.
    pub end_distance_m: f64,
    /// Zone duration in seconds.
    pub duration_s: f64,
    /// Speed lost over the coast in km/h.
    pub speed_loss_kph: f64,
    /// RPM drop: start RPM minus mean RPM over the zone.
    pub avg_rpm_drop: f64,
    /// Most frequent gear held during the coast.
    pub gear: i32,
}

/// Detect lift-and-coast zones in *lap*.
///
/// A zone is a maximal contiguous run where throttle and brake are both
/// below their "off" thresholds, lasting at least
/// [`LiftCoastConfig::min_duration_s`], with speed strictly decreasing
/// from the first to the last sample of the run. The endpoint-speed gate
/// rules out downhill coasting (speed rising) and flat-speed noise.
///
/// Zones are returned in distance order. Pure and deterministic: identical
/// inputs and parameters yield identical output.
pub fn detect_lift_and_coast_zones(
    lap: &LapTelemetry,
    config: &LiftCoastConfig,
) -> TelemetryResult<Vec<LiftAndCoastZone>> {
    validate_channels(lap, &REQUIRED_CHANNELS)?;
    let samples = lap.samples();

    let coasting: Vec<bool> = samples
        .iter()
        .map(|s| {
            s.throttle_pct <= config.throttle_off_threshold
                && s.brake <= config.brake_off_threshold
        })
        .collect();

    let mut zones = Vec::new();
    for range in contiguous_true_runs(&coasting) {
        let run = &samples[range];
        // A single sample cannot establish a trend.
        if run.len() < 2 {
            continue;
        }

        let first = &run[0];
        let last = &run[run.len() - 1];

        let duration = last.elapsed.saturating_sub(first.elapsed).as_secs_f64();
        if duration < config.min_duration_s {
            continue;
        }

        if last.speed_kph >= first.speed_kph {
            continue;
        }

        let rpm_mean = run.iter().map(|s| s.rpm).sum::<f64>() / run.len() as f64;
        let gears: Vec<i32> = run.iter().map(|s| s.gear).collect();

        zones.push(LiftAndCoastZone {
            start_distance_m: first.distance_m,
            end_distance_m: last.distance_m,
            duration_s: round_to(duration, 3),
            speed_loss_kph: round_to(first.speed_kph - last.speed_kph, 1),
            avg_rpm_drop: round_to(first.rpm - rpm_mean, 0),
            gear: mode(&gears).unwrap_or(first.gear),
        });
    }

    debug!(zones = zones.len(), "lift-and-coast detection complete");
    Ok(zones)
}
