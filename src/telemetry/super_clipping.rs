//! Super-clipping detection.
//!
//! When the hybrid system exhausts its deployable energy on a straight,
//! engine power is cut back and speed plateaus (or drops slightly) even
//! though the throttle stays pinned. The signature is a full-throttle
//! speed plateau with RPM no longer climbing, in a high gear, immediately
//! after a genuine acceleration phase.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lap::{Channel, LapTelemetry};
use super::signal::{backward_diff, contiguous_true_runs, mode, rolling_std, round_to};
use super::validation::{validate_channels, TelemetryResult};

/// Channels super-clipping detection reads. Brake is not needed.
const REQUIRED_CHANNELS: [Channel; 6] = [
    Channel::DistanceM,
    Channel::SpeedKph,
    Channel::ThrottlePct,
    Channel::Rpm,
    Channel::Gear,
    Channel::Elapsed,
];

/// Window for the rolling speed standard deviation, clamped to the
/// sequence length for very short laps.
const SPEED_STD_WINDOW: usize = 5;

/// Tuning parameters for super-clipping detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperClippingConfig {
    /// Minimum zone duration in seconds.
    pub min_duration_s: f64,
    /// Minimum throttle percentage considered "full".
    pub throttle_full_threshold: f64,
    /// Maximum rolling speed std-dev (km/h) still counted as a plateau.
    pub speed_plateau_tolerance_kph: f64,
    /// Maximum per-sample RPM increase; at or below this the engine is no
    /// longer accelerating (zero or negative means RPM stopped climbing).
    pub rpm_stutter_threshold: f64,
    /// Minimum gear for a valid clipping zone. Excludes low-speed
    /// full-throttle sections such as a hairpin exit.
    pub min_gear: i32,
    /// Samples to look back before the zone start for the acceleration
    /// precondition.
    pub accel_lookback_samples: usize,
    /// Minimum speed gain (km/h) over the lookback window.
    pub min_speed_gain_kph: f64,
}

impl Default for SuperClippingConfig {
    fn default() -> Self {
        Self {
            min_duration_s: 1.0,
            throttle_full_threshold: 98.0,
            speed_plateau_tolerance_kph: 2.0,
            rpm_stutter_threshold: 5.0,
            min_gear: 6,
            accel_lookback_samples: 20,
            min_speed_gain_kph: 5.0,
        }
    }
}

/// A detected super-clipping zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperClippingZone {
    /// Distance along the lap where the plateau begins, in metres.
    pub start_distance_m: f64,
    /// Distance where the plateau ends, in metres.
    pub end_distance_m: f64,
    /// Zone duration in seconds.
    pub duration_s: f64,
    /// Mean throttle over the zone (close to 100 %).
    pub throttle_pct: f64,
    /// Mean speed over the zone in km/h.
    pub speed_plateau_kph: f64,
    /// Mean RPM over the zone.
    pub rpm_plateau: f64,
    /// Most frequent gear over the zone.
    pub gear: i32,
}

/// Detect super-clipping zones in *lap*.
///
/// A zone is a maximal contiguous run where throttle is at or above the
/// full-throttle threshold, the rolling speed std-dev stays within the
/// plateau tolerance, and RPM has stopped climbing, held in a gear of at
/// least [`SuperClippingConfig::min_gear`] for at least
/// [`SuperClippingConfig::min_duration_s`].
///
/// The run must also be preceded by genuine acceleration: the speed gain
/// over the [`SuperClippingConfig::accel_lookback_samples`] samples before
/// the run start (clamped to the lap start) must reach
/// [`SuperClippingConfig::min_speed_gain_kph`]. Without this gate a long
/// straight cruised at terminal velocity would be misclassified as
/// clipping.
///
/// Zones are returned in distance order. Pure and deterministic.
pub fn detect_super_clipping_zones(
    lap: &LapTelemetry,
    config: &SuperClippingConfig,
) -> TelemetryResult<Vec<SuperClippingZone>> {
    validate_channels(lap, &REQUIRED_CHANNELS)?;
    let samples = lap.samples();

    let speeds: Vec<f64> = samples.iter().map(|s| s.speed_kph).collect();
    let rpms: Vec<f64> = samples.iter().map(|s| s.rpm).collect();
    let speed_std = rolling_std(&speeds, SPEED_STD_WINDOW);
    let rpm_diff = backward_diff(&rpms);

    let clipping: Vec<bool> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.throttle_pct >= config.throttle_full_threshold
                && speed_std[i] <= config.speed_plateau_tolerance_kph
                && rpm_diff[i] <= config.rpm_stutter_threshold
        })
        .collect();

    let mut zones = Vec::new();
    for range in contiguous_true_runs(&clipping) {
        let start = range.start;
        let run = &samples[range];
        if run.len() < 2 {
            continue;
        }

        let gears: Vec<i32> = run.iter().map(|s| s.gear).collect();
        let gear = mode(&gears).unwrap_or(run[0].gear);
        if gear < config.min_gear {
            continue;
        }

        let first = &run[0];
        let last = &run[run.len() - 1];
        let duration = last.elapsed.saturating_sub(first.elapsed).as_secs_f64();
        if duration < config.min_duration_s {
            continue;
        }

        // Acceleration precondition: the plateau must follow a
        // rising-speed phase, otherwise steady-state cruising at
        // terminal velocity would register as clipping.
        let lookback_start = start.saturating_sub(config.accel_lookback_samples);
        let speed_gain = speeds[start] - speeds[lookback_start];
        if speed_gain < config.min_speed_gain_kph {
            continue;
        }

        let n = run.len() as f64;
        zones.push(SuperClippingZone {
            start_distance_m: first.distance_m,
            end_distance_m: last.distance_m,
            duration_s: round_to(duration, 3),
            throttle_pct: round_to(run.iter().map(|s| s.throttle_pct).sum::<f64>() / n, 1),
            speed_plateau_kph: round_to(run.iter().map(|s| s.speed_kph).sum::<f64>() / n, 1),
            rpm_plateau: round_to(run.iter().map(|s| s.rpm).sum::<f64>() / n, 0),
            gear,
        });
    }

    debug!(zones = zones.len(), "super-clipping detection complete");
    Ok(zones)
}
