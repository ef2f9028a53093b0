//! Telemetry data model for a single lap.
//!
//! A lap is an ordered, finite sequence of samples; order is the contract
//! and detectors never reorder or resample. Channel names and units are
//! fixed by upstream convention — this crate does not unit-convert.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One named telemetry measurement sampled at each point along the lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Cumulative distance along the lap in metres.
    DistanceM,
    /// Speed in km/h.
    SpeedKph,
    /// Throttle position, 0-100 %.
    ThrottlePct,
    /// Brake state, 0 or 1.
    Brake,
    /// Engine RPM.
    Rpm,
    /// Selected gear.
    Gear,
    /// Time elapsed since the start of the lap.
    Elapsed,
}

impl Channel {
    /// Every channel the acquisition layer can deliver.
    pub const ALL: [Channel; 7] = [
        Channel::DistanceM,
        Channel::SpeedKph,
        Channel::ThrottlePct,
        Channel::Brake,
        Channel::Rpm,
        Channel::Gear,
        Channel::Elapsed,
    ];

    /// The upstream channel name.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::DistanceM => "distance_m",
            Channel::SpeedKph => "speed_kph",
            Channel::ThrottlePct => "throttle_pct",
            Channel::Brake => "brake",
            Channel::Rpm => "rpm",
            Channel::Gear => "gear",
            Channel::Elapsed => "elapsed",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a lap's telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Cumulative distance in metres (non-decreasing within the lap).
    pub distance_m: f64,
    /// Speed in km/h.
    pub speed_kph: f64,
    /// Throttle position, 0-100 %.
    pub throttle_pct: f64,
    /// Brake state, 0 or 1.
    pub brake: u8,
    /// Engine RPM.
    pub rpm: f64,
    /// Selected gear.
    pub gear: i32,
    /// Time elapsed since the start of the lap (monotonically increasing).
    pub elapsed: Duration,
}

/// A complete lap of telemetry.
///
/// Samples are dense rows; which channels the upstream provider actually
/// delivered is tracked at the lap level, since providers omit channels
/// (brake in particular) for some sessions. Detectors validate the channel
/// set before reading sample fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTelemetry {
    samples: Vec<TelemetrySample>,
    channels: BTreeSet<Channel>,
}

impl LapTelemetry {
    /// Create a lap carrying every channel.
    pub fn new(samples: Vec<TelemetrySample>) -> Self {
        Self {
            samples,
            channels: Channel::ALL.into_iter().collect(),
        }
    }

    /// Create a lap carrying only the given channels.
    pub fn with_channels(
        samples: Vec<TelemetrySample>,
        channels: impl IntoIterator<Item = Channel>,
    ) -> Self {
        Self {
            samples,
            channels: channels.into_iter().collect(),
        }
    }

    /// The ordered sample sequence.
    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// The channels delivered by the acquisition layer.
    pub fn channels(&self) -> &BTreeSet<Channel> {
        &self.channels
    }

    /// Whether the given channel was delivered.
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    /// Number of samples in the lap.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the lap has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
