//! Input validation shared by both detectors.

use thiserror::Error;

use super::lap::{Channel, LapTelemetry};

/// Errors raised when a lap cannot be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The lap has no samples.
    #[error("telemetry is empty")]
    EmptyTelemetry,

    /// One or more required channels were not delivered by the
    /// acquisition layer. Lists every missing channel, not just the first.
    #[error("missing required telemetry channels: {}", format_channels(.0))]
    MissingChannels(Vec<Channel>),
}

/// Result type for telemetry analysis operations.
pub type TelemetryResult<T> = Result<T, ValidationError>;

fn format_channels(channels: &[Channel]) -> String {
    channels
        .iter()
        .map(Channel::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that *lap* is non-empty and carries every channel in *required*.
pub fn validate_channels(lap: &LapTelemetry, required: &[Channel]) -> TelemetryResult<()> {
    if lap.is_empty() {
        return Err(ValidationError::EmptyTelemetry);
    }
    let missing: Vec<Channel> = required
        .iter()
        .copied()
        .filter(|channel| !lap.has_channel(*channel))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingChannels(missing));
    }
    Ok(())
}
