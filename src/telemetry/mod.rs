//! Telemetry module for single-lap driving-technique detection.

pub mod analyzer;
pub mod lap;
pub mod lift_coast;
pub mod signal;
pub mod super_clipping;
pub mod validation;

pub use analyzer::{analyze_lap, AnalysisOverrides, AnalysisResult};
pub use lap::{Channel, LapTelemetry, TelemetrySample};
pub use lift_coast::{detect_lift_and_coast_zones, LiftAndCoastZone, LiftCoastConfig};
pub use super_clipping::{detect_super_clipping_zones, SuperClippingConfig, SuperClippingZone};
pub use validation::{validate_channels, TelemetryResult, ValidationError};
