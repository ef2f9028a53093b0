//! LapSight - Lap Telemetry Technique Detection
//!
//! Analyzes one lap's vehicle telemetry (speed, throttle, brake, RPM, gear,
//! distance, elapsed time) and detects two driving-technique signatures:
//! lift-and-coast (early throttle release before braking) and super-clipping
//! (power cutoff from energy-deployment exhaustion on a straight).
//!
//! Everything here is a synchronous, pure function over an in-memory sample
//! sequence: no I/O, no shared state, safe to call from concurrent tasks.
//! Telemetry acquisition and chart rendering live in the applications that
//! embed this crate.

pub mod telemetry;

// Re-export commonly used types
pub use telemetry::analyzer::{analyze_lap, AnalysisOverrides, AnalysisResult};
pub use telemetry::lap::{Channel, LapTelemetry, TelemetrySample};
pub use telemetry::lift_coast::{LiftAndCoastZone, LiftCoastConfig};
pub use telemetry::super_clipping::{SuperClippingConfig, SuperClippingZone};
pub use telemetry::validation::{TelemetryResult, ValidationError};
