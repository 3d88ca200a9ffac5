//! Stride Flux - Workout calculator for raw tracker readings
//!
//! Stride turns a workout code and the flat list of readings a tracker sends
//! (step or stroke count, duration, weight, workout-specific extras) into
//! distance, mean speed and calories burned, through a deterministic pipeline:
//! package dispatch → validation → calculation → formatting.
//!
//! ## Workouts
//!
//! - **Running** (`RUN`): action count, duration, weight
//! - **Sports walking** (`WLK`): action count, duration, weight, height
//! - **Swimming** (`SWM`): action count, duration, weight, pool length, laps

pub mod calculator;
pub mod coefficients;
pub mod dispatch;
pub mod error;
pub mod formatter;
pub mod package;
pub mod pipeline;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calculator::WorkoutCalculator;
pub use error::ComputeError;
pub use formatter::{FormatOptions, InfoMessage, SummaryEncoder};
pub use package::{sample_packages, PackageParser, SensorPackage};
pub use pipeline::{calculate_package, process_packages, workout_summary, WorkoutProcessor};
pub use types::{Workout, WorkoutResult, WorkoutType};

/// Stride version embedded in all summary payloads
pub const STRIDE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for summary payloads
pub const PRODUCER_NAME: &str = "stride-flux";
