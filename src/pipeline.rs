//! Pipeline orchestration
//!
//! This module provides the public API for Stride Flux.
//! It wires sensor packages through dispatch, calculation and formatting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::calculator::WorkoutCalculator;
use crate::dispatch::read_package;
use crate::error::ComputeError;
use crate::formatter::{FormatOptions, InfoMessage, SummaryEncoder};
use crate::package::SensorPackage;
use crate::types::WorkoutResult;

/// Compute one package and return its formatted summary line.
///
/// # Arguments
/// * `code` - Workout code (`"SWM"`, `"RUN"` or `"WLK"`)
/// * `data` - Raw readings for that workout type
///
/// # Example
/// ```
/// let line = stride_flux::workout_summary("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
/// assert!(line.contains("Calories burned: 336.000."));
/// ```
pub fn workout_summary(code: &str, data: &[f64]) -> Result<String, ComputeError> {
    let result = calculate_package(&SensorPackage::new(code, data))?;
    Ok(InfoMessage::from(&result).to_string())
}

/// Compute the metrics for a single package.
///
/// Results with non-finite metrics are rejected rather than rendered.
pub fn calculate_package(package: &SensorPackage) -> Result<WorkoutResult, ComputeError> {
    let workout = read_package(&package.workout_type, &package.data)?;
    WorkoutCalculator::try_calculate(&workout)
}

/// Compute every package, stopping at the first invalid one
pub fn process_packages(packages: &[SensorPackage]) -> Result<Vec<WorkoutResult>, ComputeError> {
    packages.iter().map(calculate_package).collect()
}

/// Per-type counts of processed and rejected packages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTally {
    /// Successfully computed packages, keyed by workout code
    pub processed: BTreeMap<String, usize>,
    /// Number of packages that failed dispatch or validation
    pub rejected: usize,
}

impl ProcessingTally {
    pub fn total_processed(&self) -> usize {
        self.processed.values().sum()
    }
}

/// Stateful processor that keeps formatting settings and a running tally.
///
/// Use this when feeding packages one at a time, e.g. from a stream.
pub struct WorkoutProcessor {
    encoder: SummaryEncoder,
    tally: ProcessingTally,
}

impl Default for WorkoutProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a processor with specific formatting settings
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            encoder: SummaryEncoder::with_options(options),
            tally: ProcessingTally::default(),
        }
    }

    pub fn options(&self) -> &FormatOptions {
        self.encoder.options()
    }

    pub fn tally(&self) -> &ProcessingTally {
        &self.tally
    }

    /// Compute one package, recording the outcome in the tally
    pub fn process(&mut self, package: &SensorPackage) -> Result<WorkoutResult, ComputeError> {
        match calculate_package(package) {
            Ok(result) => {
                debug!(
                    workout = result.workout_type.code(),
                    distance_km = result.distance_km,
                    calories_kcal = result.calories_kcal,
                    "computed workout"
                );
                *self
                    .tally
                    .processed
                    .entry(result.workout_type.code().to_string())
                    .or_insert(0) += 1;
                Ok(result)
            }
            Err(e) => {
                warn!(workout = %package.workout_type, error = %e, "rejected sensor package");
                self.tally.rejected += 1;
                Err(e)
            }
        }
    }

    /// Compute one package and render the summary line
    pub fn process_to_text(&mut self, package: &SensorPackage) -> Result<String, ComputeError> {
        let result = self.process(package)?;
        Ok(InfoMessage::from(&result).render(self.encoder.options()))
    }

    /// Compute one package and encode it as a JSON summary
    pub fn process_to_json(&mut self, package: &SensorPackage) -> Result<String, ComputeError> {
        let result = self.process(package)?;
        self.encoder.encode_to_json(&result)
    }

    /// Access the encoder, e.g. to build summaries from existing results
    pub fn encoder(&self) -> &SummaryEncoder {
        &self.encoder
    }
}
