//! Result formatting
//!
//! This module renders workout results for people and for machines:
//! - [`InfoMessage`]: the fixed-template summary line
//! - [`SummaryEncoder`]: JSON summary payloads with producer metadata

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ComputeError;
use crate::types::{WorkoutResult, WorkoutType};
use crate::{PRODUCER_NAME, STRIDE_VERSION};

/// Current summary payload version
pub const SUMMARY_VERSION: &str = "1.0.0";

/// Decimal places used when no precision is configured
pub const DEFAULT_PRECISION: usize = 3;

/// Largest accepted precision; f64 carries no more significant decimals
pub const MAX_PRECISION: usize = 15;

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatOptions {
    /// Decimal places for every reported number
    precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FormatOptions {
    /// Build options, rejecting precisions above [`MAX_PRECISION`]
    pub fn new(precision: usize) -> Result<Self, ComputeError> {
        if precision > MAX_PRECISION {
            return Err(ComputeError::InvalidParameterValue {
                name: "precision",
                value: precision as f64,
                reason: "must be at most 15",
            });
        }
        Ok(Self { precision })
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

/// Informational message about a completed workout
#[derive(Debug, Clone, PartialEq)]
pub struct InfoMessage {
    pub training_type: String,
    pub duration: f64,
    pub distance: f64,
    pub speed: f64,
    pub calories: f64,
}

impl From<&WorkoutResult> for InfoMessage {
    fn from(result: &WorkoutResult) -> Self {
        Self {
            training_type: result.type_name.clone(),
            duration: result.duration_hours,
            distance: result.distance_km,
            speed: result.mean_speed_kmh,
            calories: result.calories_kcal,
        }
    }
}

impl InfoMessage {
    /// Render the summary line with the given precision
    pub fn render(&self, options: &FormatOptions) -> String {
        let p = options.precision;
        format!(
            "Training type: {}; Duration: {:.p$} h.; Distance: {:.p$} km; \
             Mean speed: {:.p$} km/h; Calories burned: {:.p$}.",
            self.training_type, self.duration, self.distance, self.speed, self.calories,
        )
    }
}

impl fmt::Display for InfoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatOptions::default()))
    }
}

/// Producer metadata attached to every summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Rounded workout metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}

/// Complete summary payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub summary_version: String,
    pub producer: SummaryProducer,
    pub computed_at_utc: String,
    pub workout_type: WorkoutType,
    pub type_name: String,
    pub metrics: SummaryMetrics,
    pub message: String,
}

/// Encoder for JSON workout summaries
pub struct SummaryEncoder {
    instance_id: String,
    options: FormatOptions,
}

impl Default for SummaryEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            options,
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String, options: FormatOptions) -> Self {
        Self {
            instance_id,
            options,
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Encode a result into a summary payload
    pub fn encode(&self, result: &WorkoutResult) -> Result<WorkoutSummary, ComputeError> {
        let metrics = SummaryMetrics {
            duration_hours: self.round(result.duration_hours)?,
            distance_km: self.round(result.distance_km)?,
            mean_speed_kmh: self.round(result.mean_speed_kmh)?,
            calories_kcal: self.round(result.calories_kcal)?,
        };

        Ok(WorkoutSummary {
            summary_version: SUMMARY_VERSION.to_string(),
            producer: SummaryProducer {
                name: PRODUCER_NAME.to_string(),
                version: STRIDE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            workout_type: result.workout_type,
            type_name: result.type_name.clone(),
            metrics,
            message: InfoMessage::from(result).render(&self.options),
        })
    }

    /// Encode to a compact JSON string
    pub fn encode_to_json(&self, result: &WorkoutResult) -> Result<String, ComputeError> {
        let summary = self.encode(result)?;
        serde_json::to_string(&summary).map_err(ComputeError::JsonError)
    }

    fn round(&self, value: f64) -> Result<f64, ComputeError> {
        if !value.is_finite() {
            return Err(ComputeError::EncodingError(format!(
                "cannot encode non-finite metric {value}"
            )));
        }
        let precision = i32::try_from(self.options.precision).map_err(|_| {
            ComputeError::EncodingError(format!(
                "precision {} is out of range",
                self.options.precision
            ))
        })?;
        let scale = 10f64.powi(precision);
        let rounded = (value * scale).round() / scale;
        if !rounded.is_finite() {
            return Err(ComputeError::EncodingError(format!(
                "cannot round {value} to {precision} decimals"
            )));
        }
        Ok(rounded)
    }
}
