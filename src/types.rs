//! Core types for Stride Flux
//!
//! This module defines the data structures that flow through the calculator:
//! the workout type codes, the typed workout records built from raw sensor
//! packages, and the computed result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ComputeError;

/// Workout kind, identified on the wire by a three-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    #[serde(rename = "RUN")]
    Running,
    #[serde(rename = "WLK")]
    SportsWalking,
    #[serde(rename = "SWM")]
    Swimming,
}

impl WorkoutType {
    /// All supported workout types, in code-table order
    pub const ALL: [WorkoutType; 3] = [
        WorkoutType::Swimming,
        WorkoutType::Running,
        WorkoutType::SportsWalking,
    ];

    /// Three-letter package code
    pub fn code(&self) -> &'static str {
        match self {
            WorkoutType::Running => "RUN",
            WorkoutType::SportsWalking => "WLK",
            WorkoutType::Swimming => "SWM",
        }
    }

    /// Name used in formatted summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::SportsWalking => "SportsWalking",
            WorkoutType::Swimming => "Swimming",
        }
    }

    /// Ordered parameter names expected in a sensor package
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            WorkoutType::Running => &["action_count", "duration_hours", "weight_kg"],
            WorkoutType::SportsWalking => {
                &["action_count", "duration_hours", "weight_kg", "height_cm"]
            }
            WorkoutType::Swimming => &[
                "action_count",
                "duration_hours",
                "weight_kg",
                "pool_length_m",
                "pool_laps",
            ],
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WorkoutType {
    type Err = ComputeError;

    /// Codes match exactly; there is no fallback for unknown codes.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        WorkoutType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| ComputeError::InvalidWorkoutType(code.to_string()))
    }
}

/// Readings shared by every workout kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommonReadings {
    /// Steps (running, walking) or strokes (swimming)
    pub action_count: u32,
    /// Session duration (hours)
    pub duration_hours: f64,
    /// Athlete weight (kg)
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningInput {
    pub common: CommonReadings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkingInput {
    pub common: CommonReadings,
    /// Athlete height (cm), used unconverted by the walking calorie model
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwimmingInput {
    pub common: CommonReadings,
    /// Pool length (meters)
    pub pool_length_m: f64,
    /// Number of pool lengths swum
    pub pool_laps: u32,
}

/// A single workout session with its kind-specific readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "workout_type")]
pub enum Workout {
    #[serde(rename = "RUN")]
    Running(RunningInput),
    #[serde(rename = "WLK")]
    SportsWalking(WalkingInput),
    #[serde(rename = "SWM")]
    Swimming(SwimmingInput),
}

impl Workout {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Workout::Running(_) => WorkoutType::Running,
            Workout::SportsWalking(_) => WorkoutType::SportsWalking,
            Workout::Swimming(_) => WorkoutType::Swimming,
        }
    }

    pub fn common(&self) -> &CommonReadings {
        match self {
            Workout::Running(input) => &input.common,
            Workout::SportsWalking(input) => &input.common,
            Workout::Swimming(input) => &input.common,
        }
    }

    /// Check the physical constraints on every reading.
    ///
    /// Records built by [`crate::dispatch::read_package`] already satisfy
    /// these; call this for records constructed by hand or deserialized.
    pub fn validate(&self) -> Result<(), ComputeError> {
        let common = self.common();
        require_positive("duration_hours", common.duration_hours)?;
        require_positive("weight_kg", common.weight_kg)?;

        match self {
            Workout::Running(_) => {}
            Workout::SportsWalking(input) => {
                require_positive("height_cm", input.height_cm)?;
            }
            Workout::Swimming(input) => {
                require_positive("pool_length_m", input.pool_length_m)?;
            }
        }
        Ok(())
    }
}

/// Reject non-finite and non-positive readings
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ComputeError> {
    if !value.is_finite() {
        return Err(ComputeError::InvalidParameterValue {
            name,
            value,
            reason: "must be a finite number",
        });
    }
    if value <= 0.0 {
        return Err(ComputeError::InvalidParameterValue {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}

/// Computed metrics for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutResult {
    pub workout_type: WorkoutType,
    /// Human-readable workout name
    pub type_name: String,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_round_trip() {
        for workout_type in WorkoutType::ALL {
            let parsed: WorkoutType = workout_type.code().parse().unwrap();
            assert_eq!(parsed, workout_type);
        }
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "XYZ".parse::<WorkoutType>().unwrap_err();
        assert!(matches!(err, ComputeError::InvalidWorkoutType(code) if code == "XYZ"));

        // Codes are case-sensitive
        assert!("run".parse::<WorkoutType>().is_err());
    }

    #[test]
    fn test_workout_serializes_with_code_tag() {
        let workout = Workout::Running(RunningInput {
            common: CommonReadings {
                action_count: 15000,
                duration_hours: 1.0,
                weight_kg: 75.0,
            },
        });

        let json = serde_json::to_value(workout).unwrap();
        assert_eq!(json["workout_type"], "RUN");
        assert_eq!(json["common"]["action_count"], 15000);
    }

    #[test]
    fn test_validate_accepts_every_kind() {
        let common = CommonReadings {
            action_count: 1000,
            duration_hours: 0.5,
            weight_kg: 70.0,
        };
        let workouts = [
            Workout::Running(RunningInput { common }),
            Workout::SportsWalking(WalkingInput {
                common,
                height_cm: 175.0,
            }),
            Workout::Swimming(SwimmingInput {
                common,
                pool_length_m: 50.0,
                pool_laps: 10,
            }),
        ];

        for workout in workouts {
            assert!(workout.validate().is_ok(), "{workout:?}");
        }
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let workout = Workout::Swimming(SwimmingInput {
            common: CommonReadings {
                action_count: 720,
                duration_hours: 0.0,
                weight_kg: 80.0,
            },
            pool_length_m: 25.0,
            pool_laps: 40,
        });

        let err = workout.validate().unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidParameterValue {
                name: "duration_hours",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_nan_height() {
        let workout = Workout::SportsWalking(WalkingInput {
            common: CommonReadings {
                action_count: 9000,
                duration_hours: 1.0,
                weight_kg: 75.0,
            },
            height_cm: f64::NAN,
        });

        assert!(workout.validate().is_err());
    }
}
