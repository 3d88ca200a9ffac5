//! Workout metric calculation
//!
//! This module derives the reported metrics from a typed workout record:
//! - Distance from action count and stride/stroke length
//! - Mean speed (from distance, or from pool geometry for swimming)
//! - Calories burned, using a per-kind model
//!
//! Every function here is pure. Inputs are expected to have passed
//! [`Workout::validate`], which rules out zero durations.

use crate::coefficients::{running, swimming, walking, M_IN_KM, MIN_IN_H};
use crate::error::ComputeError;
use crate::types::{
    CommonReadings, RunningInput, SwimmingInput, WalkingInput, Workout, WorkoutResult,
};

/// Calculator for turning workout records into results
pub struct WorkoutCalculator;

impl WorkoutCalculator {
    /// Compute distance, mean speed and calories for a workout
    pub fn calculate(workout: &Workout) -> WorkoutResult {
        match workout {
            Workout::Running(input) => calculate_running(input),
            Workout::SportsWalking(input) => calculate_walking(input),
            Workout::Swimming(input) => calculate_swimming(input),
        }
    }

    /// Validate the workout, compute it, and reject non-finite metrics.
    ///
    /// A positive but vanishingly small duration passes validation yet can
    /// overflow speed or calories; that is reported against `duration_hours`.
    pub fn try_calculate(workout: &Workout) -> Result<WorkoutResult, ComputeError> {
        workout.validate()?;
        let result = Self::calculate(workout);

        let metrics = [
            result.distance_km,
            result.mean_speed_kmh,
            result.calories_kcal,
        ];
        if metrics.iter().all(|v| v.is_finite()) {
            Ok(result)
        } else {
            Err(ComputeError::InvalidParameterValue {
                name: "duration_hours",
                value: result.duration_hours,
                reason: "is too small to produce finite metrics",
            })
        }
    }
}

/// Distance covered (km)
pub fn distance_km(workout: &Workout) -> f64 {
    match workout {
        Workout::Running(input) => stride_distance_km(&input.common, running::STEP_LENGTH_M),
        Workout::SportsWalking(input) => {
            stride_distance_km(&input.common, walking::STEP_LENGTH_M)
        }
        Workout::Swimming(input) => {
            stride_distance_km(&input.common, swimming::STROKE_LENGTH_M)
        }
    }
}

/// Mean speed (km/h)
pub fn mean_speed_kmh(workout: &Workout) -> f64 {
    match workout {
        Workout::Swimming(input) => pool_speed_kmh(input),
        _ => distance_km(workout) / workout.common().duration_hours,
    }
}

/// Calories burned (kcal)
pub fn spent_calories_kcal(workout: &Workout) -> f64 {
    let speed = mean_speed_kmh(workout);
    match workout {
        Workout::Running(input) => running_calories(&input.common, speed),
        Workout::SportsWalking(input) => walking_calories(input, speed),
        Workout::Swimming(input) => swimming_calories(input, speed),
    }
}

pub fn calculate_running(input: &RunningInput) -> WorkoutResult {
    let common = &input.common;
    let distance = stride_distance_km(common, running::STEP_LENGTH_M);
    let speed = distance / common.duration_hours;
    let calories = running_calories(common, speed);

    build_result(Workout::Running(*input), distance, speed, calories)
}

pub fn calculate_walking(input: &WalkingInput) -> WorkoutResult {
    let distance = stride_distance_km(&input.common, walking::STEP_LENGTH_M);
    let speed = distance / input.common.duration_hours;
    let calories = walking_calories(input, speed);

    build_result(Workout::SportsWalking(*input), distance, speed, calories)
}

pub fn calculate_swimming(input: &SwimmingInput) -> WorkoutResult {
    let distance = stride_distance_km(&input.common, swimming::STROKE_LENGTH_M);
    let speed = pool_speed_kmh(input);
    let calories = swimming_calories(input, speed);

    build_result(Workout::Swimming(*input), distance, speed, calories)
}

fn running_calories(common: &CommonReadings, speed: f64) -> f64 {
    (running::CALORIES_SPEED_MULTIPLIER * speed - running::CALORIES_SPEED_SHIFT)
        * common.weight_kg
        / M_IN_KM
        * (common.duration_hours * MIN_IN_H)
}

fn walking_calories(input: &WalkingInput, speed: f64) -> f64 {
    let common = &input.common;

    // Floor division of speed^2 by the raw height reading
    let speed_height_term =
        (speed.powi(walking::CALORIES_SPEED_EXPONENT) / input.height_cm).floor();

    (walking::CALORIES_WEIGHT_MULTIPLIER * common.weight_kg
        + speed_height_term * walking::CALORIES_SPEED_HEIGHT_MULTIPLIER * common.weight_kg)
        * (common.duration_hours * MIN_IN_H)
}

fn swimming_calories(input: &SwimmingInput, speed: f64) -> f64 {
    (speed + swimming::CALORIES_SPEED_SHIFT)
        * swimming::CALORIES_WEIGHT_MULTIPLIER
        * input.common.weight_kg
}

fn stride_distance_km(common: &CommonReadings, step_length_m: f64) -> f64 {
    f64::from(common.action_count) * step_length_m / M_IN_KM
}

fn pool_speed_kmh(input: &SwimmingInput) -> f64 {
    input.pool_length_m * f64::from(input.pool_laps) / M_IN_KM / input.common.duration_hours
}

fn build_result(workout: Workout, distance: f64, speed: f64, calories: f64) -> WorkoutResult {
    let workout_type = workout.workout_type();
    WorkoutResult {
        workout_type,
        type_name: workout_type.display_name().to_string(),
        duration_hours: workout.common().duration_hours,
        distance_km: distance,
        mean_speed_kmh: speed,
        calories_kcal: calories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkoutType;
    use pretty_assertions::assert_eq;

    fn common(action_count: u32, duration_hours: f64, weight_kg: f64) -> CommonReadings {
        CommonReadings {
            action_count,
            duration_hours,
            weight_kg,
        }
    }

    fn sample_running() -> Workout {
        Workout::Running(RunningInput {
            common: common(15000, 1.0, 75.0),
        })
    }

    fn sample_walking() -> Workout {
        Workout::SportsWalking(WalkingInput {
            common: common(9000, 1.0, 75.0),
            height_cm: 180.0,
        })
    }

    fn sample_swimming() -> Workout {
        Workout::Swimming(SwimmingInput {
            common: common(720, 1.0, 80.0),
            pool_length_m: 25.0,
            pool_laps: 40,
        })
    }

    #[test]
    fn test_running_metrics() {
        let result = WorkoutCalculator::calculate(&sample_running());

        assert_eq!(result.workout_type, WorkoutType::Running);
        assert_eq!(result.type_name, "Running");
        assert!((result.distance_km - 9.75).abs() < 1e-9);
        assert!((result.mean_speed_kmh - 9.75).abs() < 1e-9);
        // (18 * 9.75 - 20) * 75 / 1000 * 60
        assert!((result.calories_kcal - 699.75).abs() < 1e-6);
    }

    #[test]
    fn test_walking_metrics() {
        let result = WorkoutCalculator::calculate(&sample_walking());

        assert!((result.distance_km - 5.85).abs() < 1e-9);
        assert!((result.mean_speed_kmh - 5.85).abs() < 1e-9);
        // 5.85^2 / 180 floors to 0, leaving only the base weight term
        assert!((result.calories_kcal - 157.5).abs() < 1e-6);
    }

    #[test]
    fn test_walking_floor_term_contributes_when_fast() {
        // Just under 20 km in one hour at height 100: floor(399.99 / 100) = 3
        let workout = Workout::SportsWalking(WalkingInput {
            common: common(20000 * 1000 / 650, 1.0, 70.0),
            height_cm: 100.0,
        });
        let speed = mean_speed_kmh(&workout);
        let term = (speed * speed / 100.0).floor();
        let expected = (0.035 * 70.0 + term * 0.029 * 70.0) * 60.0;

        assert_eq!(term, 3.0);
        assert!((spent_calories_kcal(&workout) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_swimming_uses_pool_geometry_for_speed() {
        let workout = sample_swimming();
        let result = WorkoutCalculator::calculate(&workout);

        // Distance still comes from stroke count
        assert!((result.distance_km - 0.9936).abs() < 1e-9);
        // 25 * 40 / 1000 / 1
        assert!((result.mean_speed_kmh - 1.0).abs() < 1e-9);
        // (1.0 + 1.1) * 2 * 80
        assert!((result.calories_kcal - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_scales_speed() {
        let workout = Workout::Running(RunningInput {
            common: common(15000, 0.5, 75.0),
        });

        assert!((distance_km(&workout) - 9.75).abs() < 1e-9);
        assert!((mean_speed_kmh(&workout) - 19.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_actions_yield_zero_distance() {
        let workout = Workout::Running(RunningInput {
            common: common(0, 1.0, 75.0),
        });
        let result = WorkoutCalculator::calculate(&workout);

        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.mean_speed_kmh, 0.0);
        // The running model goes negative at very low speed
        assert!(result.calories_kcal < 0.0);
    }

    #[test]
    fn test_spent_calories_matches_full_calculation() {
        for workout in [sample_running(), sample_walking(), sample_swimming()] {
            let result = WorkoutCalculator::calculate(&workout);
            assert_eq!(
                spent_calories_kcal(&workout).to_bits(),
                result.calories_kcal.to_bits()
            );
        }
    }

    #[test]
    fn test_try_calculate_rejects_overflowing_duration() {
        // Walking squares the speed, which overflows for tiny durations
        let workout = Workout::SportsWalking(WalkingInput {
            common: common(9000, 1e-300, 75.0),
            height_cm: 180.0,
        });

        let err = WorkoutCalculator::try_calculate(&workout).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidParameterValue {
                name: "duration_hours",
                ..
            }
        ));
    }

    #[test]
    fn test_try_calculate_validates_input() {
        let workout = Workout::Running(RunningInput {
            common: common(15000, 0.0, 75.0),
        });

        assert!(WorkoutCalculator::try_calculate(&workout).is_err());
        assert!(WorkoutCalculator::try_calculate(&sample_running()).is_ok());
    }

    #[test]
    fn test_calculation_is_bit_identical_across_runs() {
        for workout in [sample_running(), sample_walking(), sample_swimming()] {
            let first = WorkoutCalculator::calculate(&workout);
            let second = WorkoutCalculator::calculate(&workout);

            assert_eq!(first.distance_km.to_bits(), second.distance_km.to_bits());
            assert_eq!(
                first.mean_speed_kmh.to_bits(),
                second.mean_speed_kmh.to_bits()
            );
            assert_eq!(first.calories_kcal.to_bits(), second.calories_kcal.to_bits());
        }
    }
}
