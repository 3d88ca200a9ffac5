//! Sensor package dispatch
//!
//! Maps a workout code to the reader that turns a flat list of numbers into
//! a typed [`Workout`]. Each reader checks arity and the physical
//! constraints on every value, so workouts coming out of this module never
//! carry zero durations or fractional step counts.

use tracing::{debug, warn};

use crate::error::ComputeError;
use crate::types::{
    require_positive, CommonReadings, RunningInput, SwimmingInput, WalkingInput, Workout,
    WorkoutType,
};

/// Builds a workout from the raw numbers of one sensor package
pub type PackageReader = fn(&[f64]) -> Result<Workout, ComputeError>;

/// Code table: one reader per workout type
pub static PACKAGE_READERS: &[(WorkoutType, PackageReader)] = &[
    (WorkoutType::Swimming, read_swimming),
    (WorkoutType::Running, read_running),
    (WorkoutType::SportsWalking, read_walking),
];

/// Look up the reader registered for a workout type
pub fn reader_for(workout_type: WorkoutType) -> Option<PackageReader> {
    PACKAGE_READERS
        .iter()
        .find(|(t, _)| *t == workout_type)
        .map(|(_, reader)| *reader)
}

/// Read one sensor package into a typed workout.
///
/// # Arguments
/// * `code` - Workout code (`"SWM"`, `"RUN"` or `"WLK"`)
/// * `data` - Readings in the order given by [`WorkoutType::parameter_names`]
///
/// # Example
/// ```
/// use stride_flux::dispatch::read_package;
///
/// let workout = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();
/// assert_eq!(workout.workout_type().code(), "RUN");
/// ```
pub fn read_package(code: &str, data: &[f64]) -> Result<Workout, ComputeError> {
    let workout_type: WorkoutType = code.parse().map_err(|e| {
        warn!(code, "rejected package with unknown workout code");
        e
    })?;

    debug!(
        workout = workout_type.display_name(),
        values = data.len(),
        "reading sensor package"
    );

    let reader = reader_for(workout_type)
        .ok_or_else(|| ComputeError::InvalidWorkoutType(code.to_string()))?;
    reader(data)
}

fn read_running(data: &[f64]) -> Result<Workout, ComputeError> {
    let params = Params::new(WorkoutType::Running, data)?;
    Ok(Workout::Running(RunningInput {
        common: params.common()?,
    }))
}

fn read_walking(data: &[f64]) -> Result<Workout, ComputeError> {
    let params = Params::new(WorkoutType::SportsWalking, data)?;
    Ok(Workout::SportsWalking(WalkingInput {
        common: params.common()?,
        height_cm: params.positive(3)?,
    }))
}

fn read_swimming(data: &[f64]) -> Result<Workout, ComputeError> {
    let params = Params::new(WorkoutType::Swimming, data)?;
    Ok(Workout::Swimming(SwimmingInput {
        common: params.common()?,
        pool_length_m: params.positive(3)?,
        pool_laps: params.count(4)?,
    }))
}

/// Arity-checked view over a package's numbers
struct Params<'a> {
    names: &'static [&'static str],
    data: &'a [f64],
}

impl<'a> Params<'a> {
    fn new(workout_type: WorkoutType, data: &'a [f64]) -> Result<Self, ComputeError> {
        let names = workout_type.parameter_names();

        if data.len() < names.len() {
            return Err(ComputeError::MissingParameter {
                workout: workout_type.display_name(),
                name: names[data.len()],
                index: data.len(),
            });
        }
        if data.len() > names.len() {
            return Err(ComputeError::UnexpectedParameters {
                workout: workout_type.display_name(),
                expected: names.len(),
                actual: data.len(),
            });
        }

        Ok(Self { names, data })
    }

    fn common(&self) -> Result<CommonReadings, ComputeError> {
        Ok(CommonReadings {
            action_count: self.count(0)?,
            duration_hours: self.positive(1)?,
            weight_kg: self.positive(2)?,
        })
    }

    fn positive(&self, index: usize) -> Result<f64, ComputeError> {
        require_positive(self.names[index], self.data[index])
    }

    /// Non-negative whole number that fits a u32
    fn count(&self, index: usize) -> Result<u32, ComputeError> {
        let name = self.names[index];
        let value = self.data[index];

        let reason = if !value.is_finite() {
            "must be a finite number"
        } else if value < 0.0 {
            "must not be negative"
        } else if value.fract() != 0.0 {
            "must be a whole number"
        } else if value > f64::from(u32::MAX) {
            "is too large"
        } else {
            return Ok(value as u32);
        };

        Err(ComputeError::InvalidParameterValue {
            name,
            value,
            reason,
        })
    }
}
