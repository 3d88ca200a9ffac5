//! Model constants
//!
//! Unit conversions shared by every workout kind, and the calorie model
//! coefficients grouped per workout kind.

/// Meters per kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Minutes per hour
pub const MIN_IN_H: f64 = 60.0;

/// Running stride model
pub mod running {
    /// Stride length (meters)
    pub const STEP_LENGTH_M: f64 = 0.65;
    /// Multiplier applied to mean speed
    pub const CALORIES_SPEED_MULTIPLIER: f64 = 18.0;
    /// Offset subtracted after the speed multiplier
    pub const CALORIES_SPEED_SHIFT: f64 = 20.0;
}

/// Sports walking stride model
pub mod walking {
    /// Stride length (meters)
    pub const STEP_LENGTH_M: f64 = 0.65;
    /// Base weight coefficient
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    /// Exponent applied to mean speed
    pub const CALORIES_SPEED_EXPONENT: i32 = 2;
    /// Coefficient applied to the speed/height term
    pub const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
}

/// Swimming stroke model
pub mod swimming {
    /// Distance covered per stroke (meters)
    pub const STROKE_LENGTH_M: f64 = 1.38;
    /// Offset added to mean speed
    pub const CALORIES_SPEED_SHIFT: f64 = 1.1;
    /// Weight multiplier
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;
}
