//! Error types for rejected simulation parameters.

use thiserror::Error;

use crate::vec2::Vec2;

/// A parameter was rejected at a constructor or setter.
///
/// Rejection leaves the target object unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AetherError {
    /// Rigid body mass must be strictly positive.
    #[error("mass must be greater than zero, got {0}")]
    InvalidMass(f64),
    /// Emitter velocity or angular velocity range was negative.
    #[error("{name} must not be negative, got {value}")]
    NegativeRange { name: &'static str, value: f64 },
    /// Friction must lie in `0.0..1.0`.
    #[error("friction must be in [0, 1), got {0}")]
    InvalidFriction(f64),
    /// Drag or a spring coefficient was negative.
    #[error("{name} must not be negative, got {value}")]
    NegativeCoefficient { name: &'static str, value: f64 },
    /// A parameter was NaN or infinite.
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
}

/// Result alias for fallible simulation operations.
pub type Result<T> = std::result::Result<T, AetherError>;

/// Checks that `value` is finite.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AetherError::NonFinite { name })
    }
}

/// Checks that both components of `v` are finite.
pub(crate) fn ensure_finite_vec(name: &'static str, v: Vec2) -> Result<Vec2> {
    ensure_finite(name, v.x)?;
    ensure_finite(name, v.y)?;
    Ok(v)
}

/// Checks an emitter sampling range: finite and `>= 0`.
pub(crate) fn ensure_range(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(AetherError::NegativeRange { name, value });
    }
    Ok(value)
}

/// Checks a damping or spring coefficient: finite and `>= 0`.
pub(crate) fn ensure_coefficient(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(AetherError::NegativeCoefficient { name, value });
    }
    Ok(value)
}
