//! Error taxonomy
//!
//! Every failure is terminal for the operation that raised it: nothing is
//! retried and no partial document is ever handed back.

use crate::float_types::Real;
use thiserror::Error;

/// Invalid or inconsistent [`Parameters`](crate::pattern::Parameters),
/// detected before any geometry is emitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// (NegativeLength) A length or count is below zero
    #[error("(NegativeLength) parameter `{parameter}` must be non-negative, got {value}")]
    NegativeLength { parameter: &'static str, value: Real },
    /// (NonFinite) A parameter is NaN or infinite
    #[error("(NonFinite) parameter `{parameter}` is NaN or infinite")]
    NonFinite { parameter: &'static str },
    /// (RadiusOrder) The choke radii are not strictly decreasing
    #[error(
        "(RadiusOrder) choke radii must satisfy r1 > r2 > r3 > r4 > 0, got r1={r1}, r2={r2}, r3={r3}, r4={r4}"
    )]
    RadiusOrder { r1: Real, r2: Real, r3: Real, r4: Real },
    /// (Inconsistent) A parameter conflicts with the others for the requested design
    #[error("(Inconsistent) parameter `{parameter}`: {reason}")]
    Inconsistent { parameter: &'static str, reason: String },
}

/// Degenerate input to the tangent-arc kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// (InvalidChord) The chord is empty or longer than the circle's diameter
    #[error("(InvalidChord) chord of length {chord} does not fit a circle of radius {radius}")]
    InvalidChord { chord: Real, radius: Real },
}

/// Failures while merging pixel documents into an array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// (MissingPixel) An array entry names a pixel that was never supplied
    #[error("(MissingPixel) array entry {entry} references pixel {pixel}, which is not available")]
    MissingPixel { entry: usize, pixel: usize },
    /// (LengthMismatch) Placement columns of different lengths
    #[error(
        "(LengthMismatch) got {positions} positions, {rotations} rotations and {mirrors} mirror codes"
    )]
    LengthMismatch {
        positions: usize,
        rotations: usize,
        mirrors: usize,
    },
}

/// Any error raised by the layout engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
