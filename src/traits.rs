use crate::float_types::Real;
use crate::transform::{Mirror, RigidTransform};
use nalgebra::Vector2;

/// Rigid transformations returning new values; sources are never mutated.
pub trait TransformOps: Sized {
    /// Returns a new Self with `transform` applied (mirror, then rotate, then translate).
    fn transform(&self, transform: &RigidTransform) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector2<Real>) -> Self {
        self.transform(&RigidTransform::translation(vector.x, vector.y))
    }

    /// Returns a new Self translated by x and y.
    fn translate(&self, x: Real, y: Real) -> Self {
        self.translate_vector(Vector2::new(x, y))
    }

    /// Rotates about the origin by `degrees`, counter-clockwise.
    fn rotate(&self, degrees: Real) -> Self {
        self.transform(&RigidTransform::rotation(degrees))
    }

    /// Reflects as prescribed by `mirror`.
    fn mirror(&self, mirror: Mirror) -> Self {
        self.transform(&RigidTransform::mirroring(mirror))
    }
}
