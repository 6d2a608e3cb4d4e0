//! Rigid placement of pixel geometry.
//!
//! A [`RigidTransform`] always applies its parts in the same order: mirror,
//! rotation about the origin, translation. Text is the one exception: labels
//! only ever receive the translation, so an index stays upright and readable
//! wherever and however its pixel is placed.

use crate::document::{ArcVertex, Document, Entity, Primitive, normalize_degrees};
use crate::float_types::Real;
use crate::geometry::{reflect, rotate};
use crate::traits::TransformOps;
use nalgebra::{Matrix3, Point2, Rotation2, Translation2, Vector2};

/// Reflection applied before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Mirror {
    #[default]
    None,
    /// Negates x coordinates (reflection across the y axis).
    X,
    /// Negates y coordinates (reflection across the x axis).
    Y,
}

impl Mirror {
    /// Parses the one-letter codes of array placement tables: `'x'`, `'y'`,
    /// anything else meaning no mirroring.
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_lowercase() {
            'x' => Mirror::X,
            'y' => Mirror::Y,
            _ => Mirror::None,
        }
    }

    pub const fn is_reflection(self) -> bool {
        !matches!(self, Mirror::None)
    }

    /// Reflects an arc angle (degrees) measured from the +x axis.
    fn reflect_angle(self, degrees: Real) -> Real {
        match self {
            Mirror::None => degrees,
            Mirror::X => 180.0 - degrees,
            Mirror::Y => -degrees,
        }
    }
}

/// Mirror, then rotation about the origin (degrees), then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub mirror: Mirror,
    pub rotation: Real,
    pub translation: Vector2<Real>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    pub fn new(mirror: Mirror, rotation: Real, translation: Vector2<Real>) -> Self {
        Self {
            mirror,
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Mirror::None, 0.0, Vector2::zeros())
    }

    pub fn translation(x: Real, y: Real) -> Self {
        Self::new(Mirror::None, 0.0, Vector2::new(x, y))
    }

    pub fn rotation(degrees: Real) -> Self {
        Self::new(Mirror::None, degrees, Vector2::zeros())
    }

    pub fn mirroring(mirror: Mirror) -> Self {
        Self::new(mirror, 0.0, Vector2::zeros())
    }

    /// The translation part alone, as applied to text.
    pub fn translation_only(&self) -> Self {
        Self::new(Mirror::None, 0.0, self.translation)
    }

    pub fn apply_point(&self, point: &Point2<Real>) -> Point2<Real> {
        rotate(&reflect(point, self.mirror), self.rotation) + self.translation
    }

    /// The equivalent homogeneous 3×3 matrix, for consumers that compose
    /// transforms as matrices.
    pub fn to_homogeneous(&self) -> Matrix3<Real> {
        let scale = match self.mirror {
            Mirror::None => Vector2::new(1.0, 1.0),
            Mirror::X => Vector2::new(-1.0, 1.0),
            Mirror::Y => Vector2::new(1.0, -1.0),
        };
        Translation2::from(self.translation).to_homogeneous()
            * Rotation2::new(self.rotation.to_radians()).to_homogeneous()
            * Matrix3::new_nonuniform_scaling(&scale)
    }
}

impl TransformOps for Point2<Real> {
    fn transform(&self, transform: &RigidTransform) -> Self {
        transform.apply_point(self)
    }
}

impl TransformOps for ArcVertex {
    /// Reflection reverses the sweep of the following arc; rotation and
    /// translation leave the bulge untouched.
    fn transform(&self, transform: &RigidTransform) -> Self {
        let bulge = if transform.mirror.is_reflection() {
            -self.bulge
        } else {
            self.bulge
        };
        ArcVertex::with_bulge(transform.apply_point(&self.position), bulge)
    }
}

impl TransformOps for Primitive {
    fn transform(&self, transform: &RigidTransform) -> Self {
        match self {
            Primitive::Polyline { vertices, closed } => Primitive::Polyline {
                vertices: vertices.iter().map(|v| v.transform(transform)).collect(),
                closed: *closed,
            },
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                // angles are wrapped to [0, 360), so a double reflection
                // returns them within `tolerance()` rather than bit for bit
                let mirror = transform.mirror;
                // a reflected counter-clockwise sweep runs from the image of its end
                let (start, end) = if mirror.is_reflection() {
                    (mirror.reflect_angle(*end_angle), mirror.reflect_angle(*start_angle))
                } else {
                    (*start_angle, *end_angle)
                };
                Primitive::Arc {
                    center: transform.apply_point(center),
                    radius: *radius,
                    start_angle: normalize_degrees(start + transform.rotation),
                    end_angle: normalize_degrees(end + transform.rotation),
                }
            },
            Primitive::Text {
                position,
                height,
                content,
                rotation,
                anchor,
            } => Primitive::Text {
                // labels stay upright: only the translation applies
                position: transform.translation_only().apply_point(position),
                height: *height,
                content: content.clone(),
                rotation: *rotation,
                anchor: *anchor,
            },
        }
    }
}

impl TransformOps for Entity {
    fn transform(&self, transform: &RigidTransform) -> Self {
        Entity {
            layer: self.layer.clone(),
            primitive: self.primitive.transform(transform),
        }
    }
}

impl TransformOps for Document {
    fn transform(&self, transform: &RigidTransform) -> Self {
        Document {
            layers: self.layers.clone(),
            entities: self.entities.iter().map(|e| e.transform(transform)).collect(),
        }
    }
}
