//! Closed outlines made of straight runs and origin-centred arcs.
//!
//! Features are drawn once in a local frame whose "along" axis is `+y` (the
//! top quadrant) and mapped onto the other quadrants by swapping and negating
//! coordinates. A frame that reverses orientation also reverses every arc
//! sweep, so the bulges stay exact without going through a transform.

use crate::document::{ArcVertex, Primitive};
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::geometry::{ArcDirection, signed_bulge};
use nalgebra::Point2;

/// Signed permutation of the axes mapping a local point onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    swap: bool,
    negate_x: bool,
    negate_y: bool,
}

impl Frame {
    /// Along `+y`: identity.
    pub const TOP: Frame = Frame::new(false, false, false);
    /// Along `−y`: `(x, y) → (x, −y)`.
    pub const BOTTOM: Frame = Frame::new(false, false, true);
    /// Along `+x`: `(x, y) → (y, x)`.
    pub const RIGHT: Frame = Frame::new(true, false, false);
    /// Along `−x`: `(x, y) → (−y, x)`.
    pub const LEFT: Frame = Frame::new(true, true, false);

    const fn new(swap: bool, negate_x: bool, negate_y: bool) -> Self {
        Self {
            swap,
            negate_x,
            negate_y,
        }
    }

    /// Whether the mapping is a reflection (determinant −1).
    pub const fn reverses(self) -> bool {
        self.swap ^ self.negate_x ^ self.negate_y
    }

    pub fn map(self, x: Real, y: Real) -> Point2<Real> {
        let (x, y) = if self.swap { (y, x) } else { (x, y) };
        Point2::new(
            if self.negate_x { -x } else { x },
            if self.negate_y { -y } else { y },
        )
    }

    /// Axis-aligned rectangle given by two local corners.
    pub fn rectangle(self, corner: [Real; 2], opposite: [Real; 2]) -> Primitive {
        let a = self.map(corner[0], corner[1]);
        let b = self.map(opposite[0], opposite[1]);
        Primitive::rectangle([a.x, a.y], [b.x, b.y])
    }

    /// Closed polyline through local straight-edged `points`.
    pub fn polygon(self, points: &[[Real; 2]]) -> Primitive {
        Primitive::closed(
            points
                .iter()
                .map(|p| ArcVertex::from(self.map(p[0], p[1])))
                .collect(),
        )
    }
}

/// Builder for one closed outline. Arc segments are recorded with their local
/// sweep direction and resolved into bulges by [`Outline::finish`].
#[derive(Debug, Clone)]
pub struct Outline {
    frame: Frame,
    // page position, and the sweep of the segment leaving it (None = straight)
    vertices: Vec<(Point2<Real>, Option<ArcDirection>)>,
}

impl Outline {
    pub fn start(frame: Frame, at: Point2<Real>) -> Self {
        Self {
            frame,
            vertices: vec![(frame.map(at.x, at.y), None)],
        }
    }

    pub fn line_to(&mut self, x: Real, y: Real) -> &mut Self {
        self.vertices.push((self.frame.map(x, y), None));
        self
    }

    /// Arc about the origin from the current vertex to `to`.
    pub fn arc_to(&mut self, to: Point2<Real>, direction: ArcDirection) -> &mut Self {
        self.set_leaving(direction);
        self.vertices.push((self.frame.map(to.x, to.y), None));
        self
    }

    /// Closes the outline with an arc back to the first vertex.
    pub fn close_with_arc(&mut self, direction: ArcDirection) -> &mut Self {
        self.set_leaving(direction);
        self
    }

    fn set_leaving(&mut self, direction: ArcDirection) {
        if let Some(last) = self.vertices.last_mut() {
            last.1 = Some(direction);
        }
    }

    /// Resolves every arc into an exact bulge and returns the closed polyline.
    pub fn finish(&self) -> Result<Primitive, GeometryError> {
        let count = self.vertices.len();
        let mut vertices = Vec::with_capacity(count);
        for (i, (position, sweep)) in self.vertices.iter().enumerate() {
            let bulge = match sweep {
                Some(direction) => {
                    let next = &self.vertices[(i + 1) % count].0;
                    signed_bulge(position, next, direction.reversed_if(self.frame.reverses()))?
                },
                None => 0.0,
            };
            vertices.push(ArcVertex::with_bulge(*position, bulge));
        }
        Ok(Primitive::closed(vertices))
    }
}
