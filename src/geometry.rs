//! Tangent-arc ("bulge") kernel and plane vector helpers.
//!
//! Every arc of a pixel is centred on the absorber centre, which is the
//! origin of the pixel frame. A polyline segment from `a` to `b` with bulge
//! `b = tan(θ/4)` is the arc of included angle `θ` joining them; positive
//! bulges run counter-clockwise, negative ones clockwise.
//!
//! ## Bulge of a chord on a circle about the origin
//! ```text
//! r = |a|,  c = |a − b|
//! bulge = 2/c · (r − sqrt(r² − c²/4))      (sagitta over half chord)
//! ```
//! The expression is only defined for `0 < c ≤ 2r`; it always describes the
//! minor arc, so callers split sweeps of half a turn or more.

use crate::errors::GeometryError;
use crate::float_types::{FRAC_PI_2, PI, Real, tolerance};
use crate::transform::Mirror;
use nalgebra::{Point2, Rotation2, Vector2};

/// Direction in which an arc is swept from its start vertex to its end vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    CounterClockwise,
    Clockwise,
}

impl ArcDirection {
    /// The opposite sweep, e.g. after reflecting the arc across an axis.
    pub const fn reversed(self) -> Self {
        match self {
            ArcDirection::CounterClockwise => ArcDirection::Clockwise,
            ArcDirection::Clockwise => ArcDirection::CounterClockwise,
        }
    }

    /// Reverses the direction when `flip` is set.
    pub const fn reversed_if(self, flip: bool) -> Self {
        if flip { self.reversed() } else { self }
    }

    const fn sign(self) -> Real {
        match self {
            ArcDirection::CounterClockwise => 1.0,
            ArcDirection::Clockwise => -1.0,
        }
    }
}

/// Unsigned bulge of the minor arc from `a` to `b` on the circle of radius `|a|`
/// centred at the origin.
///
/// `a` and `b` are assumed to lie on the same circle; only `|a|` is used as
/// the reference radius.
pub fn bulge(a: &Point2<Real>, b: &Point2<Real>) -> Result<Real, GeometryError> {
    let radius = norm(a);
    let chord = (a - b).norm();
    if chord <= tolerance() || chord > 2.0 * radius + tolerance() {
        return Err(GeometryError::InvalidChord { chord, radius });
    }
    // clamp rounding noise of a chord that is exactly a diameter
    let half_chord = (chord * 0.5).min(radius);
    let sagitta = radius - (radius * radius - half_chord * half_chord).sqrt();
    Ok(2.0 / chord * sagitta)
}

/// Bulge from `a` to `b` with the sign selected by `direction`.
pub fn signed_bulge(
    a: &Point2<Real>,
    b: &Point2<Real>,
    direction: ArcDirection,
) -> Result<Real, GeometryError> {
    Ok(direction.sign() * bulge(a, b)?)
}

/// Direction of the minor arc about the origin from `a` to `b`.
pub fn arc_direction(a: &Point2<Real>, b: &Point2<Real>) -> ArcDirection {
    if a.coords.perp(&b.coords) >= 0.0 {
        ArcDirection::CounterClockwise
    } else {
        ArcDirection::Clockwise
    }
}

/// Unit normal pointing to the left of the chord `a → b`.
fn left_normal(a: &Point2<Real>, b: &Point2<Real>) -> Vector2<Real> {
    let chord = b - a;
    Vector2::new(-chord.y, chord.x) / chord.norm()
}

/// Point halfway along the bulge segment from `a` to `b`.
///
/// A counter-clockwise arc bulges to the right of its chord.
pub fn arc_midpoint(a: &Point2<Real>, b: &Point2<Real>, bulge: Real) -> Point2<Real> {
    let middle = nalgebra::center(a, b);
    if bulge == 0.0 || a == b {
        return middle;
    }
    let sagitta = bulge * (b - a).norm() * 0.5;
    middle - left_normal(a, b) * sagitta
}

/// Centre of the circle carrying the bulge segment from `a` to `b`,
/// or `None` for a straight segment.
pub fn arc_center(a: &Point2<Real>, b: &Point2<Real>, bulge: Real) -> Option<Point2<Real>> {
    if bulge == 0.0 || a == b {
        return None;
    }
    let half_chord = (b - a).norm() * 0.5;
    let offset = half_chord * (1.0 - bulge * bulge) / (2.0 * bulge);
    Some(nalgebra::center(a, b) + left_normal(a, b) * offset)
}

/// Axis-aligned bounds `(min, max)` of the segment from `a` to `b`,
/// including the extreme points of the arc when `bulge != 0`.
pub fn segment_bounds(
    a: &Point2<Real>,
    b: &Point2<Real>,
    bulge: Real,
) -> (Point2<Real>, Point2<Real>) {
    let mut min = Point2::new(a.x.min(b.x), a.y.min(b.y));
    let mut max = Point2::new(a.x.max(b.x), a.y.max(b.y));

    let Some(center) = arc_center(a, b, bulge) else {
        return (min, max);
    };
    let radius = (a - center).norm();
    let start = (a.y - center.y).atan2(a.x - center.x);
    let sweep = 4.0 * bulge.atan();

    // visit every quarter-turn direction crossed by the sweep
    for quadrant in 0..4 {
        let axis_angle = quadrant as Real * FRAC_PI_2;
        if angle_within_sweep(axis_angle, start, sweep) {
            let extreme = center + Vector2::new(axis_angle.cos(), axis_angle.sin()) * radius;
            min = Point2::new(min.x.min(extreme.x), min.y.min(extreme.y));
            max = Point2::new(max.x.max(extreme.x), max.y.max(extreme.y));
        }
    }
    (min, max)
}

/// Whether `angle` is reached when sweeping `sweep` radians from `start`
/// (negative sweeps run clockwise).
fn angle_within_sweep(angle: Real, start: Real, sweep: Real) -> bool {
    let turn = 2.0 * PI;
    let offset = if sweep >= 0.0 {
        (angle - start).rem_euclid(turn)
    } else {
        (start - angle).rem_euclid(turn)
    };
    offset <= sweep.abs()
}

/// Euclidean distance of `p` from the origin.
pub fn norm(p: &Point2<Real>) -> Real {
    p.coords.norm()
}

/// `p` rotated about the origin by `degrees`, counter-clockwise.
pub fn rotate(p: &Point2<Real>, degrees: Real) -> Point2<Real> {
    if degrees == 0.0 {
        return *p;
    }
    Rotation2::new(degrees.to_radians()) * *p
}

/// `p` reflected as prescribed by `mirror`.
pub fn reflect(p: &Point2<Real>, mirror: Mirror) -> Point2<Real> {
    match mirror {
        Mirror::None => *p,
        Mirror::X => Point2::new(-p.x, p.y),
        Mirror::Y => Point2::new(p.x, -p.y),
    }
}

/// Point at distance `radius` from the origin in direction `radians`.
pub fn polar(radius: Real, radians: Real) -> Point2<Real> {
    Point2::new(radius * radians.cos(), radius * radians.sin())
}

/// Height above the x axis at which a vertical line at `x` meets the circle of
/// radius `radius` about the origin.
pub fn chord_height(radius: Real, x: Real) -> Real {
    (radius * radius - x * x).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_arc_bulge_is_tan_of_quarter_angle() {
        let a = Point2::new(10.0, 0.0);
        let b = Point2::new(0.0, 10.0);
        let value = bulge(&a, &b).unwrap();
        assert!((value - (PI / 8.0).tan()).abs() < 1e-12);
        assert_eq!(arc_direction(&a, &b), ArcDirection::CounterClockwise);
        assert!(signed_bulge(&b, &a, ArcDirection::Clockwise).unwrap() < 0.0);
    }

    #[test]
    fn chord_longer_than_diameter_is_rejected() {
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(-3.0, 0.0);
        assert!(matches!(bulge(&a, &b), Err(GeometryError::InvalidChord { .. })));
        assert!(bulge(&a, &a).is_err());
    }

    #[test]
    fn centre_of_origin_arc_is_origin() {
        let a = polar(25.0, 0.3);
        let b = polar(25.0, 1.2);
        let value = signed_bulge(&a, &b, ArcDirection::CounterClockwise).unwrap();
        let center = arc_center(&a, &b, value).unwrap();
        assert!(center.coords.norm() < 1e-9);
    }

    #[test]
    fn half_turn_bounds_include_axis_extreme() {
        let a = Point2::new(5.0, 0.0);
        let b = Point2::new(-5.0, 0.0);
        let (min, max) = segment_bounds(&a, &b, 1.0);
        assert!((max.y - 5.0).abs() < 1e-9);
        assert!(min.y.abs() < 1e-9);
        assert!((min.x + 5.0).abs() < 1e-9);
    }
}
