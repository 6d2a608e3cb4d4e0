//! Polarisation-sensitive absorber arms.

use super::outline::Frame;
use super::parameters::Parameters;
use crate::document::{Entity, Primitive};
use crate::float_types::Real;
use nalgebra::Point2;

/// How the absorber cross is split into arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmLayout {
    /// One arm spanning the whole side for the vertical polarisation, open at
    /// the bottom, plus a left and a right arm for the horizontal one.
    Continuous,
    /// Four arms, one per quadrant, each closed toward the centre and open
    /// toward the choke.
    Split,
}

/// U-shaped arm drawn along the local `+y` axis: closed end with its outer
/// edge at `closed_at`, open end at the absorber edge.
fn u_arm(frame: Frame, params: &Parameters, closed_at: Real) -> Primitive {
    let derived = params.derived();
    let w = params.dimensions().w;
    let outer = derived.arm_half_width;
    let inner = derived.half_gap;
    let open_at = derived.half_length;
    frame.polygon(&[
        [-outer, open_at],
        [-outer, closed_at],
        [outer, closed_at],
        [outer, open_at],
        [inner, open_at],
        [inner, closed_at + w],
        [-inner, closed_at + w],
        [-inner, open_at],
    ])
}

/// Distance from the centre of the closed end of a polarisation arm that has
/// to clear the other polarisation by `d`.
pub(crate) fn arm_closed_end(params: &Parameters) -> Real {
    params.derived().arm_half_width + params.dimensions().d
}

pub(crate) fn arms(params: &Parameters, layout: ArmLayout, layer: &str) -> Vec<Entity> {
    let closed_at = arm_closed_end(params);
    let arms = match layout {
        ArmLayout::Continuous => vec![
            u_arm(Frame::BOTTOM, params, -params.derived().half_length),
            u_arm(Frame::LEFT, params, closed_at),
            u_arm(Frame::RIGHT, params, closed_at),
        ],
        ArmLayout::Split => vec![
            u_arm(Frame::TOP, params, closed_at),
            u_arm(Frame::BOTTOM, params, closed_at),
            u_arm(Frame::LEFT, params, closed_at),
            u_arm(Frame::RIGHT, params, closed_at),
        ],
    };
    arms.into_iter().map(|arm| Entity::new(layer, arm)).collect()
}

/// Quarter arc marking where the capacitor connector of a bare cross attaches:
/// radius from the centre to the outer corner of the vertical arm's open end,
/// swept through the lower-left quadrant.
pub(crate) fn connector_guide_arc(params: &Parameters, layer: &str) -> Entity {
    let derived = params.derived();
    let corner = Point2::new(derived.arm_half_width, derived.half_length);
    Entity::new(
        layer,
        Primitive::Arc {
            center: Point2::origin(),
            radius: corner.coords.norm(),
            start_angle: 180.0,
            end_angle: 270.0,
        },
    )
}
