//! Interlocking choke rings isolating the two polarisation channels.
//!
//! The vertical channel owns the inner annulus `[r4, r3]`, the horizontal
//! channel the outer annulus `[r2, r1]`. Each channel is cut into two
//! sectors, centred on its own axis, leaving a gap on the other axis through
//! which the other channel's arms and exit neck pass. Every sector has a
//! notch reaching down to the open end of its absorber arm; the top and right
//! sectors also carry the exit neck feeding their capacitor.
//!
//! ```text
//!            Q ____ R
//!             |    |
//!      B _____P    S_____ C        outer radius
//!       /                 \
//!      A___      ___      _D       inner radius
//!          H    E
//!          |    |
//!          G____F                  arm open end (l/2)
//! ```

use super::outline::{Frame, Outline};
use super::parameters::Parameters;
use crate::document::Entity;
use crate::errors::{ConfigurationError, GeometryError};
use crate::float_types::{FRAC_PI_2, Real};
use crate::geometry::{ArcDirection, chord_height, polar};
use nalgebra::Point2;

/// One annular sector, described in the local frame of its channel axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sector {
    frame: Frame,
    inner: Real,
    outer: Real,
    /// Half of the angular span, measured from the local `+y` axis.
    half_span: Real,
    exit_neck: bool,
}

/// Validated choke geometry for one pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChokeLayout {
    sectors: [Sector; 4],
    /// Half width of the arm notch, `h/2 + w`.
    notch: Real,
    /// Distance of the arm open end from the centre.
    arm_end: Real,
    /// Half width of the exit necks.
    neck: Real,
    feed_offset: Real,
}

impl ChokeLayout {
    /// Checks that the rings, notches and necks fit into each other.
    pub fn new(params: &Parameters) -> Result<Self, ConfigurationError> {
        let dims = params.dimensions();
        let derived = params.derived();
        let [r1, r2, r3, r4] = derived.radii;
        if !(r1 > r2 && r2 > r3 && r3 > r4 && r4 > 0.0) {
            return Err(ConfigurationError::RadiusOrder { r1, r2, r3, r4 });
        }

        let notch = derived.arm_half_width;
        let neck = dims.choke_height * 0.5;
        let separation = dims.choke_separation;

        let inner_gap = (notch + separation) / r4;
        if inner_gap >= 1.0 {
            return Err(ConfigurationError::Inconsistent {
                parameter: "h",
                reason: format!("the horizontal arms ({notch} half width) do not pass inside radius {r4}"),
            });
        }
        let outer_gap = (neck + separation) / r2;
        if outer_gap >= 1.0 {
            return Err(ConfigurationError::Inconsistent {
                parameter: "choke_height",
                reason: format!("the vertical exit neck does not pass inside radius {r2}"),
            });
        }
        let vertical_span = FRAC_PI_2 - inner_gap.asin();
        let horizontal_span = FRAC_PI_2 - outer_gap.asin();

        for (inner, outer, span, ring) in [
            (r4, r3, vertical_span, "vertical"),
            (r2, r1, horizontal_span, "horizontal"),
        ] {
            if notch >= inner * span.sin() {
                return Err(ConfigurationError::Inconsistent {
                    parameter: "h",
                    reason: format!("the arm notch does not fit the {ring} choke sector"),
                });
            }
            if neck >= outer * span.sin() {
                return Err(ConfigurationError::Inconsistent {
                    parameter: "choke_height",
                    reason: format!("the exit neck does not fit the {ring} choke sector"),
                });
            }
        }

        let sector = |frame, inner, outer, half_span, exit_neck| Sector {
            frame,
            inner,
            outer,
            half_span,
            exit_neck,
        };
        Ok(Self {
            sectors: [
                sector(Frame::TOP, r4, r3, vertical_span, true),
                sector(Frame::BOTTOM, r4, r3, vertical_span, false),
                sector(Frame::RIGHT, r2, r1, horizontal_span, true),
                sector(Frame::LEFT, r2, r1, horizontal_span, false),
            ],
            notch,
            arm_end: derived.half_length,
            neck,
            feed_offset: derived.feed_offset,
        })
    }

    /// Distance from the centre at which the exit necks end.
    pub const fn feed_offset(&self) -> Real {
        self.feed_offset
    }

    /// Top, bottom, right and left sectors as closed polylines on `layer`.
    pub fn entities(&self, layer: &str) -> Result<Vec<Entity>, GeometryError> {
        self.sectors
            .iter()
            .map(|sector| Ok(Entity::new(layer, self.outline(sector).finish()?)))
            .collect()
    }

    fn outline(&self, sector: &Sector) -> Outline {
        let Sector {
            frame,
            inner,
            outer,
            half_span,
            exit_neck,
        } = *sector;
        let left = FRAC_PI_2 + half_span;
        let right = FRAC_PI_2 - half_span;
        let (x, e) = (self.notch, self.neck);

        let mut outline = Outline::start(frame, polar(inner, left));
        let b = polar(outer, left);
        outline.line_to(b.x, b.y);
        if exit_neck {
            let neck_base = chord_height(outer, e);
            outline
                .arc_to(Point2::new(-e, neck_base), ArcDirection::Clockwise)
                .line_to(-e, self.feed_offset)
                .line_to(e, self.feed_offset)
                .line_to(e, neck_base);
        }
        let c = polar(outer, right);
        let d = polar(inner, right);
        let notch_base = chord_height(inner, x);
        outline
            .arc_to(c, ArcDirection::Clockwise)
            .line_to(d.x, d.y)
            .arc_to(Point2::new(x, notch_base), ArcDirection::CounterClockwise)
            .line_to(x, self.arm_end)
            .line_to(-x, self.arm_end)
            .line_to(-x, notch_base)
            .close_with_arc(ArcDirection::CounterClockwise);
        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Primitive;
    use crate::geometry::arc_midpoint;
    use crate::pattern::Dimensions;

    fn layout(dims: Dimensions) -> Result<ChokeLayout, ConfigurationError> {
        ChokeLayout::new(&Parameters::new(1, dims)?)
    }

    #[test]
    fn sectors_close_on_their_rings() {
        let choke = layout(Dimensions::default()).unwrap();
        let entities = choke.entities("PIXEL").unwrap();
        assert_eq!(entities.len(), 4);
        for entity in &entities {
            let Primitive::Polyline { vertices, closed } = &entity.primitive else {
                panic!("polyline expected");
            };
            assert!(closed);
            for (i, v) in vertices.iter().enumerate().filter(|(_, v)| v.is_arc()) {
                let next = &vertices[(i + 1) % vertices.len()];
                let mid = arc_midpoint(&v.position, &next.position, v.bulge);
                let radius = v.position.coords.norm();
                assert!((mid.coords.norm() - radius).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn exit_necks_reach_the_feed() {
        let choke = layout(Dimensions::default()).unwrap();
        let entities = choke.entities("PIXEL").unwrap();
        let top = entities[0].primitive.bounds().unwrap();
        let right = entities[2].primitive.bounds().unwrap();
        assert!((top.1.y - choke.feed_offset()).abs() < 1e-9);
        assert!((right.1.x - choke.feed_offset()).abs() < 1e-9);
        // bottom sector has no neck
        let bottom = entities[1].primitive.bounds().unwrap();
        assert!(bottom.0.y > -choke.feed_offset());
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        let err = layout(Dimensions {
            choke_width: 0.0,
            ..Dimensions::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::RadiusOrder { .. }));

        let err = layout(Dimensions {
            choke_height: 3000.0,
            ..Dimensions::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Inconsistent {
                parameter: "choke_height",
                ..
            }
        ));
    }

    #[test]
    fn arms_wider_than_the_inner_ring_are_rejected() {
        // the separation cancels out: the arm half width must stay below l/√2
        for choke_separation in [0.0, 20.0, 500.0] {
            let err = layout(Dimensions {
                h: 2200.0,
                choke_separation,
                ..Dimensions::default()
            })
            .unwrap_err();
            let ConfigurationError::Inconsistent { parameter, reason } = &err else {
                panic!("unexpected error {err}");
            };
            assert_eq!(*parameter, "h");
            assert!(reason.contains("inside radius"), "{reason}");
        }
    }
}
