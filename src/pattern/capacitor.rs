//! Interdigital capacitors and the pads joining them to the absorber.
//!
//! A comb is laid out along the local `+y` axis starting at a given distance
//! from the centre, so the vertical and horizontal channels run exactly the
//! same finger arithmetic and only differ by the [`Frame`] mapping them onto
//! the page.

use super::outline::Frame;
use super::parameters::{FingerCount, Parameters};
use crate::document::{Entity, Primitive};
use crate::float_types::Real;

/// One finger of a comb, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finger {
    pub corner: [Real; 2],
    pub opposite: [Real; 2],
    /// Extent across the comb.
    pub length: Real,
    /// The shortened finger carrying the fractional part of the count.
    pub pinky: bool,
}

/// Two bus bars and the fingers alternately attached to them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerComb {
    pub count: FingerCount,
    /// Distance between the inner edges of the bus bars.
    pub size: Real,
    pub bar_width: Real,
    pub finger_width: Real,
    pub finger_gap: Real,
}

impl FingerComb {
    pub fn new(params: &Parameters, count: FingerCount) -> Self {
        let dims = params.dimensions();
        Self {
            count,
            size: params.derived().capacitor_size,
            bar_width: dims.w,
            finger_width: dims.finger_width,
            finger_gap: dims.finger_gap,
        }
    }

    pub fn pitch(&self) -> Real {
        self.finger_width + self.finger_gap
    }

    /// Length of a full finger: the bar spacing less one gap.
    pub fn finger_length(&self) -> Real {
        self.size - self.finger_gap
    }

    /// Extent of the comb along its axis.
    pub fn length(&self) -> Real {
        self.count.slots() as Real * self.pitch() + self.finger_gap
    }

    /// Fingers of a comb whose bars start at local `y = start`.
    ///
    /// Even slots hang from the first (negative `x`) bar, odd slots from the
    /// second one. The pinky takes the slot after the last full finger.
    pub fn fingers(&self, start: Real) -> Vec<Finger> {
        let half = self.size * 0.5;
        let full_length = self.finger_length();
        (0..self.count.slots())
            .map(|slot| {
                let pinky = slot == self.count.full;
                let length = if pinky {
                    self.count.fraction * full_length
                } else {
                    full_length
                };
                let y = start + self.finger_gap + slot as Real * self.pitch();
                let (x0, x1) = if slot % 2 == 0 {
                    (-half, -half + length)
                } else {
                    (half - length, half)
                };
                Finger {
                    corner: [x0, y],
                    opposite: [x1, y + self.finger_width],
                    length,
                    pinky,
                }
            })
            .collect()
    }

    /// The two bus bars, first then second.
    pub fn bars(&self, start: Real) -> [(Real, Real, Real, Real); 2] {
        let half = self.size * 0.5;
        let end = start + self.length();
        [
            (-half - self.bar_width, start, -half, end),
            (half, start, half + self.bar_width, end),
        ]
    }

    pub fn entities(&self, frame: Frame, start: Real, layer: &str) -> Vec<Entity> {
        let bars = self
            .bars(start)
            .into_iter()
            .map(|(x0, y0, x1, y1)| frame.rectangle([x0, y0], [x1, y1]));
        let fingers = self
            .fingers(start)
            .into_iter()
            .map(|finger| frame.rectangle(finger.corner, finger.opposite));
        bars.chain(fingers)
            .map(|primitive| Entity::new(layer, primitive))
            .collect()
    }
}

/// Where the bars of the comb hung below the absorber start, in the bottom frame.
pub(crate) fn below_absorber_start(params: &Parameters) -> Real {
    params.derived().half_length + params.dimensions().capacitor_connector_h
}

/// Where the bars of a comb fed through an exit neck start.
pub(crate) fn feed_start(params: &Parameters) -> Real {
    params.derived().feed_offset + params.dimensions().capacitor_connector_w
}

/// Strips and pads joining the open end of the vertical arm to the comb hung
/// below the absorber, drawn in the bottom frame.
pub(crate) fn leg_connectors(params: &Parameters, layer: &str) -> Vec<Entity> {
    let dims = params.dimensions();
    let derived = params.derived();
    let (cw, ch) = (dims.capacitor_connector_w, dims.capacitor_connector_h);
    let arm_end = derived.half_length;
    let outer = derived.arm_half_width;
    let comb_edge = derived.capacitor_size * 0.5 + dims.w;
    let pad_bottom = arm_end + ch - cw;
    let comb_start = below_absorber_start(params);

    let frame = Frame::BOTTOM;
    let mut entities = Vec::with_capacity(4);
    for side in [-1.0, 1.0] {
        // the leg strip sits under the outer line of the arm
        let strip = [side * outer, side * (outer - cw)];
        let pad = [
            side * outer.max(comb_edge),
            side * (outer - cw).min(comb_edge - dims.w),
        ];
        entities.push(Entity::new(
            layer,
            frame.rectangle([strip[0], arm_end], [strip[1], pad_bottom]),
        ));
        entities.push(Entity::new(
            layer,
            frame.rectangle([pad[0], pad_bottom], [pad[1], comb_start]),
        ));
    }
    entities
}

/// Pad joining the end of an exit neck to the first bus bar of the comb
/// beyond it.
pub(crate) fn feed_pad(params: &Parameters, frame: Frame, layer: &str) -> Entity {
    let dims = params.dimensions();
    let derived = params.derived();
    let pad = frame.rectangle(
        [-derived.capacitor_size * 0.5 - dims.w, derived.feed_offset],
        [dims.choke_height * 0.5, feed_start(params)],
    );
    Entity::new(layer, pad)
}

/// Connector strip continuing the second bus bar past `comb_end`, then the
/// coupling rectangle centred on it.
pub(crate) fn coupling_capacitor(
    params: &Parameters,
    frame: Frame,
    comb_end: Real,
    layer: &str,
) -> Vec<Entity> {
    let dims = params.dimensions();
    let inner = params.derived().capacitor_size * 0.5;
    let strip_end = comb_end + dims.coupling_capacitor_offset;
    let axis = inner + dims.coupling_connector_width * 0.5;
    let half = dims.coupling_capacitor_length * 0.5;
    let strip = frame.rectangle(
        [inner, comb_end],
        [inner + dims.coupling_connector_width, strip_end],
    );
    let pad = frame.rectangle(
        [axis - half, strip_end],
        [axis + half, strip_end + dims.coupling_capacitor_width],
    );
    [strip, pad]
        .into_iter()
        .map(|primitive: Primitive| Entity::new(layer, primitive))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Dimensions;

    fn comb(count: Real) -> FingerComb {
        let params = Parameters::new(
            1,
            Dimensions {
                finger_width: 4.0,
                finger_gap: 15.0,
                ..Dimensions::default()
            },
        )
        .unwrap();
        FingerComb::new(&params, FingerCount::new(count))
    }

    #[test]
    fn pinky_carries_the_fraction() {
        let comb = comb(5.5);
        let fingers = comb.fingers(0.0);
        assert_eq!(fingers.len(), 6);
        assert_eq!(fingers.iter().filter(|f| !f.pinky).count(), 5);
        let pinky = fingers.iter().find(|f| f.pinky).unwrap();
        assert!((pinky.length - 0.5 * comb.finger_length()).abs() < 1e-12);
        assert!(fingers[..5].iter().all(|f| f.length == comb.finger_length()));
    }

    #[test]
    fn whole_count_has_no_pinky() {
        let fingers = comb(5.0).fingers(0.0);
        assert_eq!(fingers.len(), 5);
        assert!(fingers.iter().all(|f| !f.pinky));
    }

    #[test]
    fn only_the_pinky_below_one() {
        let fingers = comb(0.25).fingers(0.0);
        assert_eq!(fingers.len(), 1);
        assert!(fingers[0].pinky);
        assert!(comb(0.0).fingers(0.0).is_empty());
    }

    #[test]
    fn fingers_alternate_and_leave_the_gap() {
        let comb = comb(4.0);
        let half = comb.size * 0.5;
        for (slot, finger) in comb.fingers(10.0).iter().enumerate() {
            if slot % 2 == 0 {
                assert_eq!(finger.corner[0], -half);
                assert!((half - finger.opposite[0] - comb.finger_gap).abs() < 1e-12);
            } else {
                assert_eq!(finger.opposite[0], half);
                assert!((finger.corner[0] + half - comb.finger_gap).abs() < 1e-12);
            }
            let y = 10.0 + comb.finger_gap + slot as Real * comb.pitch();
            assert!((finger.corner[1] - y).abs() < 1e-12);
        }
        // bars + fingers
        assert_eq!(comb.entities(Frame::TOP, 10.0, "PIXEL").len(), 6);
    }
}
