//! Physical dimensions of a pixel and the quantities derived from them.

use crate::errors::ConfigurationError;
use crate::float_types::{Real, SQRT_2};
use std::fmt;

/// Independent design values, in microns.
///
/// Build one with struct update syntax over [`Dimensions::default`], then
/// validate it with [`Parameters::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    /// Inner gap between the two lines of an absorber arm.
    pub h: Real,
    /// Absorber side.
    pub l: Real,
    /// Separation between the arms of the two polarisations.
    pub d: Real,
    /// Line width.
    pub w: Real,
    pub capacitor_connector_w: Real,
    pub capacitor_connector_h: Real,
    /// Interdigital finger count; the fractional part sets a shortened finger.
    pub finger_number: Real,
    /// Finger count of the horizontal-polarisation capacitor, when it differs.
    pub horizontal_finger_number: Option<Real>,
    pub finger_width: Real,
    pub finger_gap: Real,
    /// Radial gap between the interlocking choke rings.
    pub choke_depth: Real,
    /// Width of the choke exit necks.
    pub choke_height: Real,
    /// Clearance between the choke and the absorber.
    pub choke_separation: Real,
    /// Radial width of a choke ring.
    pub choke_width: Real,
    pub coupling_capacitor_length: Real,
    pub coupling_capacitor_width: Real,
    pub coupling_capacitor_offset: Real,
    pub coupling_connector_width: Real,
    /// Distance between the capacitor bus bars; defaults to `h`.
    pub capacitor_size: Option<Real>,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            h: 100.0,
            l: 1500.0,
            d: 200.0,
            w: 4.0,
            capacitor_connector_w: 10.0,
            capacitor_connector_h: 40.0,
            finger_number: 5.0,
            horizontal_finger_number: None,
            finger_width: 4.0,
            finger_gap: 4.0,
            choke_depth: 20.0,
            choke_height: 30.0,
            choke_separation: 20.0,
            choke_width: 40.0,
            coupling_capacitor_length: 500.0,
            coupling_capacitor_width: 100.0,
            coupling_capacitor_offset: 116.0,
            coupling_connector_width: 8.0,
            capacitor_size: None,
        }
    }
}

impl Dimensions {
    fn named_values(&self) -> Vec<(&'static str, Real)> {
        let mut values = vec![
            ("h", self.h),
            ("l", self.l),
            ("d", self.d),
            ("w", self.w),
            ("capacitor_connector_w", self.capacitor_connector_w),
            ("capacitor_connector_h", self.capacitor_connector_h),
            ("finger_number", self.finger_number),
            ("finger_width", self.finger_width),
            ("finger_gap", self.finger_gap),
            ("choke_depth", self.choke_depth),
            ("choke_height", self.choke_height),
            ("choke_separation", self.choke_separation),
            ("choke_width", self.choke_width),
            ("coupling_capacitor_length", self.coupling_capacitor_length),
            ("coupling_capacitor_width", self.coupling_capacitor_width),
            ("coupling_capacitor_offset", self.coupling_capacitor_offset),
            ("coupling_connector_width", self.coupling_connector_width),
        ];
        if let Some(n) = self.horizontal_finger_number {
            values.push(("horizontal_finger_number", n));
        }
        if let Some(size) = self.capacitor_size {
            values.push(("capacitor_size", size));
        }
        values
    }
}

/// A finger count split into whole fingers and the fraction of one more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerCount {
    pub full: usize,
    pub fraction: Real,
}

impl FingerCount {
    /// `count` must be finite and non-negative.
    pub fn new(count: Real) -> Self {
        let whole = count.floor();
        Self {
            full: whole as usize,
            fraction: count - whole,
        }
    }

    pub fn has_pinky(&self) -> bool {
        self.fraction > 0.0
    }

    /// Finger slots along the comb, the shortened finger included.
    pub fn slots(&self) -> usize {
        self.full + usize::from(self.has_pinky())
    }
}

/// Quantities computed once from [`Dimensions`].
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub half_length: Real,
    pub half_gap: Real,
    /// Half the outer width of an arm, `h/2 + w`.
    pub arm_half_width: Real,
    pub capacitor_size: Real,
    pub finger_length: Real,
    pub finger_pitch: Real,
    pub fingers: FingerCount,
    pub horizontal_fingers: FingerCount,
    /// Half diagonal of the absorber square.
    pub absorber_radius: Real,
    /// Choke radii `[r1, r2, r3, r4]`, outermost first.
    pub radii: [Real; 4],
    /// Distance from the centre at which the choke exit necks end.
    pub feed_offset: Real,
}

impl Derived {
    fn from_dimensions(dims: &Dimensions) -> Self {
        let half_length = dims.l * 0.5;
        let half_gap = dims.h * 0.5;
        let capacitor_size = dims.capacitor_size.unwrap_or(dims.h);
        let absorber_radius = half_length * SQRT_2;
        let r4 = absorber_radius + dims.choke_separation;
        let r3 = r4 + dims.choke_width;
        let r2 = r3 + dims.choke_depth;
        let r1 = r2 + dims.choke_width;
        Self {
            half_length,
            half_gap,
            arm_half_width: half_gap + dims.w,
            capacitor_size,
            finger_length: capacitor_size - dims.finger_gap,
            finger_pitch: dims.finger_width + dims.finger_gap,
            fingers: FingerCount::new(dims.finger_number),
            horizontal_fingers: FingerCount::new(
                dims.horizontal_finger_number.unwrap_or(dims.finger_number),
            ),
            absorber_radius,
            radii: [r1, r2, r3, r4],
            feed_offset: r1 + dims.capacitor_connector_h,
        }
    }
}

/// Upper limit on the fingers of one comb.
pub const MAX_FINGER_NUMBER: Real = 10_000.0;

/// A validated, immutable parameter set for one pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    index: u32,
    dimensions: Dimensions,
    derived: Derived,
}

impl Parameters {
    /// Validates `dimensions` and derives the dependent quantities.
    ///
    /// Fails on the first NaN, infinite or negative value, naming it, and on
    /// finger counts above [`MAX_FINGER_NUMBER`].
    pub fn new(index: u32, dimensions: Dimensions) -> Result<Self, ConfigurationError> {
        for (parameter, value) in dimensions.named_values() {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { parameter });
            }
            if value < 0.0 {
                return Err(ConfigurationError::NegativeLength { parameter, value });
            }
        }
        let counts = [
            ("finger_number", Some(dimensions.finger_number)),
            ("horizontal_finger_number", dimensions.horizontal_finger_number),
        ];
        for (parameter, count) in counts {
            if let Some(count) = count.filter(|count| *count > MAX_FINGER_NUMBER) {
                return Err(ConfigurationError::Inconsistent {
                    parameter,
                    reason: format!("{count} fingers exceed the limit of {MAX_FINGER_NUMBER}"),
                });
            }
        }
        let derived = Derived::from_dimensions(&dimensions);
        Ok(Self {
            index,
            dimensions,
            derived,
        })
    }

    pub const fn index(&self) -> u32 {
        self.index
    }

    pub const fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub const fn derived(&self) -> &Derived {
        &self.derived
    }
}

/// The design sheet printed next to every generated pixel.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = &self.dimensions;
        let derived = &self.derived;
        writeln!(f, "units: microns")?;
        writeln!(f, "{:<29}{}", "index:", self.index)?;
        for (name, value) in dims.named_values() {
            writeln!(f, "{:<29}{:.2}", format!("{name}:"), value)?;
        }
        writeln!(f)?;
        writeln!(f, "{:<29}{:.2}", "capacitor size:", derived.capacitor_size)?;
        writeln!(f, "{:<29}{:.2}", "finger length:", derived.finger_length)?;
        let [r1, r2, r3, r4] = derived.radii;
        writeln!(f, "{:<29}{r1:.2} {r2:.2} {r3:.2} {r4:.2}", "choke radii:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_finger_count() {
        let count = FingerCount::new(5.5);
        assert_eq!(count.full, 5);
        assert!((count.fraction - 0.5).abs() < 1e-12);
        assert_eq!(count.slots(), 6);
        assert_eq!(FingerCount::new(5.0).slots(), 5);
        assert_eq!(FingerCount::new(0.25).full, 0);
    }

    #[test]
    fn negative_length_is_named() {
        let dims = Dimensions {
            d: -1.0,
            ..Dimensions::default()
        };
        assert_eq!(
            Parameters::new(1, dims),
            Err(ConfigurationError::NegativeLength {
                parameter: "d",
                value: -1.0
            })
        );
    }

    #[test]
    fn finger_number_is_bounded() {
        let dims = Dimensions {
            finger_number: 1e18,
            ..Dimensions::default()
        };
        let err = Parameters::new(1, dims).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Inconsistent {
                parameter: "finger_number",
                ..
            }
        ));

        let dims = Dimensions {
            horizontal_finger_number: Some(MAX_FINGER_NUMBER + 0.5),
            ..Dimensions::default()
        };
        assert!(matches!(
            Parameters::new(1, dims),
            Err(ConfigurationError::Inconsistent {
                parameter: "horizontal_finger_number",
                ..
            })
        ));
        let dims = Dimensions {
            finger_number: MAX_FINGER_NUMBER,
            ..Dimensions::default()
        };
        assert!(Parameters::new(1, dims).is_ok());
    }

    #[test]
    fn radii_are_concentric_offsets_of_the_diagonal() {
        let params = Parameters::new(1, Dimensions::default()).unwrap();
        let derived = params.derived();
        let [r1, r2, r3, r4] = derived.radii;
        assert!((r4 - (750.0 * SQRT_2 + 20.0)).abs() < 1e-9);
        assert!(r1 > r2 && r2 > r3 && r3 > r4);
        assert!(params.to_string().contains("finger_number:"));
    }
}
