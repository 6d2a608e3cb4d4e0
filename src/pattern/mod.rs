//! Parametric pixel patterns.
//!
//! A [`PixelPattern`] pairs validated [`Parameters`] with a [`Variant`]. Each
//! variant is an ordered list of [`Step`]s; one builder runs them and
//! concatenates the entities they emit, so the three pixel designs share every
//! piece of geometry they have in common.
//!
//! ```no_run
//! use kid_drawer::pattern::{Dimensions, Parameters, PixelPattern, Variant};
//!
//! # fn main() -> Result<(), kid_drawer::Error> {
//! let params = Parameters::new(1, Dimensions::default())?;
//! let pixel = PixelPattern::new(params, Variant::ChokeCross)?.build()?;
//! assert!(!pixel.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod absorber;
pub mod capacitor;
pub mod choke;
pub mod outline;
pub mod parameters;
pub mod reference;

pub use absorber::ArmLayout;
pub use capacitor::{Finger, FingerComb};
pub use choke::ChokeLayout;
pub use outline::{Frame, Outline};
pub use parameters::{Derived, Dimensions, FingerCount, MAX_FINGER_NUMBER, Parameters};
pub use reference::{CenterMark, INDEX_HEIGHT_RATIO};

use crate::document::{Document, Entity, PixelDocument};
use crate::errors::{ConfigurationError, Error};
use crate::float_types::Real;
use crate::layers::{LayerRole, LayerTable};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The pixel designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Bare absorber cross.
    Cross,
    /// Cross with one interdigital capacitor hung below the absorber.
    CapacitorCross,
    /// Dual-polarisation cross with a choke, two capacitors and two coupling
    /// capacitors.
    ChokeCross,
}

/// Polarisation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Vertical,
    Horizontal,
}

impl Channel {
    /// Frame whose `+y` axis runs along the channel's exit neck.
    pub const fn frame(self) -> Frame {
        match self {
            Channel::Vertical => Frame::TOP,
            Channel::Horizontal => Frame::RIGHT,
        }
    }
}

/// Where a finger comb hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombSite {
    /// Below the absorber, on the leg connectors.
    BelowAbsorber,
    /// Beyond a choke exit neck.
    Feed(Channel),
}

/// One construction step of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Absorber(ArmLayout),
    ConnectorArc,
    LegConnectors,
    Choke,
    FeedPad(Channel),
    Comb(CombSite),
    CouplingCapacitor(Channel),
    CenterMark,
    AbsorberArea,
    /// Must come after every step drawing on the pixel layer.
    PixelArea,
    IndexLabel,
}

impl Step {
    pub const fn role(self) -> LayerRole {
        match self {
            Step::CenterMark => LayerRole::Center,
            Step::AbsorberArea => LayerRole::AbsorberArea,
            Step::PixelArea => LayerRole::PixelArea,
            Step::IndexLabel => LayerRole::Index,
            _ => LayerRole::Pixel,
        }
    }
}

impl Variant {
    pub fn steps(self) -> Vec<Step> {
        let mut steps = match self {
            Variant::Cross => vec![Step::Absorber(ArmLayout::Continuous), Step::ConnectorArc],
            Variant::CapacitorCross => vec![
                Step::Absorber(ArmLayout::Continuous),
                Step::LegConnectors,
                Step::Comb(CombSite::BelowAbsorber),
            ],
            Variant::ChokeCross => {
                let mut steps = vec![Step::Absorber(ArmLayout::Split), Step::Choke];
                for channel in [Channel::Vertical, Channel::Horizontal] {
                    steps.extend([
                        Step::FeedPad(channel),
                        Step::Comb(CombSite::Feed(channel)),
                        Step::CouplingCapacitor(channel),
                    ]);
                }
                steps
            },
        };
        steps.extend([
            Step::CenterMark,
            Step::AbsorberArea,
            Step::PixelArea,
            Step::IndexLabel,
        ]);
        steps
    }
}

/// A validated pixel design, ready to build.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelPattern {
    params: Parameters,
    variant: Variant,
    steps: Vec<Step>,
    layers: LayerTable,
    center_mark: CenterMark,
}

impl PixelPattern {
    /// Checks that `params` can be drawn as `variant`. No geometry is emitted
    /// before every check has passed.
    pub fn new(params: Parameters, variant: Variant) -> Result<Self, ConfigurationError> {
        let steps = variant.steps();
        validate(&params, &steps)?;
        Ok(Self {
            params,
            variant,
            steps,
            layers: LayerTable::kid_defaults(),
            center_mark: CenterMark::default(),
        })
    }

    /// Draws with the names and colours of `layers`.
    pub fn with_layers(mut self, layers: LayerTable) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_center_mark(mut self, mark: CenterMark) -> Self {
        self.center_mark = mark;
        self
    }

    pub const fn params(&self) -> &Parameters {
        &self.params
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub const fn layers(&self) -> &LayerTable {
        &self.layers
    }

    /// Runs every step in order. Either the whole pixel is returned or the
    /// first error; nothing partial escapes.
    pub fn build(&self) -> Result<PixelDocument, Error> {
        let mut document = Document::new(self.layers.clone());
        for step in &self.steps {
            let entities = self.run(*step, &document)?;
            crate::log::debug!(
                index = self.params.index(),
                ?step,
                count = entities.len(),
                "pattern step"
            );
            for entity in entities {
                document.push(entity);
            }
        }
        Ok(document)
    }

    fn run(&self, step: Step, document: &Document) -> Result<Vec<Entity>, Error> {
        let params = &self.params;
        let layer = self.layers.name_for(step.role());
        let entities = match step {
            Step::Absorber(layout) => absorber::arms(params, layout, layer),
            Step::ConnectorArc => vec![absorber::connector_guide_arc(params, layer)],
            Step::LegConnectors => capacitor::leg_connectors(params, layer),
            Step::Choke => ChokeLayout::new(params)?.entities(layer)?,
            Step::FeedPad(channel) => {
                vec![capacitor::feed_pad(params, channel.frame(), layer)]
            },
            Step::Comb(site) => {
                let (frame, start, comb) = comb_placement(params, site);
                comb.entities(frame, start, layer)
            },
            Step::CouplingCapacitor(channel) => {
                let (frame, start, comb) = comb_placement(params, CombSite::Feed(channel));
                capacitor::coupling_capacitor(params, frame, start + comb.length(), layer)
            },
            Step::CenterMark => reference::center_mark(params, self.center_mark, layer),
            Step::AbsorberArea => vec![reference::absorber_area(params, layer)],
            Step::PixelArea => {
                let pixel_layer = self.layers.name_for(LayerRole::Pixel);
                reference::pixel_area(document, pixel_layer, layer)
                    .into_iter()
                    .collect()
            },
            Step::IndexLabel => vec![reference::index_label(params, layer)],
        };
        Ok(entities)
    }
}

/// Frame, bar start and finger arithmetic of the comb at `site`.
fn comb_placement(params: &Parameters, site: CombSite) -> (Frame, Real, FingerComb) {
    let derived = params.derived();
    match site {
        CombSite::BelowAbsorber => (
            Frame::BOTTOM,
            capacitor::below_absorber_start(params),
            FingerComb::new(params, derived.fingers),
        ),
        CombSite::Feed(channel) => {
            let count = match channel {
                Channel::Vertical => derived.fingers,
                Channel::Horizontal => derived.horizontal_fingers,
            };
            (
                channel.frame(),
                capacitor::feed_start(params),
                FingerComb::new(params, count),
            )
        },
    }
}

fn inconsistent(parameter: &'static str, reason: impl Into<String>) -> ConfigurationError {
    ConfigurationError::Inconsistent {
        parameter,
        reason: reason.into(),
    }
}

fn validate(params: &Parameters, steps: &[Step]) -> Result<(), ConfigurationError> {
    let dims = params.dimensions();
    let derived = params.derived();
    if dims.l <= 0.0 {
        return Err(inconsistent("l", "the absorber side must be positive"));
    }
    if dims.w <= 0.0 {
        return Err(inconsistent("w", "the line width must be positive"));
    }
    if derived.arm_half_width >= derived.half_length {
        return Err(inconsistent("h", "the absorber arms do not fit inside the absorber"));
    }

    for step in steps {
        match *step {
            Step::Absorber(_) => {
                if absorber::arm_closed_end(params) + dims.w >= derived.half_length {
                    return Err(inconsistent(
                        "d",
                        "the polarisation arms do not fit inside the absorber",
                    ));
                }
            },
            Step::LegConnectors => {
                if dims.capacitor_connector_h <= dims.capacitor_connector_w {
                    return Err(inconsistent(
                        "capacitor_connector_h",
                        "must exceed capacitor_connector_w",
                    ));
                }
            },
            Step::Choke => {
                ChokeLayout::new(params)?;
            },
            Step::FeedPad(_) => {
                if dims.choke_height >= derived.capacitor_size {
                    return Err(inconsistent(
                        "choke_height",
                        "the exit neck is wider than the capacitor",
                    ));
                }
            },
            Step::Comb(site) => {
                let (_, _, comb) = comb_placement(params, site);
                if comb.finger_length() <= 0.0 {
                    return Err(inconsistent(
                        "finger_gap",
                        "the finger gap leaves no room for the fingers",
                    ));
                }
                if comb.count.slots() > 0 && comb.finger_width <= 0.0 {
                    return Err(inconsistent("finger_width", "fingers need a positive width"));
                }
            },
            _ => {},
        }
    }
    Ok(())
}

/// Builds independent pixels, in parallel with the `parallel` feature.
/// Output order follows `patterns`; on failure the error of the earliest
/// failing pattern is returned.
pub fn build_batch(patterns: &[PixelPattern]) -> Result<Vec<PixelDocument>, Error> {
    #[cfg(feature = "parallel")]
    let results: Vec<_> = patterns.par_iter().map(PixelPattern::build).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = patterns.iter().map(PixelPattern::build).collect();
    results.into_iter().collect()
}
