//! Reference geometry for visual QA and the index label.

use super::parameters::Parameters;
use crate::document::{Document, Entity, Primitive};
use crate::float_types::Real;
use nalgebra::Point2;

/// Label height relative to the absorber side.
pub const INDEX_HEIGHT_RATIO: Real = 0.35;

/// Shape of the centre-finder cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterMark {
    /// Corner to corner across the absorber square.
    #[default]
    Diagonal,
    /// Edge midpoint to edge midpoint.
    Axis,
}

pub(crate) fn center_mark(params: &Parameters, mark: CenterMark, layer: &str) -> Vec<Entity> {
    let half = params.derived().half_length;
    let lines = match mark {
        CenterMark::Diagonal => [
            [[-half, -half], [half, half]],
            [[-half, half], [half, -half]],
        ],
        CenterMark::Axis => [[[-half, 0.0], [half, 0.0]], [[0.0, -half], [0.0, half]]],
    };
    lines
        .iter()
        .map(|line| Entity::new(layer, Primitive::open(line)))
        .collect()
}

pub(crate) fn absorber_area(params: &Parameters, layer: &str) -> Entity {
    let half = params.derived().half_length;
    Entity::new(layer, Primitive::rectangle([-half, -half], [half, half]))
}

/// Rectangle enclosing everything drawn on `pixel_layer` so far.
pub(crate) fn pixel_area(document: &Document, pixel_layer: &str, layer: &str) -> Option<Entity> {
    let rect = document.layer_bounds(pixel_layer)?;
    Some(Entity::new(
        layer,
        Primitive::rectangle([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    ))
}

pub(crate) fn index_label(params: &Parameters, layer: &str) -> Entity {
    Entity::new(
        layer,
        Primitive::label(
            Point2::origin(),
            INDEX_HEIGHT_RATIO * params.dimensions().l,
            params.index().to_string(),
        ),
    )
}
