//! Layer-tagged 2D primitives and the documents that hold them.

use crate::float_types::Real;
use crate::geometry::{arc_center, polar, segment_bounds};
use crate::layers::{Layer, LayerTable};
use geo::{Coord, LineString, Polygon as GeoPolygon, Rect, coord};
use nalgebra::Point2;

/// A polyline vertex. A non-zero `bulge` turns the segment to the next vertex
/// into a circular arc (`bulge = tan(θ/4)`, positive counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcVertex {
    pub position: Point2<Real>,
    pub bulge: Real,
}

impl ArcVertex {
    /// A vertex followed by a straight segment.
    pub fn new(x: Real, y: Real) -> Self {
        Self {
            position: Point2::new(x, y),
            bulge: 0.0,
        }
    }

    pub const fn with_bulge(position: Point2<Real>, bulge: Real) -> Self {
        Self { position, bulge }
    }

    pub fn is_arc(&self) -> bool {
        self.bulge != 0.0
    }
}

impl From<Point2<Real>> for ArcVertex {
    fn from(position: Point2<Real>) -> Self {
        Self::with_bulge(position, 0.0)
    }
}

/// Text justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Horizontally and vertically centred on the position.
    #[default]
    Center,
    /// Position is the left end of the baseline.
    BaselineLeft,
}

/// A drawable 2D primitive in microns.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Polyline with optional per-vertex bulges. A closed polyline keeps its
    /// first vertex only once; the closing segment runs from the last vertex
    /// (with its bulge) back to the first.
    Polyline {
        vertices: Vec<ArcVertex>,
        closed: bool,
    },
    /// Circular arc swept counter-clockwise from `start_angle` to `end_angle`
    /// (degrees).
    Arc {
        center: Point2<Real>,
        radius: Real,
        start_angle: Real,
        end_angle: Real,
    },
    /// Single-line text label.
    Text {
        position: Point2<Real>,
        height: Real,
        content: String,
        /// Degrees, counter-clockwise.
        rotation: Real,
        anchor: Anchor,
    },
}

impl Primitive {
    /// A closed polyline through `vertices`.
    pub fn closed(vertices: Vec<ArcVertex>) -> Self {
        Primitive::Polyline {
            vertices,
            closed: true,
        }
    }

    /// An open polyline of straight segments through `points`.
    pub fn open(points: &[[Real; 2]]) -> Self {
        Primitive::Polyline {
            vertices: points.iter().map(|p| ArcVertex::new(p[0], p[1])).collect(),
            closed: false,
        }
    }

    /// Axis-aligned rectangle spanning the two corners, as a closed polyline.
    pub fn rectangle(corner: [Real; 2], opposite: [Real; 2]) -> Self {
        let (x0, x1) = (corner[0].min(opposite[0]), corner[0].max(opposite[0]));
        let (y0, y1) = (corner[1].min(opposite[1]), corner[1].max(opposite[1]));
        Primitive::closed(vec![
            ArcVertex::new(x0, y0),
            ArcVertex::new(x1, y0),
            ArcVertex::new(x1, y1),
            ArcVertex::new(x0, y1),
        ])
    }

    /// A centred label.
    pub fn label(position: Point2<Real>, height: Real, content: impl Into<String>) -> Self {
        Primitive::Text {
            position,
            height,
            content: content.into(),
            rotation: 0.0,
            anchor: Anchor::Center,
        }
    }

    pub const fn is_text(&self) -> bool {
        matches!(self, Primitive::Text { .. })
    }

    pub const fn is_closed_polyline(&self) -> bool {
        matches!(self, Primitive::Polyline { closed: true, .. })
    }

    /// Vertex positions of a closed polyline with the first point repeated at
    /// the end, or `None` for other primitives.
    pub fn closed_points(&self) -> Option<Vec<Point2<Real>>> {
        match self {
            Primitive::Polyline {
                vertices,
                closed: true,
            } => {
                let mut ring: Vec<_> = vertices.iter().map(|v| v.position).collect();
                if let Some(first) = ring.first().copied() {
                    ring.push(first);
                }
                Some(ring)
            },
            _ => None,
        }
    }

    /// Exact axis-aligned bounds `(min, max)`. Text has no extent and yields
    /// its insertion point.
    pub fn bounds(&self) -> Option<(Point2<Real>, Point2<Real>)> {
        match self {
            Primitive::Polyline { vertices, closed } => {
                let first = vertices.first()?;
                let mut min = first.position;
                let mut max = first.position;
                let segment_count = if *closed {
                    vertices.len()
                } else {
                    vertices.len().saturating_sub(1)
                };
                for i in 0..segment_count {
                    let start = &vertices[i];
                    let end = &vertices[(i + 1) % vertices.len()];
                    let (lo, hi) = segment_bounds(&start.position, &end.position, start.bulge);
                    min = Point2::new(min.x.min(lo.x), min.y.min(lo.y));
                    max = Point2::new(max.x.max(hi.x), max.y.max(hi.y));
                }
                Some((min, max))
            },
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let sweep = (end_angle - start_angle).rem_euclid(360.0);
                let start = polar(*radius, start_angle.to_radians()) + center.coords;
                let end = polar(*radius, end_angle.to_radians()) + center.coords;
                let mut min = Point2::new(start.x.min(end.x), start.y.min(end.y));
                let mut max = Point2::new(start.x.max(end.x), start.y.max(end.y));
                for quadrant in 0..4 {
                    let axis = quadrant as Real * 90.0;
                    if (axis - start_angle).rem_euclid(360.0) <= sweep {
                        let p = polar(*radius, axis.to_radians()) + center.coords;
                        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
                        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
                    }
                }
                Some((min, max))
            },
            Primitive::Text { position, .. } => Some((*position, *position)),
        }
    }

    /// Converts a closed polyline into a `geo` polygon, replacing every bulge
    /// segment by chords of at most `max_step` radians. Intended for area and
    /// containment checks, never for emitted geometry.
    pub fn to_geo_polygon(&self, max_step: Real) -> Option<GeoPolygon<Real>> {
        let Primitive::Polyline {
            vertices,
            closed: true,
        } = self
        else {
            return None;
        };
        let mut coords: Vec<Coord<Real>> = Vec::new();
        for (i, start) in vertices.iter().enumerate() {
            let end = &vertices[(i + 1) % vertices.len()];
            coords.push(coord! { x: start.position.x, y: start.position.y });
            let Some(center) = arc_center(&start.position, &end.position, start.bulge) else {
                continue;
            };
            let sweep = 4.0 * start.bulge.atan();
            let steps = (sweep.abs() / max_step.max(Real::EPSILON)).ceil().max(1.0) as usize;
            let radius = (start.position - center).norm();
            let phase = (start.position.y - center.y).atan2(start.position.x - center.x);
            for step in 1..steps {
                let angle = phase + sweep * step as Real / steps as Real;
                coords.push(coord! {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                });
            }
        }
        Some(GeoPolygon::new(LineString::from(coords), vec![]))
    }
}

/// A primitive drawn on a named layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub layer: String,
    pub primitive: Primitive,
}

impl Entity {
    pub fn new(layer: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            layer: layer.into(),
            primitive,
        }
    }
}

/// An ordered list of layer-tagged primitives plus the layers they use.
///
/// A [`PixelDocument`] comes out of one pattern build, an [`ArrayDocument`]
/// out of one array assembly; both are plain values owned by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub layers: LayerTable,
    pub entities: Vec<Entity>,
}

/// The document of a single pixel.
pub type PixelDocument = Document;
/// The document of a whole array.
pub type ArrayDocument = Document;

impl Document {
    pub const fn new(layers: LayerTable) -> Self {
        Self {
            layers,
            entities: Vec::new(),
        }
    }

    /// Appends an entity, registering its layer with the fallback colour 7
    /// (white/black) if the table does not know it yet.
    pub fn push(&mut self, entity: Entity) {
        if !self.layers.contains(&entity.layer) {
            self.layers.insert(Layer::new(entity.layer.clone(), 7));
        }
        self.entities.push(entity);
    }

    pub fn on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |entity| entity.layer == layer)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Exact bounds of every non-text entity on `layer`, if any.
    pub fn layer_bounds(&self, layer: &str) -> Option<Rect<Real>> {
        bounding_rect(
            self.on_layer(layer)
                .filter(|entity| !entity.primitive.is_text())
                .filter_map(|entity| entity.primitive.bounds()),
        )
    }

    /// Exact bounds of every non-text entity.
    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        bounding_rect(
            self.entities
                .iter()
                .filter(|entity| !entity.primitive.is_text())
                .filter_map(|entity| entity.primitive.bounds()),
        )
    }
}

fn bounding_rect(
    bounds: impl Iterator<Item = (Point2<Real>, Point2<Real>)>,
) -> Option<Rect<Real>> {
    bounds
        .map(|(min, max)| Rect::new(coord! { x: min.x, y: min.y }, coord! { x: max.x, y: max.y }))
        .reduce(|acc, rect| {
            Rect::new(
                coord! { x: acc.min().x.min(rect.min().x), y: acc.min().y.min(rect.min().y) },
                coord! { x: acc.max().x.max(rect.max().x), y: acc.max().y.max(rect.max().y) },
            )
        })
}

/// Normalises an angle in degrees to `[0, 360)`.
pub(crate) fn normalize_degrees(angle: Real) -> Real {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
