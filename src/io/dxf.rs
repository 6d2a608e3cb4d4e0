use super::{Exporter, IoError};
use crate::document::{Anchor, ArcVertex, Document, Entity as DocEntity, Primitive};
use crate::float_types::Real;
use crate::layers::{Layer, LayerTable};
use nalgebra::Point2;
use std::io::Cursor;

use dxf::entities::*;
use dxf::enums::{AcadVersion, HorizontalTextJustification, VerticalTextJustification};
use dxf::{Color, Drawing, LwPolylineVertex};

/// Colour given to layers whose table entry carries no colour index.
const FALLBACK_COLOR: u8 = 7;

/// Writes documents as DXF drawings: one DXF layer per document layer,
/// `LWPOLYLINE` with bulges, `ARC` and `TEXT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DxfExporter {
    pub version: AcadVersion,
}

impl Default for DxfExporter {
    fn default() -> Self {
        Self {
            version: AcadVersion::R2013,
        }
    }
}

impl DxfExporter {
    pub fn drawing(&self, document: &Document) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.header.version = self.version;

        for layer in document.layers.iter() {
            let mut table_entry = dxf::tables::Layer::default();
            table_entry.name = layer.name.clone();
            table_entry.color = Color::from_index(layer.color);
            drawing.add_layer(table_entry);
        }

        for entity in &document.entities {
            let mut dxf_entity = Entity::new(entity_type(&entity.primitive));
            dxf_entity.common.layer = entity.layer.clone();
            drawing.add_entity(dxf_entity);
        }
        drawing
    }
}

impl Exporter for DxfExporter {
    type Output = Vec<u8>;

    fn export(&self, document: &Document) -> Result<Vec<u8>, IoError> {
        let mut buffer = Vec::new();
        self.drawing(document).save(&mut buffer)?;
        Ok(buffer)
    }
}

#[allow(clippy::unnecessary_cast)]
fn point(p: &Point2<Real>) -> dxf::Point {
    dxf::Point::new(p.x as f64, p.y as f64, 0.0)
}

#[allow(clippy::unnecessary_cast)]
fn entity_type(primitive: &Primitive) -> EntityType {
    match primitive {
        Primitive::Polyline { vertices, closed } => {
            let mut polyline = LwPolyline::default();
            polyline.vertices = vertices
                .iter()
                .map(|v| {
                    let mut vertex = LwPolylineVertex::default();
                    vertex.x = v.position.x as f64;
                    vertex.y = v.position.y as f64;
                    vertex.bulge = v.bulge as f64;
                    vertex
                })
                .collect();
            polyline.set_is_closed(*closed);
            EntityType::LwPolyline(polyline)
        },
        Primitive::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => EntityType::Arc(Arc::new(
            point(center),
            *radius as f64,
            *start_angle as f64,
            *end_angle as f64,
        )),
        Primitive::Text {
            position,
            height,
            content,
            rotation,
            anchor,
        } => {
            let mut text = Text::default();
            text.location = point(position);
            text.text_height = *height as f64;
            text.value = content.clone();
            text.rotation = *rotation as f64;
            if *anchor == Anchor::Center {
                // justified text is placed by its alignment point
                text.horizontal_text_justification = HorizontalTextJustification::Center;
                text.vertical_text_justification = VerticalTextJustification::Middle;
                text.second_alignment_point = point(position);
            }
            EntityType::Text(text)
        },
    }
}

impl Document {
    /// Serialises the document with the default [`DxfExporter`].
    pub fn to_dxf(&self) -> Result<Vec<u8>, IoError> {
        DxfExporter::default().export(self)
    }

    #[doc = " Reads a document back from DXF data."]
    #[doc = ""]
    #[doc = " `LWPOLYLINE`, `ARC` and `TEXT` map back one to one, a `LINE` becomes a"]
    #[doc = " two-vertex open polyline; other entity types are skipped. The layer"]
    #[doc = " table is kept apart from the implicit layer `0`."]
    pub fn from_dxf(dxf_data: &[u8]) -> Result<Document, IoError> {
        let drawing = Drawing::load(&mut Cursor::new(dxf_data))?;

        let layers: LayerTable = drawing
            .layers()
            .filter(|layer| layer.name != "0")
            .map(|layer| Layer::new(layer.name.clone(), layer.color.index().unwrap_or(FALLBACK_COLOR)))
            .collect();
        let mut document = Document::new(layers);

        for entity in drawing.entities() {
            let primitive = match &entity.specific {
                EntityType::LwPolyline(polyline) => {
                    if polyline.vertices.is_empty() {
                        return Err(IoError::MalformedInput("LWPOLYLINE without vertices".into()));
                    }
                    Primitive::Polyline {
                        vertices: polyline
                            .vertices
                            .iter()
                            .map(|v| {
                                ArcVertex::with_bulge(
                                    Point2::new(v.x as Real, v.y as Real),
                                    v.bulge as Real,
                                )
                            })
                            .collect(),
                        closed: polyline.is_closed(),
                    }
                },
                EntityType::Line(line) => Primitive::open(&[
                    [line.p1.x as Real, line.p1.y as Real],
                    [line.p2.x as Real, line.p2.y as Real],
                ]),
                EntityType::Arc(arc) => Primitive::Arc {
                    center: Point2::new(arc.center.x as Real, arc.center.y as Real),
                    radius: arc.radius as Real,
                    start_angle: arc.start_angle as Real,
                    end_angle: arc.end_angle as Real,
                },
                EntityType::Text(text) => {
                    let centred = text.horizontal_text_justification
                        == HorizontalTextJustification::Center
                        && text.vertical_text_justification == VerticalTextJustification::Middle;
                    let (anchor, at) = if centred {
                        (Anchor::Center, &text.second_alignment_point)
                    } else {
                        (Anchor::BaselineLeft, &text.location)
                    };
                    Primitive::Text {
                        position: Point2::new(at.x as Real, at.y as Real),
                        height: text.text_height as Real,
                        content: text.value.clone(),
                        rotation: text.rotation as Real,
                        anchor,
                    }
                },
                _ => continue,
            };
            document.push(DocEntity::new(entity.common.layer.clone(), primitive));
        }
        Ok(document)
    }
}
