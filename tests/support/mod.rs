//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use kid_drawer::{
    document::{Document, Entity, Primitive},
    float_types::Real,
    pattern::{Dimensions, Parameters, PixelPattern, Variant},
};
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn points_eq(a: &Point2<Real>, b: &Point2<Real>, eps: Real) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}

/// Default dimensions with the given index, built as `variant`.
pub fn build(index: u32, variant: Variant) -> Document {
    build_with(index, Dimensions::default(), variant)
}

pub fn build_with(index: u32, dimensions: Dimensions, variant: Variant) -> Document {
    let params = Parameters::new(index, dimensions).expect("valid dimensions");
    PixelPattern::new(params, variant)
        .expect("consistent pattern")
        .build()
        .expect("pattern builds")
}

pub fn texts(document: &Document) -> Vec<&Entity> {
    document
        .entities
        .iter()
        .filter(|entity| entity.primitive.is_text())
        .collect()
}

pub fn closed_polylines(document: &Document) -> impl Iterator<Item = &Entity> {
    document
        .entities
        .iter()
        .filter(|entity| entity.primitive.is_closed_polyline())
}

/// Every vertex of every polyline, then every arc centre and text position.
pub fn anchor_points(document: &Document) -> Vec<Point2<Real>> {
    let mut points = Vec::new();
    for entity in &document.entities {
        match &entity.primitive {
            Primitive::Polyline { vertices, .. } => {
                points.extend(vertices.iter().map(|v| v.position))
            },
            Primitive::Arc { center, .. } => points.push(*center),
            Primitive::Text { position, .. } => points.push(*position),
        }
    }
    points
}
