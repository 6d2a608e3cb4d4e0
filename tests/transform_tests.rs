mod support;

use kid_drawer::{
    Document, Entity, Primitive, TransformOps,
    document::ArcVertex,
    float_types::{Real, tolerance},
    layers::LayerTable,
    pattern::Variant,
    transform::{Mirror, RigidTransform},
};
use nalgebra::{Point2, Vector2};
use support::*;

fn sample() -> Document {
    let mut document = Document::new(LayerTable::kid_defaults());
    document.push(Entity::new(
        "PIXEL",
        Primitive::closed(vec![
            ArcVertex::with_bulge(Point2::new(10.0, 0.0), 0.5),
            ArcVertex::new(0.0, 10.0),
            ArcVertex::new(0.0, 0.0),
        ]),
    ));
    document.push(Entity::new(
        "INDEX",
        Primitive::label(Point2::new(10.0, 0.0), 5.0, "4"),
    ));
    document
}

#[test]
fn mirroring_twice_is_the_identity() {
    for variant in [Variant::Cross, Variant::CapacitorCross, Variant::ChokeCross] {
        let pixel = build(1, variant);
        for mirror in [Mirror::X, Mirror::Y] {
            assert_eq!(pixel.mirror(mirror).mirror(mirror), pixel, "{variant:?} {mirror:?}");
        }
    }
}

#[test]
fn labels_stay_upright() {
    let document = sample();
    let moved = document.transform(&RigidTransform::new(
        Mirror::X,
        90.0,
        Vector2::new(100.0, 50.0),
    ));

    let Primitive::Text {
        position, rotation, ..
    } = &moved.entities[1].primitive
    else {
        panic!("text expected");
    };
    // translation only: neither mirrored to (-10, 0) nor rotated
    assert!(points_eq(position, &Point2::new(110.0, 50.0), 1e-12));
    assert_eq!(*rotation, 0.0);

    // the polyline got the whole transform: (10,0) -> (-10,0) -> (0,-10) -> (100,40)
    let Primitive::Polyline { vertices, .. } = &moved.entities[0].primitive else {
        panic!("polyline expected");
    };
    assert!(points_eq(&vertices[0].position, &Point2::new(100.0, 40.0), 1e-9));
}

#[test]
fn bulge_sign_follows_orientation() {
    let document = sample();
    let bulge = |doc: &Document| match &doc.entities[0].primitive {
        Primitive::Polyline { vertices, .. } => vertices[0].bulge,
        _ => unreachable!(),
    };
    assert_eq!(bulge(&document.rotate(37.0)), 0.5);
    assert_eq!(bulge(&document.translate(3.0, -2.0)), 0.5);
    assert_eq!(bulge(&document.mirror(Mirror::X)), -0.5);
    assert_eq!(bulge(&document.mirror(Mirror::Y)), -0.5);
}

#[test]
fn sources_are_not_mutated() {
    let document = sample();
    let before = document.clone();
    let _ = document.transform(&RigidTransform::new(Mirror::Y, 45.0, Vector2::new(1.0, 1.0)));
    assert_eq!(document, before);
}

#[test]
fn matrix_agrees_with_point_mapping() {
    let transform = RigidTransform::new(Mirror::Y, 30.0, Vector2::new(-4.0, 7.0));
    let matrix = transform.to_homogeneous();
    for point in [Point2::new(1.0, 2.0), Point2::new(-3.0, 0.5)] {
        let expected = transform.apply_point(&point);
        assert!(points_eq(&matrix.transform_point(&point), &expected, 1e-12));
    }
}

#[test]
fn arcs_rotate_with_their_angles() {
    let arc = Primitive::Arc {
        center: Point2::new(1.0, 0.0),
        radius: 3.0,
        start_angle: 180.0,
        end_angle: 270.0,
    };
    let Primitive::Arc {
        center,
        start_angle,
        end_angle,
        ..
    } = arc.rotate(90.0)
    else {
        panic!("arc expected");
    };
    assert!(points_eq(&center, &Point2::new(0.0, 1.0), 1e-12));
    assert!(approx_eq(start_angle, 270.0, 1e-9));
    assert!(approx_eq(end_angle, 0.0, 1e-9));
}

/// Difference between two angles in degrees, ignoring whole turns.
fn angle_gap(a: Real, b: Real) -> Real {
    let gap = (a - b).rem_euclid(360.0);
    gap.min(360.0 - gap)
}

#[test]
fn arbitrary_arcs_survive_a_double_mirror() {
    for step in 0..3600 {
        let start = 0.03 + step as Real * 0.1;
        let arc = Primitive::Arc {
            center: Point2::new(-2.5, 4.0),
            radius: 12.0,
            start_angle: start,
            end_angle: start + 37.7,
        };
        for mirror in [Mirror::X, Mirror::Y] {
            let Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } = arc.mirror(mirror).mirror(mirror)
            else {
                panic!("arc expected");
            };
            assert_eq!(center, Point2::new(-2.5, 4.0));
            assert_eq!(radius, 12.0);
            assert!(angle_gap(start_angle, start) < tolerance(), "{mirror:?} {start}");
            assert!(angle_gap(end_angle, start + 37.7) < tolerance(), "{mirror:?} {start}");
        }
    }
}
