use std::f64::consts::PI;

use chart_stage::math::{Matrix, Point, Rectangle, Transform};
use proptest::prelude::*;

fn matrix_strategy() -> impl Strategy<Value = Matrix> {
    (
        -100.0f64..100.0,
        -100.0f64..100.0,
        0.25f64..4.0,
        0.25f64..4.0,
        -3.0f64..3.0,
    )
        .prop_map(|(x, y, scale_x, scale_y, rotation)| {
            let mut matrix = Matrix::IDENTITY;
            matrix.set_transform(x, y, 0.0, 0.0, scale_x, scale_y, rotation, 0.0, 0.0);
            matrix
        })
}

fn transform_strategy() -> impl Strategy<Value = Transform> {
    (
        (-100.0f64..100.0, -100.0f64..100.0),
        (0.25f64..4.0, 0.25f64..4.0),
        (-50.0f64..50.0, -50.0f64..50.0),
        (-0.6f64..0.6, -0.6f64..0.6),
        -3.0f64..3.0,
    )
        .prop_map(|(position, scale, pivot, skew, rotation)| {
            let mut transform = Transform::from_position(position.0, position.1);
            transform.set_scale(scale.0, scale.1);
            transform.pivot = Point::new(pivot.0, pivot.1);
            transform.skew = Point::new(skew.0, skew.1);
            transform.rotation = rotation;
            transform
        })
}

fn near(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-7 * expected.abs().max(1.0)
}

fn close(a: &Matrix, b: &Matrix) -> bool {
    let eps = 1e-6;
    (a.a - b.a).abs() <= eps
        && (a.b - b.b).abs() <= eps
        && (a.c - b.c).abs() <= eps
        && (a.d - b.d).abs() <= eps
        && (a.tx - b.tx).abs() <= eps * 100.0
        && (a.ty - b.ty).abs() <= eps * 100.0
}

proptest! {
    #[test]
    fn apply_inverse_round_trips_points(
        matrix in matrix_strategy(),
        x in -1_000.0f64..1_000.0,
        y in -1_000.0f64..1_000.0
    ) {
        let point = Point::new(x, y);
        let recovered = matrix.apply_inverse(matrix.apply(point));
        prop_assert!((recovered.x - x).abs() <= 1e-6);
        prop_assert!((recovered.y - y).abs() <= 1e-6);
    }

    #[test]
    fn append_is_associative(
        a in matrix_strategy(),
        b in matrix_strategy(),
        c in matrix_strategy()
    ) {
        let mut left = a;
        left.append(&b).append(&c);

        let mut bc = b;
        bc.append(&c);
        let mut right = a;
        right.append(&bc);

        prop_assert!(close(&left, &right));
    }

    #[test]
    fn decompose_then_recompose_is_identity(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        scale_x in 0.1f64..10.0,
        scale_y in 0.1f64..10.0,
        rotation in -3.0f64..3.0
    ) {
        let mut matrix = Matrix::IDENTITY;
        matrix.set_transform(x, y, 0.0, 0.0, scale_x, scale_y, rotation, 0.0, 0.0);

        let mut transform = Transform::default();
        transform.set_from_matrix(&matrix);

        prop_assert!(close(&transform.local_matrix(), &matrix));
    }

    #[test]
    fn world_transform_chains_local_then_parent(
        parent in transform_strategy(),
        child in transform_strategy(),
        x in -200.0f64..200.0,
        y in -200.0f64..200.0
    ) {
        let mut parent = parent;
        let mut child = child;
        parent.update_transform(&Matrix::IDENTITY);
        let parent_world = parent.world_matrix();
        child.update_transform(&parent_world);

        let point = Point::new(x, y);
        let direct = child.world_matrix().apply(point);
        let chained = parent_world.apply(child.local_matrix().apply(point));

        prop_assert!(near(direct.x, chained.x), "{} vs {}", direct.x, chained.x);
        prop_assert!(near(direct.y, chained.y), "{} vs {}", direct.y, chained.y);
    }

    #[test]
    fn inverted_composes_to_identity(matrix in matrix_strategy()) {
        let mut product = matrix;
        product.append(&matrix.inverted());
        prop_assert!(close(&product, &Matrix::IDENTITY));
    }

    #[test]
    fn rectangle_contains_is_half_open(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        width in 0.5f64..100.0,
        height in 0.5f64..100.0
    ) {
        let rect = Rectangle::new(x, y, width, height);
        prop_assert!(rect.contains(x, y));
        prop_assert!(!rect.contains(x + width, y));
        prop_assert!(!rect.contains(x, y + height));
    }
}

#[test]
fn half_turn_decomposes_to_rotation_without_skew() {
    // Both skew angles come out at +π, summing to a full turn.
    let half_turn = Matrix::new(-1.0, 0.0, 0.0, -1.0, 5.0, 7.0);
    let mut transform = Transform::default();
    half_turn.decompose(&mut transform);

    assert!((transform.rotation - PI).abs() < 1e-9);
    assert_eq!(transform.skew, Point::ORIGIN);
    assert!((transform.scale.x - 1.0).abs() < 1e-12);
    assert!((transform.scale.y - 1.0).abs() < 1e-12);
    assert_eq!(transform.position, Point::new(5.0, 7.0));

    transform.update_local_transform();
    assert!(close(&transform.local_matrix(), &half_turn));
}

#[test]
fn near_half_turn_still_collapses_skew() {
    let matrix = Matrix::new(-2.0, 1e-9, 1e-9, -3.0, 0.0, 0.0);
    let mut transform = Transform::default();
    matrix.decompose(&mut transform);

    assert!((transform.rotation - PI).abs() < 1e-6);
    assert_eq!(transform.skew, Point::ORIGIN);
    assert!((transform.scale.x - 2.0).abs() < 1e-9);
    assert!((transform.scale.y - 3.0).abs() < 1e-9);
}
