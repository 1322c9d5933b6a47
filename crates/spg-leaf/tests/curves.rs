use proptest::prelude::*;
use spg_core::{LeafGenerator, LeafPoints};
use spg_leaf::{
    BoundingBox, LissajousGenerator, LissajousParams, SpiralGenerator, SpiralParams,
};

fn spiral(radius: f64, scale: f64) -> SpiralGenerator {
    SpiralGenerator::new(SpiralParams {
        axes: vec!["x".into(), "y".into()],
        units: vec!["mm".into(), "mm".into()],
        centre: [1.0, -2.0],
        radius,
        scale,
        alternate: false,
    })
    .unwrap()
}

fn lissajous(num_lobes: usize, num_points: usize) -> LissajousGenerator {
    LissajousGenerator::new(LissajousParams {
        axes: vec!["x".into(), "y".into()],
        units: vec!["mm".into(), "mm".into()],
        bounds: BoundingBox {
            centre: [0.0, 0.0],
            width: 4.0,
            height: 2.0,
        },
        num_lobes,
        num_points,
    })
    .unwrap()
}

#[test]
fn spiral_size_matches_area() {
    let generator = spiral(5.0, 1.0);
    assert_eq!(generator.size(), 78);
    assert_eq!(LeafPoints::new(&generator).count(), 78);
}

#[test]
fn lissajous_starts_on_the_right_edge() {
    let generator = lissajous(2, 100);
    let first = generator.values_at(0).unwrap();
    assert!((first[0] - 2.0).abs() < 1e-12);
    assert!(first[1].abs() < 1e-12);
    assert_eq!(generator.size(), 100);
}

proptest! {
    #[test]
    fn spiral_points_stay_inside_radius(radius in 1.0f64..8.0, scale in 0.2f64..1.0) {
        let generator = spiral(radius, scale);
        for point in LeafPoints::new(&generator) {
            let dx = point.value("x").unwrap() - 1.0;
            let dy = point.value("y").unwrap() + 2.0;
            prop_assert!((dx * dx + dy * dy).sqrt() <= radius + 1e-9);
        }
    }

    #[test]
    fn lissajous_points_stay_inside_box(lobes in 1usize..6, points in 1usize..200) {
        let generator = lissajous(lobes, points);
        for point in LeafPoints::new(&generator) {
            prop_assert!(point.value("x").unwrap().abs() <= 2.0 + 1e-9);
            prop_assert!(point.value("y").unwrap().abs() <= 1.0 + 1e-9);
        }
    }
}
