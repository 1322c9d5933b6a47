use spg_core::{LeafGenerator, LeafPoints};
use spg_leaf::{ArrayGenerator, ArrayParams, LineGenerator, LineParams};

fn values(generator: &dyn LeafGenerator, axis: &str) -> Vec<f64> {
    LeafPoints::new(generator)
        .map(|point| point.value(axis).unwrap())
        .collect()
}

#[test]
fn single_axis_line_is_evenly_spaced() {
    let line = LineGenerator::single("x", "mm", 0.0, 4.0, 5).unwrap();
    assert_eq!(line.size(), 5);
    assert_eq!(values(&line, "x"), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let y = LineGenerator::single("y", "mm", 0.0, 1.0, 3).unwrap();
    assert_eq!(values(&y, "y"), vec![0.0, 0.5, 1.0]);
}

#[test]
fn single_point_line_stays_at_start() {
    let line = LineGenerator::single("x", "mm", 2.5, 10.0, 1).unwrap();
    assert_eq!(line.steps(), &[0.0]);
    assert_eq!(values(&line, "x"), vec![2.5]);
}

#[test]
fn multi_axis_line_shares_one_index() {
    let line = LineGenerator::new(LineParams {
        axes: vec!["x".into(), "y".into()],
        units: vec!["mm".into(), "mm".into()],
        start: vec![0.0, 10.0],
        stop: vec![2.0, 6.0],
        num_points: 3,
        alternate: true,
    })
    .unwrap();
    assert!(line.alternate());
    let points: Vec<_> = LeafPoints::new(&line).collect();
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].value("x"), Some(1.0));
    assert_eq!(points[1].value("y"), Some(8.0));
    assert_eq!(points[2].get("x").unwrap().index, 2);
    assert_eq!(points[2].get("y").unwrap().index, 2);
    assert_eq!(line.values_at(3), None);
}

#[test]
fn descending_lines_are_supported() {
    let line = LineGenerator::single("x", "mm", 1.0, -1.0, 3).unwrap();
    assert_eq!(values(&line, "x"), vec![1.0, 0.0, -1.0]);
}

#[test]
fn array_visits_points_in_order() {
    let array = ArrayGenerator::new(ArrayParams {
        axis: "z".into(),
        units: "deg".into(),
        points: vec![3.0, -1.0, 7.5],
        alternate: false,
    })
    .unwrap();
    assert_eq!(array.axes(), &["z".to_string()]);
    assert_eq!(array.units(), &["deg".to_string()]);
    assert_eq!(values(&array, "z"), vec![3.0, -1.0, 7.5]);
}

#[test]
fn descriptors_follow_parameters() {
    let a = LineGenerator::single("x", "mm", 0.0, 1.0, 5).unwrap();
    let b = LineGenerator::single("x", "mm", 0.0, 1.0, 5).unwrap();
    let c = LineGenerator::single("x", "mm", 0.0, 1.0, 6).unwrap();
    assert_eq!(a.descriptor(), b.descriptor());
    assert_ne!(a.descriptor(), c.descriptor());
    assert_eq!(a.descriptor().kind(), Some("line"));
}
