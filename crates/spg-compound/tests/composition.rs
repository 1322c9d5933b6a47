mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{input, line, AtMost};
use proptest::prelude::*;
use spg_compound::{CompoundComposer, GeneratorInput, PositionShape, ScanPointIterator};
use spg_core::{Excluder, LeafGenerator, Mutator};
use spg_modifier::{RandomOffsetMutator, RandomOffsetParams};

fn offset(axis: &str, seed: u64) -> Arc<dyn Mutator> {
    Arc::new(
        RandomOffsetMutator::new(RandomOffsetParams {
            seed,
            axes: vec![axis.to_string()],
            max_offset: BTreeMap::from([(axis.to_string(), 0.1)]),
        })
        .expect("valid mutator"),
    )
}

#[test]
fn grid_of_two_lines_yields_pairs() {
    let x = line("x", 0.0, 4.0, 5);
    let y = line("y", 0.0, 1.0, 3);
    let mut scan =
        ScanPointIterator::compound(vec![input(&x), input(&y)], vec![], vec![], None).unwrap();
    assert_eq!(scan.size(), 15);
    assert_eq!(scan.shape(), vec![5, 3]);
    assert_eq!(scan.rank(), 2);
    assert_eq!(scan.dimension_names(), vec![vec!["x".to_string()], vec!["y".to_string()]]);

    let mut points = Vec::new();
    while scan.has_next() {
        points.push(scan.next().unwrap());
    }
    assert_eq!(points.len(), 15);
    for point in &points {
        let PositionShape::Pair { x, y, dimension_names } = point else {
            panic!("expected a pair, got {point:?}");
        };
        assert_eq!(x.axis, "y");
        assert_eq!(y.axis, "x");
        assert!(x.index < 3);
        assert!(y.index < 5);
        assert!(dimension_names.is_some());
    }
    assert_eq!(points[1].value("y"), Some(0.5));
    assert_eq!(points[1].value("x"), Some(0.0));
    assert_eq!(points[3].index("x"), Some(1));
    assert_eq!(points[14].value("x"), Some(4.0));
    assert_eq!(points[14].value("y"), Some(1.0));
}

#[test]
fn excluder_reduces_size() {
    let x = line("x", 1.0, 10.0, 10);
    let mut scan = ScanPointIterator::compound(
        vec![input(&x)],
        vec![AtMost::shared("x", 7.0)],
        vec![],
        None,
    )
    .unwrap();
    assert_eq!(scan.size(), 7);
    assert_eq!(scan.shape(), vec![7]);

    let mut values = Vec::new();
    while scan.has_next() {
        let point = scan.next().unwrap();
        values.push(point.value("x").unwrap());
    }
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn nested_compounds_are_spliced() {
    let g1 = line("a", 0.0, 1.0, 2);
    let g2 = line("b", 0.0, 2.0, 3);
    let m1 = offset("a", 1);
    let m2 = offset("b", 2);

    let c1 = CompoundComposer::new(vec![input(&g1)], vec![], vec![Arc::clone(&m1)])
        .prepare()
        .unwrap();
    let c2 = CompoundComposer::new(
        vec![input(&g2), GeneratorInput::from(c1)],
        vec![],
        vec![Arc::clone(&m2)],
    )
    .prepare()
    .unwrap();

    let generators: Vec<_> = c2.generators().iter().map(|g| g.descriptor().clone()).collect();
    assert_eq!(generators, vec![g2.descriptor().clone(), g1.descriptor().clone()]);
    let mutators: Vec<_> = c2.mutators().iter().map(|m| m.descriptor().clone()).collect();
    assert_eq!(mutators, vec![m2.descriptor().clone(), m1.descriptor().clone()]);
    assert_eq!(c2.axis_ordering(), &["b".to_string(), "a".to_string()]);
    assert_eq!(c2.axis_to_dimension().get("a"), Some(&1));
    assert_eq!(c2.size(), 6);
}

#[test]
fn same_excluder_through_two_paths_is_kept_once() {
    let x = line("x", 0.0, 9.0, 10);
    let y = line("y", 0.0, 1.0, 2);
    let inner = CompoundComposer::new(vec![input(&x)], vec![AtMost::shared("x", 4.0)], vec![])
        .prepare()
        .unwrap();
    let outer = CompoundComposer::new(
        vec![GeneratorInput::from(inner), input(&y)],
        vec![AtMost::shared("x", 4.0), AtMost::shared("y", 0.5)],
        vec![],
    )
    .prepare()
    .unwrap();
    let kinds: Vec<_> = outer
        .excluders()
        .iter()
        .map(|excluder| excluder.axes().to_vec())
        .collect();
    assert_eq!(kinds, vec![vec!["x".to_string()], vec!["y".to_string()]]);
    assert_eq!(outer.size(), 5);
}

#[test]
fn same_mutator_through_two_paths_is_kept_once() {
    let x = line("x", 0.0, 1.0, 2);
    let inner = CompoundComposer::new(vec![input(&x)], vec![], vec![offset("x", 9)])
        .prepare()
        .unwrap();
    let outer = CompoundComposer::new(
        vec![GeneratorInput::from(inner)],
        vec![],
        vec![offset("x", 9)],
    )
    .prepare()
    .unwrap();
    assert_eq!(outer.mutators().len(), 1);
}

#[test]
fn overlapping_axes_are_rejected() {
    let first = line("x", 0.0, 1.0, 2);
    let second = line("x", 5.0, 6.0, 2);
    let err = CompoundComposer::new(vec![input(&first), input(&second)], vec![], vec![])
        .prepare()
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.info().code, "overlapping-axes");
    assert_eq!(err.info().context.get("axis").map(String::as_str), Some("x"));
}

#[test]
fn modifiers_must_name_declared_axes() {
    let x = line("x", 0.0, 1.0, 2);
    let err = CompoundComposer::new(vec![input(&x)], vec![AtMost::shared("q", 1.0)], vec![])
        .prepare()
        .unwrap_err();
    assert_eq!(err.info().code, "unknown-axis");
    assert_eq!(err.info().context.get("role").map(String::as_str), Some("excluder"));

    let err = CompoundComposer::new(vec![input(&x)], vec![], vec![offset("q", 0)])
        .prepare()
        .unwrap_err();
    assert_eq!(err.info().code, "unknown-axis");
    assert_eq!(err.info().context.get("role").map(String::as_str), Some("mutator"));
}

#[test]
fn preparation_runs_once() {
    let x = line("x", 0.0, 1.0, 2);
    let mut composer = CompoundComposer::new(vec![input(&x)], vec![], vec![]);
    assert!(composer.prepare().is_ok());
    let err = composer.prepare().unwrap_err();
    assert_eq!(err.info().code, "already-prepared");
}

#[test]
fn empty_and_invalid_compositions_fail() {
    let err = CompoundComposer::new(vec![], vec![], vec![])
        .prepare()
        .unwrap_err();
    assert_eq!(err.info().code, "no-generators");

    let x = line("x", 0.0, 1.0, 2);
    for duration in [0.0, f64::NAN, f64::INFINITY] {
        let err = CompoundComposer::new(vec![input(&x)], vec![], vec![])
            .with_duration(duration)
            .prepare()
            .unwrap_err();
        assert_eq!(err.info().code, "bad-duration");
    }
}

#[test]
fn negative_duration_means_unset() {
    let x = line("x", 0.0, 1.0, 2);
    let generator = CompoundComposer::new(vec![input(&x)], vec![], vec![])
        .with_duration(-1.0)
        .prepare()
        .unwrap();
    assert_eq!(generator.duration(), None);
}

#[test]
fn uncountable_grids_are_rejected() {
    let outer = line("x", 0.0, 1.0, usize::MAX / 2);
    let inner = line("y", 0.0, 1.0, 3);
    let err = CompoundComposer::new(vec![input(&outer), input(&inner)], vec![], vec![])
        .prepare()
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.info().code, "size-overflow");

    let fits = CompoundComposer::new(
        vec![input(&line("x", 0.0, 1.0, usize::MAX / 2)), input(&line("y", 0.0, 1.0, 2))],
        vec![],
        vec![],
    )
    .prepare()
    .unwrap();
    assert_eq!(fits.size(), (usize::MAX / 2) * 2);
}

#[test]
fn independent_compositions_share_a_descriptor() {
    let build = || {
        CompoundComposer::new(
            vec![input(&line("x", 0.0, 1.0, 3)), input(&line("y", 0.0, 1.0, 2))],
            vec![AtMost::shared("x", 0.5)],
            vec![offset("y", 4)],
        )
        .with_duration(0.5)
        .prepare()
        .unwrap()
    };
    let first = build();
    let second = build();
    assert_eq!(first.descriptor(), second.descriptor());
    assert_eq!(first.descriptor().kind(), Some("compound"));
    assert_eq!(first.duration(), Some(0.5));
    assert_eq!(
        first.descriptor().digest().unwrap(),
        second.descriptor().digest().unwrap()
    );
}

fn leaves(shapes: &[(usize, usize)]) -> Vec<Arc<dyn LeafGenerator>> {
    shapes.iter()
        .enumerate()
        .map(|(leaf, (width, size))| {
            let axes: Vec<String> = (0..*width).map(|axis| format!("a{leaf}_{axis}")).collect();
            let generator: Arc<dyn LeafGenerator> = Arc::new(
                spg_leaf::LineGenerator::new(spg_leaf::LineParams {
                    units: vec!["mm".to_string(); axes.len()],
                    start: vec![0.0; axes.len()],
                    stop: vec![1.0; axes.len()],
                    axes,
                    num_points: *size,
                    alternate: false,
                })
                .unwrap(),
            );
            generator
        })
        .collect()
}

proptest! {
    #[test]
    fn dimensions_partition_the_flattened_axes(
        shapes in prop::collection::vec((1usize..4, 1usize..5), 1..6),
        split in 0usize..6,
    ) {
        let generators = leaves(&shapes);
        let split = split.min(generators.len());
        let expected: Vec<String> = generators
            .iter()
            .flat_map(|generator| generator.axes().to_vec())
            .collect();

        let inner = CompoundComposer::new(
            generators[..split].iter().map(input).collect(),
            vec![],
            vec![],
        )
        .prepare();
        let mut inputs: Vec<GeneratorInput> = match inner {
            Ok(inner) => vec![GeneratorInput::from(inner)],
            Err(_) => Vec::new(),
        };
        inputs.extend(generators[split..].iter().map(input));
        let composed = CompoundComposer::new(inputs, vec![], vec![]).prepare().unwrap();

        prop_assert_eq!(composed.axis_ordering(), expected.as_slice());
        let from_dimensions: Vec<String> = composed
            .dimension_names()
            .into_iter()
            .flatten()
            .collect();
        prop_assert_eq!(&from_dimensions, &expected);
        prop_assert_eq!(composed.rank(), shapes.len());
        prop_assert_eq!(composed.size(), shapes.iter().map(|(_, size)| size).product::<usize>());
        for (index, dimension) in composed.dimensions().iter().enumerate() {
            for axis in dimension.axes() {
                prop_assert_eq!(composed.axis_to_dimension().get(axis), Some(&index));
            }
        }
    }
}
