use serde::Serialize;
use serde_json::json;
use spg_core::{dedup_by_descriptor, Descriptor};

#[derive(Serialize)]
struct Circle {
    centre: [f64; 2],
    radius: f64,
}

#[derive(Serialize)]
struct CircleReordered {
    radius: f64,
    centre: [f64; 2],
}

#[test]
fn descriptors_ignore_field_order() {
    let a = Descriptor::tagged(
        "circular",
        &Circle {
            centre: [0.0, 1.0],
            radius: 2.0,
        },
    )
    .expect("describe");
    let b = Descriptor::tagged(
        "circular",
        &CircleReordered {
            radius: 2.0,
            centre: [0.0, 1.0],
        },
    )
    .expect("describe");
    assert_eq!(a, b);
    assert_eq!(a.kind(), Some("circular"));
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn descriptors_differ_on_values_and_kind() {
    let circle = Circle {
        centre: [0.0, 0.0],
        radius: 1.0,
    };
    let a = Descriptor::tagged("circular", &circle).unwrap();
    let b = Descriptor::tagged("other", &circle).unwrap();
    let c = Descriptor::tagged(
        "circular",
        &Circle {
            centre: [0.0, 0.0],
            radius: 1.5,
        },
    )
    .unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn non_object_parameters_are_rejected() {
    let err = Descriptor::tagged("scalar", &3.0_f64).unwrap_err();
    assert_eq!(err.info().code, "descriptor-shape");
}

#[test]
fn dedup_keeps_first_occurrence_in_order() {
    let items: Vec<(u32, Descriptor)> = vec![
        (1, Descriptor::tagged("m", &json!({"seed": 1})).unwrap()),
        (2, Descriptor::tagged("m", &json!({"seed": 2})).unwrap()),
        (3, Descriptor::tagged("m", &json!({"seed": 1})).unwrap()),
        (4, Descriptor::tagged("m", &json!({"seed": 3})).unwrap()),
        (5, Descriptor::tagged("m", &json!({"seed": 2})).unwrap()),
    ];
    let (kept, dropped) = dedup_by_descriptor(items, |(_, descriptor)| descriptor);
    let ids: Vec<u32> = kept.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert_eq!(dropped, 2);
}
