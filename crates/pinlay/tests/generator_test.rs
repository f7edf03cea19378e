use pinlay::generator::relax;
use pinlay::geom::point;
use pinlay::{
    GeneratorOptions, JsonIngredient, Point, generate_layout, generate_positions,
    initial_position,
};
use serde_json::json;

fn centers(count: usize) -> Vec<Point> {
    generate_positions(count, &GeneratorOptions::default())
        .into_iter()
        .map(|p| p.center)
        .collect()
}

fn named(name: &str) -> JsonIngredient {
    serde_json::from_value(json!({ "name": name })).unwrap()
}

#[test]
fn generator_empty_input_yields_empty_output() {
    assert!(generate_positions(0, &GeneratorOptions::default()).is_empty());
    let out = generate_layout(Vec::<JsonIngredient>::new(), &GeneratorOptions::default());
    assert!(out.is_empty());
}

#[test]
fn generator_single_pin_sits_at_center() {
    assert_eq!(centers(1), vec![point(50.0, 50.0)]);
}

#[test]
fn generator_two_pins_split_left_and_right() {
    assert_eq!(centers(2), vec![point(30.0, 50.0), point(70.0, 50.0)]);
}

#[test]
fn generator_small_counts_keep_their_templates() {
    assert_eq!(
        centers(3),
        vec![point(50.0, 30.0), point(30.0, 65.0), point(70.0, 65.0)]
    );
    assert_eq!(
        centers(4),
        vec![
            point(30.0, 35.0),
            point(70.0, 35.0),
            point(30.0, 65.0),
            point(70.0, 65.0)
        ]
    );
    assert_eq!(
        centers(6),
        vec![
            point(30.0, 35.0),
            point(50.0, 35.0),
            point(70.0, 35.0),
            point(30.0, 65.0),
            point(50.0, 65.0),
            point(70.0, 65.0)
        ]
    );
}

#[test]
fn generator_five_pins_space_the_short_row_evenly() {
    let spacing = 80.0 / 3.0;
    assert_eq!(initial_position(3, 5), point(10.0 + spacing, 65.0));
    assert_eq!(initial_position(4, 5), point(10.0 + spacing * 2.0, 65.0));
    assert_eq!(initial_position(0, 5), point(30.0, 35.0));
}

#[test]
fn generator_grid_staggers_odd_rows_and_caps_height() {
    assert_eq!(initial_position(0, 7), point(20.0, 25.0));
    assert_eq!(initial_position(3, 7), point(30.0, 45.0));
    assert_eq!(initial_position(5, 7), point(90.0, 45.0));
    assert_eq!(initial_position(6, 7), point(20.0, 65.0));
    // Row 3 would sit at y = 85 without the cap.
    assert_eq!(initial_position(9, 12), point(30.0, 75.0));
    assert_eq!(initial_position(12, 15), point(20.0, 75.0));
}

#[test]
fn generator_seven_pins_need_no_repulsion() {
    assert_eq!(
        centers(7),
        vec![
            point(20.0, 25.0),
            point(50.0, 25.0),
            point(80.0, 25.0),
            point(30.0, 45.0),
            point(60.0, 45.0),
            point(90.0, 45.0),
            point(20.0, 65.0)
        ]
    );
}

#[test]
fn generator_keeps_every_pin_inside_safe_bounds() {
    let opts = GeneratorOptions::default();
    for count in 0..=40 {
        for pos in generate_positions(count, &opts) {
            let c = pos.center;
            assert!(
                (10.0..=90.0).contains(&c.x) && (10.0..=85.0).contains(&c.y),
                "count={count}: center {c:?} escaped the safe bounds"
            );
            assert!(opts.bounds.contains(c));
        }
    }
}

#[test]
fn generator_box_is_derived_from_final_center() {
    for count in 1..=30 {
        for pos in generate_positions(count, &GeneratorOptions::default()) {
            let (cx, cy) = (pos.center.x, pos.center.y);
            assert_eq!(
                pos.model_box.to_array(),
                [cy * 10.0 - 50.0, cx * 10.0 - 50.0, cy * 10.0 + 50.0, cx * 10.0 + 50.0],
                "count={count}"
            );
            assert!(pos.model_box.ymin <= pos.model_box.ymax);
            assert!(pos.model_box.xmin <= pos.model_box.xmax);
        }
    }
}

fn pair_distances(points: &[Point]) -> Vec<f64> {
    let mut out = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            out.push((points[i] - points[j]).length());
        }
    }
    out
}

#[test]
fn generator_separates_all_pins_for_small_counts() {
    for count in 2..=9 {
        for d in pair_distances(&centers(count)) {
            assert!(d >= 18.0 - 1e-9, "count={count}: pair distance {d} < 18");
        }
    }
}

#[test]
fn generator_separates_most_pins_for_dense_counts() {
    for count in 10..=20 {
        let distances = pair_distances(&centers(count));
        let separated = distances.iter().filter(|d| **d >= 18.0 - 1e-9).count();
        let ratio = separated as f64 / distances.len() as f64;
        assert!(
            ratio >= 0.85,
            "count={count}: only {separated}/{} pairs separated",
            distances.len()
        );
    }
}

#[test]
fn generator_is_deterministic() {
    let opts = GeneratorOptions::default();
    for count in [1, 5, 12, 25] {
        assert_eq!(
            generate_positions(count, &opts),
            generate_positions(count, &opts)
        );
    }
}

#[test]
fn relax_jitters_the_first_of_two_coincident_points() {
    let opts = GeneratorOptions {
        iterations: 1,
        ..Default::default()
    };
    let mut points = vec![point(50.0, 50.0), point(50.0, 50.0)];
    assert_eq!(relax(&mut points, &opts), 1);
    assert_eq!(points, vec![point(55.0, 53.0), point(50.0, 50.0)]);
}

#[test]
fn relax_resolves_coincident_points_with_full_budget() {
    let mut points = vec![point(50.0, 50.0), point(50.0, 50.0)];
    relax(&mut points, &GeneratorOptions::default());
    let d = (points[0] - points[1]).length();
    assert!((d - 18.0).abs() < 1e-9, "distance after relaxation: {d}");
}

#[test]
fn relax_pushes_close_points_apart_symmetrically() {
    let opts = GeneratorOptions {
        iterations: 1,
        ..Default::default()
    };
    let mut points = vec![point(40.0, 50.0), point(50.0, 50.0)];
    relax(&mut points, &opts);
    assert_eq!(points, vec![point(36.0, 50.0), point(54.0, 50.0)]);
}

#[test]
fn relax_stops_after_a_pass_without_movement() {
    let mut points = vec![point(10.0, 10.0), point(90.0, 90.0)];
    assert_eq!(relax(&mut points, &GeneratorOptions::default()), 1);

    let mut crowded: Vec<Point> = (0..24).map(|i| initial_position(i, 24)).collect();
    assert_eq!(relax(&mut crowded, &GeneratorOptions::default()), 8);
}

#[test]
fn generate_layout_preserves_payload_and_synthesizes_box() {
    let input = vec![
        named("rice"),
        named("kimchi").with_box_2d([1.0, 2.0, 3.0, 4.0]),
    ];
    let out = generate_layout(input, &GeneratorOptions::default());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].ingredient.payload["name"], json!("rice"));
    assert_eq!(out[1].ingredient.payload["name"], json!("kimchi"));
    assert_eq!((out[0].cx, out[0].cy), (30.0, 50.0));
    assert_eq!((out[0].original_cx, out[0].original_cy), (Some(30.0), Some(50.0)));
    assert_eq!(
        out[1].ingredient.box_2d.as_deref(),
        Some(&[450.0, 650.0, 550.0, 750.0][..])
    );
}

#[test]
fn generate_layout_keeps_original_center_from_template() {
    let input: Vec<JsonIngredient> = (0..24).map(|i| named(&format!("item{i}"))).collect();
    let out = generate_layout(input, &GeneratorOptions::default());
    for (idx, pin) in out.iter().enumerate() {
        let template = initial_position(idx, 24);
        assert_eq!(pin.original_cx, Some(template.x));
        assert_eq!(pin.original_cy, Some(template.y));
    }
}

#[test]
fn generate_layout_drops_layout_keys_from_reused_output() {
    let first = generate_layout(vec![named("rice"), named("kimchi")], &GeneratorOptions::default());
    let text = serde_json::to_string(&first).unwrap();
    let reread: Vec<JsonIngredient> = serde_json::from_str(&text).unwrap();
    assert!(reread.iter().all(|i| !i.payload.contains_key("originalCx")));

    let second = generate_layout(reread, &GeneratorOptions::default());
    let text = serde_json::to_string(&second).unwrap();
    assert_eq!(text.matches("\"cx\":").count(), 2, "{text}");
    assert_eq!(text.matches("\"originalCy\":").count(), 2, "{text}");
    assert_eq!(second, first);
}
