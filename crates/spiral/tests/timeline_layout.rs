//! End-to-end layout scenarios.
//!
//! Run with: cargo test -p spiral

use pretty_assertions::assert_eq;
use serde_json::json;
use spiral::{Milestone, PositionMode, SceneOptions, SpiralCurve, SpiralScene, day_of_year};

fn milestones(entries: &[(&str, &str)]) -> Vec<Milestone> {
    entries
        .iter()
        .map(|(date, desc)| Milestone {
            date: date.to_string(),
            desc: desc.to_string(),
        })
        .collect()
}

#[test]
fn year_markers_are_chronological() {
    let input = milestones(&[
        ("01.01", "New Year"),
        ("06.15", "Midyear"),
        ("12.31", "Year End"),
    ]);
    let scene = SpiralScene::build(&input, &SceneOptions::default());

    assert_eq!(scene.mode, PositionMode::Chronological);
    assert_eq!(day_of_year("06.15"), Some(166));
    assert_eq!(scene.t_values[0], 0.0);
    assert!((scene.t_values[1] - 166.0 / 365.0).abs() < 1e-12);
    assert_eq!(scene.t_values[2], 1.0);

    assert_eq!(scene.labels.len(), 3);
    assert!(scene.labels.iter().all(|l| l.indices.len() == 1));
    assert!(scene.points[0].y < scene.points[1].y);
    assert!(scene.points[1].y < scene.points[2].y);
    assert_eq!(scene.points[0].y, -4.0);
    assert_eq!(scene.points[2].y, 4.0);
}

#[test]
fn malformed_date_spaces_everything_evenly() {
    let input = milestones(&[
        ("01.01", "a"),
        ("00.05", "b"),
        ("02.01", "c"),
        ("12.31", "d"),
    ]);
    let scene = SpiralScene::build(&input, &SceneOptions::default());

    assert_eq!(scene.mode, PositionMode::Uniform);
    let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
    for (t, e) in scene.t_values.iter().zip(expected) {
        assert!((t - e).abs() < 1e-12, "{:?}", scene.t_values);
    }
}

#[test]
fn input_order_is_preserved_when_dates_are_unsorted() {
    let input = milestones(&[("12.31", "late"), ("01.01", "early"), ("07.01", "middle")]);
    let scene = SpiralScene::build(&input, &SceneOptions::default());

    assert_eq!(scene.t_values[0], 1.0);
    assert_eq!(scene.t_values[1], 0.0);
    assert_eq!(scene.labels[0].date, "12.31");
    assert_eq!(scene.labels[0].anchor, scene.points[0]);
}

#[test]
fn ranges_and_repeated_dates() {
    let input = milestones(&[
        ("04.05-06", "'Round Table' filming"),
        ("05.10", "DJ at LIC"),
        ("05.10", "'Feeder' filming"),
        ("07.07-11", "Hackathon"),
        ("05.10", "Encore"),
    ]);
    let scene = SpiralScene::build(&input, &SceneOptions::default());

    assert_eq!(scene.mode, PositionMode::Chronological);
    let dates: Vec<&str> = scene.labels.iter().map(|l| l.date.as_str()).collect();
    assert_eq!(dates, vec!["04.05-06", "05.10", "07.07-11", "05.10"]);
    assert_eq!(scene.labels[1].text, "DJ at LIC;\n'Feeder' filming");
    assert_eq!(scene.labels[1].indices, vec![1, 2]);
    // The trailing repeat sits at the same spot as the earlier run.
    assert_eq!(scene.points[4], scene.points[1]);
}

#[test]
fn custom_curve_changes_geometry_not_t() {
    let input = milestones(&[("01.01", "a"), ("12.31", "b")]);
    let options = SceneOptions {
        curve: SpiralCurve::new(1.0, 10.0, 2.0),
        ..SceneOptions::default()
    };
    let scene = SpiralScene::build(&input, &options);

    assert_eq!(scene.t_values, vec![0.0, 1.0]);
    assert!((scene.points[0].x - 10.0).abs() < 1e-9);
    assert_eq!(scene.points[0].y, -1.0);
    assert_eq!(scene.points[1].y, 1.0);
}

#[test]
fn scene_serializes_for_renderers() {
    let input = milestones(&[("03.01", "a")]);
    let scene = SpiralScene::build(&input, &SceneOptions::default());
    let value = serde_json::to_value(&scene).expect("serialize scene");

    assert_eq!(value["mode"], json!("chronological"));
    assert_eq!(value["t_values"], json!([0.0]));
    assert_eq!(value["labels"][0]["text"], json!("a"));
    assert_eq!(value["path"].as_array().map(Vec::len), Some(101));
}
