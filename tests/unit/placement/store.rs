use super::*;
use crate::{
    foundation::core::{Location, Orientation, RotationDir, Turns},
    motion::model::MotionKind,
};

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("store_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn pictograph(letter: &str, blue_ori: Orientation, red_ori: Orientation) -> PictographRecord {
    PictographRecord::new(
        GridMode::Diamond,
        MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E)
            .with_rotation(RotationDir::Cw)
            .with_turns(Turns::from_f64(1.0).unwrap())
            .with_start_orientation(blue_ori),
        MotionDescriptor::new(ActorId::Red, MotionKind::Pro, Location::S, Location::W)
            .with_rotation(RotationDir::Cw)
            .with_turns(Turns::ZERO)
            .with_start_orientation(red_ori),
    )
    .with_letter(letter)
}

fn lookup(store: &SpecialPlacementStore, p: &PictographRecord, actor: ActorId) -> Option<Vec2> {
    let (blue, red) = p.pair().unwrap();
    store
        .snapshot()
        .lookup(p.grid_mode, p.letter.as_ref().unwrap(), blue, red, actor)
}

#[test]
fn missing_root_degrades_to_empty() {
    let table = load_special_placements(Path::new("target/store_unit/does-not-exist"));
    assert!(table.is_empty());
}

#[test]
fn malformed_letters_are_skipped_individually() {
    let root = scratch("malformed");
    write(
        &special_dir(&root, GridMode::Diamond, OrientationCategory::Layer1).join("mixed.json"),
        r#"{
            "A": { "(1, 0)": { "blue": [10, -5], "red_rot_angle": 45 } },
            "B": { "(1, 0)": { "blue": "oops" } },
            "D": { "not a key": { "blue": [1, 1] } }
        }"#,
    );
    write(
        &special_dir(&root, GridMode::Diamond, OrientationCategory::Layer1).join("broken.json"),
        "{ not json",
    );

    let store = SpecialPlacementStore::load(&root);
    assert_eq!(store.snapshot().len(), 1);
    let a = pictograph("A", Orientation::In, Orientation::Out);
    assert_eq!(lookup(&store, &a, ActorId::Blue), Some(Vec2::new(10.0, -5.0)));
    assert_eq!(lookup(&store, &pictograph("B", Orientation::In, Orientation::In), ActorId::Blue), None);
}

#[test]
fn recording_persists_and_reloads_identically() {
    let root = scratch("record");
    let store = SpecialPlacementStore::load(&root);
    assert!(store.snapshot().is_empty());

    let p = pictograph("A", Orientation::In, Orientation::Clock);
    let touched = store
        .record_adjustment(&p, ActorId::Blue, Vec2::new(12.0, -3.0))
        .unwrap();
    assert_eq!(touched.len(), 2);

    let source_file = special_dir(&root, GridMode::Diamond, OrientationCategory::Layer3Blue1Red2)
        .join("A_placements.json");
    let mirror_file = special_dir(&root, GridMode::Diamond, OrientationCategory::Layer3Blue2Red1)
        .join("A_placements.json");
    assert!(source_file.is_file());
    assert!(mirror_file.is_file());
    let mirror: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&mirror_file).unwrap()).unwrap();
    assert_eq!(mirror["A"]["(0, 1)"]["red"], serde_json::json!([12.0, -3.0]));

    let before = store.fingerprint();
    let reloaded = SpecialPlacementStore::load(&root);
    assert_eq!(reloaded.fingerprint(), before);
    assert_eq!(store.reload().unwrap(), before);
    assert_eq!(lookup(&reloaded, &p, ActorId::Blue), Some(Vec2::new(12.0, -3.0)));
}

#[test]
fn writes_land_back_in_the_source_file() {
    let root = scratch("source_file");
    let file = special_dir(&root, GridMode::Diamond, OrientationCategory::Layer1).join("shared.json");
    write(
        &file,
        r#"{ "A": { "(1, 0)": { "blue": [1, 1] } }, "B": { "(0, 0)": { "red": [2, 2] } } }"#,
    );
    let store = SpecialPlacementStore::load(&root);
    let p = pictograph("A", Orientation::Out, Orientation::In);
    store.record_adjustment(&p, ActorId::Red, Vec2::new(-4.0, 4.0)).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["A"]["(1, 0)"]["blue"], serde_json::json!([1.0, 1.0]));
    assert_eq!(doc["A"]["(1, 0)"]["red"], serde_json::json!([-4.0, 4.0]));
    assert_eq!(doc["B"]["(0, 0)"]["red"], serde_json::json!([2, 2]));
    assert!(
        !special_dir(&root, GridMode::Diamond, OrientationCategory::Layer1)
            .join("A_placements.json")
            .exists()
    );
}

#[test]
fn snapshots_held_by_readers_are_not_mutated() {
    let store = SpecialPlacementStore::in_memory(SpecialPlacements::new());
    let before = store.snapshot();
    let p = pictograph("A", Orientation::In, Orientation::In);
    store.record_adjustment(&p, ActorId::Blue, Vec2::new(1.0, 0.0)).unwrap();
    assert!(before.is_empty());
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn authoring_requires_a_letter() {
    let store = SpecialPlacementStore::in_memory(SpecialPlacements::new());
    let mut p = pictograph("A", Orientation::In, Orientation::In);
    p.letter = None;
    assert!(store.record_adjustment(&p, ActorId::Blue, Vec2::ZERO).is_err());
}

#[test]
fn failed_mirror_write_leaves_disk_and_snapshot_untouched() {
    let root = scratch("blocked_mirror");
    // A plain file where the mirror directory belongs.
    write(
        &special_dir(&root, GridMode::Diamond, OrientationCategory::Layer3Blue2Red1),
        "not a directory",
    );
    let store = SpecialPlacementStore::load(&root);
    let before = store.fingerprint();

    let p = pictograph("A", Orientation::In, Orientation::Clock);
    assert!(store.record_adjustment(&p, ActorId::Blue, Vec2::new(4.0, 4.0)).is_err());
    assert_eq!(store.fingerprint(), before);
    assert_eq!(lookup(&store, &p, ActorId::Blue), None);

    let source_dir = special_dir(&root, GridMode::Diamond, OrientationCategory::Layer3Blue1Red2);
    assert!(!source_dir.join("A_placements.json").exists());
    assert!(!source_dir.join("A_placements.json.tmp").exists());

    store.reload().unwrap();
    assert_eq!(lookup(&store, &p, ActorId::Blue), None);
}
