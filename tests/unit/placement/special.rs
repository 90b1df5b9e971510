use super::*;
use crate::foundation::core::{Location, Orientation, RotationDir, Turns};

fn t(v: f64) -> Turns {
    Turns::from_f64(v).unwrap()
}

fn pair(blue_ori: Orientation, red_ori: Orientation) -> (MotionDescriptor, MotionDescriptor) {
    (
        MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E)
            .with_rotation(RotationDir::Cw)
            .with_turns(t(1.0))
            .with_start_orientation(blue_ori),
        MotionDescriptor::new(ActorId::Red, MotionKind::Anti, Location::S, Location::W)
            .with_rotation(RotationDir::Cw)
            .with_turns(t(0.0))
            .with_start_orientation(red_ori),
    )
}

fn dashes(blue_ori: Orientation, red_ori: Orientation) -> (MotionDescriptor, MotionDescriptor) {
    (
        MotionDescriptor::new(ActorId::Blue, MotionKind::Dash, Location::N, Location::S)
            .with_start_orientation(blue_ori),
        MotionDescriptor::new(ActorId::Red, MotionKind::Static, Location::E, Location::E)
            .with_start_orientation(red_ori),
    )
}

#[test]
fn lookup_miss_is_none() {
    let table = SpecialPlacements::new();
    let (blue, red) = pair(Orientation::In, Orientation::In);
    assert_eq!(
        table.lookup(GridMode::Diamond, &Letter::new("I"), &blue, &red, ActorId::Blue),
        None
    );
}

#[test]
fn lookup_prefers_actor_then_motion_kind() {
    let (blue, red) = pair(Orientation::In, Orientation::Out);
    let letter = Letter::new("I");
    let key = SpecialKey::derive(GridMode::Diamond, &letter, &blue, &red);
    let mut entry = SpecialEntry::default();
    entry.offsets.insert(EntryKey::Actor(ActorId::Blue), Vec2::new(5.0, -5.0));
    entry.offsets.insert(EntryKey::Motion(MotionKind::Anti), Vec2::new(-20.0, 10.0));
    entry.offsets.insert(EntryKey::Motion(MotionKind::Pro), Vec2::new(99.0, 99.0));

    let mut table = SpecialPlacements::new();
    table.insert_entry(key, entry);

    let blue_hit = table.lookup(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue);
    let red_hit = table.lookup(GridMode::Diamond, &letter, &blue, &red, ActorId::Red);
    assert_eq!(blue_hit, Some(Vec2::new(5.0, -5.0)));
    assert_eq!(red_hit, Some(Vec2::new(-20.0, 10.0)));

    for _ in 0..3 {
        assert_eq!(
            table.lookup(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue),
            blue_hit
        );
    }
    assert_eq!(table.lookup(GridMode::Box, &letter, &blue, &red, ActorId::Blue), None);
}

#[test]
fn float_motion_falls_back_to_prefloat_kind_key() {
    let blue = MotionDescriptor::float_from(
        ActorId::Blue,
        MotionKind::Pro,
        RotationDir::Cw,
        Location::N,
        Location::E,
    );
    let mut entry = SpecialEntry::default();
    entry.offsets.insert(EntryKey::Motion(MotionKind::Pro), Vec2::new(1.0, 2.0));
    assert_eq!(entry.offset_for(&blue), Some(Vec2::new(1.0, 2.0)));
}

#[test]
fn recording_in_a_single_family_touches_one_key() {
    let (blue, red) = pair(Orientation::In, Orientation::Out);
    let mut table = SpecialPlacements::new();
    let touched = table.record_adjustment(
        GridMode::Diamond,
        &Letter::new("C"),
        &blue,
        &red,
        ActorId::Red,
        Vec2::new(3.0, 4.0),
    );
    assert_eq!(touched.len(), 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn recording_mixed_orientation_writes_cross_actor_mirror() {
    let (blue, red) = pair(Orientation::In, Orientation::Clock);
    let letter = Letter::new("A");
    let mut table = SpecialPlacements::new();

    table.record_adjustment(GridMode::Diamond, &letter, &blue, &red, ActorId::Red, Vec2::new(-7.0, 1.0));
    let touched = table.record_adjustment(
        GridMode::Diamond,
        &letter,
        &blue,
        &red,
        ActorId::Blue,
        Vec2::new(10.0, 20.0),
    );
    assert_eq!(touched.len(), 2);
    assert_eq!(touched[1], touched[0].mirrored());

    let mirrored_key = touched[1].clone();
    let entry = table.entry(&mirrored_key).unwrap();
    assert_eq!(entry.offsets.get(&EntryKey::Actor(ActorId::Red)), Some(&Vec2::new(10.0, 20.0)));
    assert_eq!(entry.offsets.get(&EntryKey::Actor(ActorId::Blue)), Some(&Vec2::new(-7.0, 1.0)));

    // Overwriting the source never leaves the mirror stale.
    table.record_adjustment(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue, Vec2::new(0.5, 0.5));
    let entry = table.entry(&mirrored_key).unwrap();
    assert_eq!(entry.offsets.get(&EntryKey::Actor(ActorId::Red)), Some(&Vec2::new(0.5, 0.5)));
}

#[test]
fn rotation_overrides_mirror_and_delete() {
    let (blue, red) = dashes(Orientation::Counter, Orientation::Out);
    let letter = Letter::new("Φ");
    let mut table = SpecialPlacements::new();

    let touched = table
        .record_rotation_override(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue, Some(90.0))
        .unwrap();
    assert_eq!(touched.len(), 2);
    assert_eq!(
        table.rotation_override(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue),
        Some(90.0)
    );
    let mirror = table.entry(&touched[1]).unwrap();
    assert_eq!(mirror.rotation_overrides.get(&ActorId::Red), Some(&90.0));

    table
        .record_rotation_override(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue, None)
        .unwrap();
    assert_eq!(
        table.rotation_override(GridMode::Diamond, &letter, &blue, &red, ActorId::Blue),
        None
    );
    assert!(table.entry(&touched[1]).is_none());
    assert!(table.is_empty());
}

#[test]
fn rotation_override_rejects_shift_motions() {
    let (blue, red) = pair(Orientation::In, Orientation::In);
    let mut table = SpecialPlacements::new();
    assert!(
        table
            .record_rotation_override(GridMode::Diamond, &Letter::new("A"), &blue, &red, ActorId::Blue, Some(45.0))
            .is_err()
    );
}

#[test]
fn fingerprint_tracks_content() {
    let (blue, red) = pair(Orientation::In, Orientation::In);
    let letter = Letter::new("B");
    let mut a = SpecialPlacements::new();
    let empty = a.fingerprint();
    a.record_adjustment(GridMode::Box, &letter, &blue, &red, ActorId::Blue, Vec2::new(1.0, 1.0));
    let one = a.fingerprint();
    assert_ne!(empty, one);

    let mut b = SpecialPlacements::new();
    b.record_adjustment(GridMode::Box, &letter, &blue, &red, ActorId::Blue, Vec2::new(1.0, 1.0));
    assert_eq!(b.fingerprint(), one);
}
