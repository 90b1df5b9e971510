use super::*;
use crate::{
    foundation::core::GridMode,
    motion::model::{MotionDescriptor, PictographRecord},
};

const ORIENTATIONS: [Orientation; 4] = [
    Orientation::In,
    Orientation::Out,
    Orientation::Clock,
    Orientation::Counter,
];
const DIRS: [RotationDir; 3] = [RotationDir::Cw, RotationDir::Ccw, RotationDir::NoRotation];

fn turns(v: f64) -> Turns {
    Turns::from_f64(v).unwrap()
}

#[test]
fn pro_clockwise_one_turn_from_in_ends_out() {
    let end = propagate(
        Orientation::In,
        MotionKind::Pro,
        RotationDir::Cw,
        turns(1.0),
        Location::N,
        Location::E,
    );
    assert_eq!(end, Orientation::Out);
}

#[test]
fn propagation_is_deterministic() {
    for o in ORIENTATIONS {
        for kind in MotionKind::ALL {
            for dir in DIRS {
                for t in [0.0, 0.5, 1.0, 1.5, 2.0, 3.0] {
                    let a = propagate(o, kind, dir, turns(t), Location::S, Location::W);
                    let b = propagate(o, kind, dir, turns(t), Location::S, Location::W);
                    assert_eq!(a, b);
                }
            }
        }
    }
}

#[test]
fn static_and_float_are_identity() {
    for o in ORIENTATIONS {
        for dir in DIRS {
            assert_eq!(
                propagate(o, MotionKind::Static, dir, turns(2.0), Location::N, Location::N),
                o
            );
            assert_eq!(
                propagate(o, MotionKind::Float, dir, Turns::Float, Location::N, Location::E),
                o
            );
        }
    }
}

#[test]
fn anti_carries_a_baseline_flip() {
    let at_zero = propagate(
        Orientation::In,
        MotionKind::Anti,
        RotationDir::Ccw,
        Turns::ZERO,
        Location::N,
        Location::E,
    );
    assert_eq!(at_zero, Orientation::Out);
    let at_one = propagate(
        Orientation::In,
        MotionKind::Anti,
        RotationDir::Ccw,
        turns(1.0),
        Location::N,
        Location::E,
    );
    assert_eq!(at_one, Orientation::In);
}

#[test]
fn pro_at_zero_turns_keeps_start_orientation() {
    for start in ORIENTATIONS {
        for dir in DIRS {
            let end = propagate(start, MotionKind::Pro, dir, Turns::ZERO, Location::N, Location::E);
            assert_eq!(end, start);
        }
    }
}

#[test]
fn dash_at_zero_turns_passes_through() {
    for o in ORIENTATIONS {
        assert_eq!(
            propagate(o, MotionKind::Dash, RotationDir::NoRotation, Turns::ZERO, Location::N, Location::S),
            o
        );
    }
    assert_eq!(
        propagate(
            Orientation::Clock,
            MotionKind::Dash,
            RotationDir::Cw,
            turns(1.0),
            Location::N,
            Location::S
        ),
        Orientation::Counter
    );
}

#[test]
fn whole_turns_only_matter_by_parity() {
    for o in ORIENTATIONS {
        for kind in [MotionKind::Pro, MotionKind::Anti] {
            let one = propagate(o, kind, RotationDir::Cw, turns(1.0), Location::N, Location::E);
            let three = propagate(o, kind, RotationDir::Cw, turns(3.0), Location::N, Location::E);
            assert_eq!(one, three);
        }
    }
}

#[test]
fn half_turn_switches_orientation_family() {
    for o in ORIENTATIONS {
        for kind in [MotionKind::Pro, MotionKind::Anti, MotionKind::Dash] {
            for dir in [RotationDir::Cw, RotationDir::Ccw] {
                let end = propagate(o, kind, dir, turns(0.5), Location::N, Location::E);
                assert_ne!(end.is_radial(), o.is_radial(), "{o:?} {kind:?} {dir:?}");
            }
        }
    }
}

#[test]
fn missing_rotation_falls_back_to_hand_path() {
    let explicit = propagate(
        Orientation::In,
        MotionKind::Pro,
        RotationDir::Cw,
        turns(0.5),
        Location::N,
        Location::E,
    );
    let derived = propagate(
        Orientation::In,
        MotionKind::Pro,
        RotationDir::NoRotation,
        turns(0.5),
        Location::N,
        Location::E,
    );
    assert_eq!(explicit, derived);
}

fn shift_beat(start: Location, end: Location, t: f64) -> PictographRecord {
    PictographRecord::new(
        GridMode::Diamond,
        MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, start, end)
            .with_rotation(RotationDir::Cw)
            .with_turns(turns(t)),
        MotionDescriptor::new(ActorId::Red, MotionKind::Anti, start.opposite(), end.opposite())
            .with_rotation(RotationDir::Cw)
            .with_turns(turns(t)),
    )
}

#[test]
fn propagated_sequence_is_continuous() {
    let mut beats = vec![
        shift_beat(Location::N, Location::E, 0.5),
        shift_beat(Location::E, Location::S, 1.0),
        shift_beat(Location::S, Location::W, 1.5),
        shift_beat(Location::W, Location::N, 0.0),
        shift_beat(Location::N, Location::E, 2.0),
    ];
    assert!(!check_continuity(&beats).is_empty());

    propagate_sequence(&mut beats);
    assert!(check_continuity(&beats).is_empty());
    for pair in beats.windows(2) {
        for actor in ActorId::ALL {
            assert_eq!(
                pair[0].motion(actor).unwrap().end_orientation(),
                pair[1].motion(actor).unwrap().start_orientation
            );
        }
    }
}

#[test]
fn continuity_breaks_report_the_offending_beat() {
    let beats = vec![
        shift_beat(Location::N, Location::E, 1.0),
        shift_beat(Location::E, Location::S, 0.0),
    ];
    let breaks = check_continuity(&beats);
    let blue = breaks.iter().find(|b| b.actor == ActorId::Blue).unwrap();
    assert_eq!(blue.beat_index, 1);
    assert_eq!(blue.expected, Orientation::Out);
    assert_eq!(blue.found, Orientation::In);
}
