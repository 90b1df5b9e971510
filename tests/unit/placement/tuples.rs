use super::*;

const DIRS: [RotationDir; 3] = [RotationDir::Cw, RotationDir::Ccw, RotationDir::NoRotation];

#[test]
fn static_without_rotation_on_diamond_matches_reference_set() {
    let got = directional_tuples(
        Vec2::new(1.0, 1.0),
        MotionKind::Static,
        RotationDir::NoRotation,
        GridMode::Diamond,
        Location::N,
        Location::N,
        false,
    );
    assert_eq!(
        got,
        [
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, -1.0),
        ]
    );
}

#[test]
fn every_combination_yields_four_offsets() {
    let base = Vec2::new(30.0, -45.0);
    for grid in [GridMode::Diamond, GridMode::Box] {
        for kind in MotionKind::ALL {
            for dir in DIRS {
                for start in Location::ALL {
                    for end in Location::ALL {
                        for type5 in [false, true] {
                            let out = directional_tuples(base, kind, dir, grid, start, end, type5);
                            assert_eq!(out.len(), 4);
                            for v in out {
                                assert_eq!(v.hypot(), base.hypot());
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn float_uses_hand_rotation_not_prop_rotation() {
    let base = Vec2::new(10.0, 20.0);
    let float_cw_hand = directional_tuples(
        base,
        MotionKind::Float,
        RotationDir::Ccw,
        GridMode::Diamond,
        Location::N,
        Location::E,
        false,
    );
    let pro_cw = directional_tuples(
        base,
        MotionKind::Pro,
        RotationDir::Cw,
        GridMode::Diamond,
        Location::N,
        Location::E,
        false,
    );
    assert_eq!(float_cw_hand, pro_cw);
}

#[test]
fn type5_zero_turn_is_keyed_by_location_pair() {
    let base = Vec2::new(5.0, 0.0);
    let ns = directional_tuples(
        base,
        MotionKind::Dash,
        RotationDir::NoRotation,
        GridMode::Diamond,
        Location::N,
        Location::S,
        true,
    );
    let sn = directional_tuples(
        base,
        MotionKind::Dash,
        RotationDir::NoRotation,
        GridMode::Diamond,
        Location::S,
        Location::N,
        true,
    );
    assert_eq!(ns[0], Vec2::new(5.0, 0.0));
    assert_eq!(sn[0], Vec2::new(-5.0, 0.0));
    assert_ne!(ns, sn);
}

#[test]
fn unknown_combinations_replicate_base() {
    let base = Vec2::new(3.0, 4.0);
    let pro_without_rotation = directional_tuples(
        base,
        MotionKind::Pro,
        RotationDir::NoRotation,
        GridMode::Box,
        Location::Ne,
        Location::Se,
        false,
    );
    assert_eq!(pro_without_rotation, [base; 4]);

    let type5_bad_pair = directional_tuples(
        base,
        MotionKind::Dash,
        RotationDir::NoRotation,
        GridMode::Diamond,
        Location::N,
        Location::E,
        true,
    );
    assert_eq!(type5_bad_pair, [base; 4]);
}

#[test]
fn quadrant_rings_depend_on_grid_and_kind() {
    assert_eq!(quadrant_index(GridMode::Diamond, MotionKind::Pro, Location::Se), 1);
    assert_eq!(quadrant_index(GridMode::Diamond, MotionKind::Static, Location::W), 3);
    assert_eq!(quadrant_index(GridMode::Box, MotionKind::Anti, Location::S), 2);
    assert_eq!(quadrant_index(GridMode::Box, MotionKind::Dash, Location::Nw), 3);
    assert_eq!(quadrant_index(GridMode::Diamond, MotionKind::Pro, Location::N), 0);
}
