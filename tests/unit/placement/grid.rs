use super::*;
use crate::foundation::core::{ActorId, Turns};

fn approx(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn record(blue: MotionDescriptor) -> PictographRecord {
    let red = MotionDescriptor::new(ActorId::Red, MotionKind::Static, Location::S, Location::S);
    PictographRecord::new(GridMode::Diamond, blue, red)
}

#[test]
fn locations_follow_motion_kind() {
    let calc = DefaultLocationCalculator;

    let stat = MotionDescriptor::new(ActorId::Blue, MotionKind::Static, Location::E, Location::E);
    assert_eq!(calc.calculate_location(&stat, &record(stat.clone())), Location::E);

    let pro = MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E)
        .with_rotation(RotationDir::Cw)
        .with_turns(Turns::from_f64(1.0).unwrap());
    assert_eq!(calc.calculate_location(&pro, &record(pro.clone())), Location::Ne);

    let anti = MotionDescriptor::new(ActorId::Blue, MotionKind::Anti, Location::N, Location::W)
        .with_rotation(RotationDir::Cw);
    assert_eq!(calc.calculate_location(&anti, &record(anti.clone())), Location::Nw);

    let dash = MotionDescriptor::new(ActorId::Blue, MotionKind::Dash, Location::N, Location::S)
        .with_rotation(RotationDir::Ccw);
    assert_eq!(calc.calculate_location(&dash, &record(dash.clone())), Location::W);

    let still_dash = MotionDescriptor::new(ActorId::Blue, MotionKind::Dash, Location::N, Location::S);
    assert_eq!(
        calc.calculate_location(&still_dash, &record(still_dash.clone())),
        Location::N
    );
}

#[test]
fn shift_without_a_between_location_stays_at_start() {
    let calc = DefaultLocationCalculator;
    let pro = MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::S);
    assert_eq!(calc.calculate_location(&pro, &record(pro.clone())), Location::N);
}

#[test]
fn hand_points_and_layer2_use_their_radii() {
    let cs = DefaultCoordinateSystem::default();
    assert!(approx(cs.scene_center(), Point::new(475.0, 475.0)));

    let stat = MotionDescriptor::new(ActorId::Blue, MotionKind::Static, Location::N, Location::N);
    let north = cs.initial_position(&stat, Location::N);
    assert!(approx(north, Point::new(475.0, 475.0 - cs.hand_point_radius)));

    let pro = MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E);
    let ne = cs.initial_position(&pro, Location::Ne);
    assert!(((ne - cs.scene_center()).hypot() - cs.layer2_radius).abs() < 1e-9);
    assert!(ne.x > 475.0 && ne.y < 475.0);
}

#[test]
fn box_grid_hand_points_are_diagonal() {
    let cs = DefaultCoordinateSystem::new(1000.0);
    let stat = MotionDescriptor::new(ActorId::Blue, MotionKind::Static, Location::Se, Location::Se);
    let se = cs.initial_position(&stat, Location::Se);
    assert!(((se - cs.scene_center()).hypot() - cs.hand_point_radius).abs() < 1e-9);
}

#[test]
fn rotation_angles_are_normalized() {
    let calc = DefaultRotationCalculator;
    let pro_cw = MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E)
        .with_rotation(RotationDir::Cw);
    assert_eq!(calc.rotation_angle(&pro_cw, Location::Ne, GridMode::Diamond), 45.0);

    let anti_cw = MotionDescriptor::new(ActorId::Blue, MotionKind::Anti, Location::W, Location::N)
        .with_rotation(RotationDir::Cw);
    assert_eq!(calc.rotation_angle(&anti_cw, Location::Nw, GridMode::Diamond), 45.0);

    let dash_ccw = MotionDescriptor::new(ActorId::Blue, MotionKind::Dash, Location::N, Location::S)
        .with_rotation(RotationDir::Ccw);
    assert_eq!(calc.rotation_angle(&dash_ccw, Location::W, GridMode::Diamond), 180.0);

    for loc in Location::ALL {
        for motion in [&pro_cw, &anti_cw, &dash_ccw] {
            for grid in [GridMode::Diamond, GridMode::Box] {
                let a = calc.rotation_angle(motion, loc, grid);
                assert!((0.0..360.0).contains(&a), "{a}");
            }
        }
    }
}
