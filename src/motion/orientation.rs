use crate::{
    foundation::core::{ActorId, Location, Orientation, RotationDir, Turns},
    motion::model::{MotionKind, PictographRecord},
};

/// End orientation of a motion.
///
/// Whole turns contribute flips (only their parity matters); `anti` carries one
/// baseline flip, `dash` at zero turns passes through. `pro` has no baseline
/// flip, so a zero-turn `pro` keeps its start orientation. A trailing half turn
/// steps the orientation a quarter around `in -> clock -> out -> counter` in the
/// prop's spin direction. Static and float motions never change orientation.
pub fn propagate(
    start: Orientation,
    motion_kind: MotionKind,
    rotation_dir: RotationDir,
    turns: Turns,
    start_loc: Location,
    end_loc: Location,
) -> Orientation {
    match motion_kind {
        MotionKind::Static | MotionKind::Float => start,
        MotionKind::Pro | MotionKind::Anti | MotionKind::Dash => {
            let turns = if turns.is_float() {
                tracing::warn!(?motion_kind, "float turns on a non-float motion; treating as zero");
                Turns::ZERO
            } else {
                turns
            };
            if motion_kind == MotionKind::Dash && turns.is_zero() {
                return start;
            }

            let dir = match rotation_dir {
                RotationDir::NoRotation if !turns.is_zero() => {
                    RotationDir::of_hand_path(start_loc, end_loc)
                }
                dir => dir,
            };

            let baseline = u32::from(motion_kind == MotionKind::Anti);
            let mut end = start;
            if (turns.whole() + baseline) % 2 == 1 {
                end = match dir {
                    RotationDir::Ccw => end.flip_ccw(),
                    RotationDir::Cw | RotationDir::NoRotation => end.flip(),
                };
            }

            if turns.has_half() {
                let spin = match motion_kind {
                    MotionKind::Anti => dir.reversed(),
                    _ => dir,
                };
                if spin == RotationDir::NoRotation {
                    tracing::warn!(?motion_kind, %start_loc, %end_loc, "half turn without a spin direction");
                } else {
                    end = end.quarter_step(spin);
                }
            }
            end
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// A beat whose start orientation disagrees with the previous beat's end.
pub struct ContinuityBreak {
    /// Index of the beat whose start orientation is wrong.
    pub beat_index: usize,
    /// Actor concerned.
    pub actor: ActorId,
    /// Previous beat's end orientation.
    pub expected: Orientation,
    /// This beat's start orientation.
    pub found: Orientation,
}

/// Carry each actor's end orientation into the next beat's start orientation.
///
/// Beat 0 keeps its authored start orientation.
pub fn propagate_sequence(beats: &mut [PictographRecord]) {
    for idx in 1..beats.len() {
        for actor in ActorId::ALL {
            let Some(prev_end) = beats[idx - 1].motion(actor).map(|m| m.end_orientation()) else {
                tracing::warn!(beat = idx - 1, %actor, "missing motion; continuity not carried");
                continue;
            };
            if let Some(motion) = beats[idx].motions.get_mut(&actor) {
                motion.start_orientation = prev_end;
            }
        }
    }
}

/// Report every place where a sequence breaks orientation continuity.
pub fn check_continuity(beats: &[PictographRecord]) -> Vec<ContinuityBreak> {
    let mut out = Vec::new();
    for (idx, pair) in beats.windows(2).enumerate() {
        for actor in ActorId::ALL {
            let (Some(prev), Some(next)) = (pair[0].motion(actor), pair[1].motion(actor)) else {
                continue;
            };
            let expected = prev.end_orientation();
            if next.start_orientation != expected {
                out.push(ContinuityBreak {
                    beat_index: idx + 1,
                    actor,
                    expected,
                    found: next.start_orientation,
                });
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/motion/orientation.rs"]
mod tests;
