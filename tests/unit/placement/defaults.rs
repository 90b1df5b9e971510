use super::*;
use crate::foundation::core::{ActorId, Location, RotationDir};
use std::path::PathBuf;

#[test]
fn load_reads_per_kind_files_and_skips_bad_entries() {
    let root = PathBuf::from("target").join("defaults_unit");
    let _ = std::fs::remove_dir_all(&root);
    let dir = root.join("diamond").join("default");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("pro_placements.json"),
        r#"{ "0": [-10, 40], "1.0": [15, 25], "0.25": [1, 1], "2": "bad" }"#,
    )
    .unwrap();
    std::fs::write(dir.join("float_placements.json"), r#"{ "fl": [5, 5] }"#).unwrap();
    std::fs::write(dir.join("anti_placements.json"), "[]").unwrap();

    let defaults = DefaultPlacements::load(&root);
    assert_eq!(defaults.len(), 3);

    let pro = MotionDescriptor::new(ActorId::Blue, MotionKind::Pro, Location::N, Location::E)
        .with_rotation(RotationDir::Cw)
        .with_turns(Turns::from_f64(1.0).unwrap());
    assert_eq!(defaults.base_offset(GridMode::Diamond, &pro), Vec2::new(15.0, 25.0));
    assert_eq!(defaults.base_offset(GridMode::Box, &pro), Vec2::ZERO);

    let float = MotionDescriptor::float_from(
        ActorId::Red,
        MotionKind::Anti,
        RotationDir::Ccw,
        Location::S,
        Location::E,
    );
    assert_eq!(defaults.base_offset(GridMode::Diamond, &float), Vec2::new(5.0, 5.0));
}

#[test]
fn missing_root_is_empty() {
    let defaults = DefaultPlacements::load(Path::new("target/defaults_unit/missing"));
    assert!(defaults.is_empty());
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn load_capturing(root: &Path) -> (DefaultPlacements, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();
    let defaults = tracing::subscriber::with_default(subscriber, || DefaultPlacements::load(root));
    let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    (defaults, logs)
}

#[test]
fn missing_kind_file_under_existing_grid_warns() {
    let root = PathBuf::from("target").join("defaults_unit_warn");
    let _ = std::fs::remove_dir_all(&root);
    let dir = root.join("diamond").join("default");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("pro_placements.json"), r#"{ "0": [1, 2] }"#).unwrap();

    let (defaults, logs) = load_capturing(&root);
    assert_eq!(defaults.len(), 1);
    assert!(logs.contains("WARN"));
    assert!(logs.contains("default placements file missing"));
    assert!(logs.contains("anti_placements.json"));
    // No box directory at all: quiet.
    assert!(!logs.contains("box"));
}
