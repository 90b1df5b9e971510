use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pictograph::{
    ActorId, ContinuityBreak, EngineConfig, LetterClassifier, Orientation, PictographRecord,
    PlacementEngine, ReferenceDataset, SpecialPlacementStore, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "pictograph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place the arrows of a pictograph (or a sequence) and print them as JSON.
    Place(PlaceArgs),
    /// Classify a pictograph against a reference dataset.
    Classify(ClassifyArgs),
    /// Propagate orientations through a sequence and report continuity breaks.
    Propagate(PropagateArgs),
    /// Record a special placement for one actor and persist it.
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Input pictograph JSON (a JSON array with `--sequence`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Placement configuration tree.
    #[arg(long)]
    config_root: Option<PathBuf>,

    /// Engine config JSON; `--config-root` overrides its `config_root`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat the input as a sequence of beats.
    #[arg(long, default_value_t = false)]
    sequence: bool,

    /// Place beats in parallel (sequence mode only).
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Input pictograph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Reference dataset JSON (`{ "<letter>": [pictograph, ...] }`).
    #[arg(long)]
    dataset: PathBuf,

    /// Engine config JSON supplying `dual_float_threshold`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dual-float similarity threshold; overrides the config file.
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Parser, Debug)]
struct PropagateArgs {
    /// Input sequence JSON (array of pictographs).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Pictograph the override applies to; must carry a letter.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Placement configuration tree to write into.
    #[arg(long)]
    config_root: PathBuf,

    /// Actor to adjust (`blue` or `red`).
    #[arg(long, value_parser = parse_actor)]
    actor: ActorId,

    #[arg(long, allow_hyphen_values = true)]
    dx: f64,

    #[arg(long, allow_hyphen_values = true)]
    dy: f64,

    /// Also set a rotation override in degrees (dash/static motions only).
    #[arg(long, allow_hyphen_values = true)]
    rot_angle: Option<f64>,
}

fn parse_actor(s: &str) -> Result<ActorId, String> {
    ActorId::parse(s).ok_or_else(|| format!("unknown actor '{s}' (expected blue or red)"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Classify(args) => cmd_classify(args),
        Command::Propagate(args) => cmd_propagate(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(root) = args.config_root {
        config.config_root = Some(root);
    }
    config.parallel |= args.parallel;
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    let engine = PlacementEngine::new(config)?;

    if args.sequence {
        let beats = pictograph::read_sequence(&args.in_path)?;
        let placed = engine.place_sequence(&beats)?;
        return print_json(&placed);
    }
    let record = PictographRecord::from_path(&args.in_path)?;
    print_json(&engine.place(&record))
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let record = PictographRecord::from_path(&args.in_path)?;
    let dataset = ReferenceDataset::from_path(&args.dataset)?;
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.dual_float_threshold = threshold;
        config.validate()?;
    }
    let classifier = LetterClassifier::from_config(&config);

    match classifier.classify_pictograph(&record, &dataset) {
        Ok(classification) => print_json(&classification),
        Err(failure) => {
            print_json(&failure)?;
            Err(pictograph::PictographError::classification(failure.reason).into())
        }
    }
}

#[derive(serde::Serialize)]
struct PropagateOutput {
    breaks: Vec<ContinuityBreak>,
    end_orientations: Vec<BTreeMap<ActorId, Orientation>>,
    beats: Vec<PictographRecord>,
}

fn cmd_propagate(args: PropagateArgs) -> anyhow::Result<()> {
    let mut beats = pictograph::read_sequence(&args.in_path)?;
    let breaks = pictograph::check_continuity(&beats);
    pictograph::propagate_sequence(&mut beats);

    let end_orientations = beats
        .iter()
        .map(|b| {
            b.motions
                .iter()
                .map(|(actor, m)| (*actor, m.end_orientation()))
                .collect()
        })
        .collect();
    print_json(&PropagateOutput {
        breaks,
        end_orientations,
        beats,
    })
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let record = PictographRecord::from_path(&args.in_path)?;
    let store = SpecialPlacementStore::load(args.config_root);

    let mut touched = store.record_adjustment(&record, args.actor, Vec2::new(args.dx, args.dy))?;
    if let Some(angle) = args.rot_angle {
        touched.extend(store.record_rotation_override(&record, args.actor, Some(angle))?);
    }
    touched.sort();
    touched.dedup();

    for key in &touched {
        eprintln!("wrote {key}");
    }
    let fp = store.fingerprint();
    println!("{:016x}{:016x}", fp.hi, fp.lo);
    Ok(())
}
