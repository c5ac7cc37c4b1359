use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowcut", version)]
struct Cli {
    /// Edit config JSON. Defaults to the built-in edit.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print scene offsets, transition windows and the total duration.
    Info,
    /// Print one frame's descriptor as JSON.
    Frame(FrameArgs),
    /// Write every frame's descriptor as JSON lines.
    Dump(DumpArgs),
    /// Write the audio manifest as JSON.
    Audio(AudioArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Global frame index (0-based). Out-of-range frames freeze on the boundary.
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Output JSONL path.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate chunks on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads (parallel only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let timeline = flowcut::build_timeline(&config).context("build timeline")?;
    match cli.cmd {
        Command::Info => cmd_info(&config, &timeline),
        Command::Frame(args) => cmd_frame(&timeline, args),
        Command::Dump(args) => cmd_dump(&timeline, args),
        Command::Audio(args) => cmd_audio(&timeline, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<flowcut::EditConfig> {
    match path {
        Some(p) => flowcut::EditConfig::from_path(p)
            .with_context(|| format!("load edit config '{}'", p.display())),
        None => Ok(flowcut::EditConfig::default_edit()),
    }
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_info(config: &flowcut::EditConfig, timeline: &flowcut::Timeline) -> anyhow::Result<()> {
    let fps = timeline.fps();
    println!(
        "fps {}/{}  canvas {}x{}  seed {}",
        fps.num, fps.den, config.canvas.width, config.canvas.height, config.seed
    );
    for (i, scene) in timeline.scenes().iter().enumerate() {
        let start = timeline.scene_start(i).unwrap_or(0);
        println!(
            "scene {i} {:<10} start {start:>5}  duration {:>4}",
            scene.id(),
            scene.duration_frames()
        );
    }
    for (j, t) in timeline.transitions().iter().enumerate() {
        if let Some(w) = timeline.transition_window(j) {
            println!(
                "transition {j} {:<18} {:<11} frames [{}, {})",
                t.id,
                t.kind.name(),
                w.start.0,
                w.end.0
            );
        }
    }
    let total = timeline.total_duration();
    println!("total {total} frames ({:.2}s)", fps.frames_to_secs(total));
    Ok(())
}

fn cmd_frame(timeline: &flowcut::Timeline, args: FrameArgs) -> anyhow::Result<()> {
    let out = flowcut::render_frame(timeline, flowcut::FrameIndex(args.frame));
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    serde_json::to_writer_pretty(&mut w, &out).context("serialize frame")?;
    writeln!(w)?;
    Ok(())
}

fn cmd_dump(timeline: &flowcut::Timeline, args: DumpArgs) -> anyhow::Result<()> {
    let threading = flowcut::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let (frames, stats) = flowcut::render_frames(timeline, timeline.frame_range(), &threading)
        .context("render frames")?;

    let mut w = create_output(&args.out)?;
    for frame in &frames {
        serde_json::to_writer(&mut w, frame)
            .with_context(|| format!("serialize frame {}", frame.frame.0))?;
        writeln!(w)?;
    }
    w.flush()
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} in transitions, {} chunks)",
        args.out.display(),
        stats.frames_total,
        stats.transition_frames,
        stats.chunks
    );
    Ok(())
}

fn cmd_audio(timeline: &flowcut::Timeline, args: AudioArgs) -> anyhow::Result<()> {
    let manifest = flowcut::build_audio_manifest(timeline, timeline.frame_range())
        .context("build audio manifest")?;
    let mut w = create_output(&args.out)?;
    serde_json::to_writer_pretty(&mut w, &manifest).context("serialize audio manifest")?;
    writeln!(w)?;
    w.flush()
        .with_context(|| format!("write '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} segments)",
        args.out.display(),
        manifest.segments.len()
    );
    Ok(())
}
