use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "barrel-screen", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a video into a barrel screen function.
    Encode(EncodeArgs),
    /// Write only the diagnostic videos configured in the job.
    Debug(DebugArgs),
    /// Print an example job configuration.
    ExampleConfig,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Job configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Override the function output path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Worker thread count.
    #[arg(long)]
    threads: Option<usize>,

    /// Disable parallel encoding.
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Print the SHA-256 of the written function file.
    #[arg(long)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct DebugArgs {
    /// Job configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Debug(args) => cmd_debug(args),
        Command::ExampleConfig => cmd_example_config(),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &std::path::Path) -> anyhow::Result<barrel_screen::Config> {
    barrel_screen::Config::load(path).with_context(|| format!("load job '{}'", path.display()))
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    cfg.output.generate_function = true;
    if let Some(out) = args.out {
        let dir = out.parent().map(PathBuf::from).unwrap_or_default();
        let stem = out
            .file_stem()
            .context("--out must name a file")?
            .to_string_lossy()
            .to_string();
        cfg.output.functions_dir = dir;
        cfg.output.function_name = stem;
        cfg.output.function_ext = out
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
    }
    if args.sequential {
        cfg.threading.parallel = false;
    }
    if let Some(n) = args.threads {
        cfg.threading.parallel = true;
        cfg.threading.threads = Some(n);
    }
    cfg.validate()?;

    let report = barrel_screen::run_job(&cfg)?;
    if let Some(stats) = report.stats {
        eprintln!(
            "encoded {} frames for {} pixels: {} runs, {} shulker boxes, max {} runs/pixel",
            stats.frames,
            stats.pixels,
            stats.runs_total,
            stats.shulkers_total,
            stats.max_runs_per_pixel
        );
    }
    if let Some(path) = report.function_path.as_ref() {
        eprintln!("wrote {}", path.display());
    }
    if args.digest
        && let Some(digest) = report.digest
    {
        println!("{digest}");
    }
    Ok(())
}

fn cmd_debug(args: DebugArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    if cfg.output.debug_video.is_none() && cfg.output.update_map_video.is_none() {
        anyhow::bail!("job configures neither output.debug_video nor output.update_map_video");
    }
    let report = barrel_screen::run_diagnostics(&cfg)?;
    if let (Some(n), Some(path)) = (report.debug_frames, cfg.output.debug_video.as_ref()) {
        eprintln!("wrote {} ({n} frames)", path.display());
    }
    if let (Some(n), Some(path)) = (report.update_map_frames, cfg.output.update_map_video.as_ref()) {
        eprintln!("wrote {} ({n} frames)", path.display());
    }
    Ok(())
}

fn cmd_example_config() -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&barrel_screen::Config::example())
        .context("serialize example config")?;
    println!("{text}");
    Ok(())
}
