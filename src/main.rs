use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bgclear::models::{resolve_config_path, AppConfig, Overrides, CONFIG_ENV};
use bgclear::services::{collect_inputs, inspect, run_batch, ImageProcessor};

#[derive(Parser)]
#[command(name = "bgclear", version)]
#[command(about = "Strip opaque and checkerboard backdrops from sprite PNGs")]
struct Cli {
    /// YAML config file (falls back to $BGCLEAR_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove backdrops in place
    Run {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report what would be removed without writing files
        #[arg(long)]
        dry_run: bool,

        /// Print one JSON object per file instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Show transparency and the detected backdrop without changing files
    Inspect {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print one JSON object per file instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Print the effective configuration as YAML
    Config {
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

/// Overrides for individual config values
#[derive(Args, Debug, Default)]
struct TuningArgs {
    /// Border band width in pixels
    #[arg(long)]
    border_depth: Option<u32>,

    /// Share of border samples a color must exceed (e.g. 0.01)
    #[arg(long)]
    min_fraction: Option<f64>,

    /// Distance for matching a reference checkerboard tone
    #[arg(long)]
    palette_threshold: Option<f32>,

    /// Distance for a pixel to join the fill
    #[arg(long)]
    fill_threshold: Option<f32>,

    /// Refuse fills erasing more than this share of an image (e.g. 0.95)
    #[arg(long)]
    max_removed_fraction: Option<f64>,

    /// Re-compress written PNGs with oxipng
    #[arg(long)]
    optimize: bool,
}

impl From<TuningArgs> for Overrides {
    fn from(args: TuningArgs) -> Self {
        Overrides {
            border_depth: args.border_depth,
            min_fraction: args.min_fraction,
            palette_threshold: args.palette_threshold,
            fill_threshold: args.fill_threshold,
            max_removed_fraction: args.max_removed_fraction,
            optimize: args.optimize,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = resolve_config_path(cli.config, std::env::var_os(CONFIG_ENV));

    match cli.command {
        Some(Commands::Run {
            paths,
            dry_run,
            json,
            tuning,
        }) => run_command(config_path.as_deref(), tuning, &paths, dry_run, json),
        Some(Commands::Inspect {
            paths,
            json,
            tuning,
        }) => run_inspect_command(config_path.as_deref(), tuning, &paths, json),
        Some(Commands::Config { tuning }) => run_config_command(config_path.as_deref(), tuning),
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "bgclear=debug" } else { "bgclear=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<&Path>, tuning: TuningArgs) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(path)?;
    config.apply(&tuning.into());
    Ok(config)
}

/// Remove backdrops from every input, then print totals
fn run_command(
    config_path: Option<&Path>,
    tuning: TuningArgs,
    paths: &[PathBuf],
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path, tuning)?;
    let processor = ImageProcessor::from_config(&config)?.dry_run(dry_run);

    let inputs = collect_inputs(paths, |p| config.matches_extension(p));
    if inputs.is_empty() {
        anyhow::bail!("No input files found");
    }
    tracing::info!(files = inputs.len(), dry_run, "Starting batch");

    let summary = run_batch(&processor, &inputs, |report| {
        if json {
            match serde_json::to_string(report) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(%e, "Failed to serialize report"),
            }
        } else {
            println!("{report}");
        }
    });

    if json {
        println!("{}", serde_json::json!({ "summary": summary }));
    } else {
        println!("\n{summary}");
    }

    if summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print inspection reports; never writes
fn run_inspect_command(
    config_path: Option<&Path>,
    tuning: TuningArgs,
    paths: &[PathBuf],
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path, tuning)?;
    let remover = config.remover()?;

    let inputs = collect_inputs(paths, |p| config.matches_extension(p));
    if inputs.is_empty() {
        anyhow::bail!("No input files found");
    }

    let mut failed = 0;
    for path in &inputs {
        match inspect(path, &remover) {
            Ok(report) if json => println!("{}", serde_json::to_string(&report)?),
            Ok(report) => println!("{report}\n"),
            Err(e) => {
                failed += 1;
                eprintln!("{e}");
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_config_command(config_path: Option<&Path>, tuning: TuningArgs) -> anyhow::Result<()> {
    let config = load_config(config_path, tuning)?;
    // Invalid palette or ranges fail here too
    config.remover()?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

/// Display version, config source and available commands
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("bgclear v{VERSION}");
    println!("Strip opaque and checkerboard backdrops from sprite PNGs\n");

    println!("Configuration:");
    match config_path {
        Some(path) => println!("  {CONFIG_ENV} / --config = {}", path.display()),
        None => println!("  {CONFIG_ENV} / --config = (not set, using defaults)"),
    }

    println!("\nCommands:");
    println!("  bgclear run <PATHS>...      Remove backdrops in place");
    println!("  bgclear inspect <PATHS>...  Show what would be removed");
    println!("  bgclear config              Print the effective configuration");
    println!("\nRun 'bgclear --help' for all options.");
}
