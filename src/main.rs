mod script;
mod svg;

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;

use annotate::config::{ConfigError, EngineConfig};
use annotate::render::export_file_name;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::{ScriptError, Session};
use crate::svg::BaseImage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("script failed: {0}")]
    Script(#[from] ScriptError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("script never loaded an image; nothing to write to {0}")]
    NoFrame(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "markup", about = "Replay image annotation sessions")]
struct Cli {
    /// Log engine activity at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON-lines event script and print the resulting elements.
    Replay(ReplayArgs),
    /// Print the effective engine configuration.
    Palette,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Script file, or `-` for stdin.
    #[arg(default_value = "-")]
    script: String,

    /// Also write the last rendered frame as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Base image name used when a `load` op omits it.
    #[arg(long, env = "MARKUP_IMAGE", default_value = "image.png")]
    image: String,

    /// Surface width used when a `load` op omits it.
    #[arg(long, env = "MARKUP_WIDTH", default_value_t = 800.0)]
    width: f64,

    /// Surface height used when a `load` op omits it.
    #[arg(long, env = "MARKUP_HEIGHT", default_value_t = 600.0)]
    height: f64,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EngineConfig::from_env()?;
    match cli.command {
        Command::Replay(args) => run_replay(config, args),
        Command::Palette => run_palette(&config),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run_replay(config: EngineConfig, args: ReplayArgs) -> Result<(), CliError> {
    let defaults = BaseImage { name: args.image, width: args.width, height: args.height };
    let mut session = Session::new(config, defaults);

    if args.script == "-" {
        script::replay(io::stdin().lock(), &mut session)?;
    } else {
        let file = File::open(&args.script).map_err(|source| CliError::Open { path: args.script.clone(), source })?;
        script::replay(BufReader::new(file), &mut session)?;
    }

    let stats = session.stats();
    info!(
        ops = stats.ops,
        added = stats.added,
        removed = stats.removed,
        prompts = stats.prompts,
        frames = session.frames(),
        "replay complete"
    );

    let elements = session.elements();
    let output = json!({
        "export": session.base_name().map(export_file_name),
        "elements": &*elements,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(path) = args.svg {
        let shown = path.display().to_string();
        let frame = session.last_frame().ok_or_else(|| CliError::NoFrame(shown.clone()))?;
        fs::write(&path, frame).map_err(|source| CliError::Write { path: shown.clone(), source })?;
        info!(path = %shown, "svg written");
    }
    Ok(())
}

fn run_palette(config: &EngineConfig) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
