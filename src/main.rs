use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use scribblepad::Config;
use scribblepad::replay::{self, Script};
use std::fs;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCRIBBLEPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "scribblepad")]
#[command(version, long_version = LONG_VERSION, about = "Headless driver for the scribblepad drawing engine")]
struct Cli {
    /// Replay a TOML gesture script against a fresh pad
    #[arg(long, short = 'r', value_name = "SCRIPT", requires = "output")]
    replay: Option<PathBuf>,

    /// Where to write the final buffer as PNG
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/scribblepad/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default config file (to --config or the default location)
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "replay")]
    write_default_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.write_default_config {
        let path = match cli.config {
            Some(path) => path,
            None => Config::get_config_path()?,
        };
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }
        Config::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let Some(script_path) = cli.replay else {
        println!("scribblepad: Headless driver for the scribblepad drawing engine");
        println!();
        println!("Usage:");
        println!("  scribblepad --replay <SCRIPT> --output <PNG>   Replay gestures, export PNG");
        println!("  scribblepad --write-default-config            Create a config file");
        println!("  scribblepad --help                            Show help");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let script = Script::load(&script_path)?;
    let pad = replay::run(&script, &config)?;

    // clap's `requires` guarantees an output path alongside --replay
    let output = cli.output.context("--output is required with --replay")?;
    let png = pad
        .export_png()
        .context("Failed to encode drawing")?
        .context("Drawing surface was never mounted")?;
    fs::write(&output, png.as_png())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Wrote {}", output.display());
    Ok(())
}
