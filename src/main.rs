use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jt808_rs::constants::JT808_SAMPLE_FRAME;
use jt808_rs::history::DEFAULT_HISTORY_FILE;
use jt808_rs::{init_logger, log_info, report, Decoder, History, Registry};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jt808")]
#[command(about = "Decode JT/T 808 telematics frames")]
struct Cli {
    /// JSON file with extra parameter and message definitions
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    /// Where decoded frames are remembered
    #[arg(long, global = true, default_value = DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a frame given as hex text
    Decode {
        hex: String,
        /// Print the decode result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode the built-in heartbeat sample
    Sample {
        #[arg(long)]
        json: bool,
    },
    /// List remembered frames
    History {
        /// Forget all remembered frames
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let registry = match &cli.params {
        Some(path) => Registry::load_overrides(path)
            .with_context(|| format!("loading parameter definitions from {}", path.display()))?,
        None => Registry::builtin().clone(),
    };

    match cli.command {
        Commands::Decode { hex, json } => decode(&registry, &cli.history_file, &hex, json)?,
        Commands::Sample { json } => {
            decode(&registry, &cli.history_file, JT808_SAMPLE_FRAME, json)?
        }
        Commands::History { clear } => {
            let mut history = History::load(&cli.history_file);
            if clear {
                history.clear();
                history
                    .save()
                    .with_context(|| format!("writing {}", cli.history_file.display()))?;
                log_info("History cleared");
                return Ok(());
            }
            if history.is_empty() {
                println!("No saved messages.");
            }
            for entry in history.entries() {
                println!("{} | {}", entry.summary(), entry.timestamp.format("%Y-%m-%d %H:%M:%S"));
                println!("    {}", entry.preview());
            }
        }
    }

    Ok(())
}

fn decode(registry: &Registry, history_file: &Path, input: &str, json: bool) -> Result<()> {
    if input.trim().is_empty() {
        bail!("no input given");
    }

    let result = Decoder::with_registry(registry)
        .decode_hex(input)
        .context("input is not usable hex")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_text(&result, registry));
    }

    let mut history = History::load(history_file);
    if history.record(input, &result) {
        history
            .save()
            .with_context(|| format!("writing {}", history_file.display()))?;
    }
    Ok(())
}
