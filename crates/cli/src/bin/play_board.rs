use anyhow::{Context, Result};
use clap::Parser;
use cli::init_logging;
use cli::script::{run, Script};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a YAML script of calls and plays through a table", long_about = None)]
struct Args {
    /// Script file (YAML)
    script: PathBuf,

    /// Override the script's shuffle seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let content = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;
    let mut script = Script::from_yaml_str(&content)?;
    if args.seed.is_some() {
        script.config.seed = args.seed;
    }

    log::info!("Running {} boards", script.boards.len());
    let report = run(&script)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
