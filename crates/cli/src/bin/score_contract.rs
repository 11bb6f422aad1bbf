use anyhow::{Context, Result};
use clap::Parser;
use cli::init_logging;
use engine::scoring::score;
use types::board::{Position, Vulnerability};
use types::contract::Contract;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score a finished contract", long_about = None)]
struct Args {
    /// Contract, e.g. 4S, 3NX, 6HXX
    contract: String,

    /// Tricks taken by the declaring side
    tricks: u8,

    /// Declarer seat (N, E, S, W)
    #[arg(short, long, default_value = "S")]
    declarer: Position,

    /// None, NS, EW or Both
    #[arg(long, default_value = "None")]
    vulnerability: Vulnerability,

    /// Print the full score as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let contract = Contract::parse(&args.contract, args.declarer)?;
    let result = score(&contract, args.tricks, args.vulnerability)
        .with_context(|| format!("Failed to score {contract}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let breakdown = &result.breakdown;
    println!("{contract}, {} tricks, vulnerability {:?}", args.tricks, args.vulnerability);
    if result.made() {
        println!("  contract points  {:>5}", breakdown.contract_points);
        println!("  game/part bonus  {:>5}", breakdown.game_bonus);
        if breakdown.slam_bonus > 0 {
            println!("  slam bonus       {:>5}", breakdown.slam_bonus);
        }
        if breakdown.overtricks > 0 {
            println!(
                "  {} overtrick(s)   {:>5}",
                breakdown.overtricks, breakdown.overtrick_points
            );
        }
    } else {
        println!(
            "  {} undertrick(s)  {:>5}",
            breakdown.undertricks, breakdown.undertrick_penalty
        );
    }
    println!("{} +{}", result.partnership, result.points);
    Ok(())
}
