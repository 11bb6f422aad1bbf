use anyhow::Result;
use clap::Parser;
use cli::display::{format_analysis, format_hands_table};
use cli::init_logging;
use engine::analysis::analyze;
use engine::config::TableConfig;
use std::path::PathBuf;
use types::board::{Position, Vulnerability};
use types::deck::Deck;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deal a board and evaluate each hand", long_about = None)]
struct Args {
    /// Shuffle seed for a reproducible deal
    #[arg(short, long, env = "BRIDGE_SEED")]
    seed: Option<u64>,

    /// Table config (YAML); its seed and dealer apply unless overridden
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dealer seat (N, E, S, W)
    #[arg(short, long)]
    dealer: Option<Position>,

    /// Board number, used for vulnerability when the config says by_board
    #[arg(short, long, default_value_t = 1)]
    board: u32,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    let dealer = args.dealer.unwrap_or(config.dealer);
    let vulnerability: Vulnerability = config.vulnerability.for_board(args.board);

    let mut deck = match args.seed.or(config.seed) {
        Some(seed) => Deck::shuffled_with_seed(seed),
        None => Deck::shuffled(&mut rand::thread_rng()),
    };
    let board = deck.deal_board(dealer, vulnerability)?;

    println!("Board {}", args.board);
    println!("Dealer: {}", dealer.name());
    println!("Vulnerability: {:?}", board.vulnerability);
    println!();
    print!("{}", format_hands_table(&board.hands));
    println!();

    // Same C.D.H.S notation that board scripts accept.
    for position in Position::ALL {
        if let Some(hand) = board.get_hand(position) {
            println!("{}: {hand}", position.to_char());
        }
    }
    println!();

    for position in Position::ALL {
        if let Some(hand) = board.get_hand(position) {
            print!("{}", format_analysis(position, &analyze(hand)));
        }
    }
    Ok(())
}
