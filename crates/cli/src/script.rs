//! YAML scripts of calls and plays driven through a [`Table`].
//!
//! ```yaml
//! config:
//!   seed: 7
//!   vulnerability: by_board
//! boards:
//!   - calls: 1N P P P
//!     claim: 8
//!   - hands:
//!       N: "...AKQJT98765432"
//!       E: "..AKQJT98765432."
//!       S: ".AKQJT98765432.."
//!       W: "AKQJT98765432..."
//!     calls: 1D P P P
//!     plays: 2C 2S 2H 2D
//! ```

use anyhow::{anyhow, bail, Context, Result};
use engine::config::TableConfig;
use engine::parse_calls;
use engine::table::{BoardRecord, Table, TableEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use types::board::{Board, Partnership, Position};
use types::card::Card;
use types::hand::Hand;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub config: TableConfig,
    pub boards: Vec<BoardScript>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardScript {
    /// Seat to "C.D.H.S" hand. The board is dealt from the deck when empty.
    pub hands: BTreeMap<String, String>,
    pub calls: String,
    pub plays: String,
    pub claim: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct Totals {
    pub ns: i32,
    pub ew: i32,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub boards: Vec<BoardRecord>,
    pub totals: Totals,
    pub events: Vec<TableEvent>,
}

impl Script {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let script: Script = serde_yaml::from_str(yaml).context("Failed to parse script")?;
        script.config.validate()?;
        Ok(script)
    }
}

fn scripted_board(table: &Table, hands: &BTreeMap<String, String>) -> Result<Board> {
    let mut parsed = HashMap::with_capacity(4);
    for (seat, hand) in hands {
        let seat: Position = seat.parse()?;
        let hand: Hand = hand
            .parse()
            .with_context(|| format!("hand for {}", seat.name()))?;
        parsed.insert(seat, hand);
    }
    if let Some(missing) = Position::ALL.into_iter().find(|p| !parsed.contains_key(p)) {
        bail!("no hand given for {}", missing.name());
    }
    let config = table.config();
    let vulnerability = config.vulnerability.for_board(table.next_board_number());
    Ok(Board::new(config.dealer, vulnerability, parsed))
}

fn run_board(table: &mut Table, script: &BoardScript) -> Result<()> {
    if script.hands.is_empty() {
        table.deal()?;
    } else {
        let board = scripted_board(table, &script.hands)?;
        table.start(board)?;
    }

    for call in parse_calls(&script.calls)? {
        let seat = table
            .turn()
            .ok_or_else(|| anyhow!("no seat left to make call {call}"))?;
        table
            .call(seat, call)
            .with_context(|| format!("{} calling {call}", seat.name()))?;
    }

    for token in script.plays.split_whitespace() {
        let card: Card = token.parse()?;
        let seat = table
            .turn()
            .ok_or_else(|| anyhow!("no seat left to play {card}"))?;
        table
            .play(seat, card)
            .with_context(|| format!("{} playing {card}", seat.name()))?;
    }

    if let Some(tricks) = script.claim {
        table.claim(tricks).context("claim rejected")?;
    }
    Ok(())
}

/// Plays every scripted board in order at a fresh table.
pub fn run(script: &Script) -> Result<Report> {
    let mut table = Table::new(script.config.clone());
    for (i, board) in script.boards.iter().enumerate() {
        run_board(&mut table, board).with_context(|| format!("board script {}", i + 1))?;
    }
    Ok(Report {
        boards: table.history().to_vec(),
        totals: Totals {
            ns: table.total(Partnership::NS),
            ew: table.total(Partnership::EW),
        },
        events: table.events().to_vec(),
    })
}
