//! Duplicate-style scoring for one finished contract.
//!
//! Doubled vulnerable undertricks cost a flat 300 each (600 redoubled), and
//! making a doubled contract earns no extra bonus.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::board::{Partnership, Vulnerability};
use types::contract::{Contract, DoubleStatus};
use types::strain::Strain;

use crate::play::TRICKS_PER_BOARD;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringError {
    #[error("declaring side cannot take {0} tricks")]
    InvalidTrickCount(u8),
}

/// The components a score was built from. Only one of `undertrick_penalty`
/// and the making components is ever non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contract_points: i32,
    /// Game bonus, or the part-score bonus when the contract is below game.
    pub game_bonus: i32,
    pub slam_bonus: i32,
    pub overtricks: u8,
    pub overtrick_points: i32,
    pub undertricks: u8,
    pub undertrick_penalty: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// The side credited with `points`.
    pub partnership: Partnership,
    pub points: i32,
    pub breakdown: ScoreBreakdown,
}

impl Score {
    pub fn made(&self) -> bool {
        self.breakdown.undertricks == 0
    }

    /// Signed result from `partnership`'s point of view.
    pub fn net_for(&self, partnership: Partnership) -> i32 {
        if partnership == self.partnership {
            self.points
        } else {
            -self.points
        }
    }
}

/// Trick score for the contracted tricks before doubling.
fn trick_score(level: u8, strain: Strain) -> i32 {
    let level = i32::from(level);
    match strain {
        Strain::NoTrump => 40 + 30 * (level - 1),
        Strain::Spades | Strain::Hearts => 30 * level,
        Strain::Clubs | Strain::Diamonds => 20 * level,
    }
}

fn double_multiplier(status: DoubleStatus) -> i32 {
    match status {
        DoubleStatus::Undoubled => 1,
        DoubleStatus::Doubled => 2,
        DoubleStatus::Redoubled => 4,
    }
}

fn overtrick_value(status: DoubleStatus, vulnerable: bool) -> i32 {
    let doubled = if vulnerable { 200 } else { 100 };
    match status {
        DoubleStatus::Undoubled => 30,
        DoubleStatus::Doubled => doubled,
        DoubleStatus::Redoubled => doubled * 2,
    }
}

fn undertrick_penalty(undertricks: u8, status: DoubleStatus, vulnerable: bool) -> i32 {
    let n = i32::from(undertricks);
    let doubled = match (status, vulnerable) {
        (DoubleStatus::Undoubled, false) => return n * 50,
        (DoubleStatus::Undoubled, true) => return n * 100,
        (_, true) => n * 300,
        (_, false) => 100 + 200 * (n - 1),
    };
    if status == DoubleStatus::Redoubled {
        doubled * 2
    } else {
        doubled
    }
}

/// Scores `contract` given the tricks taken by the declaring side.
pub fn score(
    contract: &Contract,
    tricks_won: u8,
    vulnerability: Vulnerability,
) -> Result<Score, ScoringError> {
    if tricks_won > TRICKS_PER_BOARD {
        return Err(ScoringError::InvalidTrickCount(tricks_won));
    }

    let declaring = contract.partnership();
    let vulnerable = vulnerability.is_side_vulnerable(declaring);
    let needed = contract.tricks_needed();
    let mut breakdown = ScoreBreakdown::default();

    if tricks_won < needed {
        breakdown.undertricks = needed - tricks_won;
        breakdown.undertrick_penalty =
            undertrick_penalty(breakdown.undertricks, contract.double_status, vulnerable);
        return Ok(Score {
            partnership: declaring.opponent(),
            points: breakdown.undertrick_penalty,
            breakdown,
        });
    }

    breakdown.contract_points =
        trick_score(contract.level, contract.strain) * double_multiplier(contract.double_status);
    breakdown.game_bonus = match (breakdown.contract_points >= 100, vulnerable) {
        (true, true) => 500,
        (true, false) => 300,
        (false, _) => 50,
    };
    breakdown.slam_bonus = match (contract.level, vulnerable) {
        (6, false) => 500,
        (6, true) => 750,
        (7, false) => 1000,
        (7, true) => 1500,
        _ => 0,
    };
    breakdown.overtricks = tricks_won - needed;
    breakdown.overtrick_points = i32::from(breakdown.overtricks)
        * overtrick_value(contract.double_status, vulnerable);

    let points = breakdown.contract_points
        + breakdown.game_bonus
        + breakdown.slam_bonus
        + breakdown.overtrick_points;
    Ok(Score {
        partnership: declaring,
        points,
        breakdown,
    })
}
