use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use types::board::{Board, Partnership, Position};
use types::card::Card;
use types::contract::Contract;
use types::hand::Hand;
use types::suit::Suit;

pub const TRICKS_PER_BOARD: u8 = 13;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Position, actual: Position },

    #[error("{card} revokes: must follow {lead}")]
    RevokeViolation { lead: Suit, card: Card },

    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Position, card: Card },

    #[error("all tricks have been played")]
    PlayComplete,

    #[error("claim of {claimed} tricks is outside {min}..={max}")]
    InvalidClaim { claimed: u8, min: u8, max: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Position,
    pub card: Card,
}

/// A trick in progress: up to four plays sharing the suit of the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: Position,
    plays: Vec<Play>,
}

impl Trick {
    pub fn new(leader: Position) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Position {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Seat due to play next into this trick.
    pub fn next_seat(&self) -> Position {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }

    /// Highest trump if any was played, else highest card of the lead suit.
    pub fn winner(&self, trump: Option<Suit>) -> Option<Position> {
        if !self.is_complete() {
            return None;
        }
        let lead = self.lead_suit()?;
        let class = |card: Card| {
            if Some(card.suit) == trump {
                2
            } else if card.suit == lead {
                1
            } else {
                0
            }
        };
        self.plays
            .iter()
            .max_by_key(|play| (class(play.card), play.card.rank))
            .map(|play| play.seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub leader: Position,
    pub plays: Vec<Play>,
    pub winner: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    Accepted,
    TrickComplete { winner: Position, trick: u8 },
    /// The thirteenth trick closed play.
    PlayComplete { winner: Position, declarer_tricks: u8 },
}

/// Enforces turn order and suit-following for the play of one contract.
#[derive(Debug, Clone)]
pub struct TrickValidator {
    contract: Contract,
    hands: HashMap<Position, Hand>,
    current: Trick,
    completed: Vec<CompletedTrick>,
    tricks_won: [u8; 2],
    claimed: Option<u8>,
}

impl TrickValidator {
    /// Opening lead goes to the seat on the declarer's left.
    pub fn new(contract: Contract, hands: HashMap<Position, Hand>) -> Self {
        Self {
            contract,
            hands,
            current: Trick::new(contract.opening_leader()),
            completed: Vec::with_capacity(TRICKS_PER_BOARD as usize),
            tricks_won: [0; 2],
            claimed: None,
        }
    }

    pub fn from_board(contract: Contract, board: &Board) -> Self {
        Self::new(contract, board.hands.clone())
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn dummy(&self) -> Position {
        self.contract.dummy()
    }

    pub fn hand(&self, seat: Position) -> Option<&Hand> {
        self.hands.get(&seat)
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current
    }

    pub fn completed_tricks(&self) -> &[CompletedTrick] {
        &self.completed
    }

    pub fn tricks_won(&self, partnership: Partnership) -> u8 {
        self.tricks_won[partnership.idx()]
    }

    pub fn is_complete(&self) -> bool {
        self.claimed.is_some() || self.completed.len() == TRICKS_PER_BOARD as usize
    }

    /// Seat to play next, `None` once play is over.
    pub fn turn(&self) -> Option<Position> {
        (!self.is_complete()).then(|| self.current.next_seat())
    }

    /// Tricks credited to the declaring side, including any claim.
    pub fn declarer_tricks(&self) -> u8 {
        self.claimed
            .unwrap_or_else(|| self.tricks_won(self.contract.partnership()))
    }

    /// Cards `seat` may play into the current trick.
    pub fn legal_cards(&self, seat: Position) -> Vec<Card> {
        let Some(hand) = self.hands.get(&seat) else {
            return Vec::new();
        };
        match self.current.lead_suit() {
            Some(lead) if hand.has_suit(lead) => hand
                .cards
                .iter()
                .copied()
                .filter(|c| c.suit == lead)
                .collect(),
            _ => hand.cards.clone(),
        }
    }

    fn check_play(&self, seat: Position, card: Card) -> Result<(), PlayError> {
        if self.is_complete() {
            return Err(PlayError::PlayComplete);
        }
        let expected = self.current.next_seat();
        if seat != expected {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        let hand = self
            .hands
            .get(&seat)
            .filter(|hand| hand.holds(card))
            .ok_or(PlayError::CardNotHeld { seat, card })?;
        if let Some(lead) = self.current.lead_suit() {
            if card.suit != lead && hand.has_suit(lead) {
                return Err(PlayError::RevokeViolation { lead, card });
            }
        }
        Ok(())
    }

    /// Plays `card` from `seat`. A rejected play changes nothing.
    pub fn play(&mut self, seat: Position, card: Card) -> Result<PlayOutcome, PlayError> {
        if let Err(err) = self.check_play(seat, card) {
            log::debug!("rejected {card} from {seat}: {err}");
            return Err(err);
        }

        if let Some(hand) = self.hands.get_mut(&seat) {
            hand.remove(card);
        }
        self.current.plays.push(Play { seat, card });
        log::debug!("{seat} played {card}");

        if !self.current.is_complete() {
            return Ok(PlayOutcome::Accepted);
        }

        let Some(winner) = self.current.winner(self.contract.trump()) else {
            return Ok(PlayOutcome::Accepted);
        };
        self.tricks_won[winner.partnership().idx()] += 1;
        let finished = std::mem::replace(&mut self.current, Trick::new(winner));
        self.completed.push(CompletedTrick {
            leader: finished.leader,
            plays: finished.plays,
            winner,
        });
        let trick = self.completed.len() as u8;
        log::debug!("trick {trick} won by {winner}");

        if trick == TRICKS_PER_BOARD {
            let declarer_tricks = self.declarer_tricks();
            log::info!(
                "play complete: declaring side took {declarer_tricks} tricks in {}",
                self.contract
            );
            return Ok(PlayOutcome::PlayComplete {
                winner,
                declarer_tricks,
            });
        }
        Ok(PlayOutcome::TrickComplete { winner, trick })
    }

    /// Ends play with the declaring side credited `declarer_tricks` in total.
    pub fn claim(&mut self, declarer_tricks: u8) -> Result<u8, PlayError> {
        if self.is_complete() {
            return Err(PlayError::PlayComplete);
        }
        let min = self.tricks_won(self.contract.partnership());
        let max = min + (TRICKS_PER_BOARD - self.completed.len() as u8);
        if !(min..=max).contains(&declarer_tricks) {
            return Err(PlayError::InvalidClaim {
                claimed: declarer_tricks,
                min,
                max,
            });
        }
        self.claimed = Some(declarer_tricks);
        log::info!("claim accepted: declaring side credited {declarer_tricks} tricks");
        Ok(declarer_tricks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::contract::DoubleStatus;
    use types::deck::Deck;
    use types::board::Vulnerability;
    use types::strain::Strain;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn contract(strain: Strain, declarer: Position) -> Contract {
        Contract {
            level: 1,
            strain,
            double_status: DoubleStatus::Undoubled,
            declarer,
        }
    }

    /// South declares, so West leads. Hands are "C.D.H.S".
    fn small_deal(strain: Strain) -> TrickValidator {
        let hands = HashMap::from([
            (Position::West, Hand::parse("2.AK..")),
            (Position::North, Hand::parse("3..2.5")),
            (Position::East, Hand::parse("..3.4")),
            (Position::South, Hand::parse("A.Q..6")),
        ]);
        TrickValidator::new(contract(strain, Position::South), hands)
    }

    #[test]
    fn test_opening_lead_left_of_declarer() {
        let validator = small_deal(Strain::NoTrump);
        assert_eq!(validator.turn(), Some(Position::West));
        assert_eq!(validator.dummy(), Position::North);
    }

    #[test]
    fn test_out_of_turn() {
        let mut validator = small_deal(Strain::NoTrump);
        assert_eq!(
            validator.play(Position::North, card("3C")),
            Err(PlayError::OutOfTurn {
                expected: Position::West,
                actual: Position::North
            })
        );
    }

    #[test]
    fn test_card_not_held() {
        let mut validator = small_deal(Strain::NoTrump);
        assert_eq!(
            validator.play(Position::West, card("AS")),
            Err(PlayError::CardNotHeld {
                seat: Position::West,
                card: card("AS")
            })
        );
    }

    #[test]
    fn test_revoke_rejected_and_state_unchanged() {
        let mut validator = small_deal(Strain::NoTrump);
        validator.play(Position::West, card("2C")).unwrap();
        // North holds the 3C and must follow.
        assert_eq!(
            validator.play(Position::North, card("5S")),
            Err(PlayError::RevokeViolation {
                lead: Suit::Clubs,
                card: card("5S")
            })
        );
        assert_eq!(validator.current_trick().plays().len(), 1);
        assert!(validator.hand(Position::North).unwrap().holds(card("5S")));
        assert_eq!(validator.legal_cards(Position::North), vec![card("3C")]);
        assert_eq!(
            validator.play(Position::North, card("3C")),
            Ok(PlayOutcome::Accepted)
        );
    }

    #[test]
    fn test_void_player_may_discard() {
        let mut validator = small_deal(Strain::NoTrump);
        validator.play(Position::West, card("2C")).unwrap();
        validator.play(Position::North, card("3C")).unwrap();
        // East has no clubs.
        assert_eq!(validator.legal_cards(Position::East).len(), 2);
        validator.play(Position::East, card("4S")).unwrap();
        let outcome = validator.play(Position::South, card("AC")).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::TrickComplete {
                winner: Position::South,
                trick: 1
            }
        );
        assert_eq!(validator.turn(), Some(Position::South));
        assert_eq!(validator.tricks_won(Partnership::NS), 1);
    }

    #[test]
    fn test_trump_beats_lead_suit() {
        let mut validator = small_deal(Strain::Spades);
        validator.play(Position::West, card("2C")).unwrap();
        validator.play(Position::North, card("3C")).unwrap();
        validator.play(Position::East, card("4S")).unwrap();
        let outcome = validator.play(Position::South, card("AC")).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::TrickComplete {
                winner: Position::East,
                trick: 1
            }
        );
        assert_eq!(validator.tricks_won(Partnership::EW), 1);
        assert_eq!(validator.turn(), Some(Position::East));
    }

    #[test]
    fn test_no_trump_has_no_override() {
        let mut trick = Trick::new(Position::North);
        for (seat, c) in [
            (Position::North, "TD"),
            (Position::East, "AS"),
            (Position::South, "QD"),
            (Position::West, "2D"),
        ] {
            trick.plays.push(Play {
                seat,
                card: card(c),
            });
        }
        assert_eq!(trick.winner(None), Some(Position::South));
        assert_eq!(trick.winner(Some(Suit::Spades)), Some(Position::East));
        assert_eq!(trick.winner(Some(Suit::Diamonds)), Some(Position::South));
    }

    #[test]
    fn test_full_board_plays_to_completion() {
        let mut deck = Deck::shuffled_with_seed(7);
        let board = deck.deal_board(Position::North, Vulnerability::None).unwrap();
        let mut validator =
            TrickValidator::from_board(contract(Strain::Hearts, Position::North), &board);

        let mut last = PlayOutcome::Accepted;
        while let Some(seat) = validator.turn() {
            let card = validator.legal_cards(seat)[0];
            last = validator.play(seat, card).unwrap();
        }
        let PlayOutcome::PlayComplete {
            declarer_tricks, ..
        } = last
        else {
            panic!("expected play to complete, got {last:?}");
        };
        assert_eq!(validator.completed_tricks().len(), 13);
        assert_eq!(
            validator.tricks_won(Partnership::NS) + validator.tricks_won(Partnership::EW),
            13
        );
        assert_eq!(declarer_tricks, validator.tricks_won(Partnership::NS));
        assert_eq!(
            validator.play(Position::North, card("2C")),
            Err(PlayError::PlayComplete)
        );
    }

    #[test]
    fn test_claim_bounds() {
        let mut validator = small_deal(Strain::NoTrump);
        assert_eq!(
            validator.claim(14),
            Err(PlayError::InvalidClaim {
                claimed: 14,
                min: 0,
                max: 13
            })
        );
        assert_eq!(validator.claim(9), Ok(9));
        assert!(validator.is_complete());
        assert_eq!(validator.declarer_tricks(), 9);
        assert_eq!(validator.turn(), None);
        assert_eq!(validator.claim(9), Err(PlayError::PlayComplete));
    }

    #[test]
    fn test_claim_mid_trick_counts_open_trick_as_unplayed() {
        let mut validator = small_deal(Strain::NoTrump);
        for (seat, c) in [
            (Position::West, "2C"),
            (Position::North, "3C"),
            (Position::East, "4S"),
            (Position::South, "AC"),
        ] {
            validator.play(seat, card(c)).unwrap();
        }
        // South won the first trick and leads to the second.
        validator.play(Position::South, card("QD")).unwrap();
        validator.play(Position::West, card("KD")).unwrap();
        assert_eq!(validator.current_trick().plays().len(), 2);

        assert_eq!(
            validator.claim(0),
            Err(PlayError::InvalidClaim {
                claimed: 0,
                min: 1,
                max: 13
            })
        );
        assert_eq!(validator.current_trick().plays().len(), 2);
        assert_eq!(validator.claim(13), Ok(13));
        assert_eq!(validator.declarer_tricks(), 13);
    }

    #[test]
    fn test_claim_mid_trick_after_defence_wins_a_trick() {
        let mut validator = small_deal(Strain::Spades);
        for (seat, c) in [
            (Position::West, "2C"),
            (Position::North, "3C"),
            (Position::East, "4S"),
            (Position::South, "AC"),
        ] {
            validator.play(seat, card(c)).unwrap();
        }
        // East ruffed the first trick and leads one card to the second.
        validator.play(Position::East, card("3H")).unwrap();
        assert_eq!(
            validator.claim(13),
            Err(PlayError::InvalidClaim {
                claimed: 13,
                min: 0,
                max: 12
            })
        );
        assert_eq!(validator.claim(12), Ok(12));
    }
}
