use crate::board::Position;
use crate::call::Call;
use crate::card::Card;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid card: {0:?}")]
    Card(String),

    #[error("invalid call: {0:?}")]
    Call(String),

    #[error("invalid contract: {0:?}")]
    Contract(String),

    #[error("invalid position: {0:?}")]
    Position(String),

    #[error("invalid vulnerability: {0:?}")]
    Vulnerability(String),

    #[error("invalid hand {hand:?}: {reason}")]
    Hand { hand: String, reason: String },
}

/// A board whose four hands are not a legal deal of one deck.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no hand dealt to {}", .0.name())]
    MissingHand(Position),

    #[error("{} holds {len} cards, expected 13", .seat.name())]
    WrongHandSize { seat: Position, len: usize },

    #[error("{card} dealt to both {} and {}", .first.name(), .second.name())]
    DuplicateCard {
        card: Card,
        first: Position,
        second: Position,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    #[error("no cards left in the deck")]
    EmptyDeck,

    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// Why a call was refused. The auction is left untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalCallReason {
    #[error("bid level {0} is outside 1..=7")]
    InvalidLevel(u8),

    #[error("{bid} does not outrank {current}")]
    InsufficientBid { bid: Call, current: Call },

    #[error("there is no bid to double")]
    NothingToDouble,

    #[error("the current bid is already doubled")]
    AlreadyDoubled,

    #[error("cannot double your own side's bid")]
    DoubleOwnSide,

    #[error("there is no double to redouble")]
    NothingToRedouble,

    #[error("the current bid is already redoubled")]
    AlreadyRedoubled,

    #[error("only the doubled side may redouble")]
    RedoubleOpponents,

    #[error("the auction is already closed")]
    AuctionClosed,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionError {
    #[error("expected {expected} to call but got {actual}")]
    OutOfTurn { expected: Position, actual: Position },

    #[error("illegal call: {0}")]
    IllegalCall(IllegalCallReason),
}

impl From<IllegalCallReason> for AuctionError {
    fn from(reason: IllegalCallReason) -> Self {
        AuctionError::IllegalCall(reason)
    }
}
