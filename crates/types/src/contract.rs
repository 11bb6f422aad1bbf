use crate::board::{Partnership, Position};
use crate::call::Call;
use crate::error::ParseError;
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl DoubleStatus {
    fn suffix(self) -> &'static str {
        match self {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        }
    }
}

/// The final contract of a completed auction. `declarer` is the seat whose
/// bid closed the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    /// Parses `"4S"`, `"3NX"`, `"6HXX"` or `"3NTX"` for the given declarer.
    pub fn parse(s: &str, declarer: Position) -> Result<Self, ParseError> {
        let upper = s.trim().to_ascii_uppercase();
        let err = || ParseError::Contract(s.to_string());
        let (bid, double_status) = if let Some(rest) = upper.strip_suffix("XX") {
            (rest, DoubleStatus::Redoubled)
        } else if let Some(rest) = upper.strip_suffix('X') {
            (rest, DoubleStatus::Doubled)
        } else {
            (upper.as_str(), DoubleStatus::Undoubled)
        };
        match bid.parse::<Call>().map_err(|_| err())? {
            Call::Bid { level, strain } => Ok(Contract {
                level,
                strain,
                double_status,
                declarer,
            }),
            _ => Err(err()),
        }
    }

    pub fn partnership(&self) -> Partnership {
        self.declarer.partnership()
    }

    /// Seat on lead to the first trick.
    pub fn opening_leader(&self) -> Position {
        self.declarer.lho()
    }

    pub fn dummy(&self) -> Position {
        self.declarer.partner()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.strain.to_suit()
    }

    /// Tricks the declaring side must take: level + 6.
    pub fn tricks_needed(&self) -> u8 {
        self.level + 6
    }

    pub fn is_doubled(&self) -> bool {
        self.double_status != DoubleStatus::Undoubled
    }

    pub fn is_redoubled(&self) -> bool {
        self.double_status == DoubleStatus::Redoubled
    }

    pub fn is_game(&self) -> bool {
        match self.strain {
            Strain::NoTrump => self.level >= 3,
            Strain::Hearts | Strain::Spades => self.level >= 4,
            Strain::Clubs | Strain::Diamonds => self.level >= 5,
        }
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }

    pub fn render(&self) -> String {
        format!(
            "{}{}{}",
            self.level,
            self.strain.to_char(),
            self.double_status.suffix()
        )
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.render(), self.declarer)
    }
}
