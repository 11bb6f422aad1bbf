use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A playing card. Ordered by suit first, then rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn hcp(self) -> u8 {
        self.rank.hcp()
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parses rank followed by suit, e.g. `"AS"` or `"TH"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::Card(s.to_string()));
        };
        let rank = Rank::from_char(r).ok_or_else(|| ParseError::Card(s.to_string()))?;
        let suit = Suit::from_char(su).ok_or_else(|| ParseError::Card(s.to_string()))?;
        Ok(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_parse() {
        assert_eq!(
            "AS".parse::<Card>().unwrap(),
            Card::new(Suit::Spades, Rank::Ace)
        );
        assert_eq!(
            "th".parse::<Card>().unwrap(),
            Card::new(Suit::Hearts, Rank::Ten)
        );
        assert!("A".parse::<Card>().is_err());
        assert!("ASX".parse::<Card>().is_err());
        assert!("1S".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_display_roundtrip() {
        let card = Card::new(Suit::Clubs, Rank::Queen);
        assert_eq!(card.to_string(), "QC");
        assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
    }

    #[test]
    fn test_card_ordering() {
        let two_spades = Card::new(Suit::Spades, Rank::Two);
        let ace_hearts = Card::new(Suit::Hearts, Rank::Ace);
        assert!(ace_hearts < two_spades);
    }
}
