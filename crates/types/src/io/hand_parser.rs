use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades",
/// e.g. `"AK2.QJ4.T98.7653"`.
///
/// Unknown characters are skipped; suits past the fourth are ignored.
pub fn parse_hand(s: &str) -> Hand {
    let mut cards = Vec::new();
    for (suit, holding) in Suit::ALL.into_iter().zip(s.split('.')) {
        for c in holding.chars() {
            if let Some(rank) = Rank::from_char(c) {
                cards.push(Card { suit, rank });
            }
        }
    }
    Hand { cards }
}

/// Strict form of [`parse_hand`]: exactly four dot-separated suits, known
/// rank characters only, and no card listed twice.
pub fn try_parse_hand(s: &str) -> Result<Hand, ParseError> {
    let invalid = |reason: String| ParseError::Hand {
        hand: s.to_string(),
        reason,
    };

    let holdings: Vec<&str> = s.trim().split('.').collect();
    if holdings.len() != Suit::ALL.len() {
        return Err(invalid(format!(
            "expected 4 suits separated by '.', found {}",
            holdings.len()
        )));
    }

    let mut cards = Vec::new();
    for (suit, holding) in Suit::ALL.into_iter().zip(holdings) {
        for c in holding.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| {
                invalid(format!("unknown rank {c:?} in {}", suit.name().to_lowercase()))
            })?;
            let card = Card { suit, rank };
            if cards.contains(&card) {
                return Err(invalid(format!("{card} listed twice")));
            }
            cards.push(card);
        }
    }
    Ok(Hand { cards })
}

/// Renders a hand back into "Clubs.Diamonds.Hearts.Spades" notation,
/// highest rank first within each suit.
pub fn format_hand(hand: &Hand) -> String {
    Suit::ALL
        .into_iter()
        .map(|suit| {
            let mut ranks: Vec<Rank> = hand
                .cards
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank)
                .collect();
            ranks.sort_by(|a, b| b.cmp(a));
            ranks.into_iter().map(|r| r.to_char()).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}
