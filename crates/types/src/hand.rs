// cspell:ignore AKQJT AKQJ
use crate::card::Card;
use crate::error::ParseError;
use crate::io::hand_parser;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    /// No singletons, no voids, max one doubleton (4-3-3-3, 4-4-3-2, 5-3-3-2)
    Balanced,
    /// One singleton OR two doubletons, no voids (5-4-2-2, 6-3-2-2)
    SemiBalanced,
    /// Everything else
    Unbalanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Distribution {
    pub spades: u8,
    pub hearts: u8,
    pub diamonds: u8,
    pub clubs: u8,
}

impl Distribution {
    pub fn length(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Spades => self.spades,
            Suit::Hearts => self.hearts,
            Suit::Diamonds => self.diamonds,
            Suit::Clubs => self.clubs,
        }
    }

    /// Suit lengths from longest to shortest, e.g. `[5, 3, 3, 2]`.
    pub fn pattern(&self) -> [u8; 4] {
        let mut d = [self.spades, self.hearts, self.diamonds, self.clubs];
        d.sort_by(|a, b| b.cmp(a));
        d
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand string in the format "Clubs.Diamonds.Hearts.Spades",
    /// skipping anything that is not a rank. Use `str::parse` to reject
    /// malformed input instead.
    pub fn parse(s: &str) -> Self {
        hand_parser::parse_hand(s)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn holds(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    /// Removes `card`, returning whether it was held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.hcp()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn distribution(&self) -> Distribution {
        Distribution {
            spades: self.length(Suit::Spades),
            hearts: self.length(Suit::Hearts),
            diamonds: self.length(Suit::Diamonds),
            clubs: self.length(Suit::Clubs),
        }
    }

    /// Display order: spades down to clubs, high cards first.
    pub fn sort(&mut self) {
        self.cards.sort_by(|a, b| b.cmp(a));
    }

    pub fn shape(&self) -> Shape {
        let pattern = self.distribution().pattern();

        let longest = pattern[0];
        let doubleton_count = pattern.iter().filter(|&&l| l == 2).count();
        let singleton_count = pattern.iter().filter(|&&l| l == 1).count();
        let void_count = pattern.iter().filter(|&&l| l == 0).count();

        if singleton_count == 0 && void_count == 0 && doubleton_count <= 1 {
            Shape::Balanced
        } else if longest <= 6 && void_count == 0 && (singleton_count == 1 || doubleton_count == 2)
        {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }

    /// The longest suit; ties go to the higher-ranking suit.
    pub fn longest_suit(&self) -> Suit {
        let mut longest = Suit::Spades;
        let mut max_len = self.length(Suit::Spades);
        for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
            let len = self.length(suit);
            if len > max_len {
                max_len = len;
                longest = suit;
            }
        }
        longest
    }
}

impl FromStr for Hand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hand_parser::try_parse_hand(s)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hand_parser::format_hand(self))
    }
}
