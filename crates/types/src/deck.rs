use crate::board::{Board, Position, Vulnerability};
use crate::card::Card;
use crate::error::DeckError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::collections::VecDeque;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;

/// The undealt cards. Cards only ever leave from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// All 52 cards, clubs through spades, two through ace.
    pub fn new() -> Self {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push_back(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Fisher-Yates: for i from the last index down to 1, swap i with a
    /// uniformly chosen index in [0, i].
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let cards = self.cards.make_contiguous();
        for i in (1..cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            cards.swap(i, j);
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::EmptyDeck)
    }

    /// Deals `n` cards off the front. Nothing is dealt if fewer than `n` remain.
    pub fn deal_hand(&mut self, n: usize) -> Result<Hand, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let mut cards = Vec::with_capacity(n);
        for _ in 0..n {
            cards.push(self.deal_card()?);
        }
        Ok(Hand::new(cards))
    }

    /// Deals four 13-card hands, the dealer first and then clockwise.
    pub fn deal_board(
        &mut self,
        dealer: Position,
        vulnerability: Vulnerability,
    ) -> Result<Board, DeckError> {
        let needed = HAND_SIZE * 4;
        if self.cards.len() < needed {
            return Err(DeckError::InsufficientCards {
                requested: needed,
                remaining: self.cards.len(),
            });
        }
        let mut hands = HashMap::with_capacity(4);
        let mut seat = dealer;
        for _ in 0..4 {
            hands.insert(seat, self.deal_hand(HAND_SIZE)?);
            seat = seat.next();
        }
        log::debug!("dealt board, dealer {dealer}, vulnerability {vulnerability:?}");
        Ok(Board::new(dealer, vulnerability, hands))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_is_canonical() {
        let deck = Deck::new();
        let cards: Vec<Card> = deck.cards().copied().collect();
        assert_eq!(cards.len(), DECK_SIZE);
        assert_eq!(cards[0], Card::new(Suit::Clubs, Rank::Two));
        assert_eq!(cards[51], Card::new(Suit::Spades, Rank::Ace));
        let unique: HashSet<Card> = cards.into_iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_with_seed_is_deterministic() {
        let a: Vec<Card> = Deck::shuffled_with_seed(42).cards().copied().collect();
        let b: Vec<Card> = Deck::shuffled_with_seed(42).cards().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_with_different_seeds_differs() {
        let a: Vec<Card> = Deck::shuffled_with_seed(1).cards().copied().collect();
        let b: Vec<Card> = Deck::shuffled_with_seed(2).cards().copied().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_deal_card_until_empty() {
        let mut deck = Deck::new();
        for _ in 0..DECK_SIZE {
            deck.deal_card().unwrap();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.deal_card(), Err(DeckError::EmptyDeck));
    }

    #[test]
    fn test_deal_hand_insufficient_leaves_deck_intact() {
        let mut deck = Deck::new();
        deck.deal_hand(50).unwrap();
        assert_eq!(
            deck.deal_hand(3),
            Err(DeckError::InsufficientCards {
                requested: 3,
                remaining: 2
            })
        );
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn test_deal_board_starts_with_dealer() {
        let mut deck = Deck::new();
        let board = deck.deal_board(Position::South, Vulnerability::None).unwrap();
        assert!(deck.is_empty());
        // Unshuffled: the dealer gets the clubs.
        let south = board.get_hand(Position::South).unwrap();
        assert_eq!(south.length(Suit::Clubs), 13);
        let west = board.get_hand(Position::West).unwrap();
        assert_eq!(west.length(Suit::Diamonds), 13);
        assert_eq!(
            deck.deal_board(Position::South, Vulnerability::None).unwrap_err(),
            DeckError::InsufficientCards {
                requested: 52,
                remaining: 0
            }
        );
    }
}
