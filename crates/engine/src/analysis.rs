//! Advisory hand evaluation. Nothing here affects legality or scoring.

use serde::Serialize;
use std::fmt;
use types::call::Call;
use types::hand::{Distribution, Hand, Shape};
use types::strain::Strain;
use types::suit::Suit;

/// A heuristic opening hint derived from the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Suggestion {
    /// Exactly 5-3-3-2.
    BalancedNoTrump,
    /// Longest suit has five or more cards.
    LongSuit { suit: Suit, length: u8 },
    /// 20+ high-card points.
    StrongOpening,
    /// 15-19 high-card points.
    OneLevelOpening,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::BalancedNoTrump => {
                write!(f, "5-3-3-2 shape: consider opening 1NT")
            }
            Suggestion::LongSuit { suit, length } => {
                write!(f, "{length} {}: consider opening in this suit", suit.name())
            }
            Suggestion::StrongOpening => {
                write!(f, "20+ HCP: consider 2NT or a strong opening")
            }
            Suggestion::OneLevelOpening => {
                write!(f, "15-19 HCP: consider 1NT or a one-level opening")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiddingOdds {
    pub call: Call,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandAnalysis {
    pub high_card_points: u8,
    pub distribution_points: u8,
    pub suit_lengths: Distribution,
    pub shape: Shape,
    pub suggestions: Vec<Suggestion>,
    pub bidding_probabilities: Vec<BiddingOdds>,
}

impl HandAnalysis {
    pub fn total_points(&self) -> u8 {
        self.high_card_points + self.distribution_points
    }

    pub fn probability_of(&self, call: Call) -> Option<f64> {
        self.bidding_probabilities
            .iter()
            .find(|odds| odds.call == call)
            .map(|odds| odds.probability)
    }
}

/// Shortness points: void 3, singleton 2, doubleton 1.
pub fn distribution_points(suit_lengths: &Distribution) -> u8 {
    Suit::ALL
        .into_iter()
        .map(|suit| match suit_lengths.length(suit) {
            0 => 3,
            1 => 2,
            2 => 1,
            _ => 0,
        })
        .sum()
}

pub fn analyze(hand: &Hand) -> HandAnalysis {
    let high_card_points = hand.hcp();
    let suit_lengths = hand.distribution();
    let distribution_points = distribution_points(&suit_lengths);

    let mut suggestions = Vec::new();
    if suit_lengths.pattern() == [5, 3, 3, 2] {
        suggestions.push(Suggestion::BalancedNoTrump);
    }
    let longest = hand.longest_suit();
    let length = suit_lengths.length(longest);
    if length >= 5 {
        suggestions.push(Suggestion::LongSuit {
            suit: longest,
            length,
        });
    }
    if high_card_points >= 20 {
        suggestions.push(Suggestion::StrongOpening);
    } else if high_card_points >= 15 {
        suggestions.push(Suggestion::OneLevelOpening);
    }

    let bidding_probabilities =
        bidding_probabilities(high_card_points + distribution_points, &suit_lengths);

    HandAnalysis {
        high_card_points,
        distribution_points,
        suit_lengths,
        shape: hand.shape(),
        suggestions,
        bidding_probabilities,
    }
}

fn bidding_probabilities(total_points: u8, suit_lengths: &Distribution) -> Vec<BiddingOdds> {
    let mut odds = vec![
        BiddingOdds {
            call: Call::bid(1, Strain::NoTrump),
            probability: if (15..=17).contains(&total_points) { 0.8 } else { 0.2 },
        },
        BiddingOdds {
            call: Call::Pass,
            probability: if total_points < 12 { 0.9 } else { 0.1 },
        },
    ];
    for suit in Suit::ALL {
        let length = suit_lengths.length(suit);
        if length >= 5 {
            let probability = (0.6 + f64::from(length - 5) * 0.1).min(0.9);
            odds.push(BiddingOdds {
                call: Call::bid(1, Strain::from_suit(suit)),
                probability,
            });
        }
    }
    odds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points() {
        // 5-3-3-2: one doubleton.
        let analysis = analyze(&Hand::parse("AK.QJ2.K32.AQ432"));
        assert_eq!(analysis.high_card_points, 4 + 3 + 2 + 1 + 3 + 4 + 2);
        assert_eq!(analysis.high_card_points, 19);
        assert_eq!(analysis.distribution_points, 1);
        assert_eq!(analysis.total_points(), 20);
        assert_eq!(analysis.shape, Shape::Balanced);
    }

    #[test]
    fn test_distribution_points_void_and_singleton() {
        // Clubs void, diamonds singleton, hearts doubleton.
        let analysis = analyze(&Hand::parse(".2.32.AKQJT9876"));
        assert_eq!(analysis.distribution_points, 3 + 2 + 1);
        assert_eq!(analysis.suit_lengths.spades, 9);
    }

    #[test]
    fn test_suggestions_balanced_five_card_suit() {
        let analysis = analyze(&Hand::parse("AK.QJ2.K32.AQ432"));
        assert_eq!(
            analysis.suggestions,
            vec![
                Suggestion::BalancedNoTrump,
                Suggestion::LongSuit {
                    suit: Suit::Spades,
                    length: 5
                },
                Suggestion::OneLevelOpening,
            ]
        );
    }

    #[test]
    fn test_suggestions_one_level() {
        // 15 HCP, 4-4-3-2.
        let analysis = analyze(&Hand::parse("A2.KQ3.AJ32.J432"));
        assert_eq!(analysis.high_card_points, 15);
        assert_eq!(analysis.suggestions, vec![Suggestion::OneLevelOpening]);
    }

    #[test]
    fn test_strong_opening() {
        let analysis = analyze(&Hand::parse("AK2.AQ3.KQJ2.K32"));
        assert_eq!(analysis.high_card_points, 22);
        assert_eq!(analysis.suggestions, vec![Suggestion::StrongOpening]);
    }

    #[test]
    fn test_weak_hand_has_no_suggestions() {
        let analysis = analyze(&Hand::parse("5432.432.432.432"));
        assert!(analysis.suggestions.is_empty());
        assert_eq!(analysis.probability_of(Call::Pass), Some(0.9));
        assert_eq!(analysis.probability_of(Call::bid(1, Strain::NoTrump)), Some(0.2));
    }

    #[test]
    fn test_bidding_probabilities() {
        // 10 HCP plus three doubletons; seven hearts.
        let analysis = analyze(&Hand::parse("A2.K3.QJ65432.32"));
        assert_eq!(analysis.total_points(), 10 + 1 + 1 + 1);
        assert_eq!(analysis.probability_of(Call::Pass), Some(0.1));
        let hearts = analysis
            .probability_of(Call::bid(1, Strain::Hearts))
            .unwrap();
        assert!((hearts - 0.8).abs() < 1e-9);
        assert_eq!(analysis.probability_of(Call::bid(1, Strain::Spades)), None);
    }

    #[test]
    fn test_long_suit_probability_is_capped() {
        let analysis = analyze(&Hand::parse("..2.AKQJT98765"));
        let spades = analysis
            .probability_of(Call::bid(1, Strain::Spades))
            .unwrap();
        assert!((spades - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_suggestion_text() {
        let text = Suggestion::LongSuit {
            suit: Suit::Hearts,
            length: 6,
        }
        .to_string();
        assert_eq!(text, "6 Hearts: consider opening in this suit");
    }
}
