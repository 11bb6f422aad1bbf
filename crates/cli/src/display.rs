use engine::analysis::HandAnalysis;
use std::collections::HashMap;
use types::board::Position;
use types::hand::Hand;
use types::suit::Suit;

/// One line per suit, spades first, e.g. `"S: AKQ"` or `"H: -"`.
pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    let mut hand = hand.clone();
    hand.sort();

    let mut suits = Vec::new();
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let cards: String = hand
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.to_char())
            .collect();
        suits.push(format!(
            "{}: {}",
            suit.to_char(),
            if cards.is_empty() { "-" } else { &cards }
        ));
    }
    suits
}

/// Compass diagram: North on top, West and East side by side, South below.
pub fn format_hands_table(hands: &HashMap<Position, Hand>) -> String {
    let empty = vec!["-".to_string(); 4];
    let suits = |pos: Position| hands.get(&pos).map(get_hand_suits).unwrap_or(empty.clone());
    let (n, e, s, w) = (
        suits(Position::North),
        suits(Position::East),
        suits(Position::South),
        suits(Position::West),
    );

    let indent = " ".repeat(8);
    let mut out = format!("{indent}North\n");
    for line in &n {
        out.push_str(&format!("{indent}{line}\n"));
    }
    out.push('\n');

    out.push_str(&format!("{:<20} East\n", "West"));
    for (west, east) in w.iter().zip(&e) {
        out.push_str(&format!("{west:<20} {east}\n"));
    }
    out.push('\n');

    out.push_str(&format!("{indent}South\n"));
    for line in &s {
        out.push_str(&format!("{indent}{line}\n"));
    }
    out
}

pub fn format_analysis(position: Position, analysis: &HandAnalysis) -> String {
    let lengths = &analysis.suit_lengths;
    let mut out = format!(
        "{}: {} HCP + {} distribution = {} ({}-{}-{}-{}, {:?})\n",
        position.name(),
        analysis.high_card_points,
        analysis.distribution_points,
        analysis.total_points(),
        lengths.spades,
        lengths.hearts,
        lengths.diamonds,
        lengths.clubs,
        analysis.shape,
    );
    for suggestion in &analysis.suggestions {
        out.push_str(&format!("  - {suggestion}\n"));
    }
    for odds in &analysis.bidding_probabilities {
        out.push_str(&format!(
            "  {:>3} {:.0}%\n",
            odds.call.to_string(),
            odds.probability * 100.0
        ));
    }
    out
}
