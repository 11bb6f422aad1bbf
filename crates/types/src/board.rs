use crate::card::Card;
use crate::error::{BoardError, ParseError};
use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A seat at the table. `next()` rotates clockwise:
/// South → West → North → East → South.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    North,
    East,
    #[default]
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub const ALL: [Partnership; 2] = [Partnership::NS, Partnership::EW];

    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl fmt::Display for Partnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partnership::NS => write!(f, "NS"),
            Partnership::EW => write!(f, "EW"),
        }
    }
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Position::North => Position::East,
            Position::East => Position::South,
            Position::South => Position::West,
            Position::West => Position::North,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Position::North => 0,
            Position::East => 1,
            Position::South => 2,
            Position::West => 3,
        }
    }

    pub fn partner(self) -> Self {
        match self {
            Position::North => Position::South,
            Position::South => Position::North,
            Position::East => Position::West,
            Position::West => Position::East,
        }
    }

    /// Left-hand opponent (next to act).
    pub fn lho(self) -> Self {
        self.next()
    }

    pub fn is_opponent_of(self, other: Position) -> bool {
        self.partnership() != other.partnership()
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Position::North => "North",
            Position::East => "East",
            Position::South => "South",
            Position::West => "West",
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Position::ALL[index as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Position::from_char(c),
            _ => Position::ALL
                .into_iter()
                .find(|p| p.name().eq_ignore_ascii_case(trimmed)),
        }
        .ok_or_else(|| ParseError::Position(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, pos: Position) -> bool {
        self.is_side_vulnerable(pos.partnership())
    }

    pub fn is_side_vulnerable(self, partnership: Partnership) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => partnership == Partnership::NS,
            Vulnerability::EW => partnership == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    pub fn from_board_number(board_number: u32) -> Self {
        // Standard 16-board duplicate cycle.
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }
}

impl FromStr for Vulnerability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "-" | "O" => Ok(Vulnerability::None),
            "NS" | "N-S" | "NORTHSOUTH" => Ok(Vulnerability::NS),
            "EW" | "E-W" | "EASTWEST" => Ok(Vulnerability::EW),
            "BOTH" | "ALL" | "B" => Ok(Vulnerability::Both),
            _ => Err(ParseError::Vulnerability(s.to_string())),
        }
    }
}

/// Four hands dealt from one deck, plus the board conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub hands: HashMap<Position, Hand>,
}

impl Board {
    pub fn new(
        dealer: Position,
        vulnerability: Vulnerability,
        hands: HashMap<Position, Hand>,
    ) -> Self {
        Self {
            dealer,
            vulnerability,
            hands,
        }
    }

    pub fn get_hand(&self, pos: Position) -> Option<&Hand> {
        self.hands.get(&pos)
    }

    /// Checks that every seat holds 13 cards and no card appears twice,
    /// which together mean the hands cover the whole deck.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen: HashMap<Card, Position> = HashMap::with_capacity(52);
        for seat in Position::ALL {
            let hand = self.get_hand(seat).ok_or(BoardError::MissingHand(seat))?;
            if hand.len() != 13 {
                return Err(BoardError::WrongHandSize {
                    seat,
                    len: hand.len(),
                });
            }
            for &card in &hand.cards {
                if let Some(&first) = seen.get(&card) {
                    return Err(BoardError::DuplicateCard {
                        card,
                        first,
                        second: seat,
                    });
                }
                seen.insert(card, seat);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_rotation() {
        assert_eq!(Position::South.next(), Position::West);
        assert_eq!(Position::West.next(), Position::North);
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::East.next(), Position::South);
    }

    #[test]
    fn test_lho_and_opponents() {
        assert_eq!(Position::South.lho(), Position::West);
        assert!(Position::South.is_opponent_of(Position::East));
        assert!(!Position::South.is_opponent_of(Position::North));
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::NS.is_vulnerable(Position::North));
        assert!(!Vulnerability::NS.is_vulnerable(Position::East));
        assert!(Vulnerability::EW.is_side_vulnerable(Partnership::EW));
        assert!(Vulnerability::Both.is_vulnerable(Position::West));
        assert!(!Vulnerability::None.is_vulnerable(Position::South));
    }

    #[test]
    fn test_board_number_cycle() {
        assert_eq!(Vulnerability::from_board_number(1), Vulnerability::None);
        assert_eq!(Vulnerability::from_board_number(2), Vulnerability::NS);
        assert_eq!(Vulnerability::from_board_number(3), Vulnerability::EW);
        assert_eq!(Vulnerability::from_board_number(4), Vulnerability::Both);
        assert_eq!(Vulnerability::from_board_number(16), Vulnerability::EW);
        assert_eq!(Position::dealer_from_board_number(1), Position::North);
        assert_eq!(Position::dealer_from_board_number(3), Position::South);
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("S".parse::<Position>().unwrap(), Position::South);
        assert_eq!("west".parse::<Position>().unwrap(), Position::West);
        assert!("X".parse::<Position>().is_err());
        assert_eq!("ns".parse::<Vulnerability>().unwrap(), Vulnerability::NS);
        assert!("sideways".parse::<Vulnerability>().is_err());
    }

    #[test]
    fn test_partnership() {
        assert_eq!(Position::North.partnership(), Partnership::NS);
        assert_eq!(Position::West.partnership(), Partnership::EW);
        assert!(Partnership::NS.contains(Position::South));
        assert!(!Partnership::NS.contains(Position::East));
        assert_eq!(Partnership::NS.opponent(), Partnership::EW);
    }

    fn suited_hands() -> HashMap<Position, Hand> {
        HashMap::from([
            (Position::North, Hand::parse("...AKQJT98765432")),
            (Position::East, Hand::parse("..AKQJT98765432.")),
            (Position::South, Hand::parse(".AKQJT98765432..")),
            (Position::West, Hand::parse("AKQJT98765432...")),
        ])
    }

    #[test]
    fn test_validate_full_deal() {
        let board = Board::new(Position::South, Vulnerability::None, suited_hands());
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_short_and_missing_hands() {
        let mut hands = suited_hands();
        hands.insert(Position::East, Hand::parse("..AKQJT9876543."));
        let board = Board::new(Position::South, Vulnerability::None, hands.clone());
        assert_eq!(
            board.validate(),
            Err(BoardError::WrongHandSize {
                seat: Position::East,
                len: 12
            })
        );

        hands.remove(&Position::West);
        let board = Board::new(Position::South, Vulnerability::None, hands);
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_validate_names_duplicate_card() {
        let mut hands = suited_hands();
        // Every seat holds the same hand with the bad character dropped.
        for seat in Position::ALL {
            hands.insert(seat, Hand::parse("AZ...KQJT98765432"));
        }
        let board = Board::new(Position::South, Vulnerability::None, hands);
        let err = board.validate().unwrap_err();
        assert_eq!(
            err,
            BoardError::DuplicateCard {
                card: Card::new(crate::suit::Suit::Clubs, crate::rank::Rank::Ace),
                first: Position::North,
                second: Position::East,
            }
        );
        assert_eq!(err.to_string(), "AC dealt to both North and East");
    }

    #[test]
    fn test_board_json_keys_hands_by_seat() {
        let hands = HashMap::from([(Position::North, Hand::parse("...A"))]);
        let board = Board::new(Position::North, Vulnerability::Both, hands);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["dealer"], "North");
        assert_eq!(json["vulnerability"], "Both");
        assert_eq!(json["hands"]["North"]["cards"][0]["rank"], "Ace");
    }
}
