pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod hand;
pub mod board;
pub mod call;
pub mod contract;
pub mod deck;
pub mod auction;
pub mod error;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use hand::Hand;
pub use board::{Board, Partnership, Position, Vulnerability};
pub use call::Call;
pub use contract::{Contract, DoubleStatus};
pub use deck::Deck;
pub use auction::{Auction, AuctionState};
pub use error::{AuctionError, BoardError, DeckError, IllegalCallReason, ParseError};
