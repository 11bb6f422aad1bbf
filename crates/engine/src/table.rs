use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::auction::{Auction, AuctionState};
use types::board::{Board, Partnership, Position, Vulnerability};
use types::call::Call;
use types::card::Card;
use types::contract::Contract;
use types::deck::Deck;
use types::error::{AuctionError, BoardError, DeckError};

use crate::config::TableConfig;
use crate::play::{PlayError, PlayOutcome, TrickValidator};
use crate::scoring::{self, Score, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Bidding,
    Playing,
    Complete,
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("cannot {action} during {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    Play(#[from] PlayError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Summary of one finished board. Passed-out boards have no contract and no score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub number: u32,
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub calls: Vec<Call>,
    pub contract: Option<Contract>,
    pub declarer_tricks: Option<u8>,
    pub score: Option<Score>,
}

impl BoardRecord {
    /// Signed score for `partnership`; zero for a passed-out board.
    pub fn net_for(&self, partnership: Partnership) -> i32 {
        self.score.map_or(0, |score| score.net_for(partnership))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TableEvent {
    Dealt {
        board: u32,
        dealer: Position,
        vulnerability: Vulnerability,
    },
    Call {
        board: u32,
        seat: Position,
        call: Call,
    },
    ContractSet {
        board: u32,
        contract: Contract,
    },
    PassedOut {
        board: u32,
    },
    Play {
        board: u32,
        seat: Position,
        card: Card,
    },
    TrickWon {
        board: u32,
        winner: Position,
        trick: u8,
    },
    Claim {
        board: u32,
        declarer_tricks: u8,
    },
    Scored {
        board: u32,
        score: Score,
    },
}

/// Results for the boards one seat declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeatStatistics {
    pub boards_declared: u32,
    pub contracts_made: u32,
    pub contracts_defeated: u32,
    pub slams_bid: u32,
    pub slams_made: u32,
    /// Mean signed score for the declaring side.
    pub average_score: f64,
}

#[derive(Debug, Clone)]
struct CurrentBoard {
    number: u32,
    board: Board,
    auction: Auction,
    play: Option<TrickValidator>,
    finished: bool,
}

/// One table playing a sequence of boards, keeping the running totals.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    rng: StdRng,
    next_board: u32,
    current: Option<CurrentBoard>,
    totals: [i32; 2],
    history: Vec<BoardRecord>,
    events: Vec<TableEvent>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            next_board: config.first_board,
            config,
            rng,
            current: None,
            totals: [0; 2],
            history: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match &self.current {
            None => Phase::Idle,
            Some(current) if current.finished => Phase::Complete,
            Some(current) if current.play.is_some() => Phase::Playing,
            Some(_) => Phase::Bidding,
        }
    }

    /// Number the next `deal` or `start` will use.
    pub fn next_board_number(&self) -> u32 {
        self.next_board
    }

    /// Number of the board in progress, if any.
    pub fn board_number(&self) -> Option<u32> {
        self.current.as_ref().map(|current| current.number)
    }

    pub fn board(&self) -> Option<&Board> {
        self.current.as_ref().map(|current| &current.board)
    }

    pub fn auction(&self) -> Option<&Auction> {
        self.current.as_ref().map(|current| &current.auction)
    }

    pub fn trick_play(&self) -> Option<&TrickValidator> {
        self.current.as_ref().and_then(|current| current.play.as_ref())
    }

    /// Seat expected to act next, in either the auction or the play.
    pub fn turn(&self) -> Option<Position> {
        let current = self.current.as_ref()?;
        if current.finished {
            return None;
        }
        match &current.play {
            Some(play) => play.turn(),
            None => current.auction.turn(),
        }
    }

    pub fn total(&self, partnership: Partnership) -> i32 {
        self.totals[partnership.idx()]
    }

    pub fn history(&self) -> &[BoardRecord] {
        &self.history
    }

    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    fn require(&self, action: &'static str, allowed: &[Phase]) -> Result<(), TableError> {
        let phase = self.phase();
        if allowed.contains(&phase) {
            Ok(())
        } else {
            Err(TableError::WrongPhase { action, phase })
        }
    }

    /// Shuffles and deals the next board.
    pub fn deal(&mut self) -> Result<&Board, TableError> {
        self.require("deal", &[Phase::Idle, Phase::Complete])?;
        let number = self.next_board;
        let vulnerability = self.config.vulnerability.for_board(number);
        let board = Deck::shuffled(&mut self.rng).deal_board(self.config.dealer, vulnerability)?;
        self.start(board)
    }

    /// Starts the next board with hands supplied by the caller. The hands
    /// must be a complete deal of one deck; nothing changes if they are not.
    pub fn start(&mut self, board: Board) -> Result<&Board, TableError> {
        self.require("deal", &[Phase::Idle, Phase::Complete])?;
        board.validate()?;
        let number = self.next_board;
        self.next_board += 1;
        log::info!(
            "board {number}: dealer {}, vulnerability {:?}",
            board.dealer,
            board.vulnerability
        );
        self.events.push(TableEvent::Dealt {
            board: number,
            dealer: board.dealer,
            vulnerability: board.vulnerability,
        });
        let current = self.current.insert(CurrentBoard {
            number,
            auction: Auction::new(board.dealer),
            board,
            play: None,
            finished: false,
        });
        Ok(&current.board)
    }

    pub fn call(&mut self, seat: Position, call: Call) -> Result<AuctionState, TableError> {
        self.require("call", &[Phase::Bidding])?;
        let Some(current) = self.current.as_mut() else {
            return Err(TableError::WrongPhase {
                action: "call",
                phase: Phase::Idle,
            });
        };
        let state = current.auction.submit_call(seat, call)?;
        let number = current.number;
        self.events.push(TableEvent::Call {
            board: number,
            seat,
            call,
        });

        match state {
            AuctionState::AwaitingCall(_) => {}
            AuctionState::ContractSet(contract) => {
                self.events.push(TableEvent::ContractSet {
                    board: number,
                    contract,
                });
                current.play = Some(TrickValidator::from_board(contract, &current.board));
            }
            AuctionState::PassedOut => {
                self.events.push(TableEvent::PassedOut { board: number });
                current.finished = true;
                self.history.push(BoardRecord {
                    number,
                    dealer: current.board.dealer,
                    vulnerability: current.board.vulnerability,
                    calls: current.auction.calls().to_vec(),
                    contract: None,
                    declarer_tricks: None,
                    score: None,
                });
            }
        }
        Ok(state)
    }

    fn validator_mut(&mut self, action: &'static str) -> Result<&mut TrickValidator, TableError> {
        self.require(action, &[Phase::Playing])?;
        self.current
            .as_mut()
            .and_then(|current| current.play.as_mut())
            .ok_or(TableError::WrongPhase {
                action,
                phase: Phase::Idle,
            })
    }

    pub fn play(&mut self, seat: Position, card: Card) -> Result<PlayOutcome, TableError> {
        let outcome = self.validator_mut("play")?.play(seat, card)?;
        let number = self.board_number().unwrap_or_default();
        self.events.push(TableEvent::Play {
            board: number,
            seat,
            card,
        });
        match outcome {
            PlayOutcome::Accepted => {}
            PlayOutcome::TrickComplete { winner, trick } => {
                self.events.push(TableEvent::TrickWon {
                    board: number,
                    winner,
                    trick,
                });
            }
            PlayOutcome::PlayComplete { winner, .. } => {
                self.events.push(TableEvent::TrickWon {
                    board: number,
                    winner,
                    trick: crate::play::TRICKS_PER_BOARD,
                });
                self.finish_board()?;
            }
        }
        Ok(outcome)
    }

    /// Ends play with `declarer_tricks` credited to the declaring side.
    pub fn claim(&mut self, declarer_tricks: u8) -> Result<Score, TableError> {
        self.validator_mut("claim")?.claim(declarer_tricks)?;
        let number = self.board_number().unwrap_or_default();
        self.events.push(TableEvent::Claim {
            board: number,
            declarer_tricks,
        });
        self.finish_board()
    }

    fn finish_board(&mut self) -> Result<Score, TableError> {
        let Some(current) = self.current.as_mut() else {
            return Err(TableError::WrongPhase {
                action: "score",
                phase: Phase::Idle,
            });
        };
        let Some(play) = current.play.as_ref() else {
            return Err(TableError::WrongPhase {
                action: "score",
                phase: Phase::Bidding,
            });
        };
        let contract = *play.contract();
        let tricks = play.declarer_tricks();
        let score = scoring::score(&contract, tricks, current.board.vulnerability)?;

        current.finished = true;
        self.totals[score.partnership.idx()] += score.points;
        log::info!(
            "board {} scored: {contract} took {tricks}, {} to {}",
            current.number,
            score.points,
            score.partnership
        );
        self.events.push(TableEvent::Scored {
            board: current.number,
            score,
        });
        self.history.push(BoardRecord {
            number: current.number,
            dealer: current.board.dealer,
            vulnerability: current.board.vulnerability,
            calls: current.auction.calls().to_vec(),
            contract: Some(contract),
            declarer_tricks: Some(tricks),
            score: Some(score),
        });
        Ok(score)
    }

    /// Aggregates the finished boards `position` declared.
    pub fn statistics(&self, position: Position) -> SeatStatistics {
        let mut stats = SeatStatistics::default();
        let mut total = 0i64;
        for record in &self.history {
            let (Some(contract), Some(score)) = (record.contract, record.score) else {
                continue;
            };
            if contract.declarer != position {
                continue;
            }
            stats.boards_declared += 1;
            if score.made() {
                stats.contracts_made += 1;
            } else {
                stats.contracts_defeated += 1;
            }
            if contract.is_slam() {
                stats.slams_bid += 1;
                if score.made() {
                    stats.slams_made += 1;
                }
            }
            total += i64::from(score.net_for(position.partnership()));
        }
        if stats.boards_declared > 0 {
            stats.average_score = total as f64 / f64::from(stats.boards_declared);
        }
        stats
    }
}
