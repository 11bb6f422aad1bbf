use crate::board::Position;
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::error::{AuctionError, IllegalCallReason};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};

/// The bid currently standing and the seat that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighestBid {
    pub bidder: Position,
    pub level: u8,
    pub strain: Strain,
}

impl HighestBid {
    pub fn call(&self) -> Call {
        Call::bid(self.level, self.strain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionState {
    AwaitingCall(Position),
    ContractSet(Contract),
    /// Four passes and no bid: the board must be redealt.
    PassedOut,
}

impl AuctionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuctionState::AwaitingCall(_))
    }
}

/// Auction state machine. Every call is checked before it is recorded, so
/// the call history is always a legal auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    dealer: Position,
    calls: Vec<Call>,
    highest: Option<HighestBid>,
    double_status: DoubleStatus,
    consecutive_passes: u8,
    state: AuctionState,
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
            highest: None,
            double_status: DoubleStatus::Undoubled,
            consecutive_passes: 0,
            state: AuctionState::AwaitingCall(dealer),
        }
    }

    /// Builds an auction by submitting `calls` in seat order from `dealer`.
    pub fn replay(
        dealer: Position,
        calls: impl IntoIterator<Item = Call>,
    ) -> Result<Self, AuctionError> {
        let mut auction = Self::new(dealer);
        for call in calls {
            let seat = auction.turn().ok_or(IllegalCallReason::AuctionClosed)?;
            auction.submit_call(seat, call)?;
        }
        Ok(auction)
    }

    pub fn dealer(&self) -> Position {
        self.dealer
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Calls paired with the seat that made them.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Call)> {
        let mut p = self.dealer;
        self.calls.iter().map(move |call| {
            let pos = p;
            p = p.next();
            (pos, call)
        })
    }

    pub fn state(&self) -> AuctionState {
        self.state
    }

    /// Seat to call next, `None` once the auction is over.
    pub fn turn(&self) -> Option<Position> {
        match self.state {
            AuctionState::AwaitingCall(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn highest_bid(&self) -> Option<HighestBid> {
        self.highest
    }

    pub fn double_status(&self) -> DoubleStatus {
        self.double_status
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// The terminal outcome: `ContractSet` or `PassedOut`.
    pub fn result(&self) -> Option<AuctionState> {
        self.state.is_terminal().then_some(self.state)
    }

    pub fn final_contract(&self) -> Option<Contract> {
        match self.state {
            AuctionState::ContractSet(contract) => Some(contract),
            _ => None,
        }
    }

    /// Checks `call` from `seat` without recording it.
    pub fn check_call(&self, seat: Position, call: Call) -> Result<(), AuctionError> {
        let AuctionState::AwaitingCall(turn) = self.state else {
            return Err(IllegalCallReason::AuctionClosed.into());
        };
        if seat != turn {
            return Err(AuctionError::OutOfTurn {
                expected: turn,
                actual: seat,
            });
        }
        self.check_rules(seat, call).map_err(AuctionError::IllegalCall)
    }

    pub fn is_legal(&self, seat: Position, call: Call) -> bool {
        self.check_call(seat, call).is_ok()
    }

    fn check_rules(&self, seat: Position, call: Call) -> Result<(), IllegalCallReason> {
        match call {
            Call::Pass => Ok(()),
            Call::Bid { level, .. } => {
                if !(1..=7).contains(&level) {
                    return Err(IllegalCallReason::InvalidLevel(level));
                }
                match self.highest {
                    Some(highest) if !call.outranks(&highest.call()) => {
                        Err(IllegalCallReason::InsufficientBid {
                            bid: call,
                            current: highest.call(),
                        })
                    }
                    _ => Ok(()),
                }
            }
            Call::Double => {
                let highest = self.highest.ok_or(IllegalCallReason::NothingToDouble)?;
                if self.double_status != DoubleStatus::Undoubled {
                    return Err(IllegalCallReason::AlreadyDoubled);
                }
                if !seat.is_opponent_of(highest.bidder) {
                    return Err(IllegalCallReason::DoubleOwnSide);
                }
                Ok(())
            }
            Call::Redouble => {
                let highest = self.highest.ok_or(IllegalCallReason::NothingToRedouble)?;
                match self.double_status {
                    DoubleStatus::Undoubled => Err(IllegalCallReason::NothingToRedouble),
                    DoubleStatus::Redoubled => Err(IllegalCallReason::AlreadyRedoubled),
                    DoubleStatus::Doubled if seat.is_opponent_of(highest.bidder) => {
                        Err(IllegalCallReason::RedoubleOpponents)
                    }
                    DoubleStatus::Doubled => Ok(()),
                }
            }
        }
    }

    /// Records `call` from `seat` and returns the new state. A rejected call
    /// leaves the auction exactly as it was.
    pub fn submit_call(
        &mut self,
        seat: Position,
        call: Call,
    ) -> Result<AuctionState, AuctionError> {
        if let Err(err) = self.check_call(seat, call) {
            log::debug!("rejected {call} from {seat}: {err}");
            return Err(err);
        }

        self.calls.push(call);
        match call {
            Call::Pass => self.consecutive_passes += 1,
            Call::Bid { level, strain } => {
                self.highest = Some(HighestBid {
                    bidder: seat,
                    level,
                    strain,
                });
                self.double_status = DoubleStatus::Undoubled;
                self.consecutive_passes = 0;
            }
            Call::Double => {
                self.double_status = DoubleStatus::Doubled;
                self.consecutive_passes = 0;
            }
            Call::Redouble => {
                self.double_status = DoubleStatus::Redoubled;
                self.consecutive_passes = 0;
            }
        }
        log::debug!("{seat} called {call}");

        self.state = match (self.highest, self.consecutive_passes) {
            (None, 4) => {
                log::info!("auction passed out");
                AuctionState::PassedOut
            }
            (Some(highest), 3) => {
                let contract = Contract {
                    level: highest.level,
                    strain: highest.strain,
                    double_status: self.double_status,
                    declarer: highest.bidder,
                };
                log::info!("contract set: {contract}");
                AuctionState::ContractSet(contract)
            }
            _ => AuctionState::AwaitingCall(seat.next()),
        };
        Ok(self.state)
    }

    /// Every call the seat on turn could legally make.
    pub fn legal_calls(&self) -> Vec<Call> {
        let Some(seat) = self.turn() else {
            return Vec::new();
        };
        let bids = (1..=7u8).flat_map(|level| Strain::ALL.map(|strain| Call::bid(level, strain)));
        std::iter::once(Call::Pass)
            .chain(bids)
            .chain([Call::Double, Call::Redouble])
            .filter(|&call| self.check_rules(seat, call).is_ok())
            .collect()
    }

    /// The cheapest legal bid in `strain`, if any.
    pub fn minimum_bid_in(&self, strain: Strain) -> Option<Call> {
        if self.is_finished() {
            return None;
        }
        let Some(highest) = self.highest else {
            return Some(Call::bid(1, strain));
        };
        let min_level = if strain > highest.strain {
            highest.level
        } else {
            highest.level + 1
        };
        (min_level <= 7).then_some(Call::bid(min_level, strain))
    }
}
