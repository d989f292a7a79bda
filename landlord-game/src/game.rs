//! Match loop: seating, rounds, elimination and winner selection.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::config::{MatchConfig, MatchConfigError};
use crate::player::{Movement, Player, PlayerId};
use crate::rng::{RandomSource, RngBundle};
use crate::strategy::Strategy;
use crate::table::{Table, TableError, Transaction};

/// Seat order; four players fit inline.
pub type Seats = SmallVec<[PlayerId; 4]>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid match configuration: {0}")]
    Config(#[from] MatchConfigError),
    #[error("board setup failed: {0}")]
    Board(#[from] BoardError),
    #[error("table invariant violated: {0}")]
    Table(#[from] TableError),
    #[error("board has {board} cells but the config expects {configured}")]
    BoardSizeMismatch { board: usize, configured: usize },
    #[error("match already ended after {rounds} rounds")]
    AlreadyEnded { rounds: u32 },
    #[error("{0} is seated more than once")]
    DuplicateSeat(PlayerId),
    #[error("{0} is active but has no seat")]
    UnseatedPlayer(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Running,
    EndedByElimination,
    EndedByTimeout,
}

impl MatchPhase {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// One player's turn within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub strategy: Strategy,
    pub roll: u8,
    pub movement: Movement,
    pub coin_flip: Option<bool>,
    pub wanted_to_buy: bool,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// One-based number of the round just played.
    pub round: u32,
    pub turns: Vec<TurnRecord>,
    pub eliminated: Seats,
    pub phase: MatchPhase,
}

/// Final position of one player when the match stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub strategy: Strategy,
    /// Zero-based seat in the shuffled turn order.
    pub seat: usize,
    pub balance: i64,
    pub active: bool,
    pub properties: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub rounds: u32,
    pub end: MatchPhase,
    /// `None` only when every player was eliminated.
    pub winner: Option<Strategy>,
    pub standings: Vec<Standing>,
}

impl MatchOutcome {
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        self.winner.map(Strategy::label)
    }

    #[must_use]
    pub const fn timed_out(&self) -> bool {
        matches!(self.end, MatchPhase::EndedByTimeout)
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    table: Table,
    initial_seats: Seats,
    seats: Seats,
    round: u32,
    phase: MatchPhase,
}

impl Match {
    /// Seat one player per strategy in random order on a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::Config` when the configuration fails validation.
    pub fn new<R: RandomSource + ?Sized>(config: MatchConfig, rng: &mut R) -> Result<Self, MatchError> {
        config.validate()?;
        let players: Vec<Player> = Strategy::ALL
            .iter()
            .enumerate()
            .map(|(idx, &strategy)| Player::new(PlayerId(idx), strategy, config.starting_balance))
            .collect();
        let mut seats: Seats = players.iter().map(|p| p.id).collect();
        rng.shuffle_seats(&mut seats);
        let board = Board::generate(config.board_size, config.sale_cost, config.rent_value, rng)?;
        Self::with_table(config, Table::new(board, players), seats)
    }

    /// Build a match around an explicit table and seat order.
    ///
    /// # Errors
    ///
    /// Returns an error when the config is invalid or the board size disagrees
    /// with the config. The seats must name every active player exactly once;
    /// unknown, repeated and missing players are rejected.
    pub fn with_table(config: MatchConfig, table: Table, seats: Seats) -> Result<Self, MatchError> {
        config.validate()?;
        if table.board().len() != config.board_size {
            return Err(MatchError::BoardSizeMismatch {
                board: table.board().len(),
                configured: config.board_size,
            });
        }
        let mut seated = BTreeSet::new();
        for &seat in &seats {
            table.player(seat)?;
            if !seated.insert(seat) {
                return Err(MatchError::DuplicateSeat(seat));
            }
        }
        if let Some(missing) = table.active_players().find(|p| !seated.contains(&p.id)) {
            return Err(MatchError::UnseatedPlayer(missing.id));
        }
        let mut game = Self {
            config,
            table,
            initial_seats: seats.clone(),
            seats,
            round: 0,
            phase: MatchPhase::Running,
        };
        game.seats.retain(|id| game.table.players()[id.0].is_active());
        Ok(game)
    }

    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Active players in turn order.
    #[must_use]
    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    /// Play one round: every still-active player, in seat order, takes one turn.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::AlreadyEnded` once the match is over, and a table
    /// error if an invariant of the board or roster is broken.
    pub fn play_round<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<RoundReport, MatchError> {
        if self.phase.is_over() {
            return Err(MatchError::AlreadyEnded { rounds: self.round });
        }

        let order = self.seats.clone();
        let mut turns = Vec::with_capacity(order.len());
        let mut eliminated = Seats::new();
        for id in order {
            if !self.table.player(id)?.is_active() {
                continue;
            }
            let turn = self.take_turn(id, rng)?;
            if turn.transaction.bankrupt {
                self.seats.retain(|seat| *seat != id);
                eliminated.push(id);
                log::debug!(
                    "round {}: {} ({}) eliminated",
                    self.round + 1,
                    id,
                    turn.strategy
                );
            }
            turns.push(turn);
        }

        self.round += 1;
        self.phase = self.next_phase();
        if self.phase.is_over() {
            log::debug!("match ended after {} rounds: {:?}", self.round, self.phase);
        }
        Ok(RoundReport {
            round: self.round,
            turns,
            eliminated,
            phase: self.phase,
        })
    }

    fn take_turn<R: RandomSource + ?Sized>(
        &mut self,
        id: PlayerId,
        rng: &mut R,
    ) -> Result<TurnRecord, MatchError> {
        let roll = rng.roll_die(self.config.die_faces);
        let board_size = self.table.board().len();
        let lap_bonus = self.config.lap_bonus;
        let player = self.table.player_mut(id)?;
        let strategy = player.strategy;
        let movement = player.advance(roll, board_size, lap_bonus);
        let balance = player.balance();

        let property = *self.table.board().property_at(movement.to)?;
        let coin_flip = strategy.needs_coin().then(|| rng.coin_flip());
        let wanted_to_buy = strategy.decide(
            balance,
            &property,
            coin_flip.unwrap_or(false),
            &self.config.rules,
        );
        let transaction = self
            .table
            .purchase_or_rent(id, movement.to, wanted_to_buy)?;
        log::trace!("{id} ({strategy}) rolled {roll}: {:?}", transaction.kind);

        Ok(TurnRecord {
            player: id,
            strategy,
            roll,
            movement,
            coin_flip,
            wanted_to_buy,
            transaction,
        })
    }

    fn next_phase(&self) -> MatchPhase {
        if self.table.active_count() < 2 {
            MatchPhase::EndedByElimination
        } else if self.round >= self.config.round_cap {
            MatchPhase::EndedByTimeout
        } else {
            MatchPhase::Running
        }
    }

    /// Drive rounds until the match ends.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Match::play_round`].
    pub fn run<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> Result<MatchOutcome, MatchError> {
        while !self.phase.is_over() {
            self.play_round(rng)?;
        }
        Ok(self.outcome())
    }

    /// Current winner: the sole survivor, or the richest survivor with ties
    /// going to the earliest seat in turn order.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let survivors = self
            .seats
            .iter()
            .filter_map(|&id| self.table.player(id).ok())
            .filter(|p| p.is_active());
        let mut best: Option<&Player> = None;
        for player in survivors {
            if best.is_none_or(|b| player.balance() > b.balance()) {
                best = Some(player);
            }
        }
        best.map(|p| p.id)
    }

    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.initial_seats
            .iter()
            .enumerate()
            .filter_map(|(seat, &id)| {
                self.table.player(id).ok().map(|p| Standing {
                    player: id,
                    strategy: p.strategy,
                    seat,
                    balance: p.balance(),
                    active: p.is_active(),
                    properties: p.owned().len(),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn outcome(&self) -> MatchOutcome {
        let winner = self
            .winner()
            .and_then(|id| self.table.player(id).ok())
            .map(|p| p.strategy);
        MatchOutcome {
            rounds: self.round,
            end: self.phase,
            winner,
            standings: self.standings(),
        }
    }
}

/// Run one match from a user-visible seed.
///
/// # Errors
///
/// Returns `MatchError::Config` for an invalid configuration.
pub fn run_match(config: &MatchConfig, seed: u64) -> Result<MatchOutcome, MatchError> {
    let mut rng = RngBundle::from_user_seed(seed);
    run_match_with(config, &mut rng)
}

/// Run one match drawing from any injected source.
///
/// # Errors
///
/// Returns `MatchError::Config` for an invalid configuration.
pub fn run_match_with<R: RandomSource + ?Sized>(
    config: &MatchConfig,
    rng: &mut R,
) -> Result<MatchOutcome, MatchError> {
    Match::new(config.clone(), rng)?.run(rng)
}
