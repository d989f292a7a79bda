//! Player finances, position and holdings.
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

/// Stable index of a player inside a match's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Result of moving a player along the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub from: usize,
    pub to: usize,
    pub steps: u8,
    /// Times the move passed the start of the board.
    pub laps: u32,
    /// Total bonus credited for passing the start of the board.
    pub lap_bonus: i64,
}

impl Movement {
    #[must_use]
    pub const fn wrapped(&self) -> bool {
        self.laps > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub strategy: Strategy,
    balance: i64,
    position: usize,
    active: bool,
    /// Board positions this player owns; mirrors `Property::owner`.
    owned: BTreeSet<usize>,
}

impl Player {
    #[must_use]
    pub const fn new(id: PlayerId, strategy: Strategy, starting_balance: i64) -> Self {
        Self {
            id,
            strategy,
            balance: starting_balance,
            position: 0,
            active: true,
            owned: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn balance(&self) -> i64 {
        self.balance
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn owned(&self) -> &BTreeSet<usize> {
        &self.owned
    }

    #[must_use]
    pub fn owns(&self, position: usize) -> bool {
        self.owned.contains(&position)
    }

    /// Move `steps` cells forward on a board of `board_size` cells.
    ///
    /// Passing the last cell wraps back to the start and credits `lap_bonus`
    /// once per completed lap.
    pub fn advance(&mut self, steps: u8, board_size: usize, lap_bonus: i64) -> Movement {
        let from = self.position;
        let target = from + usize::from(steps);
        let size = board_size.max(1);
        let laps = u32::try_from(target / size).unwrap_or(u32::MAX);
        self.position = target % size;
        let bonus = lap_bonus.saturating_mul(i64::from(laps));
        self.credit(bonus);
        Movement {
            from,
            to: self.position,
            steps,
            laps,
            lap_bonus: bonus,
        }
    }

    pub(crate) fn credit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub(crate) fn debit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_sub(amount);
    }

    pub(crate) fn acquire(&mut self, position: usize) {
        self.owned.insert(position);
    }

    /// Mark the player bankrupt and hand back every owned position.
    pub(crate) fn deactivate(&mut self) -> BTreeSet<usize> {
        self.active = false;
        std::mem::take(&mut self.owned)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: usize, balance: i64) {
        self.position = position;
        self.balance = balance;
    }
}
