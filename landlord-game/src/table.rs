//! Per-match arena holding the board and the players.
//!
//! Every transaction that touches both sides of the property/owner relation
//! goes through [`Table`] so `Property::owner` and each player's owned set
//! never disagree.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::player::{Player, PlayerId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("no player {0} at this table")]
    UnknownPlayer(PlayerId),
}

/// What happened when a player resolved the property it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    Purchased { cost: u32 },
    RentPaid { landlord: PlayerId, amount: u32 },
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub player: PlayerId,
    pub position: usize,
    pub kind: TransactionKind,
    /// The player ended the transaction with a negative balance and was removed.
    pub bankrupt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    board: Board,
    players: Vec<Player>,
}

impl Table {
    #[must_use]
    pub const fn new(board: Board, players: Vec<Player>) -> Self {
        Self { board, players }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// # Errors
    ///
    /// Returns `TableError::UnknownPlayer` for an id not seated at this table.
    pub fn player(&self, id: PlayerId) -> Result<&Player, TableError> {
        self.players.get(id.0).ok_or(TableError::UnknownPlayer(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, TableError> {
        self.players
            .get_mut(id.0)
            .ok_or(TableError::UnknownPlayer(id))
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Transfer the rent of the property at `position` from `payer` to `landlord`.
    ///
    /// No balance floor is enforced here; bankruptcy is settled by
    /// [`Table::purchase_or_rent`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player or an off-board position.
    pub fn pay_rent(
        &mut self,
        payer: PlayerId,
        landlord: PlayerId,
        position: usize,
    ) -> Result<u32, TableError> {
        let rent = self.board.property_at(position)?.rent_value;
        if payer == landlord {
            return Ok(0);
        }
        self.player(landlord)?;
        self.player_mut(payer)?.debit(i64::from(rent));
        self.player_mut(landlord)?.credit(i64::from(rent));
        Ok(rent)
    }

    /// Resolve a landing: buy when `should_buy`, otherwise pay rent to the
    /// owner if there is one. A purchase or rent payment that leaves the
    /// player below zero deactivates it and releases all its holdings.
    ///
    /// A purchase request for a property that is already owned falls through
    /// to the rent branch; ownership never moves between players.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player or an off-board position.
    pub fn purchase_or_rent(
        &mut self,
        player: PlayerId,
        position: usize,
        should_buy: bool,
    ) -> Result<Transaction, TableError> {
        let property = *self.board.property_at(position)?;
        self.player(player)?;

        let kind = match property.owner {
            None if should_buy => {
                self.player_mut(player)?
                    .debit(i64::from(property.sale_cost));
                self.board.property_at_mut(position)?.owner = Some(player);
                self.player_mut(player)?.acquire(position);
                TransactionKind::Purchased {
                    cost: property.sale_cost,
                }
            }
            Some(landlord) if landlord != player => {
                let amount = self.pay_rent(player, landlord, position)?;
                TransactionKind::RentPaid { landlord, amount }
            }
            _ => {
                return Ok(Transaction {
                    player,
                    position,
                    kind: TransactionKind::Declined,
                    bankrupt: false,
                });
            }
        };

        let bankrupt = self.player(player)?.balance() < 0;
        if bankrupt {
            self.release_holdings(player)?;
        }
        Ok(Transaction {
            player,
            position,
            kind,
            bankrupt,
        })
    }

    /// Deactivate `player` and clear the owner of everything it held.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player.
    pub fn release_holdings(&mut self, player: PlayerId) -> Result<usize, TableError> {
        let released = self.player_mut(player)?.deactivate();
        for &position in &released {
            self.board.property_at_mut(position)?.owner = None;
        }
        log::debug!(
            "{player} went bankrupt; released {} properties",
            released.len()
        );
        Ok(released.len())
    }

    /// Checks both directions of the ownership relation and that inactive
    /// players hold nothing.
    #[must_use]
    pub fn ownership_consistent(&self) -> bool {
        let owners_valid = self.board.iter().enumerate().all(|(position, property)| {
            property.owner.is_none_or(|owner| {
                self.players
                    .get(owner.0)
                    .is_some_and(|p| p.is_active() && p.owns(position))
            })
        });
        let holdings_valid = self.players.iter().all(|player| {
            (player.is_active() || player.owned().is_empty())
                && player.owned().iter().all(|&position| {
                    self.board
                        .property_at(position)
                        .is_ok_and(|property| property.is_owned_by(player.id))
                })
        });
        owners_valid && holdings_valid
    }

    /// Positions are always inside the board.
    #[must_use]
    pub fn positions_in_bounds(&self) -> bool {
        let size = self.board.len();
        self.players.iter().all(|p| p.position() < size)
    }

    #[cfg(test)]
    pub(crate) fn player_for_test(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0]
    }
}
