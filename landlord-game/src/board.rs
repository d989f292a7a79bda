//! The ring of properties players travel around.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ValueRange;
use crate::player::PlayerId;
use crate::property::Property;
use crate::rng::RandomSource;

/// Errors raised while building or indexing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board position {position} is outside 0..{size}")]
    InvalidPosition { position: usize, size: usize },
    #[error("board must contain at least one property")]
    EmptyBoard,
    #[error("property value range invalid (min {min}, max {max})")]
    InvalidRange { min: u32, max: u32 },
}

/// Fixed-length sequence of properties, generated once per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    properties: Vec<Property>,
}

impl Board {
    /// Generate `size` properties with cost and rent drawn from the closed ranges.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::EmptyBoard` for a zero size and
    /// `BoardError::InvalidRange` when either range is empty or starts at zero.
    pub fn generate<R: RandomSource + ?Sized>(
        size: usize,
        sale_cost: ValueRange,
        rent_value: ValueRange,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::EmptyBoard);
        }
        for range in [sale_cost, rent_value] {
            if !range.is_valid() {
                return Err(BoardError::InvalidRange {
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let properties = (0..size)
            .map(|_| {
                let cost = rng.sale_cost(sale_cost);
                let rent = rng.rent_value(rent_value);
                Property::new(cost, rent)
            })
            .collect();
        Ok(Self { properties })
    }

    /// Build a board from explicit properties.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::EmptyBoard` when `properties` is empty.
    pub fn from_properties(properties: Vec<Property>) -> Result<Self, BoardError> {
        if properties.is_empty() {
            return Err(BoardError::EmptyBoard);
        }
        Ok(Self { properties })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property at `position`; no wraparound is applied here.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidPosition` when `position >= len()`.
    pub fn property_at(&self, position: usize) -> Result<&Property, BoardError> {
        self.properties
            .get(position)
            .ok_or(BoardError::InvalidPosition {
                position,
                size: self.properties.len(),
            })
    }

    pub(crate) fn property_at_mut(&mut self, position: usize) -> Result<&mut Property, BoardError> {
        let size = self.properties.len();
        self.properties
            .get_mut(position)
            .ok_or(BoardError::InvalidPosition { position, size })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Positions currently owned by `player`, in board order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = usize> + '_ {
        self.properties
            .iter()
            .enumerate()
            .filter(move |(_, property)| property.is_owned_by(player))
            .map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngBundle;

    #[test]
    fn generates_requested_size_within_ranges() {
        let mut rng = RngBundle::from_user_seed(11);
        let cost = ValueRange::new(70, 280);
        let rent = ValueRange::new(10, 100);
        let board = Board::generate(20, cost, rent, &mut rng).unwrap();
        assert_eq!(board.len(), 20);
        assert!(board.iter().all(|p| cost.contains(p.sale_cost)));
        assert!(board.iter().all(|p| rent.contains(p.rent_value)));
        assert!(board.iter().all(|p| p.owner.is_none()));
        assert_eq!(rng.draw_counts().board, 40);
    }

    #[test]
    fn zero_size_fails_fast() {
        let mut rng = RngBundle::from_user_seed(1);
        let err = Board::generate(
            0,
            ValueRange::new(70, 280),
            ValueRange::new(10, 100),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, BoardError::EmptyBoard);
        assert_eq!(rng.draw_counts().board, 0);
    }

    #[test]
    fn inverted_range_fails_fast() {
        let mut rng = RngBundle::from_user_seed(1);
        let err = Board::generate(
            4,
            ValueRange::new(280, 70),
            ValueRange::new(10, 100),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, BoardError::InvalidRange { min: 280, max: 70 });
    }

    #[test]
    fn property_at_rejects_out_of_range() {
        let board = Board::from_properties(vec![Property::new(100, 20); 3]).unwrap();
        assert_eq!(board.property_at(2).unwrap().sale_cost, 100);
        assert_eq!(
            board.property_at(3),
            Err(BoardError::InvalidPosition {
                position: 3,
                size: 3
            })
        );
    }

    #[test]
    fn owned_by_lists_positions_in_order() {
        let mut board = Board::from_properties(vec![Property::new(100, 20); 5]).unwrap();
        board.property_at_mut(4).unwrap().owner = Some(PlayerId(1));
        board.property_at_mut(1).unwrap().owner = Some(PlayerId(1));
        board.property_at_mut(2).unwrap().owner = Some(PlayerId(0));
        assert_eq!(board.owned_by(PlayerId(1)).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(board.owned_by(PlayerId(3)).count(), 0);
    }
}
