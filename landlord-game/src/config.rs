//! Match configuration: board geometry, economy and purchase thresholds.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Closed integer range used for randomized property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the closed range.
    #[must_use]
    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// A usable range is non-empty and strictly positive.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.min > 0 && self.min <= self.max
    }
}

/// Thresholds consulted by the purchase strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRules {
    /// Demanding players only buy when rent is strictly above this value.
    #[serde(default = "PurchaseRules::default_demanding_min_rent")]
    pub demanding_min_rent: u32,
    /// Cautious players keep at least this much after a purchase.
    #[serde(default = "PurchaseRules::default_cautious_reserve")]
    pub cautious_reserve: u32,
}

impl PurchaseRules {
    const fn default_demanding_min_rent() -> u32 {
        constants::DEMANDING_MIN_RENT
    }

    const fn default_cautious_reserve() -> u32 {
        constants::CAUTIOUS_RESERVE
    }
}

impl Default for PurchaseRules {
    fn default() -> Self {
        Self {
            demanding_min_rent: Self::default_demanding_min_rent(),
            cautious_reserve: Self::default_cautious_reserve(),
        }
    }
}

/// Full configuration for a single match. Defaults reproduce the reference scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "MatchConfig::default_board_size")]
    pub board_size: usize,
    #[serde(default = "MatchConfig::default_starting_balance")]
    pub starting_balance: i64,
    #[serde(default = "MatchConfig::default_lap_bonus")]
    pub lap_bonus: i64,
    #[serde(default = "MatchConfig::default_round_cap")]
    pub round_cap: u32,
    #[serde(default = "MatchConfig::default_die_faces")]
    pub die_faces: u8,
    #[serde(default = "MatchConfig::default_sale_cost")]
    pub sale_cost: ValueRange,
    #[serde(default = "MatchConfig::default_rent_value")]
    pub rent_value: ValueRange,
    #[serde(default)]
    pub rules: PurchaseRules,
}

impl MatchConfig {
    #[must_use]
    pub const fn default_board_size() -> usize {
        constants::BOARD_SIZE
    }

    #[must_use]
    pub const fn default_starting_balance() -> i64 {
        constants::STARTING_BALANCE
    }

    #[must_use]
    pub const fn default_lap_bonus() -> i64 {
        constants::LAP_BONUS
    }

    #[must_use]
    pub const fn default_round_cap() -> u32 {
        constants::ROUND_CAP
    }

    #[must_use]
    pub const fn default_die_faces() -> u8 {
        constants::DIE_FACES
    }

    #[must_use]
    pub const fn default_sale_cost() -> ValueRange {
        ValueRange::new(constants::SALE_COST_MIN, constants::SALE_COST_MAX)
    }

    #[must_use]
    pub const fn default_rent_value() -> ValueRange {
        ValueRange::new(constants::RENT_VALUE_MIN, constants::RENT_VALUE_MAX)
    }

    /// Parse a configuration document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate configuration invariants before a match is built.
    ///
    /// # Errors
    ///
    /// Returns `MatchConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), MatchConfigError> {
        if self.board_size == 0 {
            return Err(MatchConfigError::EmptyBoard);
        }
        if self.round_cap == 0 {
            return Err(MatchConfigError::ZeroField { field: "round_cap" });
        }
        if self.die_faces == 0 {
            return Err(MatchConfigError::ZeroField { field: "die_faces" });
        }
        Self::validate_non_negative("starting_balance", self.starting_balance)?;
        Self::validate_non_negative("lap_bonus", self.lap_bonus)?;
        Self::validate_range("sale_cost", self.sale_cost)?;
        Self::validate_range("rent_value", self.rent_value)?;
        Ok(())
    }

    fn validate_non_negative(field: &'static str, value: i64) -> Result<(), MatchConfigError> {
        if value < 0 {
            return Err(MatchConfigError::NegativeField { field, value });
        }
        Ok(())
    }

    fn validate_range(field: &'static str, range: ValueRange) -> Result<(), MatchConfigError> {
        if !range.is_valid() {
            return Err(MatchConfigError::InvalidRange {
                field,
                min: range.min,
                max: range.max,
            });
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: Self::default_board_size(),
            starting_balance: Self::default_starting_balance(),
            lap_bonus: Self::default_lap_bonus(),
            round_cap: Self::default_round_cap(),
            die_faces: Self::default_die_faces(),
            sale_cost: Self::default_sale_cost(),
            rent_value: Self::default_rent_value(),
            rules: PurchaseRules::default(),
        }
    }
}

/// Errors raised when match configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchConfigError {
    #[error("board must contain at least one property")]
    EmptyBoard,
    #[error("{field} must be greater than zero")]
    ZeroField { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    NegativeField { field: &'static str, value: i64 },
    #[error("{field} range invalid (min {min}, max {max}); bounds must be positive and ordered")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}
