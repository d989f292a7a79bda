//! Centralized tuning constants for the reference Landlord scenario.
//!
//! These are the defaults behind `MatchConfig`; a config file can override
//! any of them per run, but the engine never reads them directly.

// Board --------------------------------------------------------------------
pub const BOARD_SIZE: usize = 20;
pub const SALE_COST_MIN: u32 = 70;
pub const SALE_COST_MAX: u32 = 280;
pub const RENT_VALUE_MIN: u32 = 10;
pub const RENT_VALUE_MAX: u32 = 100;

// Economy ------------------------------------------------------------------
pub const STARTING_BALANCE: i64 = 300;
pub const LAP_BONUS: i64 = 100;

// Match pacing -------------------------------------------------------------
pub const ROUND_CAP: u32 = 1000;
pub const DIE_FACES: u8 = 6;

// Strategy thresholds ------------------------------------------------------
pub const DEMANDING_MIN_RENT: u32 = 50;
pub const CAUTIOUS_RESERVE: u32 = 80;

// RNG stream domain tags ---------------------------------------------------
pub(crate) const STREAM_BOARD: &[u8] = b"board";
pub(crate) const STREAM_DICE: &[u8] = b"dice";
pub(crate) const STREAM_SEATING: &[u8] = b"seating";
pub(crate) const STREAM_COIN: &[u8] = b"coin";
