//! Landlord Game Engine
//!
//! Core match logic for the Landlord property board game: four fixed
//! purchase strategies race around a randomized board until one survivor is
//! left or the round cap is reached. This crate has no I/O; batch drivers and
//! reports live in `landlord-sim`.

pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod player;
pub mod property;
pub mod rng;
pub mod strategy;
pub mod table;

// Re-export commonly used types
pub use board::{Board, BoardError};
pub use config::{MatchConfig, MatchConfigError, PurchaseRules, ValueRange};
pub use game::{
    Match, MatchError, MatchOutcome, MatchPhase, RoundReport, Seats, Standing, TurnRecord,
    run_match, run_match_with,
};
pub use player::{Movement, Player, PlayerId};
pub use property::Property;
pub use rng::{CountingRng, DrawCounts, RandomSource, RngBundle};
pub use strategy::Strategy;
pub use table::{Table, TableError, Transaction, TransactionKind};
