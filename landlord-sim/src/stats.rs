use landlord_game::{MatchPhase, Strategy};
use serde::Serialize;

use crate::batch::{BatchRun, MatchRecord};
use crate::numbers::{count_to_f64, percent, u64_to_f64};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyTally {
    pub strategy: Strategy,
    pub wins: usize,
    /// Share of decided matches won by this strategy.
    pub win_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModalWinner {
    pub strategy: Strategy,
    pub wins: usize,
}

/// Aggregate statistics for one batch seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub batch_seed: u64,
    pub round_cap: u32,
    pub matches: usize,
    /// Matches that reached the round cap, including those whose last
    /// elimination fell on the cap round.
    pub timeouts: usize,
    pub timeout_pct: f64,
    /// Matches that ended with at most one survivor.
    pub eliminations: usize,
    /// Matches in which every player went bankrupt; excluded from win rates.
    pub undecided: usize,
    pub mean_rounds: f64,
    pub tallies: Vec<StrategyTally>,
    pub modal_winner: Option<ModalWinner>,
}

impl BatchStats {
    #[must_use]
    pub fn from_run(run: &BatchRun) -> Self {
        Self::from_records(run.batch_seed, run.round_cap, &run.records)
    }

    #[must_use]
    pub fn from_records(batch_seed: u64, round_cap: u32, records: &[MatchRecord]) -> Self {
        let matches = records.len();
        let timeouts = records.iter().filter(|r| r.rounds >= round_cap).count();
        let eliminations = records
            .iter()
            .filter(|r| r.end == MatchPhase::EndedByElimination)
            .count();

        let mut wins = [0_usize; Strategy::ALL.len()];
        let mut undecided = 0;
        for record in records {
            match record.winner {
                Some(strategy) => wins[strategy.index()] += 1,
                None => undecided += 1,
            }
        }
        let decided = matches - undecided;

        let total_rounds: u64 = records.iter().map(|r| u64::from(r.rounds)).sum();
        let mean_rounds = if matches == 0 {
            0.0
        } else {
            u64_to_f64(total_rounds) / count_to_f64(matches)
        };

        let tallies = Strategy::ALL
            .iter()
            .map(|&strategy| StrategyTally {
                strategy,
                wins: wins[strategy.index()],
                win_pct: percent(wins[strategy.index()], decided),
            })
            .collect();

        Self {
            batch_seed,
            round_cap,
            matches,
            timeouts,
            timeout_pct: percent(timeouts, matches),
            eliminations,
            undecided,
            mean_rounds,
            tallies,
            modal_winner: modal_winner(&wins),
        }
    }
}

/// Strategy with the most wins; ties go to the earlier strategy in
/// [`Strategy::ALL`]. `None` when nobody won anything.
fn modal_winner(wins: &[usize; 4]) -> Option<ModalWinner> {
    let mut best: Option<ModalWinner> = None;
    for strategy in Strategy::ALL {
        let count = wins[strategy.index()];
        if count > 0 && best.is_none_or(|b| count > b.wins) {
            best = Some(ModalWinner {
                strategy,
                wins: count,
            });
        }
    }
    best
}
