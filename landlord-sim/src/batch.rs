use anyhow::{Context, Result};
use landlord_game::{MatchConfig, MatchPhase, Strategy, run_match};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::seeds::match_seed;

/// How many matches to run per batch seed, and on how many threads.
#[derive(Debug, Clone, Copy)]
pub struct BatchPlan {
    pub matches: usize,
    pub parallel: bool,
}

/// Condensed result of one match in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub index: usize,
    pub seed: u64,
    pub rounds: u32,
    pub end: MatchPhase,
    pub winner: Option<Strategy>,
}

#[derive(Debug, Clone)]
pub struct BatchRun {
    pub batch_seed: u64,
    pub round_cap: u32,
    pub records: Vec<MatchRecord>,
}

/// Run `plan.matches` independent matches seeded from `batch_seed`.
///
/// Results are ordered by match index whether or not the batch runs in parallel.
pub fn run_batch(config: &MatchConfig, batch_seed: u64, plan: BatchPlan) -> Result<BatchRun> {
    let play = |index: usize| -> Result<MatchRecord> {
        let seed = match_seed(batch_seed, index);
        let outcome = run_match(config, seed)
            .with_context(|| format!("match {index} (seed {seed}) failed"))?;
        Ok(MatchRecord {
            index,
            seed,
            rounds: outcome.rounds,
            end: outcome.end,
            winner: outcome.winner,
        })
    };

    let records = if plan.parallel {
        (0..plan.matches)
            .into_par_iter()
            .map(play)
            .collect::<Result<Vec<_>>>()?
    } else {
        (0..plan.matches).map(play).collect::<Result<Vec<_>>>()?
    };

    log::info!(
        "batch seed {batch_seed}: {} matches finished",
        records.len()
    );
    Ok(BatchRun {
        batch_seed,
        round_cap: config.round_cap,
        records,
    })
}
