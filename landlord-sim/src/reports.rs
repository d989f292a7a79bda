use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use landlord_game::Strategy;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::batch::MatchRecord;
use crate::stats::BatchStats;

/// Which strategy names appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelStyle {
    /// Impulsive, Demanding, Cautious, Random
    English,
    /// Impulsivo, Exigente, Cauteloso, Aleatório
    Reference,
}

impl LabelStyle {
    #[must_use]
    pub const fn label(self, strategy: Strategy) -> &'static str {
        match self {
            Self::English => strategy.label(),
            Self::Reference => strategy.reference_label(),
        }
    }
}

/// Everything a report needs about one batch seed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub stats: BatchStats,
    /// Only populated in verbose runs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<MatchRecord>,
}

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[BatchReport],
    labels: LabelStyle,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out, "{}", "🎲 Landlord Strategy Simulator".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    for report in reports {
        let stats = &report.stats;
        writeln!(out)?;
        writeln!(
            out,
            "{} {} ({} matches)",
            "Seed".bold(),
            stats.batch_seed,
            stats.matches
        )?;
        writeln!(
            out,
            "Timeouts: {} ({:.2}%)",
            stats.timeouts.to_string().yellow(),
            stats.timeout_pct
        )?;
        writeln!(out, "Average match length: {:.2} rounds", stats.mean_rounds)?;
        writeln!(out, "Win rate by strategy:")?;
        for tally in &stats.tallies {
            writeln!(
                out,
                "  {:<10} {:>6.2}%  ({} wins)",
                labels.label(tally.strategy),
                tally.win_pct,
                tally.wins
            )?;
        }
        if stats.undecided > 0 {
            writeln!(
                out,
                "Undecided: {} (no survivors, excluded from win rates)",
                stats.undecided.to_string().red()
            )?;
        }
        match stats.modal_winner {
            Some(modal) => writeln!(
                out,
                "Most wins: {} with {} wins",
                labels.label(modal.strategy).green().bold(),
                modal.wins
            )?,
            None => writeln!(out, "Most wins: {}", "none".dimmed())?,
        }

        if !report.records.is_empty() {
            writeln!(out, "Matches:")?;
            for record in &report.records {
                let winner = record.winner.map_or("-", |s| labels.label(s));
                writeln!(
                    out,
                    "  #{:<4} seed {:<20} rounds {:>4}  {:<10} {:?}",
                    record.index + 1,
                    record.seed,
                    record.rounds,
                    winner,
                    record.end
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "🏁 Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[BatchReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    reports: &[BatchReport],
    labels: LabelStyle,
) -> Result<()> {
    writeln!(out, "# Landlord Simulation Results\n")?;

    for report in reports {
        let stats = &report.stats;
        writeln!(out, "## Seed {}\n", stats.batch_seed)?;
        writeln!(out, "- **Matches**: {}", stats.matches)?;
        writeln!(
            out,
            "- **Timeouts**: {} ({:.2}%)",
            stats.timeouts, stats.timeout_pct
        )?;
        writeln!(out, "- **Average rounds**: {:.2}", stats.mean_rounds)?;
        if stats.undecided > 0 {
            writeln!(out, "- **Undecided**: {}", stats.undecided)?;
        }
        if let Some(modal) = stats.modal_winner {
            writeln!(
                out,
                "- **Most wins**: {} ({})",
                labels.label(modal.strategy),
                modal.wins
            )?;
        }
        writeln!(out)?;
        writeln!(out, "| Strategy | Wins | Win % |")?;
        writeln!(out, "|---|---:|---:|")?;
        for tally in &stats.tallies {
            writeln!(
                out,
                "| {} | {} | {:.2} |",
                labels.label(tally.strategy),
                tally.wins,
                tally.win_pct
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BatchStats;
    use landlord_game::MatchPhase;

    fn sample() -> Vec<BatchReport> {
        let records = vec![
            MatchRecord {
                index: 0,
                seed: 5,
                rounds: 1000,
                end: MatchPhase::EndedByTimeout,
                winner: Some(Strategy::Random),
            },
            MatchRecord {
                index: 1,
                seed: 6,
                rounds: 80,
                end: MatchPhase::EndedByElimination,
                winner: Some(Strategy::Random),
            },
        ];
        vec![BatchReport {
            stats: BatchStats::from_records(5, 1000, &records),
            records,
        }]
    }

    #[test]
    fn console_report_lists_every_strategy() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample(), LabelStyle::English, Duration::ZERO)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        for strategy in Strategy::ALL {
            assert!(text.contains(strategy.label()));
        }
        assert!(text.contains("Timeouts: 1 (50.00%)"));
        assert!(text.contains("Average match length: 540.00 rounds"));
        assert!(text.contains("Most wins: Random with 2 wins"));
    }

    #[test]
    fn reference_labels_switch_names() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &sample(), LabelStyle::Reference).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| Aleatório | 2 | 100.00 |"));
        assert!(text.contains("| Exigente | 0 | 0.00 |"));
        assert!(!text.contains("Demanding"));
    }

    #[test]
    fn json_report_is_parseable() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["stats"]["matches"], 2);
        assert_eq!(value[0]["stats"]["modal_winner"]["strategy"], "random");
        assert_eq!(value[0]["records"][1]["end"], "ended_by_elimination");
    }
}
