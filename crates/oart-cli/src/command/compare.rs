use std::path::PathBuf;

use anyhow::{Context, bail};
use oart_core::PlayerId;
use oart_evaluator::{
    player_aggregator::{self, DEFAULT_MIN_EVENTS},
    risk_profile,
};

use crate::util::{self, Output, ScoringArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    scoring: ScoringArg,
    /// Players to compare (exactly two)
    #[arg(long = "player", num_args = 1, required = true)]
    players: Vec<String>,
    /// Minimum number of scored passes per player
    #[arg(long, default_value_t = DEFAULT_MIN_EVENTS)]
    min_events: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg {
        scoring,
        players,
        min_events,
        output,
    } = arg;
    let [a, b] = players.as_slice() else {
        bail!("Expected exactly two --player arguments, got {}", players.len());
    };

    let scored = util::score_events(scoring)?;
    let aggregates = player_aggregator::aggregate_scored(&scored, *min_events);
    let find = |name: &str| {
        let id = PlayerId::new(name);
        aggregates
            .iter()
            .find(|agg| agg.player == id)
            .with_context(|| format!("Player not found in events: {name}"))
    };
    let (agg_a, agg_b) = (find(a.as_str())?, find(b.as_str())?);

    let Some(comparison) = risk_profile::compare_players(agg_a, agg_b) else {
        bail!(
            "Both players need at least {min_events} scored passes ({a}: {}, {b}: {})",
            agg_a.n_events,
            agg_b.n_events
        );
    };

    eprintln!("Comparison:");
    for summary in &comparison.players {
        eprintln!(
            "  {:<24} {:.3} ± {:.3}  n={:<4} {}",
            summary.player, summary.mean, summary.std_dev, summary.n_events, summary.profile
        );
    }
    match &comparison.more_risky {
        Some(player) => eprintln!(
            "  {player} takes more risk (difference {:.3})",
            comparison.difference
        ),
        None => eprintln!("  Equal mean OART"),
    }

    Output::save_json(&comparison, output.clone())?;
    Ok(())
}
