use std::path::PathBuf;

use oart_evaluator::{
    player_aggregator::{self, DEFAULT_MIN_EVENTS, PlayerAggregate},
    risk_profile::RiskProfile,
};
use serde::Serialize;

use crate::util::{self, Output, ScoringArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AggregateArg {
    #[clap(flatten)]
    scoring: ScoringArg,
    /// Minimum number of scored passes per player
    #[arg(long, default_value_t = DEFAULT_MIN_EVENTS)]
    min_events: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PlayerReport {
    #[serde(flatten)]
    aggregate: PlayerAggregate,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<RiskProfile>,
}

pub(crate) fn run(arg: &AggregateArg) -> anyhow::Result<()> {
    let AggregateArg {
        scoring,
        min_events,
        output,
    } = arg;
    let scored = util::score_events(scoring)?;
    let aggregates = player_aggregator::aggregate_scored(&scored, *min_events);

    let mut valid = aggregates
        .iter()
        .filter_map(|a| Some((a, a.mean()?)))
        .collect::<Vec<_>>();
    valid.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    eprintln!("Players by mean OART (min {min_events} scored passes):");
    for (i, (aggregate, mean)) in valid.iter().enumerate() {
        eprintln!(
            "  {:3}: {:<24} {mean:.3} ± {:.3}  n={:<4} {}",
            i + 1,
            aggregate.player,
            aggregate.std_dev().unwrap_or_default(),
            aggregate.n_events,
            RiskProfile::from_oart(*mean),
        );
    }
    eprintln!(
        "  {} of {} players below the threshold",
        aggregates.len() - valid.len(),
        aggregates.len()
    );

    let reports = aggregates
        .into_iter()
        .map(|aggregate| PlayerReport {
            profile: aggregate.mean().map(RiskProfile::from_oart),
            aggregate,
        })
        .collect::<Vec<_>>();
    Output::save_json(&reports, output.clone())?;
    Ok(())
}
