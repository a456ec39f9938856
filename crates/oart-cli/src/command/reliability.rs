use std::path::PathBuf;

use oart_evaluator::player_aggregator::DEFAULT_MIN_EVENTS;
use oart_reliability::{
    DEFAULT_ITERATIONS, DEFAULT_MIN_PLAYERS, EventScore, ReliabilityParams, split_half_reliability,
};

use crate::util::{self, Output, ScoringArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReliabilityArg {
    #[clap(flatten)]
    scoring: ScoringArg,
    /// Minimum number of scored passes per player
    #[arg(long, default_value_t = DEFAULT_MIN_EVENTS)]
    min_events: usize,
    /// Number of random split iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// A correlation is computed only with more players than this
    #[arg(long, default_value_t = DEFAULT_MIN_PLAYERS)]
    min_players: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReliabilityArg) -> anyhow::Result<()> {
    let ReliabilityArg {
        scoring,
        min_events,
        iterations,
        min_players,
        output,
    } = arg;
    let scored = util::score_events(scoring)?;
    let table = EventScore::from_scored(&scored);
    let params = ReliabilityParams {
        min_events: *min_events,
        n_iterations: *iterations,
        min_players: *min_players,
    };
    let summary = split_half_reliability(&table, &params);

    eprintln!("Split-half reliability:");
    eprintln!("  Players:      {}", summary.n_players);
    eprintln!(
        "  Iterations:   {} recorded of {}",
        summary.correlations.len(),
        params.n_iterations
    );
    match (summary.mean, summary.std_dev) {
        (Some(mean), Some(std_dev)) => eprintln!("  Correlation:  {mean:.3} ± {std_dev:.3}"),
        _ => eprintln!("  Correlation:  undefined (more than {min_players} players required)"),
    }

    Output::save_json(&summary, output.clone())?;
    Ok(())
}
