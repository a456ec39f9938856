use std::path::PathBuf;

use crate::util::{self, Output, ScoringArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    #[clap(flatten)]
    scoring: ScoringArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg { scoring, output } = arg;
    let scored = util::score_events(scoring)?;
    Output::save_json(&scored, output.clone())?;
    Ok(())
}
