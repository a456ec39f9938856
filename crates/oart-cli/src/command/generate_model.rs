use std::path::PathBuf;

use chrono::Utc;
use oart_evaluator::oracle::{LogisticModel, LogisticOracle, TrainedFeature};
use oart_features::{FeatureGroup, FeatureId};

use crate::util::Output;

const BASELINE_INTERCEPT: f64 = 2.5;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateModelArg {
    /// Model name recorded in the artifact
    #[arg(long, default_value = "baseline")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Hand-set coefficients: short, uncontested passes into safe zones succeed most often.
const fn baseline_weight(id: FeatureId) -> f64 {
    match id {
        FeatureId::PassDistance => -0.07,
        FeatureId::PassAngle => -0.05,
        FeatureId::DistanceToGoalStart => 0.004,
        FeatureId::DistanceToGoalEnd => 0.012,
        FeatureId::UnderPressure => -0.45,
        FeatureId::LogOptionSetSize => 0.15,
        FeatureId::OpponentsInPath => -0.6,
        FeatureId::NearestOpponentDist => 0.03,
        FeatureId::TeammatesAhead => -0.05,
        FeatureId::MatchMinuteNormalized => -0.1,
        FeatureId::IsSecondHalf => -0.02,
        FeatureId::IsSetPiece => 0.2,
        FeatureId::IsRegularPlay => 0.0,
        FeatureId::StartDefensive => 0.35,
        FeatureId::StartMiddle => 0.1,
        FeatureId::StartAttacking => -0.2,
        FeatureId::EndDefensive => 0.45,
        FeatureId::EndMiddle => 0.1,
        FeatureId::EndAttacking => -0.4,
    }
}

fn baseline_model(name: &str) -> LogisticModel {
    LogisticModel {
        name: name.to_owned(),
        trained_at: Utc::now(),
        intercept: BASELINE_INTERCEPT,
        features: FeatureId::ALL
            .into_iter()
            .map(|id| TrainedFeature {
                id: id.id().to_owned(),
                weight: baseline_weight(id),
            })
            .collect(),
    }
}

/// Console listing of the baseline weights, one section per feature group.
fn weight_lines() -> Vec<String> {
    let mut lines = vec![];
    for group in FeatureGroup::ALL {
        lines.push(format!("    {group}:"));
        for id in group.features() {
            lines.push(format!("      {:<28} {:+.3}", id.name(), baseline_weight(id)));
        }
    }
    lines
}

pub(crate) fn run(arg: &GenerateModelArg) -> anyhow::Result<()> {
    let GenerateModelArg { name, output } = arg;
    let model = baseline_model(name);
    // reject anything the scorer would refuse to load
    LogisticOracle::from_model(model.clone())?;
    Output::save_json(&model, output.clone())?;

    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Intercept: {:+.3}", model.intercept);
    eprintln!("  Weights: {} features", model.features.len());
    for line in weight_lines() {
        eprintln!("{line}");
    }

    Ok(())
}
