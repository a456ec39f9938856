//! Success-probability oracles: the judge that scores every pass option.
//!
//! An oracle answers one question: "how likely is this pass to succeed?" for a
//! [`FeatureVector`]. The scorer treats it as an opaque capability; how the underlying model
//! was trained is out of scope.
//!
//! # Implementations
//!
//! - [`LogisticOracle`] - A pretrained logistic-regression artifact loaded from JSON
//! - [`FnOracle`] - Any closure, for deterministic test doubles and experiments
//!
//! # Feature Order
//!
//! Each oracle is configured with exactly one [`FeatureSchema`]. Feature vectors are laid out
//! in that order at prediction time, so callers never need to know it. A
//! [`LogisticOracle`] takes its schema from the artifact's feature list.
//!
//! # Construction
//!
//! [`OracleBuilder`] accepts either a deserialized [`LogisticModel`] or a path to an
//! artifact. Supplying neither is a [`ConfigurationError::MissingModel`].
//!
//! ```
//! use oart_evaluator::oracle::{ConfigurationError, OracleBuilder};
//!
//! let err = OracleBuilder::new().build().unwrap_err();
//! assert!(matches!(err, ConfigurationError::MissingModel));
//! ```
//!
//! # Concurrency
//!
//! Oracles take `&self`, have no write path, and are `Send + Sync`: one instance is shared
//! by every scoring worker.

use std::{
    collections::HashSet,
    fmt,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use oart_features::{FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};

/// Predicts the probability that a pass succeeds.
pub trait SuccessProbabilityOracle: fmt::Debug + Send + Sync {
    /// The feature order this oracle consumes.
    fn schema(&self) -> &FeatureSchema;

    /// Probability in \[0.0, 1.0\] that a pass described by `features` is completed.
    fn predict(&self, features: &FeatureVector) -> f64;
}

pub type BoxedOracle<'a> = Box<dyn SuccessProbabilityOracle + 'a>;

impl<T> SuccessProbabilityOracle for &T
where
    T: SuccessProbabilityOracle + ?Sized,
{
    fn schema(&self) -> &FeatureSchema {
        (**self).schema()
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        (**self).predict(features)
    }
}

impl SuccessProbabilityOracle for BoxedOracle<'_> {
    fn schema(&self) -> &FeatureSchema {
        self.as_ref().schema()
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        self.as_ref().predict(features)
    }
}

/// The oracle cannot be constructed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("no model supplied: provide a model object or a model artifact path")]
    MissingModel,
    #[display("failed to open model artifact: {}", path.display())]
    ReadArtifact { path: PathBuf, source: io::Error },
    #[display("failed to parse model artifact: {}", path.display())]
    ParseArtifact {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("model has no features")]
    EmptySchema,
    #[display("feature `{id}` appears more than once in the model")]
    DuplicateFeature { id: String },
    #[display("model coefficient for `{id}` is not finite")]
    NonFiniteWeight { id: String },
}

/// A feature coefficient of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedFeature {
    pub id: String,
    pub weight: f64,
}

/// Serialized logistic-regression model.
///
/// The order of `features` is the order the model was fit with and becomes the oracle's
/// [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub intercept: f64,
    pub features: Vec<TrainedFeature>,
}

impl LogisticModel {
    /// Reads a model artifact from a JSON file.
    pub fn open<P>(path: P) -> Result<Self, ConfigurationError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigurationError::ReadArtifact {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigurationError::ParseArtifact {
                path: path.to_owned(),
                source,
            }
        })
    }

    #[must_use]
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::from_names(self.features.iter().map(|f| f.id.as_str()))
    }
}

/// Oracle backed by a [`LogisticModel`].
///
/// ```text
/// p = 1 / (1 + exp(-(intercept + Σ wᵢ·xᵢ)))
/// ```
#[derive(Debug, Clone)]
pub struct LogisticOracle {
    name: String,
    schema: FeatureSchema,
    intercept: f64,
    weights: Vec<f64>,
}

impl LogisticOracle {
    pub fn from_model(model: LogisticModel) -> Result<Self, ConfigurationError> {
        if model.features.is_empty() {
            return Err(ConfigurationError::EmptySchema);
        }
        let mut seen = HashSet::new();
        for feature in &model.features {
            if !seen.insert(feature.id.as_str()) {
                return Err(ConfigurationError::DuplicateFeature {
                    id: feature.id.clone(),
                });
            }
            if !feature.weight.is_finite() {
                return Err(ConfigurationError::NonFiniteWeight {
                    id: feature.id.clone(),
                });
            }
        }
        if !model.intercept.is_finite() {
            return Err(ConfigurationError::NonFiniteWeight {
                id: "intercept".to_owned(),
            });
        }

        let schema = model.schema();
        for name in schema.unknown_names() {
            tracing::warn!(
                model = %model.name,
                feature = name,
                "unknown model feature will read as 0"
            );
        }
        tracing::debug!(
            model = %model.name,
            trained_at = %model.trained_at,
            features = schema.len(),
            "logistic oracle ready"
        );

        Ok(Self {
            name: model.name,
            schema,
            intercept: model.intercept,
            weights: model.features.into_iter().map(|f| f.weight).collect(),
        })
    }

    pub fn open<P>(path: P) -> Result<Self, ConfigurationError>
    where
        P: AsRef<Path>,
    {
        Self::from_model(LogisticModel::open(path)?)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SuccessProbabilityOracle for LogisticOracle {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        let z = self.intercept
            + features
                .values_in(&self.schema)
                .zip(&self.weights)
                .map(|(x, w)| x * w)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }
}

/// Oracle wrapping a closure.
pub struct FnOracle<F> {
    schema: FeatureSchema,
    predict: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    /// Wraps `predict` with the canonical schema.
    pub fn new(predict: F) -> Self {
        Self::with_schema(FeatureSchema::canonical(), predict)
    }

    pub fn with_schema(schema: FeatureSchema, predict: F) -> Self {
        Self { schema, predict }
    }
}

impl<F> fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOracle")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl<F> SuccessProbabilityOracle for FnOracle<F>
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        (self.predict)(features)
    }
}

/// Builds a [`LogisticOracle`] from a model object or an artifact path.
///
/// When both are supplied the model object is used.
#[derive(Debug, Default)]
pub struct OracleBuilder {
    model: Option<LogisticModel>,
    model_path: Option<PathBuf>,
}

impl OracleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn model(mut self, model: LogisticModel) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub fn model_path<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.model_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<LogisticOracle, ConfigurationError> {
        match (self.model, self.model_path) {
            (Some(model), _) => LogisticOracle::from_model(model),
            (None, Some(path)) => LogisticOracle::open(path),
            (None, None) => Err(ConfigurationError::MissingModel),
        }
    }
}

#[cfg(test)]
mod tests {
    use oart_features::FeatureId;

    use super::*;

    fn model(features: &[(&str, f64)]) -> LogisticModel {
        LogisticModel {
            name: "test".to_owned(),
            trained_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            intercept: 0.5,
            features: features
                .iter()
                .map(|(id, weight)| TrainedFeature {
                    id: (*id).to_owned(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    #[test]
    fn test_missing_model() {
        assert!(matches!(
            OracleBuilder::new().build(),
            Err(ConfigurationError::MissingModel)
        ));
    }

    #[test]
    fn test_missing_artifact_file() {
        let err = OracleBuilder::new()
            .model_path("/nonexistent/oart/model.json")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ReadArtifact { .. }));
    }

    #[test]
    fn test_model_wins_over_path() {
        let oracle = OracleBuilder::new()
            .model_path("/nonexistent/oart/model.json")
            .model(model(&[("pass_distance", -0.1)]))
            .build()
            .unwrap();
        assert_eq!(oracle.name(), "test");
    }

    #[test]
    fn test_invalid_models() {
        assert!(matches!(
            LogisticOracle::from_model(model(&[])),
            Err(ConfigurationError::EmptySchema)
        ));
        assert!(matches!(
            LogisticOracle::from_model(model(&[("pass_distance", 1.0), ("pass_distance", 2.0)])),
            Err(ConfigurationError::DuplicateFeature { id }) if id == "pass_distance"
        ));
        assert!(matches!(
            LogisticOracle::from_model(model(&[("pass_angle", f64::NAN)])),
            Err(ConfigurationError::NonFiniteWeight { id }) if id == "pass_angle"
        ));
    }

    #[test]
    fn test_logistic_prediction_uses_model_order() {
        let weights = [("teammates_ahead", 0.25), ("pass_distance", -0.05)];
        let oracle = LogisticOracle::from_model(model(&weights)).unwrap();
        assert_eq!(
            oracle.schema().names().collect::<Vec<_>>(),
            ["teammates_ahead", "pass_distance"]
        );

        let mut features = FeatureVector::default();
        features.set(FeatureId::PassDistance, 10.0);
        features.set(FeatureId::TeammatesAhead, 2.0);
        // z = 0.5 + 0.25 * 2 - 0.05 * 10 = 0.5
        let expected = 1.0 / (1.0 + (-0.5_f64).exp());
        assert!((oracle.predict(&features) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_features_read_as_zero() {
        let oracle = LogisticOracle::from_model(model(&[("xg_chain", 100.0)])).unwrap();
        let p = oracle.predict(&FeatureVector::default());
        assert!((p - 1.0 / (1.0 + (-0.5_f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_artifact_format() {
        let json = r#"{
            "name": "baseline",
            "trained_at": "2024-01-01T00:00:00Z",
            "intercept": 1.0,
            "features": [{"id": "pass_distance", "weight": -0.04}]
        }"#;
        let model: LogisticModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.features.len(), 1);
        assert_eq!(model.schema().len(), 1);
    }

    #[test]
    fn test_fn_oracle_by_reference() {
        let oracle =
            FnOracle::new(|f: &FeatureVector| 1.0 / (1.0 + f.value(FeatureId::PassDistance)));
        let by_ref: BoxedOracle<'_> = Box::new(&oracle);
        let mut features = FeatureVector::default();
        features.set(FeatureId::PassDistance, 3.0);
        assert_eq!(by_ref.predict(&features), 0.25);
        assert_eq!(by_ref.schema().len(), 19);
    }
}
