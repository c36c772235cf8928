use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::PricePredictor;
use crate::error::ComputationError;
use crate::models::{CategoricalField, FeatureVector, FEATURE_ORDER};

/// Errors raised while loading a model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feature order mismatch at slot {index}: artifact has '{found}', expected '{expected}'")]
    FeatureOrder {
        index: usize,
        found: String,
        expected: &'static str,
    },

    #[error("Artifact lists {0} features, expected 12")]
    FeatureCount(usize),

    #[error("Category domain for {0} is missing or empty")]
    EmptyDomain(CategoricalField),

    #[error("Regressor expects {expected} inputs but the encoding produces {actual}")]
    Width { expected: usize, actual: usize },

    #[error("Tree {tree}: {reason}")]
    Tree { tree: usize, reason: String },
}

/// Serialized model file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSpec {
    pub name: String,
    pub version: String,
    pub feature_order: Vec<String>,
    pub category_domains: HashMap<CategoricalField, Vec<String>>,
    #[serde(default)]
    pub encoding: EncodingSpec,
    pub regressor: Regressor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingSpec {
    /// Drop the first label of each domain from its one-hot block
    #[serde(default = "default_drop_first")]
    pub drop_first: bool,
}

impl Default for EncodingSpec {
    fn default() -> Self {
        Self { drop_first: default_drop_first() }
    }
}

fn default_drop_first() -> bool { true }

/// Regression head applied to the encoded input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Regressor {
    #[serde(rename_all = "camelCase")]
    Linear { intercept: f64, coefficients: Vec<f64> },
    #[serde(rename_all = "camelCase")]
    TreeEnsemble {
        base_score: f64,
        n_features: usize,
        trees: Vec<RegressionTree>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// Tree node; a split sends values below `threshold` left
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

impl RegressionTree {
    /// Walk from the root to a leaf. Children always point forward, so this
    /// terminates.
    #[inline]
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split { feature, threshold, left, right } => {
                    index = if row[feature] < threshold { left } else { right };
                }
            }
        }
    }

    fn check(&self, tree: usize, n_features: usize) -> Result<(), ArtifactError> {
        let fail = |reason: String| ArtifactError::Tree { tree, reason };

        if self.nodes.is_empty() {
            return Err(fail("has no nodes".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, left, right } = *node {
                if feature >= n_features {
                    return Err(fail(format!("node {} splits on feature {} of {}", i, feature, n_features)));
                }
                if !threshold.is_finite() {
                    return Err(fail(format!("node {} has a non-finite threshold", i)));
                }
                for child in [left, right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(fail(format!("node {} points to invalid child {}", i, child)));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Column layout of the encoded input
///
/// One one-hot block per categorical slot in feature order, followed by the
/// numeric slots in feature order.
#[derive(Debug, Clone)]
struct Encoder {
    domains: HashMap<CategoricalField, Vec<String>>,
    drop_first: bool,
    width: usize,
}

impl Encoder {
    fn new(domains: HashMap<CategoricalField, Vec<String>>, drop_first: bool) -> Result<Self, ArtifactError> {
        let mut width = 0;
        for slot in FEATURE_ORDER {
            match slot.categorical() {
                Some(field) => {
                    let domain = domains
                        .get(&field)
                        .filter(|d| !d.is_empty())
                        .ok_or(ArtifactError::EmptyDomain(field))?;
                    width += domain.len() - usize::from(drop_first);
                }
                None => width += 1,
            }
        }
        Ok(Self { domains, drop_first, width })
    }

    fn encode(&self, features: &FeatureVector) -> Result<Vec<f64>, ComputationError> {
        let mut one_hot = Vec::with_capacity(self.width);
        let mut numeric = Vec::new();

        for (slot, value) in features.iter() {
            match slot.categorical() {
                Some(field) => {
                    let label = value.as_category().ok_or(ComputationError::SlotType {
                        slot,
                        expected: "categorical",
                    })?;
                    let domain = self.domains.get(&field).map(Vec::as_slice).unwrap_or_default();
                    let position = domain
                        .iter()
                        .position(|known| known == label)
                        .ok_or_else(|| ComputationError::UnknownCategory {
                            field,
                            label: label.to_string(),
                        })?;

                    let skip = usize::from(self.drop_first);
                    one_hot.extend((skip..domain.len()).map(|i| if i == position { 1.0 } else { 0.0 }));
                }
                None => {
                    let number = value.as_number().ok_or(ComputationError::SlotType {
                        slot,
                        expected: "numeric",
                    })?;
                    numeric.push(number);
                }
            }
        }

        one_hot.extend(numeric);
        if one_hot.len() != self.width {
            return Err(ComputationError::ShapeMismatch {
                expected: self.width,
                actual: one_hot.len(),
            });
        }
        Ok(one_hot)
    }
}

/// Immutable price model loaded once at startup
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    name: String,
    version: String,
    encoder: Encoder,
    regressor: Regressor,
}

impl ModelArtifact {
    /// Load and check a JSON artifact from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let spec: ArtifactSpec = serde_json::from_slice(&bytes)?;
        let artifact = Self::from_spec(spec)?;

        tracing::info!(
            "Loaded model artifact {} v{} ({} encoded inputs) from {}",
            artifact.name,
            artifact.version,
            artifact.encoder.width,
            path.display()
        );

        Ok(artifact)
    }

    /// Build from an in-memory spec, checking it against the feature layout
    pub fn from_spec(spec: ArtifactSpec) -> Result<Self, ArtifactError> {
        if spec.feature_order.len() != FEATURE_ORDER.len() {
            return Err(ArtifactError::FeatureCount(spec.feature_order.len()));
        }
        for (index, (found, expected)) in spec.feature_order.iter().zip(FEATURE_ORDER).enumerate() {
            if found != expected.as_str() {
                return Err(ArtifactError::FeatureOrder {
                    index,
                    found: found.clone(),
                    expected: expected.as_str(),
                });
            }
        }

        let encoder = Encoder::new(spec.category_domains, spec.encoding.drop_first)?;

        match &spec.regressor {
            Regressor::Linear { coefficients, .. } => {
                if coefficients.len() != encoder.width {
                    return Err(ArtifactError::Width {
                        expected: coefficients.len(),
                        actual: encoder.width,
                    });
                }
            }
            Regressor::TreeEnsemble { n_features, trees, .. } => {
                if *n_features != encoder.width {
                    return Err(ArtifactError::Width {
                        expected: *n_features,
                        actual: encoder.width,
                    });
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.check(i, *n_features)?;
                }
            }
        }

        Ok(Self {
            name: spec.name,
            version: spec.version,
            encoder,
            regressor: spec.regressor,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of columns after categorical encoding
    pub fn encoded_width(&self) -> usize {
        self.encoder.width
    }
}

impl PricePredictor for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ComputationError> {
        let row = self.encoder.encode(features)?;

        let log_price = match &self.regressor {
            Regressor::Linear { intercept, coefficients } => {
                intercept + coefficients.iter().zip(&row).map(|(w, x)| w * x).sum::<f64>()
            }
            Regressor::TreeEnsemble { base_score, trees, .. } => {
                base_score + trees.iter().map(|tree| tree.evaluate(&row)).sum::<f64>()
            }
        };

        if log_price.is_finite() {
            Ok(log_price)
        } else {
            Err(ComputationError::Model(format!("{} produced a non-finite output", self.name)))
        }
    }

    fn category_domain(&self, field: CategoricalField) -> Option<&[String]> {
        self.encoder.domains.get(&field).map(Vec::as_slice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
