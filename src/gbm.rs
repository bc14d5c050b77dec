use anyhow::{Context, Result, bail};
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Inference errors
// ---------------------------------------------------------------------------

/// Errors a loaded model can raise at prediction time. Artifact problems are
/// reported through `anyhow` at load time instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("model expects {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("tree {tree}: node index {node} out of bounds")]
    CorruptTree { tree: usize, node: usize },
}

// ---------------------------------------------------------------------------
// SalaryModel – the inference seam
// ---------------------------------------------------------------------------

/// Anything that maps an employee feature vector to a salary figure.
pub trait SalaryModel {
    fn predict(&self, features: &[f64]) -> Result<f64, PredictError>;
}

// ---------------------------------------------------------------------------
// Gradient-boosted ensemble, deserialized from the model artifact
// ---------------------------------------------------------------------------

/// One node of a regression tree. Splits route `feature <= threshold` to
/// `left`, otherwise to `right`; leaves carry the tree output.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk from the root to a leaf. Returns `None` on a malformed tree;
    /// `validate` rejects those at load time.
    fn output(&self, features: &[f64]) -> Option<f64> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx)? {
                TreeNode::Leaf { value } => return Some(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if *features.get(*feature)? <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// A pre-fitted gradient-boosted regression ensemble. Immutable after load;
/// `predict` sums the leaf outputs of every tree, scaled by the learning
/// rate, on top of the initial prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct GradientBoostingModel {
    pub feature_names: Vec<String>,
    pub init_prediction: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBoostingModel {
    /// Parse and validate a JSON model artifact.
    pub fn from_json(text: &str) -> Result<Self> {
        let model: GradientBoostingModel =
            serde_json::from_str(text).context("parsing model artifact JSON")?;
        model.validate()?;
        Ok(model)
    }

    /// Number of input features the model expects.
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Reject artifacts whose trees could misroute or loop: child indices
    /// must stay in bounds and point strictly forward, and split features
    /// must exist in `feature_names`.
    fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            bail!("model artifact declares no features");
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                bail!("tree {t} has no nodes");
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.feature_names.len() {
                        bail!("tree {t} node {n}: feature index {feature} out of range");
                    }
                    for child in [*left, *right] {
                        if child <= n || child >= tree.nodes.len() {
                            bail!("tree {t} node {n}: child index {child} is not forward");
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl SalaryModel for GradientBoostingModel {
    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.n_features() {
            return Err(PredictError::FeatureMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }

        let mut prediction = self.init_prediction;
        for (t, tree) in self.trees.iter().enumerate() {
            let out = tree
                .output(features)
                .ok_or(PredictError::CorruptTree { tree: t, node: 0 })?;
            prediction += self.learning_rate * out;
        }
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ARTIFACT: &str = r#"{
        "feature_names": ["Age", "Year of Experience"],
        "init_prediction": 50000.0,
        "learning_rate": 0.5,
        "trees": [
            {
                "nodes": [
                    {"feature": 1, "threshold": 10.0, "left": 1, "right": 2},
                    {"value": -8000.0},
                    {"value": 12000.0}
                ]
            },
            {
                "nodes": [
                    {"feature": 0, "threshold": 35.0, "left": 1, "right": 2},
                    {"value": -2000.0},
                    {"value": 4000.0}
                ]
            }
        ]
    }"#;

    #[test]
    fn predicts_by_summing_scaled_tree_outputs() {
        let model = GradientBoostingModel::from_json(SAMPLE_ARTIFACT).unwrap();

        // exp <= 10 and age <= 35: 50000 + 0.5*(-8000) + 0.5*(-2000)
        assert_eq!(model.predict(&[30.0, 5.0]).unwrap(), 45000.0);
        // exp > 10 and age > 35: 50000 + 0.5*12000 + 0.5*4000
        assert_eq!(model.predict(&[40.0, 15.0]).unwrap(), 58000.0);
    }

    #[test]
    fn predictions_are_finite_across_input_domains() {
        let model = GradientBoostingModel::from_json(SAMPLE_ARTIFACT).unwrap();
        for age in [18u32, 30, 65] {
            for experience in [0u32, 5, 50] {
                let p = model.predict(&[age as f64, experience as f64]).unwrap();
                assert!(p.is_finite(), "age={age} exp={experience} gave {p}");
            }
        }
    }

    #[test]
    fn feature_count_mismatch_is_an_error() {
        let model = GradientBoostingModel::from_json(SAMPLE_ARTIFACT).unwrap();
        assert_eq!(
            model.predict(&[30.0]),
            Err(PredictError::FeatureMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn backward_child_links_are_rejected_at_load() {
        let artifact = r#"{
            "feature_names": ["Age", "Year of Experience"],
            "init_prediction": 0.0,
            "learning_rate": 1.0,
            "trees": [
                {
                    "nodes": [
                        {"feature": 0, "threshold": 1.0, "left": 0, "right": 1},
                        {"value": 1.0}
                    ]
                }
            ]
        }"#;
        assert!(GradientBoostingModel::from_json(artifact).is_err());
    }

    #[test]
    fn out_of_range_feature_index_is_rejected_at_load() {
        let artifact = r#"{
            "feature_names": ["Age"],
            "init_prediction": 0.0,
            "learning_rate": 1.0,
            "trees": [
                {
                    "nodes": [
                        {"feature": 3, "threshold": 1.0, "left": 1, "right": 2},
                        {"value": 1.0},
                        {"value": 2.0}
                    ]
                }
            ]
        }"#;
        assert!(GradientBoostingModel::from_json(artifact).is_err());
    }
}
