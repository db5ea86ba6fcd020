//! Opaque predictors
//!
//! The service only ever sees `Predictor`: a fixed input width and a
//! function from a feature slice to one number. The two built-in model
//! families are the ones the artifact format can describe.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{InferenceError, InferenceResult};

/// A pre-trained prediction function with a fixed input width
pub trait Predictor: Send + Sync + fmt::Debug {
    /// Number of features expected by `predict`
    fn input_width(&self) -> usize;

    /// Runs the model on one feature row. Callers check the width first.
    fn predict(&self, features: &[f64]) -> InferenceResult<f64>;
}

/// Output transform of a linear model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    /// Regression output
    #[default]
    Identity,
    /// Probability of the positive class
    Logistic,
}

/// `intercept + Σ coefficients[i] * x[i]`, optionally through a logistic link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub link: Link,
}

impl LinearModel {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err("linear model has non-finite parameters".into());
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> InferenceResult<f64> {
        let margin = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (c, x)| acc + c * x);

        Ok(match self.link {
            Link::Identity => margin,
            Link::Logistic => 1.0 / (1.0 + (-margin).exp()),
        })
    }
}

/// A node of a regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: f64,
    },
    /// Goes `left` when `x[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Flat node array, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Children must point forward, which rules out cycles.
    fn validate(&self, tree_index: usize, width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {} has no nodes", tree_index));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("tree {} node {}: non-finite leaf", tree_index, i));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= width {
                        return Err(format!(
                            "tree {} node {}: feature {} out of range (width {})",
                            tree_index, i, feature, width
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("tree {} node {}: NaN threshold", tree_index, i));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(format!(
                                "tree {} node {}: invalid child index {}",
                                tree_index, i, child
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// How per-tree outputs are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest style
    #[default]
    Mean,
    /// Gradient boosting style
    Sum,
}

/// `base_score + aggregate(tree outputs)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Declared input width; every split feature index must be below it
    pub n_features: usize,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("tree ensemble has no trees".into());
        }
        if !self.base_score.is_finite() {
            return Err("tree ensemble has a non-finite base_score".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn input_width(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> InferenceResult<f64> {
        if features.len() < self.n_features {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let total: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}
