//! Versioned model bundle: feature schema, encoders, scaler, ensemble.
//!
//! The bundle is the single source of truth for everything the training run
//! fitted: the feature order, the categorical vocabularies, the scaler
//! statistics, and the model parameters. Keeping the vocabularies inside the
//! bundle (instead of hardcoding them next to the form) means encoder and
//! model cannot silently drift apart when artifacts are swapped.
//!
//! Trees are stored as flat node arrays with the root at index 0. Split
//! convention: `x[feature] < threshold` goes left, otherwise right. Every
//! node carries its training-time expected value so decision-path attribution
//! needs no extra artifact.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::fields;
use crate::error::AppError;

/// Bundle format revision this build understands.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// A fitted categorical vocabulary; code = index in `classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSpec {
    pub classes: Vec<String>,
}

/// Fitted standardization statistics, paired to fields by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSpec {
    pub fields: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerSpec {
    /// Look up the fitted `(mean, scale)` pair for a field.
    pub fn params_for(&self, field: &str) -> Option<(f64, f64)> {
        let idx = self.fields.iter().position(|f| f == field)?;
        Some((self.mean[idx], self.scale[idx]))
    }
}

/// One tree node; children always come after their parent in the array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        /// Expected margin at this node over the training distribution.
        value: f64,
    },
    Leaf {
        value: f64,
    },
}

impl Node {
    pub fn value(&self) -> f64 {
        match self {
            Node::Split { value, .. } => *value,
            Node::Leaf { value } => *value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// Gradient-boosted trees with a logistic link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModel {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

/// Logistic regression member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberModel {
    Gbdt(GbdtModel),
    Linear(LinearModel),
}

/// One soft-voting ensemble member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub weight: f64,
    pub model: MemberModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleSpec {
    /// Positive-class decision threshold.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Which member the attribution explainer runs on (must be tree-based).
    #[serde(default)]
    pub explain_member: Option<String>,
    pub members: Vec<Member>,
}

fn default_threshold() -> f64 {
    0.5
}

/// The full artifact bundle as serialized by the training side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub schema_version: u32,
    /// Model input order; the feature vector is assembled to match.
    pub feature_names: Vec<String>,
    /// Fitted vocabularies. A categorical field absent here falls back to the
    /// fixed ordinal reference table in `features::encode`.
    #[serde(default)]
    pub encoders: BTreeMap<String, EncoderSpec>,
    pub scaler: ScalerSpec,
    pub ensemble: EnsembleSpec,
}

impl ModelBundle {
    /// Cross-artifact consistency checks, run once at load time.
    ///
    /// A violation here is a configuration bug (mismatched or hand-edited
    /// artifacts), so everything reports as `SchemaMismatch` with enough
    /// detail to identify the offending piece.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(AppError::schema_mismatch(format!(
                "bundle schema_version {} (supported: {SUPPORTED_SCHEMA_VERSION})",
                self.schema_version
            )));
        }

        let expected: BTreeSet<&str> = fields::ALL.iter().copied().collect();
        let actual: BTreeSet<&str> = self.feature_names.iter().map(String::as_str).collect();
        if actual.len() != self.feature_names.len() {
            return Err(AppError::schema_mismatch(
                "duplicate entries in feature_names",
            ));
        }
        if actual != expected {
            return Err(AppError::schema_mismatch(format!(
                "feature_names must cover exactly the applicant schema; got [{}]",
                self.feature_names.join(", ")
            )));
        }

        self.validate_scaler()?;
        self.validate_encoders()?;
        self.validate_ensemble()?;
        Ok(())
    }

    fn validate_scaler(&self) -> Result<(), AppError> {
        let s = &self.scaler;
        if s.fields.len() != s.mean.len() || s.fields.len() != s.scale.len() {
            return Err(AppError::schema_mismatch(format!(
                "scaler arity mismatch: {} fields, {} means, {} scales",
                s.fields.len(),
                s.mean.len(),
                s.scale.len()
            )));
        }

        let expected: BTreeSet<&str> = fields::NUMERIC.iter().copied().collect();
        let actual: BTreeSet<&str> = s.fields.iter().map(String::as_str).collect();
        if actual != expected {
            return Err(AppError::schema_mismatch(format!(
                "scaler fields must cover exactly the numeric subset; got [{}]",
                s.fields.join(", ")
            )));
        }

        for (idx, field) in s.fields.iter().enumerate() {
            if !s.mean[idx].is_finite() {
                return Err(AppError::schema_mismatch(format!(
                    "non-finite scaler mean for '{field}'"
                )));
            }
            if !(s.scale[idx].is_finite() && s.scale[idx] > 0.0) {
                return Err(AppError::schema_mismatch(format!(
                    "scaler scale for '{field}' must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    fn validate_encoders(&self) -> Result<(), AppError> {
        for (field, spec) in &self.encoders {
            if !fields::CATEGORICAL.contains(&field.as_str()) {
                return Err(AppError::schema_mismatch(format!(
                    "encoder supplied for non-categorical field '{field}'"
                )));
            }
            if spec.classes.is_empty() {
                return Err(AppError::schema_mismatch(format!(
                    "empty vocabulary for '{field}'"
                )));
            }
            let unique: BTreeSet<&str> = spec.classes.iter().map(String::as_str).collect();
            if unique.len() != spec.classes.len() {
                return Err(AppError::schema_mismatch(format!(
                    "duplicate classes in vocabulary for '{field}'"
                )));
            }
        }
        Ok(())
    }

    fn validate_ensemble(&self) -> Result<(), AppError> {
        let e = &self.ensemble;
        if e.members.is_empty() {
            return Err(AppError::schema_mismatch("ensemble has no members"));
        }
        if !(e.threshold.is_finite() && e.threshold > 0.0 && e.threshold < 1.0) {
            return Err(AppError::schema_mismatch(format!(
                "decision threshold {} outside (0, 1)",
                e.threshold
            )));
        }

        let mut names = BTreeSet::new();
        for member in &e.members {
            if !names.insert(member.name.as_str()) {
                return Err(AppError::schema_mismatch(format!(
                    "duplicate ensemble member '{}'",
                    member.name
                )));
            }
            if !(member.weight.is_finite() && member.weight > 0.0) {
                return Err(AppError::schema_mismatch(format!(
                    "member '{}' weight must be finite and > 0",
                    member.name
                )));
            }
            match &member.model {
                MemberModel::Gbdt(gbdt) => self.validate_gbdt(&member.name, gbdt)?,
                MemberModel::Linear(linear) => self.validate_linear(&member.name, linear)?,
            }
        }

        if let Some(explain) = &e.explain_member {
            if !names.contains(explain.as_str()) {
                return Err(AppError::schema_mismatch(format!(
                    "explain_member '{explain}' names no ensemble member"
                )));
            }
        }
        Ok(())
    }

    fn validate_gbdt(&self, name: &str, gbdt: &GbdtModel) -> Result<(), AppError> {
        if !gbdt.base_score.is_finite() {
            return Err(AppError::schema_mismatch(format!(
                "member '{name}' has non-finite base_score"
            )));
        }
        if gbdt.trees.is_empty() {
            return Err(AppError::schema_mismatch(format!(
                "member '{name}' has no trees"
            )));
        }
        for (tree_idx, tree) in gbdt.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(AppError::schema_mismatch(format!(
                    "member '{name}' tree {tree_idx} has no nodes"
                )));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                let Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } = node
                else {
                    continue;
                };
                if *feature >= self.feature_names.len() {
                    return Err(AppError::schema_mismatch(format!(
                        "member '{name}' tree {tree_idx} splits on feature index {feature} \
                         (schema has {})",
                        self.feature_names.len()
                    )));
                }
                if !threshold.is_finite() {
                    return Err(AppError::schema_mismatch(format!(
                        "member '{name}' tree {tree_idx} node {node_idx} has non-finite threshold"
                    )));
                }
                // Children strictly after the parent: walks always terminate.
                if *left <= node_idx || *right <= node_idx {
                    return Err(AppError::schema_mismatch(format!(
                        "member '{name}' tree {tree_idx} node {node_idx} children must come \
                         after the node"
                    )));
                }
                if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                    return Err(AppError::schema_mismatch(format!(
                        "member '{name}' tree {tree_idx} node {node_idx} child index out of range"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_linear(&self, name: &str, linear: &LinearModel) -> Result<(), AppError> {
        if linear.coefficients.len() != self.feature_names.len() {
            return Err(AppError::schema_mismatch(format!(
                "member '{name}' has {} coefficients for {} features",
                linear.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !linear.intercept.is_finite() || linear.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::schema_mismatch(format!(
                "member '{name}' has non-finite parameters"
            )));
        }
        Ok(())
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.ensemble.members.iter().find(|m| m.name == name)
    }
}
