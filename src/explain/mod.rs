//! Decision-path feature attribution for the designated tree member.
//!
//! At every split passed on the root-to-leaf walk, the change in the node
//! expected value is credited to the split feature, so per-tree credits sum
//! exactly to `leaf - root_expectation` and the total sums to
//! `margin - baseline`. Contributions are on the log-odds scale.
//!
//! This is a presentation aid: [`explain`] degrades to `None` (with a
//! warning) instead of failing the submission when the designated member is
//! missing or not tree-based.

use tracing::warn;

use crate::artifacts::bundle::{MemberModel, ModelBundle, Node};
use crate::domain::{Attribution, FeatureContribution};
use crate::error::AppError;

/// Best-effort attribution; never blocks the decision.
pub fn explain(bundle: &ModelBundle, x: &[f64]) -> Option<Attribution> {
    match try_explain(bundle, x) {
        Ok(attribution) => attribution,
        Err(err) => {
            warn!("attribution skipped: {err}");
            None
        }
    }
}

/// Attribution for the bundle's designated member, or `Ok(None)` when the
/// bundle designates none.
pub fn try_explain(bundle: &ModelBundle, x: &[f64]) -> Result<Option<Attribution>, AppError> {
    let Some(member_name) = &bundle.ensemble.explain_member else {
        return Ok(None);
    };

    let member = bundle.member(member_name).ok_or_else(|| {
        AppError::schema_mismatch(format!("explain member '{member_name}' not found"))
    })?;
    let MemberModel::Gbdt(gbdt) = &member.model else {
        return Err(AppError::schema_mismatch(format!(
            "explain member '{member_name}' is not tree-based"
        )));
    };

    if x.len() != bundle.feature_names.len() {
        return Err(AppError::schema_mismatch(format!(
            "feature vector has {} values, schema has {}",
            x.len(),
            bundle.feature_names.len()
        )));
    }

    let mut credits = vec![0.0f64; bundle.feature_names.len()];
    let mut baseline = gbdt.base_score;
    let mut margin = gbdt.base_score;

    for tree in &gbdt.trees {
        baseline += tree.nodes[0].value();

        let mut idx = 0usize;
        let mut current_value = tree.nodes[0].value();
        loop {
            match &tree.nodes[idx] {
                Node::Leaf { value } => {
                    margin += *value;
                    break;
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let next = if x[*feature] < *threshold { *left } else { *right };
                    let next_value = tree.nodes[next].value();
                    credits[*feature] += next_value - current_value;
                    current_value = next_value;
                    idx = next;
                }
            }
        }
    }

    let contributions = bundle
        .feature_names
        .iter()
        .enumerate()
        .map(|(idx, name)| FeatureContribution {
            feature: name.clone(),
            value: x[idx],
            contribution: credits[idx],
        })
        .collect();

    Ok(Some(Attribution {
        member: member_name.clone(),
        baseline,
        margin,
        contributions,
    }))
}
