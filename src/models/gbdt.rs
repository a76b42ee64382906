//! Gradient-boosted tree evaluation.
//!
//! A prediction is `base_score + Σ leaf values`, squashed through the
//! logistic link. Split convention: `x[feature] < threshold` goes left.

use crate::artifacts::bundle::{GbdtModel, Node, Tree};
use crate::error::AppError;

/// Raw (pre-sigmoid) margin for one feature vector.
pub fn margin(model: &GbdtModel, x: &[f64]) -> Result<f64, AppError> {
    let mut sum = model.base_score;
    for tree in &model.trees {
        sum += tree_leaf(tree, x)?;
    }
    Ok(sum)
}

/// Walk one tree to its leaf value.
pub fn tree_leaf(tree: &Tree, x: &[f64]) -> Result<f64, AppError> {
    let mut idx = 0usize;
    loop {
        match &tree.nodes[idx] {
            Node::Leaf { value } => return Ok(*value),
            Node::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                let value = *x.get(*feature).ok_or_else(|| {
                    AppError::schema_mismatch(format!(
                        "tree split references feature index {feature} but the vector has {}",
                        x.len()
                    ))
                })?;
                idx = if value < *threshold { *left } else { *right };
            }
        }
    }
}

/// Numerically stable logistic link.
pub fn sigmoid(margin: f64) -> f64 {
    if margin >= 0.0 {
        1.0 / (1.0 + (-margin).exp())
    } else {
        let e = margin.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::bundle::MemberModel;
    use crate::testkit::demo_bundle;

    fn demo_gbdt() -> GbdtModel {
        let bundle = demo_bundle();
        for member in bundle.ensemble.members {
            if let MemberModel::Gbdt(gbdt) = member.model {
                return gbdt;
            }
        }
        panic!("demo bundle has no gbdt member");
    }

    #[test]
    fn margin_sums_base_score_and_leaves() {
        let gbdt = demo_gbdt();
        // Vector crafted so tree 1 routes right/left (score high, no default)
        // and tree 2 routes left (low ratio): 1.2 + 0.4.
        let mut x = vec![0.0; 13];
        x[7] = 0.875;
        x[8] = 0.0;
        x[5] = 0.3;
        let m = margin(&gbdt, &x).unwrap();
        assert!((m - 1.6).abs() < 1e-12, "got {m}");
    }

    #[test]
    fn short_vector_is_a_schema_error() {
        let gbdt = demo_gbdt();
        let err = margin(&gbdt, &[0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::SchemaMismatch { .. }
        ));
    }

    #[test]
    fn sigmoid_is_stable_and_bounded() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let gbdt = demo_gbdt();
        let mut x = vec![0.0; 13];
        x[7] = -1.2;
        let a = margin(&gbdt, &x).unwrap();
        let b = margin(&gbdt, &x).unwrap();
        assert_eq!(a, b);
    }
}
