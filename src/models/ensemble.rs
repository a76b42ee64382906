//! Soft-voting ensemble evaluation.
//!
//! The ensemble probability is the weight-normalized mean of member
//! probabilities; the decision compares it against the bundle threshold.
//! Deterministic given identical input and bundle.

use crate::artifacts::bundle::{LinearModel, MemberModel, ModelBundle};
use crate::domain::{Decision, MemberScore, Prediction};
use crate::error::AppError;
use crate::models::gbdt;

/// Evaluate the full ensemble for one encoded-and-scaled feature vector.
pub fn predict(bundle: &ModelBundle, x: &[f64]) -> Result<Prediction, AppError> {
    if x.len() != bundle.feature_names.len() {
        return Err(AppError::schema_mismatch(format!(
            "feature vector has {} values, model expects {}",
            x.len(),
            bundle.feature_names.len()
        )));
    }

    let mut members = Vec::with_capacity(bundle.ensemble.members.len());
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for member in &bundle.ensemble.members {
        let member_margin = match &member.model {
            MemberModel::Gbdt(model) => gbdt::margin(model, x)?,
            MemberModel::Linear(model) => linear_margin(model, x)?,
        };
        let probability = gbdt::sigmoid(member_margin);
        weighted_sum += member.weight * probability;
        weight_total += member.weight;
        members.push(MemberScore {
            name: member.name.clone(),
            probability,
        });
    }

    // Weights are validated positive at load, so the total cannot be zero.
    let probability = weighted_sum / weight_total;
    let threshold = bundle.ensemble.threshold;
    let decision = if probability >= threshold {
        Decision::Approved
    } else {
        Decision::Denied
    };

    Ok(Prediction {
        probability,
        threshold,
        decision,
        members,
    })
}

fn linear_margin(model: &LinearModel, x: &[f64]) -> Result<f64, AppError> {
    if model.coefficients.len() != x.len() {
        return Err(AppError::schema_mismatch(format!(
            "linear member has {} coefficients for a {}-value vector",
            model.coefficients.len(),
            x.len()
        )));
    }
    let dot: f64 = model
        .coefficients
        .iter()
        .zip(x.iter())
        .map(|(c, v)| c * v)
        .sum();
    Ok(model.intercept + dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{assemble_vector, encode_record, scale_record};
    use crate::testkit::{demo_bundle, reference_record};

    fn reference_vector(bundle: &ModelBundle) -> Vec<f64> {
        let encoded = encode_record(&reference_record(), bundle).unwrap();
        let scaled = scale_record(&encoded, bundle).unwrap();
        assemble_vector(&scaled, bundle).unwrap()
    }

    #[test]
    fn probability_is_weighted_mean_of_members() {
        let bundle = demo_bundle();
        let x = reference_vector(&bundle);
        let prediction = predict(&bundle, &x).unwrap();

        assert_eq!(prediction.members.len(), 2);
        let by_hand: f64 = prediction
            .members
            .iter()
            .zip(bundle.ensemble.members.iter())
            .map(|(score, member)| member.weight * score.probability)
            .sum::<f64>()
            / bundle
                .ensemble
                .members
                .iter()
                .map(|m| m.weight)
                .sum::<f64>();
        assert!((prediction.probability - by_hand).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&prediction.probability));
    }

    #[test]
    fn reference_record_is_approved() {
        let bundle = demo_bundle();
        let x = reference_vector(&bundle);
        let prediction = predict(&bundle, &x).unwrap();
        assert_eq!(prediction.decision, Decision::Approved);
        assert!(prediction.probability > 0.5, "{}", prediction.probability);
    }

    #[test]
    fn decision_tracks_threshold_boundary() {
        let mut bundle = demo_bundle();
        let x = reference_vector(&bundle);
        let p = predict(&bundle, &x).unwrap().probability;

        // A threshold exactly at the probability still approves (>=).
        bundle.ensemble.threshold = p;
        assert_eq!(
            predict(&bundle, &x).unwrap().decision,
            Decision::Approved
        );

        bundle.ensemble.threshold = (p + 1e-6).min(0.999_999);
        assert_eq!(predict(&bundle, &x).unwrap().decision, Decision::Denied);
    }

    #[test]
    fn repeated_invocations_are_identical() {
        let bundle = demo_bundle();
        let x = reference_vector(&bundle);
        let a = predict(&bundle, &x).unwrap();
        let b = predict(&bundle, &x).unwrap();
        assert_eq!(a.probability, b.probability);
        assert_eq!(a.decision, b.decision);
    }

    #[test]
    fn wrong_vector_length_is_a_schema_error() {
        let bundle = demo_bundle();
        let err = predict(&bundle, &[0.0; 12]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::SchemaMismatch { .. }
        ));
    }
}
