//! Shared prediction pipeline used by the CLI, the TUI, and batch runs.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> encode -> scale -> assemble -> predict -> (best-effort) explain
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use rayon::prelude::*;
use tracing::debug;

use crate::artifacts::ModelBundle;
use crate::domain::{ApplicantRecord, Attribution, Prediction};
use crate::error::AppError;
use crate::features::encode::EncodedRecord;
use crate::features::{assemble_vector, encode_record, scale_record};

/// All computed outputs of a single screening run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Encoded (pre-scaling) values, kept for inspection.
    pub encoded: EncodedRecord,
    /// Scaled values, still keyed by name.
    pub scaled: EncodedRecord,
    /// The final vector in the bundle's input order.
    pub vector: Vec<f64>,
    pub prediction: Prediction,
    /// Absent when the bundle designates no explainable member or the
    /// explanation failed (the decision stands either way).
    pub attribution: Option<Attribution>,
}

/// Execute the full screening pipeline for one applicant.
pub fn run_predict(bundle: &ModelBundle, record: &ApplicantRecord) -> Result<RunOutput, AppError> {
    let encoded = encode_record(record, bundle)?;
    let scaled = scale_record(&encoded, bundle)?;
    let vector = assemble_vector(&scaled, bundle)?;
    let prediction = crate::models::predict(bundle, &vector)?;
    let attribution = crate::explain::explain(bundle, &vector);

    debug!(
        probability = prediction.probability,
        decision = prediction.decision.display_name(),
        "screening complete"
    );

    Ok(RunOutput {
        encoded,
        scaled,
        vector,
        prediction,
        attribution,
    })
}

/// Score one applicant without the attribution step (batch fast path).
pub fn score_record(
    bundle: &ModelBundle,
    record: &ApplicantRecord,
) -> Result<Prediction, AppError> {
    let encoded = encode_record(record, bundle)?;
    let scaled = scale_record(&encoded, bundle)?;
    let vector = assemble_vector(&scaled, bundle)?;
    crate::models::predict(bundle, &vector)
}

/// Batch output: successfully scored applicants plus the failure count.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub scored: Vec<(ApplicantRecord, Prediction)>,
    pub failures: usize,
}

/// Score a batch of independent applicants across the Rayon pool.
///
/// The bundle is shared by immutable reference; each prediction is stateless,
/// so order of completion cannot affect results. Output order follows input
/// order.
pub fn run_batch(bundle: &ModelBundle, records: Vec<ApplicantRecord>) -> BatchOutput {
    let results: Vec<Result<Prediction, AppError>> = records
        .par_iter()
        .map(|record| score_record(bundle, record))
        .collect();

    let mut scored = Vec::with_capacity(records.len());
    let mut failures = 0usize;
    for (record, result) in records.into_iter().zip(results) {
        match result {
            Ok(prediction) => scored.push((record, prediction)),
            Err(err) => {
                failures += 1;
                tracing::warn!("batch record skipped: {err}");
            }
        }
    }

    BatchOutput { scored, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::bundle::EncoderSpec;
    use crate::domain::{fields, ApplicantRecord, HomeOwnership};
    use crate::testkit::{demo_bundle, reference_record};

    #[test]
    fn reference_scenario_end_to_end() {
        let bundle = demo_bundle();
        let run = run_predict(&bundle, &reference_record()).unwrap();

        // loan_percent_income derives to 0.2 before scaling.
        assert!(
            (run.encoded.get(fields::LOAN_PERCENT_INCOME).unwrap() - 0.2).abs() < 1e-12
        );
        assert_eq!(run.vector.len(), 13);
        assert!((0.0..=1.0).contains(&run.prediction.probability));
        assert!(run.attribution.is_some());
    }

    #[test]
    fn pipeline_is_deterministic() {
        let bundle = demo_bundle();
        let record = reference_record();
        let a = run_predict(&bundle, &record).unwrap();
        let b = run_predict(&bundle, &record).unwrap();
        assert_eq!(a.prediction.probability, b.prediction.probability);
        assert_eq!(a.vector, b.vector);
    }

    #[test]
    fn zero_income_never_reaches_the_scaler_as_nan() {
        let bundle = demo_bundle();
        let record = ApplicantRecord {
            income: 0.0,
            ..reference_record()
        };
        let run = run_predict(&bundle, &record).unwrap();
        assert!(run.vector.iter().all(|v| v.is_finite()));
        assert!((0.0..=1.0).contains(&run.prediction.probability));
    }

    #[test]
    fn unknown_category_halts_before_the_predictor() {
        let mut bundle = demo_bundle();
        bundle.encoders.insert(
            fields::HOME_OWNERSHIP.to_string(),
            EncoderSpec {
                classes: ["RENT", "OWN"].map(String::from).to_vec(),
            },
        );
        let record = ApplicantRecord {
            home_ownership: HomeOwnership::Other,
            ..reference_record()
        };
        let err = run_predict(&bundle, &record).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::UnknownCategory { .. }
        ));
    }

    #[test]
    fn batch_scores_every_valid_record() {
        let bundle = demo_bundle();
        let records = crate::sample::generate_applicants(40, 5).unwrap();
        let out = run_batch(&bundle, records);
        assert_eq!(out.scored.len(), 40);
        assert_eq!(out.failures, 0);
        for (_, prediction) in &out.scored {
            assert!((0.0..=1.0).contains(&prediction.probability));
        }
    }

    #[test]
    fn batch_output_preserves_input_order() {
        let bundle = demo_bundle();
        let records = crate::sample::generate_applicants(10, 9).unwrap();
        let incomes: Vec<f64> = records.iter().map(|r| r.income).collect();
        let out = run_batch(&bundle, records);
        let scored_incomes: Vec<f64> = out.scored.iter().map(|(r, _)| r.income).collect();
        assert_eq!(incomes, scored_incomes);
    }
}
