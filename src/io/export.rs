//! Write decision JSON and batch CSV files.
//!
//! Decision JSON is the "portable" representation of one screening run:
//! the raw applicant, the prediction, and the attribution when available.
//! The schema is defined by `domain::DecisionFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{ApplicantRecord, Attribution, DecisionFile, Prediction};
use crate::error::AppError;

/// Write a decision JSON file.
pub fn write_decision_json(
    path: &Path,
    record: &ApplicantRecord,
    prediction: &Prediction,
    attribution: Option<&Attribution>,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create decision JSON '{}': {e}",
            path.display()
        ))
    })?;

    let decision = DecisionFile {
        tool: "uw".to_string(),
        generated_at: Utc::now(),
        applicant: record.clone(),
        prediction: prediction.clone(),
        attribution: attribution.cloned(),
    };

    serde_json::to_writer_pretty(file, &decision)
        .map_err(|e| AppError::io(format!("Failed to write decision JSON: {e}")))?;

    Ok(())
}

/// Write per-applicant batch results to CSV.
pub fn write_batch_csv(
    path: &Path,
    scored: &[(ApplicantRecord, Prediction)],
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create batch CSV '{}': {e}",
            path.display()
        ))
    })?;

    writer
        .write_record([
            "age",
            "income",
            "employment_experience_years",
            "loan_amount",
            "loan_interest_rate",
            "credit_history_length_years",
            "credit_score",
            "previous_default_on_file",
            "home_ownership",
            "loan_intent",
            "gender",
            "education",
            "probability",
            "decision",
        ])
        .map_err(|e| AppError::io(format!("Failed to write CSV header: {e}")))?;

    for (record, prediction) in scored {
        writer
            .write_record([
                record.age.to_string(),
                format!("{:.0}", record.income),
                record.employment_years.to_string(),
                format!("{:.0}", record.loan_amount),
                format!("{:.1}", record.interest_rate),
                record.credit_history_years.to_string(),
                record.credit_score.to_string(),
                record.previous_default.label().to_string(),
                record.home_ownership.label().to_string(),
                record.loan_intent.label().to_string(),
                record.gender.label().to_string(),
                record.education.label().to_string(),
                format!("{:.6}", prediction.probability),
                prediction.decision.display_name().to_string(),
            ])
            .map_err(|e| AppError::io(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush CSV: {e}")))?;
    Ok(())
}
