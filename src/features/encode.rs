//! Categorical encoding and derived-feature construction.
//!
//! Turning display labels into trained integer codes is the one contract
//! that must not drift from the artifact. Vocabularies therefore come from
//! the bundle when present (the fitted lookup) and only fall back to the
//! fixed reference tables below (the ordinal tables, in form option order)
//! when the bundle omits a field. The two strategies are not interchangeable:
//! a code is only meaningful next to the exact model it was fitted with.

use std::collections::BTreeMap;

use crate::artifacts::ModelBundle;
use crate::domain::{fields, ApplicantRecord};
use crate::error::AppError;

/// Guard against zero income in the ratio feature.
pub const INCOME_EPSILON: f64 = 1e-6;

/// Fixed ordinal reference tables (form option order).
///
/// Used only when the bundle carries no fitted vocabulary for the field.
fn reference_classes(field: &str) -> Option<&'static [&'static str]> {
    match field {
        fields::PREVIOUS_DEFAULT => Some(&["no", "yes"]),
        fields::HOME_OWNERSHIP => Some(&["RENT", "OWN", "MORTGAGE", "OTHER"]),
        fields::LOAN_INTENT => Some(&[
            "EDUCATION",
            "MEDICAL",
            "VENTURE",
            "PERSONAL",
            "DEBTCONSOLIDATION",
            "HOMEIMPROVEMENT",
        ]),
        fields::GENDER => Some(&["female", "male"]),
        fields::EDUCATION => Some(&[
            "High School",
            "Associate",
            "Bachelor",
            "Master",
            "Doctorate",
            "Other",
        ]),
        _ => None,
    }
}

/// The accepted vocabulary for a categorical field, bundle first.
pub fn vocabulary(bundle: &ModelBundle, field: &str) -> Result<Vec<String>, AppError> {
    if let Some(spec) = bundle.encoders.get(field) {
        return Ok(spec.classes.clone());
    }
    reference_classes(field)
        .map(|classes| classes.iter().map(|c| c.to_string()).collect())
        .ok_or_else(|| {
            AppError::schema_mismatch(format!("no vocabulary known for field '{field}'"))
        })
}

/// A record with every field resolved to the numeric value the model sees,
/// keyed by feature name.
#[derive(Debug, Clone)]
pub struct EncodedRecord {
    pub(crate) values: BTreeMap<&'static str, f64>,
}

impl EncodedRecord {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }
}

/// Derived ratio feature, ε-guarded and clamped so zero income can never
/// push NaN or infinity into the scaler.
pub fn loan_percent_income(loan_amount: f64, income: f64) -> f64 {
    (loan_amount / income.max(INCOME_EPSILON)).clamp(0.0, 1.0)
}

/// Validate the record and produce the fully encoded (pre-scaling) values.
///
/// Categorical fields are replaced by their trained integer code; the
/// derived `loan_percent_income` is computed here and never read from input.
pub fn encode_record(
    record: &ApplicantRecord,
    bundle: &ModelBundle,
) -> Result<EncodedRecord, AppError> {
    record.validate()?;

    let mut values: BTreeMap<&'static str, f64> = BTreeMap::new();
    values.insert(fields::AGE, f64::from(record.age));
    values.insert(fields::INCOME, record.income);
    values.insert(fields::EMPLOYMENT_YEARS, f64::from(record.employment_years));
    values.insert(fields::LOAN_AMOUNT, record.loan_amount);
    values.insert(fields::INTEREST_RATE, record.interest_rate);
    values.insert(
        fields::LOAN_PERCENT_INCOME,
        loan_percent_income(record.loan_amount, record.income),
    );
    values.insert(
        fields::CREDIT_HISTORY,
        f64::from(record.credit_history_years),
    );
    values.insert(fields::CREDIT_SCORE, f64::from(record.credit_score));

    values.insert(
        fields::PREVIOUS_DEFAULT,
        encode_label(bundle, fields::PREVIOUS_DEFAULT, record.previous_default.label())?,
    );
    values.insert(
        fields::HOME_OWNERSHIP,
        encode_label(bundle, fields::HOME_OWNERSHIP, record.home_ownership.label())?,
    );
    values.insert(
        fields::LOAN_INTENT,
        encode_label(bundle, fields::LOAN_INTENT, record.loan_intent.label())?,
    );
    values.insert(
        fields::GENDER,
        encode_label(bundle, fields::GENDER, record.gender.label())?,
    );
    values.insert(
        fields::EDUCATION,
        encode_label(bundle, fields::EDUCATION, record.education.label())?,
    );

    Ok(EncodedRecord { values })
}

/// Encode one categorical label against its vocabulary.
///
/// An absent label is a contract violation, reported with the accepted set.
pub fn encode_label(bundle: &ModelBundle, field: &str, label: &str) -> Result<f64, AppError> {
    let classes = vocabulary(bundle, field)?;
    classes
        .iter()
        .position(|c| c == label)
        .map(|code| code as f64)
        .ok_or_else(|| AppError::unknown_category(field, label, &classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::bundle::EncoderSpec;
    use crate::domain::{ApplicantRecord, HomeOwnership};
    use crate::testkit::{demo_bundle, reference_record};

    #[test]
    fn reference_record_derives_expected_ratio() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let ratio = encoded.get(fields::LOAN_PERCENT_INCOME).unwrap();
        assert!((ratio - 0.2).abs() < 1e-12, "expected 0.2, got {ratio}");
    }

    #[test]
    fn ratio_is_clamped_to_one() {
        assert_eq!(loan_percent_income(80_000.0, 20_000.0), 1.0);
    }

    #[test]
    fn zero_income_stays_finite() {
        let ratio = loan_percent_income(10_000.0, 0.0);
        assert!(ratio.is_finite());
        assert_eq!(ratio, 1.0);

        let bundle = demo_bundle();
        let record = ApplicantRecord {
            income: 0.0,
            ..reference_record()
        };
        let encoded = encode_record(&record, &bundle).unwrap();
        for (name, value) in encoded.iter() {
            assert!(value.is_finite(), "non-finite value for {name}");
        }
    }

    #[test]
    fn codes_fall_in_vocabulary_range() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        for field in fields::CATEGORICAL {
            let code = encoded.get(field).unwrap();
            let size = vocabulary(&bundle, field).unwrap().len() as f64;
            assert!(
                (0.0..size).contains(&code),
                "{field} code {code} outside [0, {size})"
            );
            assert_eq!(code.fract(), 0.0);
        }
    }

    #[test]
    fn fitted_vocabulary_wins_over_reference_table() {
        let mut bundle = demo_bundle();
        // Reversed ordering relative to the reference table.
        bundle.encoders.insert(
            fields::HOME_OWNERSHIP.to_string(),
            EncoderSpec {
                classes: ["OTHER", "MORTGAGE", "OWN", "RENT"].map(String::from).to_vec(),
            },
        );
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        // RENT is index 0 in the reference table but 3 in the fitted lookup.
        assert_eq!(encoded.get(fields::HOME_OWNERSHIP), Some(3.0));
    }

    #[test]
    fn label_outside_fitted_vocabulary_fails_before_prediction() {
        let mut bundle = demo_bundle();
        bundle.encoders.insert(
            fields::HOME_OWNERSHIP.to_string(),
            EncoderSpec {
                classes: ["RENT", "OWN"].map(String::from).to_vec(),
            },
        );
        let record = ApplicantRecord {
            home_ownership: HomeOwnership::Mortgage,
            ..reference_record()
        };
        let err = encode_record(&record, &bundle).unwrap_err();
        match err {
            crate::error::AppError::UnknownCategory {
                field,
                value,
                accepted,
            } => {
                assert_eq!(field, fields::HOME_OWNERSHIP);
                assert_eq!(value, "MORTGAGE");
                assert_eq!(accepted, vec!["RENT".to_string(), "OWN".to_string()]);
            }
            other => panic!("expected UnknownCategory, got {other}"),
        }
    }

    #[test]
    fn raw_label_outside_any_vocabulary_is_rejected() {
        let bundle = demo_bundle();
        let err = encode_label(&bundle, fields::HOME_OWNERSHIP, "CONDO").unwrap_err();
        match err {
            crate::error::AppError::UnknownCategory { value, accepted, .. } => {
                assert_eq!(value, "CONDO");
                assert_eq!(accepted.len(), 4);
            }
            other => panic!("expected UnknownCategory, got {other}"),
        }
    }

    #[test]
    fn out_of_bounds_record_is_rejected() {
        let bundle = demo_bundle();
        let record = ApplicantRecord {
            loan_amount: 100.0,
            ..reference_record()
        };
        assert!(encode_record(&record, &bundle).is_err());
    }

    #[test]
    fn encoded_record_covers_full_schema() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        assert_eq!(encoded.len(), fields::ALL.len());
        for name in fields::ALL {
            assert!(encoded.get(name).is_some(), "missing {name}");
        }
    }
}
