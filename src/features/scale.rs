//! Fitted affine scaling and feature-vector assembly.
//!
//! The scaler replays `(value - mean) / scale` for exactly the numeric
//! subset, leaving categorical codes untouched. Fields are paired by name
//! against the bundle's fitted statistics, never by position: a field the
//! artifacts expect but the record lacks is a hard schema error instead of a
//! silently shifted column.

use crate::artifacts::ModelBundle;
use crate::error::AppError;
use crate::features::encode::EncodedRecord;

/// Apply the fitted standardization to the numeric fields.
pub fn scale_record(
    encoded: &EncodedRecord,
    bundle: &ModelBundle,
) -> Result<EncodedRecord, AppError> {
    let mut scaled = encoded.clone();

    for (idx, field) in bundle.scaler.fields.iter().enumerate() {
        let slot = scaled.values.get_mut(field.as_str()).ok_or_else(|| {
            AppError::schema_mismatch(format!(
                "scaler field '{field}' missing from the encoded record"
            ))
        })?;
        let mean = bundle.scaler.mean[idx];
        let scale = bundle.scaler.scale[idx];
        *slot = (*slot - mean) / scale;
        if !slot.is_finite() {
            return Err(AppError::schema_mismatch(format!(
                "scaling '{field}' produced a non-finite value"
            )));
        }
    }

    Ok(scaled)
}

/// Assemble the final feature vector in the bundle's declared input order.
pub fn assemble_vector(scaled: &EncodedRecord, bundle: &ModelBundle) -> Result<Vec<f64>, AppError> {
    let mut vector = Vec::with_capacity(bundle.feature_names.len());
    for name in &bundle.feature_names {
        let value = scaled.get(name).ok_or_else(|| {
            AppError::schema_mismatch(format!(
                "schema field '{name}' missing from the encoded record"
            ))
        })?;
        vector.push(value);
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields;
    use crate::features::encode::encode_record;
    use crate::testkit::{demo_bundle, reference_record};

    #[test]
    fn numeric_fields_are_standardized() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let scaled = scale_record(&encoded, &bundle).unwrap();

        // credit_score 700 with mean 630 / scale 80.
        let score = scaled.get(fields::CREDIT_SCORE).unwrap();
        assert!((score - 0.875).abs() < 1e-12, "got {score}");

        // loan_percent_income 0.2 with mean 0.17 / scale 0.1.
        let ratio = scaled.get(fields::LOAN_PERCENT_INCOME).unwrap();
        assert!((ratio - 0.3).abs() < 1e-9, "got {ratio}");
    }

    #[test]
    fn categorical_codes_pass_through_untouched() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let scaled = scale_record(&encoded, &bundle).unwrap();
        for field in fields::CATEGORICAL {
            assert_eq!(scaled.get(field), encoded.get(field), "{field} changed");
        }
    }

    #[test]
    fn vector_follows_bundle_feature_order() {
        let bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let scaled = scale_record(&encoded, &bundle).unwrap();
        let vector = assemble_vector(&scaled, &bundle).unwrap();

        assert_eq!(vector.len(), bundle.feature_names.len());
        for (idx, name) in bundle.feature_names.iter().enumerate() {
            assert_eq!(vector[idx], scaled.get(name).unwrap(), "slot {idx} ({name})");
        }
    }

    #[test]
    fn assembly_pairs_by_name_not_position() {
        let mut bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let scaled = scale_record(&encoded, &bundle).unwrap();
        let before = assemble_vector(&scaled, &bundle).unwrap();

        // A reordered schema must reorder the vector accordingly.
        bundle.feature_names.reverse();
        let after = assemble_vector(&scaled, &bundle).unwrap();
        let reversed: Vec<f64> = before.iter().rev().copied().collect();
        assert_eq!(after, reversed);
    }

    #[test]
    fn missing_schema_field_is_a_schema_error() {
        let mut bundle = demo_bundle();
        let encoded = encode_record(&reference_record(), &bundle).unwrap();
        let scaled = scale_record(&encoded, &bundle).unwrap();

        bundle.feature_names.push("debt_to_income".to_string());
        let err = assemble_vector(&scaled, &bundle).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::SchemaMismatch { .. }
        ));
    }
}
