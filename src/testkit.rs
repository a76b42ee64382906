//! Hand-built fixtures shared by unit tests across modules.
//!
//! The demo bundle is deliberately tiny (two boosted trees + one logistic
//! member) but exercises every artifact surface: fitted vocabularies for two
//! fields (the other three fall back to the ordinal reference tables), a full
//! scaler, per-node expected values for attribution, and a designated
//! explain member.

use std::collections::BTreeMap;

use crate::artifacts::bundle::{
    EncoderSpec, EnsembleSpec, GbdtModel, LinearModel, Member, MemberModel, ModelBundle, Node,
    ScalerSpec, Tree, SUPPORTED_SCHEMA_VERSION,
};
use crate::domain::{fields, ApplicantRecord};

fn split(feature: usize, threshold: f64, left: usize, right: usize, value: f64) -> Node {
    Node::Split {
        feature,
        threshold,
        left,
        right,
        value,
    }
}

fn leaf(value: f64) -> Node {
    Node::Leaf { value }
}

/// A small but fully valid bundle. Feature indices follow `fields::ALL`:
/// 5 = loan_percent_income, 7 = credit_score, 8 = previous_default_on_file.
pub(crate) fn demo_bundle() -> ModelBundle {
    let mut encoders = BTreeMap::new();
    encoders.insert(
        fields::HOME_OWNERSHIP.to_string(),
        EncoderSpec {
            classes: ["RENT", "OWN", "MORTGAGE", "OTHER"]
                .map(String::from)
                .to_vec(),
        },
    );
    encoders.insert(
        fields::LOAN_INTENT.to_string(),
        EncoderSpec {
            classes: [
                "EDUCATION",
                "MEDICAL",
                "VENTURE",
                "PERSONAL",
                "DEBTCONSOLIDATION",
                "HOMEIMPROVEMENT",
            ]
            .map(String::from)
            .to_vec(),
        },
    );

    let gbdt = GbdtModel {
        base_score: 0.0,
        trees: vec![
            Tree {
                nodes: vec![
                    split(7, 0.0, 1, 2, 0.0),
                    leaf(-0.8),
                    split(8, 0.5, 3, 4, 0.3),
                    leaf(1.2),
                    leaf(-1.0),
                ],
            },
            Tree {
                nodes: vec![split(5, 0.5, 1, 2, 0.05), leaf(0.4), leaf(-0.6)],
            },
        ],
    };

    // Coefficients in `fields::ALL` order.
    let logit = LinearModel {
        intercept: 0.4,
        coefficients: vec![
            -0.05, 0.3, 0.1, -0.2, -0.25, -0.8, 0.05, 0.9, -1.5, 0.1, 0.0, 0.0, 0.05,
        ],
    };

    ModelBundle {
        schema_version: SUPPORTED_SCHEMA_VERSION,
        feature_names: fields::ALL.map(String::from).to_vec(),
        encoders,
        scaler: ScalerSpec {
            fields: fields::NUMERIC.map(String::from).to_vec(),
            mean: vec![37.5, 65_000.0, 7.0, 9_500.0, 11.0, 0.17, 5.8, 630.0],
            scale: vec![12.0, 55_000.0, 6.0, 6_000.0, 3.0, 0.1, 4.0, 80.0],
        },
        ensemble: EnsembleSpec {
            threshold: 0.5,
            explain_member: Some("gbdt".to_string()),
            members: vec![
                Member {
                    name: "gbdt".to_string(),
                    weight: 0.6,
                    model: MemberModel::Gbdt(gbdt),
                },
                Member {
                    name: "logit".to_string(),
                    weight: 0.4,
                    model: MemberModel::Linear(logit),
                },
            ],
        },
    }
}

/// The end-to-end reference applicant: loan_percent_income works out to 0.2.
pub(crate) fn reference_record() -> ApplicantRecord {
    ApplicantRecord {
        interest_rate: 10.0,
        credit_score: 700,
        ..ApplicantRecord::default()
    }
}
