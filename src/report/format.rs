//! Terminal output formatting.

use crate::artifacts::ModelBundle;
use crate::domain::{ApplicantRecord, Attribution, Decision, Prediction};
use crate::features::encode::vocabulary;

/// Format the decision banner plus submission context.
pub fn format_decision_summary(record: &ApplicantRecord, prediction: &Prediction) -> String {
    let mut out = String::new();

    out.push_str("=== uw - Loan Approval Screen ===\n");
    let mark = match prediction.decision {
        Decision::Approved => "+",
        Decision::Denied => "-",
    };
    out.push_str(&format!(
        "[{mark}] {} with probability {}\n",
        prediction.decision.display_name(),
        fmt_prob(prediction.probability)
    ));
    out.push_str(&format!(
        "Threshold: {}\n",
        fmt_prob(prediction.threshold)
    ));

    out.push_str("Members: ");
    let members: Vec<String> = prediction
        .members
        .iter()
        .map(|m| format!("{}={}", m.name, fmt_prob(m.probability)))
        .collect();
    out.push_str(&members.join("  "));
    out.push('\n');

    out.push_str(&format!(
        "Applicant: age={} income={:.0} emp={}y loan={:.0} rate={:.1}% history={}y score={}\n",
        record.age,
        record.income,
        record.employment_years,
        record.loan_amount,
        record.interest_rate,
        record.credit_history_years,
        record.credit_score,
    ));
    out.push_str(&format!(
        "           default={} home={} intent={} gender={} education={}\n",
        record.previous_default.label(),
        record.home_ownership.label(),
        record.loan_intent.label(),
        record.gender.label(),
        record.education.label(),
    ));

    out
}

/// Format the attribution table, largest absolute contribution first.
pub fn format_attribution_table(attribution: &Attribution) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Feature contributions ({}, log-odds; baseline {:+.4}, margin {:+.4}):\n",
        attribution.member, attribution.baseline, attribution.margin
    ));

    let mut rows: Vec<_> = attribution
        .contributions
        .iter()
        .filter(|c| c.contribution != 0.0)
        .collect();
    rows.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if rows.is_empty() {
        out.push_str("  (no feature moved the prediction)\n");
        return out;
    }

    for c in rows {
        out.push_str(&format!(
            "  {:<28} {:>+9.4}  (input {:.4})\n",
            c.feature, c.contribution, c.value
        ));
    }

    out
}

/// Format the loaded bundle's schema for `uw show`.
pub fn format_bundle_summary(bundle: &ModelBundle) -> String {
    let mut out = String::new();

    out.push_str("=== uw - Model Bundle ===\n");
    out.push_str(&format!("Schema version: {}\n", bundle.schema_version));
    out.push_str(&format!(
        "Features ({}): {}\n",
        bundle.feature_names.len(),
        bundle.feature_names.join(", ")
    ));

    out.push_str("\nEncoders:\n");
    for field in crate::domain::fields::CATEGORICAL {
        let source = if bundle.encoders.contains_key(field) {
            "fitted"
        } else {
            "ordinal"
        };
        match vocabulary(bundle, field) {
            Ok(classes) => out.push_str(&format!(
                "  {field:<28} [{source}] {}\n",
                classes.join(" | ")
            )),
            Err(err) => out.push_str(&format!("  {field:<28} {err}\n")),
        }
    }

    out.push_str("\nScaler fields:\n");
    for (idx, field) in bundle.scaler.fields.iter().enumerate() {
        out.push_str(&format!(
            "  {field:<28} mean={:>12.4} scale={:>12.4}\n",
            bundle.scaler.mean[idx], bundle.scaler.scale[idx]
        ));
    }

    out.push_str("\nEnsemble:\n");
    out.push_str(&format!("  threshold: {}\n", bundle.ensemble.threshold));
    for member in &bundle.ensemble.members {
        let kind = match &member.model {
            crate::artifacts::bundle::MemberModel::Gbdt(g) => {
                format!("gbdt ({} trees)", g.trees.len())
            }
            crate::artifacts::bundle::MemberModel::Linear(_) => "linear".to_string(),
        };
        out.push_str(&format!(
            "  {:<12} weight={:.2}  {kind}\n",
            member.name, member.weight
        ));
    }
    if let Some(explain) = &bundle.ensemble.explain_member {
        out.push_str(&format!("  explain member: {explain}\n"));
    }

    out
}

/// Format the batch run summary: counts, rate, probability spread.
pub fn format_batch_summary(scored: &[(ApplicantRecord, Prediction)], failures: usize) -> String {
    let mut out = String::new();
    out.push_str("=== uw - Batch Screen ===\n");

    if scored.is_empty() {
        out.push_str(&format!("No applicants scored ({failures} failed).\n"));
        return out;
    }

    let n = scored.len();
    let approved = scored
        .iter()
        .filter(|(_, p)| p.decision == Decision::Approved)
        .count();
    let probs: Vec<f64> = scored.iter().map(|(_, p)| p.probability).collect();
    let mean = probs.iter().sum::<f64>() / n as f64;
    let min = probs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    out.push_str(&format!(
        "Scored: n={n} | approved={approved} ({:.1}%) | failed={failures}\n",
        100.0 * approved as f64 / n as f64
    ));
    out.push_str(&format!(
        "Probability: mean={} min={} max={}\n",
        fmt_prob(mean),
        fmt_prob(min),
        fmt_prob(max)
    ));

    out.push_str("\nProbability histogram:\n");
    let mut bins = [0usize; 10];
    for p in &probs {
        let idx = ((p * 10.0).floor() as usize).min(9);
        bins[idx] += 1;
    }
    let peak = bins.iter().copied().max().unwrap_or(1).max(1);
    for (idx, count) in bins.iter().enumerate() {
        let lo = idx as f64 / 10.0;
        let hi = lo + 0.1;
        let bar_len = (count * 40).div_ceil(peak);
        out.push_str(&format!(
            "  [{lo:.1}, {hi:.1}) {:>5}  {}\n",
            count,
            "#".repeat(if *count == 0 { 0 } else { bar_len })
        ));
    }

    out
}

/// Probabilities are always reported with two decimals.
pub fn fmt_prob(p: f64) -> String {
    format!("{p:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_predict;
    use crate::testkit::{demo_bundle, reference_record};

    #[test]
    fn probability_is_rendered_with_two_decimals() {
        assert_eq!(fmt_prob(0.8312), "0.83");
        assert_eq!(fmt_prob(0.5), "0.50");
        assert_eq!(fmt_prob(1.0), "1.00");
    }

    #[test]
    fn summary_carries_decision_and_probability() {
        let bundle = demo_bundle();
        let record = reference_record();
        let run = run_predict(&bundle, &record).unwrap();

        let text = format_decision_summary(&record, &run.prediction);
        assert!(text.contains("APPROVED") || text.contains("DENIED"));
        assert!(text.contains(&fmt_prob(run.prediction.probability)));
        assert!(text.contains("Members:"));
    }

    #[test]
    fn attribution_table_sorts_by_magnitude() {
        let bundle = demo_bundle();
        let run = run_predict(&bundle, &reference_record()).unwrap();
        let attribution = run.attribution.unwrap();

        let text = format_attribution_table(&attribution);
        let first_line = text.lines().nth(1).unwrap_or("");
        let strongest = attribution
            .contributions
            .iter()
            .max_by(|a, b| {
                a.contribution
                    .abs()
                    .partial_cmp(&b.contribution.abs())
                    .unwrap()
            })
            .unwrap();
        assert!(
            first_line.contains(strongest.feature.as_str()),
            "expected {} first in:\n{text}",
            strongest.feature
        );
    }

    #[test]
    fn bundle_summary_lists_vocabularies_and_members() {
        let bundle = demo_bundle();
        let text = format_bundle_summary(&bundle);
        assert!(text.contains("home_ownership"));
        assert!(text.contains("RENT | OWN | MORTGAGE | OTHER"));
        assert!(text.contains("[ordinal]"), "fallback fields flagged:\n{text}");
        assert!(text.contains("[fitted]"));
        assert!(text.contains("gbdt (2 trees)"));
    }

    #[test]
    fn batch_summary_counts_match() {
        let bundle = demo_bundle();
        let records = crate::sample::generate_applicants(25, 3).unwrap();
        let scored: Vec<_> = records
            .into_iter()
            .map(|r| {
                let run = run_predict(&bundle, &r).unwrap();
                (r, run.prediction)
            })
            .collect();

        let text = format_batch_summary(&scored, 0);
        assert!(text.contains("n=25"));
        assert!(text.contains("histogram"));
    }
}
