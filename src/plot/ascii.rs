//! ASCII attribution chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Layout: one row per contributing feature, bars growing left (`<`, pushes
//! toward denial) or right (`>`, pushes toward approval) from a shared axis.

use crate::domain::Attribution;

const LABEL_WIDTH: usize = 28;
const MIN_SIDE: usize = 5;

/// Render horizontal signed bars, largest absolute contribution first.
pub fn render_attribution_chart(attribution: &Attribution, width: usize) -> String {
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

    let mut out = String::new();
    out.push_str(&format!(
        "Attribution ({}): margin {:+.4} = baseline {:+.4} + contributions\n",
        attribution.member, attribution.margin, attribution.baseline
    ));

    if rows.is_empty() {
        out.push_str("(no feature moved the prediction)\n");
        return out;
    }

    let peak = rows
        .iter()
        .map(|c| c.contribution.abs())
        .fold(0.0f64, f64::max)
        .max(f64::MIN_POSITIVE);

    // Half-width per side after label and value columns.
    let side = width
        .saturating_sub(LABEL_WIDTH + 12)
        .max(MIN_SIDE * 2)
        / 2;

    for c in rows {
        let cells = ((c.contribution.abs() / peak) * side as f64).round() as usize;
        let cells = cells.clamp(1, side);

        let (left, right) = if c.contribution < 0.0 {
            (
                format!("{:>side$}", "<".repeat(cells), side = side),
                " ".repeat(side),
            )
        } else {
            (
                " ".repeat(side),
                format!("{:<side$}", ">".repeat(cells), side = side),
            )
        };

        out.push_str(&format!(
            "{name:<width$} {left}|{right} {value:+.3}\n",
            name = truncate(&c.feature, LABEL_WIDTH),
            width = LABEL_WIDTH,
            value = c.contribution
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attribution, FeatureContribution};

    fn sample_attribution() -> Attribution {
        Attribution {
            member: "gbdt".to_string(),
            baseline: 0.05,
            margin: 1.6,
            contributions: vec![
                FeatureContribution {
                    feature: "credit_score".to_string(),
                    value: 0.875,
                    contribution: 0.3,
                },
                FeatureContribution {
                    feature: "previous_default_on_file".to_string(),
                    value: 0.0,
                    contribution: 0.9,
                },
                FeatureContribution {
                    feature: "loan_percent_income".to_string(),
                    value: 0.3,
                    contribution: 0.35,
                },
                FeatureContribution {
                    feature: "age".to_string(),
                    value: -0.6,
                    contribution: 0.0,
                },
            ],
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let attribution = sample_attribution();
        let a = render_attribution_chart(&attribution, 80);
        let b = render_attribution_chart(&attribution, 80);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_contributions_are_omitted_and_order_is_by_magnitude() {
        let text = render_attribution_chart(&sample_attribution(), 80);
        assert!(!text.contains("age"), "zero row should be dropped:\n{text}");

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("previous_default_on_file"));
        assert!(lines[2].starts_with("loan_percent_income"));
        assert!(lines[3].starts_with("credit_score"));
    }

    #[test]
    fn negative_contributions_point_left() {
        let mut attribution = sample_attribution();
        attribution.contributions[0].contribution = -0.5;
        let text = render_attribution_chart(&attribution, 80);
        let row = text
            .lines()
            .find(|l| l.starts_with("credit_score"))
            .unwrap();
        assert!(row.contains('<'));
        assert!(!row.contains('>'));
        assert!(row.contains("-0.500"));
    }

    #[test]
    fn narrow_width_still_renders_every_row() {
        let text = render_attribution_chart(&sample_attribution(), 10);
        assert_eq!(text.lines().count(), 1 + 3);
    }
}
