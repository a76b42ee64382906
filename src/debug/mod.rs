//! Debug bundle writer for inspecting one submission end-to-end.
//!
//! Dumps the raw record, the encoded codes, the scaled vector in schema
//! order, member probabilities, and the attribution to a timestamped
//! markdown file. Handy when a swapped artifact produces surprising
//! decisions.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::artifacts::ModelBundle;
use crate::domain::ApplicantRecord;
use crate::error::AppError;

pub fn write_debug_bundle(
    bundle: &ModelBundle,
    record: &ApplicantRecord,
    run: &RunOutput,
) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir).map_err(|e| AppError::io(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("uw_debug_{ts}.md"));

    let file = File::create(&path)
        .map_err(|e| AppError::io(format!("Failed to create debug file: {e}")))?;
    let mut file = std::io::BufWriter::new(file);

    let mut write = |line: String| -> Result<(), AppError> {
        writeln!(file, "{line}").map_err(|e| AppError::io(format!("Failed to write debug file: {e}")))
    };

    write("# uw debug bundle".to_string())?;
    write(format!("- generated: {}", Local::now().to_rfc3339()))?;
    write(format!(
        "- decision: {} ({:.4} vs threshold {:.2})",
        run.prediction.decision.display_name(),
        run.prediction.probability,
        run.prediction.threshold
    ))?;

    write("\n## Applicant".to_string())?;
    match serde_json::to_string_pretty(record) {
        Ok(json) => {
            write("```json".to_string())?;
            write(json)?;
            write("```".to_string())?;
        }
        Err(e) => write(format!("(serialization failed: {e})"))?,
    }

    write("\n## Feature vector (schema order)".to_string())?;
    write("| feature | encoded | scaled |".to_string())?;
    write("|---|---|---|".to_string())?;
    for name in &bundle.feature_names {
        let encoded = run
            .encoded
            .get(name)
            .map(|v| format!("{v:.6}"))
            .unwrap_or_else(|| "-".to_string());
        let scaled = run
            .scaled
            .get(name)
            .map(|v| format!("{v:.6}"))
            .unwrap_or_else(|| "-".to_string());
        write(format!("| {name} | {encoded} | {scaled} |"))?;
    }

    write("\n## Member probabilities".to_string())?;
    for member in &run.prediction.members {
        write(format!("- {}: {:.6}", member.name, member.probability))?;
    }

    match &run.attribution {
        Some(attribution) => {
            write(format!(
                "\n## Attribution ({}, baseline {:+.6}, margin {:+.6})",
                attribution.member, attribution.baseline, attribution.margin
            ))?;
            for c in &attribution.contributions {
                if c.contribution != 0.0 {
                    write(format!("- {}: {:+.6}", c.feature, c.contribution))?;
                }
            }
        }
        None => write("\n## Attribution\n(none)".to_string())?,
    }

    file.flush()
        .map_err(|e| AppError::io(format!("Failed to flush debug file: {e}")))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_predict;
    use crate::testkit::{demo_bundle, reference_record};

    #[test]
    fn debug_bundle_lists_full_schema() {
        let bundle = demo_bundle();
        let record = reference_record();
        let run = run_predict(&bundle, &record).unwrap();

        let path = write_debug_bundle(&bundle, &record, &run).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        for name in &bundle.feature_names {
            assert!(text.contains(name.as_str()), "missing {name}");
        }
        assert!(text.contains("Member probabilities"));

        std::fs::remove_file(&path).ok();
    }
}
