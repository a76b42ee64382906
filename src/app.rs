//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes telemetry
//! - parses CLI arguments
//! - loads the model bundle
//! - runs the screening pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::artifacts::ArtifactStore;
use crate::cli::{ArtifactArgs, BatchArgs, Command, PredictArgs, ShowArgs, TuiArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `uw` binary.
pub fn run() -> Result<(), AppError> {
    crate::telemetry::init();

    // We want bare `uw` (and `uw --artifacts X`) to behave like `uw tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Batch(args) => handle_batch(args),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Build the artifact store from shared flags (flag overrides environment).
pub fn store_from_args(args: &ArtifactArgs) -> ArtifactStore {
    match &args.model_url {
        Some(url) => ArtifactStore::with_remote(&args.artifacts, Some(url.clone())),
        None => ArtifactStore::from_env(&args.artifacts),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let store = store_from_args(&args.artifact);
    let bundle = store.load()?;

    let record = args.applicant.into_record();
    let run = pipeline::run_predict(&bundle, &record)?;

    println!(
        "{}",
        crate::report::format_decision_summary(&record, &run.prediction)
    );

    if let Some(attribution) = &run.attribution {
        println!("{}", crate::report::format_attribution_table(attribution));
        if args.plot && !args.no_plot {
            println!(
                "{}",
                crate::plot::render_attribution_chart(attribution, args.width)
            );
        }
    }

    if let Some(path) = &args.export_json {
        crate::io::export::write_decision_json(
            path,
            &record,
            &run.prediction,
            run.attribution.as_ref(),
        )?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let store = store_from_args(&args.artifact);
    let bundle = store.load()?;

    let records = crate::sample::generate_applicants(args.count, args.seed)?;
    let out = pipeline::run_batch(&bundle, records);

    println!(
        "{}",
        crate::report::format_batch_summary(&out.scored, out.failures)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_batch_csv(path, &out.scored)?;
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let store = store_from_args(&args.artifact);
    let bundle = store.load()?;
    println!("{}", crate::report::format_bundle_summary(&bundle));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `uw` defaults to `uw tui`.
///
/// Rules:
/// - `uw`                      -> `uw tui`
/// - `uw --artifacts X ...`    -> `uw tui --artifacts X ...`
/// - `uw --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "batch" | "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(args: &[&str]) -> Vec<String> {
        rewrite_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewritten(&["uw"]), ["uw", "tui"]);
    }

    #[test]
    fn leading_flag_goes_to_tui() {
        assert_eq!(
            rewritten(&["uw", "--artifacts", "b.json"]),
            ["uw", "tui", "--artifacts", "b.json"]
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewritten(&["uw", "predict"]), ["uw", "predict"]);
        assert_eq!(rewritten(&["uw", "--help"]), ["uw", "--help"]);
        assert_eq!(rewritten(&["uw", "-V"]), ["uw", "-V"]);
    }
}
