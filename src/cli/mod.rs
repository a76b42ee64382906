//! Command-line parsing for the loan approval screener.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the encoding/model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::artifacts::store::DEFAULT_BUNDLE_PATH;
use crate::domain::{Education, Gender, HomeOwnership, LoanIntent, PreviousDefault};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "uw", version, about = "Loan Approval Screener (pre-trained ensemble)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one applicant from flags and print the decision + attribution.
    Predict(PredictArgs),
    /// Generate synthetic applicants and score them in bulk.
    Batch(BatchArgs),
    /// Print the loaded bundle's schema (features, vocabularies, members).
    Show(ShowArgs),
    /// Launch the interactive TUI form.
    ///
    /// This uses the same underlying pipeline as `uw predict`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Where the model bundle lives and how to fetch it if absent.
#[derive(Debug, Args, Clone)]
pub struct ArtifactArgs {
    /// Path to the model bundle JSON.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BUNDLE_PATH)]
    pub artifacts: PathBuf,

    /// Remote bundle URL used when the file is absent (overrides UW_MODEL_URL).
    #[arg(long = "model-url", value_name = "URL")]
    pub model_url: Option<String>,
}

/// One applicant, as flags. Defaults match the form defaults.
#[derive(Debug, Args, Clone)]
pub struct ApplicantArgs {
    /// Applicant age in years (18-100).
    #[arg(long, default_value_t = 30)]
    pub age: u32,

    /// Annual income.
    #[arg(long, default_value_t = 50_000.0)]
    pub income: f64,

    /// Employment experience in years (0-60).
    #[arg(long = "employment-years", default_value_t = 5)]
    pub employment_years: u32,

    /// Requested loan amount (>= 500).
    #[arg(long = "loan-amount", default_value_t = 10_000.0)]
    pub loan_amount: f64,

    /// Loan interest rate in percent (5.0-40.0).
    #[arg(long = "interest-rate", default_value_t = 12.5)]
    pub interest_rate: f64,

    /// Credit history length in years (0-30).
    #[arg(long = "credit-history-years", default_value_t = 5)]
    pub credit_history_years: u32,

    /// Credit score (300-850).
    #[arg(long = "credit-score", default_value_t = 650)]
    pub credit_score: u32,

    /// Previous loan default on file.
    #[arg(long = "previous-default", value_enum, default_value_t = PreviousDefault::No)]
    pub previous_default: PreviousDefault,

    /// Home ownership status.
    #[arg(long = "home-ownership", value_enum, default_value_t = HomeOwnership::Rent)]
    pub home_ownership: HomeOwnership,

    /// Stated purpose of the loan.
    #[arg(long = "loan-intent", value_enum, default_value_t = LoanIntent::Personal)]
    pub loan_intent: LoanIntent,

    /// Applicant gender.
    #[arg(long, value_enum, default_value_t = Gender::Male)]
    pub gender: Gender,

    /// Highest completed education level.
    #[arg(long, value_enum, default_value_t = Education::Bachelor)]
    pub education: Education,
}

impl ApplicantArgs {
    /// Build the record the pipeline consumes. Bounds are checked by
    /// `ApplicantRecord::validate`, not here.
    pub fn into_record(self) -> crate::domain::ApplicantRecord {
        crate::domain::ApplicantRecord {
            age: self.age,
            income: self.income,
            employment_years: self.employment_years,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            credit_history_years: self.credit_history_years,
            credit_score: self.credit_score,
            previous_default: self.previous_default,
            home_ownership: self.home_ownership,
            loan_intent: self.loan_intent,
            gender: self.gender,
            education: self.education,
        }
    }
}

/// Options for one-shot prediction.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    #[command(flatten)]
    pub applicant: ApplicantArgs,

    /// Render the ASCII attribution chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the attribution chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Export the decision (record + prediction + attribution) to JSON.
    #[arg(long = "export-json", value_name = "FILE")]
    pub export_json: Option<PathBuf>,
}

/// Options for batch scoring of synthetic applicants.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    /// Number of synthetic applicants to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed for applicant generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Export per-applicant results to CSV.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Options for bundle inspection.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,
}

/// Options for the TUI.
#[derive(Debug, Parser)]
pub struct TuiArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,
}
