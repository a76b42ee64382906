//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - collected from the form/CLI and validated in one place
//! - exported to JSON alongside the prediction
//! - reused by the batch generator without conversion layers
//!
//! The categorical `label()` strings are the canonical display labels the
//! encoders were fitted on; they are part of the artifact contract, not a
//! presentation detail.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Feature names as the trained artifacts know them.
///
/// `ALL` is the model input order; `NUMERIC` is the order the scaler was
/// fitted on. Pipeline code pairs values to these names explicitly instead of
/// relying on construction order.
pub mod fields {
    pub const AGE: &str = "age";
    pub const INCOME: &str = "income";
    pub const EMPLOYMENT_YEARS: &str = "employment_experience_years";
    pub const LOAN_AMOUNT: &str = "loan_amount";
    pub const INTEREST_RATE: &str = "loan_interest_rate";
    pub const LOAN_PERCENT_INCOME: &str = "loan_percent_income";
    pub const CREDIT_HISTORY: &str = "credit_history_length_years";
    pub const CREDIT_SCORE: &str = "credit_score";
    pub const PREVIOUS_DEFAULT: &str = "previous_default_on_file";
    pub const HOME_OWNERSHIP: &str = "home_ownership";
    pub const LOAN_INTENT: &str = "loan_intent";
    pub const GENDER: &str = "gender";
    pub const EDUCATION: &str = "education";

    pub const ALL: [&str; 13] = [
        AGE,
        INCOME,
        EMPLOYMENT_YEARS,
        LOAN_AMOUNT,
        INTEREST_RATE,
        LOAN_PERCENT_INCOME,
        CREDIT_HISTORY,
        CREDIT_SCORE,
        PREVIOUS_DEFAULT,
        HOME_OWNERSHIP,
        LOAN_INTENT,
        GENDER,
        EDUCATION,
    ];

    pub const NUMERIC: [&str; 8] = [
        AGE,
        INCOME,
        EMPLOYMENT_YEARS,
        LOAN_AMOUNT,
        INTEREST_RATE,
        LOAN_PERCENT_INCOME,
        CREDIT_HISTORY,
        CREDIT_SCORE,
    ];

    pub const CATEGORICAL: [&str; 5] = [
        PREVIOUS_DEFAULT,
        HOME_OWNERSHIP,
        LOAN_INTENT,
        GENDER,
        EDUCATION,
    ];
}

/// Declared form bounds. Validation happens before feature construction;
/// the TUI also clamps adjustments to these ranges.
pub const AGE_BOUNDS: (u32, u32) = (18, 100);
pub const INCOME_BOUNDS: (f64, f64) = (0.0, 1_000_000.0);
pub const EMPLOYMENT_BOUNDS: (u32, u32) = (0, 60);
pub const LOAN_AMOUNT_BOUNDS: (f64, f64) = (500.0, 100_000.0);
pub const INTEREST_RATE_BOUNDS: (f64, f64) = (5.0, 40.0);
pub const CREDIT_HISTORY_BOUNDS: (u32, u32) = (0, 30);
pub const CREDIT_SCORE_BOUNDS: (u32, u32) = (300, 850);

/// Previous loan default on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PreviousDefault {
    #[serde(rename = "no")]
    #[value(name = "no")]
    No,
    #[serde(rename = "yes")]
    #[value(name = "yes")]
    Yes,
}

impl PreviousDefault {
    pub const ALL: [Self; 2] = [Self::No, Self::Yes];

    pub fn label(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }
}

impl std::fmt::Display for PreviousDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Home ownership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HomeOwnership {
    #[serde(rename = "RENT")]
    #[value(name = "RENT")]
    Rent,
    #[serde(rename = "OWN")]
    #[value(name = "OWN")]
    Own,
    #[serde(rename = "MORTGAGE")]
    #[value(name = "MORTGAGE")]
    Mortgage,
    #[serde(rename = "OTHER")]
    #[value(name = "OTHER")]
    Other,
}

impl HomeOwnership {
    pub const ALL: [Self; 4] = [Self::Rent, Self::Own, Self::Mortgage, Self::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rent => "RENT",
            Self::Own => "OWN",
            Self::Mortgage => "MORTGAGE",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for HomeOwnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Stated purpose of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LoanIntent {
    #[serde(rename = "EDUCATION")]
    #[value(name = "EDUCATION")]
    Education,
    #[serde(rename = "MEDICAL")]
    #[value(name = "MEDICAL")]
    Medical,
    #[serde(rename = "VENTURE")]
    #[value(name = "VENTURE")]
    Venture,
    #[serde(rename = "PERSONAL")]
    #[value(name = "PERSONAL")]
    Personal,
    #[serde(rename = "DEBTCONSOLIDATION")]
    #[value(name = "DEBTCONSOLIDATION")]
    DebtConsolidation,
    #[serde(rename = "HOMEIMPROVEMENT")]
    #[value(name = "HOMEIMPROVEMENT")]
    HomeImprovement,
}

impl LoanIntent {
    pub const ALL: [Self; 6] = [
        Self::Education,
        Self::Medical,
        Self::Venture,
        Self::Personal,
        Self::DebtConsolidation,
        Self::HomeImprovement,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Education => "EDUCATION",
            Self::Medical => "MEDICAL",
            Self::Venture => "VENTURE",
            Self::Personal => "PERSONAL",
            Self::DebtConsolidation => "DEBTCONSOLIDATION",
            Self::HomeImprovement => "HOMEIMPROVEMENT",
        }
    }
}

impl std::fmt::Display for LoanIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Applicant gender as recorded in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    #[serde(rename = "female")]
    #[value(name = "female")]
    Female,
    #[serde(rename = "male")]
    #[value(name = "male")]
    Male,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Highest completed education level.
///
/// The CLI value names are kebab-case because "High School" cannot be typed
/// as a single shell token; `label()` stays the encoder vocabulary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Education {
    #[serde(rename = "High School")]
    #[value(name = "high-school")]
    HighSchool,
    #[serde(rename = "Associate")]
    #[value(name = "associate")]
    Associate,
    #[serde(rename = "Bachelor")]
    #[value(name = "bachelor")]
    Bachelor,
    #[serde(rename = "Master")]
    #[value(name = "master")]
    Master,
    #[serde(rename = "Doctorate")]
    #[value(name = "doctorate")]
    Doctorate,
    #[serde(rename = "Other")]
    #[value(name = "other")]
    Other,
}

impl Education {
    pub const ALL: [Self; 6] = [
        Self::HighSchool,
        Self::Associate,
        Self::Bachelor,
        Self::Master,
        Self::Doctorate,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::Associate => "Associate",
            Self::Bachelor => "Bachelor",
            Self::Master => "Master",
            Self::Doctorate => "Doctorate",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Education {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::HighSchool => "high-school",
            Self::Associate => "associate",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctorate => "doctorate",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// One applicant as collected from the form.
///
/// Constructed fresh per submission; validated against the declared bounds
/// before any feature construction. `loan_percent_income` is intentionally
/// absent: it is derived, never user-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub age: u32,
    pub income: f64,
    #[serde(rename = "employment_experience_years")]
    pub employment_years: u32,
    pub loan_amount: f64,
    #[serde(rename = "loan_interest_rate")]
    pub interest_rate: f64,
    #[serde(rename = "credit_history_length_years")]
    pub credit_history_years: u32,
    pub credit_score: u32,
    #[serde(rename = "previous_default_on_file")]
    pub previous_default: PreviousDefault,
    pub home_ownership: HomeOwnership,
    pub loan_intent: LoanIntent,
    pub gender: Gender,
    pub education: Education,
}

impl Default for ApplicantRecord {
    /// Form defaults.
    fn default() -> Self {
        Self {
            age: 30,
            income: 50_000.0,
            employment_years: 5,
            loan_amount: 10_000.0,
            interest_rate: 12.5,
            credit_history_years: 5,
            credit_score: 650,
            previous_default: PreviousDefault::No,
            home_ownership: HomeOwnership::Rent,
            loan_intent: LoanIntent::Personal,
            gender: Gender::Male,
            education: Education::Bachelor,
        }
    }
}

impl ApplicantRecord {
    /// Check every numeric field against its declared bounds.
    ///
    /// All violations are reported at once so the user can fix the whole
    /// submission in one pass.
    pub fn validate(&self) -> Result<(), crate::error::AppError> {
        let mut problems = Vec::new();

        check_u32(&mut problems, fields::AGE, self.age, AGE_BOUNDS);
        check_f64(&mut problems, fields::INCOME, self.income, INCOME_BOUNDS);
        check_u32(
            &mut problems,
            fields::EMPLOYMENT_YEARS,
            self.employment_years,
            EMPLOYMENT_BOUNDS,
        );
        check_f64(
            &mut problems,
            fields::LOAN_AMOUNT,
            self.loan_amount,
            LOAN_AMOUNT_BOUNDS,
        );
        check_f64(
            &mut problems,
            fields::INTEREST_RATE,
            self.interest_rate,
            INTEREST_RATE_BOUNDS,
        );
        check_u32(
            &mut problems,
            fields::CREDIT_HISTORY,
            self.credit_history_years,
            CREDIT_HISTORY_BOUNDS,
        );
        check_u32(
            &mut problems,
            fields::CREDIT_SCORE,
            self.credit_score,
            CREDIT_SCORE_BOUNDS,
        );

        if problems.is_empty() {
            Ok(())
        } else {
            Err(crate::error::AppError::invalid_input(problems.join("; ")))
        }
    }
}

fn check_u32(problems: &mut Vec<String>, field: &str, value: u32, bounds: (u32, u32)) {
    if value < bounds.0 || value > bounds.1 {
        problems.push(format!(
            "{field} ({value}) outside [{}, {}]",
            bounds.0, bounds.1
        ));
    }
}

fn check_f64(problems: &mut Vec<String>, field: &str, value: f64, bounds: (f64, f64)) {
    if !value.is_finite() || value < bounds.0 || value > bounds.1 {
        problems.push(format!(
            "{field} ({value}) outside [{}, {}]",
            bounds.0, bounds.1
        ));
    }
}

/// Binary screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Denied,
}

impl Decision {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Denied => "DENIED",
        }
    }
}

/// One ensemble member's probability, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberScore {
    pub name: String,
    pub probability: f64,
}

/// Final prediction for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Approval probability in [0, 1].
    pub probability: f64,
    /// Positive-class threshold the decision was taken at.
    pub threshold: f64,
    pub decision: Decision,
    pub members: Vec<MemberScore>,
}

/// Signed contribution of one feature to the margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    /// The (encoded/scaled) input value the model actually saw.
    pub value: f64,
    /// Contribution on the log-odds scale.
    pub contribution: f64,
}

/// Decision-path attribution for one submission.
///
/// Contributions sum to `margin - baseline` by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    /// Name of the explained ensemble member.
    pub member: String,
    /// Expected margin before seeing any feature.
    pub baseline: f64,
    /// Raw (pre-sigmoid) score of the explained member.
    pub margin: f64,
    pub contributions: Vec<FeatureContribution>,
}

/// A saved decision file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub applicant: ApplicantRecord,
    pub prediction: Prediction,
    pub attribution: Option<Attribution>,
}
