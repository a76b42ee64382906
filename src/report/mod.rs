//! Reporting utilities: formatted terminal output for decisions,
//! attributions, bundle inspection, and batch summaries.
//!
//! We keep formatting code in one place so:
//! - the encoding/model code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::{
    format_attribution_table, format_batch_summary, format_bundle_summary,
    format_decision_summary,
};
