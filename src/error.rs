//! Crate-wide error type.
//!
//! A single enum covers the whole pipeline so `?` composes across modules,
//! while each failure class keeps a stable process exit code:
//!
//! - 2: numeric form input outside its declared bounds
//! - 3: model artifact absent, unobtainable, or undeserializable
//! - 4: artifact download failure
//! - 5: categorical input outside the trained vocabulary
//! - 6: feature schema disagreement between record and model
//! - 7: terminal or filesystem failure

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum AppError {
    /// A numeric form field violates its declared bounds.
    InvalidInput { message: String },
    /// An artifact file is absent and unobtainable, or failed to deserialize.
    MissingArtifact { path: PathBuf, reason: String },
    /// Downloading an artifact failed (transport error or non-200 status).
    NetworkFetch { url: String, reason: String },
    /// A categorical input is not in the trained vocabulary.
    UnknownCategory {
        field: String,
        value: String,
        accepted: Vec<String>,
    },
    /// The encoded feature vector disagrees with the model's expectations.
    SchemaMismatch { detail: String },
    /// Terminal or file I/O failure.
    Io { message: String },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn missing_artifact(path: &Path, reason: impl Into<String>) -> Self {
        Self::MissingArtifact {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn network_fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NetworkFetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_category(
        field: impl Into<String>,
        value: impl Into<String>,
        accepted: &[String],
    ) -> Self {
        Self::UnknownCategory {
            field: field.into(),
            value: value.into(),
            accepted: accepted.to_vec(),
        }
    }

    pub fn schema_mismatch(detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            detail: detail.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidInput { .. } => 2,
            AppError::MissingArtifact { .. } => 3,
            AppError::NetworkFetch { .. } => 4,
            AppError::UnknownCategory { .. } => 5,
            AppError::SchemaMismatch { .. } => 6,
            AppError::Io { .. } => 7,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput { message } => write!(f, "{message}"),
            AppError::MissingArtifact { path, reason } => {
                write!(f, "Missing artifact '{}': {reason}", path.display())
            }
            AppError::NetworkFetch { url, reason } => {
                write!(f, "Artifact download from '{url}' failed: {reason}")
            }
            AppError::UnknownCategory {
                field,
                value,
                accepted,
            } => {
                write!(
                    f,
                    "Unknown {field} value '{value}' (accepted: {})",
                    accepted.join(", ")
                )
            }
            AppError::SchemaMismatch { detail } => write!(f, "Feature schema mismatch: {detail}"),
            AppError::Io { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}
