//! Local artifact store with optional one-shot remote fetch.
//!
//! The bundle path is configuration; when the file is absent and a remote
//! URL is configured (flag or `UW_MODEL_URL` in the environment / `.env`),
//! the store downloads it once, caches the bytes locally, and loads from
//! disk afterwards. The fetch is blocking and fail-fast: no retries.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::info;

use crate::artifacts::bundle::ModelBundle;
use crate::error::AppError;

/// Default bundle location relative to the working directory.
pub const DEFAULT_BUNDLE_PATH: &str = "artifacts/model_bundle.json";

/// Environment variable naming the remote bundle URL.
pub const MODEL_URL_ENV: &str = "UW_MODEL_URL";

pub struct ArtifactStore {
    path: PathBuf,
    remote_url: Option<String>,
}

impl ArtifactStore {
    /// Store for a local path, picking up the remote URL from `.env` /
    /// environment when present.
    pub fn from_env(path: impl Into<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        Self {
            path: path.into(),
            remote_url: std::env::var(MODEL_URL_ENV).ok(),
        }
    }

    /// Store with an explicit remote source (overrides the environment).
    pub fn with_remote(path: impl Into<PathBuf>, remote_url: Option<String>) -> Self {
        Self {
            path: path.into(),
            remote_url,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the bundle, fetching it first if configured.
    ///
    /// This is the only place artifacts are read; callers hold the returned
    /// bundle for the rest of the process and never mutate it.
    pub fn load(&self) -> Result<ModelBundle, AppError> {
        self.ensure_local()?;

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| AppError::missing_artifact(&self.path, format!("read failed: {e}")))?;
        let bundle: ModelBundle = serde_json::from_str(&raw)
            .map_err(|e| AppError::missing_artifact(&self.path, format!("invalid bundle: {e}")))?;
        bundle.validate()?;

        info!(
            path = %self.path.display(),
            features = bundle.feature_names.len(),
            members = bundle.ensemble.members.len(),
            "model bundle loaded"
        );
        Ok(bundle)
    }

    fn ensure_local(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        let Some(url) = &self.remote_url else {
            return Err(AppError::missing_artifact(
                &self.path,
                format!("file not found and no remote source configured (set {MODEL_URL_ENV})"),
            ));
        };
        self.download(url)
    }

    fn download(&self, url: &str) -> Result<(), AppError> {
        info!(url, path = %self.path.display(), "fetching model bundle");

        let resp = Client::new()
            .get(url)
            .send()
            .map_err(|e| AppError::network_fetch(url, format!("request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::network_fetch(
                url,
                format!("status {}", resp.status()),
            ));
        }
        let body = resp
            .bytes()
            .map_err(|e| AppError::network_fetch(url, format!("body read failed: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::io(format!(
                        "Failed to create artifact dir '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        fs::write(&self.path, &body).map_err(|e| {
            AppError::io(format!(
                "Failed to cache bundle at '{}': {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::demo_bundle;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("uw-store-{}-{name}", std::process::id()))
    }

    #[test]
    fn absent_file_without_remote_is_missing_artifact() {
        let store = ArtifactStore::with_remote(scratch_path("absent.json"), None);
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingArtifact { .. }
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn valid_bundle_loads_from_disk() {
        let path = scratch_path("valid.json");
        let json = serde_json::to_string(&demo_bundle()).unwrap();
        fs::write(&path, json).unwrap();

        let store = ArtifactStore::with_remote(&path, None);
        let bundle = store.load().unwrap();
        assert_eq!(bundle.ensemble.members.len(), 2);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn undeserializable_bundle_is_missing_artifact() {
        let path = scratch_path("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ArtifactStore::with_remote(&path, None);
        let err = store.load().unwrap_err();
        assert!(matches!(err, AppError::MissingArtifact { .. }));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn inconsistent_bundle_is_schema_mismatch() {
        let path = scratch_path("drift.json");
        let mut bundle = demo_bundle();
        bundle.scaler.fields.swap_remove(0);
        bundle.scaler.mean.swap_remove(0);
        bundle.scaler.scale.swap_remove(0);
        fs::write(&path, serde_json::to_string(&bundle).unwrap()).unwrap();

        let store = ArtifactStore::with_remote(&path, None);
        let err = store.load().unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch { .. }));

        fs::remove_file(&path).ok();
    }
}
