use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::config::UploadConfig;

/// Extension used when the original file name gives no usable hint.
const FALLBACK_EXTENSION: &str = "jpg";

/// Stable reference to a stored poster: the generated file name plus the
/// public path it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    file_name: String,
    public_path: String,
}

impl AssetRef {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path consumers reference directly, e.g. `/uploads/event-....jpg`.
    pub fn public_path(&self) -> &str {
        &self.public_path
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("empty upload payload")]
    EmptyPayload,
    #[error("asset write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Persists poster bytes and hands back a public reference path.
///
/// There is no garbage collection: posters orphaned by event deletion or
/// replacement are retained. `remove` exists only as the compensation hook
/// for a failed repository write.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, bytes: &[u8], original_file_name: &str) -> Result<AssetRef, StoreError>;

    async fn remove(&self, asset: &AssetRef) -> Result<(), StoreError>;

    async fn load(&self, asset: &AssetRef) -> Result<Vec<u8>, StoreError>;
}

/// Flat-directory asset store under the configured upload dir.
pub struct LocalAssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAssetStore {
    pub fn new(uploads: &UploadConfig) -> Self {
        Self {
            root: uploads.dir.clone(),
            public_prefix: uploads.public_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn asset_ref(&self, file_name: String) -> AssetRef {
        let public_path = format!("{}/{}", self.public_prefix, file_name);
        AssetRef {
            file_name,
            public_path,
        }
    }

    /// `event-<millis>-<rand>.<ext>`: timestamp plus random suffix, so
    /// concurrent uploads cannot overwrite each other.
    fn generate_file_name(original_file_name: &str) -> String {
        let extension = extension_hint(original_file_name);
        let token = Uuid::new_v4().simple().to_string();
        format!(
            "event-{}-{}.{}",
            Utc::now().timestamp_millis(),
            &token[..8],
            extension
        )
    }
}

/// Take the extension from the original name when it looks like one;
/// otherwise fall back to jpg.
fn extension_hint(original_file_name: &str) -> String {
    Path::new(original_file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(&self, bytes: &[u8], original_file_name: &str) -> Result<AssetRef, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::EmptyPayload);
        }

        let file_name = Self::generate_file_name(original_file_name);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        let asset = self.asset_ref(file_name);
        tracing::debug!("stored poster at {}", asset.public_path());
        Ok(asset)
    }

    async fn remove(&self, asset: &AssetRef) -> Result<(), StoreError> {
        tokio::fs::remove_file(self.root.join(asset.file_name())).await?;
        Ok(())
    }

    async fn load(&self, asset: &AssetRef) -> Result<Vec<u8>, StoreError> {
        let bytes = tokio::fs::read(self.root.join(asset.file_name())).await?;
        Ok(bytes)
    }
}
