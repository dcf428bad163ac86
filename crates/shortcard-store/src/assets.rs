use crate::error::Result;
use shortcard_core::DurableId;
use std::path::{Path, PathBuf};

/// Public URL prefix under which uploaded assets are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

const DEFAULT_EXTENSION: &str = "jpg";

/// Stores uploaded preview images under a public asset root.
///
/// Filenames are `{id}{extension}`, with the extension taken from the
/// original upload name and defaulting to `.jpg`. The directory is
/// created lazily on first write.
#[derive(Debug, Clone)]
pub struct AssetStore {
    upload_dir: PathBuf,
}

impl AssetStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Writes an uploaded blob and returns its public path
    /// (e.g. `/uploads/aB3dE5gH.jpg`).
    pub async fn save(
        &self,
        id: &DurableId,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String> {
        let filename = format!("{}.{}", id.as_str(), extension_of(original_name));

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::write(self.upload_dir.join(&filename), bytes).await?;

        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }
}

/// Extension of the original upload name, without the dot.
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
