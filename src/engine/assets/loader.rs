// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Image,
    Sound,
}

impl AssetType {
    /// Get the directory for this asset type
    pub fn directory(&self) -> &'static str {
        match self {
            AssetType::Image => "images",
            AssetType::Sound => "sounds",
        }
    }

    /// File extension appended to an identifier
    pub fn extension(&self) -> &'static str {
        match self {
            AssetType::Image => "png",
            AssetType::Sound => "ogg",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset identifier
    pub fn resolve_path(&self, asset_type: AssetType, id: &str) -> PathBuf {
        self.base_path
            .join(asset_type.directory())
            .join(format!("{}.{}", id, asset_type.extension()))
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, id: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, id);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", id, e)))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
