// Asset lookup
//
// Images and sounds live in a flat namespace of identifiers. The loader maps
// an identifier to a file under the asset directory and reads it.

mod loader;

pub use loader::{AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("hero_idle_0".to_string());
        assert_eq!(err.to_string(), "Asset not found: hero_idle_0");
    }
}
