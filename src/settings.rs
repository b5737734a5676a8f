pub use crate::settings_types::*;
use crate::asset_store::{AssetStore, DirectorySource};
use rendering::Camera;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read settings from `path`. A missing or unparsable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings at {:?}, using defaults", path);
            return Settings::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(s) => {
                    info!("Loaded settings from {:?}", path);
                    s
                }
                Err(e) => {
                    error!("Failed to parse {:?}: {}", path, e);
                    Settings::default()
                }
            },
            Err(e) => {
                error!("Failed to read {:?}: {}", path, e);
                Settings::default()
            }
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            self.viewport.width,
            self.viewport.height,
            self.viewport.center_tile,
        )
    }

    /// Store rooted at `asset_root`, with the configured palette loaded if it
    /// can be read.
    pub fn asset_store(&self) -> AssetStore<DirectorySource> {
        let mut store = AssetStore::new(DirectorySource::new(&self.asset_root));
        if let Some(palette) = &self.palette {
            if let Err(e) = store.load_palette(palette) {
                warn!("Keeping built-in palette, {} failed: {}", palette, e);
            }
        }
        store
    }
}
