pub mod asset_store;
pub mod preview;
pub mod settings;
pub mod settings_types;

pub use asset_store::{AssetError, AssetSource, AssetStore, DirectorySource, MemorySource};
pub use settings::Settings;

/// Settings file read when no `--config` is given.
pub fn default_settings_path() -> std::path::PathBuf {
    std::path::PathBuf::from("arroyo.toml")
}
