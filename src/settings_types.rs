use std::path::PathBuf;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: i32,
    pub height: i32,
    pub center_tile: u32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            center_tile: 20100,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `art/`, `maps/` and the palette.
    pub asset_root: PathBuf,
    /// Palette path relative to `asset_root`. The built-in table is used when unset.
    pub palette: Option<String>,
    pub viewport: ViewportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("data"),
            palette: None,
            viewport: ViewportSettings::default(),
        }
    }
}
