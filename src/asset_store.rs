use formats::{DecodeError, MapDocument, Palette, SpriteSheet};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MAPS_DIR: &str = "maps";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    MissingAsset(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Where container bytes come from. Lookups are by slash-separated relative path.
pub trait AssetSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirectorySource {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let full_path = self.root.join(path);
        match fs::read(&full_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::MissingAsset(path.to_string()))
            }
            Err(source) => Err(AssetError::Io {
                path: full_path.display().to_string(),
                source,
            }),
        }
    }
}

#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, data: Vec<u8>) {
        self.files.insert(path.into(), data);
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::MissingAsset(path.to_string()))
    }
}

/// Decoded sprite sheets keyed by source path.
#[derive(Default)]
pub struct SpriteCache {
    sheets: HashMap<String, Arc<SpriteSheet>>,
}

impl SpriteCache {
    pub fn get(&self, path: &str) -> Option<Arc<SpriteSheet>> {
        self.sheets.get(path).cloned()
    }

    pub fn insert(&mut self, path: &str, sheet: Arc<SpriteSheet>) {
        self.sheets.insert(path.to_string(), sheet);
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sheets.clear();
    }
}

/// Decoded maps keyed by map name.
#[derive(Default)]
pub struct MapCache {
    maps: HashMap<String, Arc<MapDocument>>,
}

impl MapCache {
    pub fn get(&self, name: &str) -> Option<Arc<MapDocument>> {
        self.maps.get(name).cloned()
    }

    pub fn insert(&mut self, name: &str, map: Arc<MapDocument>) {
        self.maps.insert(name.to_string(), map);
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn clear(&mut self) {
        self.maps.clear();
    }
}

/// Fetches containers from a source, decodes them and keeps the results.
/// Decoding itself stays stateless; this is where the fallback policy lives.
pub struct AssetStore<S: AssetSource> {
    source: S,
    palette: Palette,
    sprites: SpriteCache,
    maps: MapCache,
}

impl<S: AssetSource> AssetStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            palette: Palette::default(),
            sprites: SpriteCache::default(),
            maps: MapCache::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn load_palette(&mut self, path: &str) -> Result<(), AssetError> {
        let data = self.source.read(path)?;
        self.palette = Palette::from_bytes(&data)?;
        info!("Loaded palette {}", path);
        Ok(())
    }

    pub fn sprites(&self) -> &SpriteCache {
        &self.sprites
    }

    pub fn maps(&self) -> &MapCache {
        &self.maps
    }

    /// Decode and cache a sprite, surfacing fetch and decode errors.
    pub fn sprite(&mut self, path: &str) -> Result<Arc<SpriteSheet>, AssetError> {
        if let Some(sheet) = self.sprites.get(path) {
            debug!("Sprite cache hit: {}", path);
            return Ok(sheet);
        }

        let data = self.source.read(path)?;
        let sheet = Arc::new(formats::decode_sprite(&data)?);
        self.sprites.insert(path, sheet.clone());
        debug!("Sprite cache miss: {} ({} frames)", path, sheet.frame_count());
        Ok(sheet)
    }

    /// Like [`AssetStore::sprite`], substituting the placeholder square on any
    /// error. Placeholders are not cached so a later fix of the file is picked up.
    pub fn sprite_or_placeholder(&mut self, path: &str) -> Arc<SpriteSheet> {
        match self.sprite(path) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("Using placeholder for {}: {}", path, e);
                Arc::new(SpriteSheet::placeholder())
            }
        }
    }

    /// Fetch `maps/<name>.map`, falling back to the upper-case `.MAP` spelling.
    pub fn try_map(&mut self, name: &str) -> Result<Arc<MapDocument>, AssetError> {
        if let Some(map) = self.maps.get(name) {
            debug!("Map cache hit: {}", name);
            return Ok(map);
        }

        let data = match self.source.read(&format!("{MAPS_DIR}/{name}.map")) {
            Err(AssetError::MissingAsset(_)) => self
                .source
                .read(&format!("{MAPS_DIR}/{}.MAP", name.to_uppercase()))?,
            other => other?,
        };

        let map = Arc::new(formats::decode_map(&data));
        self.maps.insert(name, map.clone());
        info!("Loaded map {} ({} objects)", name, map.objects.len());
        Ok(map)
    }

    /// Map by name, or the default document when it cannot be fetched. The
    /// result is cached either way.
    pub fn map(&mut self, name: &str) -> Arc<MapDocument> {
        match self.try_map(name) {
            Ok(map) => map,
            Err(e) => {
                warn!("Using default map for {}: {}", name, e);
                let map = Arc::new(MapDocument::default());
                self.maps.insert(name, map.clone());
                map
            }
        }
    }
}
