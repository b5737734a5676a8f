use thiserror::Error;

use crate::frm::Direction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed sprite: {0}")]
    MalformedSprite(#[from] SpriteFault),

    #[error("Map truncated in {section}: need {needed} bytes, {available} available")]
    TruncatedMap {
        section: MapSection,
        needed: usize,
        available: usize,
    },

    #[error("Object section truncated after {read} of {declared} records")]
    TruncatedObjectSection { read: usize, declared: usize },

    #[error("Palette too short: {len} bytes (expected 768)")]
    MalformedPalette { len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpriteFault {
    #[error("buffer is {len} bytes, header needs {needed}")]
    TooShort { len: usize, needed: usize },

    #[error("{direction:?} data offset {offset} is outside a {len} byte buffer")]
    OffsetOutOfBounds {
        direction: Direction,
        offset: u32,
        len: usize,
    },

    #[error("{direction:?} frame {frame} header at {offset} runs past the buffer end")]
    FrameHeaderOutOfBounds {
        direction: Direction,
        frame: u16,
        offset: usize,
    },

    #[error("{direction:?} frame {frame} declares {size} bytes but only {remaining} remain")]
    FrameDataOutOfBounds {
        direction: Direction,
        frame: u16,
        size: u32,
        remaining: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSection {
    Header,
    GlobalVars,
    LocalVars,
    Tiles,
}

impl std::fmt::Display for MapSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapSection::Header => write!(f, "header"),
            MapSection::GlobalVars => write!(f, "global variables"),
            MapSection::LocalVars => write!(f, "local variables"),
            MapSection::Tiles => write!(f, "tile grid"),
        }
    }
}
