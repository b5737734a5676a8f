use bincode::{Decode, Encode};

use crate::error::DecodeError;

pub const PALETTE_COLORS: usize = 256;
pub const PALETTE_BYTES: usize = PALETTE_COLORS * 3;

/// Colour used for every index a palette does not map.
pub const FALLBACK_COLOR: (u8, u8, u8) = (128, 128, 128);

const BASIC_COLORS: [(u8, u8, u8); 6] = [
    (0, 0, 0),
    (255, 255, 255),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
];

/// 256-entry colour table. Index 0 is always transparent when expanded to RGBA.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<(u8, u8, u8)>,
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = vec![FALLBACK_COLOR; PALETTE_COLORS];
        colors[..BASIC_COLORS.len()].copy_from_slice(&BASIC_COLORS);
        Self { colors }
    }
}

impl Palette {
    /// Read a `.pal` table: 256 RGB triples of 6-bit channels. Triples with a
    /// channel above 63 are mapped to black. Trailing bytes (colour tables the
    /// game appends) are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < PALETTE_BYTES {
            return Err(DecodeError::MalformedPalette { len: data.len() });
        }

        let colors = data[..PALETTE_BYTES]
            .chunks_exact(3)
            .map(|rgb| {
                if rgb.iter().any(|&c| c > 63) {
                    (0, 0, 0)
                } else {
                    (rgb[0] * 4, rgb[1] * 4, rgb[2] * 4)
                }
            })
            .collect();

        Ok(Self { colors })
    }

    pub fn color(&self, index: u8) -> (u8, u8, u8) {
        self.colors
            .get(index as usize)
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn rgba(&self, index: u8) -> [u8; 4] {
        let (r, g, b) = self.color(index);
        let a = if index == 0 { 0 } else { 255 };
        [r, g, b, a]
    }

    /// Expand a buffer of palette indices into RGBA8.
    pub fn expand(&self, indices: &[u8]) -> Vec<u8> {
        indices.iter().flat_map(|&idx| self.rgba(idx)).collect()
    }
}
