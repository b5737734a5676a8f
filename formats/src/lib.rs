pub mod error;
pub mod frm;
pub mod map;
pub mod pal;

pub use error::{DecodeError, SpriteFault};
pub use frm::{Direction, Frame, SpriteDirection, SpriteSheet, decode_run_length};
pub use map::{Fid, MapDocument, ObjectKind, ObjectRecord, TileCell, TileGrid};
pub use pal::Palette;

/// Decode a sprite container. Structural faults are reported precisely; the
/// caller decides whether to substitute [`SpriteSheet::placeholder`].
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteSheet, DecodeError> {
    SpriteSheet::read_from_bytes(bytes)
}

/// Decode a map container. Never fails: a buffer too short for the fixed
/// sections yields [`MapDocument::default`], a short object section keeps the
/// records read so far.
pub fn decode_map(bytes: &[u8]) -> MapDocument {
    MapDocument::read_or_default(bytes)
}
