pub mod camera;
pub mod scene;

pub use camera::{Camera, square_offset, tile_offset};
