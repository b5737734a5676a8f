pub mod constants;
pub mod depth;
pub mod utils;

pub use constants::*;
pub use depth::{object_screen_position, sort_by_depth};
pub use utils::{
    floor_div, grid_index, grid_position, screen_to_square_tile, screen_to_tile,
    square_tile_to_screen, tile_to_screen,
};
