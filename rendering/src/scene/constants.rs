// Grid dimensions and projection scales shared by the tile transforms

pub use formats::map::{
    HEX_GRID_HEIGHT, HEX_GRID_SIZE, HEX_GRID_WIDTH, SQUARE_GRID_HEIGHT, SQUARE_GRID_SIZE,
    SQUARE_GRID_WIDTH,
};

// Pixels per step on the wide grid (column pairs, rows)
pub const HEX_COLUMN_PAIR_X: i32 = 48;
pub const HEX_COLUMN_PAIR_Y: i32 = 12;
pub const HEX_ROW_X: i32 = 16;
pub const HEX_ROW_Y: i32 = 12;
pub const HEX_ODD_LEFT_X: i32 = -16;
pub const HEX_ODD_LEFT_Y: i32 = 12;
pub const HEX_ODD_RIGHT_X: i32 = 32;

// Pixels per step on the narrow grid
pub const SQUARE_COLUMN_X: i32 = 48;
pub const SQUARE_COLUMN_Y: i32 = -12;
pub const SQUARE_ROW_X: i32 = 32;
pub const SQUARE_ROW_Y: i32 = 24;

// Viewport offset derivation
pub const TILE_WIDTH: i32 = 32;
pub const TILE_HEIGHT: i32 = 16;
pub const WIDE_WINDOW_THRESHOLD: i32 = 640;
pub const WIDE_WINDOW_SHIFT_X: i32 = 32;
pub const SQUARE_OFFSET_X: i32 = 16;
pub const SQUARE_OFFSET_Y: i32 = 2;
pub const SQUARE_ODD_ROW_X: i32 = 16;
pub const SQUARE_ODD_ROW_Y: i32 = 12;
