use glam::IVec2;
use tracing::debug;

use crate::scene::constants::*;
use crate::scene::utils::{
    grid_position, screen_to_square_tile, screen_to_tile, square_tile_to_screen, tile_to_screen,
};

/// Pixel position at which the center tile of a `width` x `height` window is drawn.
pub fn tile_offset(width: i32, height: i32) -> IVec2 {
    let mut offset = IVec2::new((width - TILE_WIDTH) / 2, (height - TILE_HEIGHT) / 2);
    if width > WIDE_WINDOW_THRESHOLD {
        offset.x -= WIDE_WINDOW_SHIFT_X;
    }
    offset
}

/// Floor/roof offset derived from the tile offset. Odd center rows shift the
/// square grid by half a cell.
pub fn square_offset(tile_offset: IVec2, center_row: i32) -> IVec2 {
    let mut offset = tile_offset - IVec2::new(SQUARE_OFFSET_X, SQUARE_OFFSET_Y);
    if center_row.rem_euclid(2) == 1 {
        offset -= IVec2::new(SQUARE_ODD_ROW_X, SQUARE_ODD_ROW_Y);
    }
    offset
}

/// Window size plus the wide-grid tile kept at the middle of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub width: i32,
    pub height: i32,
    pub center_tile: u32,
    /// (column, row) of `center_tile` on the wide grid.
    pub center: IVec2,
    /// Matching cell on the narrow grid.
    pub square_center: IVec2,
    pub tile_offset: IVec2,
    pub square_offset: IVec2,
}

impl Camera {
    pub fn new(width: i32, height: i32, center_tile: u32) -> Self {
        let mut camera = Self {
            width,
            height,
            center_tile,
            center: IVec2::ZERO,
            square_center: IVec2::ZERO,
            tile_offset: IVec2::ZERO,
            square_offset: IVec2::ZERO,
        };
        camera.update();
        camera
    }

    pub fn set_center(&mut self, center_tile: u32) {
        self.center_tile = center_tile;
        self.update();
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.update();
    }

    fn update(&mut self) {
        let center_tile = self.center_tile % HEX_GRID_SIZE as u32;
        if center_tile != self.center_tile {
            debug!(tile = self.center_tile, "Center tile outside the grid, wrapping");
            self.center_tile = center_tile;
        }
        self.center = grid_position(self.center_tile, HEX_GRID_WIDTH);
        self.square_center = self.center / 2;
        self.tile_offset = tile_offset(self.width, self.height);
        self.square_offset = square_offset(self.tile_offset, self.center.y);
    }

    pub fn tile_to_screen(&self, tile: u32) -> IVec2 {
        tile_to_screen(tile, self.center, self.tile_offset)
    }

    pub fn square_tile_to_screen(&self, square_tile: u32) -> IVec2 {
        square_tile_to_screen(square_tile, self.square_center, self.square_offset)
    }

    pub fn screen_to_tile(&self, screen: IVec2) -> u32 {
        screen_to_tile(screen, self.center, self.tile_offset)
    }

    pub fn screen_to_square_tile(&self, screen: IVec2) -> u32 {
        screen_to_square_tile(screen, self.square_center, self.square_offset)
    }
}
