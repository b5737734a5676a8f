use super::constants::*;
use glam::{I64Vec2, IVec2, Vec2};

/// Neighbourhood searched around the linear estimate by the inverse transforms.
const SEARCH_RADIUS: i32 = 3;

/// Integer division rounding towards negative infinity.
pub fn floor_div(a: i32, b: i32) -> i32 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// (column, row) of a linear index on a grid `width` cells wide.
pub fn grid_position(tile: u32, width: i32) -> IVec2 {
    let width = width as u32;
    IVec2::new((tile % width) as i32, (tile / width) as i32)
}

pub fn grid_index(position: IVec2, width: i32) -> u32 {
    (position.y * width + position.x) as u32
}

/// Project a wide-grid (200x200) tile to screen pixels. `center` is the
/// (column, row) of the tile drawn at `offset`.
pub fn tile_to_screen(tile: u32, center: IVec2, offset: IVec2) -> IVec2 {
    let position = grid_position(tile, HEX_GRID_WIDTH);
    // Columns run right to left on screen.
    let column = HEX_GRID_WIDTH - 1 - position.x;
    let center_column = HEX_GRID_WIDTH - 1 - center.x;
    let dx = column - center_column;
    let dy = position.y - center.y;

    let mut screen = offset
        + IVec2::new(
            HEX_COLUMN_PAIR_X * floor_div(dx, 2) + HEX_ROW_X * dy,
            HEX_COLUMN_PAIR_Y * floor_div(dx, -2) + HEX_ROW_Y * dy,
        );

    // Odd columns sit half a hex off their pair; parity is taken relative to
    // the center column so the center tile always lands on `offset`.
    if dx.rem_euclid(2) == 1 {
        if dx < 0 {
            screen += IVec2::new(HEX_ODD_LEFT_X, HEX_ODD_LEFT_Y);
        } else {
            screen.x += HEX_ODD_RIGHT_X;
        }
    }

    screen
}

/// Project a narrow-grid (100x100) floor/roof cell to screen pixels. Unlike
/// the wide grid, only the tile column is mirrored; `center` is compared
/// against the mirrored column as is.
pub fn square_tile_to_screen(tile: u32, center: IVec2, offset: IVec2) -> IVec2 {
    let position = grid_position(tile, SQUARE_GRID_WIDTH);
    let column = SQUARE_GRID_WIDTH - 1 - position.x;
    let dx = column - center.x;
    let dy = position.y - center.y;

    offset
        + IVec2::new(
            SQUARE_COLUMN_X * dx + SQUARE_ROW_X * dy,
            SQUARE_COLUMN_Y * dx + SQUARE_ROW_Y * dy,
        )
}

/// Best-effort inverse of [`tile_to_screen`]: the tile whose projection lies
/// closest to `screen`, clamped to the grid.
pub fn screen_to_tile(screen: IVec2, center: IVec2, offset: IVec2) -> u32 {
    let rel = relative(screen, offset);
    // Inverse of the linear part, ignoring the odd-column correction.
    let steps = Vec2::new(12.0 * rel.x - 16.0 * rel.y, 6.0 * rel.x + 24.0 * rel.y) / 384.0;
    let estimate = IVec2::new(
        center.x.saturating_sub(steps.x.round() as i32),
        center.y.saturating_add(steps.y.round() as i32),
    );

    nearest_tile(screen, estimate, HEX_GRID_WIDTH, HEX_GRID_HEIGHT, |tile| {
        tile_to_screen(tile, center, offset)
    })
}

/// Best-effort inverse of [`square_tile_to_screen`].
pub fn screen_to_square_tile(screen: IVec2, center: IVec2, offset: IVec2) -> u32 {
    let rel = relative(screen, offset);
    let steps = Vec2::new(24.0 * rel.x - 32.0 * rel.y, 12.0 * rel.x + 48.0 * rel.y) / 1536.0;
    let estimate = IVec2::new(
        (SQUARE_GRID_WIDTH - 1 - center.x).saturating_sub(steps.x.round() as i32),
        center.y.saturating_add(steps.y.round() as i32),
    );

    nearest_tile(
        screen,
        estimate,
        SQUARE_GRID_WIDTH,
        SQUARE_GRID_HEIGHT,
        |tile| square_tile_to_screen(tile, center, offset),
    )
}

/// `screen - offset` without overflow for any pair of points.
fn relative(screen: IVec2, offset: IVec2) -> Vec2 {
    (screen.as_i64vec2() - offset.as_i64vec2()).as_vec2()
}

fn nearest_tile(
    screen: IVec2,
    estimate: IVec2,
    width: i32,
    height: i32,
    project: impl Fn(u32) -> IVec2,
) -> u32 {
    let estimate = estimate.clamp(IVec2::ZERO, IVec2::new(width - 1, height - 1));
    let mut best = (i128::MAX, grid_index(estimate, width));

    for y in (estimate.y - SEARCH_RADIUS).max(0)..=(estimate.y + SEARCH_RADIUS).min(height - 1) {
        for x in (estimate.x - SEARCH_RADIUS).max(0)..=(estimate.x + SEARCH_RADIUS).min(width - 1) {
            let tile = grid_index(IVec2::new(x, y), width);
            let delta: I64Vec2 = project(tile).as_i64vec2() - screen.as_i64vec2();
            let distance = (delta.x as i128).pow(2) + (delta.y as i128).pow(2);
            if distance < best.0 {
                best = (distance, tile);
            }
        }
    }

    best.1
}
