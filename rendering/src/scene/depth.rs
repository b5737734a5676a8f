use formats::ObjectRecord;
use glam::IVec2;

use crate::Camera;

/// Where an object's anchor lands on screen: its tile projection plus the
/// per-object pixel offset.
pub fn object_screen_position(object: &ObjectRecord, camera: &Camera) -> IVec2 {
    camera.tile_to_screen(object.tile) + IVec2::new(object.x, object.y)
}

/// Painter's order: lower elevations first, then top of screen to bottom,
/// then left to right. Ties keep their input order.
pub fn sort_by_depth<'a>(
    objects: impl IntoIterator<Item = &'a ObjectRecord>,
    camera: &Camera,
) -> Vec<&'a ObjectRecord> {
    let mut sorted: Vec<_> = objects.into_iter().collect();
    sorted.sort_by_key(|object| {
        let screen = object_screen_position(object, camera);
        (object.elevation, screen.y, screen.x)
    });
    sorted
}
