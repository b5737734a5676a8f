use formats::{Frame, MapDocument, ObjectKind, SpriteSheet};
use std::fmt::Write;

const RAMP: &[u8] = b".:-=+*#%@";

/// One character per pixel; transparent pixels are blank, others step up a
/// ramp by palette index.
pub fn frame_to_ascii(frame: &Frame) -> String {
    let mut out = String::with_capacity((frame.width as usize + 1) * frame.height as usize);
    for row in frame.data.chunks(frame.width.max(1) as usize) {
        for &index in row {
            let c = if index == 0 {
                ' '
            } else {
                RAMP[(index as usize - 1) * RAMP.len() / 255] as char
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

pub fn describe_sprite(sheet: &SpriteSheet) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "version {} fps {} action frame {} frames/direction {}",
        sheet.version, sheet.frames_per_second, sheet.action_frame, sheet.frames_per_direction
    );
    for dir in &sheet.directions {
        let _ = writeln!(
            out,
            "{:>2} shift ({}, {}) {} frames",
            dir.direction.short_name(),
            dir.shift_x,
            dir.shift_y,
            dir.frames.len()
        );
        for (i, frame) in dir.frames.iter().enumerate() {
            let _ = writeln!(
                out,
                "   #{i} {}x{} hotspot ({}, {})",
                frame.width, frame.height, frame.hotspot_x, frame.hotspot_y
            );
        }
    }
    out
}

pub fn describe_map(map: &MapDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (version {})", map.name, map.version);
    let _ = writeln!(
        out,
        "entering tile {} elevation {} rotation {}",
        map.entering_tile, map.entering_elevation, map.entering_rotation
    );
    let _ = writeln!(
        out,
        "{} global vars, {} local vars",
        map.global_vars.len(),
        map.local_vars.len()
    );
    let _ = writeln!(
        out,
        "objects {}/{}: {} critters, {} items, {} scenery, {} other",
        map.objects.len(),
        map.declared_object_count,
        map.npcs().count(),
        map.items().count(),
        map.scenery().count(),
        map.objects_of_kind(ObjectKind::Unknown).count()
    );
    out
}
