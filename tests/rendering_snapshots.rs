mod common;

use arroyo::preview;
use common::{ObjectSpec, SpriteBuilder, map_bytes};
use formats::{Direction, Palette, SpriteSheet};

// 5x3: a full row, a row with transparent gaps, a run of 128.
const FRAME_PAYLOAD: &[u8] = &[
    0x85, 0x01, //
    0x01, 0x00, 0x81, 0xff, 0x00, 0x01, //
    0x85, 0x80,
];

#[test]
fn test_frame_ascii() {
    let bytes = SpriteBuilder::new()
        .frame(5, 3, (2, 1), FRAME_PAYLOAD)
        .build();
    let sheet = formats::decode_sprite(&bytes).unwrap();
    let frame = sheet.frame(Direction::NorthEast, 0).unwrap();

    insta::assert_snapshot!(preview::frame_to_ascii(frame), @r"
    .....
    . @ .
    +++++
    ");
}

#[test]
fn test_sprite_summary() {
    let bytes = SpriteBuilder::new()
        .directions(6)
        .frame(5, 3, (2, 1), FRAME_PAYLOAD)
        .frame(1, 1, (0, -4), &[0x07])
        .build();
    let sheet = formats::decode_sprite(&bytes).unwrap();
    assert_eq!(sheet.frame_count(), 12);

    insta::assert_snapshot!(preview::describe_sprite(&sheet), @r"
    version 4 fps 10 action frame 0 frames/direction 2
    NE shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
     E shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
    SE shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
    SW shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
     W shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
    NW shift (0, 0) 2 frames
       #0 5x3 hotspot (2, 1)
       #1 1x1 hotspot (0, -4)
    ");
}

#[test]
fn test_placeholder_is_gray_square() {
    let sheet = SpriteSheet::placeholder();
    let frame = sheet.frame(Direction::NorthEast, 0).unwrap();
    assert_eq!((frame.width, frame.height), (32, 32));

    let rgba = frame.to_rgba(&Palette::default());
    assert_eq!(rgba.len(), 32 * 32 * 4);
    assert!(rgba.chunks_exact(4).all(|px| px == [128, 128, 128, 255]));
}

#[test]
fn test_map_summary() {
    let bytes = map_bytes(
        "DENBUS1",
        &[
            ObjectSpec { elevation: 0, id: 1, tile: 20100, fid: 0x0100_0001 },
            ObjectSpec { elevation: 0, id: 2, tile: 20101, fid: 0x0100_0002 },
            ObjectSpec { elevation: 1, id: 3, tile: 300, fid: 0x0200_0010 },
            ObjectSpec { elevation: 2, id: 4, tile: 400, fid: 0x0300_0020 },
            ObjectSpec { elevation: 2, id: 5, tile: 401, fid: 0x0500_0001 },
        ],
    );
    let map = formats::decode_map(&bytes);

    insta::assert_snapshot!(preview::describe_map(&map), @r"
    DENBUS1 (version 19)
    entering tile 20100 elevation 0 rotation 2
    0 global vars, 0 local vars
    objects 5/5: 2 critters, 1 items, 1 scenery, 1 other
    ");
}
