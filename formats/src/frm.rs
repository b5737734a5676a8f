use bincode::{Decode, Encode};
use byteorder::{LE, ReadBytesExt};
use num_enum::TryFromPrimitive;
use std::io::{Cursor, Read};
use tracing::debug;

use crate::error::{DecodeError, SpriteFault};
use crate::pal::Palette;

pub const DIRECTION_COUNT: usize = 6;
/// Header fields as laid out on disk, including the 24 bytes of padding.
pub const HEADER_SIZE: usize = 86;
pub const FRAME_HEADER_SIZE: usize = 12;

const PLACEHOLDER_SIDE: u16 = 32;
const PLACEHOLDER_INDEX: u8 = 2;

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    /// Compressed payload size as declared by the frame header.
    pub size: u32,
    pub hotspot_x: i16,
    pub hotspot_y: i16,
    /// Palette indices, always `width * height` long. 0 is transparent.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        palette.expand(&self.data)
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SpriteDirection {
    pub direction: Direction,
    pub shift_x: i16,
    pub shift_y: i16,
    pub data_offset: u32,
    pub frames: Vec<Frame>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub version: u32,
    pub frames_per_second: u16,
    pub action_frame: u16,
    pub frames_per_direction: u16,
    pub data_size: u32,
    /// One slot per [`Direction`], in header order. Slots with a zero data
    /// offset carry no frames.
    pub directions: Vec<SpriteDirection>,
}

struct Header {
    version: u32,
    frames_per_second: u16,
    action_frame: u16,
    frame_count: u16,
    shift_x: [i16; DIRECTION_COUNT],
    shift_y: [i16; DIRECTION_COUNT],
    offsets: [u32; DIRECTION_COUNT],
    data_size: u32,
}

impl Header {
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let version = reader.read_u32::<LE>()?;
        let frames_per_second = reader.read_u16::<LE>()?;
        let action_frame = reader.read_u16::<LE>()?;
        let frame_count = reader.read_u16::<LE>()?;

        let mut shift_x = [0i16; DIRECTION_COUNT];
        reader.read_i16_into::<LE>(&mut shift_x)?;
        let mut shift_y = [0i16; DIRECTION_COUNT];
        reader.read_i16_into::<LE>(&mut shift_y)?;
        let mut offsets = [0u32; DIRECTION_COUNT];
        reader.read_u32_into::<LE>(&mut offsets)?;

        reader.read_exact(&mut [0u8; 24])?;
        let data_size = reader.read_u32::<LE>()?;

        Ok(Self {
            version,
            frames_per_second,
            action_frame,
            frame_count,
            shift_x,
            shift_y,
            offsets,
            data_size,
        })
    }
}

impl SpriteSheet {
    pub fn read_from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let too_short = SpriteFault::TooShort {
            len: data.len(),
            needed: HEADER_SIZE,
        };
        if data.len() < HEADER_SIZE {
            return Err(too_short.into());
        }
        let header = Header::read(&mut Cursor::new(data)).map_err(|_| too_short)?;

        let mut directions = Vec::with_capacity(DIRECTION_COUNT);
        for (slot, direction) in Direction::ALL.into_iter().enumerate() {
            let data_offset = header.offsets[slot];
            let frames = if data_offset == 0 {
                Vec::new()
            } else {
                read_direction(data, direction, data_offset, header.frame_count)?
            };

            directions.push(SpriteDirection {
                direction,
                shift_x: header.shift_x[slot],
                shift_y: header.shift_y[slot],
                data_offset,
                frames,
            });
        }

        let sheet = Self {
            version: header.version,
            frames_per_second: header.frames_per_second,
            action_frame: header.action_frame,
            frames_per_direction: header.frame_count,
            data_size: header.data_size,
            directions,
        };
        debug!(
            frames = sheet.frame_count(),
            fps = sheet.frames_per_second,
            "Decoded sprite sheet"
        );
        Ok(sheet)
    }

    /// Single 32x32 filled square, substituted by callers when a sprite cannot
    /// be decoded or fetched.
    pub fn placeholder() -> Self {
        let side = PLACEHOLDER_SIDE;
        let frame = Frame {
            width: side,
            height: side,
            size: 0,
            hotspot_x: 0,
            hotspot_y: 0,
            data: vec![PLACEHOLDER_INDEX; side as usize * side as usize],
        };

        let directions = Direction::ALL
            .into_iter()
            .map(|direction| SpriteDirection {
                direction,
                shift_x: 0,
                shift_y: 0,
                data_offset: 0,
                frames: if direction == Direction::NorthEast {
                    vec![frame.clone()]
                } else {
                    vec![]
                },
            })
            .collect();

        Self {
            version: 0,
            frames_per_second: 0,
            action_frame: 0,
            frames_per_direction: 1,
            data_size: 0,
            directions,
        }
    }

    pub fn direction(&self, direction: Direction) -> &SpriteDirection {
        &self.directions[direction as usize]
    }

    /// Every frame in direction order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.directions.iter().flat_map(|d| d.frames.iter())
    }

    pub fn frame_count(&self) -> usize {
        self.directions.iter().map(|d| d.frames.len()).sum()
    }

    pub fn frame(&self, direction: Direction, index: usize) -> Option<&Frame> {
        self.direction(direction).frames.get(index)
    }
}

/// Frames of a direction have no index table: each one starts where the
/// previous frame's payload ends.
fn read_direction(
    data: &[u8],
    direction: Direction,
    data_offset: u32,
    frame_count: u16,
) -> Result<Vec<Frame>, SpriteFault> {
    let mut cursor = data_offset as usize;
    if cursor >= data.len() {
        return Err(SpriteFault::OffsetOutOfBounds {
            direction,
            offset: data_offset,
            len: data.len(),
        });
    }

    let mut frames = Vec::with_capacity(frame_count as usize);
    for frame in 0..frame_count {
        let header_end = cursor + FRAME_HEADER_SIZE;
        let header_bytes = data
            .get(cursor..header_end)
            .ok_or(SpriteFault::FrameHeaderOutOfBounds {
                direction,
                frame,
                offset: cursor,
            })?;

        let (width, height, size, hotspot_x, hotspot_y) = read_frame_header(header_bytes)
            .map_err(|_| SpriteFault::FrameHeaderOutOfBounds {
                direction,
                frame,
                offset: cursor,
            })?;

        let remaining = data.len() - header_end;
        if size as usize > remaining {
            return Err(SpriteFault::FrameDataOutOfBounds {
                direction,
                frame,
                size,
                remaining,
            });
        }
        let payload_end = header_end + size as usize;

        frames.push(Frame {
            width,
            height,
            size,
            hotspot_x,
            hotspot_y,
            data: decode_run_length(&data[header_end..payload_end], width, height),
        });

        cursor = payload_end;
    }

    Ok(frames)
}

fn read_frame_header(bytes: &[u8]) -> std::io::Result<(u16, u16, u32, i16, i16)> {
    let mut reader = Cursor::new(bytes);
    Ok((
        reader.read_u16::<LE>()?,
        reader.read_u16::<LE>()?,
        reader.read_u32::<LE>()?,
        reader.read_i16::<LE>()?,
        reader.read_i16::<LE>()?,
    ))
}

/// Expand a run-length pixel stream into exactly `width * height` palette
/// indices.
///
/// Control bytes below 0x80 are literal pixels (0 is transparent). A control
/// byte `c >= 0x80` repeats the following byte `c - 0x80` times. Output stops
/// when the buffer is full; input that runs out early leaves the rest zeroed.
pub fn decode_run_length(data: &[u8], width: u16, height: u16) -> Vec<u8> {
    let len = width as usize * height as usize;
    let mut pixels = vec![0u8; len];
    let mut input = data.iter().copied();
    let mut out = 0;

    while out < len {
        let Some(control) = input.next() else { break };

        if control < 0x80 {
            pixels[out] = control;
            out += 1;
            continue;
        }

        let Some(value) = input.next() else { break };
        let count = ((control - 0x80) as usize).min(len - out);
        pixels[out..out + count].fill(value);
        out += count;
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn header(frame_count: u16, offsets: [u32; DIRECTION_COUNT]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&10u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&frame_count.to_le_bytes());
        for shift in [1i16, 2, 3, 4, 5, 6] {
            bytes.extend_from_slice(&shift.to_le_bytes());
        }
        for shift in [-1i16, -2, -3, -4, -5, -6] {
            bytes.extend_from_slice(&shift.to_le_bytes());
        }
        for offset in offsets {
            bytes.extend_from_slice(&offset.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 24]);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(bytes.len(), HEADER_SIZE);
        bytes
    }

    fn frame(bytes: &mut Vec<u8>, width: u16, height: u16, hotspot: (i16, i16), payload: &[u8]) {
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&hotspot.0.to_le_bytes());
        bytes.extend_from_slice(&hotspot.1.to_le_bytes());
        bytes.extend_from_slice(payload);
    }

    #[test]
    fn test_run_length_controls() {
        assert_eq!(decode_run_length(&[0x85, 0x07], 5, 1), vec![7; 5]);
        assert_eq!(decode_run_length(&[0x00], 1, 1), vec![0]);
        assert_eq!(decode_run_length(&[0x50], 1, 1), vec![0x50]);
        assert_eq!(
            decode_run_length(&[0x01, 0x82, 0x09, 0x00, 0x7f], 5, 1),
            vec![1, 9, 9, 0, 0x7f]
        );
    }

    #[test]
    fn test_run_stops_at_buffer_end() {
        assert_eq!(decode_run_length(&[0xff, 0x03, 0x05], 2, 2), vec![3; 4]);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        assert_eq!(decode_run_length(&[0x04, 0x83], 3, 2), vec![4, 0, 0, 0, 0, 0]);
        assert_eq!(decode_run_length(&[], 2, 1), vec![0, 0]);
    }

    proptest! {
        #[test]
        fn test_run_length_output_len(data in proptest::collection::vec(any::<u8>(), 0..512),
                                      width in 0u16..64, height in 0u16..64) {
            prop_assert_eq!(decode_run_length(&data, width, height).len(),
                            width as usize * height as usize);
        }
    }

    #[test]
    fn test_frames_are_walked_in_sequence() {
        let mut bytes = header(2, [HEADER_SIZE as u32, 0, 0, 0, 0, 0]);
        frame(&mut bytes, 2, 1, (1, -3), &[0x82, 0x11]);
        frame(&mut bytes, 1, 2, (0, 4), &[0x22, 0x23, 0xff]);

        let sheet = SpriteSheet::read_from_bytes(&bytes).unwrap();
        assert_eq!(sheet.frames_per_second, 10);
        assert_eq!(sheet.frames_per_direction, 2);
        assert_eq!(sheet.frame_count(), 2);

        let ne = sheet.direction(Direction::NorthEast);
        assert_eq!((ne.shift_x, ne.shift_y), (1, -1));
        assert_eq!(ne.frames[0].data, vec![0x11, 0x11]);
        assert_eq!((ne.frames[0].hotspot_x, ne.frames[0].hotspot_y), (1, -3));
        assert_eq!(ne.frames[1].data, vec![0x22, 0x23]);
        assert_eq!(ne.frames[1].size, 3);

        for direction in &Direction::ALL[1..] {
            assert!(sheet.direction(*direction).frames.is_empty());
        }
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            SpriteSheet::read_from_bytes(&[0u8; 40]),
            Err(DecodeError::MalformedSprite(SpriteFault::TooShort {
                len: 40,
                needed: HEADER_SIZE
            }))
        );
    }

    #[test]
    fn test_offset_outside_buffer() {
        let bytes = header(1, [0, 0, 500, 0, 0, 0]);
        assert_eq!(
            SpriteSheet::read_from_bytes(&bytes),
            Err(DecodeError::MalformedSprite(SpriteFault::OffsetOutOfBounds {
                direction: Direction::SouthEast,
                offset: 500,
                len: HEADER_SIZE,
            }))
        );
    }

    #[test]
    fn test_declared_size_exceeds_buffer() {
        let mut bytes = header(1, [HEADER_SIZE as u32, 0, 0, 0, 0, 0]);
        frame(&mut bytes, 4, 4, (0, 0), &[0x01, 0x02]);
        let size_at = HEADER_SIZE + 4;
        bytes[size_at..size_at + 4].copy_from_slice(&9u32.to_le_bytes());

        assert_eq!(
            SpriteSheet::read_from_bytes(&bytes),
            Err(DecodeError::MalformedSprite(SpriteFault::FrameDataOutOfBounds {
                direction: Direction::NorthEast,
                frame: 0,
                size: 9,
                remaining: 2,
            }))
        );
    }

    #[test]
    fn test_missing_second_frame_header() {
        let mut bytes = header(2, [HEADER_SIZE as u32, 0, 0, 0, 0, 0]);
        frame(&mut bytes, 1, 1, (0, 0), &[0x05]);
        bytes.extend_from_slice(&[0u8; 5]);

        assert_eq!(
            SpriteSheet::read_from_bytes(&bytes),
            Err(DecodeError::MalformedSprite(SpriteFault::FrameHeaderOutOfBounds {
                direction: Direction::NorthEast,
                frame: 1,
                offset: HEADER_SIZE + FRAME_HEADER_SIZE + 1,
            }))
        );
    }

    #[test]
    fn test_placeholder() {
        let sheet = SpriteSheet::placeholder();
        assert_eq!(sheet.frame_count(), 1);
        let frame = sheet.frame(Direction::NorthEast, 0).unwrap();
        assert_eq!((frame.width, frame.height), (32, 32));
        assert!(frame.data.iter().all(|&p| p == PLACEHOLDER_INDEX));
        assert_eq!(frame.pixel(31, 31), Some(PLACEHOLDER_INDEX));
        assert_eq!(frame.pixel(32, 0), None);
    }
}
