#![allow(dead_code)]

use formats::frm::{DIRECTION_COUNT, HEADER_SIZE};
use formats::map::{ELEVATION_COUNT, NAME_SIZE, SQUARE_GRID_SIZE};

pub struct FrameSpec<'a> {
    pub width: u16,
    pub height: u16,
    pub hotspot: (i16, i16),
    pub payload: &'a [u8],
}

/// Sprite container with the same frames in every populated direction.
pub struct SpriteBuilder<'a> {
    fps: u16,
    directions: usize,
    frames: Vec<FrameSpec<'a>>,
}

impl<'a> SpriteBuilder<'a> {
    pub fn new() -> Self {
        Self {
            fps: 10,
            directions: 1,
            frames: Vec::new(),
        }
    }

    pub fn directions(mut self, directions: usize) -> Self {
        self.directions = directions.min(DIRECTION_COUNT);
        self
    }

    pub fn frame(mut self, width: u16, height: u16, hotspot: (i16, i16), payload: &'a [u8]) -> Self {
        self.frames.push(FrameSpec {
            width,
            height,
            hotspot,
            payload,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for frame in &self.frames {
            body.extend_from_slice(&frame.width.to_le_bytes());
            body.extend_from_slice(&frame.height.to_le_bytes());
            body.extend_from_slice(&(frame.payload.len() as u32).to_le_bytes());
            body.extend_from_slice(&frame.hotspot.0.to_le_bytes());
            body.extend_from_slice(&frame.hotspot.1.to_le_bytes());
            body.extend_from_slice(frame.payload);
        }

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&self.fps.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&(self.frames.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&[0u8; 2 * 2 * DIRECTION_COUNT]);
        for slot in 0..DIRECTION_COUNT {
            let offset = if slot < self.directions {
                (HEADER_SIZE + slot * body.len()) as u32
            } else {
                0
            };
            bytes.extend_from_slice(&offset.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 24]);
        bytes.extend_from_slice(&((body.len() * self.directions) as u32).to_le_bytes());
        for _ in 0..self.directions {
            bytes.extend_from_slice(&body);
        }
        bytes
    }
}

pub struct ObjectSpec {
    pub elevation: usize,
    pub id: u32,
    pub tile: u32,
    pub fid: u32,
}

pub fn map_bytes(name: &str, objects: &[ObjectSpec]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&19u32.to_le_bytes());
    let mut raw_name = [0u8; NAME_SIZE];
    raw_name[..name.len()].copy_from_slice(name.as_bytes());
    bytes.extend_from_slice(&raw_name);
    for field in [20100u32, 0, 2, 0, 0, 0, 0, 0, 3, 0] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    bytes.extend_from_slice(&[0u8; 44]);
    for _ in 0..ELEVATION_COUNT * SQUARE_GRID_SIZE {
        bytes.extend_from_slice(&0x0100_0010u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
    }

    bytes.extend_from_slice(&(objects.len() as u32).to_le_bytes());
    for elevation in 0..ELEVATION_COUNT {
        let here: Vec<_> = objects.iter().filter(|o| o.elevation == elevation).collect();
        bytes.extend_from_slice(&(here.len() as u32).to_le_bytes());
        for object in here {
            let fields: [u32; 17] = [
                object.id, object.tile, 0, 0, 0, 0, 0, 0, object.fid, 0, 0, 0, 0, 0, 0, 0, 0,
            ];
            for field in fields {
                bytes.extend_from_slice(&field.to_le_bytes());
            }
        }
    }
    bytes
}
