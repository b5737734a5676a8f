use bincode::{Decode, Encode};
use byteorder::{LE, ReadBytesExt};
use num_enum::FromPrimitive;
use std::io::{Cursor, Read};
use tracing::{debug, warn};

use crate::error::{DecodeError, MapSection};

pub const ELEVATION_COUNT: usize = 3;
// Wide grid: objects and hex tiles. Narrow grid: floor and roof cells.
pub const HEX_GRID_WIDTH: i32 = 200;
pub const HEX_GRID_HEIGHT: i32 = 200;
pub const HEX_GRID_SIZE: usize = (HEX_GRID_WIDTH * HEX_GRID_HEIGHT) as usize;
pub const SQUARE_GRID_WIDTH: i32 = 100;
pub const SQUARE_GRID_HEIGHT: i32 = 100;
pub const SQUARE_GRID_SIZE: usize = (SQUARE_GRID_WIDTH * SQUARE_GRID_HEIGHT) as usize;

pub const NAME_SIZE: usize = 16;
pub const HEADER_SIZE: usize = 4 + NAME_SIZE + 10 * 4 + 44;
pub const TILE_SECTION_SIZE: usize = ELEVATION_COUNT * SQUARE_GRID_SIZE * 8;
pub const OBJECT_RECORD_SIZE: usize = 17 * 4;

/// Floor FID used for cells the file does not provide.
pub const GRASS_FLOOR: Fid = Fid(1);

pub const DEFAULT_MAP_NAME: &str = "Arroyo";
const DEFAULT_VERSION: u32 = 20;
const DEFAULT_ENTERING_TILE: u32 = 20000;

/// Object type tag stored in bits 24-31 of a FID.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum ObjectKind {
    #[num_enum(default)]
    Unknown = 0,
    Critter = 1,
    Item = 2,
    Scenery = 3,
}

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fid(pub u32);

impl Fid {
    pub fn type_tag(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn kind(self) -> ObjectKind {
        ObjectKind::from(self.type_tag())
    }

    /// Per-type art index held in the low 12 bits.
    pub fn frame_id(self) -> u16 {
        (self.0 & 0xfff) as u16
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub floor: Fid,
    pub roof: Fid,
}

impl Default for TileCell {
    fn default() -> Self {
        Self {
            floor: GRASS_FLOOR,
            roof: Fid(0),
        }
    }
}

/// Floor/roof cells for every elevation, addressed on the 100x100 grid.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    elevations: Vec<Vec<TileCell>>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            elevations: vec![vec![TileCell::default(); SQUARE_GRID_SIZE]; ELEVATION_COUNT],
        }
    }
}

impl TileGrid {
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut elevations = Vec::with_capacity(ELEVATION_COUNT);
        for _ in 0..ELEVATION_COUNT {
            let mut cells = Vec::with_capacity(SQUARE_GRID_SIZE);
            for _ in 0..SQUARE_GRID_SIZE {
                let floor = Fid(reader.read_u32::<LE>()?);
                let roof = Fid(reader.read_u32::<LE>()?);
                cells.push(TileCell { floor, roof });
            }
            elevations.push(cells);
        }
        Ok(Self { elevations })
    }

    pub fn elevation(&self, elevation: usize) -> Option<&[TileCell]> {
        self.elevations.get(elevation).map(Vec::as_slice)
    }

    pub fn cell(&self, elevation: usize, index: usize) -> Option<&TileCell> {
        self.elevation(elevation)?.get(index)
    }

    pub fn cell_at(&self, elevation: usize, x: usize, y: usize) -> Option<&TileCell> {
        let width = SQUARE_GRID_WIDTH as usize;
        if x >= width {
            return None;
        }
        self.cell(elevation, y * width + x)
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub id: u32,
    /// Wide-grid (200x200) tile index.
    pub tile: u32,
    pub x: i32,
    pub y: i32,
    pub sub_x: i32,
    pub sub_y: i32,
    pub frame: u32,
    pub rotation: u32,
    pub fid: Fid,
    pub flags: u32,
    /// Index of the elevation block the record was read from.
    pub elevation: u8,
    pub pid: u32,
    pub cid: u32,
    pub light_distance: u32,
    pub light_intensity: u32,
    pub outline: u32,
    pub sid: u32,
    pub script_index: u32,
}

impl ObjectRecord {
    fn read<R: Read>(reader: &mut R, elevation: u8) -> std::io::Result<Self> {
        Ok(Self {
            id: reader.read_u32::<LE>()?,
            tile: reader.read_u32::<LE>()?,
            x: reader.read_i32::<LE>()?,
            y: reader.read_i32::<LE>()?,
            sub_x: reader.read_i32::<LE>()?,
            sub_y: reader.read_i32::<LE>()?,
            frame: reader.read_u32::<LE>()?,
            rotation: reader.read_u32::<LE>()?,
            fid: Fid(reader.read_u32::<LE>()?),
            flags: reader.read_u32::<LE>()?,
            elevation,
            pid: reader.read_u32::<LE>()?,
            cid: reader.read_u32::<LE>()?,
            light_distance: reader.read_u32::<LE>()?,
            light_intensity: reader.read_u32::<LE>()?,
            outline: reader.read_u32::<LE>()?,
            sid: reader.read_u32::<LE>()?,
            script_index: reader.read_u32::<LE>()?,
        })
    }

    pub fn tile_x(&self) -> u32 {
        self.tile % HEX_GRID_WIDTH as u32
    }

    pub fn tile_y(&self) -> u32 {
        self.tile / HEX_GRID_WIDTH as u32
    }

    pub fn kind(&self) -> ObjectKind {
        self.fid.kind()
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    pub version: u32,
    pub name: String,
    pub entering_tile: u32,
    pub entering_elevation: u32,
    pub entering_rotation: u32,
    pub script_index: u32,
    pub flags: u32,
    pub darkness: u32,
    pub map_index: u32,
    pub last_visit_time: u32,
    pub global_vars: Vec<u32>,
    pub local_vars: Vec<u32>,
    pub tiles: TileGrid,
    /// Object total from the object section header, 0 when the section is absent.
    pub declared_object_count: u32,
    /// Fixed-record fields only; per-type trailing data is not consumed.
    pub objects: Vec<ObjectRecord>,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            name: DEFAULT_MAP_NAME.to_string(),
            entering_tile: DEFAULT_ENTERING_TILE,
            entering_elevation: 0,
            entering_rotation: 0,
            script_index: 0,
            flags: 0,
            darkness: 0,
            map_index: 0,
            last_visit_time: 0,
            global_vars: vec![],
            local_vars: vec![],
            tiles: TileGrid::default(),
            declared_object_count: 0,
            objects: vec![],
        }
    }
}

fn remaining(reader: &Cursor<&[u8]>) -> usize {
    reader.get_ref().len().saturating_sub(reader.position() as usize)
}

fn ensure(reader: &Cursor<&[u8]>, section: MapSection, needed: usize) -> Result<(), DecodeError> {
    let available = remaining(reader);
    if available < needed {
        return Err(DecodeError::TruncatedMap {
            section,
            needed,
            available,
        });
    }
    Ok(())
}

fn read_name(bytes: &[u8; NAME_SIZE]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

fn read_vars(
    reader: &mut Cursor<&[u8]>,
    section: MapSection,
    count: u32,
) -> Result<Vec<u32>, DecodeError> {
    let needed = (count as usize).saturating_mul(4);
    ensure(reader, section, needed)?;

    let mut vars = vec![0u32; count as usize];
    reader
        .read_u32_into::<LE>(&mut vars)
        .map_err(|_| DecodeError::TruncatedMap {
            section,
            needed,
            available: remaining(reader),
        })?;
    Ok(vars)
}

impl MapDocument {
    /// Decode the fixed header and tile sections, then as many object records
    /// as the buffer holds. Only a short header, variable array or tile grid is
    /// an error; a short object section is logged and the records read so far
    /// are kept.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Cursor::new(data);
        ensure(&reader, MapSection::Header, HEADER_SIZE)?;

        let header_err = |_| DecodeError::TruncatedMap {
            section: MapSection::Header,
            needed: HEADER_SIZE,
            available: data.len(),
        };
        let version = reader.read_u32::<LE>().map_err(header_err)?;
        let mut name = [0u8; NAME_SIZE];
        reader.read_exact(&mut name).map_err(header_err)?;
        let mut fields = [0u32; 10];
        reader.read_u32_into::<LE>(&mut fields).map_err(header_err)?;
        reader.read_exact(&mut [0u8; 44]).map_err(header_err)?;

        let [
            entering_tile,
            entering_elevation,
            entering_rotation,
            local_vars_count,
            script_index,
            flags,
            darkness,
            global_vars_count,
            map_index,
            last_visit_time,
        ] = fields;

        let global_vars = read_vars(&mut reader, MapSection::GlobalVars, global_vars_count)?;
        let local_vars = read_vars(&mut reader, MapSection::LocalVars, local_vars_count)?;

        ensure(&reader, MapSection::Tiles, TILE_SECTION_SIZE)?;
        let tiles = TileGrid::read(&mut reader).map_err(|_| DecodeError::TruncatedMap {
            section: MapSection::Tiles,
            needed: TILE_SECTION_SIZE,
            available: remaining(&reader),
        })?;

        let mut map = Self {
            version,
            name: read_name(&name),
            entering_tile,
            entering_elevation,
            entering_rotation,
            script_index,
            flags,
            darkness,
            map_index,
            last_visit_time,
            global_vars,
            local_vars,
            tiles,
            declared_object_count: 0,
            objects: vec![],
        };

        if let Err(e) = map.read_objects(&mut reader) {
            warn!(map = %map.name, "Stopped reading objects: {}", e);
        }
        debug!(
            map = %map.name,
            objects = map.objects.len(),
            "Decoded map"
        );

        Ok(map)
    }

    /// Like [`MapDocument::read_from_bytes`], substituting the default document
    /// when the fixed sections cannot be read.
    pub fn read_or_default(data: &[u8]) -> Self {
        Self::read_from_bytes(data).unwrap_or_else(|e| {
            warn!("Using default map: {}", e);
            Self::default()
        })
    }

    fn read_objects(&mut self, reader: &mut Cursor<&[u8]>) -> Result<(), DecodeError> {
        if remaining(reader) < 4 {
            return Ok(());
        }
        let truncated = |read: usize, declared: u32| DecodeError::TruncatedObjectSection {
            read,
            declared: declared as usize,
        };

        let declared = reader
            .read_u32::<LE>()
            .map_err(|_| truncated(0, 0))?;
        self.declared_object_count = declared;

        for elevation in 0..ELEVATION_COUNT as u8 {
            if remaining(reader) < 4 {
                return Err(truncated(self.objects.len(), declared));
            }
            let count = reader
                .read_u32::<LE>()
                .map_err(|_| truncated(self.objects.len(), declared))?;

            for _ in 0..count {
                if remaining(reader) < OBJECT_RECORD_SIZE {
                    return Err(truncated(self.objects.len(), declared));
                }
                let object = ObjectRecord::read(reader, elevation)
                    .map_err(|_| truncated(self.objects.len(), declared))?;
                self.objects.push(object);
            }
        }

        Ok(())
    }

    pub fn objects_of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter().filter(move |o| o.kind() == kind)
    }

    pub fn npcs(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects_of_kind(ObjectKind::Critter)
    }

    pub fn items(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects_of_kind(ObjectKind::Item)
    }

    pub fn scenery(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects_of_kind(ObjectKind::Scenery)
    }

    pub fn objects_at_elevation(&self, elevation: u8) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter().filter(move |o| o.elevation == elevation)
    }
}
