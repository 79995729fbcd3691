//! Terrain mesh codec (.mpd).
//!
//! Layout, all little-endian:
//!
//! | section | from version | contents |
//! |---|---|---|
//! | header | 1 | magic `Map<letter>`, vertex count, tiles x, tiles y (`u32`) |
//! | tiles | 1 | per tile `(type << 24) \| (fx << 16) \| img` (`u32`) |
//! | twist | 2 | per tile twist (`u8`) |
//! | vertices | 3 | all x, then all y, then all z (`f32`, z scaled by 16) |
//! | light | 4 | per vertex ambient light (`u8`) |
//!
//! Sections an older file lacks are synthesized from the data it has.

use std::path::Path;

use crate::byte_operations::{ensure_available, section_len};
use crate::constants::{CURRENT_MAP_VERSION, MAP_ID_BASE, MAP_Z_SCALE, TILE_SIZE};
use crate::error::{FormatError, Result};
use crate::fixed_point::pack_twist;
use crate::types::{MeshData, MeshInfo, TileInfo};

const HEADER_SIZE: usize = 16;
const ID_LOW_MASK: u32 = 0x00FF_FFFF;

/// Fan type of a wall tile, indexed by which neighbours are flat
/// (north 1, east 2, south 4, west 8).
const WALL_FAN_TYPES: [u8; 16] = [
    0,  // enclosed
    8,  // N
    9,  // E
    14, // N E corner
    8,  // S
    8,  // N S
    15, // E S corner
    19, // N E S arch
    9,  // W
    13, // N W corner
    9,  // E W
    18, // N E W arch
    12, // S W corner
    17, // N S W arch
    16, // E S W arch
    4,  // pillar
];

/// Cursor over the section data that follows the header.
pub struct SectionReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    defensive: bool,
}

impl SectionReader<'_> {
    fn take(&mut self, count: usize, size: usize, section: &'static str) -> Result<usize> {
        let needed = section_len(count, size).ok_or(FormatError::DimensionTooLarge {
            what: section,
            value: count,
            max: usize::MAX / size,
        })?;
        ensure_available(self.bytes, self.offset, needed, section)?;
        Ok(needed)
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }
}

pub type ReadFn = fn(&mut SectionReader<'_>, &mut MeshData) -> Result<()>;
pub type WriteFn = fn(&MeshData, &mut Vec<u8>);
pub type SynthesizeFn = fn(&mut MeshData);

/// How one versioned section is read, written, and made up when missing.
pub struct SectionCodec {
    pub version: u32,
    pub name: &'static str,
    pub read: ReadFn,
    pub write: WriteFn,
    pub synthesize: Option<SynthesizeFn>,
}

pub const SECTION_CODECS: [SectionCodec; 4] = [
    SectionCodec {
        version: 1,
        name: "tiles",
        read: read_tiles,
        write: write_tiles,
        synthesize: None,
    },
    SectionCodec {
        version: 2,
        name: "twist",
        read: read_twist,
        write: write_twist,
        synthesize: Some(synthesize_twist as SynthesizeFn),
    },
    SectionCodec {
        version: 3,
        name: "vertices",
        read: read_vertices,
        write: write_vertices,
        synthesize: Some(synthesize_geometry as SynthesizeFn),
    },
    SectionCodec {
        version: 4,
        name: "light",
        read: read_light,
        write: write_light,
        synthesize: None,
    },
];

fn read_tiles(r: &mut SectionReader<'_>, mesh: &mut MeshData) -> Result<()> {
    r.take(mesh.tiles.len(), 4, "tiles")?;
    let (bytes, mut offset) = (r.bytes, r.offset);
    for tile in mesh.tiles.iter_mut() {
        *tile = TileInfo::from_packed(read_u32!(bytes, offset));
    }
    r.offset = offset;
    Ok(())
}

fn write_tiles(mesh: &MeshData, out: &mut Vec<u8>) {
    for tile in &mesh.tiles {
        out.extend_from_slice(&tile.packed().to_le_bytes());
    }
}

fn read_twist(r: &mut SectionReader<'_>, mesh: &mut MeshData) -> Result<()> {
    r.take(mesh.tiles.len(), 1, "twist")?;
    let (bytes, mut offset) = (r.bytes, r.offset);
    for tile in mesh.tiles.iter_mut() {
        tile.twist = read_u8!(bytes, offset);
    }
    r.offset = offset;
    Ok(())
}

fn write_twist(mesh: &MeshData, out: &mut Vec<u8>) {
    out.extend(mesh.tiles.iter().map(|tile| tile.twist));
}

fn read_vertices(r: &mut SectionReader<'_>, mesh: &mut MeshData) -> Result<()> {
    r.take(mesh.vertices.len(), 12, "vertices")?;
    let (bytes, mut offset) = (r.bytes, r.offset);
    for axis in 0..3 {
        for vertex in mesh.vertices.iter_mut() {
            let mut value = read_f32!(bytes, offset);
            if r.defensive && !value.is_finite() {
                return Err(FormatError::InvalidData {
                    section: "vertices",
                    detail: format!("non-finite coordinate {value} on axis {axis}"),
                });
            }
            if axis == 2 {
                value /= MAP_Z_SCALE;
            }
            vertex.pos[axis] = value;
        }
    }
    r.offset = offset;
    Ok(())
}

fn write_vertices(mesh: &MeshData, out: &mut Vec<u8>) {
    for axis in 0..3 {
        for vertex in &mesh.vertices {
            let value = if axis == 2 {
                vertex.pos[axis] * MAP_Z_SCALE
            } else {
                vertex.pos[axis]
            };
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

fn read_light(r: &mut SectionReader<'_>, mesh: &mut MeshData) -> Result<()> {
    r.take(mesh.vertices.len(), 1, "light")?;
    let (bytes, mut offset) = (r.bytes, r.offset);
    for vertex in mesh.vertices.iter_mut() {
        vertex.light = read_u8!(bytes, offset);
    }
    r.offset = offset;
    Ok(())
}

fn write_light(mesh: &MeshData, out: &mut Vec<u8>) {
    out.extend(mesh.vertices.iter().map(|vertex| vertex.light));
}

/// Slopes each tile towards its flat neighbours. Walls, impassable tiles
/// and the space around the grid count as `TILE_SIZE` high.
pub fn synthesize_twist(mesh: &mut MeshData) {
    let (tiles_x, tiles_y) = (mesh.info.tiles_x as i32, mesh.info.tiles_y as i32);
    for y in 0..tiles_y {
        for x in 0..tiles_x {
            let height = |dx: i32, dy: i32| {
                if mesh.is_wall(x + dx, y + dy) {
                    TILE_SIZE
                } else {
                    0
                }
            };
            let (north, south) = (height(0, -1), height(0, 1));
            let (east, west) = (height(1, 0), height(-1, 0));
            let twist = pack_twist((east - west) / 8, (south - north) / 8);

            if let Some(index) = mesh.tile_index(x, y) {
                mesh.tiles[index].twist = twist;
            }
        }
    }
}

/// Picks a fan type per tile: a checkerboard of the two flat types for
/// floors, and a wall shape matching the flat neighbours for walls.
pub fn synthesize_fan_types(mesh: &mut MeshData) {
    let (tiles_x, tiles_y) = (mesh.info.tiles_x as i32, mesh.info.tiles_y as i32);
    for y in 0..tiles_y {
        for x in 0..tiles_x {
            let fan_type = if mesh.is_wall(x, y) {
                let mut mask = 0;
                for (bit, (dx, dy)) in [(0, -1), (1, 0), (0, 1), (-1, 0)].into_iter().enumerate() {
                    if !mesh.is_wall(x + dx, y + dy) {
                        mask |= 1 << bit;
                    }
                }
                WALL_FAN_TYPES[mask]
            } else {
                ((x + y) & 1) as u8
            };

            if let Some(index) = mesh.tile_index(x, y) {
                mesh.tiles[index].fan_type = fan_type;
            }
        }
    }
}

/// Vertex positions of pre-v3 meshes are left at their defaults.
pub fn synthesize_vertices(_mesh: &mut MeshData) {}

fn synthesize_geometry(mesh: &mut MeshData) {
    synthesize_fan_types(mesh);
    synthesize_vertices(mesh);
}

pub fn version_from_id(id: u32) -> Result<u32> {
    if id < MAP_ID_BASE || (id & ID_LOW_MASK) != (MAP_ID_BASE & ID_LOW_MASK) {
        return Err(FormatError::UnknownFormat { id });
    }
    Ok(((id - MAP_ID_BASE) >> 24) + 1)
}

pub fn id_for_version(version: u32) -> u32 {
    MAP_ID_BASE + ((version - 1) << 24)
}

/// Reads only the magic and returns the version it names.
pub fn probe_version(bytes: &[u8]) -> Result<u32> {
    ensure_available(bytes, 0, 4, "header")?;
    let id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    version_from_id(id)
}

pub fn decode(bytes: &[u8]) -> Result<MeshData> {
    let version = probe_version(bytes)?;
    let defensive = version > CURRENT_MAP_VERSION;
    if defensive {
        log::warn!(
            "Mesh version {version} is newer than {CURRENT_MAP_VERSION}, reading known sections only"
        );
    }

    ensure_available(bytes, 0, HEADER_SIZE, "header")?;
    let mut offset = 4;
    let vertex_count = read_u32!(bytes, offset) as usize;
    let tiles_x = read_u32!(bytes, offset) as usize;
    let tiles_y = read_u32!(bytes, offset) as usize;

    let info = MeshInfo::new(vertex_count, tiles_x, tiles_y)?;
    let mut mesh = MeshData::new(info)?;
    let mut reader = SectionReader {
        bytes,
        offset,
        defensive,
    };

    for codec in &SECTION_CODECS {
        if version >= codec.version {
            (codec.read)(&mut reader, &mut mesh)?;
        } else if let Some(synthesize) = codec.synthesize {
            log::debug!("Mesh v{version} has no {} section, synthesizing", codec.name);
            synthesize(&mut mesh);
        }
    }

    if defensive && reader.remaining() > 0 {
        log::warn!(
            "Ignoring {} trailing bytes of mesh version {version}",
            reader.remaining()
        );
    }

    Ok(mesh)
}

/// Always writes the current version with every section.
pub fn encode(mesh: &MeshData) -> Result<Vec<u8>> {
    mesh.info.validate()?;
    if mesh.tiles.len() != mesh.info.tile_count() || mesh.vertices.len() != mesh.info.vertex_count
    {
        return Err(FormatError::InvalidData {
            section: "header",
            detail: format!(
                "{} tiles and {} vertices do not match {}x{} tiles and {} vertices",
                mesh.tiles.len(),
                mesh.vertices.len(),
                mesh.info.tiles_x,
                mesh.info.tiles_y,
                mesh.info.vertex_count
            ),
        });
    }

    let mut out = Vec::with_capacity(
        HEADER_SIZE + mesh.tiles.len() * 5 + mesh.vertices.len() * 13,
    );
    out.extend_from_slice(&id_for_version(CURRENT_MAP_VERSION).to_le_bytes());
    out.extend_from_slice(&(mesh.info.vertex_count as u32).to_le_bytes());
    out.extend_from_slice(&(mesh.info.tiles_x as u32).to_le_bytes());
    out.extend_from_slice(&(mesh.info.tiles_y as u32).to_le_bytes());

    for codec in &SECTION_CODECS {
        (codec.write)(mesh, &mut out);
    }
    Ok(out)
}

pub fn load(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let mesh = decode(&bytes)?;
    log::debug!(
        "Loaded mesh {} ({}x{} tiles, {} vertices)",
        path.display(),
        mesh.info.tiles_x,
        mesh.info.tiles_y,
        mesh.info.vertex_count
    );
    Ok(mesh)
}

pub fn save(path: impl AsRef<Path>, mesh: &MeshData) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(mesh)?;
    std::fs::write(path, bytes).map_err(|e| FormatError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MeshFx;
    use crate::fixed_point::TWIST_FLAT;

    fn header(id: u32, vertices: u32, x: u32, y: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        for v in [id, vertices, x, y] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn magic_to_version() {
        assert_eq!(version_from_id(u32::from_le_bytes(*b"MapA")).unwrap(), 1);
        assert_eq!(version_from_id(u32::from_le_bytes(*b"MapD")).unwrap(), 4);
        assert_eq!(id_for_version(4).to_le_bytes(), *b"MapD");
        assert!(matches!(
            version_from_id(u32::from_le_bytes(*b"XapD")),
            Err(FormatError::UnknownFormat { .. })
        ));
        assert!(matches!(
            version_from_id(u32::from_le_bytes(*b"Map@")),
            Err(FormatError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn table_is_ordered_by_version() {
        for (i, codec) in SECTION_CODECS.iter().enumerate() {
            assert_eq!(codec.version as usize, i + 1);
        }
    }

    #[test]
    fn truncated_tiles_section() {
        let mut bytes = header(id_for_version(1), 0, 2, 2);
        bytes.extend_from_slice(&[0u8; 12]);
        match decode(&bytes) {
            Err(FormatError::Truncated {
                section,
                needed,
                available,
            }) => {
                assert_eq!(section, "tiles");
                assert_eq!(needed, 16);
                assert_eq!(available, 12);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn short_header() {
        let bytes = header(id_for_version(4), 0, 1, 1);
        assert!(matches!(
            decode(&bytes[..10]),
            Err(FormatError::Truncated {
                section: "header",
                ..
            })
        ));
    }

    #[test]
    fn future_version_rejects_nan() {
        let mut bytes = header(id_for_version(5), 1, 1, 1);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.push(TWIST_FLAT);
        bytes.extend_from_slice(&f32::NAN.to_le_bytes());
        bytes.extend_from_slice(&0f32.to_le_bytes());
        bytes.extend_from_slice(&0f32.to_le_bytes());
        bytes.push(0);
        assert!(matches!(
            decode(&bytes),
            Err(FormatError::InvalidData {
                section: "vertices",
                ..
            })
        ));
    }

    #[test]
    fn future_version_reads_known_sections() {
        let mut bytes = header(id_for_version(6), 1, 1, 1);
        bytes.extend_from_slice(&TileInfo::from_packed(0x0210_0003).packed().to_le_bytes());
        bytes.push(0x70);
        for v in [1.0f32, 2.0, 48.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.push(99);
        bytes.extend_from_slice(b"future data");

        let mesh = decode(&bytes).unwrap();
        assert_eq!(mesh.tiles[0].fan_type, 2);
        assert!(mesh.tiles[0].fx().contains(MeshFx::WALL));
        assert_eq!(mesh.tiles[0].img, 3);
        assert_eq!(mesh.tiles[0].twist, 0x70);
        assert_eq!(mesh.vertices[0].pos, [1.0, 2.0, 3.0]);
        assert_eq!(mesh.vertices[0].light, 99);
    }

    #[test]
    fn v2_keeps_twist_but_synthesizes_fan_types() {
        let mut bytes = header(id_for_version(2), 4, 2, 1);
        bytes.extend_from_slice(&TileInfo::from_packed(0x0500_0000).packed().to_le_bytes());
        bytes.extend_from_slice(&TileInfo::from_packed(0x0500_0000).packed().to_le_bytes());
        bytes.extend_from_slice(&[0x11, 0x22]);

        let mesh = decode(&bytes).unwrap();
        assert_eq!(mesh.tiles[0].twist, 0x11);
        assert_eq!(mesh.tiles[1].twist, 0x22);
        // flat checkerboard replaces the stored type
        assert_eq!(mesh.tiles[0].fan_type, 0);
        assert_eq!(mesh.tiles[1].fan_type, 1);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[3].pos, [0.0; 3]);
    }

    #[test]
    fn encode_rejects_mismatched_arrays() {
        let mut mesh = MeshData::new(MeshInfo::new(4, 1, 1).unwrap()).unwrap();
        mesh.vertices.pop();
        assert!(matches!(
            encode(&mesh),
            Err(FormatError::InvalidData { .. })
        ));
    }
}
