//! Terrain mesh (.mpd) in memory

use serde::{Deserialize, Serialize};

use crate::constants::{MAP_TILE_MAX, MAP_TILE_MAX_X, MAP_TILE_MAX_Y, MAP_VERTICES_MAX, MeshFx};
use crate::error::{FormatError, Result};
use crate::fixed_point::TWIST_FLAT;

/// Header of a mesh: counts only, validated before anything is allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshInfo {
    pub vertex_count: usize,
    pub tiles_x: usize,
    pub tiles_y: usize,
}

impl MeshInfo {
    pub fn new(vertex_count: usize, tiles_x: usize, tiles_y: usize) -> Result<Self> {
        let info = Self {
            vertex_count,
            tiles_x,
            tiles_y,
        };
        info.validate()?;
        Ok(info)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// Checks every count against the fixed maxima.
    pub fn validate(&self) -> Result<()> {
        check_dimension("tiles_x", self.tiles_x, MAP_TILE_MAX_X)?;
        check_dimension("tiles_y", self.tiles_y, MAP_TILE_MAX_Y)?;
        // both axes are bounded above, so the product cannot overflow
        check_dimension("tile count", self.tiles_x * self.tiles_y, MAP_TILE_MAX)?;
        check_dimension("vertex count", self.vertex_count, MAP_VERTICES_MAX)?;
        Ok(())
    }
}

fn check_dimension(what: &'static str, value: usize, max: usize) -> Result<()> {
    if value > max {
        return Err(FormatError::DimensionTooLarge { what, value, max });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    /// Index into the tile dictionary
    pub fan_type: u8,
    /// Raw effects byte, see [`TileInfo::fx`]
    pub fx: u8,
    pub img: u16,
    pub twist: u8,
}

impl Default for TileInfo {
    fn default() -> Self {
        Self {
            fan_type: 0,
            fx: 0,
            img: 0,
            twist: TWIST_FLAT,
        }
    }
}

impl TileInfo {
    pub fn fx(&self) -> MeshFx {
        MeshFx::from_bits_retain(self.fx)
    }

    pub fn has_fx(&self, flags: MeshFx) -> bool {
        self.fx().intersects(flags)
    }

    /// Packs the v1 tile word `(type << 24) | (fx << 16) | img`.
    pub fn packed(&self) -> u32 {
        ((self.fan_type as u32) << 24) | ((self.fx as u32) << 16) | self.img as u32
    }

    pub fn from_packed(word: u32) -> Self {
        Self {
            fan_type: (word >> 24) as u8,
            fx: ((word >> 16) & 0xFF) as u8,
            img: (word & 0xFFFF) as u16,
            twist: TWIST_FLAT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    /// Ambient light
    pub light: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub info: MeshInfo,
    pub tiles: Vec<TileInfo>,
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    /// Allocates a blank mesh. Fails before allocating when `info` exceeds the maxima.
    pub fn new(info: MeshInfo) -> Result<Self> {
        info.validate()?;
        Ok(Self {
            info,
            tiles: vec![TileInfo::default(); info.tile_count()],
            vertices: vec![MeshVertex::default(); info.vertex_count],
        })
    }

    pub fn tile_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.info.tiles_x || y >= self.info.tiles_y {
            return None;
        }
        Some(y * self.info.tiles_x + x)
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&TileInfo> {
        self.tile_index(x, y).and_then(|i| self.tiles.get(i))
    }

    /// Walls and impassable tiles, and everything off the grid, count as solid.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y)
            .is_none_or(|tile| tile.has_fx(MeshFx::WALL | MeshFx::IMPASSABLE))
    }

    pub fn twist_at(&self, x: i32, y: i32) -> Option<u8> {
        self.tile_at(x, y).map(|tile| tile.twist)
    }
}
