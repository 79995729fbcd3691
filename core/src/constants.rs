//! Constants module - fixed counts, format maxima and flag sets shared by the data file codecs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Character profiles (data.txt)
// =============================================================================

/// Number of skins an object can carry
pub const MAX_SKIN: usize = 4;
/// Number of damage types (slash, crush, poke, holy, evil, fire, ice, zap)
pub const DAMAGE_COUNT: usize = 8;
/// Number of experience sources
pub const XP_COUNT: usize = 8;
/// Size of the experience-per-level table; entry 0 is always 0
pub const MAX_BASE_LEVEL: usize = 6;
/// Number of identification IDSZ slots
pub const IDSZ_COUNT: usize = 6;
/// Number of rolled stats (life, mana, mana return, mana flow, str, wis, int, dex)
pub const STAT_COUNT: usize = 8;
/// Number of hand slots
pub const SLOT_COUNT: usize = 2;
/// Capacity of the open-ended skills map
pub const MAX_IDSZ_MAP_SIZE: usize = 64;

/// Hide state meaning "never hidden"
pub const NO_HIDE: i32 = 127;
/// Highest valid sound index of an object
pub const MAX_WAVE: i32 = 30;

pub const IDSZ_PARENT: usize = 0;
pub const IDSZ_TYPE: usize = 1;
pub const IDSZ_SKILL: usize = 2;
pub const IDSZ_SPECIAL: usize = 3;
pub const IDSZ_HATE: usize = 4;
pub const IDSZ_VULNERABILITY: usize = 5;

pub const SLOT_LEFT: usize = 0;
pub const SLOT_RIGHT: usize = 1;

pub const SOUND_FOOTFALL: usize = 0;
pub const SOUND_JUMP: usize = 1;
pub const SOUND_COUNT: usize = 2;

// =============================================================================
// Enchant profiles (enchant.txt)
// =============================================================================

/// Number of "set" override slots
pub const MAX_ENCHANT_SET: usize = 23;
/// Number of "add" delta slots
pub const MAX_ENCHANT_ADD: usize = 16;

// =============================================================================
// Terrain mesh (.mpd)
// =============================================================================

/// Number of bits in a tile edge measured in world units
pub const TILE_BITS: u32 = 7;
/// World size of one tile edge
pub const TILE_SIZE: i32 = 1 << TILE_BITS;

pub const MAP_TILE_MAX_X: usize = 1024;
pub const MAP_TILE_MAX_Y: usize = 1024;
pub const MAP_TILE_MAX: usize = 256 * 1024;
pub const MAP_VERTICES_MAX: usize = MAP_TILE_MAX * 4;

/// Magic of a version 1 mesh ("MapA") read as little-endian
pub const MAP_ID_BASE: u32 = u32::from_le_bytes(*b"MapA");
/// Highest mesh version this crate reads and the version it writes
pub const CURRENT_MAP_VERSION: u32 = 4;

/// z coordinates are stored with 4 fractional bits
pub const MAP_Z_SCALE: f32 = 16.0;

// =============================================================================
// Tile shape dictionary (fans.txt)
// =============================================================================

/// Maximum number of tile shape definitions, small and large together
pub const MAP_FAN_TYPE_MAX: usize = 64;
/// Maximum number of vertices in one tile shape
pub const MAP_FAN_VERTICES_MAX: usize = 16;
/// Maximum number of command entries in one tile shape
pub const MAP_FAN_ENTRIES_MAX: usize = 32;

pub const SMALL_TILE_PIXELS: f32 = 32.0;
pub const BIG_TILE_PIXELS: f32 = 64.0;

// =============================================================================
// Controls (controls.txt)
// =============================================================================

/// Maximum number of keycodes bound to one action
pub const MAX_CONTROL_KEYS: usize = 4;
/// Keyboard, mouse, joystick A, joystick B
pub const MAX_INPUT_DEVICES: usize = 4;
/// Version written by the controls encoder
pub const CURRENT_CONTROLS_VERSION: i32 = 3;

bitflags! {
    /// Tile effect bits stored in the mesh effects byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MeshFx: u8 {
        /// tile surface is reflective
        const REFLECTIVE = 1 << 0;
        /// reflections of objects are drawn on this tile
        const DRAW_REFLECTION = 1 << 1;
        /// texture is animated
        const ANIMATED = 1 << 2;
        const WATER = 1 << 3;
        const WALL = 1 << 4;
        const IMPASSABLE = 1 << 5;
        const DAMAGE = 1 << 6;
        const SLIPPERY = 1 << 7;
    }
}

bitflags! {
    /// Per-(damage type, skin) modifier bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DamageModifier: u8 {
        /// damage heals instead of hurting
        const INVERT = 1 << 0;
        /// damage is converted into mana
        const CHARGE = 1 << 1;
        /// damage drains mana before life
        const MANA = 1 << 2;
        /// damage is ignored entirely
        const INVICTUS = 1 << 3;
    }
}

bitflags! {
    /// Model tweaks enabled by the MODL expansion
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModelFlags: u8 {
        const BUMP_SIZE = 1 << 0;
        const BUMP_SIZE_BIG = 1 << 1;
        const BUMP_HEIGHT = 1 << 2;
        const NO_BACKFACE_CULL = 1 << 3;
        const TRANSPARENT_SKIN = 1 << 4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_id_base_is_byte_swapped_magic() {
        assert_eq!(MAP_ID_BASE, 0x4170_614D);
        assert_eq!(MAP_ID_BASE.to_be_bytes(), *b"ApaM");
    }

    #[test]
    fn mesh_maxima_are_consistent() {
        assert!(MAP_TILE_MAX <= MAP_TILE_MAX_X * MAP_TILE_MAX_Y);
        assert_eq!(MAP_VERTICES_MAX, MAP_TILE_MAX * 4);
        assert_eq!(TILE_SIZE, 128);
    }
}
