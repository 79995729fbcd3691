//! Tile shape dictionary (fans.txt).
//!
//! Every shape read from the file is stored twice: once as a small tile at
//! index `i` and once as a large tile at `i + offset`, with texture
//! coordinates fitted to the larger texture.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BIG_TILE_PIXELS, MAP_FAN_ENTRIES_MAX, MAP_FAN_TYPE_MAX, MAP_FAN_VERTICES_MAX,
    SMALL_TILE_PIXELS,
};
use crate::error::{FormatError, Result};
use crate::scanner::TokenScanner;
use crate::types::{TileDefinition, TileVertexDef};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileDictionary {
    defs: Vec<TileDefinition>,
    offset: usize,
    loaded: usize,
}

impl TileDictionary {
    /// Index of the first large shape for `count` loaded shapes.
    pub fn offset_for(count: usize) -> usize {
        count.next_power_of_two().max(2)
    }

    pub fn get(&self, fan_type: usize) -> Option<&TileDefinition> {
        self.defs.get(fan_type)
    }

    pub fn is_large(&self, fan_type: usize) -> bool {
        fan_type >= self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of slots, small and large.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Number of shapes the file defined.
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> + '_ {
        self.defs.iter()
    }
}

fn read_count(s: &mut TokenScanner<'_>, context: &'static str) -> Result<usize> {
    let value = s.next_int(context)?;
    usize::try_from(value).map_err(|_| FormatError::InvalidData {
        section: context,
        detail: format!("negative count {value}"),
    })
}

fn read_definition(s: &mut TokenScanner<'_>, index: usize) -> Result<TileDefinition> {
    let vertex_count = read_count(s, "tile vertices")?;
    if vertex_count > MAP_FAN_VERTICES_MAX {
        return Err(FormatError::InvalidData {
            section: "tile vertices",
            detail: format!(
                "tile type {index} has {vertex_count} vertices, maximum is {MAP_FAN_VERTICES_MAX}"
            ),
        });
    }

    let mut def = TileDefinition::default();
    for _ in 0..vertex_count {
        let grid_ref = s.next_int("tile vertex ref")?;
        let u = s.next_float("tile vertex u")?;
        let v = s.next_float("tile vertex v")?;
        def.vertices.push(TileVertexDef::new(grid_ref as u32, u, v));
    }

    let command_count = read_count(s, "tile commands")?;
    for _ in 0..command_count {
        let entries = read_count(s, "tile command entries")?;
        if def.command_indices.len() + entries > MAP_FAN_ENTRIES_MAX {
            return Err(FormatError::InvalidData {
                section: "tile command entries",
                detail: format!(
                    "tile type {index} has more than {MAP_FAN_ENTRIES_MAX} command entries"
                ),
            });
        }
        for _ in 0..entries {
            let vertex = s.next_int("tile command vertex")?;
            if vertex < 0 || vertex as usize >= vertex_count {
                return Err(FormatError::InvalidData {
                    section: "tile command entries",
                    detail: format!("tile type {index} refers to missing vertex {vertex}"),
                });
            }
            def.command_indices.push(vertex as u16);
        }
        def.command_sizes.push(entries);
    }

    Ok(def)
}

fn renormalize_small(def: &mut TileDefinition) {
    for vertex in def.vertices.iter_mut() {
        vertex.u = (0.5 + vertex.u * (SMALL_TILE_PIXELS - 1.0)) / SMALL_TILE_PIXELS;
        vertex.v = (0.5 + vertex.v * (SMALL_TILE_PIXELS - 1.0)) / SMALL_TILE_PIXELS;
    }
}

fn renormalize_large(def: &mut TileDefinition) {
    for vertex in def.vertices.iter_mut() {
        vertex.u = (0.5 + vertex.u * (BIG_TILE_PIXELS - 1.0)) / BIG_TILE_PIXELS;
        // v scales with the small texture size, as every existing tile set expects
        vertex.v = (0.5 + vertex.v * (SMALL_TILE_PIXELS - 1.0)) / BIG_TILE_PIXELS;
    }
}

/// Reads a dictionary. `max_defs` is the caller's limit on the total number
/// of slots, on top of the fixed [`MAP_FAN_TYPE_MAX`].
pub fn decode(data: &[u8], max_defs: usize) -> Result<TileDictionary> {
    let mut s = TokenScanner::new(data);

    let count = read_count(&mut s, "number of tile types")?;
    let offset = TileDictionary::offset_for(count);
    let total = offset * 2;

    if total > MAP_FAN_TYPE_MAX {
        return Err(FormatError::DictionaryTooLarge {
            defs: total,
            max: MAP_FAN_TYPE_MAX,
        });
    }
    if total > max_defs {
        log::warn!("Tile dictionary needs {total} definitions, caller allows only {max_defs}");
        return Err(FormatError::DictionaryCapExceeded {
            defs: total,
            cap: max_defs,
        });
    }

    let mut defs = vec![TileDefinition::default(); total];
    for index in 0..count {
        let def = read_definition(&mut s, index)?;
        defs[index + offset] = def.clone();
        defs[index] = def;
    }

    for (index, def) in defs.iter_mut().enumerate() {
        if index < offset {
            renormalize_small(def);
        } else {
            renormalize_large(def);
        }
    }

    log::debug!("Loaded {count} tile types, large tiles start at {offset}");
    Ok(TileDictionary {
        defs,
        offset,
        loaded: count,
    })
}

pub fn load(path: impl AsRef<Path>, max_defs: usize) -> Result<TileDictionary> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    decode(&data, max_defs)
}
