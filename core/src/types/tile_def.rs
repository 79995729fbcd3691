use serde::{Deserialize, Serialize};

/// One vertex of a tile shape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TileVertexDef {
    /// Encoded grid position, x in bits 0-1 and y in bits 2-3
    pub grid_ref: u32,
    pub grid_ix: u8,
    pub grid_iy: u8,
    pub u: f32,
    pub v: f32,
}

impl TileVertexDef {
    pub fn new(grid_ref: u32, u: f32, v: f32) -> Self {
        Self {
            grid_ref,
            grid_ix: (grid_ref & 3) as u8,
            grid_iy: ((grid_ref >> 2) & 3) as u8,
            u,
            v,
        }
    }
}

/// Geometry template for one tile type: vertices plus flattened draw commands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileDefinition {
    pub vertices: Vec<TileVertexDef>,
    /// Number of indices used by each command
    pub command_sizes: Vec<usize>,
    /// Every command's indices, back to back
    pub command_indices: Vec<u16>,
}

impl TileDefinition {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn command_count(&self) -> usize {
        self.command_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the index list of each command.
    pub fn commands(&self) -> impl Iterator<Item = &[u16]> + '_ {
        let mut start = 0;
        self.command_sizes.iter().map(move |&size| {
            let end = (start + size).min(self.command_indices.len());
            let slice = &self.command_indices[start.min(end)..end];
            start = end;
            slice
        })
    }

    /// Same topology, ignoring texture coordinates.
    pub fn same_topology(&self, other: &TileDefinition) -> bool {
        self.command_sizes == other.command_sizes
            && self.command_indices == other.command_indices
            && self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.grid_ref == b.grid_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_ref_decoding() {
        let v = TileVertexDef::new(0b1110, 0.0, 1.0);
        assert_eq!(v.grid_ix, 2);
        assert_eq!(v.grid_iy, 3);
    }

    #[test]
    fn commands_split_the_index_buffer() {
        let def = TileDefinition {
            vertices: vec![TileVertexDef::default(); 4],
            command_sizes: vec![3, 4],
            command_indices: vec![0, 1, 2, 0, 2, 3, 1],
        };
        let commands: Vec<&[u16]> = def.commands().collect();
        assert_eq!(commands, vec![&[0u16, 1, 2][..], &[0u16, 2, 3, 1][..]]);
        assert_eq!(def.command_count(), 2);
    }
}
