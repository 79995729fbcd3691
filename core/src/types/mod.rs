//! Data types module - in-memory records produced and consumed by the format codecs

mod cap;
pub mod controls;
mod enums;
mod eve;
mod mesh;
mod range;
mod scantag;
mod tile_def;

// Re-export all types
pub use cap::*;
pub use controls::{
    ACTION_COUNT, ControlBinding, ControlsConfig, DeviceControls, InputAction, InputDeviceKind,
    LEGACY_ACTION_COUNT,
};
pub use enums::*;
pub use eve::{AddKind, EnchantSet, EveRecord};
pub use mesh::{MeshData, MeshInfo, MeshVertex, TileInfo};
pub use range::FloatRange;
pub use scantag::*;
pub use tile_def::{TileDefinition, TileVertexDef};
