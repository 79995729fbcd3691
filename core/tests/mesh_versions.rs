//! Integration tests: terrain meshes of every version.

use ego_core::constants::MeshFx;
use ego_core::error::FormatError;
use ego_core::formats::mpd_file;
use ego_core::types::{MeshData, MeshInfo, TileInfo};

fn header(version: u32, vertices: u32, x: u32, y: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for v in [mpd_file::id_for_version(version), vertices, x, y] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// 3x3 tiles, walls all around a single floor tile.
fn walled_room_v1() -> Vec<u8> {
    let wall = TileInfo {
        fx: MeshFx::WALL.bits(),
        ..Default::default()
    };
    let floor = TileInfo::default();

    let mut bytes = header(1, 16, 3, 3);
    for index in 0..9 {
        let tile = if index == 4 { floor } else { wall };
        bytes.extend_from_slice(&tile.packed().to_le_bytes());
    }
    bytes
}

// ── version 1 synthesis ─────────────────────────────────────────────

#[test]
fn v1_twist_slopes_towards_the_floor() {
    let mesh = mpd_file::decode(&walled_room_v1()).unwrap();

    let expected = [
        [0x77, 0x07, 0x77],
        [0x70, 0x77, 0x7F],
        [0x77, 0xF7, 0x77],
    ];
    for (y, row) in expected.iter().enumerate() {
        for (x, twist) in row.iter().enumerate() {
            assert_eq!(
                mesh.twist_at(x as i32, y as i32),
                Some(*twist),
                "tile ({x}, {y})"
            );
        }
    }
}

#[test]
fn v1_fan_types_follow_the_walls() {
    let mesh = mpd_file::decode(&walled_room_v1()).unwrap();
    let fan_type = |x, y| mesh.tile_at(x, y).unwrap().fan_type;

    assert_eq!(fan_type(1, 1), 0);
    assert_eq!(fan_type(1, 0), 8);
    assert_eq!(fan_type(1, 2), 8);
    assert_eq!(fan_type(0, 1), 9);
    assert_eq!(fan_type(2, 1), 9);
    for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
        assert_eq!(fan_type(x, y), 0, "corner ({x}, {y})");
    }

    assert!(mesh.is_wall(-1, 0));
    assert!(!mesh.is_wall(1, 1));
    assert_eq!(mesh.vertices.len(), 16);
}

// ── header limits ───────────────────────────────────────────────────

#[test]
fn oversized_header_is_rejected() {
    let bytes = header(4, 0, 100_000, 1);
    match mpd_file::decode(&bytes) {
        Err(FormatError::DimensionTooLarge { what, value, .. }) => {
            assert_eq!(what, "tiles_x");
            assert_eq!(value, 100_000);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unknown_magic() {
    let mut bytes = header(1, 0, 1, 1);
    bytes[..4].copy_from_slice(b"PNG\0");
    assert!(matches!(
        mpd_file::decode(&bytes),
        Err(FormatError::UnknownFormat { .. })
    ));
}

// ── current version ─────────────────────────────────────────────────

fn sample_mesh() -> MeshData {
    let mut mesh = MeshData::new(MeshInfo::new(8, 2, 1).unwrap()).unwrap();
    mesh.tiles[0] = TileInfo {
        fan_type: 3,
        fx: (MeshFx::WATER | MeshFx::ANIMATED).bits(),
        img: 513,
        twist: 0x68,
    };
    mesh.tiles[1].fx = MeshFx::IMPASSABLE.bits();
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        vertex.pos = [i as f32 * 128.0, 64.0, i as f32 * 0.5];
        vertex.light = (i * 30) as u8;
    }
    mesh
}

#[test]
fn v4_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.mpd");
    let mesh = sample_mesh();

    mpd_file::save(&path, &mesh).unwrap();
    assert_eq!(mpd_file::probe_version(&std::fs::read(&path).unwrap()).unwrap(), 4);

    let loaded = mpd_file::load(&path).unwrap();
    assert_eq!(loaded, mesh);
    assert!(loaded.tiles[0].has_fx(MeshFx::WATER));
    assert!(loaded.is_wall(1, 0));
}

#[test]
fn truncated_light_section() {
    let mut bytes = mpd_file::encode(&sample_mesh()).unwrap();
    bytes.truncate(bytes.len() - 3);
    assert!(matches!(
        mpd_file::decode(&bytes),
        Err(FormatError::Truncated {
            section: "light",
            needed: 8,
            available: 5
        })
    ));
}
