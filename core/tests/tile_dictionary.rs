//! Integration tests: tile shape dictionaries read from disk.

use ego_core::error::FormatError;
use ego_core::formats::tile_dictionary;
use ego_core::registry::Registry;
use ego_core::types::ScanTagTable;

const THREE_SHAPES: &str = "\
// two triangles and a quad
Number of types : 3

Vertices : 3
Ref : 0  U : 0  V : 0
Ref : 3  U : 1  V : 0
Ref : 15 U : 1  V : 1
Commands : 1
Entries : 3
Vertex : 0  Vertex : 1  Vertex : 2

Vertices : 3
Ref : 0  U : 0  V : 0
Ref : 15 U : 1  V : 1
Ref : 12 U : 0  V : 1
Commands : 1
Entries : 3
Vertex : 0  Vertex : 1  Vertex : 2

Vertices : 4
Ref : 0  U : 0  V : 0
Ref : 3  U : 1  V : 0
Ref : 15 U : 1  V : 1
Ref : 12 U : 0  V : 1
Commands : 2
Entries : 3
Vertex : 0  Vertex : 1  Vertex : 2
Entries : 3
Vertex : 0  Vertex : 2  Vertex : 3
";

#[test]
fn three_shapes_fill_a_block_of_four() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fans.txt");
    std::fs::write(&path, THREE_SHAPES).unwrap();

    let dict = tile_dictionary::load(&path, 64).unwrap();
    assert_eq!(dict.offset(), 4);
    assert_eq!(dict.len(), 8);
    assert_eq!(dict.loaded_count(), 3);

    let quad = dict.get(2).unwrap();
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.command_count(), 2);
    assert!(quad.same_topology(dict.get(6).unwrap()));

    assert!(dict.get(3).unwrap().is_empty());
    assert!(dict.get(7).unwrap().is_empty());
    assert!(!dict.is_large(3));
    assert!(dict.is_large(4));
    assert!(dict.get(8).is_none());
}

#[test]
fn caller_cap_is_distinct_from_hard_limit() {
    assert!(matches!(
        tile_dictionary::decode(THREE_SHAPES.as_bytes(), 4),
        Err(FormatError::DictionaryCapExceeded { defs: 8, cap: 4 })
    ));
}

#[test]
fn registry_by_reference() {
    let dict = tile_dictionary::decode(THREE_SHAPES.as_bytes(), 64).unwrap();
    let registry = Registry::new(dict, ScanTagTable::defaults());

    assert_eq!(registry.tile_dictionary().offset(), 4);
    assert!(registry.scantags().find("key_space").is_some());
}
