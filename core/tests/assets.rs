//! Integration tests: object directories and the missing-asset policy.

use ego_core::assets::{self, CAP_FILE_NAME, EVE_FILE_NAME, Requirement};
use ego_core::formats::eve_file;
use ego_core::types::{CapRecord, EveRecord};

#[test]
fn broken_required_profile_becomes_blank() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CAP_FILE_NAME), "Class name : Broken\n").unwrap();

    let object = assets::load_object(dir.path(), Requirement::Required).unwrap();
    assert_eq!(object.cap, Some(CapRecord::default()));
    assert!(!object.is_loaded());
}

#[test]
fn broken_optional_profile_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CAP_FILE_NAME), "Class name : Broken\n").unwrap();

    let err = assets::load_object(dir.path(), Requirement::Optional).unwrap_err();
    assert!(format!("{err:#}").contains(CAP_FILE_NAME));
}

#[test]
fn enchant_is_optional_either_way() {
    let dir = tempfile::tempdir().unwrap();
    let cap = CapRecord {
        classname: "Ring".to_string(),
        ..Default::default()
    };
    assets::save_object(dir.path(), &cap, None).unwrap();
    assert!(!dir.path().join(EVE_FILE_NAME).exists());

    for requirement in [Requirement::Optional, Requirement::Required] {
        let object = assets::load_object(dir.path(), requirement).unwrap();
        assert!(object.is_loaded());
        assert!(object.eve.is_none());
    }
}

#[test]
fn saved_enchant_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let eve = EveRecord {
        lifetime: -1,
        retarget: true,
        ..Default::default()
    };
    assets::save_object(dir.path(), &CapRecord::default(), Some(&eve)).unwrap();

    let loaded = eve_file::load(dir.path().join(EVE_FILE_NAME)).unwrap();
    assert!(loaded.retarget);
    assert_eq!(loaded.lifetime, -1);
}
