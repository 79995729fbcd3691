//! Integration tests: input bindings across file versions.

use ego_core::formats::{controls_file, scantag_file};
use ego_core::types::{
    ControlsConfig, InputAction, InputDeviceKind, MOUSE_LEFT, MOUSE_MIDDLE, ScanTagTable,
};

/// A version 1 file: 4 device blocks of the 13 legacy actions, by position.
fn legacy_file() -> String {
    let mut text = String::new();
    for device in 0..4 {
        text.push_str(&format!("// device {device}\n"));
        for (index, action) in InputAction::legacy().iter().enumerate() {
            let tags = match (device, index) {
                (0, 0) => "KEY_SPACE",
                (0, 9) => "KEY_UP + KEY_W",
                (1, 1) => "MOS_LEFT",
                (1, 8) => "MOS_LEFT + MOS_MIDDLE",
                (2, 0) => "JOY_0",
                _ => "NONE",
            };
            text.push_str(&format!("{} : {tags}\n", action.label()));
        }
    }
    text
}

#[test]
fn legacy_positional_file() {
    let tags = ScanTagTable::defaults();
    let config = controls_file::decode(legacy_file().as_bytes(), &tags).unwrap();
    assert_eq!(config.version, 1);

    let keyboard = config.device(InputDeviceKind::Keyboard).unwrap();
    assert_eq!(keyboard.binding(InputAction::Jump).keys, vec![32]);
    assert_eq!(keyboard.binding(InputAction::Up).keys.len(), 2);

    let mouse = config.device(InputDeviceKind::Mouse).unwrap();
    assert_eq!(mouse.binding(InputAction::LeftUse).bits, MOUSE_LEFT);
    assert_eq!(
        mouse.binding(InputAction::Camera).bits,
        MOUSE_LEFT | MOUSE_MIDDLE
    );

    let joystick = config.device(InputDeviceKind::JoystickA).unwrap();
    assert_eq!(joystick.binding(InputAction::Jump).bits, 1);
    assert!(joystick.binding(InputAction::CameraIn).is_unbound());
}

#[test]
fn legacy_file_is_upgraded_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("controls.txt");
    let tags = ScanTagTable::defaults();

    let legacy = controls_file::decode(legacy_file().as_bytes(), &tags).unwrap();
    controls_file::save(&path, &legacy, &tags).unwrap();
    let upgraded = controls_file::load(&path, &tags).unwrap();

    assert_eq!(upgraded.version, 3);
    assert_eq!(upgraded.devices, legacy.devices);
}

#[test]
fn key_list_is_capped() {
    let text = "$FILE_VERSION 3\nDevice : KEYBOARD\nJump : KEY_A KEY_B KEY_C KEY_D KEY_E\n";
    let config = controls_file::decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
    let jump = config
        .device(InputDeviceKind::Keyboard)
        .unwrap()
        .binding(InputAction::Jump);
    assert_eq!(jump.keys, vec!['a' as u32, 'b' as u32, 'c' as u32, 'd' as u32]);
}

#[test]
fn custom_scan_codes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scancode.txt");
    std::fs::write(&path, "// custom\nKEY_JUMP K 500\nMOS_FIRE M 2\n").unwrap();
    let tags = scantag_file::load(&path).unwrap();

    let text = "$FILE_VERSION 3\nDevice : KEYBOARD\nJump : KEY_JUMP KEY_SPACE\nDevice : MOUSE\nJump : MOS_FIRE\n";
    let config = controls_file::decode(text.as_bytes(), &tags).unwrap();

    let keyboard = config.device(InputDeviceKind::Keyboard).unwrap();
    assert_eq!(keyboard.binding(InputAction::Jump).keys, vec![500]);
    let mouse = config.device(InputDeviceKind::Mouse).unwrap();
    assert_eq!(mouse.binding(InputAction::Jump).bits, 2);

    let written = controls_file::encode(&config, &tags);
    assert!(written.contains(": KEY_JUMP\n"));
    assert!(written.contains(": MOS_FIRE\n"));
}

#[test]
fn unknown_device_block_is_skipped() {
    let text = "$FILE_VERSION 2\nDevice : GAMEPAD\nJump : KEY_A\nDevice : KEYBOARD\nJump : KEY_B\n";
    let config = controls_file::decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();

    let mut expected = ControlsConfig {
        version: 2,
        ..Default::default()
    };
    expected
        .device_mut(InputDeviceKind::Keyboard)
        .unwrap()
        .binding_mut(InputAction::Jump)
        .push_key('b' as u32);
    assert_eq!(config, expected);
}
