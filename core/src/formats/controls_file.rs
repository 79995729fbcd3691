//! Input bindings codec (controls.txt).
//!
//! * version 1 has no tag: four device blocks of the 13 legacy actions, read
//!   by position
//! * version 2 starts with `$FILE_VERSION 2` and names every device block and
//!   action line
//! * version 3 is version 2 with the camera rotate and zoom actions
//!
//! Each value is a list of scan tags separated by spaces, `+` or `,`.

use std::path::Path;

use crate::constants::{CURRENT_CONTROLS_VERSION, MAX_CONTROL_KEYS};
use crate::error::{FormatError, Result};
use crate::formats::text_writer::LabeledWriter;
use crate::scanner::TokenScanner;
use crate::types::{
    ControlBinding, ControlsConfig, InputAction, InputDeviceKind, LEGACY_ACTION_COUNT,
    ScanTagTable, TagClass,
};

const DEVICE_LABEL: &str = "Device";
const UNBOUND: &str = "NONE";

/// Tag classes a device accepts besides plain keys.
fn button_class(kind: InputDeviceKind) -> Option<TagClass> {
    match kind {
        InputDeviceKind::Keyboard => None,
        InputDeviceKind::Mouse => Some(TagClass::Mouse),
        InputDeviceKind::JoystickA | InputDeviceKind::JoystickB => Some(TagClass::Joystick),
    }
}

fn apply_tokens(
    binding: &mut ControlBinding,
    kind: InputDeviceKind,
    action: InputAction,
    text: &str,
    tags: &ScanTagTable,
) {
    let tokens = text
        .split(|c: char| c.is_whitespace() || c == '+' || c == ',')
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(UNBOUND));

    for token in tokens {
        let Some(tag) = tags.find(token) else {
            log::warn!("Unknown input tag '{token}' for {}", action.label());
            continue;
        };

        match tag.class {
            TagClass::Key => {
                if !binding.push_key(tag.value) {
                    log::warn!(
                        "{} already has {MAX_CONTROL_KEYS} keys, ignoring {token}",
                        action.label()
                    );
                }
            }
            class if Some(class) == button_class(kind) => binding.bits |= tag.value,
            _ => log::warn!("{token} cannot be used on the {} device", kind.name()),
        }
    }
}

fn decode_positional(s: &mut TokenScanner<'_>, config: &mut ControlsConfig, tags: &ScanTagTable) -> Result<()> {
    for device in config.devices.iter_mut() {
        let kind = device.kind;
        for &action in InputAction::legacy() {
            s.skip_to_colon(false, action.label())?;
            let text = s.read_string();
            apply_tokens(device.binding_mut(action), kind, action, &text, tags);
        }
    }
    Ok(())
}

fn decode_labeled(
    s: &mut TokenScanner<'_>,
    version: i32,
    config: &mut ControlsConfig,
    tags: &ScanTagTable,
) -> Result<()> {
    let mut current: Option<InputDeviceKind> = None;

    while !s.is_eof() {
        let label = s.read_name();
        if !s.skip_to_colon_on_line() {
            log::warn!("Controls line '{label}' has no colon, skipping it");
            continue;
        }
        let text = s.read_string();

        if label.eq_ignore_ascii_case(DEVICE_LABEL) {
            current = InputDeviceKind::from_name(&text);
            if current.is_none() {
                log::warn!("Unknown input device '{text}', skipping its block");
            }
            continue;
        }

        let Some(kind) = current else {
            log::warn!("Binding '{label}' outside of a device block on line {}", s.line());
            continue;
        };

        let action = match InputAction::from_label(&label) {
            Some(action) if version >= 3 || action.index() < LEGACY_ACTION_COUNT => action,
            _ => {
                log::warn!("Unknown controls label '{label}' in version {version} file");
                continue;
            }
        };

        if let Some(device) = config.device_mut(kind) {
            apply_tokens(device.binding_mut(action), kind, action, &text, tags);
        }
    }
    Ok(())
}

pub fn decode(data: &[u8], tags: &ScanTagTable) -> Result<ControlsConfig> {
    let mut s = TokenScanner::new(data);
    let version = s.read_version_tag().unwrap_or(1);

    let mut config = ControlsConfig {
        version,
        ..Default::default()
    };

    match version {
        1 => decode_positional(&mut s, &mut config, tags)?,
        2 | 3 => decode_labeled(&mut s, version, &mut config, tags)?,
        _ => {
            return Err(FormatError::UnsupportedVersion {
                what: "controls",
                version,
            });
        }
    }

    Ok(config)
}

fn binding_text(
    binding: &ControlBinding,
    kind: InputDeviceKind,
    action: InputAction,
    tags: &ScanTagTable,
) -> String {
    let mut names: Vec<&str> = Vec::new();

    for &code in &binding.keys {
        match tags.key_name(code) {
            Some(name) => names.push(name),
            None => log::warn!("Key code {code} of {} has no name, dropping it", action.label()),
        }
    }
    if let Some(class) = button_class(kind) {
        names.extend(tags.bit_names(class, binding.bits));
    }

    if names.is_empty() {
        UNBOUND.to_string()
    } else {
        names.join(" + ")
    }
}

/// Always writes the current version.
pub fn encode(config: &ControlsConfig, tags: &ScanTagTable) -> String {
    let mut w = LabeledWriter::with_width(24);
    w.raw(&format!("$FILE_VERSION {CURRENT_CONTROLS_VERSION}"))
        .comment("Input bindings, tags separated by spaces or +");

    for device in &config.devices {
        w.blank().line(DEVICE_LABEL, device.kind.name());
        for action in InputAction::ALL {
            w.line(
                action.label(),
                binding_text(device.binding(action), device.kind, action, tags),
            );
        }
    }

    w.finish()
}

pub fn load(path: impl AsRef<Path>, tags: &ScanTagTable) -> Result<ControlsConfig> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let config = decode(&data, tags)?;
    log::debug!(
        "Loaded version {} controls from {}",
        config.version,
        path.display()
    );
    Ok(config)
}

pub fn save(path: impl AsRef<Path>, config: &ControlsConfig, tags: &ScanTagTable) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(config, tags)).map_err(|e| FormatError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MOUSE_LEFT, MOUSE_RIGHT};

    #[test]
    fn labeled_v2_ignores_camera_rotation() {
        let text = "$FILE_VERSION 2\nDevice : KEYBOARD\nJump : KEY_SPACE\nCamera_Rotate_Left : KEY_Q\n";
        let config = decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
        let keyboard = config.device(InputDeviceKind::Keyboard).unwrap();

        assert_eq!(config.version, 2);
        assert_eq!(keyboard.binding(InputAction::Jump).keys, vec![32]);
        assert!(keyboard.binding(InputAction::CameraLeft).is_unbound());
    }

    #[test]
    fn mouse_bits_are_ored() {
        let text = "$FILE_VERSION 3\nDevice : MOUSE\nLeft_Hand_Use : MOS_LEFT + MOS_RIGHT, KEY_A\n";
        let config = decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
        let binding = config
            .device(InputDeviceKind::Mouse)
            .unwrap()
            .binding(InputAction::LeftUse);

        assert_eq!(binding.bits, MOUSE_LEFT | MOUSE_RIGHT);
        assert_eq!(binding.keys, vec!['a' as u32]);
    }

    #[test]
    fn wrong_class_for_device_is_skipped() {
        let text = "$FILE_VERSION 3\nDevice : KEYBOARD\nJump : MOS_LEFT JOY_1\n";
        let config = decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
        assert!(
            config
                .device(InputDeviceKind::Keyboard)
                .unwrap()
                .binding(InputAction::Jump)
                .is_unbound()
        );
    }

    #[test]
    fn line_without_colon_is_skipped() {
        let text = "$FILE_VERSION 3\nDevice : KEYBOARD\nJump KEY_SPACE\nLeft_Hand_Use : KEY_A\n";
        let config = decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
        let keyboard = config.device(InputDeviceKind::Keyboard).unwrap();

        assert!(keyboard.binding(InputAction::Jump).is_unbound());
        assert_eq!(keyboard.binding(InputAction::LeftUse).keys, vec!['a' as u32]);
    }

    #[test]
    fn unsupported_version() {
        let text = "$FILE_VERSION 9\n";
        assert!(matches!(
            decode(text.as_bytes(), &ScanTagTable::defaults()),
            Err(FormatError::UnsupportedVersion { version: 9, .. })
        ));
    }

    #[test]
    fn unbound_actions_write_none() {
        let text = encode(&ControlsConfig::default(), &ScanTagTable::defaults());
        assert!(text.starts_with("$FILE_VERSION 3\n"));
        assert!(text.contains("Camera_Zoom_Out          : NONE"));

        let back = decode(text.as_bytes(), &ScanTagTable::defaults()).unwrap();
        assert_eq!(back.version, 3);
        assert_eq!(back.devices, ControlsConfig::default().devices);
    }
}
