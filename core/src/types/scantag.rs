//! Symbolic input names such as `KEY_A`, `MOS_LEFT` or `JOY_3`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagClass {
    /// Value is a key code
    Key,
    /// Value is a mouse button bit
    Mouse,
    /// Value is a joystick button bit
    Joystick,
}

impl TagClass {
    pub fn from_letter(letter: char) -> Option<TagClass> {
        match letter.to_ascii_uppercase() {
            'K' => Some(TagClass::Key),
            'M' => Some(TagClass::Mouse),
            'J' => Some(TagClass::Joystick),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            TagClass::Key => 'K',
            TagClass::Mouse => 'M',
            TagClass::Joystick => 'J',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTag {
    pub name: String,
    pub class: TagClass,
    pub value: u32,
}

impl ScanTag {
    pub fn new(name: impl Into<String>, class: TagClass, value: u32) -> Self {
        Self {
            name: name.into(),
            class,
            value,
        }
    }
}

// key codes
const KEY_BACKSPACE: u32 = 8;
const KEY_TAB: u32 = 9;
const KEY_RETURN: u32 = 13;
const KEY_ESCAPE: u32 = 27;
const KEY_SPACE: u32 = 32;
const KEY_KP0: u32 = 256;
const KEY_UP: u32 = 273;
const KEY_DOWN: u32 = 274;
const KEY_RIGHT: u32 = 275;
const KEY_LEFT: u32 = 276;
const KEY_F1: u32 = 282;
const KEY_RSHIFT: u32 = 303;
const KEY_LSHIFT: u32 = 304;
const KEY_RCTRL: u32 = 305;
const KEY_LCTRL: u32 = 306;
const KEY_RALT: u32 = 307;
const KEY_LALT: u32 = 308;

pub const MOUSE_LEFT: u32 = 1 << 0;
pub const MOUSE_RIGHT: u32 = 1 << 1;
pub const MOUSE_MIDDLE: u32 = 1 << 2;
pub const MOUSE_X1: u32 = 1 << 3;
pub const MOUSE_X2: u32 = 1 << 4;

pub const JOYSTICK_BUTTONS: u32 = 32;

/// Name → input lookup used by the controls codec
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanTagTable {
    tags: Vec<ScanTag>,
}

impl ScanTagTable {
    pub fn new(tags: Vec<ScanTag>) -> Self {
        Self { tags }
    }

    /// The built-in table used when no scancode file is available.
    pub fn defaults() -> Self {
        let mut tags = Vec::new();
        let mut key = |name: String, value: u32| tags.push(ScanTag::new(name, TagClass::Key, value));

        for c in b'A'..=b'Z' {
            key(format!("KEY_{}", c as char), c.to_ascii_lowercase() as u32);
        }
        for c in b'0'..=b'9' {
            key(format!("KEY_{}", c as char), c as u32);
        }
        for n in 0..12 {
            key(format!("KEY_F{}", n + 1), KEY_F1 + n);
        }
        for n in 0..10 {
            key(format!("KEY_KP_{n}"), KEY_KP0 + n);
        }
        for (name, value) in [
            ("KEY_BACKSPACE", KEY_BACKSPACE),
            ("KEY_TAB", KEY_TAB),
            ("KEY_RETURN", KEY_RETURN),
            ("KEY_ESCAPE", KEY_ESCAPE),
            ("KEY_SPACE", KEY_SPACE),
            ("KEY_UP", KEY_UP),
            ("KEY_DOWN", KEY_DOWN),
            ("KEY_RIGHT", KEY_RIGHT),
            ("KEY_LEFT", KEY_LEFT),
            ("KEY_RIGHT_SHIFT", KEY_RSHIFT),
            ("KEY_LEFT_SHIFT", KEY_LSHIFT),
            ("KEY_RIGHT_CONTROL", KEY_RCTRL),
            ("KEY_LEFT_CONTROL", KEY_LCTRL),
            ("KEY_RIGHT_ALT", KEY_RALT),
            ("KEY_LEFT_ALT", KEY_LALT),
        ] {
            key(name.to_string(), value);
        }

        for (name, bit) in [
            ("MOS_LEFT", MOUSE_LEFT),
            ("MOS_RIGHT", MOUSE_RIGHT),
            ("MOS_MIDDLE", MOUSE_MIDDLE),
            ("MOS_X1", MOUSE_X1),
            ("MOS_X2", MOUSE_X2),
        ] {
            tags.push(ScanTag::new(name, TagClass::Mouse, bit));
        }

        for n in 0..JOYSTICK_BUTTONS {
            tags.push(ScanTag::new(format!("JOY_{n}"), TagClass::Joystick, 1 << n));
        }

        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanTag> + '_ {
        self.tags.iter()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&ScanTag> {
        self.tags
            .iter()
            .find(|tag| tag.name.eq_ignore_ascii_case(name))
    }

    /// First name bound to a key code.
    pub fn key_name(&self, code: u32) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.class == TagClass::Key && tag.value == code)
            .map(|tag| tag.name.as_str())
    }

    /// Names of every single-bit tag of `class` contained in `bits`, lowest bit first.
    pub fn bit_names(&self, class: TagClass, bits: u32) -> Vec<&str> {
        let mut names = Vec::new();
        for bit in (0..32).map(|n| 1u32 << n).filter(|b| bits & b != 0) {
            if let Some(tag) = self
                .tags
                .iter()
                .find(|tag| tag.class == class && tag.value == bit)
            {
                names.push(tag.name.as_str());
            }
        }
        names
    }
}
