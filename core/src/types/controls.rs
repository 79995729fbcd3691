//! Input bindings (controls.txt)

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CONTROL_KEYS, MAX_INPUT_DEVICES};

pub const LEGACY_ACTION_COUNT: usize = 13;
pub const ACTION_COUNT: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Jump = 0,
    LeftUse,
    LeftGet,
    LeftPack,
    RightUse,
    RightGet,
    RightPack,
    Message,
    Camera,
    Up,
    Down,
    Left,
    Right,
    CameraLeft,
    CameraRight,
    CameraIn,
    CameraOut,
}

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::Jump,
        InputAction::LeftUse,
        InputAction::LeftGet,
        InputAction::LeftPack,
        InputAction::RightUse,
        InputAction::RightGet,
        InputAction::RightPack,
        InputAction::Message,
        InputAction::Camera,
        InputAction::Up,
        InputAction::Down,
        InputAction::Left,
        InputAction::Right,
        InputAction::CameraLeft,
        InputAction::CameraRight,
        InputAction::CameraIn,
        InputAction::CameraOut,
    ];

    /// The actions every controls version knows about.
    pub fn legacy() -> &'static [InputAction] {
        &Self::ALL[..LEGACY_ACTION_COUNT]
    }

    pub fn label(self) -> &'static str {
        match self {
            InputAction::Jump => "Jump",
            InputAction::LeftUse => "Left_Hand_Use",
            InputAction::LeftGet => "Left_Hand_Get/Drop",
            InputAction::LeftPack => "Left_Hand_Inventory",
            InputAction::RightUse => "Right_Hand_Use",
            InputAction::RightGet => "Right_Hand_Get/Drop",
            InputAction::RightPack => "Right_Hand_Inventory",
            InputAction::Message => "Send_Message",
            InputAction::Camera => "Camera_Control_Mode",
            InputAction::Up => "Walk_Up",
            InputAction::Down => "Walk_Down",
            InputAction::Left => "Walk_Left",
            InputAction::Right => "Walk_Right",
            InputAction::CameraLeft => "Camera_Rotate_Left",
            InputAction::CameraRight => "Camera_Rotate_Right",
            InputAction::CameraIn => "Camera_Zoom_In",
            InputAction::CameraOut => "Camera_Zoom_Out",
        }
    }

    pub fn from_label(label: &str) -> Option<InputAction> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.label().eq_ignore_ascii_case(label))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputDeviceKind {
    Keyboard = 0,
    Mouse,
    JoystickA,
    JoystickB,
}

impl InputDeviceKind {
    pub const ALL: [InputDeviceKind; MAX_INPUT_DEVICES] = [
        InputDeviceKind::Keyboard,
        InputDeviceKind::Mouse,
        InputDeviceKind::JoystickA,
        InputDeviceKind::JoystickB,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputDeviceKind::Keyboard => "KEYBOARD",
            InputDeviceKind::Mouse => "MOUSE",
            InputDeviceKind::JoystickA => "JOYSTICK_A",
            InputDeviceKind::JoystickB => "JOYSTICK_B",
        }
    }

    pub fn from_name(name: &str) -> Option<InputDeviceKind> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// What has to be pressed for one action: key codes and/or button bits
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlBinding {
    pub bits: u32,
    pub keys: Vec<u32>,
}

impl ControlBinding {
    /// Adds a key code. Returns `false` once the per-action limit is reached.
    pub fn push_key(&mut self, code: u32) -> bool {
        if self.keys.len() >= MAX_CONTROL_KEYS {
            return false;
        }
        self.keys.push(code);
        true
    }

    pub fn is_unbound(&self) -> bool {
        self.bits == 0 && self.keys.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceControls {
    pub kind: InputDeviceKind,
    pub bindings: [ControlBinding; ACTION_COUNT],
}

impl DeviceControls {
    pub fn new(kind: InputDeviceKind) -> Self {
        Self {
            kind,
            bindings: Default::default(),
        }
    }

    pub fn binding(&self, action: InputAction) -> &ControlBinding {
        &self.bindings[action.index()]
    }

    pub fn binding_mut(&mut self, action: InputAction) -> &mut ControlBinding {
        &mut self.bindings[action.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Version the bindings were read from
    pub version: i32,
    pub devices: Vec<DeviceControls>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            version: crate::constants::CURRENT_CONTROLS_VERSION,
            devices: InputDeviceKind::ALL
                .iter()
                .map(|&kind| DeviceControls::new(kind))
                .collect(),
        }
    }
}

impl ControlsConfig {
    pub fn device(&self, kind: InputDeviceKind) -> Option<&DeviceControls> {
        self.devices.iter().find(|d| d.kind == kind)
    }

    pub fn device_mut(&mut self, kind: InputDeviceKind) -> Option<&mut DeviceControls> {
        self.devices.iter_mut().find(|d| d.kind == kind)
    }
}
