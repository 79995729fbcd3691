//! Fixed-point and bit-packing conversions used by the data files.
//!
//! * 8.8 fixed point: `round(f * 256)` / `v / 256`
//! * skin defense: stored as `255 - value`
//! * twist: two signed slope nibbles in one byte
//! * damage modifier letters: `T`, `C`, `M`, `I`, anything else is none

use crate::constants::DamageModifier;

/// One in 8.8 fixed point.
pub const FP8_ONE: i32 = 1 << 8;

/// Twist value of a flat tile, `pack_twist(0, 0)`.
pub const TWIST_FLAT: u8 = 0x77;

/// Converts a float to signed 8.8 fixed point, rounding to nearest.
pub fn float_to_fixed8_8(value: f32) -> i32 {
    (value * FP8_ONE as f32).round() as i32
}

pub fn fixed8_8_to_float(value: i32) -> f32 {
    value as f32 / FP8_ONE as f32
}

/// Skin defense is stored inverted on disk; the mapping is its own inverse.
pub fn invert_defense(value: i32) -> u8 {
    (0xFF - value.clamp(0, 0xFF)) as u8
}

/// Packs a slope pair into a twist byte. Both components are clamped to `[-7, 8]`.
pub fn pack_twist(x: i32, y: i32) -> u8 {
    let x = x.clamp(-7, 8);
    let y = y.clamp(-7, 8);
    (((y + 7) << 4) | (x + 7)) as u8
}

/// Inverse of [`pack_twist`], returns `(x, y)`.
pub fn unpack_twist(twist: u8) -> (i32, i32) {
    let x = (twist & 0x0F) as i32 - 7;
    let y = (twist >> 4) as i32 - 7;
    (x, y)
}

/// Reads a damage modifier letter. Unknown letters (conventionally `F`) mean none.
pub fn damage_modifier_from_letter(letter: char) -> DamageModifier {
    match letter.to_ascii_uppercase() {
        'T' => DamageModifier::INVERT,
        'C' => DamageModifier::CHARGE,
        'M' => DamageModifier::MANA,
        'I' => DamageModifier::INVICTUS,
        _ => DamageModifier::empty(),
    }
}

/// Picks the letter for a modifier set. Only one letter fits a cell, so when
/// several bits are set the first of invert, charge, mana, invictus wins.
pub fn damage_modifier_to_letter(modifier: DamageModifier) -> char {
    if modifier.contains(DamageModifier::INVERT) {
        'T'
    } else if modifier.contains(DamageModifier::CHARGE) {
        'C'
    } else if modifier.contains(DamageModifier::MANA) {
        'M'
    } else if modifier.contains(DamageModifier::INVICTUS) {
        'I'
    } else {
        'F'
    }
}
