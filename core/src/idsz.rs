//! IDSZ codes: four-character tags packed into a `u32`, and the ordered
//! IDSZ → level table used for skills.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_IDSZ_MAP_SIZE;

/// A four-character identifier such as `[GOLD]`, packed big-endian into a `u32`.
/// The zero code means "none" and is written as `[NONE]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Idsz(pub u32);

impl Idsz {
    pub const NONE: Idsz = Idsz(0);

    pub const fn new(code: &[u8; 4]) -> Self {
        Idsz(u32::from_be_bytes(*code))
    }

    /// Packs up to four characters; shorter codes are padded with spaces.
    /// `NONE` (any case) and the empty string give [`Idsz::NONE`].
    pub fn from_str_code(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() || code.eq_ignore_ascii_case("NONE") {
            return Idsz::NONE;
        }

        let mut bytes = [b' '; 4];
        for (slot, b) in bytes.iter_mut().zip(code.bytes()) {
            *slot = b.to_ascii_uppercase();
        }
        Idsz(u32::from_be_bytes(bytes))
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn to_code(&self) -> String {
        if self.is_none() {
            return "NONE".to_string();
        }
        String::from_utf8_lossy(&self.0.to_be_bytes())
            .trim_end()
            .to_string()
    }
}

impl fmt::Display for Idsz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_code())
    }
}

/// Ordered IDSZ → level table. Insertion order is kept so a re-encoded file
/// lists its skills in the order they were read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdszMap {
    entries: Vec<(Idsz, i32)>,
}

impl IdszMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or updates an entry. Returns `false` (and leaves the map untouched)
    /// when the code is none or the map is full.
    pub fn insert(&mut self, idsz: Idsz, level: i32) -> bool {
        if idsz.is_none() {
            return false;
        }

        if let Some(entry) = self.entries.iter_mut().find(|(code, _)| *code == idsz) {
            entry.1 = level;
            return true;
        }

        if self.entries.len() >= MAX_IDSZ_MAP_SIZE {
            log::warn!(
                "Skills map full ({} entries), dropping {} {}",
                MAX_IDSZ_MAP_SIZE,
                idsz,
                level
            );
            return false;
        }

        self.entries.push((idsz, level));
        true
    }

    pub fn get(&self, idsz: Idsz) -> Option<i32> {
        self.entries
            .iter()
            .find(|(code, _)| *code == idsz)
            .map(|(_, level)| *level)
    }

    pub fn contains(&self, idsz: Idsz) -> bool {
        self.get(idsz).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Idsz, i32)> + '_ {
        self.entries.iter().copied()
    }
}
