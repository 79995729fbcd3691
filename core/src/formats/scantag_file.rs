//! scancode.txt: one `NAME CLASS VALUE` entry per line

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{FormatError, Result};
use crate::types::{ScanTag, ScanTagTable, TagClass};

/// Reads every well-formed entry; malformed lines are logged and skipped.
pub fn decode(data: &[u8]) -> ScanTagTable {
    let text = String::from_utf8_lossy(data);
    let mut tags = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.split("//").next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let name = fields.next();
        let class = fields
            .next()
            .and_then(|c| c.chars().next())
            .and_then(TagClass::from_letter);
        let value = fields.next().and_then(|v| v.parse::<u32>().ok());

        match (name, class, value) {
            (Some(name), Some(class), Some(value)) => tags.push(ScanTag::new(name, class, value)),
            _ => log::warn!("Skipping malformed scan tag on line {}: '{line}'", number + 1),
        }
    }

    ScanTagTable::new(tags)
}

pub fn encode(table: &ScanTagTable) -> String {
    let mut out = String::from("// name class value\n");
    for tag in table.iter() {
        let _ = writeln!(out, "{:<24} {} {}", tag.name, tag.class.letter(), tag.value);
    }
    out
}

pub fn load(path: impl AsRef<Path>) -> Result<ScanTagTable> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let table = decode(&data);
    log::debug!("Loaded {} scan tags from {}", table.len(), path.display());
    Ok(table)
}
