//! Builder for the `label : value` text files.

use std::fmt::{Display, Write as _};

use crate::idsz::Idsz;
use crate::string_operations::{encode_name, pad_label};
use crate::types::FloatRange;

const DEFAULT_LABEL_WIDTH: usize = 40;

pub fn format_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

/// `Display` for `f32` already prints the shortest text that parses back
/// to the same value.
pub fn format_float(value: f32) -> String {
    format!("{value}")
}

pub fn format_range(range: FloatRange) -> String {
    if range.is_single() {
        format_float(range.from)
    } else {
        format!("{}-{}", format_float(range.from), format_float(range.to))
    }
}

pub struct LabeledWriter {
    out: String,
    width: usize,
}

impl Default for LabeledWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LabeledWriter {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_LABEL_WIDTH)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            out: String::new(),
            width,
        }
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.out, "// {text}");
        self
    }

    /// A line written as is, such as a `$FILE_VERSION` tag.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn line(&mut self, label: &str, value: impl Display) -> &mut Self {
        let _ = writeln!(self.out, "{} : {}", pad_label(label, self.width), value);
        self
    }

    /// A line with several space separated values after one colon.
    pub fn values<I, T>(&mut self, label: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.line(label, joined)
    }

    pub fn int(&mut self, label: &str, value: i32) -> &mut Self {
        self.line(label, value)
    }

    pub fn float(&mut self, label: &str, value: f32) -> &mut Self {
        self.line(label, format_float(value))
    }

    pub fn bool(&mut self, label: &str, value: bool) -> &mut Self {
        self.line(label, format_bool(value))
    }

    pub fn char(&mut self, label: &str, value: char) -> &mut Self {
        self.line(label, value)
    }

    pub fn name(&mut self, label: &str, value: &str) -> &mut Self {
        self.line(label, encode_name(value))
    }

    pub fn idsz(&mut self, label: &str, value: Idsz) -> &mut Self {
        self.line(label, value)
    }

    pub fn range(&mut self, label: &str, value: FloatRange) -> &mut Self {
        self.line(label, format_range(value))
    }

    /// `: [IDSZ] value`
    pub fn expansion(&mut self, idsz: Idsz, value: impl Display) -> &mut Self {
        let _ = writeln!(self.out, ": {idsz} {value}");
        self
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}
