//! Token scanner shared by every text format.
//!
//! The files are line oriented: a free-form label, a colon, then one or more
//! tokens. `//` starts a comment that runs to the end of the line, and `\:`
//! is a colon that does not delimit a field. The `read_*` primitives skip
//! blanks and comments, then read one token; when no token of the wanted kind
//! is there they return a default (`0`, `false`, empty) without failing.
//! Only [`TokenScanner::skip_to_colon`] with `optional == false` is fatal.

use crate::error::{FormatError, Result};
use crate::idsz::Idsz;
use crate::types::{DamageType, FloatRange};

pub struct TokenScanner<'a> {
    data: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> TokenScanner<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            line: 1,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// 1-based line of the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// True when only blanks and comments remain.
    pub fn is_eof(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.data.len()
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.data.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn restore(&mut self, pos: usize, line: usize) {
        self.pos = pos;
        self.line = line;
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some(b'/') && self.peek_at(1) == Some(b'/')
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == b'\n' {
                break;
            }
        }
    }

    /// Skips ASCII whitespace and comments.
    pub fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.at_comment() => self.skip_comment(),
                _ => break,
            }
        }
    }

    /// Skips spaces and tabs only, staying on the current line.
    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(b'\r')) {
            self.bump();
        }
    }

    /// Advances past the next unescaped colon outside a comment.
    ///
    /// Returns `Ok(true)` when one was found. At end of input the result is
    /// `Ok(false)` if `optional`, otherwise a `MissingDelimiter` error naming
    /// `context`.
    pub fn skip_to_colon(&mut self, optional: bool, context: &str) -> Result<bool> {
        loop {
            if self.at_comment() {
                self.skip_comment();
                continue;
            }

            match self.bump() {
                Some(b':') => return Ok(true),
                Some(b'\\') => {
                    self.bump();
                }
                Some(_) => {}
                None if optional => return Ok(false),
                None => {
                    return Err(FormatError::MissingDelimiter {
                        line: self.line,
                        context: context.to_string(),
                    });
                }
            }
        }
    }

    /// Like [`skip_to_colon`](Self::skip_to_colon), but gives up at the end
    /// of the current line. On `false` the cursor is at the start of the next
    /// line.
    pub fn skip_to_colon_on_line(&mut self) -> bool {
        loop {
            if self.at_comment() {
                self.skip_comment();
                return false;
            }

            match self.bump() {
                Some(b':') => return true,
                Some(b'\\') if self.peek() != Some(b'\n') => {
                    self.bump();
                }
                Some(b'\n') | None => return false,
                Some(_) => {}
            }
        }
    }

    fn take_while(&mut self, mut accept: impl FnMut(u8, usize) -> bool) -> &'a [u8] {
        let data = self.data;
        let start = self.pos;
        let mut index = 0;
        while let Some(c) = self.peek() {
            if !accept(c, index) {
                break;
            }
            self.bump();
            index += 1;
        }
        &data[start..self.pos]
    }

    pub fn read_int(&mut self) -> i32 {
        self.skip_whitespace();
        let (pos, line) = (self.pos, self.line);

        let sign = self.take_while(|c, i| i == 0 && (c == b'-' || c == b'+'));
        let negative = sign == b"-";
        let digits = self.take_while(|c, _| c.is_ascii_digit());
        if digits.is_empty() {
            self.restore(pos, line);
            return 0;
        }

        let magnitude = digits
            .iter()
            .fold(0i64, |acc, d| (acc * 10 + (d - b'0') as i64).min(i64::from(u32::MAX)));
        let value = if negative { -magnitude } else { magnitude };
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    pub fn read_float(&mut self) -> f32 {
        self.skip_whitespace();
        let (pos, line) = (self.pos, self.line);
        let start = self.pos;

        self.take_while(|c, i| i == 0 && (c == b'-' || c == b'+'));
        let whole = self.take_while(|c, _| c.is_ascii_digit()).len();
        let mut fraction = 0;
        if self.peek() == Some(b'.') {
            self.bump();
            fraction = self.take_while(|c, _| c.is_ascii_digit()).len();
        }
        if whole + fraction == 0 {
            self.restore(pos, line);
            return 0.0;
        }

        // exponent only when digits follow it
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let exp_sign = matches!(self.peek_at(1), Some(b'-') | Some(b'+'));
            let digit_at = if exp_sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.bump();
                }
                self.take_while(|c, _| c.is_ascii_digit());
            }
        }

        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<f32>().ok())
            .unwrap_or(0.0)
    }

    /// `T`/`F` words or a number (non-zero is true).
    pub fn read_bool(&mut self) -> bool {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c.eq_ignore_ascii_case(&b'T') => {
                self.take_while(|c, _| c.is_ascii_alphanumeric());
                true
            }
            Some(c) if c.eq_ignore_ascii_case(&b'F') => {
                self.take_while(|c, _| c.is_ascii_alphanumeric());
                false
            }
            Some(c) if c.is_ascii_digit() || c == b'-' || c == b'+' => self.read_int() != 0,
            _ => false,
        }
    }

    /// First non-blank character.
    pub fn read_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.bump().map(char::from)
    }

    /// A run of non-blank characters, stopping at a colon or a comment.
    /// Escape pairs such as `\:` are kept as written.
    pub fn read_name(&mut self) -> String {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b':' || self.at_comment() {
                break;
            }
            self.bump();
            if c == b'\\' && self.peek().is_some_and(|next| !next.is_ascii_whitespace()) {
                self.bump();
            }
        }
        String::from_utf8_lossy(&self.data[start..self.pos]).into_owned()
    }

    /// `[ABCD]`; a missing bracket or `[NONE]` gives [`Idsz::NONE`].
    pub fn read_idsz(&mut self) -> Idsz {
        self.skip_whitespace();
        if self.peek() != Some(b'[') {
            return Idsz::NONE;
        }
        self.bump();

        let code = self.take_while(|c, _| c != b']' && !c.is_ascii_whitespace());
        let code = String::from_utf8_lossy(code).into_owned();
        if self.peek() == Some(b']') {
            self.bump();
        }
        Idsz::from_str_code(&code)
    }

    /// `a` or `a-b`. A single value gives the range `a..a`.
    pub fn read_range(&mut self) -> FloatRange {
        let from = self.read_float();

        let (pos, line) = (self.pos, self.line);
        self.skip_blanks();
        if self.peek() == Some(b'-') {
            self.bump();
            let to = self.read_float();
            return FloatRange::new(from, to);
        }

        self.restore(pos, line);
        FloatRange::single(from)
    }

    pub fn read_damage_type(&mut self) -> Option<DamageType> {
        self.read_char().and_then(DamageType::from_letter)
    }

    /// Remainder of the current line with any comment removed, trimmed.
    pub fn read_string(&mut self) -> String {
        self.skip_blanks();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'\n' || self.at_comment() {
                break;
            }
            self.bump();
        }
        String::from_utf8_lossy(&self.data[start..self.pos])
            .trim()
            .to_string()
    }

    /// Reads `$FILE_VERSION n` at the cursor. Leaves the cursor alone when the
    /// tag is not there.
    pub fn read_version_tag(&mut self) -> Option<i32> {
        let (pos, line) = (self.pos, self.line);
        self.skip_whitespace();
        if self.peek() == Some(b'$') {
            let tag = self.read_name();
            if tag.eq_ignore_ascii_case("$FILE_VERSION") {
                return Some(self.read_int());
            }
        }
        self.restore(pos, line);
        None
    }

    pub fn next_int(&mut self, context: &str) -> Result<i32> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_int())
    }

    pub fn next_float(&mut self, context: &str) -> Result<f32> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_float())
    }

    pub fn next_bool(&mut self, context: &str) -> Result<bool> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_bool())
    }

    pub fn next_char(&mut self, context: &str) -> Result<Option<char>> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_char())
    }

    pub fn next_name(&mut self, context: &str) -> Result<String> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_name())
    }

    pub fn next_idsz(&mut self, context: &str) -> Result<Idsz> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_idsz())
    }

    pub fn next_range(&mut self, context: &str) -> Result<FloatRange> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_range())
    }

    pub fn next_damage_type(&mut self, context: &str) -> Result<Option<DamageType>> {
        self.skip_to_colon(false, context)?;
        Ok(self.read_damage_type())
    }
}
