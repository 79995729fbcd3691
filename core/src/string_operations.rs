/// Names are stored as single tokens on disk: underscores stand for spaces,
/// and a backslash makes the next character literal (`\:`, `\/`, `\\`).
pub fn decode_name(token: &str) -> String {
    let mut name = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    name.push(escaped);
                }
            }
            '_' => name.push(' '),
            c => name.push(c),
        }
    }
    name
}

pub fn encode_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "*NONE*".to_string();
    }

    let mut token = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            ':' | '/' | '\\' => {
                token.push('\\');
                token.push(c);
            }
            c if c.is_whitespace() => token.push('_'),
            c => token.push(c),
        }
    }
    token
}

/// Reverses [`encode_name`]'s placeholder for empty names.
pub fn decode_optional_name(token: &str) -> String {
    if token == "*NONE*" {
        String::new()
    } else {
        decode_name(token)
    }
}

/// Pads a label to `width` columns so the colons of consecutive lines align.
pub fn pad_label(label: &str, width: usize) -> String {
    format!("{label:<width$}")
}
