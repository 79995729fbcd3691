// Helper macros for reading little-endian values out of a byte slice.
// Callers check the remaining length first (see `ensure_available`).
macro_rules! read_u8 {
    ($bytes:expr, $offset:expr) => {{
        let val = $bytes[$offset];
        $offset += 1;
        val
    }};
}

macro_rules! read_u32 {
    ($bytes:expr, $offset:expr) => {{
        let val = u32::from_le_bytes([
            $bytes[$offset],
            $bytes[$offset + 1],
            $bytes[$offset + 2],
            $bytes[$offset + 3],
        ]);
        $offset += 4;
        val
    }};
}

macro_rules! read_f32 {
    ($bytes:expr, $offset:expr) => {{
        let val = f32::from_le_bytes([
            $bytes[$offset],
            $bytes[$offset + 1],
            $bytes[$offset + 2],
            $bytes[$offset + 3],
        ]);
        $offset += 4;
        val
    }};
}

use crate::error::{FormatError, Result};

/// Fails with `Truncated` unless `needed` bytes remain after `offset`.
pub fn ensure_available(
    bytes: &[u8],
    offset: usize,
    needed: usize,
    section: &'static str,
) -> Result<()> {
    let available = bytes.len().saturating_sub(offset);
    if available < needed {
        return Err(FormatError::Truncated {
            section,
            needed,
            available,
        });
    }
    Ok(())
}

/// Number of bytes `count` elements of `size` bytes occupy, or `None` on overflow.
pub fn section_len(count: usize, size: usize) -> Option<usize> {
    count.checked_mul(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8() {
        let bytes = [42u8, 100, 200];
        let mut offset = 0;

        assert_eq!(read_u8!(bytes, offset), 42);
        assert_eq!(offset, 1);
        assert_eq!(read_u8!(bytes, offset), 100);
        assert_eq!(read_u8!(bytes, offset), 200);
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_read_u32() {
        let bytes = [0x4D, 0x61, 0x70, 0x44, 0x01, 0x00, 0x00, 0x00];
        let mut offset = 0;

        assert_eq!(read_u32!(bytes, offset), 0x4470_614D);
        assert_eq!(read_u32!(bytes, offset), 1);
        assert_eq!(offset, 8);
    }

    #[test]
    fn test_read_f32() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-256.25f32).to_le_bytes());
        let mut offset = 0;

        assert_eq!(read_f32!(bytes, offset), 1.5);
        assert_eq!(read_f32!(bytes, offset), -256.25);
        assert_eq!(offset, 8);
    }

    #[test]
    fn ensure_available_reports_shortfall() {
        let bytes = [0u8; 6];
        assert!(ensure_available(&bytes, 2, 4, "header").is_ok());

        match ensure_available(&bytes, 4, 4, "header") {
            Err(FormatError::Truncated {
                section,
                needed,
                available,
            }) => {
                assert_eq!(section, "header");
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // offset past the end counts as nothing left
        assert!(ensure_available(&bytes, 10, 1, "header").is_err());
    }

    #[test]
    fn section_len_detects_overflow() {
        assert_eq!(section_len(10, 4), Some(40));
        assert_eq!(section_len(usize::MAX, 4), None);
    }
}
