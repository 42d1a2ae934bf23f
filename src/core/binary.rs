//! Compact binary encoding of log records
//!
//! Layout: `[type code, severity byte, STR(message), payload?]` where
//! `STR(s)` is `0x02`, one byte per character, `0x03`. The optional payload
//! starts with a tag byte:
//!
//! | tag    | payload                              |
//! |--------|--------------------------------------|
//! | `0xF1` | `STR(text)`                          |
//! | `0xF2` | one byte (integer, truncated)        |
//! | `0xF3` | one byte (float, truncated)          |
//! | `0xF4` | `STR(message) STR(source)`           |
//! | `0xF5` | `STR(object rendering)`              |
//!
//! Numeric values and characters are truncated to their low byte, so the
//! encoding is lossy outside the ASCII / `0..=255` range.

use super::log_data::LogData;
use super::log_record::LogRecord;

pub const STRING_START: u8 = 0x02;
pub const STRING_END: u8 = 0x03;

pub const TAG_TEXT: u8 = 0xF1;
pub const TAG_INTEGER: u8 = 0xF2;
pub const TAG_FLOAT: u8 = 0xF3;
pub const TAG_ERROR: u8 = 0xF4;
pub const TAG_OBJECT: u8 = 0xF5;

fn push_str(out: &mut Vec<u8>, s: &str) {
    out.push(STRING_START);
    out.extend(s.chars().map(|c| c as u32 as u8));
    out.push(STRING_END);
}

impl LogRecord {
    /// Encode this record with the tag-byte scheme described in
    /// [`crate::core::binary`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.message().len() + 8);
        out.push(self.log_type().code());
        out.push(self.severity() as u8);
        push_str(&mut out, self.message());

        match self.data() {
            None => {}
            Some(LogData::Text(text)) => {
                out.push(TAG_TEXT);
                push_str(&mut out, text);
            }
            Some(LogData::Integer(value)) => {
                out.push(TAG_INTEGER);
                out.push(*value as u8);
            }
            Some(LogData::Float(value)) => {
                out.push(TAG_FLOAT);
                // float-to-int casts saturate; the low byte is kept after that
                out.push(*value as i64 as u8);
            }
            Some(LogData::Error { message, source }) => {
                out.push(TAG_ERROR);
                push_str(&mut out, message);
                push_str(&mut out, source);
            }
            Some(LogData::Object(rendering)) => {
                out.push(TAG_OBJECT);
                push_str(&mut out, rendering);
            }
        }

        out
    }
}
