use std::fmt;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifies which encoding a metadata record uses.
///
/// The tag is the one piece of the footer that never evolves: two
/// little-endian u32 values, major then minor, decodable before any
/// variant-specific logic runs. Tags are totally ordered by
/// (major, minor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormatTag {
    pub major: u32,
    pub minor: u32,
}

impl FormatTag {
    /// Byte length of an encoded tag.
    pub const LEN: usize = 8;

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Read a tag from the front of `buf`, advancing it.
    pub fn read(buf: &mut &[u8]) -> Result<Self> {
        let major = read_u32(buf, "read tag major")?;
        let minor = read_u32(buf, "read tag minor")?;
        Ok(Self { major, minor })
    }

    /// Append the encoded tag to `out`.
    pub fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.major.to_le_bytes());
        out.extend_from_slice(&self.minor.to_le_bytes());
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A length-prefixed build-identity string: 4-byte LE length, then that many
/// bytes of text.
///
/// The stored length always equals the byte length of the text. The bytes
/// pass through unaltered in both directions; decoding only checks that they
/// are valid UTF-8.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildIdentity(String);

impl BuildIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append the encoded field to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.0.len() as u32).to_le_bytes());
        out.extend_from_slice(self.0.as_bytes());
    }

    /// Read the field from the front of `buf`, advancing it. Fails if the
    /// declared length exceeds the bytes remaining.
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        if buf.len() < 4 {
            return Err(Error::TruncatedField {
                step: "read identity length",
                actual: buf.len(),
                expected: 4,
            });
        }
        let len = buf.read_u32::<LittleEndian>().unwrap() as usize; // Checked just above
        if buf.len() < len {
            return Err(Error::TruncatedField {
                step: "read identity text",
                actual: buf.len(),
                expected: len,
            });
        }
        let (text, rest) = buf.split_at(len);
        *buf = rest;
        Ok(Self(std::str::from_utf8(text)?.to_string()))
    }
}

impl fmt::Display for BuildIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn read_u32(buf: &mut &[u8], step: &'static str) -> Result<u32> {
    if buf.len() < 4 {
        return Err(Error::TruncatedRecord {
            step,
            actual: buf.len(),
            expected: 4,
        });
    }
    Ok(buf.read_u32::<LittleEndian>().unwrap()) // Checked just above
}

pub(crate) fn read_u64(buf: &mut &[u8], step: &'static str) -> Result<u64> {
    if buf.len() < 8 {
        return Err(Error::TruncatedRecord {
            step,
            actual: buf.len(),
            expected: 8,
        });
    }
    Ok(buf.read_u64::<LittleEndian>().unwrap()) // Checked just above
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ordering() {
        assert!(FormatTag::new(1, 0) < FormatTag::new(1, 1));
        assert!(FormatTag::new(1, 9) < FormatTag::new(2, 0));
        assert_eq!(FormatTag::new(2, 1), FormatTag::new(2, 1));
    }

    #[test]
    fn tag_round_trip() {
        let tag = FormatTag::new(3, 7);
        let mut out = Vec::new();
        tag.write(&mut out);
        assert_eq!(out.len(), FormatTag::LEN);

        let mut buf = out.as_slice();
        assert_eq!(FormatTag::read(&mut buf).unwrap(), tag);
        assert!(buf.is_empty());
    }

    #[test]
    fn tag_fixed_byte_order() {
        // major then minor, both LE. This layout is frozen.
        let mut out = Vec::new();
        FormatTag::new(1, 2).write(&mut out);
        assert_eq!(out, [1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn tag_truncated() {
        let mut buf = &[1u8, 0, 0, 0, 2][..];
        let err = FormatTag::read(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedRecord {
                step: "read tag minor",
                actual: 1,
                expected: 4,
            }
        ));
    }

    #[test]
    fn identity_round_trip() {
        let id = BuildIdentity::new("2024.4.0-gamma");
        let mut out = Vec::new();
        id.encode(&mut out);
        assert_eq!(out.len(), 4 + "2024.4.0-gamma".len());

        let mut buf = out.as_slice();
        let decoded = BuildIdentity::decode(&mut buf).unwrap();
        assert_eq!(decoded, id);
        assert_eq!(decoded.as_str(), "2024.4.0-gamma");
        assert!(buf.is_empty());
    }

    #[test]
    fn identity_declared_longer_than_remaining() {
        let mut out = Vec::new();
        out.extend_from_slice(&100u32.to_le_bytes());
        out.extend_from_slice(b"short");

        let mut buf = out.as_slice();
        let err = BuildIdentity::decode(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedField {
                step: "read identity text",
                actual: 5,
                expected: 100,
            }
        ));
    }

    #[test]
    fn identity_missing_length_prefix() {
        let mut buf = &[1u8, 2][..];
        assert!(matches!(
            BuildIdentity::decode(&mut buf).unwrap_err(),
            Error::TruncatedField {
                step: "read identity length",
                ..
            }
        ));
    }

    #[test]
    fn identity_rejects_invalid_utf8() {
        let mut out = Vec::new();
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&[0xff, 0xfe]);

        let mut buf = out.as_slice();
        assert!(matches!(
            BuildIdentity::decode(&mut buf).unwrap_err(),
            Error::BadString(_)
        ));
    }

    #[test]
    fn identity_leaves_trailing_bytes() {
        let mut out = Vec::new();
        BuildIdentity::new("abc").encode(&mut out);
        out.extend_from_slice(&[9, 9, 9]);

        let mut buf = out.as_slice();
        BuildIdentity::decode(&mut buf).unwrap();
        assert_eq!(buf, [9, 9, 9]);
    }
}
