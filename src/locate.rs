//! Locates the footer by scanning backward from the end of a blob.
//!
//! Presence detection is version-agnostic and runs first: the version tag
//! lives *inside* the record bytes, so the locator only trusts the fixed
//! magic marker and the payload-length field, and validates both against
//! the buffer bounds before anything dereferences an offset.

use std::convert::TryInto;
use std::ops::Range;

use tracing::debug;

use crate::error::{Error, Result};
use crate::{FOOTER_FRAMING_LEN, MAGIC_BYTES};

/// Where a footer's pieces sit within a blob buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterBounds {
    /// Absolute offset where the payload ends and the metadata record
    /// begins. Also the payload's byte length, since the payload starts the
    /// buffer.
    pub payload_len: u64,
    /// Byte range of the metadata record within the blob.
    pub record: Range<usize>,
}

/// Find the footer in `blob`, if one is present.
///
/// `Ok(None)` means the buffer is an unversioned legacy blob: too small to
/// hold a footer, or not ending in the magic marker. That is an expected
/// outcome, not an error. `Err(CorruptFooter)` means the marker is present
/// but the payload-length field contradicts the buffer size.
pub fn locate_footer(blob: &[u8]) -> Result<Option<FooterBounds>> {
    if blob.len() < FOOTER_FRAMING_LEN {
        return Ok(None);
    }

    let magic_at = blob.len() - MAGIC_BYTES.len();
    if &blob[magic_at..] != MAGIC_BYTES {
        return Ok(None);
    }

    let len_at = magic_at - 8;
    let payload_len = u64::from_le_bytes(blob[len_at..magic_at].try_into().unwrap()); // 8 bytes by construction

    // The record sits between the payload and the framing, so the payload
    // can claim at most every byte before the length field.
    let limit = len_at as u64;
    if payload_len > limit {
        return Err(Error::CorruptFooter { payload_len, limit });
    }

    let record = payload_len as usize..len_at; // payload_len <= len_at, lossless
    debug!(payload_len, record_len = record.len(), "located blob footer");
    Ok(Some(FooterBounds {
        payload_len,
        record,
    }))
}
