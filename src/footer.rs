//! The blob footer entry points: stamping new blobs and reading stamped
//! ones. External collaborators go through this module only.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::codec;
use crate::error::Result;
use crate::locate::locate_footer;
use crate::record::{Metadata, MetadataV2_1, CURRENT_VERSION};
use crate::version::FormatTag;
use crate::MAGIC_BYTES;

/// Outcome of reading metadata out of a blob buffer.
///
/// `Absent` and `UnknownVersion` are expected outcomes, not errors: a blob
/// without a footer is a legacy blob, and a footer written by an encoding
/// this build does not recognize still frames a loadable blob. In both
/// cases there is simply no compatibility information to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataStatus {
    /// A structurally valid record was decoded.
    Found(Metadata),
    /// The buffer carries no footer at all.
    Absent,
    /// A footer is present, but its tag is not a registered encoding.
    UnknownVersion(FormatTag),
}

/// Build the complete footer for a payload of `payload_len` bytes: the
/// current-version record, then the payload length, then the magic marker.
/// The caller concatenates this after the payload bytes; the payload itself
/// is never touched.
pub fn write_footer(payload_len: u64, build_identity: &str) -> Vec<u8> {
    let created_unix_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let record = Metadata::V2_1(MetadataV2_1::new(build_identity, created_unix_secs));

    let mut out = Vec::new();
    record.encode(&mut out);
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(MAGIC_BYTES);
    out
}

/// Stamp an owned payload in place, appending the footer for its current
/// length.
pub fn append_footer(payload: &mut Vec<u8>, build_identity: &str) {
    let footer = write_footer(payload.len() as u64, build_identity);
    payload.extend_from_slice(&footer);
}

/// Read the metadata record out of `blob`, if one is present and decodable.
///
/// Errors carry the structural failures (`CorruptFooter`, truncation, bad
/// identity text); the expected "nothing usable here" cases come back as
/// [`MetadataStatus::Absent`] and [`MetadataStatus::UnknownVersion`].
pub fn read_metadata(blob: &[u8]) -> Result<MetadataStatus> {
    let bounds = match locate_footer(blob)? {
        Some(bounds) => bounds,
        None => return Ok(MetadataStatus::Absent),
    };

    let mut record = &blob[bounds.record];
    let tag = FormatTag::read(&mut record)?;
    match codec::decoder_for(tag) {
        Some(decode) => Ok(MetadataStatus::Found(decode(&mut record)?)),
        None => {
            warn!(
                found = %tag,
                current = %CURRENT_VERSION,
                "blob footer uses an unrecognized encoding"
            );
            Ok(MetadataStatus::UnknownVersion(tag))
        }
    }
}

/// Whether `blob` was produced by the running build.
///
/// `false` for every outcome short of a decoded record whose identity
/// matches: no footer, unknown encoding, corrupt framing, truncated record,
/// or a mismatched identity.
pub fn is_blob_compatible(blob: &[u8], running_build: &str) -> bool {
    match read_metadata(blob) {
        Ok(MetadataStatus::Found(meta)) => meta.is_compatible(running_build),
        _ => false,
    }
}

/// The payload portion of `blob`: everything before the footer, or the whole
/// buffer when no footer is present.
pub fn payload_of(blob: &[u8]) -> Result<&[u8]> {
    match locate_footer(blob)? {
        Some(bounds) => Ok(&blob[..bounds.payload_len as usize]),
        None => Ok(blob),
    }
}
