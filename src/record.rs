//! Metadata record variants, one per supported footer encoding.
//!
//! Evolution is strictly additive: within a major version, a minor bump may
//! only append fields after all previously-defined ones, and its decoder
//! reads the superset. Moving or resizing an earlier field requires a new
//! major version.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::version::{read_u64, BuildIdentity, FormatTag};

/// The first shipped encoding: a bare build identity.
pub const VERSION_1_0: FormatTag = FormatTag::new(1, 0);
/// 2.0 put a reserved field ahead of the identity.
pub const VERSION_2_0: FormatTag = FormatTag::new(2, 0);
/// 2.1 appended a stamping timestamp after 2.0's fields.
pub const VERSION_2_1: FormatTag = FormatTag::new(2, 1);
/// The encoding written for newly stamped blobs.
pub const CURRENT_VERSION: FormatTag = VERSION_2_1;

/// Record body of a 1.0 footer: just the build identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV1_0 {
    identity: BuildIdentity,
}

impl MetadataV1_0 {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: BuildIdentity::new(identity),
        }
    }

    pub(crate) fn decode(buf: &mut &[u8]) -> Result<Metadata> {
        Ok(Metadata::V1_0(Self {
            identity: BuildIdentity::decode(buf)?,
        }))
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        self.identity.encode(out);
    }
}

/// Record body of a 2.0 footer: a reserved field, then the build identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV2_0 {
    reserved: u64,
    identity: BuildIdentity,
}

impl MetadataV2_0 {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            reserved: 0,
            identity: BuildIdentity::new(identity),
        }
    }

    /// Reserved bits; written as zero, preserved verbatim on read.
    pub fn reserved(&self) -> u64 {
        self.reserved
    }

    pub(crate) fn decode(buf: &mut &[u8]) -> Result<Metadata> {
        Ok(Metadata::V2_0(Self {
            reserved: read_u64(buf, "read reserved field")?,
            identity: BuildIdentity::decode(buf)?,
        }))
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_le_bytes());
        self.identity.encode(out);
    }
}

/// Record body of a 2.1 footer: 2.0's fields, then the seconds since the
/// Unix epoch at which the footer was written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataV2_1 {
    reserved: u64,
    identity: BuildIdentity,
    created_unix_secs: u64,
}

impl MetadataV2_1 {
    pub fn new(identity: impl Into<String>, created_unix_secs: u64) -> Self {
        Self {
            reserved: 0,
            identity: BuildIdentity::new(identity),
            created_unix_secs,
        }
    }

    /// Reserved bits; written as zero, preserved verbatim on read.
    pub fn reserved(&self) -> u64 {
        self.reserved
    }

    /// Seconds since the Unix epoch when the footer was written.
    pub fn created_unix_secs(&self) -> u64 {
        self.created_unix_secs
    }

    pub(crate) fn decode(buf: &mut &[u8]) -> Result<Metadata> {
        Ok(Metadata::V2_1(Self {
            reserved: read_u64(buf, "read reserved field")?,
            identity: BuildIdentity::decode(buf)?,
            created_unix_secs: read_u64(buf, "read stamping time")?,
        }))
    }

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.reserved.to_le_bytes());
        self.identity.encode(out);
        out.extend_from_slice(&self.created_unix_secs.to_le_bytes());
    }
}

/// A decoded metadata record. The set of variants is closed: every
/// registered tag maps to exactly one of these, and anything else is
/// reported as an unknown version before any body bytes are touched.
///
/// Records are immutable once constructed; a reader builds one, queries
/// compatibility, and discards it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metadata {
    V1_0(MetadataV1_0),
    V2_0(MetadataV2_0),
    V2_1(MetadataV2_1),
}

impl Metadata {
    /// The tag this record serializes under.
    pub fn tag(&self) -> FormatTag {
        match *self {
            Metadata::V1_0(_) => VERSION_1_0,
            Metadata::V2_0(_) => VERSION_2_0,
            Metadata::V2_1(_) => VERSION_2_1,
        }
    }

    /// The build identity stored in the record.
    pub fn build_identity(&self) -> &str {
        match *self {
            Metadata::V1_0(ref m) => m.identity.as_str(),
            Metadata::V2_0(ref m) => m.identity.as_str(),
            Metadata::V2_1(ref m) => m.identity.as_str(),
        }
    }

    /// Append the full record to `out`: tag first, then the variant's
    /// fields in their fixed order.
    pub fn encode(&self, out: &mut Vec<u8>) {
        self.tag().write(out);
        match *self {
            Metadata::V1_0(ref m) => m.encode_body(out),
            Metadata::V2_0(ref m) => m.encode_body(out),
            Metadata::V2_1(ref m) => m.encode_body(out),
        }
    }

    /// Whether a blob carrying this record can be loaded by the running
    /// build. Exact identity match required.
    pub fn is_compatible(&self, running_build: &str) -> bool {
        if self.build_identity() == running_build {
            return true;
        }
        warn!(
            stored = %self.build_identity(),
            running = %running_build,
            "blob was produced by a different build"
        );
        version_check_disabled()
    }
}

/// Developer escape hatch: lets a mismatched build identity pass anyway.
/// Compiled in only for non-production builds, and still off unless the
/// environment flag holds a truthy value.
#[cfg(any(debug_assertions, feature = "developer-build"))]
fn version_check_disabled() -> bool {
    matches!(
        std::env::var("TAILSTAMP_DISABLE_VERSION_CHECK").as_deref(),
        Ok("1") | Ok("true") | Ok("on") | Ok("yes")
    )
}

#[cfg(not(any(debug_assertions, feature = "developer-build")))]
fn version_check_disabled() -> bool {
    false
}
