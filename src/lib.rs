//! Versioned trailing metadata for precompiled artifact blobs.
//!
//! A compiler that produces an opaque, precompiled artifact ("blob") can
//! stamp it with a small footer recording which build produced it. A loader
//! can then decide, without recompiling, whether the artifact matches the
//! running build, or learn that it cannot know, because the blob predates
//! stamping, or was stamped by an encoding this build has never heard of.
//!
//! The footer sits at the very end of the buffer so it can be found by
//! scanning backward from the tail, with no knowledge of the payload:
//!
//! ```text
//! [ payload | record: tag + fields | payload_len: u64 | magic marker ]
//! ```
//!
//! Reading never assumes the footer is well formed. A missing marker is an
//! ordinary [`MetadataStatus::Absent`], an unrecognized tag is
//! [`MetadataStatus::UnknownVersion`], and framing that contradicts the
//! buffer size is a recoverable [`Error::CorruptFooter`]. Payload bytes are
//! never read as footer fields and never mutated, no matter how mangled the
//! input is.
//!
//! ```
//! use tailstamp::{append_footer, is_blob_compatible, read_metadata, MetadataStatus};
//!
//! let mut blob = vec![0u8; 100];
//! append_footer(&mut blob, "1.0.0-test");
//!
//! assert!(is_blob_compatible(&blob, "1.0.0-test"));
//! assert!(!is_blob_compatible(&blob, "2.0.0-test"));
//!
//! match read_metadata(&blob)? {
//!     MetadataStatus::Found(meta) => assert_eq!(meta.build_identity(), "1.0.0-test"),
//!     other => panic!("expected metadata, got {:?}", other),
//! }
//! # Ok::<(), tailstamp::Error>(())
//! ```

mod codec;
mod container;
mod error;
mod footer;
mod locate;
mod record;
mod version;

pub use self::container::{BlobContainer, MappedBlob, OwnedBlob};
pub use self::error::{Error, Result};
pub use self::footer::{
    append_footer, is_blob_compatible, payload_of, read_metadata, write_footer, MetadataStatus,
};
pub use self::locate::{locate_footer, FooterBounds};
pub use self::record::{
    Metadata, MetadataV1_0, MetadataV2_0, MetadataV2_1, CURRENT_VERSION, VERSION_1_0, VERSION_2_0,
    VERSION_2_1,
};
pub use self::version::{BuildIdentity, FormatTag};

/// Marker bytes closing every stamped blob. Fixed and versionless: presence
/// detection has to work before any version-specific parsing is attempted,
/// because the version tag lives inside the record the marker frames.
pub const MAGIC_BYTES: &[u8; 8] = b"TSTAMP!?";

/// Bytes of footer framing after the record: the payload-length field plus
/// the magic marker. The smallest buffer that can hold any footer at all.
pub const FOOTER_FRAMING_LEN: usize = MAGIC_BYTES.len() + 8;
