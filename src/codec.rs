//! Registry mapping a format tag to the decoder for its record body.
//!
//! The set is closed: new encodings are added to the table at build time,
//! never registered dynamically. A tag with no entry means the footer was
//! written by a build this crate has never heard of, and decoding stops
//! before a single body byte is interpreted.

use crate::error::Result;
use crate::record::{
    Metadata, MetadataV1_0, MetadataV2_0, MetadataV2_1, VERSION_1_0, VERSION_2_0, VERSION_2_1,
};
use crate::version::FormatTag;

/// Decodes one record body; the tag has already been consumed.
pub(crate) type DecodeFn = fn(&mut &[u8]) -> Result<Metadata>;

/// Every supported encoding, in the order they shipped. Each tag appears
/// exactly once.
static DECODERS: &[(FormatTag, DecodeFn)] = &[
    (VERSION_1_0, MetadataV1_0::decode),
    (VERSION_2_0, MetadataV2_0::decode),
    (VERSION_2_1, MetadataV2_1::decode),
];

/// The decoder registered for `tag`, if any.
pub(crate) fn decoder_for(tag: FormatTag) -> Option<DecodeFn> {
    DECODERS.iter().find(|(t, _)| *t == tag).map(|&(_, f)| f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shipped_tag_has_a_decoder() {
        for tag in [VERSION_1_0, VERSION_2_0, VERSION_2_1] {
            assert!(decoder_for(tag).is_some(), "no decoder for {}", tag);
        }
    }

    #[test]
    fn unknown_tags_have_none() {
        assert!(decoder_for(FormatTag::new(0, 0)).is_none());
        assert!(decoder_for(FormatTag::new(1, 1)).is_none());
        assert!(decoder_for(FormatTag::new(2, 2)).is_none());
        assert!(decoder_for(FormatTag::new(999, 0)).is_none());
    }

    #[test]
    fn no_duplicate_tags() {
        for (i, (a, _)) in DECODERS.iter().enumerate() {
            for (b, _) in &DECODERS[i + 1..] {
                assert_ne!(a, b, "tag {} registered twice", a);
            }
        }
    }
}
