//! Exercises the developer escape hatch. This lives in its own integration
//! binary so the environment flag set here cannot leak into any other test
//! process.

use tailstamp::{
    append_footer, is_blob_compatible, read_metadata, FormatTag, MetadataStatus, MAGIC_BYTES,
};

const FLAG: &str = "TAILSTAMP_DISABLE_VERSION_CHECK";

#[test]
fn override_bypasses_identity_mismatch_and_nothing_else() {
    let mut blob = b"compiled payload".to_vec();
    append_footer(&mut blob, "build-A");

    std::env::remove_var(FLAG);
    assert!(is_blob_compatible(&blob, "build-A"));
    assert!(!is_blob_compatible(&blob, "build-B"));

    std::env::set_var(FLAG, "1");
    assert!(is_blob_compatible(&blob, "build-B"));
    assert!(is_blob_compatible(&blob, "build-A"));

    // The flag never conjures metadata out of a blob that has none.
    assert_eq!(read_metadata(b" ELF").unwrap(), MetadataStatus::Absent);
    assert!(!is_blob_compatible(b" ELF", "build-B"));

    // Nor does it bypass corrupt framing.
    let mut corrupt = blob.clone();
    let len_at = corrupt.len() - MAGIC_BYTES.len() - 8;
    corrupt[len_at..len_at + 8].copy_from_slice(&u64::MAX.to_le_bytes());
    assert!(!is_blob_compatible(&corrupt, "build-B"));

    // Nor an unrecognized encoding.
    let mut unknown = b"payload".to_vec();
    let payload_len = unknown.len() as u64;
    FormatTag::new(999, 0).write(&mut unknown);
    unknown.extend_from_slice(&payload_len.to_le_bytes());
    unknown.extend_from_slice(MAGIC_BYTES);
    assert!(!is_blob_compatible(&unknown, "build-B"));

    // Non-truthy values leave the check on.
    std::env::set_var(FLAG, "0");
    assert!(!is_blob_compatible(&blob, "build-B"));

    std::env::remove_var(FLAG);
    assert!(!is_blob_compatible(&blob, "build-B"));
}
