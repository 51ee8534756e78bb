//! Ownership wrappers for the bytes a blob lives in.
//!
//! The reading core only needs a byte-addressable view of a fully
//! materialized buffer. These wrappers supply that view for the two ways
//! loaders actually hold blobs: an owned vector, or a shared memory-mapped
//! region whose useful bytes sit between a leading header and the trailing
//! metadata.

use std::sync::Arc;

use memmap2::Mmap;

/// A read-only container of blob bytes with a known total length.
pub trait BlobContainer {
    /// The blob's bytes.
    fn as_bytes(&self) -> &[u8];

    /// Number of bytes in the blob.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Drop the backing memory if this container owns it. Returns whether
    /// anything was actually released; the container is empty afterwards
    /// only if it returns `true`.
    fn release_from_memory(&mut self) -> bool;
}

/// A blob held in an owned, heap-allocated vector.
#[derive(Debug, Default)]
pub struct OwnedBlob {
    bytes: Vec<u8>,
}

impl OwnedBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl BlobContainer for OwnedBlob {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn release_from_memory(&mut self) -> bool {
        self.bytes.clear();
        self.bytes.shrink_to_fit();
        true
    }
}

/// A blob inside a shared memory-mapped file, with `header_offset` bytes of
/// enclosing-container header before it and `metadata_size` bytes of footer
/// after it.
///
/// The mapping is shared with whoever else holds the `Arc`, so the memory
/// cannot be released from here.
#[derive(Debug)]
pub struct MappedBlob {
    map: Arc<Mmap>,
    header_offset: usize,
    metadata_size: usize,
}

impl MappedBlob {
    /// `header_offset + metadata_size` must not exceed the mapping's length.
    pub fn new(map: Arc<Mmap>, header_offset: usize, metadata_size: usize) -> Self {
        debug_assert!(header_offset + metadata_size <= map.len());
        Self {
            map,
            header_offset,
            metadata_size,
        }
    }
}

impl BlobContainer for MappedBlob {
    fn as_bytes(&self) -> &[u8] {
        &self.map[self.header_offset..self.map.len() - self.metadata_size]
    }

    fn release_from_memory(&mut self) -> bool {
        false
    }
}
