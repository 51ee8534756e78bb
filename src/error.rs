use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that can occur while encoding or decoding a blob footer.
///
/// Every variant is a recoverable, reportable condition: a caller that sees
/// one should treat the blob as carrying no usable metadata and decide for
/// itself whether to refuse the blob. The "no footer at all" case is
/// deliberately not an error; it is reported as an ordinary outcome through
/// `MetadataStatus::Absent`, since unversioned legacy blobs are expected
/// input.
#[derive(Debug)]
pub enum Error {
    /// The footer's payload-length field claims more payload bytes than can
    /// exist before the footer framing.
    CorruptFooter { payload_len: u64, limit: u64 },
    /// A fixed-size record field ended before its declared size.
    TruncatedRecord {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// A length-prefixed field declared more bytes than remain in the record.
    TruncatedField {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// The build-identity field held bytes that are not valid UTF-8.
    BadString(std::str::Utf8Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::CorruptFooter { payload_len, limit } => write!(
                f,
                "Corrupt footer: payload length {} exceeds the {} bytes before the footer framing",
                payload_len, limit
            ),
            Error::TruncatedRecord {
                step,
                actual,
                expected,
            } => write!(
                f,
                "Record ended early: expected {} bytes, but got {} on step [{}]",
                expected, actual, step
            ),
            Error::TruncatedField {
                step,
                actual,
                expected,
            } => write!(
                f,
                "Field ended early: expected {} bytes, but got {} on step [{}]",
                expected, actual, step
            ),
            Error::BadString(_) => f.write_str("Build identity is not valid UTF-8"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::BadString(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::BadString(e)
    }
}
