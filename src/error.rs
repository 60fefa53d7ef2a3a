//! A dedicated error for all possible errors in DNS queries: I/O, DNS packet inconsistencies,
//! RCODE projections, and pre-flight domain validation.
use std::fmt;
use std::io;
use std::str;

/// The taxonomy of DNS-level failures a lookup can surface, plus the two outer cases
/// (`Io`, `Utf8`) that come from the transport and the name codec.
#[derive(Debug)]
pub enum DNSError {
    /// One or more replies arrived but none carried the expected transaction id.
    SequenceNumberMismatch,
    /// No reply arrived within `retry * timeout`.
    TimeoutExpired,
    /// Server returned RCODE 1, or the decoder rejected a malformed message.
    FormatError,
    /// Server returned RCODE 2.
    ServerFailure,
    /// Server returned RCODE 3 (NXDOMAIN).
    NameError,
    /// Server returned RCODE 4.
    NotImplemented,
    /// Server returned RCODE 5.
    OperationRefused,
    /// Server returned RCODE 16 (BADVERS/BADSIG).
    BadOptRecord,
    /// Pre-flight rejection of a syntactically invalid qname.
    IllegalDomain,
    /// Socket I/O error. Bubbles up as-is and is not retried by the core.
    Io(io::Error),
    /// A label failed UTF-8 decoding.
    Utf8(str::Utf8Error),
}

/// A specific custom `Result` for all functions in this crate.
pub type DNSResult<T> = Result<T, DNSError>;

impl fmt::Display for DNSError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DNSError::SequenceNumberMismatch => write!(f, "reply id did not match the query id"),
            DNSError::TimeoutExpired => write!(f, "no reply received within the retry budget"),
            DNSError::FormatError => write!(f, "malformed DNS message"),
            DNSError::ServerFailure => write!(f, "server failure (RCODE 2)"),
            DNSError::NameError => write!(f, "name error / NXDOMAIN (RCODE 3)"),
            DNSError::NotImplemented => write!(f, "not implemented (RCODE 4)"),
            DNSError::OperationRefused => write!(f, "operation refused (RCODE 5)"),
            DNSError::BadOptRecord => write!(f, "bad OPT record (RCODE 16)"),
            DNSError::IllegalDomain => write!(f, "syntactically invalid domain name"),
            DNSError::Io(e) => write!(f, "I/O error: {}", e),
            DNSError::Utf8(e) => write!(f, "UTF-8 error: {}", e),
        }
    }
}

impl std::error::Error for DNSError {}

impl From<io::Error> for DNSError {
    fn from(err: io::Error) -> Self {
        DNSError::Io(err)
    }
}

impl From<str::Utf8Error> for DNSError {
    fn from(err: str::Utf8Error) -> Self {
        DNSError::Utf8(err)
    }
}

/// Maps a response RCODE to the error taxonomy of §7. Exhaustive and injective on the six
/// mapped codes; any other value is treated as `FormatError` since this client does not
/// interpret the extended DNSSEC/TSIG codes.
pub fn rcode_to_error(rcode: u8) -> Option<DNSError> {
    match rcode {
        0 => None,
        1 => Some(DNSError::FormatError),
        2 => Some(DNSError::ServerFailure),
        3 => Some(DNSError::NameError),
        4 => Some(DNSError::NotImplemented),
        5 => Some(DNSError::OperationRefused),
        16 => Some(DNSError::BadOptRecord),
        _ => Some(DNSError::FormatError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rcode_mapping_is_exhaustive_on_noerr() {
        assert!(rcode_to_error(0).is_none());
    }

    #[test]
    fn rcode_mapping_table() {
        assert!(matches!(rcode_to_error(1), Some(DNSError::FormatError)));
        assert!(matches!(rcode_to_error(2), Some(DNSError::ServerFailure)));
        assert!(matches!(rcode_to_error(3), Some(DNSError::NameError)));
        assert!(matches!(rcode_to_error(4), Some(DNSError::NotImplemented)));
        assert!(matches!(rcode_to_error(5), Some(DNSError::OperationRefused)));
        assert!(matches!(rcode_to_error(16), Some(DNSError::BadOptRecord)));
    }
}
