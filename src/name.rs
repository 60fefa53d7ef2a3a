//! DNS domain name codec: label sequences with compression-pointer decompression.
//! Grounded in the teacher's `rfc1035.rs::DomainName`/`LabelType`/`CharacterString` and
//! `TryFrom<&str>`/`Display` impls, restructured around `wire::Decoder`'s pointer cache
//! instead of the teacher's cache-less recursive re-walk (spec.md §4.2/§9).
use std::fmt;

use crate::error::{DNSError, DNSResult};
use crate::wire::{is_pointer, Decoder, Encoder};

/// A DNS domain name: an ordered sequence of labels, each 1..=63 arbitrary octets, implicitly
/// terminated by the root label. `Domain::root()` is the empty sequence (displayed as `.`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domain {
    labels: Vec<Vec<u8>>,
}

impl Domain {
    pub fn root() -> Self {
        Domain { labels: Vec::new() }
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    /// Length of the wire encoding: every label's length byte plus its bytes, plus the
    /// terminating zero. Used to enforce the 255-octet cap (spec.md invariant).
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Parses the dot-joined external representation (an optional trailing `.` is ignored,
    /// as is any other empty label produced by consecutive dots).
    pub fn parse(s: &str) -> DNSResult<Domain> {
        if s.is_empty() {
            return Err(DNSError::FormatError);
        }

        let labels: Vec<Vec<u8>> = if s == "." {
            Vec::new()
        } else {
            s.split('.')
                .filter(|l| !l.is_empty())
                .map(|l| l.as_bytes().to_vec())
                .collect()
        };

        for label in &labels {
            if label.is_empty() || label.len() > 63 {
                return Err(DNSError::FormatError);
            }
        }

        let domain = Domain { labels };
        if domain.encoded_len() > 255 {
            return Err(DNSError::FormatError);
        }

        Ok(domain)
    }

    /// Decodes one domain name starting at the decoder's current position, following at
    /// most one compression pointer (recorded suffixes let deeper pointers resolve in a
    /// single hop, per spec.md §9). Every starting offset seen -- whether reached directly
    /// or via a pointer -- is recorded in the decoder's pointer cache so later references
    /// resolve without re-walking raw bytes.
    pub fn decode(decoder: &mut Decoder) -> DNSResult<Domain> {
        Self::decode_inner(decoder, 0)
    }

    fn decode_inner(decoder: &mut Decoder, depth: usize) -> DNSResult<Domain> {
        // 128 labels is already far beyond the 255-octet cap; this just keeps the recursion
        // itself bounded before the length check below ever gets a chance to fire.
        if depth > 128 {
            return Err(DNSError::FormatError);
        }

        let start = decoder.position();
        let c = decoder.get_u8()?;

        let domain = if c == 0 {
            Domain::root()
        } else if is_pointer(c) {
            let d = decoder.get_u8()?;
            let offset = (((c & 0x3F) as u16) << 8) | d as u16;
            match decoder.pop(offset) {
                Some(cached) => cached.clone(),
                // Pointers point strictly backward to an already-decoded suffix; an
                // uncached target is either adversarial (a forward/self pointer) or out
                // of range, and is rejected rather than re-walked.
                None => return Err(DNSError::FormatError),
            }
        } else if c & 0xC0 != 0 {
            // top bits 01 or 10: reserved, not a label length nor a pointer
            return Err(DNSError::FormatError);
        } else {
            let len = c as usize;
            let label = decoder.get_bytes(len)?;
            let rest = Self::decode_inner(decoder, depth + 1)?;

            let mut labels = Vec::with_capacity(1 + rest.labels.len());
            labels.push(label);
            labels.extend(rest.labels);
            Domain { labels }
        };

        if domain.encoded_len() > 255 {
            return Err(DNSError::FormatError);
        }

        if start <= u16::MAX as usize {
            decoder.push(start as u16, domain.clone());
        }

        Ok(domain)
    }

    /// Encodes as a plain (uncompressed) label sequence terminated by a zero byte.
    /// Compression is never performed on encode (spec.md §4.2: not required for correctness).
    pub fn encode(&self, encoder: &mut Encoder) {
        for label in &self.labels {
            encoder.put_u8(label.len() as u8);
            encoder.put_bytes(label);
        }
        encoder.put_u8(0);
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for label in &self.labels {
            write!(f, "{}.", String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Domain {
    type Error = DNSError;

    fn try_from(s: &str) -> DNSResult<Self> {
        Domain::parse(s)
    }
}
