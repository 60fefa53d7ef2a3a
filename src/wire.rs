//! Wire primitives: big-endian integer get/put, a cursor with absolute position, and the
//! name-decompression pointer cache. Grounded in the teacher's
//! `network_order/primitive.rs` (byteorder-based `ToFromNetworkOrder` impls for `u8`/`u16`/
//! `u32`) and `rfc1035.rs::DomainName::from_position` (the cursor-plus-pointer-cache shape),
//! reworked per spec.md §9 into a pull-based decoder over a flat byte slice instead of a
//! streaming abstraction.
use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{DNSError, DNSResult};
use crate::name::Domain;

/// Top two bits of a length octet that mark it as a compression pointer rather than a label
/// length (RFC1035 §4.1.4).
const POINTER_MASK: u8 = 0xC0;

pub fn is_pointer(b: u8) -> bool {
    b & POINTER_MASK == POINTER_MASK
}

/// Decoder state: the full input bytes, a cursor (absolute byte offset), and the pointer
/// cache mapping absolute offset -> already-decoded domain suffix.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    pointer_cache: HashMap<u16, Domain>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Decoder {
            bytes,
            pos: 0,
            pointer_cache: HashMap::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    fn require(&self, n: usize) -> DNSResult<()> {
        if self.remaining() < n {
            Err(DNSError::FormatError)
        } else {
            Ok(())
        }
    }

    pub fn get_u8(&mut self) -> DNSResult<u8> {
        self.require(1)?;
        let v = self.bytes[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn get_u16(&mut self) -> DNSResult<u16> {
        self.require(2)?;
        let v = BigEndian::read_u16(&self.bytes[self.pos..self.pos + 2]);
        self.pos += 2;
        Ok(v)
    }

    pub fn get_u32(&mut self) -> DNSResult<u32> {
        self.require(4)?;
        let v = BigEndian::read_u32(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(v)
    }

    /// Returns a copy of `n` bytes starting at the cursor and advances it.
    pub fn get_bytes(&mut self, n: usize) -> DNSResult<Vec<u8>> {
        self.require(n)?;
        let v = self.bytes[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(v)
    }

    /// Looks up an already-decoded name suffix by absolute offset.
    pub fn pop(&self, offset: u16) -> Option<&Domain> {
        self.pointer_cache.get(&offset)
    }

    /// Records the decoded suffix starting at `offset` so later pointers to it resolve in
    /// one step. Called for every name seen, pointer-reached or not (spec.md §4.1/§9).
    pub fn push(&mut self, offset: u16, domain: Domain) {
        self.pointer_cache.entry(offset).or_insert(domain);
    }
}

/// Growable output buffer with matching put operations. Grounded in the teacher's
/// `to_network_bytes(&self, v: &mut Vec<u8>)` convention.
#[derive(Debug, Default)]
pub struct Encoder(Vec<u8>);

impl Encoder {
    pub fn new() -> Self {
        Encoder(Vec::new())
    }

    pub fn put_u8(&mut self, v: u8) {
        self.0.push(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, v);
        self.0.extend_from_slice(&buf);
    }

    pub fn put_u32(&mut self, v: u32) {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, v);
        self.0.extend_from_slice(&buf);
    }

    pub fn put_bytes(&mut self, v: &[u8]) {
        self.0.extend_from_slice(v);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_put_u8() {
        let mut e = Encoder::new();
        e.put_u8(0xFF);
        assert_eq!(e.as_slice(), &[0xFF]);

        let mut d = Decoder::new(&[0xFF]);
        assert_eq!(d.get_u8().unwrap(), 0xFF);
    }

    #[test]
    fn get_put_u16() {
        let mut e = Encoder::new();
        e.put_u16(0x1234);
        assert_eq!(e.as_slice(), &[0x12, 0x34]);

        let mut d = Decoder::new(&[0x12, 0x34]);
        assert_eq!(d.get_u16().unwrap(), 0x1234);
    }

    #[test]
    fn get_put_u32() {
        let mut e = Encoder::new();
        e.put_u32(0x12345678);
        assert_eq!(e.as_slice(), &[0x12, 0x34, 0x56, 0x78]);

        let mut d = Decoder::new(&[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(d.get_u32().unwrap(), 0x12345678);
    }

    #[test]
    fn short_read_is_format_error() {
        let mut d = Decoder::new(&[0x12]);
        assert!(matches!(d.get_u16(), Err(DNSError::FormatError)));
    }

    #[test]
    fn is_pointer_detects_top_bits() {
        assert!(is_pointer(0xC0));
        assert!(is_pointer(0xFF));
        assert!(!is_pointer(0x3F));
        assert!(!is_pointer(0x00));
    }
}
