//! DNS message codec: header, questions, resource records, RDATA per type, and the EDNS(0)
//! OPT pseudo-RR. Grounded in the teacher's `rfc1035.rs` (`DNSPacketHeader`, `DNSPacketFlags`,
//! `DNSQuestion`, `DNSResourceRecord`, the per-RDATA type aliases/structs, `OPT`/`OptTTL`) and
//! `network_order/primitive.rs` (the per-type `to_network_bytes`/`from_network_bytes` split),
//! reworked so RDATA is a closed Rust enum (spec.md §9 "sum types for RDATA") instead of the
//! teacher's `Vec<Box<dyn ToFromNetworkOrder>>`, and so all three RR sections are `Vec`s
//! (the teacher's `Option<DNSResourceRecord>` singular fields could not hold more than one
//! record, which the wire format explicitly allows).
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{DNSError, DNSResult};
use crate::name::Domain;
use crate::wire::{Decoder, Encoder};

/// RR TYPE, EDNS OPT included. Unknown codes round-trip as `Type::Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    A,
    Ns,
    Cname,
    Soa,
    Ptr,
    Mx,
    Txt,
    Aaaa,
    Srv,
    Dname,
    Opt,
    Unknown(u16),
}

impl Type {
    pub fn code(self) -> u16 {
        match self {
            Type::A => 1,
            Type::Ns => 2,
            Type::Cname => 5,
            Type::Soa => 6,
            Type::Ptr => 12,
            Type::Mx => 15,
            Type::Txt => 16,
            Type::Aaaa => 28,
            Type::Srv => 33,
            Type::Dname => 39,
            Type::Opt => 41,
            Type::Unknown(c) => c,
        }
    }

    pub fn from_code(code: u16) -> Type {
        match code {
            1 => Type::A,
            2 => Type::Ns,
            5 => Type::Cname,
            6 => Type::Soa,
            12 => Type::Ptr,
            15 => Type::Mx,
            16 => Type::Txt,
            28 => Type::Aaaa,
            33 => Type::Srv,
            39 => Type::Dname,
            41 => Type::Opt,
            other => Type::Unknown(other),
        }
    }
}

/// RR CLASS is hard-coded to IN on both encode and decode; CH/HS are not supported
/// (spec.md §9). Kept only as the constant written on the wire.
const CLASS_IN: u16 = 1;

/// 16-bit header flags, wire order high-bit-first (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: u8,
}

impl Flags {
    fn encode(&self, encoder: &mut Encoder) {
        let mut v: u16 = 0;
        v |= (self.qr as u16) << 15;
        v |= ((self.opcode & 0x0F) as u16) << 11;
        v |= (self.aa as u16) << 10;
        v |= (self.tc as u16) << 9;
        v |= (self.rd as u16) << 8;
        v |= (self.ra as u16) << 7;
        v |= (self.ad as u16) << 5;
        v |= (self.cd as u16) << 4;
        v |= (self.rcode & 0x0F) as u16;
        encoder.put_u16(v);
    }

    fn decode(decoder: &mut Decoder) -> DNSResult<Flags> {
        let v = decoder.get_u16()?;
        Ok(Flags {
            qr: (v >> 15) & 1 == 1,
            opcode: ((v >> 11) & 0x0F) as u8,
            aa: (v >> 10) & 1 == 1,
            tc: (v >> 9) & 1 == 1,
            rd: (v >> 8) & 1 == 1,
            ra: (v >> 7) & 1 == 1,
            ad: (v >> 5) & 1 == 1,
            cd: (v >> 4) & 1 == 1,
            rcode: (v & 0x0F) as u8,
        })
    }
}

/// `(identifier, flags, qdCount, anCount, nsCount, arCount)`. Counts are derived from
/// section lengths on encode and drive decoding on receive (spec.md invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.put_u16(self.id);
        self.flags.encode(encoder);
        encoder.put_u16(self.qd_count);
        encoder.put_u16(self.an_count);
        encoder.put_u16(self.ns_count);
        encoder.put_u16(self.ar_count);
    }

    fn decode(decoder: &mut Decoder) -> DNSResult<Header> {
        let id = decoder.get_u16()?;
        let flags = Flags::decode(decoder)?;
        let qd_count = decoder.get_u16()?;
        let an_count = decoder.get_u16()?;
        let ns_count = decoder.get_u16()?;
        let ar_count = decoder.get_u16()?;
        Ok(Header {
            id,
            flags,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        })
    }
}

/// `(qname, qtype, qclass=IN)`. qclass is consumed but not exposed on decode
/// (spec.md invariant 5).
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub qname: Domain,
    pub qtype: Type,
}

impl Question {
    fn encode(&self, encoder: &mut Encoder) {
        self.qname.encode(encoder);
        encoder.put_u16(self.qtype.code());
        encoder.put_u16(CLASS_IN);
    }

    fn decode(decoder: &mut Decoder) -> DNSResult<Question> {
        let qname = Domain::decode(decoder)?;
        let qtype = Type::from_code(decoder.get_u16()?);
        let _qclass = decoder.get_u16()?; // consumed, discarded
        Ok(Question { qname, qtype })
    }
}

/// Type-specific RDATA payload, keyed by TYPE. Unknown types carry raw bytes plus the
/// numeric type (spec.md §3/§9).
#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(Domain),
    Cname(Domain),
    Ptr(Domain),
    Dname(Domain),
    Mx {
        preference: u16,
        exchange: Domain,
    },
    Soa {
        mname: Domain,
        rname: Domain,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Domain,
    },
    /// Concatenation of all character-strings in the record, length bytes stripped.
    /// Boundary information between multiple strings is lost; see spec.md §9.
    Txt(Vec<u8>),
    Unknown {
        rtype: u16,
        data: Vec<u8>,
    },
}

impl RData {
    fn encode(&self, encoder: &mut Encoder) {
        match self {
            RData::A(addr) => encoder.put_bytes(&addr.octets()),
            RData::Aaaa(addr) => encoder.put_bytes(&addr.octets()),
            RData::Ns(d) | RData::Cname(d) | RData::Ptr(d) | RData::Dname(d) => d.encode(encoder),
            RData::Mx { preference, exchange } => {
                encoder.put_u16(*preference);
                exchange.encode(encoder);
            }
            RData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                mname.encode(encoder);
                rname.encode(encoder);
                encoder.put_u32(*serial);
                encoder.put_u32(*refresh);
                encoder.put_u32(*retry);
                encoder.put_u32(*expire);
                encoder.put_u32(*minimum);
            }
            RData::Srv {
                priority,
                weight,
                port,
                target,
            } => {
                encoder.put_u16(*priority);
                encoder.put_u16(*weight);
                encoder.put_u16(*port);
                target.encode(encoder);
            }
            RData::Txt(data) => {
                // re-chunk into 255-byte character-strings on the way out; the boundary
                // lost on decode (spec.md §9) need not match what a peer originally sent.
                for chunk in data.chunks(255) {
                    encoder.put_u8(chunk.len() as u8);
                    encoder.put_bytes(chunk);
                }
            }
            RData::Unknown { data, .. } => encoder.put_bytes(data),
        }
    }

    fn decode(decoder: &mut Decoder, rtype: Type, rdlen: usize) -> DNSResult<RData> {
        match rtype {
            Type::A => {
                let b = decoder.get_bytes(4)?;
                Ok(RData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3])))
            }
            Type::Aaaa => {
                let b = decoder.get_bytes(16)?;
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&b);
                Ok(RData::Aaaa(Ipv6Addr::from(octets)))
            }
            Type::Ns => Ok(RData::Ns(Domain::decode(decoder)?)),
            Type::Cname => Ok(RData::Cname(Domain::decode(decoder)?)),
            Type::Ptr => Ok(RData::Ptr(Domain::decode(decoder)?)),
            Type::Dname => Ok(RData::Dname(Domain::decode(decoder)?)),
            Type::Mx => {
                let preference = decoder.get_u16()?;
                let exchange = Domain::decode(decoder)?;
                Ok(RData::Mx { preference, exchange })
            }
            Type::Soa => {
                let mname = Domain::decode(decoder)?;
                let rname = Domain::decode(decoder)?;
                let serial = decoder.get_u32()?;
                let refresh = decoder.get_u32()?;
                let retry = decoder.get_u32()?;
                let expire = decoder.get_u32()?;
                let minimum = decoder.get_u32()?;
                Ok(RData::Soa {
                    mname,
                    rname,
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum,
                })
            }
            Type::Srv => {
                let priority = decoder.get_u16()?;
                let weight = decoder.get_u16()?;
                let port = decoder.get_u16()?;
                let target = Domain::decode(decoder)?;
                Ok(RData::Srv {
                    priority,
                    weight,
                    port,
                    target,
                })
            }
            Type::Txt => {
                let mut data = Vec::new();
                let mut consumed = 0usize;
                while consumed < rdlen {
                    let len = decoder.get_u8()? as usize;
                    consumed += 1;
                    if consumed + len > rdlen {
                        return Err(DNSError::FormatError);
                    }
                    data.extend(decoder.get_bytes(len)?);
                    consumed += len;
                }
                Ok(RData::Txt(data))
            }
            Type::Opt => unreachable!("OPT pseudo-RR is decoded by decode_record, not decode_rdata"),
            Type::Unknown(code) => Ok(RData::Unknown {
                rtype: code,
                data: decoder.get_bytes(rdlen)?,
            }),
        }
    }
}

/// A non-OPT resource record: `(name, type, ttl, rdata)`. `class` is consumed on decode but
/// not exposed (spec.md invariant 5); it is always written as IN on encode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub name: Domain,
    pub rtype: Type,
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    fn encode(&self, encoder: &mut Encoder) {
        self.name.encode(encoder);
        encoder.put_u16(self.rtype.code());
        encoder.put_u16(CLASS_IN);
        encoder.put_u32(self.ttl);

        let mut body = Encoder::new();
        self.rdata.encode(&mut body);
        let body = body.into_vec();

        encoder.put_u16(body.len() as u16);
        encoder.put_bytes(&body);
    }
}

/// `{code, length, payload}` EDNS option, e.g. Client Subnet (RFC7871).
#[derive(Debug, Clone, PartialEq)]
pub enum OData {
    ClientSubnet {
        family: u16,
        source_prefix: u8,
        scope_prefix: u8,
        address: Vec<u8>,
    },
    Unknown {
        code: u16,
        data: Vec<u8>,
    },
}

const OPT_CODE_CLIENT_SUBNET: u16 = 8;

impl OData {
    fn encode(&self, encoder: &mut Encoder) {
        match self {
            OData::ClientSubnet {
                family,
                source_prefix,
                scope_prefix,
                address,
            } => {
                encoder.put_u16(OPT_CODE_CLIENT_SUBNET);
                encoder.put_u16((4 + address.len()) as u16);
                encoder.put_u16(*family);
                encoder.put_u8(*source_prefix);
                encoder.put_u8(*scope_prefix);
                encoder.put_bytes(address);
            }
            OData::Unknown { code, data } => {
                encoder.put_u16(*code);
                encoder.put_u16(data.len() as u16);
                encoder.put_bytes(data);
            }
        }
    }
}

fn decode_odata(bytes: &[u8]) -> DNSResult<Vec<OData>> {
    let mut decoder = Decoder::new(bytes);
    let mut items = Vec::new();

    while decoder.remaining() > 0 {
        if decoder.remaining() < 4 {
            return Err(DNSError::FormatError);
        }
        let code = decoder.get_u16()?;
        let len = decoder.get_u16()? as usize;
        let payload = decoder.get_bytes(len)?;

        let item = if code == OPT_CODE_CLIENT_SUBNET {
            if payload.len() < 4 {
                return Err(DNSError::FormatError);
            }
            OData::ClientSubnet {
                family: u16::from_be_bytes([payload[0], payload[1]]),
                source_prefix: payload[2],
                scope_prefix: payload[3],
                address: payload[4..].to_vec(),
            }
        } else {
            OData::Unknown { code, data: payload }
        };
        items.push(item);
    }

    Ok(items)
}

/// EDNS(0) OPT pseudo-RR (RFC6891). Replaces the usual `(class, ttl)` fields with
/// `(udpPayloadSize, extendedRCODE, version, DO, Z)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptRecord {
    pub udp_payload_size: u16,
    pub extended_rcode: u8,
    pub version: u8,
    pub do_flag: bool,
    pub z: u16,
    pub options: Vec<OData>,
}

impl OptRecord {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.put_u8(0); // NAME: root
        encoder.put_u16(Type::Opt.code());
        encoder.put_u16(self.udp_payload_size);
        encoder.put_u8(self.extended_rcode);
        encoder.put_u8(self.version);

        let mut flags_word = self.z & 0x7FFF;
        if self.do_flag {
            flags_word |= 0x8000;
        }
        encoder.put_u16(flags_word);

        let mut body = Encoder::new();
        for opt in &self.options {
            opt.encode(&mut body);
        }
        let body = body.into_vec();
        encoder.put_u16(body.len() as u16);
        encoder.put_bytes(&body);
    }
}

/// An additional-section entry: either an ordinary resource record or the EDNS(0) OPT
/// pseudo-RR (spec.md §3: OPT "replaces" the usual class/ttl fields, so it cannot share
/// `ResourceRecord`'s shape).
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalEntry {
    Record(ResourceRecord),
    Opt(OptRecord),
}

enum DecodedRecord {
    Record(ResourceRecord),
    Opt(OptRecord),
}

fn decode_record(decoder: &mut Decoder) -> DNSResult<DecodedRecord> {
    let name = Domain::decode(decoder)?;
    let rtype_code = decoder.get_u16()?;
    let rtype = Type::from_code(rtype_code);

    if rtype == Type::Opt {
        let udp_payload_size = decoder.get_u16()?;
        let extended_rcode = decoder.get_u8()?;
        let version = decoder.get_u8()?;
        let flags_word = decoder.get_u16()?;
        let do_flag = flags_word & 0x8000 != 0;
        let z = flags_word & 0x7FFF;
        let rdlen = decoder.get_u16()? as usize;
        let opt_bytes = decoder.get_bytes(rdlen)?;
        let options = decode_odata(&opt_bytes)?;

        Ok(DecodedRecord::Opt(OptRecord {
            udp_payload_size,
            extended_rcode,
            version,
            do_flag,
            z,
            options,
        }))
    } else {
        let _class = decoder.get_u16()?; // consumed, discarded (spec.md invariant 5)
        let ttl = decoder.get_u32()?;
        let rdlen = decoder.get_u16()? as usize;
        let rdata_start = decoder.position();
        let rdata = RData::decode(decoder, rtype, rdlen)?;

        // A type whose natural decode doesn't consume exactly `rdlen` (a mismatched/
        // adversarial RR) would otherwise desync the cursor for every record after this
        // one; resync explicitly rather than trusting each variant's own consumption.
        let rdata_end = rdata_start + rdlen;
        if rdata_end > decoder.len() {
            return Err(DNSError::FormatError);
        }
        if decoder.position() != rdata_end {
            decoder.seek(rdata_end);
        }

        Ok(DecodedRecord::Record(ResourceRecord {
            name,
            rtype,
            ttl,
            rdata,
        }))
    }
}

/// `(header, questions, answers, authorities, additionals)`. All sections are ordered
/// sequences (spec.md §3).
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<AdditionalEntry>,
}

impl Message {
    /// Builds the single-question query `lookupRaw`/`lookupRawAD` send: `RD=1`, `QR=0`,
    /// `OPCODE=0`, `AD` set iff `ad` is true, all other flags clear, empty answer/authority/
    /// additional sections, no OPT appended by default (spec.md §4.3).
    pub fn new_query(id: u16, qname: Domain, qtype: Type, ad: bool) -> Message {
        Message {
            header: Header {
                id,
                flags: Flags {
                    qr: false,
                    opcode: 0,
                    rd: true,
                    ad,
                    ..Flags::default()
                },
                qd_count: 1,
                an_count: 0,
                ns_count: 0,
                ar_count: 0,
            },
            questions: vec![Question { qname, qtype }],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// As `new_query`, but with an EDNS(0) OPT record appended to the additional section.
    /// The core lookups never call this (spec.md §4.3: "no OPT/EDNS is appended by
    /// default"); it exists for callers building their own query, mirroring the teacher's
    /// `DnsQuery::opt: Option<OPT>` field.
    pub fn new_query_with_opt(id: u16, qname: Domain, qtype: Type, ad: bool, opt: OptRecord) -> Message {
        let mut msg = Self::new_query(id, qname, qtype, ad);
        msg.additionals.push(AdditionalEntry::Opt(opt));
        msg.header.ar_count = 1;
        msg
    }

    /// Builds and encodes a query in one step: the shape `lookup_raw`/`lookup_raw_ad` send.
    pub fn encode_query(id: u16, domain: &Domain, qtype: Type, ad: bool) -> DNSResult<Vec<u8>> {
        Ok(Self::new_query(id, domain.clone(), qtype, ad).encode())
    }

    /// As `encode_query`, with an EDNS(0) OPT record attached.
    pub fn encode_query_with_opt(id: u16, domain: &Domain, qtype: Type, ad: bool, opt: OptRecord) -> DNSResult<Vec<u8>> {
        Ok(Self::new_query_with_opt(id, domain.clone(), qtype, ad, opt).encode())
    }

    /// Encodes this message exactly as laid out: header counts reflect section lengths
    /// (spec.md invariant 1), regardless of what the `header` counts were set to.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoder = Encoder::new();

        let mut header = self.header;
        header.qd_count = self.questions.len() as u16;
        header.an_count = self.answers.len() as u16;
        header.ns_count = self.authorities.len() as u16;
        header.ar_count = self.additionals.len() as u16;
        header.encode(&mut encoder);

        for q in &self.questions {
            q.encode(&mut encoder);
        }
        for rr in &self.answers {
            rr.encode(&mut encoder);
        }
        for rr in &self.authorities {
            rr.encode(&mut encoder);
        }
        for entry in &self.additionals {
            match entry {
                AdditionalEntry::Record(rr) => rr.encode(&mut encoder),
                AdditionalEntry::Opt(opt) => opt.encode(&mut encoder),
            }
        }

        encoder.into_vec()
    }

    /// Decodes a full DNS message: header and counts, then `qdCount` questions, then
    /// `anCount`/`nsCount`/`arCount` resource records (spec.md §4.3).
    pub fn decode_response(bytes: &[u8]) -> DNSResult<Message> {
        let mut decoder = Decoder::new(bytes);
        let header = Header::decode(&mut decoder)?;

        let mut questions = Vec::with_capacity(header.qd_count as usize);
        for _ in 0..header.qd_count {
            questions.push(Question::decode(&mut decoder)?);
        }

        let mut answers = Vec::with_capacity(header.an_count as usize);
        for _ in 0..header.an_count {
            match decode_record(&mut decoder)? {
                DecodedRecord::Record(rr) => answers.push(rr),
                DecodedRecord::Opt(_) => return Err(DNSError::FormatError),
            }
        }

        let mut authorities = Vec::with_capacity(header.ns_count as usize);
        for _ in 0..header.ns_count {
            match decode_record(&mut decoder)? {
                DecodedRecord::Record(rr) => authorities.push(rr),
                DecodedRecord::Opt(_) => return Err(DNSError::FormatError),
            }
        }

        let mut additionals = Vec::with_capacity(header.ar_count as usize);
        for _ in 0..header.ar_count {
            additionals.push(match decode_record(&mut decoder)? {
                DecodedRecord::Record(rr) => AdditionalEntry::Record(rr),
                DecodedRecord::Opt(opt) => AdditionalEntry::Opt(opt),
            });
        }

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_round_trip() {
        let qname = Domain::parse("www.example.com").unwrap();
        let msg = Message::new_query(0x1234, qname.clone(), Type::A, false);
        let bytes = msg.encode();

        let decoded = Message::decode_response(&bytes).unwrap();
        assert_eq!(decoded.header.id, 0x1234);
        assert!(!decoded.header.flags.qr);
        assert_eq!(decoded.header.flags.opcode, 0);
        assert!(decoded.header.flags.rd);
        assert_eq!(decoded.questions.len(), 1);
        assert_eq!(decoded.questions[0].qname, qname);
        assert_eq!(decoded.questions[0].qtype, Type::A);
        assert_eq!(decoded.answers.len(), 0);
        assert_eq!(decoded.authorities.len(), 0);
        assert_eq!(decoded.additionals.len(), 0);
    }

    #[test]
    fn ad_flag_round_trips() {
        let qname = Domain::parse("example.com").unwrap();
        let msg = Message::new_query(1, qname, Type::A, true);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert!(decoded.header.flags.ad);
    }

    fn response_with_answer(rdata: RData, rtype: Type) -> Message {
        let qname = Domain::parse("example.com").unwrap();
        let mut msg = Message::new_query(7, qname.clone(), rtype, false);
        msg.header.flags.qr = true;
        msg.answers.push(ResourceRecord {
            name: qname,
            rtype,
            ttl: 300,
            rdata,
        });
        msg
    }

    #[test]
    fn a_record_round_trip() {
        let msg = response_with_answer(RData::A(Ipv4Addr::new(93, 184, 216, 34)), Type::A);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers.len(), 1);
        assert_eq!(decoded.answers[0].rdata, RData::A(Ipv4Addr::new(93, 184, 216, 34)));
    }

    #[test]
    fn aaaa_record_round_trip() {
        let addr = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1);
        let msg = response_with_answer(RData::Aaaa(addr), Type::Aaaa);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers[0].rdata, RData::Aaaa(addr));
    }

    #[test]
    fn mx_record_round_trip() {
        let exchange = Domain::parse("mail.example.com").unwrap();
        let rdata = RData::Mx {
            preference: 10,
            exchange: exchange.clone(),
        };
        let msg = response_with_answer(rdata.clone(), Type::Mx);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers[0].rdata, rdata);
    }

    #[test]
    fn soa_record_round_trip() {
        let rdata = RData::Soa {
            mname: Domain::parse("ns1.example.com").unwrap(),
            rname: Domain::parse("hostmaster.example.com").unwrap(),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 300,
        };
        let msg = response_with_answer(rdata.clone(), Type::Soa);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers[0].rdata, rdata);
    }

    #[test]
    fn srv_record_round_trip() {
        let rdata = RData::Srv {
            priority: 10,
            weight: 20,
            port: 5060,
            target: Domain::parse("sip.example.com").unwrap(),
        };
        let msg = response_with_answer(rdata.clone(), Type::Srv);
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers[0].rdata, rdata);
    }

    #[test]
    fn txt_record_concatenates_strings() {
        let mut msg = response_with_answer(RData::Txt(b"unused".to_vec()), Type::Txt);
        // hand-build a two-string TXT rdata to exercise the documented concatenation
        // limitation (spec.md §9): "v=spf1" + " -all" -> "v=spf1 -all"
        let mut body = Encoder::new();
        body.put_u8(6);
        body.put_bytes(b"v=spf1");
        body.put_u8(5);
        body.put_bytes(b" -all");
        let body = body.into_vec();

        msg.answers.clear();
        let mut rr_bytes = Encoder::new();
        let qname = Domain::parse("example.com").unwrap();
        qname.encode(&mut rr_bytes);
        rr_bytes.put_u16(Type::Txt.code());
        rr_bytes.put_u16(CLASS_IN);
        rr_bytes.put_u32(300);
        rr_bytes.put_u16(body.len() as u16);
        rr_bytes.put_bytes(&body);

        // splice the hand-built RR onto a header-only encode
        msg.header.an_count = 1;
        let mut full = Encoder::new();
        msg.header.encode(&mut full);
        msg.questions[0].encode(&mut full);
        full.put_bytes(rr_bytes.as_slice());

        let decoded = Message::decode_response(&full.into_vec()).unwrap();
        assert_eq!(decoded.answers[0].rdata, RData::Txt(b"v=spf1 -all".to_vec()));
    }

    #[test]
    fn opt_record_round_trip_with_client_subnet() {
        let qname = Domain::parse("example.com").unwrap();
        let mut msg = Message::new_query_with_opt(
            9,
            qname,
            Type::A,
            false,
            OptRecord {
                udp_payload_size: 4096,
                extended_rcode: 0,
                version: 0,
                do_flag: true,
                z: 0,
                options: vec![OData::ClientSubnet {
                    family: 1,
                    source_prefix: 24,
                    scope_prefix: 0,
                    address: vec![192, 0, 2, 0],
                }],
            },
        );
        msg.header.ar_count = 1;

        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.additionals.len(), 1);
        match &decoded.additionals[0] {
            AdditionalEntry::Opt(opt) => {
                assert_eq!(opt.udp_payload_size, 4096);
                assert!(opt.do_flag);
                assert_eq!(opt.options.len(), 1);
                assert_eq!(
                    opt.options[0],
                    OData::ClientSubnet {
                        family: 1,
                        source_prefix: 24,
                        scope_prefix: 0,
                        address: vec![192, 0, 2, 0]
                    }
                );
            }
            other => panic!("expected OPT, got {:?}", other),
        }
    }

    #[test]
    fn second_question_compressed_into_first_shares_domain() {
        // question 1 at offset 12: "example.com."; question 2's qname is a pointer to 12.
        let qname = Domain::parse("example.com").unwrap();
        let msg = Message {
            header: Header {
                id: 1,
                flags: Flags::default(),
                qd_count: 2,
                an_count: 0,
                ns_count: 0,
                ar_count: 0,
            },
            questions: vec![
                Question {
                    qname: qname.clone(),
                    qtype: Type::A,
                },
                Question {
                    qname: qname.clone(),
                    qtype: Type::Aaaa,
                },
            ],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        };

        // hand-encode so the second question is an actual compression pointer to offset 12,
        // rather than a second full copy of the labels.
        let mut encoder = Encoder::new();
        msg.header.encode(&mut encoder);
        let first_q_offset = encoder.len();
        assert_eq!(first_q_offset, 12);
        qname.encode(&mut encoder);
        encoder.put_u16(Type::A.code());
        encoder.put_u16(CLASS_IN);

        encoder.put_u8(0xC0);
        encoder.put_u8(first_q_offset as u8);
        encoder.put_u16(Type::Aaaa.code());
        encoder.put_u16(CLASS_IN);

        let decoded = Message::decode_response(&encoder.into_vec()).unwrap();
        assert_eq!(decoded.questions.len(), 2);
        assert_eq!(decoded.questions[0].qname, decoded.questions[1].qname);
    }

    #[test]
    fn unknown_type_round_trips_as_unknown() {
        let rdata = RData::Unknown {
            rtype: 9999,
            data: vec![1, 2, 3, 4],
        };
        let msg = response_with_answer(rdata.clone(), Type::Unknown(9999));
        let decoded = Message::decode_response(&msg.encode()).unwrap();
        assert_eq!(decoded.answers[0].rdata, rdata);
        assert_eq!(decoded.answers[0].rtype, Type::Unknown(9999));
    }

    #[test]
    fn truncated_message_is_format_error() {
        let qname = Domain::parse("example.com").unwrap();
        let msg = Message::new_query(1, qname, Type::A, false);
        let mut bytes = msg.encode();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(Message::decode_response(&bytes), Err(DNSError::FormatError)));
    }

    fn encode_raw_a_record(rdlen: u16, rdata: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::new();
        Domain::root().encode(&mut encoder);
        encoder.put_u16(Type::A.code());
        encoder.put_u16(CLASS_IN);
        encoder.put_u32(300);
        encoder.put_u16(rdlen);
        encoder.put_bytes(rdata);
        encoder.into_vec()
    }

    /// `rdlen` understates the 4 bytes `RData::decode` naturally reads for `A`; the cursor
    /// must land at `record_start + rdlen`, not wherever the natural read stopped.
    #[test]
    fn undersized_rdlen_resyncs_to_declared_length() {
        let mut bytes = encode_raw_a_record(2, &[1, 2, 3, 4]);
        bytes.push(0xAA); // sentinel just past the declared rdlen boundary

        let mut decoder = Decoder::new(&bytes);
        let record = decode_record(&mut decoder).unwrap();
        match record {
            DecodedRecord::Record(rr) => assert_eq!(rr.rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4))),
            DecodedRecord::Opt(_) => panic!("expected a plain record"),
        }

        assert_eq!(decoder.position(), bytes.len() - 1);
        assert_eq!(decoder.get_u8().unwrap(), 0xAA);
    }

    /// `rdlen` overstates the 4 bytes `RData::decode` naturally reads for `A`; the cursor
    /// must skip the extra declared padding rather than leave it to be misread as the
    /// start of the next record.
    #[test]
    fn oversized_rdlen_resyncs_past_padding() {
        let mut bytes = encode_raw_a_record(8, &[1, 2, 3, 4, 0, 0, 0, 0]);
        bytes.push(0xAA); // sentinel right after the declared rdlen boundary

        let mut decoder = Decoder::new(&bytes);
        let record = decode_record(&mut decoder).unwrap();
        match record {
            DecodedRecord::Record(rr) => assert_eq!(rr.rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4))),
            DecodedRecord::Opt(_) => panic!("expected a plain record"),
        }

        assert_eq!(decoder.position(), bytes.len() - 1);
        assert_eq!(decoder.get_u8().unwrap(), 0xAA);
    }

    /// A declared `rdlen` reaching past the end of the buffer is rejected outright instead
    /// of seeking to an out-of-range position.
    #[test]
    fn rdlen_past_end_of_buffer_is_format_error() {
        let bytes = encode_raw_a_record(4000, &[1, 2, 3, 4]);
        let mut decoder = Decoder::new(&bytes);
        assert!(matches!(decode_record(&mut decoder), Err(DNSError::FormatError)));
    }
}
