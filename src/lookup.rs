//! The public lookup API: `lookup_raw`/`lookup_raw_ad` run one transaction; `lookup`/
//! `lookup_auth` additionally map the RCODE and project a section down to the RDATA values
//! of the queried type. Grounded in the teacher's `dnsquery/dnsquery.rs` (the top-level
//! send-decode-display flow), restructured per spec.md §4.6.
use crate::error::{rcode_to_error, DNSError, DNSResult};
use crate::message::{AdditionalEntry, Message, RData, Type};
use crate::resolver::Resolver;
use crate::transaction::transact;

/// Runs one transaction for `domain`/`qtype`, RD=1, AD=0. Returns the raw decoded message
/// regardless of RCODE (spec.md §4.6).
pub fn lookup_raw(resolver: &mut Resolver, domain: &str, qtype: Type) -> DNSResult<Message> {
    transact(resolver, domain, qtype, false)
}

/// As `lookup_raw`, with the AD bit set on the outgoing query.
pub fn lookup_raw_ad(resolver: &mut Resolver, domain: &str, qtype: Type) -> DNSResult<Message> {
    transact(resolver, domain, qtype, true)
}

/// Projects `records` down to the RDATA of those whose type equals `qtype`, preserving
/// wire order. Name filtering is deliberately not performed (spec.md §4.6).
fn project(records: &[crate::message::ResourceRecord], qtype: Type) -> Vec<RData> {
    records
        .iter()
        .filter(|rr| rr.rtype == qtype)
        .map(|rr| rr.rdata.clone())
        .collect()
}

/// Maps `message`'s RCODE to a `DNSError`, folding in the OPT pseudo-RR's extended RCODE
/// byte per RFC 6891 §6.1.3: the 12-bit code is `(extendedRCODE << 4) | header.rcode`, and
/// 16 (BADVERS/BADSIG) can only ever be seen this way since the header alone carries just 4
/// bits (spec.md §7).
fn classify_rcode(message: &Message) -> Option<DNSError> {
    let extended_rcode = message.additionals.iter().find_map(|entry| match entry {
        AdditionalEntry::Opt(opt) => Some(opt.extended_rcode),
        AdditionalEntry::Record(_) => None,
    });

    if let Some(extended_rcode) = extended_rcode {
        let full_rcode = ((extended_rcode as u16) << 4) | message.header.flags.rcode as u16;
        if full_rcode == 16 {
            return Some(DNSError::BadOptRecord);
        }
    }

    rcode_to_error(message.header.flags.rcode)
}

/// `lookup_raw`, then: map a non-zero RCODE to `DNSError` (no result), else project the
/// answer section to the RDATA values whose type equals `qtype` (spec.md §4.6, §7).
pub fn lookup(resolver: &mut Resolver, domain: &str, qtype: Type) -> DNSResult<Vec<RData>> {
    let message = lookup_raw(resolver, domain, qtype)?;
    if let Some(err) = classify_rcode(&message) {
        return Err(err);
    }
    Ok(project(&message.answers, qtype))
}

/// As `lookup`, but projects the authority section instead of the answer section.
pub fn lookup_auth(resolver: &mut Resolver, domain: &str, qtype: Type) -> DNSResult<Vec<RData>> {
    let message = lookup_raw(resolver, domain, qtype)?;
    if let Some(err) = classify_rcode(&message) {
        return Err(err);
    }
    Ok(project(&message.authorities, qtype))
}
