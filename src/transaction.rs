//! The UDP query transaction: pre-flight qname validation, transaction-id generation,
//! send/await/retry state machine, id matching. Grounded in the teacher's
//! `dnsquery/dnsrequest.rs` (send-then-recv over a connected socket) and `query.rs`'s
//! `rand`-based id generation, restructured per spec.md §4.5 into an explicit retry budget
//! shared across timeouts and id mismatches.
use std::io::ErrorKind;

use log::{debug, trace, warn};
use rand::Rng;

use crate::error::{DNSError, DNSResult};
use crate::message::{Message, Type};
use crate::name::Domain;
use crate::resolver::Resolver;

/// Largest UDP datagram this client expects to receive. No EDNS buffer advertisement is
/// sent (spec.md §4.3: no OPT by default), so there is no larger expected payload.
const RECV_BUFFER_SIZE: usize = 65535;

/// Rejects qnames that fail the syntactic pre-check (spec.md §4.5), before any parsing,
/// encoding, or I/O takes place.
fn validate_qname(qname: &str) -> DNSResult<()> {
    if qname.is_empty() {
        return Err(DNSError::IllegalDomain);
    }
    if !qname.contains('.') {
        return Err(DNSError::IllegalDomain);
    }
    if qname.contains(':') || qname.contains('/') {
        return Err(DNSError::IllegalDomain);
    }
    if qname.len() > 253 {
        return Err(DNSError::IllegalDomain);
    }
    if qname.split('.').any(|label| label.len() > 63) {
        return Err(DNSError::IllegalDomain);
    }
    Ok(())
}

fn generate_transaction_id() -> u16 {
    rand::thread_rng().gen_range(0..=u16::MAX)
}

/// Runs one query transaction per spec.md §4.5: validate, encode, then up to `retry`
/// send/await attempts. `ad` sets the AD bit on the outgoing query; it never attaches OPT.
pub fn transact(resolver: &mut Resolver, qname: &str, qtype: Type, ad: bool) -> DNSResult<Message> {
    validate_qname(qname)?;
    let domain = Domain::parse(qname)?;

    let id = generate_transaction_id();
    let query = Message::encode_query(id, &domain, qtype, ad)?;

    let mut saw_mismatch = false;
    let mut recv_buf = vec![0u8; RECV_BUFFER_SIZE];

    for attempt in 0..resolver.seed.retry {
        trace!("transaction {:04x} attempt {}: sending {} bytes", id, attempt, query.len());
        resolver.socket().send(&query)?;

        match resolver.socket().recv(&mut recv_buf) {
            Ok(n) => {
                let message = Message::decode_response(&recv_buf[..n])?;
                if message.header.id == id {
                    return Ok(message);
                }
                debug!(
                    "transaction {:04x} attempt {}: reply id {:04x} did not match",
                    id, attempt, message.header.id
                );
                saw_mismatch = true;
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                trace!("transaction {:04x} attempt {}: timed out", id, attempt);
            }
            Err(e) => return Err(DNSError::from(e)),
        }
    }

    if saw_mismatch {
        warn!("transaction {:04x}: exhausted retries with a mismatched reply seen", id);
        Err(DNSError::SequenceNumberMismatch)
    } else {
        warn!("transaction {:04x}: exhausted retries with no reply", id);
        Err(DNSError::TimeoutExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(validate_qname(""), Err(DNSError::IllegalDomain)));
    }

    #[test]
    fn rejects_missing_dot() {
        assert!(matches!(validate_qname("localhost"), Err(DNSError::IllegalDomain)));
    }

    #[test]
    fn rejects_colon_and_slash() {
        assert!(matches!(validate_qname("foo:bar.com"), Err(DNSError::IllegalDomain)));
        assert!(matches!(validate_qname("foo/bar.com"), Err(DNSError::IllegalDomain)));
    }

    #[test]
    fn rejects_oversize_total_length() {
        let long_label = "a".repeat(60);
        let qname = format!("{}.{}.{}.{}.com", long_label, long_label, long_label, long_label);
        assert!(qname.len() > 253);
        assert!(matches!(validate_qname(&qname), Err(DNSError::IllegalDomain)));
    }

    #[test]
    fn rejects_oversize_label() {
        let qname = format!("{}.com", "a".repeat(64));
        assert!(matches!(validate_qname(&qname), Err(DNSError::IllegalDomain)));
    }

    #[test]
    fn accepts_well_formed_qname() {
        assert!(validate_qname("www.example.com").is_ok());
    }
}
