//! Display method: as we can't impl the Display trait outside the module where it's defined,
//! use a wrapper.
use std::fmt;

use dnslib::message::{Message, RData};

pub struct DisplayWrapper<'a, T>(pub &'a T);

impl fmt::Display for DisplayWrapper<'_, RData> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RData::A(addr) => write!(f, "{}", addr),
            RData::Aaaa(addr) => write!(f, "{}", addr),
            RData::Ns(d) | RData::Cname(d) | RData::Ptr(d) | RData::Dname(d) => write!(f, "{}", d),
            RData::Mx { preference, exchange } => write!(f, "preference:{} exchange:{}", preference, exchange),
            RData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "mname:{} rname:{} serial:{} refresh:{} retry:{} expire:{} minimum:{}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            RData::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "priority:{} weight:{} port:{} target:{}", priority, weight, port, target),
            RData::Txt(data) => write!(f, "\"{}\"", String::from_utf8_lossy(data)),
            RData::Unknown { rtype, data } => write!(f, "TYPE{}: {} bytes", rtype, data.len()),
        }
    }
}

impl fmt::Display for DisplayWrapper<'_, Message> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.0;
        writeln!(
            f,
            "id:{:04x} rcode:{} qd:{} an:{} ns:{} ar:{}",
            msg.header.id,
            msg.header.flags.rcode,
            msg.questions.len(),
            msg.answers.len(),
            msg.authorities.len(),
            msg.additionals.len()
        )?;
        for rr in &msg.answers {
            writeln!(f, "{}\t{:?}\tttl={}\t{}", rr.name, rr.rtype, rr.ttl, DisplayWrapper(&rr.rdata))?;
        }
        Ok(())
    }
}
