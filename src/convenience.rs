//! Type-specific convenience lookups: thin projections over `lookup` that downcast `RData`
//! to the matching Rust type. Out of scope for the core per spec.md §1 ("each is a trivial
//! projection from the generic lookup"), specified only at this interface; grounded in the
//! way the teacher's `dnsquery/display.rs::display_data` already matches on `QType` to pick
//! apart a specific RDATA shape.
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::DNSResult;
use crate::message::{RData, Type};
use crate::name::Domain;
use crate::resolver::Resolver;

fn downcast<T>(values: Vec<RData>, f: impl Fn(RData) -> Option<T>) -> Vec<T> {
    values.into_iter().filter_map(f).collect()
}

pub fn lookup_a(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Ipv4Addr>> {
    let values = crate::lookup::lookup(resolver, domain, Type::A)?;
    Ok(downcast(values, |r| match r {
        RData::A(addr) => Some(addr),
        _ => None,
    }))
}

pub fn lookup_aaaa(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Ipv6Addr>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Aaaa)?;
    Ok(downcast(values, |r| match r {
        RData::Aaaa(addr) => Some(addr),
        _ => None,
    }))
}

pub fn lookup_ns(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Domain>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Ns)?;
    Ok(downcast(values, |r| match r {
        RData::Ns(d) => Some(d),
        _ => None,
    }))
}

pub fn lookup_cname(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Domain>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Cname)?;
    Ok(downcast(values, |r| match r {
        RData::Cname(d) => Some(d),
        _ => None,
    }))
}

pub fn lookup_ptr(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Domain>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Ptr)?;
    Ok(downcast(values, |r| match r {
        RData::Ptr(d) => Some(d),
        _ => None,
    }))
}

/// `(preference, exchange)` pairs, preserving wire order.
pub fn lookup_mx(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<(u16, Domain)>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Mx)?;
    Ok(downcast(values, |r| match r {
        RData::Mx { preference, exchange } => Some((preference, exchange)),
        _ => None,
    }))
}

/// Each concatenated TXT blob (spec.md §9 boundary-loss caveat), one per record.
pub fn lookup_txt(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<Vec<u8>>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Txt)?;
    Ok(downcast(values, |r| match r {
        RData::Txt(data) => Some(data),
        _ => None,
    }))
}

/// `(priority, weight, port, target)` tuples, preserving wire order.
pub fn lookup_srv(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<(u16, u16, u16, Domain)>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Srv)?;
    Ok(downcast(values, |r| match r {
        RData::Srv {
            priority,
            weight,
            port,
            target,
        } => Some((priority, weight, port, target)),
        _ => None,
    }))
}

/// `(mname, rname, serial, refresh, retry, expire, minimum)` tuples.
pub fn lookup_soa(resolver: &mut Resolver, domain: &str) -> DNSResult<Vec<(Domain, Domain, u32, u32, u32, u32, u32)>> {
    let values = crate::lookup::lookup(resolver, domain, Type::Soa)?;
    Ok(downcast(values, |r| match r {
        RData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => Some((mname, rname, serial, refresh, retry, expire, minimum)),
        _ => None,
    }))
}
