//! Manage command line arguments here.
use std::net::IpAddr;
use std::time::Duration;

use clap::{App, Arg};

use dnslib::error::{DNSError, DNSResult};
use dnslib::message::Type;

/// This structure holds the command line arguments.
#[derive(Debug)]
pub struct CliOptions {
    pub qtype: Type,
    pub ns: IpAddr,
    pub port: u16,
    pub domain: String,
    pub timeout: Duration,
    pub retry: u8,
    pub ad: bool,
    pub debug: bool,
}

fn parse_qtype(s: &str) -> DNSResult<Type> {
    Ok(match s.to_uppercase().as_str() {
        "A" => Type::A,
        "NS" => Type::Ns,
        "CNAME" => Type::Cname,
        "SOA" => Type::Soa,
        "PTR" => Type::Ptr,
        "MX" => Type::Mx,
        "TXT" => Type::Txt,
        "AAAA" => Type::Aaaa,
        "SRV" => Type::Srv,
        "DNAME" => Type::Dname,
        other => match other.parse::<u16>() {
            Ok(code) => Type::Unknown(code),
            Err(_) => return Err(DNSError::FormatError),
        },
    })
}

impl CliOptions {
    pub fn options() -> DNSResult<Self> {
        let matches = App::new("DNS query tool")
            .version("0.2")
            .about("A simple stub DNS query client")
            .arg(
                Arg::new("qtype")
                    .short('q')
                    .long("qtype")
                    .required(true)
                    .long_help("Resource record type to query (A, AAAA, NS, CNAME, MX, TXT, SRV, SOA, PTR, DNAME, or a numeric TYPE)")
                    .takes_value(true),
            )
            .arg(
                Arg::new("ns")
                    .short('n')
                    .long("ns")
                    .required(true)
                    .long_help("Numeric address of the DNS server to query")
                    .takes_value(true),
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .required(false)
                    .default_value("53")
                    .long_help("UDP port of the DNS server")
                    .takes_value(true),
            )
            .arg(
                Arg::new("domain")
                    .short('d')
                    .long("domain")
                    .required(true)
                    .long_help("Domain name to query")
                    .takes_value(true),
            )
            .arg(
                Arg::new("timeout")
                    .short('t')
                    .long("timeout")
                    .required(false)
                    .default_value("3000")
                    .long_help("Per-attempt receive timeout, in milliseconds")
                    .takes_value(true),
            )
            .arg(
                Arg::new("retry")
                    .short('r')
                    .long("retry")
                    .required(false)
                    .default_value("3")
                    .long_help("Total send attempts before giving up")
                    .takes_value(true),
            )
            .arg(
                Arg::new("ad")
                    .short('a')
                    .long("ad")
                    .required(false)
                    .long_help("Set the AD (authentic data) bit on the outgoing query")
                    .takes_value(false),
            )
            .arg(
                Arg::new("debug")
                    .short('g')
                    .long("debug")
                    .required(false)
                    .long_help("Verbose logging")
                    .takes_value(false),
            )
            .get_matches();

        let ns: IpAddr = matches
            .value_of("ns")
            .unwrap()
            .parse()
            .map_err(|_| DNSError::FormatError)?;
        let port: u16 = matches.value_of("port").unwrap().parse().map_err(|_| DNSError::FormatError)?;
        let timeout_ms: u64 = matches
            .value_of("timeout")
            .unwrap()
            .parse()
            .map_err(|_| DNSError::FormatError)?;
        let retry: u8 = matches.value_of("retry").unwrap().parse().map_err(|_| DNSError::FormatError)?;

        Ok(CliOptions {
            qtype: parse_qtype(matches.value_of("qtype").unwrap())?,
            ns,
            port,
            domain: String::from(matches.value_of("domain").unwrap()),
            timeout: Duration::from_millis(timeout_ms),
            retry,
            ad: matches.is_present("ad"),
            debug: matches.is_present("debug"),
        })
    }
}
