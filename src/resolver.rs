//! Resolver configuration, seed, and the socket-owning `Resolver`. Grounded in the teacher's
//! `dnsquery/args.rs` (CLI-supplied nameserver string) generalized into a proper config
//! value per spec.md §4.4, plus scoped acquisition (`with_resolver`/`with_resolvers`) per
//! spec.md §5/§9, implemented with ordinary Rust drop semantics rather than an explicit
//! scope-guard type.
use std::fs;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::error::{DNSError, DNSResult};

/// Default port for DNS over UDP.
pub const DEFAULT_PORT: u16 = 53;
/// Default config file path consulted by `ResolvConf::File` (spec.md §6).
pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";
/// Default receive timeout (spec.md §6: 3,000,000 microseconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_micros(3_000_000);
/// Default total attempt count (spec.md §6).
pub const DEFAULT_RETRY: u8 = 3;
/// Default, unused, kept only for API parity with the source (spec.md §4.4/§9).
pub const DEFAULT_BUFSIZE: usize = 512;

/// Where to find the nameserver address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvConf {
    /// Numeric address, default port 53.
    Literal(IpAddr),
    /// Numeric address and an explicit port.
    LiteralPort(IpAddr, u16),
    /// A resolver config file; its first `nameserver` line is honored (spec.md §4.4/§6).
    File(PathBuf),
}

/// Immutable, shareable configuration snapshot: a resolved nameserver address plus the
/// transaction loop's timeout/retry/bufsize (spec.md §3 "Lifecycle").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvSeed {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub retry: u8,
    pub bufsize: usize,
}

impl ResolvSeed {
    pub fn new(conf: ResolvConf) -> DNSResult<Self> {
        let addr = match conf {
            ResolvConf::Literal(ip) => SocketAddr::new(ip, DEFAULT_PORT),
            ResolvConf::LiteralPort(ip, port) => SocketAddr::new(ip, port),
            ResolvConf::File(path) => SocketAddr::new(first_nameserver(&path)?, DEFAULT_PORT),
        };

        Ok(ResolvSeed {
            addr,
            timeout: DEFAULT_TIMEOUT,
            retry: DEFAULT_RETRY,
            bufsize: DEFAULT_BUFSIZE,
        })
    }

    /// Builds a seed pointing at `/etc/resolv.conf`, the system default (spec.md §6).
    pub fn system_default() -> DNSResult<Self> {
        Self::new(ResolvConf::File(PathBuf::from(DEFAULT_RESOLV_CONF)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: u8) -> Self {
        self.retry = retry;
        self
    }
}

/// Reads `path` and returns the address on the first line beginning with `nameserver`.
///
/// The teacher's own original dropped exactly 11 characters (the keyword plus a single
/// separator) after matching the prefix; spec.md §9 flags this as a quirk a robust
/// implementation should fix, so this parses the keyword and skips any run of whitespace
/// instead (REDESIGN FLAG, see DESIGN.md).
fn first_nameserver(path: &Path) -> DNSResult<IpAddr> {
    let contents = fs::read_to_string(path)?;

    for line in contents.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("nameserver") {
            let addr = rest.trim();
            if let Ok(ip) = addr.parse::<IpAddr>() {
                return Ok(ip);
            }
            debug!("nameserver line found but address did not parse: {:?}", addr);
            return Err(DNSError::FormatError);
        }
    }

    Err(DNSError::FormatError)
}

/// A connected UDP socket bound for the lifetime of a `with_resolver` scope. Methods take
/// `&mut self`: with no interior mutability, the borrow checker rejects any attempt to use
/// one `Resolver` concurrently from two call sites, enforcing spec.md §5's documented
/// single-owner contract at compile time.
pub struct Resolver {
    socket: UdpSocket,
    pub seed: ResolvSeed,
}

impl Resolver {
    fn open(seed: &ResolvSeed) -> DNSResult<Self> {
        let local_addr: SocketAddr = match seed.addr {
            SocketAddr::V4(_) => "0.0.0.0:0".parse().unwrap(),
            SocketAddr::V6(_) => "[::]:0".parse().unwrap(),
        };

        let socket = UdpSocket::bind(local_addr)?;
        socket.connect(seed.addr)?;
        socket.set_read_timeout(Some(seed.timeout))?;
        debug!("opened resolver socket toward {}", seed.addr);

        Ok(Resolver {
            socket,
            seed: seed.clone(),
        })
    }

    pub(crate) fn socket(&self) -> &UdpSocket {
        &self.socket
    }
}

/// Opens a `Resolver` from `seed`, runs `f`, and closes the socket on every exit path
/// (spec.md §5 "Scoped resource acquisition") — an ordinary Rust function scope plus
/// `UdpSocket`'s own `Drop` does this without any explicit close() call.
pub fn with_resolver<R>(seed: &ResolvSeed, f: impl FnOnce(&mut Resolver) -> R) -> DNSResult<R> {
    let mut resolver = Resolver::open(seed)?;
    Ok(f(&mut resolver))
}

/// Opens one `Resolver` per seed, runs `f` over the whole slice, and closes every socket on
/// exit. If any seed fails to open, the sockets already opened are dropped (and thus closed)
/// before the error is returned (spec.md §5: "opening fails and already-opened sockets are
/// closed before the failure is surfaced").
pub fn with_resolvers<R>(seeds: &[ResolvSeed], f: impl FnOnce(&mut [Resolver]) -> R) -> DNSResult<R> {
    let mut resolvers = Vec::with_capacity(seeds.len());
    for seed in seeds {
        resolvers.push(Resolver::open(seed)?);
    }
    Ok(f(&mut resolvers))
}
