//! A stub DNS client: build and send DNS queries over UDP to a configured recursive
//! resolver, match the response by transaction id, and decode it into a structured
//! [`message::Message`]. Not a caching or recursive server — see each module for its
//! share of the RFC1035/RFC6891/RFC7871 wire format and the retry/timeout transaction loop.
pub mod convenience;
pub mod error;
pub mod lookup;
pub mod message;
pub mod name;
pub mod resolver;
pub mod transaction;
pub mod wire;

pub use error::{DNSError, DNSResult};
pub use message::{Message, OData, OptRecord, RData, Type};
pub use name::Domain;
pub use resolver::{with_resolver, with_resolvers, ResolvConf, ResolvSeed, Resolver};
