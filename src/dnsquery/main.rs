//! A DNS resource query
use std::process::exit;

use log::debug;

use dnslib::error::DNSResult;
use dnslib::resolver::{with_resolver, ResolvConf, ResolvSeed};
use dnslib::{lookup, message::Message};

mod args;
use args::CliOptions;

mod display;
use display::DisplayWrapper;

fn main() -> DNSResult<()> {
    env_logger::init();

    let options = CliOptions::options()?;
    debug!("options: {:?}", &options);

    let seed = ResolvSeed::new(ResolvConf::LiteralPort(options.ns, options.port))?
        .with_timeout(options.timeout)
        .with_retry(options.retry);

    let message: Message = with_resolver(&seed, |resolver| {
        if options.ad {
            lookup::lookup_raw_ad(resolver, &options.domain, options.qtype)
        } else {
            lookup::lookup_raw(resolver, &options.domain, options.qtype)
        }
    })??;

    if message.header.flags.rcode != 0 {
        eprintln!("server returned RCODE {}", message.header.flags.rcode);
        exit(1);
    }

    print!("{}", DisplayWrapper(&message));

    Ok(())
}
