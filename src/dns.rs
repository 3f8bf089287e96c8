use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hickory_proto::rr::{RData, RecordType};
use hickory_resolver::config::{
	LookupIpStrategy, NameServerConfigGroup, ResolverConfig,
};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use tracing::debug;

/// Name-resolution facility used by the engine.
///
/// Implementations must be safe to call from many workers at once.
#[async_trait]
pub trait NameLookup: Send + Sync {
	/// Return the canonical name `domain` aliases to.
	///
	/// An error means no alias could be determined; callers treat it as
	/// "no CNAME".
	async fn canonical_name(&self, domain: &str) -> Result<String>;

	/// Return every address `domain` resolves to.
	async fn addresses(&self, domain: &str) -> Result<Vec<IpAddr>>;
}

/// `NameLookup` backed by a hickory tokio resolver
pub struct HickoryLookup {
	resolver: TokioResolver,
}

impl HickoryLookup {
	/// Build a resolver from the host's system configuration, or from the
	/// given upstream nameservers when the list is non-empty.
	///
	/// Both A and AAAA records are collected so a dual-stack host counts as
	/// having more than one address. Queries are attempted once.
	pub fn new(upstreams: &[SocketAddr], timeout: Duration) -> Result<Self> {
		let mut builder = if upstreams.is_empty() {
			TokioResolver::builder_tokio()
				.map_err(|e| anyhow!("failed to read system resolver configuration: {}", e))?
		} else {
			let mut group = NameServerConfigGroup::new();
			for addr in upstreams {
				group.merge(NameServerConfigGroup::from_ips_clear(
					&[addr.ip()], addr.port(), true,
				));
			}
			let config = ResolverConfig::from_parts(None, vec![], group);
			TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
		};

		let opts = builder.options_mut();
		opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
		opts.timeout = timeout;
		opts.attempts = 1;

		let resolver = builder.build();
		debug!(upstreams = upstreams.len(), ?timeout, "DNS resolver created");
		Ok(HickoryLookup { resolver })
	}
}

#[async_trait]
impl NameLookup for HickoryLookup {
	async fn canonical_name(&self, domain: &str) -> Result<String> {
		let lookup = self.resolver.lookup(domain, RecordType::CNAME).await
			.map_err(|e| anyhow!("CNAME lookup for '{}' failed: {}", domain, e))?;

		// Last alias in the answer is the end of the chain we were told about
		lookup.iter()
			.filter_map(|rdata| match rdata {
				RData::CNAME(cname) => Some(cname.0.to_string()),
				_ => None,
			})
			.last()
			.ok_or_else(|| anyhow!("no CNAME record for '{}'", domain))
	}

	async fn addresses(&self, domain: &str) -> Result<Vec<IpAddr>> {
		let lookup = self.resolver.lookup_ip(domain).await
			.map_err(|e| anyhow!("lookup {}: {}", domain, e))?;
		Ok(lookup.iter().collect())
	}
}

/// Parse an upstream nameserver as `ip` or `ip:port` (`[v6]:port` for
/// IPv6). Port 53 is used when none is given.
pub fn parse_upstream(input: &str) -> Result<SocketAddr> {
	let input = input.trim();
	if let Ok(addr) = input.parse::<SocketAddr>() {
		return Ok(addr);
	}
	input.parse::<IpAddr>()
		.map(|ip| SocketAddr::new(ip, 53))
		.map_err(|_| anyhow!("invalid resolver address '{}'", input))
}

/// Read upstream nameservers from a file using the domain-list line rules.
pub fn read_upstream_file(path: &str) -> Result<Vec<SocketAddr>> {
	let content = std::fs::read_to_string(path)
		.map_err(|e| anyhow!("failed to read resolver file '{}': {}", path, e))?;
	crate::domains::parse_domains(&content).iter()
		.map(|line| parse_upstream(line))
		.collect()
}

/// Return true if `canonical` names a different host than `domain`.
///
/// Comparison ignores ASCII case and a single trailing root dot on
/// either side.
pub fn is_alias(domain: &str, canonical: &str) -> bool {
	let domain = domain.strip_suffix('.').unwrap_or(domain);
	let canonical = canonical.strip_suffix('.').unwrap_or(canonical);
	!domain.eq_ignore_ascii_case(canonical)
}

/// Render an address as text, using dotted IPv4 form for IPv4-mapped
/// IPv6 addresses.
pub fn display_ip(ip: IpAddr) -> String {
	match ip {
		IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
			Some(v4) => v4.to_string(),
			None => v6.to_string(),
		},
		IpAddr::V4(v4) => v4.to_string(),
	}
}
