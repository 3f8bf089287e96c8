use std::sync::Arc;

use chrono::{Local, SecondsFormat};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::dns::{display_ip, is_alias, NameLookup};
use crate::types::{EngineConfig, ResolveError, ResolveResult};

/// Concurrent resolution engine.
///
/// Cloning is cheap: the lookup facility is shared and the configuration
/// is copied, so each spawned worker carries its own handle.
#[derive(Clone)]
pub struct ResolverEngine {
	lookup: Arc<dyn NameLookup>,
	config: EngineConfig,
}

impl ResolverEngine {
	pub fn new(lookup: Arc<dyn NameLookup>, mut config: EngineConfig) -> Self {
		config.concurrency = config.concurrency.max(1);
		ResolverEngine { lookup, config }
	}

	pub fn config(&self) -> EngineConfig {
		self.config
	}

	/// Resolve a single domain.
	///
	/// Looks up the CNAME first, then all addresses. Only a domain with
	/// exactly one address is a success.
	pub async fn resolve_one(&self, domain: &str) -> ResolveResult {
		debug!(domain, "resolving");
		let (has_cname, outcome) = self.resolve_inner(domain).await;
		let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, true);

		match outcome {
			Ok(ip) => {
				debug!(domain, %ip, has_cname, "resolved");
				ResolveResult::resolved(domain, ip, has_cname, timestamp)
			}
			Err(e) => {
				debug!(domain, error = %e, "resolution failed");
				ResolveResult::failed(domain, &e, has_cname, timestamp)
			}
		}
	}

	async fn resolve_inner(&self, domain: &str) -> (bool, Result<String, ResolveError>) {
		// A failed CNAME lookup means "no alias", never an error
		let cname = self.lookup.canonical_name(domain).await
			.ok()
			.filter(|canonical| is_alias(domain, canonical));
		let has_cname = cname.is_some();

		if self.config.filter_cname {
			if let Some(cname) = cname {
				return (has_cname, Err(ResolveError::CNameFiltered {
					domain: domain.to_string(),
					cname,
				}));
			}
		}

		let addrs = match self.lookup.addresses(domain).await {
			Ok(addrs) => addrs,
			Err(e) => return (has_cname, Err(ResolveError::LookupFailed(e.to_string()))),
		};

		match addrs.as_slice() {
			[ip] => (has_cname, Ok(display_ip(*ip))),
			_ => (has_cname, Err(ResolveError::AmbiguousOrMissing {
				domain: domain.to_string(),
			})),
		}
	}

	/// Resolve every domain with at most `concurrency` resolutions in flight.
	///
	/// Results come back in completion order. With the CNAME filter enabled,
	/// aliased domains are dropped from the output. Once `cancel` fires no
	/// new domain is started; resolutions already running finish and are
	/// kept.
	pub async fn resolve_batch(
		&self,
		domains: &[String],
		cancel: Option<CancellationToken>,
	) -> Vec<ResolveResult> {
		self.run_batch(domains, cancel).await
			.into_iter()
			.map(|(_, result)| result)
			.collect()
	}

	/// Same as [`resolve_batch`](Self::resolve_batch), re-sorted into input order.
	pub async fn resolve_batch_ordered(
		&self,
		domains: &[String],
		cancel: Option<CancellationToken>,
	) -> Vec<ResolveResult> {
		let mut indexed = self.run_batch(domains, cancel).await;
		indexed.sort_by_key(|(idx, _)| *idx);
		indexed.into_iter().map(|(_, result)| result).collect()
	}

	async fn run_batch(
		&self,
		domains: &[String],
		cancel: Option<CancellationToken>,
	) -> Vec<(usize, ResolveResult)> {
		debug!(count = domains.len(), concurrency = self.config.concurrency, "starting batch");
		let cancel = cancel.unwrap_or_default();
		let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
		let (tx, mut rx) = mpsc::unbounded_channel();

		let mut handles = Vec::with_capacity(domains.len());
		for (idx, domain) in domains.iter().enumerate() {
			// Admission: wait for a free slot before launching the worker
			let permit = tokio::select! {
				biased;
				_ = cancel.cancelled() => {
					debug!(admitted = idx, remaining = domains.len() - idx, "batch cancelled");
					break;
				}
				permit = semaphore.clone().acquire_owned() => match permit {
					Ok(p) => p,
					Err(_) => break,
				},
			};

			let engine = self.clone();
			let tx = tx.clone();
			let domain = domain.clone();
			handles.push(tokio::spawn(async move {
				let _permit = permit;
				let result = engine.resolve_one(&domain).await;
				// Receiver lives until every sender is dropped
				let _ = tx.send((idx, result));
			}));
		}
		drop(tx);

		let mut results = Vec::with_capacity(handles.len());
		while let Some((idx, result)) = rx.recv().await {
			if self.config.filter_cname && result.has_cname {
				debug!(domain = %result.domain, "skipping domain with CNAME record");
				continue;
			}
			results.push((idx, result));
		}

		for handle in handles {
			if let Err(e) = handle.await {
				error!(error = %e, "resolution task failed");
			}
		}

		debug!(kept = results.len(), "batch finished");
		results
	}
}
