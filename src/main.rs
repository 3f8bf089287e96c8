mod cli;
mod dns;
mod domains;
mod engine;
mod logging;
mod output;
mod stats;
mod types;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::dns::HickoryLookup;
use crate::engine::ResolverEngine;
use crate::output::OutputFormat;
use crate::stats::BatchSummary;
use crate::types::EngineConfig;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// --silent only mutes logging; the banner is always shown
	output::print_banner();
	logging::init_logging(cli.silent, cli.verbose);

	if cli.target.is_none() && cli.list.is_none() {
		error!("a target domain (-u) or a domain list file (-l) is required");
		eprintln!("{}", Cli::command().render_help());
		return Err(anyhow!("no target domain or domain list given"));
	}

	let format = if cli.json {
		if cli.csv {
			warn!("both --json and --csv given, using JSON");
		}
		OutputFormat::Json
	} else if cli.csv {
		OutputFormat::Csv
	} else {
		OutputFormat::Text
	};

	// Upstream resolvers; empty means use the system configuration
	let mut upstreams = Vec::new();
	for r in &cli.resolvers {
		upstreams.push(dns::parse_upstream(r)?);
	}
	if let Some(path) = &cli.resolver_file {
		upstreams.extend(dns::read_upstream_file(path)?);
	}

	let lookup = HickoryLookup::new(&upstreams, Duration::from_millis(cli.timeout))?;
	let config = EngineConfig {
		concurrency: cli.threads,
		filter_cname: cli.cname,
	};
	if config.concurrency == 0 {
		warn!("--threads 0 is not usable, running with 1");
	}
	let engine = ResolverEngine::new(Arc::new(lookup), config);

	let mut out: Box<dyn Write> = match &cli.output {
		Some(path) => {
			let file = File::create(path)
				.map_err(|e| anyhow!("failed to create output file '{}': {}", path, e))?;
			Box::new(BufWriter::new(file))
		}
		None => Box::new(std::io::stdout().lock()),
	};

	let results = if let Some(target) = &cli.target {
		info!("resolving {}", target);
		vec![engine.resolve_one(target).await]
	} else {
		let path = cli.list.as_deref().unwrap_or_default();
		info!("loading domain list from {}", path);
		let domains = domains::read_domain_file(path)?;
		info!(
			"resolving {} domains with {} threads",
			domains.len(), engine.config().concurrency
		);

		// Ctrl-C stops admitting new domains; in-flight lookups still finish
		let cancel = CancellationToken::new();
		let signal_token = cancel.clone();
		tokio::spawn(async move {
			if tokio::signal::ctrl_c().await.is_ok() {
				warn!("interrupted, waiting for in-flight lookups");
				signal_token.cancel();
			}
		});

		let results = if cli.ordered {
			engine.resolve_batch_ordered(&domains, Some(cancel)).await
		} else {
			engine.resolve_batch(&domains, Some(cancel)).await
		};

		let summary = BatchSummary::from_results(domains.len(), &results);
		info!(
			total = summary.total,
			resolved = summary.resolved,
			failed = summary.failed,
			dropped = summary.dropped,
			lookup_failed = summary.lookup_failed,
			ambiguous = summary.ambiguous,
			with_cname = summary.with_cname,
			"all domains processed"
		);
		results
	};

	output::write_results(&mut out, format, &results)
		.and_then(|_| out.flush().map_err(Into::into))
		.map_err(|e| anyhow!("failed to write results: {}", e))?;
	if let Some(path) = &cli.output {
		info!("results written to {}", path);
	}

	Ok(())
}
