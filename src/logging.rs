use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default level. Nothing is installed in silent
/// mode, so every event is discarded.
pub fn init_logging(silent: bool, verbose: bool) {
	if silent {
		return;
	}

	let default_level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_level(true)
		.with_ansi(true)
		.init();
}
