use clap::Parser;

/// Domain to IP resolution tool
#[derive(Parser, Debug)]
#[command(name = "realip", version)]
#[command(about = "Resolve domains to their single origin IP, optionally skipping CNAME-fronted domains")]
pub struct Cli {
	/// Single target domain
	#[arg(short = 'u', long = "target")]
	pub target: Option<String>,

	/// File containing domains to resolve (one per line)
	#[arg(short = 'l', long = "list")]
	pub list: Option<String>,

	/// Output results as JSON
	#[arg(long = "json")]
	pub json: bool,

	/// Output results as CSV
	#[arg(long = "csv")]
	pub csv: bool,

	/// Maximum concurrent resolutions
	#[arg(short = 't', long = "threads", default_value = "10")]
	pub threads: usize,

	/// Output file path (defaults to stdout)
	#[arg(short = 'o', long = "output")]
	pub output: Option<String>,

	/// Disable all log output
	#[arg(long = "silent")]
	pub silent: bool,

	/// Enable debug log output
	#[arg(short = 'v', long = "verbose")]
	pub verbose: bool,

	/// Drop domains with a CNAME record, keeping only those resolving directly to an IP
	#[arg(long = "cname")]
	pub cname: bool,

	/// Emit batch results in input order instead of completion order
	#[arg(long = "ordered")]
	pub ordered: bool,

	/// Upstream DNS resolver address (repeatable, e.g. 1.1.1.1 or 1.1.1.1:53)
	#[arg(short = 'r', long = "resolver")]
	pub resolvers: Vec<String>,

	/// File containing upstream resolver addresses (one per line)
	#[arg(long = "resolver-file")]
	pub resolver_file: Option<String>,

	/// Query timeout in milliseconds
	#[arg(long = "timeout", default_value = "5000")]
	pub timeout: u64,
}
