use serde::Serialize;
use thiserror::Error;

/// Engine configuration shared read-only by every worker
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
	/// Maximum number of resolutions in flight at once
	pub concurrency: usize,
	/// Reject domains that resolve through a CNAME
	pub filter_cname: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		EngineConfig {
			concurrency: 10,
			filter_cname: false,
		}
	}
}

/// Coarse classification of a per-domain failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	CNameFiltered,
	LookupFailed,
	AmbiguousOrMissing,
}

/// Why a single domain failed to resolve
#[derive(Debug, Error)]
pub enum ResolveError {
	#[error("域名 {domain} 存在CNAME记录: {cname}")]
	CNameFiltered { domain: String, cname: String },

	#[error("{0}")]
	LookupFailed(String),

	#[error("域名 {domain} 有多个IP地址或无IP地址")]
	AmbiguousOrMissing { domain: String },
}

impl ResolveError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			ResolveError::CNameFiltered { .. } => ErrorKind::CNameFiltered,
			ResolveError::LookupFailed(_) => ErrorKind::LookupFailed,
			ResolveError::AmbiguousOrMissing { .. } => ErrorKind::AmbiguousOrMissing,
		}
	}
}

/// Outcome of resolving one domain.
///
/// Exactly one of `ip` and `error` is non-empty. Field order matches the
/// JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResult {
	pub domain: String,
	pub ip: String,
	pub timestamp: String,
	pub error: String,
	pub has_cname: bool,
	#[serde(skip)]
	pub error_kind: Option<ErrorKind>,
}

impl ResolveResult {
	/// Build a successful result.
	pub fn resolved(domain: &str, ip: String, has_cname: bool, timestamp: String) -> Self {
		ResolveResult {
			domain: domain.to_string(),
			ip,
			timestamp,
			error: String::new(),
			has_cname,
			error_kind: None,
		}
	}

	/// Build a failed result from the error that ended resolution.
	pub fn failed(domain: &str, err: &ResolveError, has_cname: bool, timestamp: String) -> Self {
		ResolveResult {
			domain: domain.to_string(),
			ip: String::new(),
			timestamp,
			error: err.to_string(),
			has_cname,
			error_kind: Some(err.kind()),
		}
	}

	pub fn is_success(&self) -> bool {
		self.error.is_empty()
	}
}
