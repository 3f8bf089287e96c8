use crate::types::{ErrorKind, ResolveResult};

/// Counts describing one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
	/// Domains handed to the engine
	pub total: usize,
	pub resolved: usize,
	pub failed: usize,
	/// Domains with no result: CNAME-filtered or never started after cancellation
	pub dropped: usize,
	pub lookup_failed: usize,
	pub ambiguous: usize,
	pub with_cname: usize,
}

impl BatchSummary {
	pub fn from_results(total: usize, results: &[ResolveResult]) -> Self {
		let mut summary = BatchSummary {
			total,
			dropped: total.saturating_sub(results.len()),
			..Default::default()
		};
		for r in results {
			if r.has_cname {
				summary.with_cname += 1;
			}
			match r.error_kind {
				None => summary.resolved += 1,
				Some(kind) => {
					summary.failed += 1;
					match kind {
						ErrorKind::LookupFailed => summary.lookup_failed += 1,
						ErrorKind::AmbiguousOrMissing => summary.ambiguous += 1,
						ErrorKind::CNameFiltered => {}
					}
				}
			}
		}
		summary
	}
}
