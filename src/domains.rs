use anyhow::{anyhow, Result};

/// Read domains from a file, one per line.
///
/// Surrounding whitespace (including `\r` and tabs) is stripped. Blank lines
/// and lines starting with '#' are skipped. Duplicates are kept.
pub fn read_domain_file(path: &str) -> Result<Vec<String>> {
	let content = std::fs::read_to_string(path)
		.map_err(|e| anyhow!("failed to read domain file '{}': {}", path, e))?;
	Ok(parse_domains(&content))
}

/// Split domain-list text into trimmed, non-empty entries.
pub fn parse_domains(content: &str) -> Vec<String> {
	content.lines()
		.map(|line| line.trim().to_string())
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.collect()
}
