use std::io::Write;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::types::ResolveResult;

const BANNER: &str = r"
 ____            _  ___ ____
|  _ \ ___  __ _| |/_ /|  _ \
| |_) / _ \/ _` | | | || |_) |
|  _ <  __/ (_| | | | ||  __/
|_| \_\___|\__,_|_||___|_|

Domain to IP Resolution Tool
";

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	Json,
	Csv,
	Text,
}

const AUTHOR: &str = "kking";
const GITHUB: &str = "github.com/r00tuser111/realip";

/// Banner with version, author and project link.
pub fn banner_text() -> String {
	format!(
		"{}\nVersion: {}\nAuthor: {}\nGitHub: {}\n",
		BANNER, env!("CARGO_PKG_VERSION"), AUTHOR, GITHUB
	)
}

/// Print the banner to stderr so stdout only carries results.
pub fn print_banner() {
	eprintln!("{}", banner_text());
}

/// Write results in the requested format.
pub fn write_results(
	out: &mut dyn Write,
	format: OutputFormat,
	results: &[ResolveResult],
) -> Result<()> {
	match format {
		OutputFormat::Json => write_json(out, results),
		OutputFormat::Csv => write_csv(out, results),
		OutputFormat::Text => write_text(out, results),
	}
}

fn write_json(out: &mut dyn Write, results: &[ResolveResult]) -> Result<()> {
	serde_json::to_writer_pretty(&mut *out, results)?;
	writeln!(out)?;
	Ok(())
}

fn write_csv(out: &mut dyn Write, results: &[ResolveResult]) -> Result<()> {
	let mut writer = csv::Writer::from_writer(out);

	writer.write_record(["Domain", "IP", "Has_CNAME", "Timestamp", "Error"])?;
	for r in results {
		writer.write_record([
			r.domain.as_str(),
			r.ip.as_str(),
			if r.has_cname { "true" } else { "false" },
			r.timestamp.as_str(),
			r.error.as_str(),
		])?;
	}

	writer.flush()?;
	Ok(())
}

/// Aligned table with localized headers; failed rows show `-` as the address.
fn write_text(out: &mut dyn Write, results: &[ResolveResult]) -> Result<()> {
	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Disabled);
	table.set_header(vec!["域名", "IP地址", "CNAME", "状态"]);

	for r in results {
		let (ip, status) = if r.is_success() {
			(r.ip.as_str(), "成功")
		} else {
			("-", "失败")
		};
		let cname = if r.has_cname { "是" } else { "否" };
		table.add_row(vec![r.domain.as_str(), ip, cname, status]);
	}

	writeln!(out, "{table}")?;
	Ok(())
}
