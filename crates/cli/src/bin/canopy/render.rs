use std::io::{self, Write};

use anyhow::Result;
use canopy_core::{Allergenicity, AllergenicityLevelCatalog, TreeNode};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::workflow::Report;

const HEADERS: [&str; 3] = ["Genus", "Common name", "Allergenicity"];

/// Print the report as an aligned table followed by a summary line.
pub(crate) fn plain(report: &Report<'_>, out: &mut impl Write) -> io::Result<()> {
	let cells: Vec<[String; 3]> = report.rows.iter().map(|row| cells_for(row.node)).collect();

	let mut widths = HEADERS.map(UnicodeWidthStr::width);
	for row in &cells {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.width());
		}
	}

	write_line(out, "  ", &HEADERS.map(str::to_string), &widths)?;
	for (row, cells) in report.rows.iter().zip(&cells) {
		let marker = if row.highlighted { "* " } else { "  " };
		write_line(out, marker, cells, &widths)?;
	}

	writeln!(out)?;
	writeln!(
		out,
		"{} of {} trees highlighted",
		report.highlighted, report.total
	)
}

/// Print the report as pretty JSON.
pub(crate) fn json(report: &Report<'_>, out: &mut impl Write) -> Result<()> {
	serde_json::to_writer_pretty(&mut *out, report)?;
	writeln!(out)?;
	Ok(())
}

/// Print the level selector entries as `value<TAB>label` lines.
pub(crate) fn levels(catalog: &AllergenicityLevelCatalog, out: &mut impl Write) -> io::Result<()> {
	for option in catalog.iter() {
		let value = option
			.value
			.map_or_else(|| "all".to_string(), |level| level.to_string());
		writeln!(out, "{value}\t{}", option.label)?;
	}
	Ok(())
}

fn cells_for(node: &TreeNode) -> [String; 3] {
	[
		node.genus_name.clone(),
		node.common_name.clone().unwrap_or_default(),
		allergenicity_cell(&node.allergenicity),
	]
}

fn allergenicity_cell(value: &Allergenicity) -> String {
	match value {
		Allergenicity::Missing | Allergenicity::Value(Value::Null) => "-".to_string(),
		Allergenicity::Value(Value::String(text)) => text.trim().to_string(),
		Allergenicity::Value(other) => other.to_string(),
	}
}

fn write_line(
	out: &mut impl Write,
	marker: &str,
	cells: &[String; 3],
	widths: &[usize; 3],
) -> io::Result<()> {
	let mut line = String::from(marker);
	for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
		line.push_str(cell);
		if index + 1 < cells.len() {
			let padding = width.saturating_sub(cell.width()) + 2;
			line.extend(std::iter::repeat_n(' ', padding));
		}
	}
	writeln!(out, "{}", line.trim_end())
}
