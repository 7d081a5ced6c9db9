use anyhow::{bail, Context, Result};
use std::fs;

use crate::annotation::types::MappingRow;

pub const ANCESTRAL_COLUMN: &str = "Ancestral node";
pub const ACCESSION_COLUMN: &str = "Accession";
pub const HOST_COLUMN: &str = "Host";

/// Load the tab-separated mapping table.
///
/// The header must contain the three required columns (matched by exact
/// name after trimming, in any order; extra columns are ignored). Body
/// rows with any required field blank after trimming are dropped
/// without a diagnostic. An empty file, a missing column or zero
/// surviving rows are fatal.
pub fn load_mapping(path: &str) -> Result<Vec<MappingRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file '{}'", path))?;

    let mut lines = content.lines();
    let header = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => bail!("Empty mapping file: {}", path),
    };

    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let find = |name: &str| columns.iter().position(|c| *c == name);
    let (anc_idx, acc_idx, host_idx) = match (
        find(ANCESTRAL_COLUMN),
        find(ACCESSION_COLUMN),
        find(HOST_COLUMN),
    ) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => bail!(
            "Mapping header must contain the '{}', '{}' and '{}' columns",
            ANCESTRAL_COLUMN,
            ACCESSION_COLUMN,
            HOST_COLUMN
        ),
    };

    let mut rows = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        let cell = |idx: usize| fields.get(idx).map_or("", |f| f.trim());
        let (ancestral, accession, host) = (cell(anc_idx), cell(acc_idx), cell(host_idx));
        if ancestral.is_empty() || accession.is_empty() || host.is_empty() {
            continue;
        }
        rows.push(MappingRow {
            ancestral: ancestral.to_string(),
            accession: accession.to_string(),
            host: host.to_string(),
        });
    }

    if rows.is_empty() {
        bail!("No usable rows found in mapping file '{}'", path);
    }
    Ok(rows)
}
