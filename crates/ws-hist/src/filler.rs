//! Single-pass histogram filling from column data.

use std::collections::HashMap;

use ws_core::{Error, Result};

use crate::histogram::Histogram;

/// What to fill: one column into one histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    /// Histogram name.
    pub name: String,
    /// Column to histogram.
    pub variable: String,
    /// Bin edges (sorted, length = n_bins + 1).
    pub bin_edges: Vec<f64>,
}

fn lookup<'a>(columns: &'a HashMap<String, Vec<f64>>, name: &str) -> Result<&'a [f64]> {
    columns.get(name).map(|v| v.as_slice()).ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Fill every spec from `columns`, weighting entries by `columns[weight]`.
///
/// All columns must have the same length. With `weight == None` every
/// entry has weight 1.
pub fn fill_histograms(
    specs: &[HistogramSpec],
    columns: &HashMap<String, Vec<f64>>,
    weight: Option<&str>,
) -> Result<Vec<Histogram>> {
    let weights = weight.map(|w| lookup(columns, w)).transpose()?;
    let n_entries = match weights {
        Some(w) => w.len(),
        None => columns.values().next().map_or(0, |v| v.len()),
    };

    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        let values = lookup(columns, &spec.variable)?;
        if values.len() != n_entries {
            return Err(Error::SchemaMismatch(format!(
                "column '{}' has {} entries, expected {n_entries}",
                spec.variable,
                values.len()
            )));
        }
        let mut h = Histogram::new(spec.name.clone(), spec.bin_edges.clone())?;
        match weights {
            Some(w) => values.iter().zip(w).for_each(|(&x, &w)| h.fill(x, w)),
            None => values.iter().for_each(|&x| h.fill(x, 1.0)),
        }
        results.push(h);
    }
    Ok(results)
}
