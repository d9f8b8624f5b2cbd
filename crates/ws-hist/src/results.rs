//! Histogram results file.
//!
//! # Schema: `wskim_histograms_v1`
//!
//! One row per histogram:
//!
//! | Column        | Arrow Type      |
//! |---------------|-----------------|
//! | `name`        | `Utf8`          |
//! | `bin_edges`   | `List<Float64>` |
//! | `bin_content` | `List<Float64>` |
//! | `sumw2`       | `List<Float64>` |
//! | `underflow`   | `Float64`       |
//! | `overflow`    | `Float64`       |
//! | `entries`     | `Float64`       |

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, ListArray, StringArray};
use arrow::datatypes::{Field, Float64Type, Schema};
use arrow::record_batch::RecordBatch;

use ws_core::{Error, Result};
use ws_io::META_KEY_SCHEMA_VERSION;
use ws_io::columns::{list_f64, scalar_f64, utf8};
use ws_io::parquet::{read_parquet_batches, read_parquet_metadata, write_parquet};

use crate::histogram::Histogram;

/// Schema version string embedded in histogram results files.
pub const HISTOGRAMS_SCHEMA_V1: &str = "wskim_histograms_v1";

/// Histograms of one results file, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct HistogramSet {
    histograms: Vec<Histogram>,
    index: HashMap<String, usize>,
}

impl HistogramSet {
    /// Collect histograms; a later duplicate name shadows an earlier one.
    pub fn new(histograms: Vec<Histogram>) -> Self {
        let index = histograms.iter().enumerate().map(|(i, h)| (h.name.clone(), i)).collect();
        Self { histograms, index }
    }

    /// Histogram by name, or [`Error::MissingHistogram`].
    pub fn get(&self, name: &str) -> Result<&Histogram> {
        self.index
            .get(name)
            .map(|&i| &self.histograms[i])
            .ok_or_else(|| Error::MissingHistogram(name.to_string()))
    }

    /// Number of histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }
}

fn list_column(histograms: &[Histogram], get: fn(&Histogram) -> &[f64]) -> ArrayRef {
    Arc::new(ListArray::from_iter_primitive::<Float64Type, _, _>(
        histograms.iter().map(|h| Some(get(h).iter().copied().map(Some))),
    ))
}

fn scalar_column(histograms: &[Histogram], get: fn(&Histogram) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(histograms.iter().map(get)))
}

/// Write histograms to a results file.
pub fn write_histograms(path: &Path, histograms: &[Histogram]) -> Result<()> {
    let named: Vec<(&str, ArrayRef)> = vec![
        (
            "name",
            Arc::new(StringArray::from_iter_values(histograms.iter().map(|h| &h.name))) as ArrayRef,
        ),
        ("bin_edges", list_column(histograms, |h| h.bin_edges.as_slice())),
        ("bin_content", list_column(histograms, |h| h.bin_content.as_slice())),
        ("sumw2", list_column(histograms, |h| h.sumw2.as_slice())),
        ("underflow", scalar_column(histograms, |h| h.underflow)),
        ("overflow", scalar_column(histograms, |h| h.overflow)),
        ("entries", scalar_column(histograms, |h| h.entries)),
    ];
    let fields: Vec<Field> =
        named.iter().map(|(n, a)| Field::new(*n, a.data_type().clone(), false)).collect();
    let metadata = HashMap::from([(
        META_KEY_SCHEMA_VERSION.to_string(),
        HISTOGRAMS_SCHEMA_V1.to_string(),
    )]);
    let schema = Arc::new(Schema::new(fields).with_metadata(metadata));
    let arrays: Vec<ArrayRef> = named.into_iter().map(|(_, a)| a).collect();

    let batch = RecordBatch::try_new(schema, arrays)?;
    write_parquet(path, &batch)?;
    tracing::debug!(path = %path.display(), histograms = histograms.len(), "histograms written");
    Ok(())
}

/// Read every histogram of a results file.
pub fn read_histograms(path: &Path) -> Result<HistogramSet> {
    let metadata = read_parquet_metadata(path)?;
    match metadata.get(META_KEY_SCHEMA_VERSION).map(String::as_str) {
        Some(HISTOGRAMS_SCHEMA_V1) => {}
        other => {
            return Err(Error::SchemaMismatch(format!(
                "{} is not a histogram results file (schema version {other:?})",
                path.display()
            )));
        }
    }

    let mut histograms = Vec::new();
    for batch in read_parquet_batches(path)? {
        histograms.extend(record_batch_to_histograms(&batch)?);
    }
    Ok(HistogramSet::new(histograms))
}

fn record_batch_to_histograms(batch: &RecordBatch) -> Result<Vec<Histogram>> {
    let names = utf8(batch, "name")?;
    let edges = list_f64(batch, "bin_edges")?;
    let contents = list_f64(batch, "bin_content")?;
    let sumw2 = list_f64(batch, "sumw2")?;
    let underflow = scalar_f64(batch, "underflow")?;
    let overflow = scalar_f64(batch, "overflow")?;
    let entries = scalar_f64(batch, "entries")?;

    let rows = names.into_iter().zip(edges).zip(contents).zip(sumw2).enumerate();
    let mut out = Vec::with_capacity(batch.num_rows());
    for (row, (((name, bin_edges), bin_content), sumw2)) in rows {
        if bin_edges.len() != bin_content.len() + 1 || sumw2.len() != bin_content.len() {
            return Err(Error::SchemaMismatch(format!(
                "histogram '{name}': {} edges, {} contents, {} sumw2",
                bin_edges.len(),
                bin_content.len(),
                sumw2.len()
            )));
        }
        out.push(Histogram {
            name,
            bin_edges,
            bin_content,
            sumw2,
            underflow: underflow[row],
            overflow: overflow[row],
            entries: entries[row],
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("wskim_hist_{}_{name}", std::process::id()))
    }

    #[test]
    fn write_then_lookup() {
        let mut a = Histogram::uniform("mnu_400to800_m_inv", 4, 0.0, 8.0).unwrap();
        a.fill(1.0, 0.5);
        a.fill(9.0, 0.25);
        let b = Histogram::uniform("mnu_6000_m_inv", 2, 0.0, 8.0).unwrap();

        let path = tmp_path("results.parquet");
        write_histograms(&path, &[a.clone(), b.clone()]).unwrap();
        let set = read_histograms(&path).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("mnu_400to800_m_inv").unwrap(), &a);
        assert_eq!(set.get("mnu_6000_m_inv").unwrap().n_bins(), 2);
        assert!(matches!(set.get("mnu_120to200_m_inv"), Err(Error::MissingHistogram(_))));
    }

    #[test]
    fn rejects_other_parquet() {
        let path = tmp_path("not_hists.parquet");
        ws_io::write_skim(&path, ws_core::Channel::Muon, "6000", &[]).unwrap();
        assert!(matches!(read_histograms(&path), Err(Error::SchemaMismatch(_))));
    }
}
