//! Skim output: [`SkimRow`] ↔ Parquet.
//!
//! # Schema: `wskim_skim_v1`
//!
//! Twenty columns in [`Channel::columns`] order. Scalars are `Float64`
//! (identity codes `Int32`); the three four-vector columns are
//! `Struct<pt, eta, phi, mass>` of `Float64`.
//!
//! ## Parquet key-value metadata
//!
//! | Key                    | Value                |
//! |------------------------|----------------------|
//! | `wskim.schema_version` | `"wskim_skim_v1"`    |
//! | `wskim.channel`        | `"muon"` / `"tau"`   |
//! | `wskim.partition`      | partition name       |

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StructArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use ws_core::{Channel, PtEtaPhiM, Result, SkimRow};

use crate::columns::scalar_f64;
use crate::parquet::{read_parquet_batches, read_parquet_metadata, write_parquet};
use crate::{META_KEY_CHANNEL, META_KEY_PARTITION, META_KEY_SCHEMA_VERSION};

/// Schema version string embedded in skim files.
pub const SKIM_SCHEMA_V1: &str = "wskim_skim_v1";

fn f64_column(rows: &[SkimRow], get: fn(&SkimRow) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(rows.iter().map(get)))
}

fn i32_column(rows: &[SkimRow], get: fn(&SkimRow) -> i32) -> ArrayRef {
    Arc::new(Int32Array::from_iter_values(rows.iter().map(get)))
}

fn p4_column(rows: &[SkimRow], get: fn(&SkimRow) -> PtEtaPhiM) -> ArrayRef {
    let component = |name: &str, f: fn(&PtEtaPhiM) -> f64| {
        (
            Arc::new(Field::new(name, DataType::Float64, false)),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| f(&get(r))))) as ArrayRef,
        )
    };
    Arc::new(StructArray::from(vec![
        component("pt", |v| v.pt),
        component("eta", |v| v.eta),
        component("phi", |v| v.phi),
        component("mass", |v| v.m),
    ]))
}

/// Build the skim RecordBatch of one partition.
pub fn skim_rows_to_record_batch(
    channel: Channel,
    partition: &str,
    rows: &[SkimRow],
) -> Result<RecordBatch> {
    let arrays: [ArrayRef; ws_core::channel::SKIM_COLUMN_COUNT] = [
        f64_column(rows, |r| r.lepton.pt),
        f64_column(rows, |r| r.lepton.eta),
        f64_column(rows, |r| r.lepton.phi),
        f64_column(rows, |r| r.lepton.mass),
        i32_column(rows, |r| r.lepton.pdg_id),
        f64_column(rows, |r| r.neutrino.pt),
        f64_column(rows, |r| r.neutrino.eta),
        f64_column(rows, |r| r.neutrino.phi),
        f64_column(rows, |r| r.neutrino.mass),
        i32_column(rows, |r| r.neutrino.pdg_id),
        f64_column(rows, |r| r.met.pt),
        f64_column(rows, |r| r.met.phi),
        p4_column(rows, |r| r.p4_l),
        p4_column(rows, |r| r.p4_n),
        p4_column(rows, |r| r.p4),
        f64_column(rows, |r| r.m_inv),
        f64_column(rows, |r| r.scale_pdf),
        f64_column(rows, |r| r.mt),
        f64_column(rows, |r| r.mt_met),
        f64_column(rows, |r| r.weight),
    ];

    let fields: Vec<Field> = channel
        .columns()
        .iter()
        .zip(arrays.iter())
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
        .collect();

    let metadata = HashMap::from([
        (META_KEY_SCHEMA_VERSION.to_string(), SKIM_SCHEMA_V1.to_string()),
        (META_KEY_CHANNEL.to_string(), channel.name().to_string()),
        (META_KEY_PARTITION.to_string(), partition.to_string()),
    ]);
    let schema = Arc::new(Schema::new(fields).with_metadata(metadata));

    Ok(RecordBatch::try_new(schema, arrays.to_vec())?)
}

/// Write the skim of one partition.
pub fn write_skim(path: &Path, channel: Channel, partition: &str, rows: &[SkimRow]) -> Result<()> {
    let batch = skim_rows_to_record_batch(channel, partition, rows)?;
    write_parquet(path, &batch)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "skim written");
    Ok(())
}

/// Key-value metadata of a skim file.
pub fn skim_metadata(path: &Path) -> Result<HashMap<String, String>> {
    read_parquet_metadata(path)
}

/// Read scalar columns of a skim as `f64` (identity codes are widened).
///
/// Returns the number of rows and the requested columns by name.
pub fn read_skim_columns(path: &Path, names: &[&str]) -> Result<(usize, HashMap<String, Vec<f64>>)> {
    let batches = read_parquet_batches(path)?;
    let mut n_rows = 0;
    let mut columns: HashMap<String, Vec<f64>> =
        names.iter().map(|n| (n.to_string(), Vec::new())).collect();
    for batch in &batches {
        n_rows += batch.num_rows();
        for name in names {
            let values = scalar_f64(batch, name)?;
            if let Some(col) = columns.get_mut(*name) {
                col.extend(values);
            }
        }
    }
    Ok((n_rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::{Error, MissingEt, Particle};

    fn row(weight: f64) -> SkimRow {
        let lepton = Particle { pdg_id: 13, status: 1, pt: 400.0, eta: 0.5, phi: 1.0, mass: 0.1 };
        let neutrino =
            Particle { pdg_id: -14, status: 1, pt: 380.0, eta: -0.2, phi: -2.0, mass: 0.0 };
        SkimRow {
            lepton,
            neutrino,
            met: MissingEt { pt: 370.0, phi: -2.1 },
            p4_l: lepton.p4(),
            p4_n: neutrino.p4(),
            p4: lepton.p4() + neutrino.p4(),
            m_inv: 780.0,
            scale_pdf: 800.0,
            mt: 770.0,
            mt_met: 760.0,
            weight,
        }
    }

    #[test]
    fn batch_has_channel_columns() {
        let batch = skim_rows_to_record_batch(Channel::Tau, "400to800", &[row(0.5)]).unwrap();
        let names: Vec<String> =
            batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, Channel::Tau.columns().map(String::from).to_vec());
        assert!(matches!(batch.schema().field(12).data_type(), DataType::Struct(_)));
        assert_eq!(batch.schema().field(4).data_type(), &DataType::Int32);
    }

    #[test]
    fn empty_skim_keeps_schema() {
        let mut p = std::env::temp_dir();
        p.push(format!("wskim_io_{}_empty_skim.parquet", std::process::id()));
        write_skim(&p, Channel::Muon, "6000", &[]).unwrap();

        let (n, cols) = read_skim_columns(&p, &["m_inv", "pdgId_l", "weight"]).unwrap();
        assert_eq!(n, 0);
        assert!(cols["m_inv"].is_empty());

        let meta = skim_metadata(&p).unwrap();
        assert_eq!(meta.get(META_KEY_CHANNEL).map(String::as_str), Some("muon"));
        assert_eq!(meta.get(META_KEY_PARTITION).map(String::as_str), Some("6000"));
    }

    #[test]
    fn read_back_scalars() {
        let mut p = std::env::temp_dir();
        p.push(format!("wskim_io_{}_scalars_skim.parquet", std::process::id()));
        write_skim(&p, Channel::Muon, "400to800", &[row(0.25), row(0.75)]).unwrap();

        let (n, cols) = read_skim_columns(&p, &["pdgId_n", "weight"]).unwrap();
        assert_eq!(n, 2);
        assert_eq!(cols["pdgId_n"], vec![-14.0, -14.0]);
        assert_eq!(cols["weight"], vec![0.25, 0.75]);
        assert!(matches!(
            read_skim_columns(&p, &["lhe_m_inv"]),
            Err(Error::MissingColumn(_))
        ));
    }
}
