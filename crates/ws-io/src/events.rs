//! Generator ntuple (Parquet) → [`GenEvent`] reading.
//!
//! # Input schema
//!
//! For a particle collection `C` (`GenPart` or `LHEPart`):
//!
//! | Column               | Arrow Type           | Required | Description                  |
//! |----------------------|----------------------|----------|------------------------------|
//! | `C_pdgId`            | `List<Int32/Int64>`  | yes      | PDG identity codes           |
//! | `C_status`           | `List<Int32/Int64>`  | yes      | Generator status codes       |
//! | `C_pt`, `C_eta`, `C_phi`, `C_mass` | `List<Float32/Float64>` | yes | Kinematics   |
//! | `nC`                 | `Int32/Int64`        | no       | Collection size (checked)    |
//! | `GenMET_pt`, `GenMET_phi` | `Float32/Float64` | yes     | Generator MET                |
//! | `Generator_scalePDF` | `Float32/Float64`    | yes      | Hard-process PDF scale       |
//!
//! A partition is a directory; every `*.parquet` file inside it is read, in
//! file-name order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, ListArray};
use arrow::datatypes::{Field, Float64Type, Int32Type, Schema};
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use ws_core::{Error, GenEvent, MissingEt, ParticleArrays, Result};

use crate::columns::{has_column, list_f64, list_i32, scalar_f64, scalar_i32};
use crate::parquet::{read_parquet_batches, write_parquet};

/// Generator MET magnitude column.
pub const MET_PT_COLUMN: &str = "GenMET_pt";
/// Generator MET azimuth column.
pub const MET_PHI_COLUMN: &str = "GenMET_phi";
/// Hard-process PDF scale column.
pub const SCALE_PDF_COLUMN: &str = "Generator_scalePDF";

/// Column names of one particle collection.
#[derive(Debug, Clone)]
pub struct CollectionColumns {
    /// `n<C>` counter column.
    pub count: String,
    /// `<C>_pdgId`.
    pub pdg_id: String,
    /// `<C>_status`.
    pub status: String,
    /// `<C>_pt`.
    pub pt: String,
    /// `<C>_eta`.
    pub eta: String,
    /// `<C>_phi`.
    pub phi: String,
    /// `<C>_mass`.
    pub mass: String,
}

impl CollectionColumns {
    /// Column names for collection `name` (e.g. `"GenPart"`).
    pub fn new(name: &str) -> Self {
        Self {
            count: format!("n{name}"),
            pdg_id: format!("{name}_pdgId"),
            status: format!("{name}_status"),
            pt: format!("{name}_pt"),
            eta: format!("{name}_eta"),
            phi: format!("{name}_phi"),
            mass: format!("{name}_mass"),
        }
    }
}

/// Convert one RecordBatch into events of collection `collection`.
pub fn record_batch_to_events(batch: &RecordBatch, collection: &str) -> Result<Vec<GenEvent>> {
    let cols = CollectionColumns::new(collection);

    let pdg_id = list_i32(batch, &cols.pdg_id)?;
    let status = list_i32(batch, &cols.status)?;
    let pt = list_f64(batch, &cols.pt)?;
    let eta = list_f64(batch, &cols.eta)?;
    let phi = list_f64(batch, &cols.phi)?;
    let mass = list_f64(batch, &cols.mass)?;
    let met_pt = scalar_f64(batch, MET_PT_COLUMN)?;
    let met_phi = scalar_f64(batch, MET_PHI_COLUMN)?;
    let scale_pdf = scalar_f64(batch, SCALE_PDF_COLUMN)?;
    let counts =
        if has_column(batch, &cols.count) { Some(scalar_i32(batch, &cols.count)?) } else { None };

    let rows = pdg_id.into_iter().zip(status).zip(pt).zip(eta).zip(phi).zip(mass).enumerate();
    let mut events = Vec::with_capacity(batch.num_rows());
    for (row, (((((pdg_id, status), pt), eta), phi), mass)) in rows {
        let particles = ParticleArrays::new(pdg_id, status, pt, eta, phi, mass)
            .map_err(|e| Error::SchemaMismatch(format!("{collection} row {row}: {e}")))?;
        if let Some(counts) = &counts {
            let n = counts[row];
            if n < 0 || n as usize != particles.len() {
                return Err(Error::SchemaMismatch(format!(
                    "row {row}: {} = {n} but {} has {} entries",
                    cols.count,
                    cols.pdg_id,
                    particles.len()
                )));
            }
        }
        events.push(GenEvent {
            particles,
            met: MissingEt { pt: met_pt[row], phi: met_phi[row] },
            scale_pdf: scale_pdf[row],
        });
    }
    Ok(events)
}

/// Read all events of one Parquet file.
pub fn read_event_file(path: &Path, collection: &str) -> Result<Vec<GenEvent>> {
    let batches = read_parquet_batches(path)?;
    let mut events = Vec::new();
    for batch in &batches {
        let chunk = record_batch_to_events(batch, collection).map_err(|e| match e {
            Error::MissingColumn(c) => Error::MissingColumn(format!("{c} (in {})", path.display())),
            other => other,
        })?;
        events.extend(chunk);
    }
    tracing::debug!(path = %path.display(), events = events.len(), "read event file");
    Ok(events)
}

/// Event files of a partition directory, sorted by name.
pub fn partition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingInput(format!("partition directory {} not found", dir.display())));
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "parquet"))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(Error::MissingInput(format!("no *.parquet files in {}", dir.display())));
    }
    Ok(files)
}

/// Read every event file of a partition directory, preserving file order.
pub fn read_partition(dir: &Path, collection: &str) -> Result<Vec<GenEvent>> {
    let files = partition_files(dir)?;
    let per_file: Vec<Vec<GenEvent>> =
        files.par_iter().map(|f| read_event_file(f, collection)).collect::<Result<_>>()?;
    Ok(per_file.into_iter().flatten().collect())
}

/// Build a RecordBatch in the input schema from events.
///
/// Used to produce partition files from other sources and for fixtures.
pub fn events_to_record_batch(events: &[GenEvent], collection: &str) -> Result<RecordBatch> {
    let cols = CollectionColumns::new(collection);

    let list_i = |f: fn(&GenEvent) -> Vec<i32>| -> ArrayRef {
        Arc::new(ListArray::from_iter_primitive::<Int32Type, _, _>(
            events.iter().map(|ev| Some(f(ev).into_iter().map(Some))),
        ))
    };
    let list_f = |f: fn(&GenEvent) -> Vec<f64>| -> ArrayRef {
        Arc::new(ListArray::from_iter_primitive::<Float64Type, _, _>(
            events.iter().map(|ev| Some(f(ev).into_iter().map(Some))),
        ))
    };
    let scalar = |f: fn(&GenEvent) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(events.iter().map(f)))
    };

    let named: Vec<(String, ArrayRef)> = vec![
        (
            cols.count.clone(),
            Arc::new(Int32Array::from_iter_values(
                events.iter().map(|ev| ev.particles.len() as i32),
            )) as ArrayRef,
        ),
        (cols.pdg_id.clone(), list_i(|ev| ev.particles.pdg_ids().to_vec())),
        (cols.status.clone(), list_i(|ev| ev.particles.statuses().to_vec())),
        (cols.pt.clone(), list_f(|ev| ev.particles.iter().map(|p| p.pt).collect())),
        (cols.eta.clone(), list_f(|ev| ev.particles.iter().map(|p| p.eta).collect())),
        (cols.phi.clone(), list_f(|ev| ev.particles.iter().map(|p| p.phi).collect())),
        (cols.mass.clone(), list_f(|ev| ev.particles.iter().map(|p| p.mass).collect())),
        (MET_PT_COLUMN.to_string(), scalar(|ev| ev.met.pt)),
        (MET_PHI_COLUMN.to_string(), scalar(|ev| ev.met.phi)),
        (SCALE_PDF_COLUMN.to_string(), scalar(|ev| ev.scale_pdf)),
    ];

    let fields: Vec<Field> =
        named.iter().map(|(n, a)| Field::new(n, a.data_type().clone(), true)).collect();
    let arrays: Vec<ArrayRef> = named.into_iter().map(|(_, a)| a).collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Write events to a Parquet file in the input schema.
pub fn write_event_file(path: &Path, events: &[GenEvent], collection: &str) -> Result<()> {
    let batch = events_to_record_batch(events, collection)?;
    write_parquet(path, &batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::Particle;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("wskim_io_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&p);
        std::fs::create_dir_all(&p).unwrap();
        p
    }

    fn event(ids: &[(i32, i32)], met_pt: f64) -> GenEvent {
        let particles = ids
            .iter()
            .enumerate()
            .map(|(i, &(pdg_id, status))| Particle {
                pdg_id,
                status,
                pt: 10.0 * (i + 1) as f64,
                eta: 0.1 * i as f64,
                phi: -0.2 * i as f64,
                mass: 0.5,
            })
            .collect();
        GenEvent { particles, met: MissingEt { pt: met_pt, phi: 1.0 }, scale_pdf: 91.0 }
    }

    #[test]
    fn events_roundtrip_through_parquet() {
        let dir = tmp_dir("roundtrip");
        let events = vec![event(&[(2, 21), (13, 1), (-14, 1)], 30.0), event(&[], 5.0)];
        let path = dir.join("a.parquet");
        write_event_file(&path, &events, "GenPart").unwrap();

        let back = read_event_file(&path, "GenPart").unwrap();
        assert_eq!(back, events);
    }

    #[test]
    fn partition_reads_files_in_name_order() {
        let dir = tmp_dir("partition");
        write_event_file(&dir.join("b.parquet"), &[event(&[(15, 1)], 2.0)], "LHEPart").unwrap();
        write_event_file(&dir.join("a.parquet"), &[event(&[(16, 1)], 1.0)], "LHEPart").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let events = read_partition(&dir, "LHEPart").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].met.pt, 1.0);
        assert_eq!(events[1].met.pt, 2.0);
    }

    #[test]
    fn wrong_collection_is_missing_column() {
        let dir = tmp_dir("wrong_collection");
        let path = dir.join("a.parquet");
        write_event_file(&path, &[event(&[(13, 1)], 1.0)], "GenPart").unwrap();
        let err = read_event_file(&path, "LHEPart").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c.starts_with("LHEPart_pdgId")));
    }

    #[test]
    fn missing_partition_directory() {
        let dir = tmp_dir("missing");
        let err = read_partition(&dir.join("nope"), "GenPart").unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        let err = read_partition(&dir, "GenPart").unwrap_err();
        assert!(err.to_string().contains("no *.parquet files"));
    }
}
