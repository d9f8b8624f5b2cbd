//! Integration tests: read NanoAOD-style ntuples with narrow column types.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float32Array, Int64Array, ListArray};
use arrow::datatypes::{Field, Float32Type, Int32Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use ws_core::Error;
use ws_io::parquet::write_parquet;
use ws_io::read_event_file;

fn tmp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wskim_io_it_{}_{name}", std::process::id()))
}

fn nano_batch(counts: Vec<i64>) -> RecordBatch {
    let ids = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(2), Some(13), Some(-14)]),
        Some(vec![Some(15)]),
    ]);
    let status = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(21), Some(1), Some(1)]),
        Some(vec![Some(1)]),
    ]);
    let f32_list = |rows: Vec<Vec<f32>>| -> ArrayRef {
        Arc::new(ListArray::from_iter_primitive::<Float32Type, _, _>(
            rows.into_iter().map(|r| Some(r.into_iter().map(Some))),
        ))
    };
    let cols: Vec<(&str, ArrayRef)> = vec![
        ("nGenPart", Arc::new(Int64Array::from(counts)) as ArrayRef),
        ("GenPart_pdgId", Arc::new(ids) as ArrayRef),
        ("GenPart_status", Arc::new(status) as ArrayRef),
        ("GenPart_pt", f32_list(vec![vec![1.0, 40.5, 38.25], vec![7.0]])),
        ("GenPart_eta", f32_list(vec![vec![0.0, 0.5, -0.5], vec![1.0]])),
        ("GenPart_phi", f32_list(vec![vec![0.0, 1.0, -2.0], vec![3.0]])),
        ("GenPart_mass", f32_list(vec![vec![0.0, 0.10546875, 0.0], vec![1.75]])),
        ("GenMET_pt", Arc::new(Float32Array::from(vec![35.5f32, 2.0])) as ArrayRef),
        ("GenMET_phi", Arc::new(Float32Array::from(vec![-2.5f32, 0.0])) as ArrayRef),
        ("Generator_scalePDF", Arc::new(Float32Array::from(vec![80.0f32, 91.0])) as ArrayRef),
    ];
    let fields: Vec<Field> =
        cols.iter().map(|(n, a)| Field::new(*n, a.data_type().clone(), true)).collect();
    let arrays = cols.into_iter().map(|(_, a)| a).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

#[test]
fn narrow_types_are_widened() {
    let path = tmp_path("nano.parquet");
    write_parquet(&path, &nano_batch(vec![3, 1])).unwrap();

    let events = read_event_file(&path, "GenPart").unwrap();
    assert_eq!(events.len(), 2);
    let muon = events[0].particles.get(1).unwrap();
    assert_eq!(muon.pdg_id, 13);
    assert_eq!(muon.pt, 40.5);
    assert_eq!(muon.mass, 0.10546875);
    assert_eq!(events[0].met.pt, 35.5);
    assert_eq!(events[1].scale_pdf, 91.0);
    assert_eq!(events[1].particles.len(), 1);
}

#[test]
fn count_column_must_match_lists() {
    let path = tmp_path("nano_bad_count.parquet");
    write_parquet(&path, &nano_batch(vec![3, 2])).unwrap();
    let err = read_event_file(&path, "GenPart").unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(ref m) if m.contains("nGenPart")));
}

#[test]
fn int64_ids_accepted() {
    let ids = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![Some(vec![Some(13i64)])]);
    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(vec![Field::new("ids", ids.data_type().clone(), true)])),
        vec![Arc::new(ids) as ArrayRef],
    )
    .unwrap();
    assert_eq!(ws_io::columns::list_i32(&batch, "ids").unwrap(), vec![vec![13]]);
}
