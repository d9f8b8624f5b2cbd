//! Parquet file read/write helpers.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use ws_core::{Error, Result};

fn open(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::MissingInput(format!("failed to open {}: {e}", path.display())))
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;
    let batches: std::result::Result<Vec<_>, _> = reader.collect();
    Ok(batches?)
}

/// Key-value metadata of the Arrow schema embedded in a Parquet file.
pub fn read_parquet_metadata(path: &Path) -> Result<HashMap<String, String>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    Ok(builder.schema().metadata().clone())
}

fn default_compression() -> Compression {
    // Snappy keeps the build free of native compression libraries.
    Compression::SNAPPY
}

/// Write one RecordBatch to a Parquet file.
///
/// A batch with zero rows still produces a valid file carrying the schema.
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let props = WriterProperties::builder().set_compression(default_compression()).build();

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;

    if batch.num_rows() > 0 {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
