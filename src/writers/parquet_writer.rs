use crate::error::{ProcessingError, Result};
use crate::models::EnrichedRecord;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use crate::writers::metadata_columns;
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Configuration(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Write enriched records, one record batch per row group.
    pub fn write_records(&self, records: &[EnrichedRecord], path: &Path) -> Result<()> {
        let meta_columns = metadata_columns(records);
        let schema = self.create_schema(&meta_columns);

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in records.chunks(self.row_group_size) {
            let batch = self.records_to_batch(chunk, &meta_columns, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Metadata columns are kept as text; computed UTM columns are nullable.
    fn create_schema(&self, meta_columns: &[String]) -> Arc<Schema> {
        let mut fields: Vec<Field> = meta_columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();

        fields.extend([
            Field::new("lat_dd", DataType::Float64, false),
            Field::new("lon_dd", DataType::Float64, false),
            Field::new("lat_dms", DataType::Utf8, false),
            Field::new("lon_dms", DataType::Utf8, false),
            Field::new("easting_utm", DataType::Float64, true),
            Field::new("northing_utm", DataType::Float64, true),
            Field::new("zone_utm", DataType::Utf8, true),
        ]);

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(
        &self,
        records: &[EnrichedRecord],
        meta_columns: &[String],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let mut columns: Vec<ArrayRef> = meta_columns
            .iter()
            .map(|name| {
                let values: Vec<Option<String>> = records
                    .iter()
                    .map(|r| r.metadata_value(name).map(|v| v.to_string()))
                    .collect();
                Arc::new(StringArray::from(values)) as ArrayRef
            })
            .collect();

        let latitudes: Vec<f64> = records.iter().map(|r| r.lat_dd()).collect();
        let longitudes: Vec<f64> = records.iter().map(|r| r.lon_dd()).collect();
        let lat_dms: Vec<String> = records.iter().map(|r| r.lat_dms.clone()).collect();
        let lon_dms: Vec<String> = records.iter().map(|r| r.lon_dms.clone()).collect();
        let eastings: Vec<Option<f64>> = records.iter().map(|r| r.easting_utm()).collect();
        let northings: Vec<Option<f64>> = records.iter().map(|r| r.northing_utm()).collect();
        let zones: Vec<Option<String>> = records
            .iter()
            .map(|r| r.zone_utm().map(str::to_string))
            .collect();

        columns.push(Arc::new(Float64Array::from(latitudes)));
        columns.push(Arc::new(Float64Array::from(longitudes)));
        columns.push(Arc::new(StringArray::from(lat_dms)));
        columns.push(Arc::new(StringArray::from(lon_dms)));
        columns.push(Arc::new(Float64Array::from(eastings)));
        columns.push(Arc::new(Float64Array::from(northings)));
        columns.push(Arc::new(StringArray::from(zones)));

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
            avg_rows
        )
    }
}
