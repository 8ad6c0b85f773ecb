use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use memmap2::Mmap;

use crate::error::{PipelineError, Result};
use crate::models::RawMeasurement;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

pub struct MeasurementReader {
    use_mmap: bool,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read all measurement rows from a CSV file
    pub fn read_measurements(&self, path: &Path) -> Result<Vec<RawMeasurement>> {
        if self.use_mmap {
            self.read_measurements_mmap(path)
        } else {
            self.read_measurements_buffered(path)
        }
    }

    /// Stream measurement rows without loading the whole file
    pub fn stream_measurements(&self, path: &Path) -> Result<MeasurementIterator> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let csv_reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        Ok(MeasurementIterator {
            inner: csv_reader.into_deserialize(),
        })
    }

    fn read_measurements_buffered(&self, path: &Path) -> Result<Vec<RawMeasurement>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut csv_reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self::collect_records(&mut csv_reader)
    }

    /// Memory-mapped read path for large survey exports
    fn read_measurements_mmap(&self, path: &Path) -> Result<Vec<RawMeasurement>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let mut csv_reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(&mmap[..]);

        Self::collect_records(&mut csv_reader)
    }

    fn collect_records<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<Vec<RawMeasurement>> {
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RawMeasurement = result?;
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over measurement rows, yielding one parse result per row
pub struct MeasurementIterator {
    inner: csv::DeserializeRecordsIntoIter<BufReader<File>, RawMeasurement>,
}

impl Iterator for MeasurementIterator {
    type Item = Result<RawMeasurement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|result| result.map_err(PipelineError::from))
    }
}
