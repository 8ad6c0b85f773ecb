use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::models::RawMeasurement;
use crate::readers::MeasurementReader;
use crate::stream::EventStream;
use crate::utils::progress::ProgressReporter;

/// Outcome of one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows_sent: usize,
}

/// Streams measurement rows into an event stream, one message per row,
/// pausing between sends.
///
/// There is no retry or failure accounting: the first error aborts the run.
pub struct Ingestor<S: EventStream> {
    stream: S,
    delay: Duration,
}

impl<S: EventStream> Ingestor<S> {
    pub fn new(stream: S, delay: Duration) -> Self {
        Self { stream, delay }
    }

    /// Read a CSV file and stream every row
    pub async fn ingest_file(
        &mut self,
        path: &Path,
        reader: &MeasurementReader,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestSummary> {
        let records = reader.read_measurements(path)?;
        self.ingest_records(&records, progress).await
    }

    /// Stream the given rows in order
    pub async fn ingest_records(
        &mut self,
        records: &[RawMeasurement],
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestSummary> {
        for (index, record) in records.iter().enumerate() {
            let partition_key = record.partition_key()?;
            let body = serde_json::to_vec(record)?;

            let ack = self.stream.send(&partition_key, &body)?;
            debug!(
                index,
                partition_key = %partition_key,
                event_id = %ack.event_id,
                sequence = ack.sequence_number,
                "record sent"
            );

            if let Some(progress) = progress {
                progress.increment(1);
            }

            // Fixed pause between sends; rate limiting, not backpressure
            if index + 1 < records.len() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(IngestSummary {
            rows_sent: records.len(),
        })
    }

    /// Hand the stream back, e.g. for inspection after a run
    pub fn into_stream(self) -> S {
        self.stream
    }
}
