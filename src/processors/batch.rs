use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::models::RawMeasurement;
use crate::processors::RecordTransformer;
use crate::stream::StreamEvent;
use crate::utils::constants::{FIELD_STN_CODE, FIELD_YEAR};
use crate::writers::{record_key, BlobStore};

enum Outcome {
    Transformed,
    Fallback,
}

/// Per-batch driver: decode, transform, and persist each event in turn.
///
/// A record that fails coercion is written untransformed (fallback); a record
/// that cannot be decoded, addressed, or stored is logged and skipped. The
/// batch itself always completes.
pub struct BatchProcessor<'a, S: BlobStore> {
    store: &'a S,
    transformer: RecordTransformer,
}

impl<'a, S: BlobStore> BatchProcessor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            transformer: RecordTransformer::new(),
        }
    }

    pub fn process_batch(&self, events: &[StreamEvent]) -> BatchSummary {
        let mut summary = BatchSummary::new(events.len());

        for event in events {
            match self.process_event(event) {
                Ok(Outcome::Transformed) => summary.transformed += 1,
                Ok(Outcome::Fallback) => summary.fallback += 1,
                Err(e) => {
                    warn!(event_id = %event.event_id, error = %e, "record skipped");
                    summary.skipped += 1;
                    summary.errors.push(format!("{}: {}", event.event_id, e));
                }
            }
        }

        info!(
            total = summary.total,
            transformed = summary.transformed,
            fallback = summary.fallback,
            skipped = summary.skipped,
            "batch complete"
        );

        summary
    }

    fn process_event(&self, event: &StreamEvent) -> Result<Outcome> {
        debug!(event_id = %event.event_id, partition_key = %event.partition_key, "processing stream event");

        let payload = event.decoded_data()?;
        let raw: RawMeasurement = serde_json::from_slice(&payload)?;

        // The blob path needs the identity fields from the raw payload; a
        // record without them has nowhere to go.
        let year = raw
            .year
            .clone()
            .ok_or_else(|| PipelineError::MissingField(FIELD_YEAR.to_string()))?;
        let stn_code = raw
            .stn_code
            .clone()
            .ok_or_else(|| PipelineError::MissingField(FIELD_STN_CODE.to_string()))?;

        let (body, outcome) = match self.transformer.transform(&raw) {
            Ok(record) => (serde_json::to_vec(&record)?, Outcome::Transformed),
            Err(e) => {
                warn!(
                    event_id = %event.event_id,
                    record = %raw.identity(),
                    error = %e,
                    "transform failed, storing original payload"
                );
                (payload.clone(), Outcome::Fallback)
            }
        };

        let key = record_key(&year, &stn_code, &event.event_id);
        self.store
            .put_object(&key, &body)
            .map_err(|e| PipelineError::Storage(format!("failed to store '{}': {}", key, e)))?;

        debug!(key, "record persisted");
        Ok(outcome)
    }
}

/// Outcome counts for one processed batch. Partial failure is reported, not
/// raised.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub total: usize,
    pub transformed: usize,
    pub fallback: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl BatchSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            transformed: 0,
            fallback: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Batch Processing Report ===\n");
        summary.push_str(&format!("Total Events: {}\n", self.total));
        summary.push_str(&format!("Transformed: {}\n", self.transformed));
        summary.push_str(&format!("Stored Untransformed: {}\n", self.fallback));
        summary.push_str(&format!("Skipped: {}\n", self.skipped));

        if !self.errors.is_empty() {
            summary.push_str("\nSkipped Events:\n");
            for (i, error) in self.errors.iter().take(10).enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, error));
            }
        }

        summary
    }
}
