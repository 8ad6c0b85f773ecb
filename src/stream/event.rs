use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PipelineError, Result};

/// One record in flight between the ingestor and the transformer.
///
/// The body is base64-encoded, mirroring the wire form of the managed stream
/// service this spool stands in for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub event_id: String,
    pub partition_key: String,
    pub data: String,
    pub arrival_timestamp: String,
}

impl StreamEvent {
    pub fn new(partition_key: &str, data: &[u8]) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            partition_key: partition_key.to_string(),
            data: BASE64.encode(data),
            arrival_timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Decode the base64 body back into the message bytes
    pub fn decoded_data(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.data)
            .map_err(|e| PipelineError::Stream(format!("invalid base64 payload: {}", e)))
    }
}

/// Acknowledgment returned by a stream for each accepted record
#[derive(Debug, Clone, PartialEq)]
pub struct StreamAck {
    pub event_id: String,
    pub sequence_number: u64,
}

/// Destination for measurement events, one send per record
pub trait EventStream {
    fn send(&mut self, partition_key: &str, data: &[u8]) -> Result<StreamAck>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_event_round_trips_payload() {
        let payload = br#"{"STN Code":"1393","pH":"7.8"}"#;
        let event = StreamEvent::new("1393_2019", payload);

        assert_eq!(event.partition_key, "1393_2019");
        assert_eq!(event.decoded_data().unwrap(), payload.to_vec());
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = StreamEvent::new("k", b"x");
        let b = StreamEvent::new("k", b"x");
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_corrupt_body_is_rejected() {
        let mut event = StreamEvent::new("k", b"x");
        event.data = "not base64!!".to_string();
        assert!(event.decoded_data().is_err());
    }
}
