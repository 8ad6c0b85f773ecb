use crate::error::Result;
use crate::stream::{EventStream, StreamAck, StreamEvent};

/// In-memory event stream used in tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStream {
    events: Vec<StreamEvent>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StreamEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StreamEvent> {
        self.events
    }
}

impl EventStream for MemoryStream {
    fn send(&mut self, partition_key: &str, data: &[u8]) -> Result<StreamAck> {
        let event = StreamEvent::new(partition_key, data);
        let ack = StreamAck {
            event_id: event.event_id.clone(),
            sequence_number: self.events.len() as u64,
        };
        self.events.push(event);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_records_events_in_order() {
        let mut stream = MemoryStream::new();
        stream.send("a_1", b"one").unwrap();
        let ack = stream.send("b_2", b"two").unwrap();

        assert_eq!(ack.sequence_number, 1);
        assert_eq!(stream.events().len(), 2);
        assert_eq!(stream.events()[1].partition_key, "b_2");
    }
}
