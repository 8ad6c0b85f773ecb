use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::stream::{EventStream, StreamAck, StreamEvent};

/// File-backed event stream: one JSON event per line, appended in send order.
///
/// Stands in for the managed stream service. Delivery is ordered and
/// at-least-once: events stay in the spool after reading.
pub struct SpoolStream {
    path: PathBuf,
    next_sequence: u64,
}

impl SpoolStream {
    /// Open (or create) the spool for a named stream under the data directory
    pub fn open(data_dir: &Path, stream_name: &str) -> Result<Self> {
        let dir = data_dir.join("streams");
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.jsonl", stream_name));

        let next_sequence = if path.exists() {
            let file = File::open(&path)?;
            BufReader::new(file).lines().count() as u64
        } else {
            0
        };

        Ok(Self {
            path,
            next_sequence,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every event currently in the spool, oldest first
    pub fn read_events(&self) -> Result<Vec<StreamEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut events = Vec::new();

        for line_result in BufReader::new(file).lines() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            let event: StreamEvent = serde_json::from_str(&line).map_err(|e| {
                PipelineError::Stream(format!("corrupt spool entry in {}: {}", self.path.display(), e))
            })?;
            events.push(event);
        }

        Ok(events)
    }
}

impl EventStream for SpoolStream {
    fn send(&mut self, partition_key: &str, data: &[u8]) -> Result<StreamAck> {
        let event = StreamEvent::new(partition_key, data);
        let line = serde_json::to_string(&event)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        let sequence_number = self.next_sequence;
        self.next_sequence += 1;

        Ok(StreamAck {
            event_id: event.event_id,
            sequence_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_send_then_read_preserves_order_and_payload() {
        let dir = TempDir::new().unwrap();
        let mut spool = SpoolStream::open(dir.path(), "test-stream").unwrap();

        let first = spool.send("1393_2019", b"first").unwrap();
        let second = spool.send("1475_2019", b"second").unwrap();
        assert_eq!(first.sequence_number, 0);
        assert_eq!(second.sequence_number, 1);

        let events = spool.read_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].partition_key, "1393_2019");
        assert_eq!(events[0].decoded_data().unwrap(), b"first".to_vec());
        assert_eq!(events[1].event_id, second.event_id);
    }

    #[test]
    fn test_reopen_continues_sequence() {
        let dir = TempDir::new().unwrap();

        let mut spool = SpoolStream::open(dir.path(), "test-stream").unwrap();
        spool.send("k", b"one").unwrap();

        let mut reopened = SpoolStream::open(dir.path(), "test-stream").unwrap();
        let ack = reopened.send("k", b"two").unwrap();
        assert_eq!(ack.sequence_number, 1);
        assert_eq!(reopened.read_events().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_stream_reads_no_events() {
        let dir = TempDir::new().unwrap();
        let spool = SpoolStream::open(dir.path(), "unused").unwrap();
        assert!(spool.read_events().unwrap().is_empty());
    }
}
