pub mod ingestor;

pub use ingestor::{IngestSummary, Ingestor};
