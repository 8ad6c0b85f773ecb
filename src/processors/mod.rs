pub mod batch;
pub mod transformer;

pub use batch::{BatchProcessor, BatchSummary};
pub use transformer::{RecordTransformer, TransformError, ValidationReport};
