pub mod measurement_reader;

pub use measurement_reader::{MeasurementIterator, MeasurementReader};
