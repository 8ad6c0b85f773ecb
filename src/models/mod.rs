pub mod measurement;
pub mod transformed;
pub mod wqi;

pub use measurement::RawMeasurement;
pub use transformed::TransformedRecord;
pub use wqi::WqiCategory;
