pub mod event;
pub mod memory;
pub mod spool;

pub use event::{EventStream, StreamAck, StreamEvent};
pub use memory::MemoryStream;
pub use spool::SpoolStream;
