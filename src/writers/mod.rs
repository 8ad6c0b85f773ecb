pub mod blob_store;

pub use blob_store::{record_key, BlobStore, FsBlobStore, MemoryBlobStore};
