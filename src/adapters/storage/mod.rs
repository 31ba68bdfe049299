pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use memory::InMemoryObjectStore;
#[cfg(feature = "s3")]
pub use s3::{build_s3_client, S3ObjectStore};
