pub mod base;
pub mod disk;

pub use base::{StorageError, StorageItem};
pub use disk::DiskStorage;
