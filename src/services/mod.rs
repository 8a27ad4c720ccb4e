pub mod storage;
pub mod upload;

pub use storage::{init_storage_service, FileInfo, PresignedUrlParams, S3StorageService, StorageError, StorageService};
