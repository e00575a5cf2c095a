pub mod s3_file_storage;

pub use s3_file_storage::S3FileStorage;
