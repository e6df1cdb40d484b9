pub mod blobs;
pub mod config;
pub mod logging;
pub mod storage;
