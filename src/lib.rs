pub mod config;
pub mod errors;
pub mod import;
pub mod storage;
pub mod thumbnail;
