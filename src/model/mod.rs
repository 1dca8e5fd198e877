pub mod config;
pub mod timing;
