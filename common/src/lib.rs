pub mod config;
pub mod target;
