pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
