pub mod config;
pub mod logging;

pub mod api;
pub mod detect;
pub mod download;
pub mod filename;
pub mod pipeline;
pub mod pool;
pub mod progress;
