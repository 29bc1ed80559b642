//! CLI command handlers. Each command is in its own file.

mod fetch;
mod run;
mod worker;

pub use fetch::run_fetch;
pub use run::run_pipeline_cmd;
pub use worker::run_worker;
