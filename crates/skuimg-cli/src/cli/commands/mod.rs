//! CLI command handlers, one file per command.

mod candidates;
mod probe;
mod run;

pub use candidates::run_candidates;
pub use probe::run_probe;
pub use run::run_sync;
