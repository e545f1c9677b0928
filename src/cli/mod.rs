//! CLI command implementations

mod inspect;
mod progress;
mod run;
mod style;

pub use inspect::run_inspect;
pub use progress::CliProgress;
pub use run::run_intake_command;
