//! Configuration, logging and dependency wiring for the admin tool.

mod dependencies;
mod logging;

pub use dependencies::Dependencies;
pub use logging::init_tracing;
