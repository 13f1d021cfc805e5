//! Build Engine adapter: watches source roots, debounces changes, runs the
//! bundler for each target and reports one `BuildEvent` per build.
//!
//! ```text
//! notify → Debouncer → build command → classify → BuildEvent
//! ```

mod build_command;
mod build_event;
mod build_pipeline;
mod build_target;
mod change_kind;
mod classify;
mod debouncer;
mod directive;
mod error;
mod watcher;

#[cfg(test)]
mod tests;

pub use build_command::run_build;
pub use build_event::BuildEvent;
pub use build_pipeline::BuildPipeline;
pub use build_target::BuildTarget;
pub use change_kind::ChangeKind;
pub use classify::touches_server_components;
pub use debouncer::Debouncer;
pub use directive::{ModuleKind, classify_source, directives, is_script_module};
pub use error::{BuildError, Result};
