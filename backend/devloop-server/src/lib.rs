pub mod cli;
pub mod dev_loop;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use crate::cli::Cli;
pub use crate::dev_loop::DevLoop;
pub use crate::health::{HealthState, RestartReport};
pub use crate::routes::build_router;
