use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] devloop_config::ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] devloop_build::BuildError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
