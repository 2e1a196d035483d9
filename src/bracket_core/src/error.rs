use thiserror::Error;

#[derive(Error, Debug)]
pub enum BracketError {
    #[error("Madness level must be between 0 and 10, got {0}")]
    InvalidMadness(i64),

    #[error("Seed must be between 1 and 16, got {0}")]
    InvalidSeed(i64),

    #[error("Seed {0} cannot play itself")]
    EqualSeeds(u8),

    #[error("Override probability must be strictly between 0 and 1, got {0}")]
    InvalidProbability(f64),

    #[error("Override file line {line}: {message}")]
    OverrideFile { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BracketError>;
