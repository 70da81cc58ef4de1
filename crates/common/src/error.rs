use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate stop: entry and stop-loss coincide at {price}")]
    DegenerateStop { price: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
