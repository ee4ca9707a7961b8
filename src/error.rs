use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Payment provider is not available")]
    ProviderUnavailable,
    #[error("Payment provider error: {0}")]
    ProviderError(String),
    #[error("Payment provider did not respond in time")]
    ProviderTimeout,
    #[error("Payment provider initialization error: {0}")]
    InitializationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
