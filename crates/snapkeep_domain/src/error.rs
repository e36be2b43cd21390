use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key=value pair: {0}")]
    InvalidKeyValue(String),
}
