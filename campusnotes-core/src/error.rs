use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
