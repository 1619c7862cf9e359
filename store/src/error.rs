use thiserror::Error;

use veriflow_types::KycError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store file is corrupted: {0}")]
    Corruption(String),
}

impl From<StoreError> for KycError {
    fn from(e: StoreError) -> Self {
        KycError::Storage(e.to_string())
    }
}
