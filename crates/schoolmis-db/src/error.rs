use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{entity} with this {field} already exists")]
    Duplicate { entity: &'static str, field: String },

    /// The backend could not be reached. This is what opens the circuit.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Backend(String),

    #[error("Invalid document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
