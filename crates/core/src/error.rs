#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid value: {0}")]
    InvalidValue(#[from] strata_types::TypesError),
    #[error("invalid patient record {id}: {reason}")]
    InvalidPatient { id: String, reason: String },
    #[error("duplicate patient id: {0}")]
    DuplicatePatientId(String),
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patients: {0}")]
    Deserialization(serde_json::Error),
}

pub type StrataResult<T> = std::result::Result<T, StrataError>;
