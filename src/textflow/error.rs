use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{resource} not found with id: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{resource} already exists with {field}: {value}")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl TextflowError {
    pub fn history_not_found(id: impl ToString) -> Self {
        TextflowError::NotFound {
            resource: "History",
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextflowError>;
