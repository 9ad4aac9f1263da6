use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Invalid assessment input: {0}")]
    InvalidAssessmentInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt stored state under {key}: {reason}")]
    CorruptState { key: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Stable machine-readable code for the presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotAuthenticated => "not_authenticated",
            AppError::InvalidAssessmentInput(_) => "invalid_assessment_input",
            AppError::Validation(_) => "validation_error",
            AppError::CorruptState { .. } => "corrupt_state",
            AppError::Storage(_) => "storage_error",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
