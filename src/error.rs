/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Converts a failed read into its safe default.
///
/// Background reads degrade the view instead of failing it: the error is
/// logged and the caller receives an empty/default value. User-triggered
/// writes never go through this path; they return `AppResult` directly so
/// the UI can surface the failure.
pub(crate) trait FailSoft<T> {
    fn soft(self, operation: &'static str) -> T;
}

impl<T: Default> FailSoft<T> for AppResult<T> {
    fn soft(self, operation: &'static str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, operation, "read failed, substituting default");
                T::default()
            }
        }
    }
}
