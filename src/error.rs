pub type RasterformResult<T> = Result<T, RasterformError>;

#[derive(thiserror::Error, Debug)]
pub enum RasterformError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("formula error: {0}")]
    Formula(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterformError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn formula(msg: impl Into<String>) -> Self {
        Self::Formula(msg.into())
    }
}
