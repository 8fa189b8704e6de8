pub type MazevineResult<T> = Result<T, MazevineError>;

#[derive(thiserror::Error, Debug)]
pub enum MazevineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MazevineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}
