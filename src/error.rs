use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can abort a chart generation run.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("{}: missing required column '{column}'", path.display())]
    Schema { path: PathBuf, column: String },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ChartError::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
