pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("render failed for page {page}")]
    Render {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("{0}")]
    Document(String),
    #[error("document is not loaded")]
    NotLoaded,
    #[error("The \"Find\" feature will not work with this document")]
    FindNotSupported,
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Why an open request produced no document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Unhandled MIME type: '{0}'")]
    UnhandledMimeType(String),
    #[error("{0}")]
    BackendLoadFailed(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn render(page: usize, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Render {
            page,
            source: Box::new(source),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }
}
