//! error types
//!
//! structured errors for config, schema loading, model introspection, and
//! rendering.

use std::path::PathBuf;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the generator and its loaders
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error at {}: {source}", path.display())]
    Io {
        /// file that could not be read or written
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("schema fetch failed with status {status}: {body}")]
    Fetch {
        /// http status returned by the schema endpoint
        status: u16,
        /// raw response body
        body: String,
    },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("no interface found for name {type_name} in {}", path.display())]
    ModelNotFound {
        /// declared model type name
        type_name: String,
        /// model source file that was searched
        path: PathBuf,
    },

    #[error("failed to parse model source {}: {message}", path.display())]
    ModelParse {
        /// model source file that failed to parse
        path: PathBuf,
        /// parser diagnostic
        message: String,
    },

    #[error("type {object} references unknown input type {input}")]
    UnknownInputType {
        /// object type whose namespace is being rendered
        object: String,
        /// associated input type missing from the catalog
        input: String,
    },
}

impl Error {
    /// wrap an io error with the path it concerns
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// true if the error points at a mismatch between the model map and its sources
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::ModelNotFound { .. } | Error::ModelParse { .. })
    }
}
