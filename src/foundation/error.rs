/// Convenience result type used across scenekit.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by the render facade.
///
/// Only document-level problems surface here. Failures while painting a single element
/// (bad colors, unreachable images, rasterizer errors) are recovered inside the backends.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid scene document or render options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image source could not be resolved into bytes.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A backend failed to finalize its output.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing scene documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Typed failure of the image source fetcher.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("fetch '{url}' failed with HTTP status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Connection, DNS, TLS or timeout failure.
    #[error("fetch '{url}' failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// Response body exceeded the configured size cap.
    #[error("fetch '{url}' exceeded {limit} bytes")]
    TooLarge {
        /// Requested URL.
        url: String,
        /// Configured cap in bytes.
        limit: u64,
    },

    /// Source is neither a `data:` URI nor an `http(s)` URL.
    #[error("unsupported image source '{0}'")]
    UnsupportedScheme(String),

    /// `data:` URI without a payload separator or with an undecodable payload.
    #[error("malformed data uri: {0}")]
    MalformedDataUri(String),

    /// IO error while reading a response body.
    #[error("read response body: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
