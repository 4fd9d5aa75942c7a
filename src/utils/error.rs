use axum::http::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// Closed taxonomy: every failure the API can surface maps to exactly one
// variant, and every variant to exactly one HTTP status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    ServiceUnavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            source: None,
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        match &mut self {
            ApiError::BadRequest { source, .. }
            | ApiError::NotFound { source, .. }
            | ApiError::ServiceUnavailable { source, .. }
            | ApiError::Internal { source, .. } => *source = Some(cause.into()),
        }
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BadRequest",
            ApiError::NotFound { .. } => "NotFound",
            ApiError::ServiceUnavailable { .. } => "ServiceUnavailable",
            ApiError::Internal { .. } => "Internal",
        }
    }

    // Walks the cause chain to the innermost failure and reports the deepest
    // domain kind seen along the way together with the innermost message, so
    // the originating fault is surfaced rather than a wrapping error.
    pub fn root_cause(&self) -> (&'static str, String) {
        let mut kind = self.kind_name();
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(source) = current.source() {
            current = source;
            if let Some(api) = current.downcast_ref::<ApiError>() {
                kind = api.kind_name();
            }
        }
        (kind, current.to_string())
    }
}
