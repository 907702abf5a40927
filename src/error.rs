use crate::query::Operation;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request to {operation} failed: {source}")]
    Request {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned HTTP {status}")]
    Status {
        operation: Operation,
        status: reqwest::StatusCode,
    },

    #[error("{operation} timed out")]
    Timeout { operation: Operation },

    #[error("eBay API returned {ack} for {operation}: {message}")]
    Api {
        operation: Operation,
        ack: String,
        message: String,
    },

    #[error("unexpected {operation} response: {reason}")]
    ResponseShape {
        operation: Operation,
        reason: String,
    },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    pub(crate) fn shape(operation: Operation, reason: impl Into<String>) -> Self {
        Self::ResponseShape {
            operation,
            reason: reason.into(),
        }
    }

    /// Network failure, timeout, non-2xx status or an API-level failure ack.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Status { .. } | Self::Timeout { .. } | Self::Api { .. }
        )
    }

    pub fn is_response_shape(&self) -> bool {
        matches!(self, Self::ResponseShape { .. })
    }

    /// The single notification shown to the user for any failed search.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidQuery(reason) => format!("Invalid search: {}", reason),
            Self::Config(reason) => format!("Search is not configured: {}", reason),
            _ => "Failed to fetch from eBay. Try again later.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
