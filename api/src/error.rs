//! Error types for the Campus Events API client

use thiserror::Error;

/// Result type returned by every API port
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the Campus Events API
///
/// Payloads are strings so the error can be cloned into component actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Missing or expired credentials (401)
    #[error("Unauthorized - session expired or missing")]
    Unauthorized,

    /// Authenticated but not allowed (403)
    #[error("Forbidden - feature unavailable for this user")]
    Forbidden,

    /// Resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned another error status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl ApiError {
    /// Message suitable for showing to the user
    ///
    /// Prefers the server-provided message when there is one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed(_) => "Não foi possível conectar ao servidor".to_string(),
            Self::ResponseParseFailed(_) => "Resposta inesperada do servidor".to_string(),
            Self::Unauthorized => "Sessão expirada. Faça login novamente".to_string(),
            Self::Forbidden => "Você não tem permissão para esta ação".to_string(),
            Self::NotFound(_) => "Recurso não encontrado".to_string(),
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Api { status, .. } => format!("Erro do servidor ({status})"),
        }
    }

    /// Whether this is a 403 response
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}
