use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, catalog).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Catalog Error: {0}")]
    CatalogError(String),
    #[error("Configuration Error: {0}")]
    ConfigError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Conflict(_) => 409,
            ServerError::DbError(_)
            | ServerError::CatalogError(_)
            | ServerError::ConfigError(_)
            | ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
