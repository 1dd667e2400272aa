use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

/// Convert a ServerError into an HTML error page with the matching status.
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        error!(status, "request failed: {err}");
    } else {
        warn!(status, "request rejected: {err}");
    }

    // Storage and config details stay in the log.
    let message = match &err {
        ServerError::NotFound => "The page you are looking for does not exist.".to_string(),
        ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) | ServerError::Conflict(msg) => {
            msg.clone()
        }
        ServerError::CatalogError(_) => "Listings are unavailable right now. Try again shortly.".to_string(),
        ServerError::DbError(_) | ServerError::ConfigError(_) | ServerError::InternalError => {
            "Something went wrong on our side.".to_string()
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
