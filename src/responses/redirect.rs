// responses/redirect.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Request, ResponseBuilder};

pub const SESSION_COOKIE: &str = "session";

/// 302 to `location`. Form posts land here too, so the browser follows with a GET.
pub fn redirect_response(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .header("Set-Cookie", cookie)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn set_session_cookie(key: &str) -> String {
    format!("{SESSION_COOKIE}={key}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Value of the `session` cookie, if the request carries one.
pub fn session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
