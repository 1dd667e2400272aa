pub mod errors;
pub mod html;
pub mod redirect;

pub use crate::errors::ResultResp;
pub use errors::error_response;
pub use html::{html_response, html_response_with_status};
pub use redirect::{
    clear_session_cookie, redirect_response, redirect_with_cookie, session_cookie, set_session_cookie,
};
