pub mod gate;
pub mod login;
pub mod password;
pub mod session;
pub mod token;
