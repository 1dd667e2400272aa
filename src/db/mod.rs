pub mod connection;
pub mod favorites;
pub mod hostels;
pub mod notifications;
pub mod reviews;
pub mod session_store;
pub mod users;

pub use connection::{init_db, Database};
pub use hostels::DbCatalog;
