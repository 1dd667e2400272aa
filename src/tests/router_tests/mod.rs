mod auth_flow_tests;
mod gate_tests;
mod notifications_tests;
mod owner_tests;
mod profile_tests;
mod search_tests;
mod wishlist_tests;
