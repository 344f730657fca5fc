pub mod api;
pub mod datetime;
