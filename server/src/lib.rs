pub mod api;
pub mod booking;
