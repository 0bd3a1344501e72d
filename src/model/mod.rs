pub mod api;
pub mod app;
pub mod message;
pub mod worker;
