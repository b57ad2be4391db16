pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod monitor;
pub mod utils;
