mod client;
mod error;
pub mod models;
pub mod response;

pub use client::ApiClient;
pub use error::ApiError;
