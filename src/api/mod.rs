pub mod client;

pub use client::{get_request, post_request, ApiClient, API_BASE_URL};
