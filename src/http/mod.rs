//! HTTP transport for scenario requests

mod client;
mod response;

pub use client::{HttpClient, Transport};
pub use response::HttpResponse;
