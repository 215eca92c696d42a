//! HTTP server

mod http;

pub use http::{INTERNAL_MESSAGE, UNAVAILABLE_MESSAGE, router, run_http_server};
