//! Raw HTTP layer: one pooled `reqwest` client bound to the backend origin.

mod http;

pub use http::{HttpTransport, RequestBody};
