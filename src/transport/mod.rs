//! HTTP transport to the text-completion endpoint.

mod http;

pub use http::{HttpTransport, TransportError};
