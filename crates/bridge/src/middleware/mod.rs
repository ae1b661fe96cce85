//! HTTP middleware for the bridge.
//!
//! - [`request_id`] - request correlation (`x-request-id`)
//! - [`security_headers`] - locked-down response headers for a JSON API
//! - [`origin`] - origin allow-list enforcement and the matching CORS layer

pub mod origin;
pub mod request_id;
pub mod security_headers;

pub use origin::{cors_layer, origin_guard_middleware};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
