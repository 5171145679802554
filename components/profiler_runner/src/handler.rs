//! Request handler abstraction
//!
//! The middleware sits in front of anything that can turn a request into a
//! response: the host application's router, another middleware, or a test
//! double. Failures propagate as `anyhow::Error` so a wrapped handler's
//! error reaches the caller unchanged.

use async_trait::async_trait;
use http::{Request, Response};

/// Request type carried through the middleware chain
pub type HttpRequest = Request<Vec<u8>>;

/// Response type carried through the middleware chain
pub type HttpResponse = Response<Vec<u8>>;

/// Anything that can handle an HTTP request
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handle one request and produce a response or a failure
    async fn call(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}
