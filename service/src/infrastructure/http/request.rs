use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use crate::domain::access::RequestContext;

/// Every handler gets the request's cookies; the access gate decides what
/// they are worth.
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut request = RequestContext::anonymous();
        for header in parts.headers.get_all(COOKIE) {
            if let Ok(value) = header.to_str() {
                request.add_cookie_header(value);
            }
        }
        Ok(request)
    }
}
