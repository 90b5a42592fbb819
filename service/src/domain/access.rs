use std::collections::HashMap;

use cookie::Cookie;

/// What the access gate gets to see of an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    cookies: HashMap<String, String>,
}

impl RequestContext {
    /// A request without any credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Collects the cookies of a `Cookie` header value, percent-decoding
    /// names and values. Malformed pairs are skipped; a repeated name keeps
    /// its first value.
    pub fn add_cookie_header(&mut self, header: &str) {
        for cookie in Cookie::split_parse_encoded(header).flatten() {
            self.cookies
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value_trimmed().to_string());
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Authorization boundary for admin operations. All or nothing: a request is
/// either allowed to do everything an admin can, or nothing at all.
pub trait AccessGate: Clone + Send + Sync + 'static {
    fn is_authorized(&self, request: &RequestContext) -> bool;
}
