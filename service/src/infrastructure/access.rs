use crate::domain::access::{AccessGate, RequestContext};
use crate::infrastructure::settings::AccessSettings;

/// Admin gate backed by the session cookie set at sign-in. With a
/// configured token the cookie must also carry that exact value.
#[derive(Debug, Clone)]
pub struct SessionCookieGate {
    cookie_name: String,
    token: Option<String>,
}

impl SessionCookieGate {
    pub fn new(cookie_name: impl Into<String>, token: Option<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            token,
        }
    }
}

impl From<&AccessSettings> for SessionCookieGate {
    fn from(settings: &AccessSettings) -> Self {
        Self::new(settings.session_cookie.clone(), settings.session_token.clone())
    }
}

impl AccessGate for SessionCookieGate {
    fn is_authorized(&self, request: &RequestContext) -> bool {
        match (request.cookie(&self.cookie_name), &self.token) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(value), Some(token)) => value == token,
        }
    }
}
