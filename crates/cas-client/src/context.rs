//! Inbound request surface.
//!
//! The host framework's request object is consumed through this narrow
//! view: the request's own URL (path plus query, as the framework
//! resolved it) and the two query parameters the CAS flow recognizes.

use url::form_urlencoded;

/// The slice of an incoming HTTP request the strategy looks at.
#[derive(Debug, Clone)]
pub struct RequestContext {
    original_url: String,
}

impl RequestContext {
    /// Creates a context from the request's resolved URL.
    ///
    /// Accepts either an absolute URL or a path-plus-query string,
    /// mirroring what web frameworks expose as the original request URL.
    #[must_use]
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
        }
    }

    /// The request's own URL, used to derive the default service URL.
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// The `ticket` query parameter, when present and non-empty.
    #[must_use]
    pub fn ticket(&self) -> Option<String> {
        self.query_param("ticket")
    }

    /// The `RelayState` query parameter carried by a front-channel
    /// logout relay, when present and non-empty.
    #[must_use]
    pub fn relay_state(&self) -> Option<String> {
        self.query_param("RelayState")
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.original_url.split_once('?')?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    }
}
