//! Ambient request context.
//!
//! A resolution call may run with a request in scope; the absolutizer then
//! builds URLs from the request's scheme and host instead of the configured
//! `site.protocol`/`site.domain`. The context is a thread-local installed
//! through an RAII guard, so it is always cleared when the resolution call
//! returns, including during unwinding.

use std::cell::RefCell;

/// Scheme and host of an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    scheme: String,
    host: String,
}

impl RequestContext {
    /// Create a context from a request's scheme and host.
    ///
    /// The host may include a port (`localhost:8000`); any trailing slash
    /// is stripped.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            scheme: scheme.into(),
            host: host.trim_end_matches('/').to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }

    /// Build a fully qualified URL for `path`, mirroring what a web
    /// framework's request object does.
    pub fn build_absolute_uri(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if let Some(rest) = path.strip_prefix("//") {
            return format!("{}://{}", self.scheme, rest);
        }
        if path.starts_with('/') {
            return format!("{}://{}{}", self.scheme, self.host, path);
        }
        format!("{}://{}/{}", self.scheme, self.host, path)
    }
}

thread_local! {
    static CURRENT: RefCell<Option<RequestContext>> = const { RefCell::new(None) };
}

/// Install `ctx` as the ambient request for the current thread.
///
/// The previous context (if any) is restored when the returned guard drops.
#[must_use = "the request context is cleared when the guard drops"]
pub fn scoped(ctx: RequestContext) -> RequestScope {
    let previous = CURRENT.with(|cell| cell.borrow_mut().replace(ctx));
    RequestScope { previous }
}

/// The ambient request for the current thread, if one is in scope.
pub fn current() -> Option<RequestContext> {
    CURRENT.with(|cell| cell.borrow().clone())
}

/// Guard restoring the previous ambient request on drop.
pub struct RequestScope {
    previous: Option<RequestContext>,
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        CURRENT.with(|cell| {
            *cell.borrow_mut() = self.previous.take();
        });
    }
}
