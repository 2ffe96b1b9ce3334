//! HTTP response types.
//!
//! [`HttpResponse`] is what an action handler may return to take over the
//! response (an intermediate confirmation page, for instance), and what the
//! dispatcher synthesizes when it redirects back after an action ran.

use axum::response::IntoResponse;
use http::{HeaderMap, HeaderValue, StatusCode};

/// An HTTP response with a text body, modeled after Django's `HttpResponse`.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions_http::HttpResponse;
///
/// let response = HttpResponse::ok("<p>Done</p>");
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.content(), "<p>Done</p>");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    content: String,
    content_type: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with the given status code and body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content: body.into(),
            content_type: "text/html".to_string(),
        }
    }

    /// Creates a 200 OK response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, body)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(body: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, body)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn server_error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    /// Returns the status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Returns the response headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Sets a response header. Invalid header values are ignored.
    pub fn set_header(&mut self, name: http::header::HeaderName, value: &str) {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
    }

    /// Returns the `Location` header, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Returns `true` for 3xx responses.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Returns the body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the content type (without charset).
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Sets the content type.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, self.content).into_response();
        let content_type = format!("{}; charset=utf-8", self.content_type);
        if let Ok(value) = HeaderValue::from_str(&content_type) {
            response
                .headers_mut()
                .insert(http::header::CONTENT_TYPE, value);
        }
        for (key, value) in &self.headers {
            response.headers_mut().insert(key, value.clone());
        }
        response
    }
}

/// An HTTP redirect response (302 Found).
///
/// Equivalent to Django's `HttpResponseRedirect`.
pub struct HttpResponseRedirect;

impl HttpResponseRedirect {
    /// Creates a 302 Found redirect to the given URL.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(url: &str) -> HttpResponse {
        let mut response = HttpResponse::new(StatusCode::FOUND, "");
        response.set_header(http::header::LOCATION, url);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert_eq!(HttpResponse::ok("").status(), StatusCode::OK);
        assert_eq!(HttpResponse::bad_request("").status(), StatusCode::BAD_REQUEST);
        assert_eq!(HttpResponse::not_found("").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            HttpResponse::server_error("").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_redirect() {
        let response = HttpResponseRedirect::new("/admin/blog/author/1/change/?q=a");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.is_redirect());
        assert_eq!(response.location(), Some("/admin/blog/author/1/change/?q=a"));
        assert!(response.content().is_empty());
    }

    #[test]
    fn test_plain_response_has_no_location() {
        let response = HttpResponse::ok("body");
        assert!(response.location().is_none());
        assert!(!response.is_redirect());
        assert_eq!(response.content_type(), "text/html");
    }

    #[test]
    fn test_into_axum_response() {
        let response = HttpResponseRedirect::new("/target/").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[http::header::LOCATION], "/target/");
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }
}
