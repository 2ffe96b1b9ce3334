//! HTTP request type.
//!
//! [`HttpRequest`] carries what inline action dispatch needs from an incoming
//! request: the method, the path and raw query string, decoded GET and POST
//! data, headers, and a one-time message store.

use std::sync::{Mutex, PoisonError};

use http::{HeaderMap, Method};

use crate::messages::{Message, MessageLevel, MessageStorage};
use crate::querydict::QueryDict;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An HTTP request, modeled after Django's `HttpRequest`.
///
/// Instances are created from an incoming Axum request via
/// [`HttpRequest::from_axum`], or with [`HttpRequest::builder`] in tests.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions_http::HttpRequest;
///
/// let request = HttpRequest::builder()
///     .method(http::Method::POST)
///     .path("/admin/blog/author/1/change/")
///     .query_string("q=lorem")
///     .form("_action__articleinline__inline__publish__blog__article__7", "")
///     .build();
///
/// assert!(request.is_post());
/// assert_eq!(request.get().get("q"), Some("lorem"));
/// assert_eq!(request.get_full_path(), "/admin/blog/author/1/change/?q=lorem");
/// ```
#[derive(Debug)]
pub struct HttpRequest {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    get: QueryDict,
    post: QueryDict,
    headers: HeaderMap,
    messages: Mutex<MessageStorage>,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`].
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Creates an `HttpRequest` from Axum request parts and the body bytes.
    ///
    /// The body is decoded into POST data only for form-encoded submissions.
    pub fn from_axum(parts: http::request::Parts, body: &[u8]) -> Self {
        let query_string = parts.uri.query().unwrap_or("").to_string();
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let post = decode_form(content_type.as_deref(), body);

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            get: QueryDict::parse(&query_string),
            query_string,
            content_type,
            post,
            headers: parts.headers,
            messages: Mutex::new(MessageStorage::new()),
        }
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns `true` for POST requests.
    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    /// Returns the request path (without query string).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string (without the leading `?`).
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the content type of the request body, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the decoded query string parameters.
    pub const fn get(&self) -> &QueryDict {
        &self.get
    }

    /// Returns the decoded form body.
    pub const fn post(&self) -> &QueryDict {
        &self.post
    }

    /// Returns the request headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the path with the query string appended, if any.
    pub fn get_full_path(&self) -> String {
        if self.query_string.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string)
        }
    }

    /// Queues a one-time message for the next rendered page.
    pub fn add_message(&self, level: MessageLevel, text: impl Into<String>) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(level, text);
    }

    /// Drains the queued messages.
    pub fn take_messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

fn decode_form(content_type: Option<&str>, body: &[u8]) -> QueryDict {
    if content_type.is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE)) {
        QueryDict::parse(&String::from_utf8_lossy(body))
    } else {
        QueryDict::new()
    }
}

/// Builder for constructing [`HttpRequest`] instances in tests.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
    form: QueryDict,
}

impl Default for HttpRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
            content_type: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            form: QueryDict::new(),
        }
    }
}

impl HttpRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the query string (without leading `?`).
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.to_string();
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn content_type(mut self, ct: &str) -> Self {
        self.content_type = Some(ct.to_string());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets a raw request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Adds a decoded form field to the POST data.
    #[must_use]
    pub fn form(mut self, key: &str, value: &str) -> Self {
        self.form.append(key, value);
        self
    }

    /// Builds the [`HttpRequest`].
    ///
    /// Form fields added with [`form`](Self::form) are merged after any
    /// fields decoded from a form-encoded raw body.
    pub fn build(self) -> HttpRequest {
        let mut post = decode_form(self.content_type.as_deref(), &self.body);
        for key in self.form.keys() {
            for value in self.form.get_list(key).unwrap_or_default() {
                post.append(key, value);
            }
        }

        HttpRequest {
            method: self.method,
            get: QueryDict::parse(&self.query_string),
            path: self.path,
            query_string: self.query_string,
            content_type: self.content_type,
            post,
            headers: self.headers,
            messages: Mutex::new(MessageStorage::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = HttpRequest::builder().build();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.post().is_empty());
        assert!(!request.is_post());
    }

    #[test]
    fn test_builder_form_body() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .content_type("application/x-www-form-urlencoded")
            .body(b"title=Hello+world&_save=".to_vec())
            .form("_back", "")
            .build();
        assert_eq!(request.post().get("title"), Some("Hello world"));
        assert!(request.post().contains_key("_save"));
        assert!(request.post().contains_key("_back"));
    }

    #[test]
    fn test_non_form_body_is_ignored() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .content_type("application/json")
            .body(b"{\"a\":1}".to_vec())
            .build();
        assert!(request.post().is_empty());
    }

    #[test]
    fn test_from_axum() {
        let (parts, ()) = http::Request::builder()
            .method(Method::POST)
            .uri("/admin/blog/article/?status=draft")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(())
            .unwrap()
            .into_parts();
        let request = HttpRequest::from_axum(parts, b"a=1");
        assert!(request.is_post());
        assert_eq!(request.path(), "/admin/blog/article/");
        assert_eq!(request.query_string(), "status=draft");
        assert_eq!(request.get().get("status"), Some("draft"));
        assert_eq!(request.post().get("a"), Some("1"));
    }

    #[test]
    fn test_full_path() {
        let request = HttpRequest::builder().path("/x/").build();
        assert_eq!(request.get_full_path(), "/x/");
    }

    #[test]
    fn test_messages_drain() {
        let request = HttpRequest::builder().build();
        request.add_message(MessageLevel::Info, "Article published.");
        let messages = request.take_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Article published.");
        assert!(request.take_messages().is_empty());
    }
}
