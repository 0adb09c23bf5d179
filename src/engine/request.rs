//! Request decomposition.
//!
//! The dispatcher never looks at raw URLs: a request is reduced to its method
//! and an ordered list of literal path segments before matching starts.
//!
//! ```text
//! GET /user/42/edit/?tab=2  ->  method: GET, segments: [user, 42, edit]
//! ```
//!
//! ## Design notes
//!
//! - Empty segments are dropped, so `/a//b/` and `/a/b` are the same request.
//! - The query string and fragment are not part of the path.
//! - Segments are not percent-decoded; callers that need decoding should do it
//!   before building the descriptor.

/// An incoming request's method and path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: String,
    segments: Vec<String>,
}

impl RequestDescriptor {
    /// Build a descriptor from already split segments.
    pub fn new<I, S>(method: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { method: method.into(), segments: segments.into_iter().map(Into::into).collect() }
    }

    /// Split a raw request path into segments.
    pub fn parse(method: impl Into<String>, path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        Self::new(method, path.split('/').filter(|s| !s.is_empty()))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub(crate) fn segment_refs(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    /// The request path in canonical form, e.g. `/user/42`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
