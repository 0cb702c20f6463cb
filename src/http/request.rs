use std::collections::HashMap;
use std::sync::Arc;

use crate::controller::Controller;
use crate::resolver::ControllerRef;

/// String-keyed parameter storage, one per request section.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBag<V> {
    params: HashMap<String, V>,
}

impl<V> Default for ParameterBag<V> {
    fn default() -> Self {
        Self { params: HashMap::new() }
    }
}

impl<V> ParameterBag<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.params.get(key)
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<V>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.params.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Value stored in the request attributes.
///
/// Routers usually store plain strings; the `_controller` attribute may also
/// carry a typed [`ControllerRef`].
#[derive(Clone)]
pub enum AttributeValue {
    Text(String),
    Controller(ControllerRef),
}

impl AttributeValue {
    /// The text value, if this is a string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Controller(_) => None,
        }
    }

    /// Controller reference view of the attribute; text becomes an identifier.
    pub fn to_controller_ref(&self) -> ControllerRef {
        match self {
            AttributeValue::Text(text) => ControllerRef::Identifier(text.clone()),
            AttributeValue::Controller(reference) => reference.clone(),
        }
    }
}

impl std::fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            AttributeValue::Controller(reference) => f.debug_tuple("Controller").field(reference).finish(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<ControllerRef> for AttributeValue {
    fn from(value: ControllerRef) -> Self {
        AttributeValue::Controller(value)
    }
}

impl From<Arc<dyn Controller>> for AttributeValue {
    fn from(value: Arc<dyn Controller>) -> Self {
        AttributeValue::Controller(ControllerRef::Instance(value))
    }
}

/// An incoming HTTP request, reduced to what controller resolution needs.
///
/// # Examples
///
/// ```
/// use ferrous_controller::Request;
///
/// let mut request = Request::create("/blog/42?preview=1&tag=rust%20lang");
/// request.attributes.set("_controller", "app::BlogController::show");
///
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.path(), "/blog/42");
/// assert_eq!(request.query.get("tag").map(String::as_str), Some("rust lang"));
/// assert_eq!(
///     request.attributes.get("_controller").and_then(|v| v.as_str()),
///     Some("app::BlogController::show")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    raw_query: Option<String>,
    /// Decoded query string parameters
    pub query: ParameterBag<String>,
    /// Routing attributes, including `_controller`
    pub attributes: ParameterBag<AttributeValue>,
}

impl Request {
    /// Creates a `GET` request for `uri` (path with optional query string).
    pub fn create(uri: &str) -> Self {
        let (path, raw_query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (uri, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        let mut query = ParameterBag::new();
        if let Some(raw) = &raw_query {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                query.set(key.into_owned(), value.into_owned());
            }
        }

        Self {
            method: "GET".to_string(),
            path: path.to_string(),
            raw_query,
            query,
            attributes: ParameterBag::new(),
        }
    }

    /// Same request with another HTTP method (upper-cased).
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus the original query string.
    pub fn uri(&self) -> String {
        match &self.raw_query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}
