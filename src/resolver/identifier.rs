use std::fmt;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::controller::Controller;
use crate::error::{ControllerError, ControllerResult};

/// Typed value of a request's controller attribute.
#[derive(Clone)]
pub enum ControllerRef {
    /// `Type::method`, `service_id::method`, `Type` or `service_id`
    Identifier(String),
    /// Target and method given separately
    Pair(String, String),
    /// An invokable controller instance
    Instance(Arc<dyn Controller>),
    /// A controller instance and one of its actions
    Bound(Arc<dyn Controller>, String),
}

impl fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerRef::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
            ControllerRef::Pair(target, method) => {
                f.debug_tuple("Pair").field(target).field(method).finish()
            }
            ControllerRef::Instance(controller) => {
                f.debug_tuple("Instance").field(&controller.class_name()).finish()
            }
            ControllerRef::Bound(controller, method) => f
                .debug_tuple("Bound")
                .field(&controller.class_name())
                .field(method)
                .finish(),
        }
    }
}

impl From<&str> for ControllerRef {
    fn from(value: &str) -> Self {
        ControllerRef::Identifier(value.to_string())
    }
}

impl From<String> for ControllerRef {
    fn from(value: String) -> Self {
        ControllerRef::Identifier(value)
    }
}

/// A parsed controller identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControllerIdentifier {
    /// `target::method`
    Action { target: String, method: String },
    /// A target called without method name
    Invokable { target: String },
}

impl ControllerIdentifier {
    /// Parses `raw` without knowing which targets exist.
    ///
    /// The identifier is split on the last method separator, so targets may
    /// themselves be `::`-separated Rust paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_controller::{ControllerIdentifier, ResolverConfig};
    ///
    /// let config = ResolverConfig::default();
    /// let id = ControllerIdentifier::parse("app::BlogController::show", &config).unwrap();
    /// assert_eq!(id.target(), "app::BlogController");
    /// assert_eq!(id.method(), Some("show"));
    ///
    /// let id = ControllerIdentifier::parse("blog.controller", &config).unwrap();
    /// assert_eq!(id.method(), None);
    ///
    /// assert!(ControllerIdentifier::parse("::show", &config).is_err());
    /// ```
    pub fn parse(raw: &str, config: &ResolverConfig) -> ControllerResult<Self> {
        Self::parse_with(raw, config, |_| false)
    }

    /// Parses `raw`, treating it as an invokable target when `is_known`
    /// recognises the whole string.
    pub fn parse_with<F>(raw: &str, config: &ResolverConfig, is_known: F) -> ControllerResult<Self>
    where
        F: Fn(&str) -> bool,
    {
        if raw.is_empty() {
            return Err(ControllerError::InvalidIdentifier(raw.to_string()));
        }

        if is_known(raw) {
            return Ok(ControllerIdentifier::Invokable { target: raw.to_string() });
        }

        if let Some((target, method)) = raw.rsplit_once(config.separator.as_str()) {
            return Self::action(raw, target, method);
        }

        if config.allow_single_colon && config.separator != ":" && raw.matches(':').count() == 1 {
            if let Some((target, method)) = raw.split_once(':') {
                tracing::warn!(
                    target: "ferrous_controller::resolver",
                    identifier = raw,
                    "Referencing controllers with a single colon is deprecated, use \"{}{}{}\" instead",
                    target,
                    config.separator,
                    method
                );
                return Self::action(raw, target, method);
            }
        }

        Ok(ControllerIdentifier::Invokable { target: raw.to_string() })
    }

    fn action(raw: &str, target: &str, method: &str) -> ControllerResult<Self> {
        if target.is_empty() || method.is_empty() {
            return Err(ControllerError::InvalidIdentifier(raw.to_string()));
        }
        Ok(ControllerIdentifier::Action {
            target: target.to_string(),
            method: method.to_string(),
        })
    }

    /// Service id or class name the identifier points at.
    pub fn target(&self) -> &str {
        match self {
            ControllerIdentifier::Action { target, .. } => target,
            ControllerIdentifier::Invokable { target } => target,
        }
    }

    /// Method name, `None` for invokable targets.
    pub fn method(&self) -> Option<&str> {
        match self {
            ControllerIdentifier::Action { method, .. } => Some(method),
            ControllerIdentifier::Invokable { .. } => None,
        }
    }

    /// Formats the identifier with `config`'s separator, so it parses back
    /// to the same value under that config. `Display` always uses `::`.
    pub fn to_string_with(&self, config: &ResolverConfig) -> String {
        match self {
            ControllerIdentifier::Action { target, method } => {
                format!("{}{}{}", target, config.separator, method)
            }
            ControllerIdentifier::Invokable { target } => target.clone(),
        }
    }
}

/// Canonical `target::method` form.
impl fmt::Display for ControllerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerIdentifier::Action { target, method } => write!(f, "{}::{}", target, method),
            ControllerIdentifier::Invokable { target } => write!(f, "{}", target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ControllerResult<ControllerIdentifier> {
        ControllerIdentifier::parse(raw, &ResolverConfig::default())
    }

    #[test]
    fn namespaced_class_and_method() {
        let id = parse("App\\Controller\\BlogController::list").unwrap();
        assert_eq!(id.target(), "App\\Controller\\BlogController");
        assert_eq!(id.method(), Some("list"));
    }

    #[test]
    fn known_whole_identifier_is_invokable() {
        let config = ResolverConfig::default();
        let id = ControllerIdentifier::parse_with("app::Home", &config, |t| t == "app::Home").unwrap();
        assert_eq!(id, ControllerIdentifier::Invokable { target: "app::Home".into() });
    }

    #[test]
    fn single_colon_is_accepted_when_enabled() {
        let id = parse("blog.controller:index").unwrap();
        assert_eq!(id.target(), "blog.controller");
        assert_eq!(id.method(), Some("index"));

        let strict = ResolverConfig { allow_single_colon: false, ..ResolverConfig::default() };
        let id = ControllerIdentifier::parse("blog.controller:index", &strict).unwrap();
        assert_eq!(id.method(), None);
    }

    #[test]
    fn empty_parts_are_rejected() {
        assert!(matches!(parse(""), Err(ControllerError::InvalidIdentifier(_))));
        assert!(matches!(parse("Blog::"), Err(ControllerError::InvalidIdentifier(_))));
        assert!(matches!(parse(":index"), Err(ControllerError::InvalidIdentifier(_))));
    }

    #[test]
    fn display_round_trips_the_notation() {
        assert_eq!(parse("a::b").unwrap().to_string(), "a::b");
        assert_eq!(parse("invokable").unwrap().to_string(), "invokable");
    }

    #[test]
    fn custom_separator_round_trips() {
        let config = ResolverConfig { separator: "->".to_string(), ..ResolverConfig::default() };
        let id = ControllerIdentifier::parse("blog->index", &config).unwrap();

        assert_eq!(id.to_string(), "blog::index");
        let text = id.to_string_with(&config);
        assert_eq!(text, "blog->index");
        assert_eq!(ControllerIdentifier::parse(&text, &config).unwrap(), id);
    }
}
