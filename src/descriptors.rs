//! Service descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// Service descriptor for introspection and diagnostics
///
/// # Examples
///
/// ```rust
/// use ferrous_controller::{Lifetime, ServiceCollection};
///
/// struct Mailer;
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton("app.port", 8080u16);
/// services.add_transient_factory("mailer", |_| Ok(Mailer));
/// services.add_alias("mailer.default", "mailer");
///
/// let descriptors = services.get_service_descriptors();
/// let mailer = descriptors.iter().find(|d| d.id == "mailer").unwrap();
/// assert_eq!(mailer.lifetime, Lifetime::Transient);
/// assert!(mailer.type_name.ends_with("Mailer"));
///
/// let alias = descriptors.iter().find(|d| d.id == "mailer.default").unwrap();
/// assert_eq!(alias.alias_of.as_deref(), Some("mailer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service id as registered
    pub id: String,
    /// Service lifetime (an alias reports its target's lifetime)
    pub lifetime: Lifetime,
    /// Concrete type name of the registered value
    pub type_name: &'static str,
    /// Target id when this descriptor is an alias
    pub alias_of: Option<String>,
    /// Whether a shared instance already exists
    pub initialized: bool,
}

impl ServiceDescriptor {
    /// Check if this descriptor is an alias
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

pub(crate) fn describe(registry: &crate::registration::Registry) -> Vec<ServiceDescriptor> {
    let mut out: Vec<ServiceDescriptor> = registry
        .services
        .iter()
        .map(|(id, reg)| ServiceDescriptor {
            id: id.clone(),
            lifetime: reg.lifetime,
            type_name: reg.type_name,
            alias_of: None,
            initialized: reg.is_initialized(),
        })
        .collect();

    for (alias, target) in &registry.aliases {
        if let Some(reg) = registry.get(alias) {
            out.push(ServiceDescriptor {
                id: alias.clone(),
                lifetime: reg.lifetime,
                type_name: reg.type_name,
                alias_of: Some(target.clone()),
                initialized: reg.is_initialized(),
            });
        }
    }

    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}
