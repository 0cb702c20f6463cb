use ferrous_controller::{Controller, ControllerResult, ContainerExt, Lifetime, Request, Response, ServiceCollection};
use std::sync::Arc;

struct IndexController;

impl Controller for IndexController {
    fn actions(&self) -> &'static [&'static str] {
        &["index"]
    }

    fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
        Ok(Response::ok("index"))
    }
}

#[test]
fn test_descriptors_are_sorted_and_typed() {
    let mut sc = ServiceCollection::new();
    sc.add_transient_factory("z.clock", |_| Ok(0u64));
    sc.add_singleton("a.port", 8080u16);
    sc.add_controller("m.index", Arc::new(IndexController));

    let descriptors = sc.get_service_descriptors();
    let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a.port", "m.index", "z.clock"]);

    assert_eq!(descriptors[0].type_name, "u16");
    assert_eq!(descriptors[0].lifetime, Lifetime::Singleton);
    assert!(descriptors[0].initialized);

    assert!(descriptors[1].type_name.ends_with("IndexController"));

    assert_eq!(descriptors[2].lifetime, Lifetime::Transient);
    assert!(!descriptors[2].initialized);
    assert!(!descriptors.iter().any(|d| d.is_alias()));
}

#[test]
fn test_alias_descriptor_reports_target() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory("mailer", |_| Ok("smtp".to_string()));
    sc.add_alias("mailer.default", "mailer");
    sc.add_alias("dangling", "nowhere");

    let descriptors = sc.get_service_descriptors();
    assert_eq!(descriptors.len(), 2);

    let alias = &descriptors[1];
    assert_eq!(alias.id, "mailer.default");
    assert!(alias.is_alias());
    assert_eq!(alias.alias_of.as_deref(), Some("mailer"));
    assert_eq!(alias.lifetime, Lifetime::Singleton);
}

#[test]
fn test_container_descriptors_track_initialization() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory("mailer", |_| Ok("smtp".to_string()));
    let container = sc.build();

    assert!(!container.descriptors()[0].initialized);
    container.get::<String>("mailer").unwrap();
    assert!(container.descriptors()[0].initialized);
}
