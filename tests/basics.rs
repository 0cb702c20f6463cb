use ferrous_controller::{Container, ContainerExt, DiError, DiObserver, ServiceCollection};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn test_concrete_singleton() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("answer", 42usize);
    sc.add_singleton("greeting", "hello".to_string());

    let container = sc.build();

    let num1 = container.get::<usize>("answer").unwrap();
    let num2 = container.get::<usize>("answer").unwrap();
    let str1 = container.get::<String>("greeting").unwrap();
    let str2 = container.get::<String>("greeting").unwrap();

    assert_eq!(*num1, 42);
    assert_eq!(*str1, "hello");
    assert!(Arc::ptr_eq(&num1, &num2)); // Same instance
    assert!(Arc::ptr_eq(&str1, &str2)); // Same instance
}

#[test]
fn test_factory_with_dependencies() {
    #[derive(Debug)]
    struct Config {
        port: u16,
    }

    #[derive(Debug)]
    struct Server {
        config: Arc<Config>,
        name: String,
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton("config", Config { port: 8080 });
    sc.add_singleton_factory("server", |r| {
        Ok(Server {
            config: r.get::<Config>("config")?,
            name: "MyServer".to_string(),
        })
    });

    let container = sc.build();
    let server = container.get::<Server>("server").unwrap();

    assert_eq!(server.config.port, 8080);
    assert_eq!(server.name, "MyServer");
}

#[test]
fn test_singleton_factory_runs_once() {
    let calls = Arc::new(Mutex::new(0));
    let calls_clone = calls.clone();

    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory("session", move |_| {
        *calls_clone.lock().unwrap() += 1;
        Ok("session".to_string())
    });

    let container = sc.build();
    assert!(!container.initialized("session"));

    let first = container.get::<String>("session").unwrap();
    let second = container.get::<String>("session").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(container.initialized("session"));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_transient_creates_new_instances() {
    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_transient_factory("ticket", move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        Ok(format!("ticket-{}", *c))
    });

    let container = sc.build();

    let s1 = container.get::<String>("ticket").unwrap();
    let s2 = container.get::<String>("ticket").unwrap();

    assert_eq!(*s1, "ticket-1");
    assert_eq!(*s2, "ticket-2");
    assert!(!Arc::ptr_eq(&s1, &s2));
    assert!(!container.initialized("ticket"));
}

#[test]
fn test_factory_errors_propagate() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory("broken", |_| {
        Err::<String, _>(DiError::Factory {
            id: "broken".to_string(),
            message: "database offline".to_string(),
        })
    });

    let container = sc.build();
    let err = container.get::<String>("broken").unwrap_err();
    assert_eq!(err.to_string(), "Factory for \"broken\" failed: database offline");
    // A failed singleton is retried on the next resolution
    assert!(!container.initialized("broken"));
}

#[test]
fn test_later_registration_replaces_earlier() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("mode", "debug".to_string());
    sc.add_singleton("mode", "release".to_string());

    assert_eq!(sc.len(), 1);
    let container = sc.build();
    assert_eq!(*container.get::<String>("mode").unwrap(), "release");
}

#[test]
fn test_not_found_and_type_mismatch() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("port", 8080u16);
    let container = sc.build();

    assert_eq!(
        container.get::<u16>("missing").unwrap_err(),
        DiError::NotFound("missing".to_string())
    );
    assert_eq!(
        container.get::<String>("port").unwrap_err(),
        DiError::TypeMismatch("port".to_string())
    );
    assert!(container.try_get::<u16>("missing").is_none());
    assert_eq!(*container.try_get::<u16>("port").unwrap(), 8080);
}

#[test]
fn test_aliases_share_the_target_instance() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory("mailer.smtp", |_| Ok("smtp".to_string()));
    sc.add_alias("mailer", "mailer.smtp");
    sc.add_alias("notifier", "mailer");

    let container = sc.build();

    assert!(container.has("notifier"));
    let direct = container.get::<String>("mailer.smtp").unwrap();
    let aliased = container.get::<String>("notifier").unwrap();
    assert!(Arc::ptr_eq(&direct, &aliased));
}

#[test]
fn test_removed_ids() {
    let mut sc = ServiceCollection::new();
    sc.add_removed_id("legacy.controller");
    let container = sc.build();

    assert!(!container.has("legacy.controller"));
    assert!(container.is_removed("legacy.controller"));
    assert!(!container.is_removed("never.registered"));
    assert_eq!(
        container.get::<String>("legacy.controller").unwrap_err(),
        DiError::Removed("legacy.controller".to_string())
    );
}

#[test]
fn test_runtime_overrides_shadow_registrations() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("clock", 1u64);
    let container = sc.build();

    container.set("clock", 2u64);
    container.set("extra", "runtime".to_string());

    assert_eq!(*container.get::<u64>("clock").unwrap(), 2);
    assert_eq!(*container.get::<String>("extra").unwrap(), "runtime");
    assert!(container.initialized("extra"));
    assert_eq!(
        container.service_ids(),
        vec!["clock".to_string(), "extra".to_string()]
    );
}

#[test]
fn test_alias_to_runtime_override_is_visible() {
    let mut sc = ServiceCollection::new();
    sc.add_alias("clock.default", "clock");
    let container = sc.build();

    assert!(!container.has("clock.default"));
    container.set("clock", 7u64);

    // has, get and initialized agree once the alias target exists at runtime
    assert!(container.has("clock.default"));
    assert_eq!(*container.get::<u64>("clock.default").unwrap(), 7);
    assert!(container.initialized("clock.default"));
}

#[test]
fn test_factories_see_their_container() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("name", "app".to_string());
    sc.add_singleton_factory("shout", |r| {
        let container = r.container().expect("container is alive");
        let name = container.get::<String>("name")?;
        Ok(name.to_uppercase())
    });

    let container = sc.build();
    assert_eq!(*container.get::<String>("shout").unwrap(), "APP");
}

#[test]
fn test_handle_points_to_the_same_container() {
    let container = ServiceCollection::new().build();
    let handle = container.handle().unwrap();
    assert!(ferrous_controller::same_container(&handle, &container));
}

// ===== Observers =====

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl DiObserver for RecordingObserver {
    fn resolving(&self, id: &str) {
        self.events.lock().unwrap().push(format!("resolving {}", id));
    }

    fn resolved(&self, id: &str, _duration: Duration) {
        self.events.lock().unwrap().push(format!("resolved {}", id));
    }

    fn not_found(&self, id: &str) {
        self.events.lock().unwrap().push(format!("not_found {}", id));
    }

    fn failed(&self, id: &str, _error: &DiError) {
        self.events.lock().unwrap().push(format!("failed {}", id));
    }
}

#[test]
fn test_observers_see_every_resolution() {
    let observer = Arc::new(RecordingObserver::default());

    let mut sc = ServiceCollection::new();
    sc.add_singleton("port", 8080u16);
    sc.add_removed_id("gone");
    sc.add_observer(observer.clone());
    let container = sc.build();

    container.get::<u16>("port").unwrap();
    let _ = container.get::<u16>("missing");
    let _ = container.get::<u16>("gone");

    assert_eq!(
        *observer.events.lock().unwrap(),
        vec![
            "resolving port",
            "resolved port",
            "resolving missing",
            "not_found missing",
            "resolving gone",
            "failed gone",
        ]
    );
}
