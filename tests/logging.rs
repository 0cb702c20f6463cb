use ferrous_controller::{
    ContainerExt, Controller, ControllerResolver, ControllerResult, LoggingObserver, Request,
    Response, ServiceCollection,
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber capturing every crate event.
fn capture<F: FnOnce()>(f: F) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("ferrous_controller=trace"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

struct HomeController;

impl Controller for HomeController {
    fn actions(&self) -> &'static [&'static str] {
        &["index"]
    }

    fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
        Ok(Response::ok("home"))
    }
}

fn resolver() -> ControllerResolver {
    let mut services = ServiceCollection::new();
    services.add_controller("home", Arc::new(HomeController));
    ControllerResolver::new(services.build())
}

#[test]
fn test_missing_attribute_is_logged_as_warning() {
    let resolver = resolver();
    let output = capture(|| {
        assert!(resolver.resolve(&Request::create("/about")).unwrap().is_none());
    });

    assert!(output.contains("WARN"));
    assert!(output.contains("\"_controller\" parameter is missing"));
}

#[test]
fn test_single_colon_notation_is_logged_as_deprecated() {
    let resolver = resolver();
    let output = capture(|| {
        resolver.resolve_identifier("home:index").unwrap();
    });

    assert!(output.contains("single colon is deprecated"));
    assert!(output.contains("home::index"));
}

#[test]
fn test_logging_observer_traces_resolutions() {
    let mut services = ServiceCollection::new();
    services.add_singleton("port", 8080u16);
    services.add_observer(Arc::new(LoggingObserver::with_prefix("app")));
    let container = services.build();

    let output = capture(|| {
        container.get::<u16>("port").unwrap();
        let _ = container.get::<u16>("missing");
    });

    assert!(output.contains("port"));
    assert!(output.contains("missing"));
}
