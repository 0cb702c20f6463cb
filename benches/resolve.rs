use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_controller::*;
use std::sync::Arc;

#[derive(Default)]
struct BenchController {
    container: ContainerSlot,
}

impl Controller for BenchController {
    fn actions(&self) -> &'static [&'static str] {
        &["index", "show", "update", "delete"]
    }

    fn call_action(&self, action: &str, _request: &Request) -> ControllerResult<Response> {
        Ok(Response::ok(action))
    }

    fn as_container_aware(&self) -> Option<&dyn ContainerAware> {
        Some(&self.container)
    }
}

// ===== Container =====

fn bench_singleton_hit(c: &mut Criterion) {
    let mut sc = ServiceCollection::new();
    sc.add_singleton("answer", 42u64);
    let container = sc.build();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.get::<u64>(black_box("answer")).unwrap();
            black_box(v);
        })
    });
}

fn bench_transient(c: &mut Criterion) {
    let mut sc = ServiceCollection::new();
    sc.add_transient_factory("buffer", |_| Ok(Vec::<u8>::with_capacity(64)));
    let container = sc.build();

    c.bench_function("transient_vec", |b| {
        b.iter(|| {
            let v = container.get::<Vec<u8>>(black_box("buffer")).unwrap();
            black_box(v);
        })
    });
}

// ===== Identifier parsing =====

fn bench_identifier_parse(c: &mut Criterion) {
    let config = ResolverConfig::default();
    let mut group = c.benchmark_group("identifier_parse");

    for raw in ["blog::index", "app::controller::admin::UserController::edit", "blog:index"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
            b.iter(|| black_box(ControllerIdentifier::parse(black_box(raw), &config).unwrap()))
        });
    }

    group.finish();
}

// ===== Controller resolution =====

fn bench_resolve_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_request");

    for count in [1usize, 10, 100] {
        let mut services = ServiceCollection::new();
        for i in 0..count {
            services.add_controller(format!("controller.{}", i), Arc::new(BenchController::default()));
        }
        let resolver = ControllerResolver::new(services.build());

        let mut request = Request::create("/bench");
        request.attributes.set("_controller", format!("controller.{}::show", count - 1));

        group.bench_with_input(BenchmarkId::new("services", count), &request, |b, request| {
            b.iter(|| black_box(resolver.resolve(request).unwrap()))
        });
    }

    group.finish();
}

fn bench_class_registry(c: &mut Criterion) {
    let mut classes = ClassRegistry::new();
    classes.register::<BenchController>();
    let resolver = ControllerResolver::new(ServiceContainer::empty()).with_classes(classes);
    let identifier = format!("{}::index", std::any::type_name::<BenchController>());

    c.bench_function("resolve_class_registry", |b| {
        b.iter(|| black_box(resolver.resolve_identifier(black_box(&identifier)).unwrap()))
    });
}

fn bench_not_found_alternatives(c: &mut Criterion) {
    let mut services = ServiceCollection::new();
    for i in 0..50 {
        services.add_controller(format!("controller.{}", i), Arc::new(BenchController::default()));
    }
    let resolver = ControllerResolver::new(services.build());

    c.bench_function("not_found_with_alternatives", |b| {
        b.iter(|| black_box(resolver.resolve_identifier(black_box("controler.7::index")).is_err()))
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_transient,
    bench_identifier_parse,
    bench_resolve_request,
    bench_class_registry,
    bench_not_found_alternatives
);
criterion_main!(benches);
