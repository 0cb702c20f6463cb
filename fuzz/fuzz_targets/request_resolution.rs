#![no_main]

use ferrous_controller::{
    Controller, ControllerResolver, ControllerResult, Request, Response, ServiceCollection,
};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

struct FuzzController;

impl Controller for FuzzController {
    fn actions(&self) -> &'static [&'static str] {
        &["index", "show"]
    }

    fn call_action(&self, action: &str, _request: &Request) -> ControllerResult<Response> {
        Ok(Response::ok(action))
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let mut services = ServiceCollection::new();
    services.add_controller("fuzz", Arc::new(FuzzController));
    services.add_alias("fuzz.alias", "fuzz");
    services.add_removed_id("fuzz.removed");
    let resolver = ControllerResolver::new(services.build());

    // Resolution must fail cleanly, never panic
    let mut request = Request::create(input);
    request.attributes.set("_controller", input);
    let _ = resolver.resolve(&request);
});
