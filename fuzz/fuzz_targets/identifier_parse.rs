#![no_main]

use ferrous_controller::{ControllerIdentifier, ResolverConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let config = ResolverConfig::default();
    if let Ok(id) = ControllerIdentifier::parse(raw, &config) {
        assert!(!id.target().is_empty());
        if let Some(method) = id.method() {
            assert!(!method.is_empty());
        }
    }
});
