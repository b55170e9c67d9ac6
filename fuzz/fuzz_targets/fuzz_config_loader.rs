#![no_main]

use grafana_workspace::config::loader::{ConfigLoader, inline_source};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Only panics matter; every error is an acceptable outcome
        let _ = ConfigLoader::default().load_str(yaml_str, &inline_source());
    }
});
