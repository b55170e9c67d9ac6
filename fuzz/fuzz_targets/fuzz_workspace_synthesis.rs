#![no_main]

use grafana_workspace::Workspace;
use grafana_workspace::config::loader::{ConfigLoader, LoaderOptions, inline_source};
use grafana_workspace::resource::Stack;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(yaml_str) = std::str::from_utf8(data) else {
        return;
    };
    let loader = ConfigLoader::new(LoaderOptions {
        skip_validation: true,
        ..LoaderOptions::default()
    });
    let Ok(loaded) = loader.load_str(yaml_str, &inline_source()) else {
        return;
    };

    let mut stack = Stack::default();
    match Workspace::new(&mut stack, "Workspace", &loaded.config) {
        Ok(_) => assert_eq!(stack.len(), 1),
        Err(_) => assert!(stack.is_empty()),
    }
});
