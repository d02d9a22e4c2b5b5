#![no_main]
use libfuzzer_sys::fuzz_target;

use mcp_stays::config::types::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = serde_yml::from_str::<Config>(text);
    }
});
