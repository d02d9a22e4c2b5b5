#![no_main]
use libfuzzer_sys::fuzz_target;

use mcp_stays::domain::property::{PropertyRecord, StaySummary};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(record) = serde_json::from_str::<PropertyRecord>(text) {
            let _ = StaySummary::from_record(&record);
            let _ = record.to_string();
        }
        let _ = serde_json::from_str::<Vec<PropertyRecord>>(text);
    }
});
