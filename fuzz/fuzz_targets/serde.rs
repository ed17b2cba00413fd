#![no_main]

use libfuzzer_sys::fuzz_target;
use loglogbeta::LogLogBeta;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut sketch) = serde_json::from_slice::<LogLogBeta<4>>(data) {
        sketch.insert(b"1");
        assert!(!sketch.is_empty());
    }
});
