#![no_main]

use libfuzzer_sys::fuzz_target;
use loglogbeta::LogLogBeta;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut sketch) = LogLogBeta::<4>::from_bytes(data) {
        assert_eq!(sketch.to_bytes().unwrap(), data);
        sketch.insert(b"1");
        assert!(!sketch.is_empty());
    }
});
