#![no_main]

use libfuzzer_sys::fuzz_target;
use latdiff::extract::LatencyExtractor;
use std::io::Cursor;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(extractor) = LatencyExtractor::new() else {
        return;
    };
    // Malformed values surface as errors, never panics
    if let Ok(samples) = extractor.extract_from(Cursor::new(data), Path::new("fuzz.txt")) {
        assert!(samples.iter().all(|s| !s.is_nan()));
    }
});
