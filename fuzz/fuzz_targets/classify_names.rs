#![no_main]

use libfuzzer_sys::fuzz_target;
use latdiff::classify::PathClassifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let Ok(classifier) = PathClassifier::new() else {
            return;
        };
        // Arbitrary directory and file names must classify or return None
        let _ = classifier.classify_directory(name);
        let _ = classifier.classify_file(name);
    }
});
