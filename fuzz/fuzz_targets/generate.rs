#![no_main]

use libfuzzer_sys::fuzz_target;
use zelang::{backend, parser};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever the parser recovers must always generate.
        let output = parser::parse(s);
        let first = backend::generate(&output.program).expect("generation failed");
        let second = backend::generate(&output.program).expect("generation failed");
        assert_eq!(first, second);
    }
});
