#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Form input must never panic, whatever the user types.
        let _ = quickbill::parse_number(s);
        let _ = quickbill::parse_integer(s);
        let _ = quickbill::parse_sequence(s);
    }
});
