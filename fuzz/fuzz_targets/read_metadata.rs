#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = tailstamp::read_metadata(data);
    let _ = tailstamp::payload_of(data);
});
