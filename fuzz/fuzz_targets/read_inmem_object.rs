#![no_main]
use libfuzzer_sys::fuzz_target;
use mgh::{InMemMghObject, ReaderOptions};

fuzz_target!(|data: &[u8]| {
    let _ = InMemMghObject::from_reader(data);
    let _ = ReaderOptions::new().fallback_to_float(true).read_reader(data);
});
