#![no_main]
use libfuzzer_sys::fuzz_target;
use mgh::MghHeader;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = MghHeader::from_reader(data) {
        let _ = header.orientation();
        let _ = header.ras_geometry();
        let _ = header.data_size();
        let _ = header.tag_offset();
    }
});
