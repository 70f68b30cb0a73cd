#![no_main]
use http_meta::codec::{parse_date_lenient, parse_http_date};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        parse_http_date(s).ok();
        parse_date_lenient(s).ok();
    }
});
