#![no_main]
use http_meta::{
    codec::{Codec, DateMode},
    header::Header,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for codec in [Codec::Generic, Codec::Digit, Codec::DateTime(DateMode::Lenient)] {
            let mut h = Header::new("X-Fuzz", codec);
            h.set_raw(s);
            if let Ok(v) = h.value() {
                let mut rebuilt = Header::new("X-Fuzz", codec);
                rebuilt.set(v.clone());
                rebuilt.raw_value().ok();
            }
        }
    }
});
