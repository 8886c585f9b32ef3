#![no_main]

use libfuzzer_sys::fuzz_target;
use vbyte64::{decompress_framed, inspect_framed};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes with an arbitrary header must yield Ok or a corrupt-input error
    for delta in [false, true] {
        if let Err(e) = decompress_framed(data, delta) {
            assert!(e.is_corrupt() || matches!(e, vbyte64::Error::Alloc { .. }), "unexpected error: {e}");
        }
    }
    if let Err(e) = inspect_framed(data) {
        assert!(e.is_corrupt(), "unexpected error: {e}");
    }
});
