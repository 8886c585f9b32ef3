#![no_main]

use libfuzzer_sys::fuzz_target;
use vbyte64::decompress;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to decompress() - should never panic
    // First byte is the claimed element count, the rest is the stream
    if data.is_empty() {
        return;
    }
    let n = usize::from(data[0]);
    let _ = decompress(&data[1..], n, false);
    let _ = decompress(&data[1..], n, true);
});
