#![no_main]

use libfuzzer_sys::fuzz_target;
use vbyte64::{compress, compress_framed, data_size, decompress, decompress_framed};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the mode, the rest is read as little-endian u64s
    let delta = data[0] & 1 == 1;
    let values: Vec<u64> = data[1..]
        .chunks(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect();

    // Property 1: unframed round-trip
    let plain = compress(&values, delta).unwrap();
    assert_eq!(decompress(plain.as_bytes(), values.len(), delta).unwrap(), values, "unframed mismatch");

    // Property 2: framed round-trip recovers the count
    let framed = compress_framed(&values, delta).unwrap();
    assert_eq!(decompress_framed(framed.as_bytes(), delta).unwrap(), values, "framed mismatch");

    // Property 3: estimate equals bytes produced
    let key_len = framed.layout().key_len();
    assert_eq!(plain.len(), key_len + data_size(&values, delta), "size mismatch");
});
