use crate::width::WidthStrategy;
use crate::{
    compress, compress_framed, compress_to_file, data_size, decompress, decompress_framed, decompress_from_file,
    inspect_framed, width, Clz, Ladder, Options,
};
use proptest::prelude::*;

prop_compose! {
    /// Values spread over every width class
    fn arb_value()(bytes in 0u32..=8, raw in any::<u64>()) -> u64 {
        if bytes == 8 { raw } else { raw & ((1u64 << (8 * bytes)) - 1) }
    }
}

prop_compose! {
    /// A non-decreasing sequence built from small, clustered increments
    fn arb_sorted()(
        start in any::<u32>(),
        steps in prop::collection::vec(0u64..5_000, 0..500),
    ) -> Vec<u64> {
        let mut acc = u64::from(start);
        steps.into_iter().map(|s| { acc += s; acc }).collect()
    }
}

fn arb_values() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(arb_value(), 0..500)
}

proptest! {
    /// Property: both width strategies agree on every input
    #[test]
    fn prop_width_strategies_agree(v in any::<u64>()) {
        prop_assert_eq!(Clz::width(v), Ladder::width(v));
    }

    /// Property: the width is the smallest byte count that holds the value
    #[test]
    fn prop_width_minimal(v in arb_value()) {
        let w = u32::from(width(v));
        prop_assert!(w <= 8);
        if w < 8 {
            prop_assert_eq!(v >> (8 * w), 0, "value {} does not fit in {} bytes", v, w);
        }
        if w > 0 {
            prop_assert!(v >> (8 * (w - 1)) != 0, "value {} also fits in {} bytes", v, w - 1);
        }
    }

    /// Property: plain round-trip for arbitrary values
    #[test]
    fn prop_roundtrip_plain(values in arb_values()) {
        let compressed = compress(&values, false).unwrap();
        let decoded = decompress(compressed.as_bytes(), values.len(), false).unwrap();
        prop_assert_eq!(decoded, values);
    }

    /// Property: delta round-trip for sorted values
    #[test]
    fn prop_roundtrip_delta_sorted(values in arb_sorted()) {
        let compressed = compress_framed(&values, true).unwrap();
        let decoded = decompress_framed(compressed.as_bytes(), true).unwrap();
        prop_assert_eq!(decoded, values);
    }

    /// Property: delta round-trip holds bit-for-bit on unsorted input too
    #[test]
    fn prop_roundtrip_delta_unsorted(values in arb_values()) {
        let compressed = compress(&values, true).unwrap();
        let decoded = decompress(compressed.as_bytes(), values.len(), true).unwrap();
        prop_assert_eq!(decoded, values);
    }

    /// Property: the estimate equals the data bytes actually produced
    #[test]
    fn prop_exact_sizing(values in arb_values(), delta in any::<bool>(), framed in any::<bool>()) {
        let opts = Options::new().delta(delta).framed(framed);
        let layout = opts.layout(&values);
        let compressed = opts.compress(&values).unwrap();
        prop_assert_eq!(layout.data_len, data_size(&values, delta));
        prop_assert_eq!(compressed.len(), layout.data_offset() + data_size(&values, delta));
        prop_assert_eq!(compressed.allocated(), layout.alloc_len());
    }

    /// Property: delta never costs more than plain on sorted input with small steps
    #[test]
    fn prop_delta_not_larger_on_sorted(values in arb_sorted()) {
        prop_assert!(data_size(&values, true) <= data_size(&values, false));
    }

    /// Property: the inspector's histogram accounts for every value and byte
    #[test]
    fn prop_inspect_consistent(values in arb_values(), delta in any::<bool>()) {
        let compressed = compress_framed(&values, delta).unwrap();
        let summary = inspect_framed(compressed.as_bytes()).unwrap();
        prop_assert_eq!(summary.count, values.len());
        prop_assert_eq!(summary.widths.iter().sum::<usize>(), values.len());
        let bytes: usize = summary.widths.iter().enumerate().map(|(w, n)| w * n).sum();
        prop_assert_eq!(bytes, summary.data_len);
        prop_assert_eq!(summary.logical_len(), compressed.len());
    }

    /// Property: decoding arbitrary bytes returns a result and never panics
    #[test]
    fn prop_decode_garbage_no_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        n in 0usize..200,
        delta in any::<bool>(),
    ) {
        let _ = decompress(&bytes, n, delta);
        let _ = decompress_framed(&bytes, delta);
        let _ = inspect_framed(&bytes);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: file and memory paths decode to the same values
    #[test]
    fn prop_file_memory_equivalence(values in arb_values(), delta in any::<bool>()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prop.vb64");
        let written = compress_to_file(&values, delta, &path).unwrap();

        let buffer = compress_framed(&values, delta).unwrap();
        prop_assert_eq!(written as usize, buffer.len());
        let from_file = decompress_from_file(&path, delta).unwrap();
        let from_buffer = decompress_framed(buffer.as_bytes(), delta).unwrap();
        prop_assert_eq!(&from_file, &from_buffer);
        prop_assert_eq!(from_file, values);
    }
}
