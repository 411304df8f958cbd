//! Property tests for chunked directive emission.
//!
//! A directive whose output is wider than the scratch buffer is re-rendered
//! chunk by chunk. These properties check that the concatenated chunks are
//! byte-identical to a rendering that fits in one buffer, for any buffer size.

use printf::{Arg, format_with_buffer};
use proptest::prelude::*;

fn render<const N: usize>(fmt: &str, args: &[Arg<'_>]) -> (Vec<u8>, usize, Vec<usize>) {
    let mut out = Vec::new();
    let mut chunks = Vec::new();
    let written = format_with_buffer::<_, N>(
        &mut |bytes: &[u8]| {
            out.extend_from_slice(bytes);
            chunks.push(bytes.len());
        },
        fmt,
        args,
    );
    (out, written, chunks)
}

proptest! {
    /// Zero-padded integers match Rust's own padding for every width.
    #[test]
    fn zero_padded_integers_match_unbounded_rendering(
        value in any::<i64>(),
        width in 0usize..200,
    ) {
        let fmt = format!("%0{width}ld");
        let (small, written, chunks) = render::<16>(&fmt, &[Arg::Int(value)]);
        let expected = format!("{value:0width$}");

        prop_assert_eq!(&small, expected.as_bytes());
        prop_assert_eq!(written, expected.len());
        prop_assert!(chunks.iter().all(|&len| len <= 16));
    }

    /// Small and large scratch buffers produce identical bytes.
    #[test]
    fn buffer_size_never_changes_output(
        value in any::<u32>(),
        float in -1.0e6f64..1.0e6,
        width in 0usize..120,
        precision in 0usize..40,
        text in "[a-z]{0,80}",
    ) {
        let fmt = format!("<%-{width}x|%{width}.{precision}f|%{width}s|%#{width}o>");
        let args = [Arg::Uint(u64::from(value)), Arg::Float(float), Arg::Str(&text), Arg::Uint(u64::from(value))];

        let (tiny, tiny_len, _) = render::<1>(&fmt, &args);
        let (small, small_len, _) = render::<7>(&fmt, &args);
        let (large, large_len, _) = render::<1024>(&fmt, &args);

        prop_assert_eq!(&tiny, &large);
        prop_assert_eq!(&small, &large);
        prop_assert_eq!(tiny_len, large_len);
        prop_assert_eq!(small_len, large.len());
    }

    /// Position bookkeeping survives any mix of `%s` and star fields.
    #[test]
    fn mixed_directives_resolve_arguments_in_order(
        first in any::<i32>(),
        word in "[A-Za-z]{1,12}",
        width in 0i32..40,
        last in any::<u16>(),
    ) {
        let args = [Arg::from(first), Arg::Str(&word), Arg::from(width), Arg::from(last)];
        let (out, _, _) = render::<8>("%d/%s/%*u", &args);
        let expected = format!("{first}/{word}/{last:>w$}", w = width as usize);
        prop_assert_eq!(out, expected.into_bytes());
    }
}
