//! Integration tests for the format engine's observable contract.

use printf::{Arg, FORMAT_BUFFER_SIZE, args, format, format_with_buffer, snformat};

fn render(fmt: &str, args: &[Arg<'_>]) -> (String, usize) {
    let mut out = Vec::new();
    let written = format(&mut |bytes: &[u8]| out.extend_from_slice(bytes), fmt, args);
    (String::from_utf8(out).expect("UTF-8 output"), written)
}

// ============================================================================
// String passthrough
// ============================================================================

/// A bare `%s` emits exactly the argument bytes.
#[test]
fn string_directive_emits_argument_verbatim() {
    let (out, written) = render("%s", &args!["hello"]);
    assert_eq!(out, "hello");
    assert_eq!(written, 5);
}

/// A bare `%s` does not depend on the scratch buffer size.
#[test]
fn string_longer_than_scratch_is_not_truncated() {
    let text = "0123456789".repeat(FORMAT_BUFFER_SIZE);
    let (out, written) = render("[%s]", &args![text.as_str()]);
    assert_eq!(written, text.len() + 2);
    assert_eq!(out, format!("[{text}]"));
}

/// Format specifiers inside a `%s` argument are not interpreted.
#[test]
fn string_argument_is_not_reinterpreted() {
    let (out, _) = render("%s", &args!["100%d %s"]);
    assert_eq!(out, "100%d %s");
}

// ============================================================================
// Argument positions
// ============================================================================

/// Arguments after a `%s` are resolved at the right position.
#[test]
fn positions_skip_string_arguments() {
    let (out, _) = render("%d-%s-%d", &args![1, "mid", 2]);
    assert_eq!(out, "1-mid-2");
}

/// Every directive kind advances the position by its slot count.
#[test]
fn positions_across_all_directive_kinds() {
    let (out, _) = render(
        "%c%s%*d%.*s%u%%%x",
        &args!['a', "b", 3, 4, 2, "cde", 5u8, 255],
    );
    assert_eq!(out, "ab  4cd5%ff");
}

// ============================================================================
// Chunking
// ============================================================================

/// A 50-byte directive through a 16-byte buffer equals the unbounded output.
#[test]
fn wide_directive_through_small_buffer() {
    let mut small = Vec::new();
    let written = format_with_buffer::<_, 16>(
        &mut |bytes: &[u8]| small.extend_from_slice(bytes),
        "%050d",
        &args![42],
    );

    let mut unbounded = [0u8; 64];
    let len = snformat(&mut unbounded, "%050d", &args![42]);

    assert_eq!(written, 50);
    assert_eq!(len, 50);
    assert_eq!(small, &unbounded[..len]);
}

/// Wide float output is chunked without losing digits.
#[test]
fn wide_float_through_small_buffer() {
    let mut small = Vec::new();
    format_with_buffer::<_, 5>(
        &mut |bytes: &[u8]| small.extend_from_slice(bytes),
        "%.20f",
        &args![1.0 / 3.0],
    );
    assert_eq!(String::from_utf8(small).unwrap(), format!("{:.20}", 1.0f64 / 3.0));
}

// ============================================================================
// Degenerate input
// ============================================================================

/// Empty format produces no output and no calls.
#[test]
fn empty_format_is_silent() {
    let mut calls = 0;
    let written = format(&mut |_: &[u8]| calls += 1, "", &[]);
    assert_eq!(written, 0);
    assert_eq!(calls, 0);
}

/// Extra arguments are ignored.
#[test]
fn surplus_arguments_are_ignored() {
    let (out, _) = render("%d", &args![1, 2, 3]);
    assert_eq!(out, "1");
}
