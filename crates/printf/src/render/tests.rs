use super::*;
use crate::arg::Arg;

fn render_all(syntax: &str, args: &[Arg<'_>]) -> String {
    let mut buf = [0u8; 256];
    let len = format_window(syntax.as_bytes(), ArgCursor::new(args), 0, &mut buf);
    assert!(len <= buf.len(), "test buffer too small for {syntax}");
    String::from_utf8(buf[..len].to_vec()).expect("rendered output is UTF-8")
}

// ============================================================================
// Integers
// ============================================================================

#[test]
fn signed_decimal_with_width_and_flags() {
    assert_eq!(render_all("%d", &[Arg::Int(42)]), "42");
    assert_eq!(render_all("%5d", &[Arg::Int(42)]), "   42");
    assert_eq!(render_all("%-5d", &[Arg::Int(42)]), "42   ");
    assert_eq!(render_all("%05d", &[Arg::Int(-42)]), "-0042");
    assert_eq!(render_all("%+d", &[Arg::Int(5)]), "+5");
    assert_eq!(render_all("% d", &[Arg::Int(5)]), " 5");
    assert_eq!(render_all("%i", &[Arg::Int(-7)]), "-7");
}

#[test]
fn precision_sets_minimum_digits() {
    assert_eq!(render_all("%.3d", &[Arg::Int(7)]), "007");
    assert_eq!(render_all("%6.3d", &[Arg::Int(-7)]), "  -007");
    assert_eq!(render_all("%.0d", &[Arg::Int(0)]), "");
    assert_eq!(render_all("%08.3d", &[Arg::Int(5)]), "     005");
}

#[test]
fn unsigned_bases_and_alternate_prefixes() {
    assert_eq!(render_all("%u", &[Arg::Uint(3_000_000_000)]), "3000000000");
    assert_eq!(render_all("%x", &[Arg::Int(255)]), "ff");
    assert_eq!(render_all("%X", &[Arg::Int(255)]), "FF");
    assert_eq!(render_all("%#x", &[Arg::Int(255)]), "0xff");
    assert_eq!(render_all("%#X", &[Arg::Int(255)]), "0XFF");
    assert_eq!(render_all("%#x", &[Arg::Int(0)]), "0");
    assert_eq!(render_all("%o", &[Arg::Int(8)]), "10");
    assert_eq!(render_all("%#o", &[Arg::Int(8)]), "010");
    assert_eq!(render_all("%#.0o", &[Arg::Int(0)]), "0");
}

#[test]
fn binary_conversion() {
    assert_eq!(render_all("%b", &[Arg::Int(5)]), "101");
    assert_eq!(render_all("%08b", &[Arg::Int(5)]), "00000101");
    assert_eq!(render_all("%#010b", &[Arg::Int(5)]), "0b00000101");
    assert_eq!(render_all("%b", &[Arg::Int(0)]), "0");
}

#[test]
fn length_modifiers_truncate_like_c() {
    assert_eq!(render_all("%hhd", &[Arg::Int(300)]), "44");
    assert_eq!(render_all("%hu", &[Arg::Int(70_000)]), "4464");
    assert_eq!(render_all("%d", &[Arg::Int(5_000_000_000)]), "705032704");
    assert_eq!(render_all("%ld", &[Arg::Int(5_000_000_000)]), "5000000000");
    assert_eq!(render_all("%lld", &[Arg::Int(i64::MIN)]), "-9223372036854775808");
    assert_eq!(render_all("%u", &[Arg::Int(-1)]), "4294967295");
    assert_eq!(render_all("%lu", &[Arg::Int(-1)]), "18446744073709551615");
    assert_eq!(render_all("%zu", &[Arg::from(usize::MAX)]), usize::MAX.to_string());
}

// ============================================================================
// Characters, strings, pointers
// ============================================================================

#[test]
fn character_conversion() {
    assert_eq!(render_all("%c", &[Arg::Char('A')]), "A");
    assert_eq!(render_all("%3c", &[Arg::Char('A')]), "  A");
    assert_eq!(render_all("%-3c", &[Arg::Int(66)]), "B  ");
    assert_eq!(render_all("%c", &[Arg::Char('é')]), "é");
}

#[test]
fn string_conversion_honours_width_and_precision() {
    assert_eq!(render_all("%6s", &[Arg::Str("ab")]), "    ab");
    assert_eq!(render_all("%-6s", &[Arg::Str("ab")]), "ab    ");
    assert_eq!(render_all("%.3s", &[Arg::Str("abcdef")]), "abc");
    assert_eq!(render_all("%.10s", &[Arg::Str("abc")]), "abc");
}

#[test]
fn string_conversion_on_non_string_renders_nothing() {
    assert_eq!(render_all("%5s", &[Arg::Int(3)]), "");
}

#[test]
fn pointer_renders_zero_padded_uppercase_hex() {
    let expected = format!("{:0width$X}", 0xbeef_usize, width = 2 * size_of::<usize>());
    assert_eq!(render_all("%p", &[Arg::Ptr(0xbeef)]), expected);
}

// ============================================================================
// Star fields
// ============================================================================

#[test]
fn star_width_and_precision_read_arguments() {
    assert_eq!(render_all("%*d", &[Arg::Int(5), Arg::Int(42)]), "   42");
    assert_eq!(render_all("%*d", &[Arg::Int(-5), Arg::Int(42)]), "42   ");
    assert_eq!(render_all("%.*f", &[Arg::Int(2), Arg::Float(3.14159)]), "3.14");
    assert_eq!(render_all("%.*d", &[Arg::Int(-1), Arg::Int(7)]), "7");
    assert_eq!(
        render_all("%*.*s", &[Arg::Int(4), Arg::Int(2), Arg::Str("xyz")]),
        "  xy"
    );
}

// ============================================================================
// Floats
// ============================================================================

#[test]
fn fixed_notation() {
    assert_eq!(render_all("%f", &[Arg::Float(3.14159)]), "3.141590");
    assert_eq!(render_all("%8.3f", &[Arg::Float(3.14159)]), "   3.142");
    assert_eq!(render_all("%-8.1f", &[Arg::Float(3.14159)]), "3.1     ");
    assert_eq!(render_all("%08.2f", &[Arg::Float(-3.5)]), "-0003.50");
    assert_eq!(render_all("%+.1f", &[Arg::Float(2.0)]), "+2.0");
    assert_eq!(render_all("%.0f", &[Arg::Float(2.4)]), "2");
    assert_eq!(render_all("%#.0f", &[Arg::Float(2.4)]), "2.");
    assert_eq!(render_all("%f", &[Arg::Float(-0.0)]), "-0.000000");
    assert_eq!(render_all("%.2f", &[Arg::Int(3)]), "3.00");
}

#[test]
fn fixed_notation_above_limit_switches_to_exponent() {
    assert_eq!(render_all("%f", &[Arg::Float(2e9)]), "2.000000e+09");
    assert_eq!(render_all("%.1F", &[Arg::Float(2e9)]), "2.0E+09");
}

#[test]
fn exponent_notation() {
    assert_eq!(render_all("%e", &[Arg::Float(12345.678)]), "1.234568e+04");
    assert_eq!(render_all("%.2E", &[Arg::Float(0.000123)]), "1.23E-04");
    assert_eq!(render_all("%e", &[Arg::Float(0.0)]), "0.000000e+00");
    assert_eq!(render_all("%.1e", &[Arg::Float(1e100)]), "1.0e+100");
    assert_eq!(render_all("%12.3e", &[Arg::Float(-1500.0)]), "  -1.500e+03");
}

#[test]
fn general_notation_picks_shortest_form() {
    assert_eq!(render_all("%g", &[Arg::Float(0.0)]), "0");
    assert_eq!(render_all("%g", &[Arg::Float(100.0)]), "100");
    assert_eq!(render_all("%g", &[Arg::Float(0.0001)]), "0.0001");
    assert_eq!(render_all("%g", &[Arg::Float(0.00001)]), "1e-05");
    assert_eq!(render_all("%g", &[Arg::Float(123_456.0)]), "123456");
    assert_eq!(render_all("%g", &[Arg::Float(1_234_567.0)]), "1.23457e+06");
    assert_eq!(render_all("%G", &[Arg::Float(1e-10)]), "1E-10");
    assert_eq!(render_all("%.3g", &[Arg::Float(3.14159)]), "3.14");
    assert_eq!(render_all("%#g", &[Arg::Float(100.0)]), "100.000");
}

#[test]
fn non_finite_values() {
    assert_eq!(render_all("%f", &[Arg::Float(f64::NAN)]), "nan");
    assert_eq!(render_all("%F", &[Arg::Float(f64::INFINITY)]), "INF");
    assert_eq!(render_all("%f", &[Arg::Float(f64::NEG_INFINITY)]), "-inf");
    assert_eq!(render_all("%6e", &[Arg::Float(f64::INFINITY)]), "   inf");
    assert_eq!(render_all("%06f", &[Arg::Float(f64::NEG_INFINITY)]), "  -inf");
}

// ============================================================================
// Windows and degenerate input
// ============================================================================

#[test]
fn window_returns_requested_slice_and_true_length() {
    let args = [Arg::Int(42)];
    let mut dst = [0u8; 3];
    let total = format_window(b"%010d", ArgCursor::new(&args), 4, &mut dst);
    assert_eq!(total, 10);
    assert_eq!(&dst, b"000");

    let mut dst = [b'_'; 4];
    let total = format_window(b"%010d", ArgCursor::new(&args), 8, &mut dst);
    assert_eq!(total, 10);
    assert_eq!(&dst, b"42__");
}

#[test]
fn empty_window_only_measures() {
    let args = [Arg::Str("measure me")];
    let total = format_window(b"%-20s", ArgCursor::new(&args), 0, &mut []);
    assert_eq!(total, 20);
}

#[test]
fn missing_operand_renders_nothing() {
    assert_eq!(render_all("%d", &[]), "");
    assert_eq!(render_all("%*d", &[Arg::Int(4)]), "");
}

#[test]
fn syntax_without_conversion_renders_nothing() {
    assert_eq!(render_all("%", &[Arg::Int(1)]), "");
    assert_eq!(render_all("%-5", &[Arg::Int(1)]), "");
}
