//! crates/printf/src/render.rs
//!
//! Numeric formatting primitive: render one directive into a window of its
//! output.
//!
//! [`format_window`] renders the whole directive conceptually but stores only
//! the bytes in `[skip, skip + dst.len())`, returning the true total length.
//! The engine uses it first to measure and then to pull successive chunks of
//! an output that is longer than its scratch buffer. Every pass reads the same
//! operands from a copied cursor, so every pass renders identical bytes.

use std::fmt::{self, Write as _};

use crate::arg::ArgCursor;

/// Fraction digits used by `%f`, `%e` and `%g` when no precision is given.
pub const DEFAULT_PRECISION: usize = 6;

/// Largest magnitude rendered in fixed notation; `%f` switches to exponent
/// notation above it.
pub const MAX_FLOAT: f64 = 1e9;

/// Renders `syntax` against `args`, storing bytes `skip..skip + dst.len()` of
/// the output in `dst`. Returns the full output length.
pub fn format_window(syntax: &[u8], args: ArgCursor<'_>, skip: usize, dst: &mut [u8]) -> usize {
    let mut window = Window::new(dst, skip);
    let mut args = args;
    let spec = Spec::parse(syntax, &mut args);
    if let Some(conversion) = spec.conversion {
        render(&mut window, &spec, conversion, &mut args);
    }
    window.total()
}

/// Sink that keeps a slice of the rendered stream and counts the rest.
struct Window<'d> {
    dst: &'d mut [u8],
    skip: usize,
    index: usize,
}

impl<'d> Window<'d> {
    fn new(dst: &'d mut [u8], skip: usize) -> Self {
        Self { dst, skip, index: 0 }
    }

    fn put(&mut self, byte: u8) {
        if let Some(offset) = self.index.checked_sub(self.skip)
            && let Some(slot) = self.dst.get_mut(offset)
        {
            *slot = byte;
        }
        self.index += 1;
    }

    fn put_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put(byte);
        }
    }

    fn pad(&mut self, byte: u8, count: usize) {
        for _ in 0..count {
            self.put(byte);
        }
    }

    const fn total(&self) -> usize {
        self.index
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    zero: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Length {
    Char,
    Short,
    Int,
    Long,
}

#[derive(Clone, Copy, Debug)]
struct Spec {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    length: Length,
    conversion: Option<u8>,
}

impl Spec {
    fn parse(syntax: &[u8], args: &mut ArgCursor<'_>) -> Self {
        let mut spec = Self {
            flags: Flags::default(),
            width: 0,
            precision: None,
            length: Length::Int,
            conversion: None,
        };
        let mut at = usize::from(syntax.first() == Some(&b'%'));

        while let Some(&byte) = syntax.get(at) {
            match byte {
                b'-' => spec.flags.left = true,
                b'+' => spec.flags.plus = true,
                b' ' => spec.flags.space = true,
                b'#' => spec.flags.alternate = true,
                b'0' => spec.flags.zero = true,
                _ => break,
            }
            at += 1;
        }

        if syntax.get(at) == Some(&b'*') {
            at += 1;
            let width = args.next().map_or(0, |arg| arg.as_i64() as i32);
            if width < 0 {
                spec.flags.left = true;
            }
            spec.width = width.unsigned_abs() as usize;
        } else {
            spec.width = parse_digits(syntax, &mut at);
        }

        if syntax.get(at) == Some(&b'.') {
            at += 1;
            if syntax.get(at) == Some(&b'*') {
                at += 1;
                let precision = args.next().map_or(0, |arg| arg.as_i64() as i32);
                spec.precision = usize::try_from(precision).ok();
            } else {
                spec.precision = Some(parse_digits(syntax, &mut at));
            }
        }

        match syntax.get(at) {
            Some(b'h') => {
                at += 1;
                spec.length = if syntax.get(at) == Some(&b'h') {
                    at += 1;
                    Length::Char
                } else {
                    Length::Short
                };
            }
            Some(b'l') => {
                at += 1;
                if syntax.get(at) == Some(&b'l') {
                    at += 1;
                }
                spec.length = Length::Long;
            }
            Some(b'j' | b'z' | b't') => {
                at += 1;
                spec.length = Length::Long;
            }
            _ => {}
        }

        spec.conversion = syntax.get(at).copied();
        spec
    }
}

fn parse_digits(syntax: &[u8], at: &mut usize) -> usize {
    let mut value = 0usize;
    while let Some(&byte) = syntax.get(*at) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(usize::from(byte - b'0'));
        *at += 1;
    }
    value
}

fn render(window: &mut Window<'_>, spec: &Spec, conversion: u8, args: &mut ArgCursor<'_>) {
    match conversion {
        b'%' => window.put(b'%'),
        b'd' | b'i' => {
            let Some(arg) = args.next() else { return };
            let value = truncate_signed(arg.as_i64(), spec.length);
            let sign = sign_byte(value < 0, spec.flags);
            render_integer(window, spec, sign, value.unsigned_abs(), 10, false);
        }
        b'u' | b'o' | b'x' | b'X' | b'b' => {
            let Some(arg) = args.next() else { return };
            let value = truncate_unsigned(arg.as_u64(), spec.length);
            let base = match conversion {
                b'o' => 8,
                b'x' | b'X' => 16,
                b'b' => 2,
                _ => 10,
            };
            render_integer(window, spec, None, value, base, conversion == b'X');
        }
        b'p' => {
            let Some(arg) = args.next() else { return };
            let pointer = Spec {
                width: 2 * size_of::<usize>(),
                flags: Flags {
                    zero: true,
                    left: false,
                    alternate: false,
                    ..spec.flags
                },
                precision: None,
                ..*spec
            };
            render_integer(window, &pointer, None, arg.as_u64(), 16, true);
        }
        b'c' => {
            let Some(arg) = args.next() else { return };
            let mut encoded = [0u8; 4];
            let bytes = arg.as_char().encode_utf8(&mut encoded).as_bytes();
            render_padded(window, spec, bytes);
        }
        b's' => {
            let Some(arg) = args.next() else { return };
            let Some(text) = arg.as_str() else { return };
            let bytes = text.as_bytes();
            let bytes = spec
                .precision
                .map_or(bytes, |limit| &bytes[..limit.min(bytes.len())]);
            render_padded(window, spec, bytes);
        }
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' => {
            let Some(arg) = args.next() else { return };
            render_float(window, spec, conversion, arg.as_f64());
        }
        _ => {}
    }
}

const fn truncate_signed(value: i64, length: Length) -> i64 {
    match length {
        Length::Char => value as i8 as i64,
        Length::Short => value as i16 as i64,
        Length::Int => value as i32 as i64,
        Length::Long => value,
    }
}

const fn truncate_unsigned(value: u64, length: Length) -> u64 {
    match length {
        Length::Char => value as u8 as u64,
        Length::Short => value as u16 as u64,
        Length::Int => value as u32 as u64,
        Length::Long => value,
    }
}

const fn sign_byte(negative: bool, flags: Flags) -> Option<u8> {
    if negative {
        Some(b'-')
    } else if flags.plus {
        Some(b'+')
    } else if flags.space {
        Some(b' ')
    } else {
        None
    }
}

fn render_padded(window: &mut Window<'_>, spec: &Spec, body: &[u8]) {
    let padding = spec.width.saturating_sub(body.len());
    if !spec.flags.left {
        window.pad(b' ', padding);
    }
    window.put_all(body);
    if spec.flags.left {
        window.pad(b' ', padding);
    }
}

fn render_integer(
    window: &mut Window<'_>,
    spec: &Spec,
    sign: Option<u8>,
    magnitude: u64,
    base: u64,
    uppercase: bool,
) {
    let mut digits = [0u8; 64];
    let digit_count = if magnitude == 0 && spec.precision == Some(0) {
        0
    } else {
        encode_digits(magnitude, base, uppercase, &mut digits)
    };
    let digits = &digits[digits.len() - digit_count..];

    let mut zeros = spec.precision.unwrap_or(0).saturating_sub(digit_count);
    let prefix: &[u8] = match (spec.flags.alternate, base) {
        (true, 16) if magnitude != 0 => {
            if uppercase {
                b"0X"
            } else {
                b"0x"
            }
        }
        (true, 2) if magnitude != 0 => b"0b",
        (true, 8) if zeros == 0 && digits.first() != Some(&b'0') => b"0",
        _ => b"",
    };

    let body = sign.map_or(0, |_| 1) + prefix.len() + zeros + digits.len();
    let mut padding = spec.width.saturating_sub(body);
    if spec.flags.zero && !spec.flags.left && spec.precision.is_none() {
        zeros += padding;
        padding = 0;
    }

    if !spec.flags.left {
        window.pad(b' ', padding);
    }
    if let Some(sign) = sign {
        window.put(sign);
    }
    window.put_all(prefix);
    window.pad(b'0', zeros);
    window.put_all(digits);
    if spec.flags.left {
        window.pad(b' ', padding);
    }
}

/// Writes the digits of `value` right-aligned into `buf`, returning the count.
fn encode_digits(mut value: u64, base: u64, uppercase: bool, buf: &mut [u8; 64]) -> usize {
    let alphabet: &[u8; 16] = if uppercase {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut index = buf.len();
    loop {
        index -= 1;
        buf[index] = alphabet[(value % base) as usize];
        value /= base;
        if value == 0 {
            break;
        }
    }
    buf.len() - index
}

fn render_float(window: &mut Window<'_>, spec: &Spec, conversion: u8, value: f64) {
    let uppercase = conversion.is_ascii_uppercase();
    let sign = sign_byte(value.is_sign_negative() && !value.is_nan(), spec.flags);

    if !value.is_finite() {
        let body: &[u8] = match (value.is_nan(), uppercase) {
            (true, false) => b"nan",
            (true, true) => b"NAN",
            (false, false) => b"inf",
            (false, true) => b"INF",
        };
        let padding = spec
            .width
            .saturating_sub(body.len() + usize::from(sign.is_some()));
        if !spec.flags.left {
            window.pad(b' ', padding);
        }
        if let Some(sign) = sign {
            window.put(sign);
        }
        window.put_all(body);
        if spec.flags.left {
            window.pad(b' ', padding);
        }
        return;
    }

    let magnitude = value.abs();
    let precision = spec.precision.unwrap_or(DEFAULT_PRECISION);
    let layout = match conversion.to_ascii_lowercase() {
        b'f' if magnitude > MAX_FLOAT => FloatLayout::exponent(magnitude, precision, false),
        b'f' => FloatLayout::fixed(magnitude, precision, false),
        b'e' => FloatLayout::exponent(magnitude, precision, false),
        _ => FloatLayout::general(magnitude, precision, spec.flags.alternate),
    };
    let point = spec.flags.alternate && layout.precision == 0;

    let body = usize::from(sign.is_some())
        + layout.kept
        + usize::from(point)
        + layout.exponent.map_or(0, |exponent| exponent_len(exponent));
    let mut padding = spec.width.saturating_sub(body);
    let mut zeros = 0;
    if spec.flags.zero && !spec.flags.left {
        zeros = padding;
        padding = 0;
    }

    if !spec.flags.left {
        window.pad(b' ', padding);
    }
    if let Some(sign) = sign {
        window.put(sign);
    }
    window.pad(b'0', zeros);
    layout.write_mantissa(window, magnitude);
    if point {
        window.put(b'.');
    }
    if let Some(exponent) = layout.exponent {
        write_exponent(window, exponent, uppercase);
    }
    if spec.flags.left {
        window.pad(b' ', padding);
    }
}

/// How a finite float is laid out: notation, fraction digits, and how many
/// mantissa bytes survive trailing-zero removal.
#[derive(Clone, Copy, Debug)]
struct FloatLayout {
    precision: usize,
    exponent: Option<i32>,
    kept: usize,
}

impl FloatLayout {
    fn fixed(magnitude: f64, precision: usize, strip: bool) -> Self {
        let probe = probe_mantissa(magnitude, precision, false);
        Self {
            precision,
            exponent: None,
            kept: if strip { probe.significant } else { probe.len },
        }
    }

    fn exponent(magnitude: f64, precision: usize, strip: bool) -> Self {
        let probe = probe_mantissa(magnitude, precision, true);
        Self {
            precision,
            exponent: Some(probe.exponent),
            kept: if strip { probe.significant } else { probe.len },
        }
    }

    fn general(magnitude: f64, precision: usize, alternate: bool) -> Self {
        let significant = precision.max(1);
        let exponent = probe_mantissa(magnitude, significant - 1, true).exponent;
        let strip = !alternate;
        let fits_fixed = exponent >= -4 && i64::from(exponent) < significant as i64;
        if fits_fixed {
            let fraction = (significant as i64 - 1 - i64::from(exponent)) as usize;
            Self::fixed(magnitude, fraction, strip)
        } else {
            Self::exponent(magnitude, significant - 1, strip)
        }
    }

    fn write_mantissa(&self, window: &mut Window<'_>, magnitude: f64) {
        let mut writer = MantissaWriter {
            window: Some(window),
            limit: self.kept,
            probe: Probe::default(),
        };
        let _ = if self.exponent.is_some() {
            write!(writer, "{magnitude:.*e}", self.precision)
        } else {
            write!(writer, "{magnitude:.*}", self.precision)
        };
    }
}

/// What a measuring pass learned about a mantissa.
#[derive(Clone, Copy, Debug, Default)]
struct Probe {
    len: usize,
    significant: usize,
    seen_point: bool,
    in_exponent: bool,
    exponent: i32,
    exponent_negative: bool,
}

impl Probe {
    fn observe(&mut self, byte: u8) -> bool {
        if self.in_exponent {
            match byte {
                b'-' => self.exponent_negative = true,
                digit => {
                    self.exponent = self
                        .exponent
                        .saturating_mul(10)
                        .saturating_add(i32::from(digit - b'0'));
                }
            }
            return false;
        }
        if byte == b'e' {
            self.in_exponent = true;
            return false;
        }
        if byte == b'.' {
            self.seen_point = true;
        } else if !self.seen_point || byte != b'0' {
            self.significant = self.len + 1;
        }
        self.len += 1;
        true
    }

    const fn signed_exponent(&self) -> i32 {
        if self.exponent_negative {
            -self.exponent
        } else {
            self.exponent
        }
    }
}

/// Forwards the first `limit` mantissa bytes of a `core::fmt` float rendering
/// to a window while probing the rest.
struct MantissaWriter<'w, 'd> {
    window: Option<&'w mut Window<'d>>,
    limit: usize,
    probe: Probe,
}

impl fmt::Write for MantissaWriter<'_, '_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        for &byte in text.as_bytes() {
            let position = self.probe.len;
            if self.probe.observe(byte)
                && position < self.limit
                && let Some(window) = self.window.as_deref_mut()
            {
                window.put(byte);
            }
        }
        Ok(())
    }
}

/// Result of measuring one float rendering.
struct MantissaProbe {
    len: usize,
    significant: usize,
    exponent: i32,
}

fn probe_mantissa(magnitude: f64, precision: usize, exponent: bool) -> MantissaProbe {
    let mut writer = MantissaWriter {
        window: None,
        limit: 0,
        probe: Probe::default(),
    };
    let _ = if exponent {
        write!(writer, "{magnitude:.*e}", precision)
    } else {
        write!(writer, "{magnitude:.*}", precision)
    };
    let probe = writer.probe;
    MantissaProbe {
        len: probe.len,
        significant: probe.significant,
        exponent: probe.signed_exponent(),
    }
}

fn exponent_len(exponent: i32) -> usize {
    let digits = exponent.unsigned_abs().checked_ilog10().map_or(1, |log| log as usize + 1);
    2 + digits.max(2)
}

fn write_exponent(window: &mut Window<'_>, exponent: i32, uppercase: bool) {
    window.put(if uppercase { b'E' } else { b'e' });
    window.put(if exponent < 0 { b'-' } else { b'+' });
    let mut digits = [0u8; 64];
    let count = encode_digits(u64::from(exponent.unsigned_abs()), 10, false, &mut digits);
    if count < 2 {
        window.put(b'0');
    }
    window.put_all(&digits[digits.len() - count..]);
}

#[cfg(test)]
mod tests;
