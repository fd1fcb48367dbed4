//! Message formatting
//!
//! Log calls take a slice of [`Arg`] values. An `Arg` is one of a fixed set of
//! shapes; the conversion from ordinary Rust values happens at compile time
//! through [`AsArg`]. Types outside that set are passed through [`display_arg`],
//! [`error_arg`] or [`debug_arg`].
//!
//! Two styles turn arguments into a message:
//!
//! - [`prepare`] joins the arguments with single spaces, unless the first one
//!   is a string containing `%` and more arguments follow, in which case the
//!   first is a printf-style template for the rest.
//! - [`format_template`] replaces indexed placeholders (`!1`, `!2`, ... with
//!   the default prefix) in a template.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Write};
use std::sync::Arc;

/// A single log argument
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
    Int(i128),
    Uint(u128),
    Float(f64),
    Float32(f32),
    Bool(bool),
    Char(char),
    /// Rendered through the error's message
    Error(&'a (dyn Error + 'a)),
    /// Rendered through `Display`
    Display(&'a (dyn fmt::Display + 'a)),
    /// Rendered through `Debug`; the fallback for everything else
    Debug(&'a (dyn fmt::Debug + 'a)),
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Arg::Int(v) => write!(f, "{}", v),
            Arg::Uint(v) => write!(f, "{}", v),
            Arg::Float(v) => write!(f, "{}", v),
            Arg::Float32(v) => write!(f, "{}", v),
            Arg::Bool(v) => write!(f, "{}", v),
            Arg::Char(v) => write!(f, "{}", v),
            Arg::Error(e) => write!(f, "{}", e),
            Arg::Display(d) => write!(f, "{}", d),
            Arg::Debug(d) => write!(f, "{:?}", d),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Arg::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Arg::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Arg::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Arg::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Arg::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            Arg::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Arg::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Arg::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Arg::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
            Arg::Debug(d) => f.debug_tuple("Debug").field(d).finish(),
        }
    }
}

/// Conversion of a value into a log argument
pub trait AsArg {
    fn as_arg(&self) -> Arg<'_>;
}

impl<T: AsArg + ?Sized> AsArg for &T {
    fn as_arg(&self) -> Arg<'_> {
        (**self).as_arg()
    }
}

impl AsArg for Arg<'_> {
    fn as_arg(&self) -> Arg<'_> {
        *self
    }
}

impl AsArg for str {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl AsArg for String {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl AsArg for Cow<'_, str> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl AsArg for Box<str> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl AsArg for Arc<str> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Str(self)
    }
}

impl AsArg for [u8] {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Bytes(self)
    }
}

impl AsArg for Vec<u8> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Bytes(self)
    }
}

macro_rules! impl_as_arg_int {
    ($variant:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl AsArg for $t {
                fn as_arg(&self) -> Arg<'_> {
                    Arg::$variant(*self as $wide)
                }
            }
        )+
    };
}

impl_as_arg_int!(Int, i128: i8, i16, i32, i64, i128, isize);
impl_as_arg_int!(Uint, u128: u8, u16, u32, u64, u128, usize);

impl AsArg for f64 {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Float(*self)
    }
}

impl AsArg for f32 {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Float32(*self)
    }
}

impl AsArg for bool {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Bool(*self)
    }
}

impl AsArg for char {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Char(*self)
    }
}

impl AsArg for std::io::Error {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Error(self)
    }
}

impl AsArg for crate::core::error::LoggerError {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Error(self)
    }
}

impl AsArg for Box<dyn Error + Send + Sync> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Error(&**self)
    }
}

impl AsArg for fmt::Arguments<'_> {
    fn as_arg(&self) -> Arg<'_> {
        Arg::Display(self)
    }
}

/// Use a value's `Display` implementation
pub fn display_arg<T: fmt::Display>(value: &T) -> Arg<'_> {
    Arg::Display(value)
}

/// Use an error's message
pub fn error_arg<E: Error>(err: &E) -> Arg<'_> {
    Arg::Error(err)
}

/// Use a value's `Debug` implementation
pub fn debug_arg<T: fmt::Debug>(value: &T) -> Arg<'_> {
    Arg::Debug(value)
}

/// Join-style formatting
///
/// ```
/// use flog::{args, prepare};
///
/// assert_eq!(prepare(&args!["hello"]), "hello");
/// assert_eq!(prepare(&args!["a", 1, true]), "a 1 true");
/// assert_eq!(prepare(&args!["count: %d", 5]), "count: 5");
/// ```
pub fn prepare(args: &[Arg<'_>]) -> String {
    let mut out = String::new();
    prepare_into(&mut out, args);
    out
}

/// Join-style formatting into an existing buffer
pub fn prepare_into(out: &mut String, args: &[Arg<'_>]) {
    match args {
        [Arg::Str(template), rest @ ..] if !rest.is_empty() && template.contains('%') => {
            sprintf_into(out, template, rest);
        }
        _ => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{}", arg);
            }
        }
    }
}

/// Template-style formatting
///
/// Placeholders are resolved in one left-to-right pass, each taking the
/// longest index that names an argument. Unlike replacing `!1`, `!2`, ... in
/// turn, `!10` with ten or more arguments is the tenth argument, not the first
/// followed by `0`, and substituted text is never rescanned.
///
/// ```
/// use flog::{args, format_template};
///
/// assert_eq!(format_template("!1 owes !2", "!", &args!["ann", 5]), "ann owes 5");
/// assert_eq!(format_template("nothing here", "!", &args![1]), "nothing here");
/// ```
pub fn format_template(template: &str, prefix: &str, args: &[Arg<'_>]) -> String {
    let mut out = String::with_capacity(template.len());
    format_template_into(&mut out, template, prefix, args);
    out
}

/// Template-style formatting into an existing buffer
pub fn format_template_into(out: &mut String, template: &str, prefix: &str, args: &[Arg<'_>]) {
    if prefix.is_empty() || args.is_empty() || !template.contains(prefix) {
        out.push_str(template);
        return;
    }

    let mut rest = template;
    while let Some(pos) = rest.find(prefix) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + prefix.len()..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        match placeholder_index(&after[..digits], args.len()) {
            Some((index, used)) => {
                let _ = write!(out, "{}", args[index - 1]);
                rest = &after[used..];
            }
            None => {
                out.push_str(prefix);
                rest = after;
            }
        }
    }
    out.push_str(rest);
}

/// Longest prefix of `digits` naming an argument in `1..=count`, as
/// `(index, digits consumed)`
fn placeholder_index(digits: &str, count: usize) -> Option<(usize, usize)> {
    if digits.starts_with('0') {
        return None;
    }
    (1..=digits.len()).rev().find_map(|len| {
        let index: usize = digits[..len].parse().ok()?;
        (1..=count).contains(&index).then_some((index, len))
    })
}

/// Widths and precisions above this render `%!(BADWIDTH)` / `%!(BADPREC)`
const MAX_DIRECTIVE_NUMBER: usize = 1_000_000;

/// Largest precision `std::fmt` accepts; longer fractions are zero-extended
const MAX_FMT_PRECISION: usize = u16::MAX as usize;

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

/// printf-style substitution of `args` into `template`
pub fn sprintf_into(out: &mut String, template: &str, args: &[Arg<'_>]) {
    let mut rest = template;
    let mut next = 0;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(after) = rest.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let (directive, after) = parse_directive(rest);
        let mut chars = after.chars();
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            rest = "";
            break;
        };
        rest = chars.as_str();

        if directive.bad_width || directive.bad_precision {
            out.push_str(if directive.bad_width {
                "%!(BADWIDTH)"
            } else {
                "%!(BADPREC)"
            });
            next = (next + 1).min(args.len());
            continue;
        }

        match args.get(next) {
            Some(arg) => {
                next += 1;
                write_directive(out, verb, &directive, arg);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }
    out.push_str(rest);

    if next < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", arg);
        }
        out.push(')');
    }
}

fn parse_directive(input: &str) -> (Directive, &str) {
    let mut directive = Directive::default();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'-' => directive.minus = true,
            b'+' => directive.plus = true,
            b' ' => directive.space = true,
            b'0' => directive.zero = true,
            b'#' => directive.sharp = true,
            _ => break,
        }
        i += 1;
    }

    let (width, used) = parse_number(&input[i..]);
    match width {
        Some(Ok(width)) => directive.width = Some(width),
        Some(Err(())) => directive.bad_width = true,
        None => {}
    }
    i += used;

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let (precision, used) = parse_number(&input[i..]);
        match precision {
            Some(Err(())) => directive.bad_precision = true,
            Some(Ok(precision)) => directive.precision = Some(precision),
            None => directive.precision = Some(0),
        }
        i += used;
    }

    (directive, &input[i..])
}

/// Leading decimal number and the bytes it spans. `Err` when it exceeds
/// [`MAX_DIRECTIVE_NUMBER`]; all of its digits are still consumed.
fn parse_number(input: &str) -> (Option<std::result::Result<usize, ()>>, usize) {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return (None, 0);
    }
    let value = input[..len]
        .bytes()
        .try_fold(0usize, |acc, digit| {
            let next = acc * 10 + usize::from(digit - b'0');
            (next <= MAX_DIRECTIVE_NUMBER).then_some(next)
        })
        .ok_or(());
    (Some(value), len)
}

fn write_directive(out: &mut String, verb: char, d: &Directive, arg: &Arg<'_>) {
    let mut body = String::new();

    let numeric = match (verb, arg) {
        ('v' | 's', _) => {
            let _ = write!(body, "{}", arg);
            if let (Some(p), 's') = (d.precision, verb) {
                if let Some((cut, _)) = body.char_indices().nth(p) {
                    body.truncate(cut);
                }
            }
            matches!(
                arg,
                Arg::Int(_) | Arg::Uint(_) | Arg::Float(_) | Arg::Float32(_)
            )
        }
        ('d' | 'i', Arg::Int(v)) => {
            signed(&mut body, d, *v < 0);
            let _ = write!(body, "{}", v.unsigned_abs());
            true
        }
        ('d' | 'i', Arg::Uint(v)) => {
            signed(&mut body, d, false);
            let _ = write!(body, "{}", v);
            true
        }
        ('x' | 'X' | 'o' | 'b', Arg::Int(v)) => {
            if *v < 0 {
                body.push('-');
            }
            radix(&mut body, verb, d.sharp, v.unsigned_abs());
            true
        }
        ('x' | 'X' | 'o' | 'b', Arg::Uint(v)) => {
            radix(&mut body, verb, d.sharp, *v);
            true
        }
        ('x' | 'X', Arg::Str(_) | Arg::Bytes(_)) => {
            let bytes: &[u8] = match arg {
                Arg::Str(s) => s.as_bytes(),
                Arg::Bytes(b) => b,
                _ => &[],
            };
            for byte in bytes {
                let _ = if verb == 'x' {
                    write!(body, "{:02x}", byte)
                } else {
                    write!(body, "{:02X}", byte)
                };
            }
            false
        }
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Arg::Float(_) | Arg::Float32(_)) => {
            let v = match arg {
                Arg::Float(v) => *v,
                Arg::Float32(v) => f64::from(*v),
                _ => 0.0,
            };
            signed(&mut body, d, v.is_sign_negative() && v != 0.0);
            let v = v.abs();
            let precision = d.precision.unwrap_or(6);
            match verb {
                'f' | 'F' => fixed(&mut body, v, precision),
                'e' | 'E' => exponent(&mut body, v, precision, verb == 'E'),
                _ => general(
                    &mut body,
                    v,
                    matches!(arg, Arg::Float32(_)),
                    d,
                    verb == 'G',
                ),
            }
            true
        }
        ('t', Arg::Bool(v)) => {
            let _ = write!(body, "{}", v);
            false
        }
        ('q', Arg::Str(s)) => {
            let _ = write!(body, "{:?}", s);
            false
        }
        ('q', Arg::Char(c)) => {
            let _ = write!(body, "{:?}", c);
            false
        }
        ('c', Arg::Char(c)) => {
            body.push(*c);
            false
        }
        ('c', Arg::Int(_) | Arg::Uint(_)) => {
            let code = match arg {
                Arg::Int(v) => u32::try_from(*v).ok(),
                Arg::Uint(v) => u32::try_from(*v).ok(),
                _ => None,
            };
            body.push(code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER));
            false
        }
        _ => {
            let _ = write!(out, "%!{}({})", verb, arg);
            return;
        }
    };

    pad(out, &body, d, numeric);
}

fn signed(body: &mut String, d: &Directive, negative: bool) {
    if negative {
        body.push('-');
    } else if d.plus {
        body.push('+');
    } else if d.space {
        body.push(' ');
    }
}

fn radix(body: &mut String, verb: char, sharp: bool, v: u128) {
    let _ = match (verb, sharp) {
        ('x', false) => write!(body, "{:x}", v),
        ('x', true) => write!(body, "{:#x}", v),
        ('X', false) => write!(body, "{:X}", v),
        ('X', true) => write!(body, "0X{:X}", v),
        ('o', false) => write!(body, "{:o}", v),
        ('o', true) => write!(body, "0{:o}", v),
        (_, false) => write!(body, "{:b}", v),
        (_, true) => write!(body, "{:#b}", v),
    };
}

/// `%f`: exactly `precision` fractional digits
fn fixed(body: &mut String, v: f64, precision: usize) {
    let shown = precision.min(MAX_FMT_PRECISION);
    let _ = write!(body, "{:.*}", shown, v);
    // An f64 has far fewer than u16::MAX significant fractional digits
    if v.is_finite() {
        body.extend(std::iter::repeat('0').take(precision - shown));
    }
}

/// C-style exponent: `1.500000e+00`
fn exponent(body: &mut String, v: f64, precision: usize, upper: bool) {
    let shown = precision.min(MAX_FMT_PRECISION);
    let formatted = format!("{:.*e}", shown, v);
    let (mantissa, exp) = split_exponent(&formatted);
    body.push_str(mantissa);
    if v.is_finite() {
        body.extend(std::iter::repeat('0').take(precision - shown));
    }
    push_exponent(body, exp, upper);
}

/// `%g`: `precision` significant digits (shortest representation when
/// absent), in exponent form for exponents below -4 or at least the
/// precision. Trailing zeros are dropped unless `#` is set.
fn general(body: &mut String, v: f64, single: bool, d: &Directive, upper: bool) {
    let Some(precision) = d.precision else {
        let scientific = if single {
            format!("{:e}", v as f32)
        } else {
            format!("{:e}", v)
        };
        let (mantissa, exp) = split_exponent(&scientific);
        if !v.is_finite() || (-4..6).contains(&exp) {
            let _ = if single {
                write!(body, "{}", v as f32)
            } else {
                write!(body, "{}", v)
            };
        } else {
            body.push_str(mantissa);
            push_exponent(body, exp, upper);
        }
        return;
    };

    let precision = precision.clamp(1, MAX_FMT_PRECISION + 1);
    let scientific = format!("{:.*e}", precision - 1, v);
    let (mantissa, exp) = split_exponent(&scientific);

    if !v.is_finite() {
        body.push_str(mantissa);
    } else if exp < -4 || exp >= precision as i32 {
        body.push_str(trim_fraction(mantissa, d.sharp));
        push_exponent(body, exp, upper);
    } else {
        let decimals = ((precision as i32 - 1 - exp) as usize).min(MAX_FMT_PRECISION);
        let formatted = format!("{:.*}", decimals, v);
        body.push_str(trim_fraction(&formatted, d.sharp));
    }
}

fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn push_exponent(body: &mut String, exp: i32, upper: bool) {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    let _ = write!(body, "{}{}{:02}", marker, sign, exp.unsigned_abs());
}

/// Drop trailing fractional zeros (and a bare point) unless `keep` is set
fn trim_fraction(number: &str, keep: bool) -> &str {
    if keep || !number.contains('.') {
        return number;
    }
    number.trim_end_matches('0').trim_end_matches('.')
}

fn pad(out: &mut String, body: &str, d: &Directive, numeric: bool) {
    let len = body.chars().count();
    let width = d.width.unwrap_or(0);
    if len >= width {
        out.push_str(body);
        return;
    }
    let fill = width - len;

    if d.minus {
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if d.zero && numeric {
        let (sign, digits) = split_sign(body);
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(body);
    }
}

/// Split a leading sign and radix prefix off a number so zero padding goes
/// between them and the digits
fn split_sign(body: &str) -> (&str, &str) {
    let sign = usize::from(body.starts_with(['-', '+', ' ']));
    let prefix = ["0x", "0X", "0b"]
        .iter()
        .find(|p| body[sign..].starts_with(*p))
        .map_or(0, |p| p.len());
    body.split_at(sign + prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl fmt::Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {})", self.x, self.y)
        }
    }

    #[test]
    fn test_single_string_passes_through() {
        assert_eq!(prepare(&args!["hello"]), "hello");
    }

    #[test]
    fn test_empty_args() {
        assert_eq!(prepare(&[]), "");
    }

    #[test]
    fn test_join_mixed_values() {
        let owned = String::from("owned");
        let bytes = b"raw".to_vec();
        assert_eq!(
            prepare(&args!["a", owned, 42, -7i64, 2.5, true, 'c', bytes]),
            "a owned 42 -7 2.5 true c raw"
        );
    }

    #[test]
    fn test_join_uses_error_display_and_debug() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let point = Point { x: 1, y: 2 };
        let list = vec![1, 2];
        assert_eq!(
            prepare(&args!["failed:", io, display_arg(&point), debug_arg(&list), debug_arg(&point)]),
            "failed: missing file (1, 2) [1, 2] Point { x: 1, y: 2 }"
        );
    }

    #[test]
    fn test_percent_with_no_extra_args_is_literal() {
        assert_eq!(prepare(&args!["100% done"]), "100% done");
    }

    #[test]
    fn test_percent_in_later_argument_is_joined() {
        assert_eq!(prepare(&args![1, "50%"]), "1 50%");
    }

    #[test]
    fn test_printf_takes_precedence() {
        assert_eq!(prepare(&args!["count: %d", 5]), "count: 5");
        assert_eq!(prepare(&args!["%s=%v", "key", 3.5]), "key=3.5");
    }

    #[test]
    fn test_printf_missing_and_extra() {
        assert_eq!(prepare(&args!["%d and %d", 1]), "1 and %!d(MISSING)");
        assert_eq!(prepare(&args!["%d", 1, 2, "x"]), "1%!(EXTRA 2, x)");
        assert_eq!(prepare(&args!["50%", 1]), "50%!(NOVERB)%!(EXTRA 1)");
    }

    #[test]
    fn test_printf_bad_verb() {
        assert_eq!(prepare(&args!["%d", "abc"]), "%!d(abc)");
        assert_eq!(prepare(&args!["%t", 1]), "%!t(1)");
    }

    #[test]
    fn test_printf_escaped_percent() {
        assert_eq!(prepare(&args!["%d%%", 75]), "75%");
    }

    #[test]
    fn test_printf_width_and_flags() {
        assert_eq!(prepare(&args!["[%5d]", 42]), "[   42]");
        assert_eq!(prepare(&args!["[%-5d]", 42]), "[42   ]");
        assert_eq!(prepare(&args!["[%05d]", -42]), "[-0042]");
        assert_eq!(prepare(&args!["[%+d]", 7]), "[+7]");
        assert_eq!(prepare(&args!["[%6s]", "ab"]), "[    ab]");
        assert_eq!(prepare(&args!["[%.2s]", "abcdef"]), "[ab]");
    }

    #[test]
    fn test_printf_floats() {
        assert_eq!(prepare(&args!["%.2f", 3.14159]), "3.14");
        assert_eq!(prepare(&args!["%f", 1.5]), "1.500000");
        assert_eq!(prepare(&args!["%08.3f", -1.5]), "-001.500");
        assert_eq!(prepare(&args!["%e", 1234.5]), "1.234500e+03");
        assert_eq!(prepare(&args!["%.1E", 0.00012]), "1.2E-04");
        assert_eq!(prepare(&args!["%g", 0.1f32]), "0.1");
    }

    #[test]
    fn test_printf_general_precision() {
        assert_eq!(prepare(&args!["%.3g", 3.14159]), "3.14");
        assert_eq!(prepare(&args!["%.3g", 1234567.0]), "1.23e+06");
        assert_eq!(prepare(&args!["%.3g", 1.0]), "1");
        assert_eq!(prepare(&args!["%#.3g", 1.0]), "1.00");
        assert_eq!(prepare(&args!["%.2g", 99.9]), "1e+02");
        assert_eq!(prepare(&args!["%.2g", 0.000012345]), "1.2e-05");
        assert_eq!(prepare(&args!["%.3g", 100.0]), "100");
        assert_eq!(prepare(&args!["%g", 1234567.0]), "1.234567e+06");
        assert_eq!(prepare(&args!["%g", 100000.0]), "100000");
        assert_eq!(prepare(&args!["%G", 0.0000001]), "1E-07");
        assert_eq!(prepare(&args!["%.2G", 12345.0]), "1.2E+04");
    }

    #[test]
    fn test_printf_width_limit() {
        assert_eq!(prepare(&args!["[%99999999999999d]", 1]), "[%!(BADWIDTH)]");
        assert_eq!(prepare(&args!["%1000001s|%d", "x", 2]), "%!(BADWIDTH)|2");

        let mut bare = String::new();
        sprintf_into(&mut bare, "%1000001d", &[]);
        assert_eq!(bare, "%!(BADWIDTH)");

        let widest = prepare(&args!["%1000000d", 7]);
        assert_eq!(widest.len(), MAX_DIRECTIVE_NUMBER);
        assert!(widest.ends_with(" 7"));
    }

    #[test]
    fn test_printf_precision_limit() {
        assert_eq!(prepare(&args!["%.1000001f", 1.5]), "%!(BADPREC)");
        assert_eq!(prepare(&args!["%.99999999999999999999e|%d", 1.5, 3]), "%!(BADPREC)|3");

        let long = prepare(&args!["%.70000f", 1.5]);
        assert_eq!(long.len(), "1.".len() + 70_000);
        assert!(long.starts_with("1.5000"));
        assert!(long[2..].bytes().skip(1).all(|b| b == b'0'));

        let sci = prepare(&args!["%.70000e", 1.5]);
        assert!(sci.starts_with("1.5000"));
        assert!(sci.ends_with("0e+00"));
        assert_eq!(sci.len(), "1.".len() + 70_000 + "e+00".len());

        assert_eq!(prepare(&args!["%.70000g", 1.5]), "1.5");
        assert!(prepare(&args!["%.70000g", 0.00015]).starts_with("0.0001"));
        assert_eq!(prepare(&args!["%.70000s", "short"]), "short");
    }

    #[test]
    fn test_printf_malformed_directives() {
        assert_eq!(prepare(&args!["%*d", 5]), "%!*(5)d");
        assert_eq!(prepare(&args!["%-", 1]), "%!(NOVERB)%!(EXTRA 1)");
        assert_eq!(prepare(&args!["%.f", 2.7]), "3");
        assert_eq!(prepare(&args!["%z", 1]), "%!z(1)");
    }

    #[test]
    fn test_printf_radix_and_chars() {
        assert_eq!(prepare(&args!["%x", 255]), "ff");
        assert_eq!(prepare(&args!["%X", 255u8]), "FF");
        assert_eq!(prepare(&args!["%#x", 255]), "0xff");
        assert_eq!(prepare(&args!["%x", -255]), "-ff");
        assert_eq!(prepare(&args!["%o", 8]), "10");
        assert_eq!(prepare(&args!["%b", 5]), "101");
        assert_eq!(prepare(&args!["%x", "hi"]), "6869");
        assert_eq!(prepare(&args!["%c%c", 'o', 107]), "ok");
        assert_eq!(prepare(&args!["%q", "a\"b"]), "\"a\\\"b\"");
        assert_eq!(prepare(&args!["%t", false]), "false");
    }

    #[test]
    fn test_template_replaces_placeholders() {
        assert_eq!(
            format_template("user !1 logged in from !2", "!", &args!["ann", "10.0.0.1"]),
            "user ann logged in from 10.0.0.1"
        );
    }

    #[test]
    fn test_template_replaces_every_occurrence() {
        assert_eq!(format_template("!1-!1-!1", "!", &args![7]), "7-7-7");
    }

    #[test]
    fn test_template_without_placeholder_is_unchanged() {
        assert_eq!(format_template("no tokens", "!", &args![1, 2]), "no tokens");
    }

    #[test]
    fn test_template_without_args_is_unchanged() {
        assert_eq!(format_template("!1 stays", "!", &[]), "!1 stays");
    }

    #[test]
    fn test_template_unknown_index_is_left_alone() {
        assert_eq!(format_template("!3 and !1!", "!", &args!["x"]), "!3 and x!");
        assert_eq!(format_template("!01", "!", &args!["x"]), "!01");
    }

    #[test]
    fn test_template_two_digit_indices() {
        let values: Vec<String> = (1..=10).map(|i| format!("v{}", i)).collect();
        let args: Vec<Arg<'_>> = values.iter().map(|v| v.as_arg()).collect();
        assert_eq!(format_template("!10 !1", "!", &args), "v10 v1");
        assert_eq!(format_template("!12", "!", &args[..1]), "v12");
    }

    #[test]
    fn test_template_custom_prefix() {
        assert_eq!(
            format_template("${1} is $1", "$", &args!["it"]),
            "${1} is it"
        );
        assert_eq!(format_template("%%1 done", "%%", &args![9]), "9 done");
    }

    #[test]
    fn test_template_uses_textual_forms() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(format_template("write failed: !1", "!", &args![err]), "write failed: disk full");
    }
}
