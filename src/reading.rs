//! Measurement model and fixed-point formatting.
//!
//! Sensors report scaled integers (`value × 10^scale`) so nothing in the
//! read path touches floating point. Formatting renders into a bounded
//! [`heapless::String`]; output that would exceed the bound is truncated
//! and tagged with a visible marker instead of overflowing.

use core::fmt::{self, Write};

use heapless::String;

/// Capacity of a formatted reading, in bytes.
pub const MAX_READING_LEN: usize = 16;

/// Marker appended when a reading does not fit its destination buffer.
pub const TRUNCATION_MARKER: &str = "[TRUNCATED]";

/// A formatted sensor reading, built fresh per request and discarded after
/// the response is serialized.
pub type FormattedReading = String<MAX_READING_LEN>;

/// Unit of a physical quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Percent,
    /// Device did not report a unit.
    Undefined,
}

impl Unit {
    /// Display symbol. Empty for [`Unit::Undefined`]; the formatter
    /// substitutes `"unknown"` in that case.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "\u{b0}C",
            Unit::Fahrenheit => "\u{b0}F",
            Unit::Percent => "%",
            Unit::Undefined => "",
        }
    }
}

/// One sample from a registry device: a scaled integer plus a unit.
///
/// The displayed value is `value × 10^scale`. Registry devices report
/// scales in `-3..=0` in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub value: i16,
    pub scale: i8,
    pub unit: Unit,
}

impl Measurement {
    pub const fn new(value: i16, scale: i8, unit: Unit) -> Self {
        Self { value, scale, unit }
    }

    /// Renders `"<integer>.<fraction> <unit>"` into a fresh reading buffer.
    pub fn format(&self) -> FormattedReading {
        let mut out = FormattedReading::new();
        self.write_into(&mut out);
        out
    }

    /// Renders into `out`, truncating with [`TRUNCATION_MARKER`] if the
    /// text does not fit. Never writes past the buffer capacity.
    pub fn write_into<const N: usize>(&self, out: &mut String<N>) {
        if self.render(out).is_err() {
            mark_truncated(out);
        }
    }

    fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.scale > 0 {
            // Whole number, no fractional digits. The exponent cap keeps
            // the i64 multiply in range for any i8 scale.
            let exp = (self.scale as u32).min(13);
            write!(out, "{}", self.value as i64 * 10i64.pow(exp))?;
        } else {
            let exp = (-(self.scale as i32) as u32).min(9);
            let factor = 10i64.pow(exp);
            let v = self.value as i64;
            write!(out, "{}.{:02}", v / factor, (v % factor).abs())?;
        }
        match self.unit.symbol() {
            "" => out.write_str(" unknown"),
            symbol => write!(out, " {symbol}"),
        }
    }
}

/// Formats a raw deci-value (one implied decimal digit) the way the DHT
/// driver reports temperature and humidity: `235 → "23.5"`, `-5 → "-0.5"`.
pub fn format_deci(value: i16) -> FormattedReading {
    let mut out = FormattedReading::new();
    let v = (value as i32).unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    // At most 7 bytes ("-3276.8"), always fits.
    let _ = write!(out, "{sign}{}.{}", v / 10, v % 10);
    out
}

fn mark_truncated<const N: usize>(out: &mut String<N>) {
    let keep = N.saturating_sub(TRUNCATION_MARKER.len());
    while out.len() > keep {
        out.pop();
    }
    for c in TRUNCATION_MARKER.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_centi_degrees_with_unit() {
        let m = Measurement::new(2350, -2, Unit::Celsius);
        assert_eq!(m.format().as_str(), "23.50 \u{b0}C");
    }

    #[test]
    fn decomposition_matches_scale() {
        // integer part v / 10^-s, fractional part |v mod 10^-s|, two digits
        let m = Measurement::new(235, -1, Unit::Celsius);
        assert_eq!(m.format().as_str(), "23.05 \u{b0}C");

        let m = Measurement::new(23, 0, Unit::Celsius);
        assert_eq!(m.format().as_str(), "23.00 \u{b0}C");

        let m = Measurement::new(23456, -3, Unit::Percent);
        assert_eq!(m.format().as_str(), "23.456 %");
    }

    #[test]
    fn negative_values_keep_sign_in_integer_part() {
        let m = Measurement::new(-1250, -2, Unit::Celsius);
        assert_eq!(m.format().as_str(), "-12.50 \u{b0}C");
    }

    #[test]
    fn positive_scale_multiplies_out() {
        let m = Measurement::new(5, 2, Unit::Percent);
        assert_eq!(m.format().as_str(), "500 %");
    }

    #[test]
    fn empty_unit_becomes_unknown() {
        let m = Measurement::new(100, -1, Unit::Undefined);
        assert_eq!(m.format().as_str(), "10.00 unknown");
    }

    #[test]
    fn truncates_with_marker_instead_of_overflowing() {
        let m = Measurement::new(2350, -2, Unit::Celsius);
        let mut out: String<8> = String::new();
        m.write_into(&mut out);
        // "23.50 °C" needs 9 bytes; the marker itself is clipped to fit.
        assert_eq!(out.as_str(), "[TRUNCAT");
        assert!(out.len() <= 8);
    }

    #[test]
    fn marker_replaces_tail_when_it_fits() {
        // "-32.768 unknown" needs 15 bytes; one byte of the value survives.
        let m = Measurement::new(-32768, -3, Unit::Undefined);
        let mut out: String<12> = String::new();
        m.write_into(&mut out);
        assert_eq!(out.as_str(), "-[TRUNCATED]");
    }

    #[test]
    fn deci_formatting_is_sign_aware() {
        assert_eq!(format_deci(235).as_str(), "23.5");
        assert_eq!(format_deci(605).as_str(), "60.5");
        assert_eq!(format_deci(-15).as_str(), "-1.5");
        assert_eq!(format_deci(-5).as_str(), "-0.5");
        assert_eq!(format_deci(0).as_str(), "0.0");
        assert_eq!(format_deci(i16::MIN).as_str(), "-3276.8");
    }
}
