//! Spanish number, currency, and date formatting

use crate::{EsTextError, Result};
use chrono::NaiveDate;

/// Spanish month names, lowercase as written inside a date
const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// English month names as produced by chrono's `%B`
const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Digit grouping and decimal convention for `render_float`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Separator between groups of three integer digits, if any
    pub thousands_sep: Option<char>,
    /// Separator before the fractional digits
    pub decimal_sep: char,
    /// Number of fractional digits
    pub precision: u8,
}

impl NumberFormat {
    /// Latin-American convention: `1.234,50`
    pub const LATAM: NumberFormat = NumberFormat {
        thousands_sep: Some('.'),
        decimal_sep: ',',
        precision: 2,
    };
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::LATAM
    }
}

/// Render a float with grouping and a fixed number of decimals
///
/// Rounding is done on the exact binary value, ties to even, so `1.115`
/// (stored just below the tie) renders as `1,11`.
///
/// # Examples
/// ```
/// use es_text::{render_float, NumberFormat};
/// assert_eq!(render_float(1234.5, NumberFormat::LATAM), "1.234,50");
/// assert_eq!(render_float(-0.5, NumberFormat::LATAM), "-0,50");
/// ```
pub fn render_float(n: f64, format: NumberFormat) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let fixed = format!("{:.*}", format.precision as usize, n.abs());
    let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let int_str = group_digits(int_digits, format.thousands_sep);
    let sign = if n.is_sign_negative() { "-" } else { "" };

    if frac_digits.is_empty() {
        format!("{sign}{int_str}")
    } else {
        format!("{sign}{int_str}{}{frac_digits}", format.decimal_sep)
    }
}

/// Insert a separator between groups of three digits
fn group_digits(digits: &str, sep: Option<char>) -> String {
    let Some(sep) = sep else {
        return digits.to_string();
    };

    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

/// Format an amount as a Latin-American peso string
///
/// A negative amount keeps its sign after the `$`.
///
/// # Examples
/// ```
/// use es_text::format_currency;
/// assert_eq!(format_currency(1234.5), "$1.234,50");
/// assert_eq!(format_currency(800.0), "$800,00");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", render_float(amount, NumberFormat::LATAM))
}

/// Replace every English month name in `text` with its Spanish name
pub fn translate_month_names(text: &str) -> String {
    ENGLISH_MONTHS
        .iter()
        .zip(SPANISH_MONTHS.iter())
        .fold(text.to_string(), |acc, (en, es)| acc.replace(en, es))
}

/// Format a date as "DD de <mes> de YYYY" (e.g., "05 de marzo de 2026")
pub fn format_date_long(date: NaiveDate) -> String {
    translate_month_names(&date.format("%d de %B de %Y").to_string())
}

/// Parse a "YYYY-MM-DD" date
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| EsTextError::InvalidDate(format!("{text}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_render_float_latam() {
        assert_eq!(render_float(1234.56, NumberFormat::LATAM), "1.234,56");
        assert_eq!(render_float(1000000.0, NumberFormat::LATAM), "1.000.000,00");
        assert_eq!(render_float(-100.5, NumberFormat::LATAM), "-100,50");
        assert_eq!(render_float(999.999, NumberFormat::LATAM), "1.000,00");
    }

    #[test]
    fn test_render_float_without_grouping() {
        let fmt = NumberFormat {
            thousands_sep: None,
            decimal_sep: '.',
            precision: 0,
        };
        assert_eq!(render_float(123456.4, fmt), "123456");
    }

    #[test]
    fn test_render_float_negative_keeps_sign() {
        assert_eq!(render_float(-0.001, NumberFormat::LATAM), "-0,00");
        assert_eq!(render_float(0.001, NumberFormat::LATAM), "0,00");
    }

    #[test]
    fn test_render_float_special() {
        assert_eq!(render_float(f64::NAN, NumberFormat::LATAM), "NaN");
        assert_eq!(render_float(f64::INFINITY, NumberFormat::LATAM), "Infinity");
        assert_eq!(
            render_float(f64::NEG_INFINITY, NumberFormat::LATAM),
            "-Infinity"
        );
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1000", Some(',')), "1,000");
        assert_eq!(group_digits("1000000", Some('.')), "1.000.000");
        assert_eq!(group_digits("100", Some('.')), "100");
        assert_eq!(group_digits("123456", None), "123456");
        assert_eq!(group_digits("0", Some('.')), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1.234,50");
        assert_eq!(format_currency(800.0), "$800,00");
        assert_eq!(format_currency(1040.0), "$1.040,00");
        assert_eq!(format_currency(0.0), "$0,00");
        assert_eq!(format_currency(1234567.891), "$1.234.567,89");
    }

    #[test]
    fn test_format_currency_rounds_binary_value() {
        assert_eq!(format_currency(1.115), "$1,11");
        assert_eq!(format_currency(0.125), "$0,12");
        assert_eq!(format_currency(2.675), "$2,67");
        assert_eq!(format_currency(1040.125), "$1.040,12");
    }

    #[test]
    fn test_format_currency_large_amount() {
        assert_eq!(format_currency(1e20), "$100.000.000.000.000.000.000,00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-5.0), "$-5,00");
    }

    #[test]
    fn test_translate_month_names() {
        assert_eq!(
            translate_month_names("01 de January de 2026"),
            "01 de enero de 2026"
        );
        assert_eq!(translate_month_names("sin mes"), "sin mes");
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date_long(date(2026, 3, 15)), "15 de marzo de 2026");
        assert_eq!(format_date_long(date(2025, 12, 31)), "31 de diciembre de 2025");
    }

    #[test]
    fn test_format_date_long_pads_day() {
        assert_eq!(format_date_long(date(2026, 1, 5)), "05 de enero de 2026");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2026-03-15").unwrap(), date(2026, 3, 15));
        assert!(matches!(
            parse_iso_date("15/03/2026"),
            Err(EsTextError::InvalidDate(_))
        ));
        assert!(parse_iso_date("2026-02-30").is_err());
        assert!(parse_iso_date("").is_err());
    }
}
