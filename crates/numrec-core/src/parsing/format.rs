//! Resolution string formatting.

use rust_decimal::Decimal;

use crate::models::{Interval, RelativeTo};

/// Significant digits kept in resolution strings.
const SIGNIFICANT_DIGITS: u32 = 15;

/// Shortest round-trippable rendering with the locale's decimal separator.
pub fn format_number(value: Decimal, decimal_separator: char) -> String {
    let rounded = value
        .round_sf(SIGNIFICANT_DIGITS)
        .unwrap_or(value)
        .normalize();
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    let text = rounded.to_string();
    if decimal_separator == '.' {
        text
    } else {
        text.replace('.', &decimal_separator.to_string())
    }
}

pub fn format_percent(value: Decimal, decimal_separator: char) -> String {
    format!("{}%", format_number(value, decimal_separator))
}

/// Bracket notation: `[5,10)`, `(20,)`, `(,3]`.
pub fn format_interval(interval: &Interval, decimal_separator: char) -> String {
    let bound = |b: Option<Decimal>| {
        b.map(|v| format_number(v, decimal_separator))
            .unwrap_or_default()
    };
    format!(
        "{}{},{}{}",
        if interval.left_closed { '[' } else { '(' },
        bound(interval.start),
        bound(interval.end),
        if interval.right_closed { ']' } else { ')' },
    )
}

/// `+1`, `-1` and `0` relative to the current item; `end`, `end-1` relative to the end.
pub fn format_relative(offset: i64, relative_to: RelativeTo) -> String {
    match relative_to {
        RelativeTo::Current if offset > 0 => format!("+{offset}"),
        RelativeTo::Current => offset.to_string(),
        RelativeTo::End if offset == 0 => "end".to_string(),
        RelativeTo::End => format!("end{offset:+}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Decimal::from(900_000), '.'), "900000");
        assert_eq!(format_number(Decimal::from_str("2.500").unwrap(), '.'), "2.5");
        assert_eq!(format_number(Decimal::from_str("-0.0").unwrap(), '.'), "0");
        assert_eq!(format_number(Decimal::from_str("1.5").unwrap(), ','), "1,5");
    }

    #[test]
    fn test_format_rounds_to_fifteen_digits() {
        let third = Decimal::ONE / Decimal::from(3);
        assert_eq!(format_number(third, '.'), "0.333333333333333");
    }

    #[test]
    fn test_format_interval() {
        let interval = Interval {
            start: Some(Decimal::from(5)),
            end: Some(Decimal::from(10)),
            left_closed: true,
            right_closed: false,
        };
        assert_eq!(format_interval(&interval, '.'), "[5,10)");

        let open = Interval {
            start: Some(Decimal::from(20)),
            end: None,
            left_closed: false,
            right_closed: false,
        };
        assert_eq!(format_interval(&open, '.'), "(20,)");
    }

    #[test]
    fn test_format_relative() {
        assert_eq!(format_relative(1, RelativeTo::Current), "+1");
        assert_eq!(format_relative(-1, RelativeTo::Current), "-1");
        assert_eq!(format_relative(0, RelativeTo::End), "end");
        assert_eq!(format_relative(-1, RelativeTo::End), "end-1");
    }
}
