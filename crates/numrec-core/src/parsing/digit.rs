//! Digit, power and digit-ordinal notation.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::ParseError;
use crate::locale::LocaleProvider;

/// Map full-width digits and punctuation to their ASCII forms.
pub(crate) fn normalize_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '．' => '.',
            '，' => ',',
            '－' => '-',
            '＋' => '+',
            '％' => '%',
            '／' => '/',
            _ => c,
        })
        .collect()
}

/// Parse digit notation such as `1,234.5`, `-12`, `1.5k` or `3千万`.
pub(crate) fn parse_digits(text: &str, locale: &LocaleProvider) -> Result<Decimal, ParseError> {
    let normalized = normalize_width(text.trim());
    let (negative, body) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
    };
    let (digits, multiplier) = strip_multipliers(body, locale, text)?;

    let separator = locale.decimal_separator();
    let mut value = Decimal::ZERO;
    let mut scale: Option<Decimal> = None;
    let mut seen_digit = false;

    for c in digits.chars() {
        if c == separator {
            if scale.is_some() {
                return Err(ParseError::malformed("digit", text, "repeated decimal separator"));
            }
            scale = Some(Decimal::ONE);
            continue;
        }
        if c.is_whitespace() || locale.group_separators().contains(&c) {
            continue;
        }
        let Some(digit) = c.to_digit(10) else {
            return Err(ParseError::malformed(
                "digit",
                text,
                format!("unexpected character {c:?}"),
            ));
        };
        seen_digit = true;
        let digit = Decimal::from(digit);
        match scale.as_mut() {
            Some(scale) => {
                *scale /= Decimal::TEN;
                value += digit * *scale;
            }
            None => {
                value = value
                    .checked_mul(Decimal::TEN)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| ParseError::overflow(text))?;
            }
        }
    }

    if !seen_digit {
        return Err(ParseError::malformed("digit", text, "no digits"));
    }
    let value = value
        .checked_mul(multiplier)
        .ok_or_else(|| ParseError::overflow(text))?;
    Ok(if negative { -value } else { value })
}

/// Strip trailing multiplier suffixes, longest first, repeatedly ("3千万" is 3 × 1000 × 10000).
fn strip_multipliers<'t>(
    body: &'t str,
    locale: &LocaleProvider,
    text: &str,
) -> Result<(&'t str, Decimal), ParseError> {
    let mut rest = body.trim_end();
    let mut multiplier = Decimal::ONE;

    'strip: loop {
        for (suffix, factor) in locale.digit_multipliers() {
            let Some(cut) = rest.len().checked_sub(suffix.len()) else {
                continue;
            };
            if cut > 0 && rest.is_char_boundary(cut) && rest[cut..].eq_ignore_ascii_case(suffix) {
                rest = rest[..cut].trim_end();
                multiplier = multiplier
                    .checked_mul(*factor)
                    .ok_or_else(|| ParseError::overflow(text))?;
                continue 'strip;
            }
        }
        break;
    }
    Ok((rest, multiplier))
}

/// Parse `1.5e10`, `2E-3` or `2^10`.
pub(crate) fn parse_power(text: &str, locale: &LocaleProvider) -> Result<Decimal, ParseError> {
    let normalized = normalize_width(text.trim()).to_lowercase();
    let (base, exponent, scientific) = if let Some((b, e)) = normalized.split_once('^') {
        (b, e, false)
    } else if let Some((b, e)) = normalized.split_once('e') {
        (b, e, true)
    } else {
        return Err(ParseError::malformed("power", text, "no exponent marker"));
    };

    let base = parse_digits(base, locale)?;
    let exponent: i64 = exponent
        .trim()
        .trim_start_matches('+')
        .parse()
        .map_err(|_| ParseError::malformed("power", text, "exponent is not an integer"))?;

    let factor = if scientific {
        Decimal::TEN.checked_powi(exponent)
    } else {
        base.checked_powi(exponent)
    };
    let factor = factor.ok_or_else(|| ParseError::overflow(text))?;
    if scientific {
        base.checked_mul(factor).ok_or_else(|| ParseError::overflow(text))
    } else {
        Ok(factor)
    }
}

/// Parse `22nd`, `1,001st`.
pub(crate) fn parse_digit_ordinal(
    text: &str,
    locale: &LocaleProvider,
) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    let body = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| {
            let cut = trimmed.len().checked_sub(suffix.len())?;
            trimmed[cut..]
                .eq_ignore_ascii_case(suffix)
                .then(|| &trimmed[..cut])
        })
        .ok_or_else(|| ParseError::malformed("digit-ordinal", text, "missing ordinal suffix"))?;
    parse_digits(body, locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn english() -> &'static LocaleProvider {
        provider(Culture::English)
    }

    #[test]
    fn test_digits() {
        assert_eq!(parse_digits("1,234", english()).unwrap(), dec("1234"));
        assert_eq!(parse_digits("1,234.56", english()).unwrap(), dec("1234.56"));
        assert_eq!(parse_digits("-12", english()).unwrap(), dec("-12"));
        assert_eq!(parse_digits("０.５", english()).unwrap(), dec("0.5"));
    }

    #[test]
    fn test_multiplier_suffixes() {
        assert_eq!(parse_digits("1.5k", english()).unwrap(), dec("1500"));
        assert_eq!(parse_digits("2B", english()).unwrap(), dec("2000000000"));

        let chinese = provider(Culture::Chinese);
        assert_eq!(parse_digits("3万", chinese).unwrap(), dec("30000"));
        assert_eq!(parse_digits("3千万", chinese).unwrap(), dec("30000000"));
        assert_eq!(parse_digits("1.5亿", chinese).unwrap(), dec("150000000"));
    }

    #[test]
    fn test_malformed_digits() {
        assert!(matches!(
            parse_digits("1.2.3", english()),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_digits("k", english()),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = "9".repeat(40);
        assert!(matches!(
            parse_digits(&huge, english()),
            Err(ParseError::Overflow { .. })
        ));
    }

    #[test]
    fn test_power() {
        assert_eq!(parse_power("1.5e3", english()).unwrap(), dec("1500"));
        assert_eq!(parse_power("2E-2", english()).unwrap(), dec("0.02"));
        assert_eq!(parse_power("2^10", english()).unwrap(), dec("1024"));
    }

    #[test]
    fn test_digit_ordinal() {
        assert_eq!(parse_digit_ordinal("22nd", english()).unwrap(), dec("22"));
        assert_eq!(parse_digit_ordinal("1,001ST", english()).unwrap(), dec("1001"));
    }
}
