//! Chinese numerals: integers, decimals, fractions, ordinals and percentages.

use rust_decimal::Decimal;

use super::digit::normalize_width;
use super::words::{Token, compose};
use crate::error::ParseError;
use crate::locale::CjkTables;

fn malformed(strategy: &'static str, text: &str, reason: &str) -> ParseError {
    ParseError::malformed(strategy, text, reason)
}

/// Value of an integer numeral such as "二百三十五", "两万三千", "三千五" or "一打".
///
/// Consecutive digits read positionally ("一二三" is 123, "零五" is 5). A single digit
/// right after a hundred or larger magnitude abbreviates the next lower magnitude
/// ("三千五" is 3500).
pub(crate) fn integer_value(text: &str, tables: &CjkTables) -> Option<Decimal> {
    let chars: Vec<char> = normalize_width(text.trim()).chars().collect();
    let (body, factor) = match chars.split_last() {
        Some((last, rest)) if tables.dozen_chars.contains(last) => (rest, Decimal::from(12)),
        Some((last, rest)) if tables.pair_chars.contains(last) => (rest, Decimal::TWO),
        _ => (chars.as_slice(), Decimal::ONE),
    };
    if body.is_empty() {
        return None;
    }

    let mut tokens = Vec::new();
    let mut run: Option<Decimal> = None;
    let mut run_len = 0;
    for c in body {
        if let Some(&digit) = tables.digits.get(c) {
            run = Some(run.unwrap_or_default().checked_mul(Decimal::TEN)? + digit);
            run_len += 1;
            continue;
        }
        let round = *tables.round_chars.get(c)?;
        if let Some(value) = run.take() {
            tokens.push(Token::Value(value));
        }
        run_len = 0;
        tokens.push(Token::Round(round));
    }

    if let Some(value) = run {
        let value = match tokens.last() {
            Some(Token::Round(round))
                if run_len == 1 && !value.is_zero() && *round >= Decimal::ONE_HUNDRED =>
            {
                value * *round / Decimal::TEN
            }
            _ => value,
        };
        tokens.push(Token::Value(value));
    }

    compose(&tokens)?.checked_mul(factor)
}

/// Integer or decimal numeral, whichever the text is.
fn number_value(text: &str, tables: &CjkTables) -> Option<Decimal> {
    if text.chars().any(|c| tables.point_chars.contains(&c)) {
        double_value(text, tables)
    } else {
        integer_value(text, tables)
    }
}

fn double_value(text: &str, tables: &CjkTables) -> Option<Decimal> {
    let normalized = normalize_width(text.trim());
    let (integer, decimals) = normalized.split_once(|c| tables.point_chars.contains(&c))?;

    let mut value = if integer.is_empty() {
        Decimal::ZERO
    } else {
        integer_value(integer, tables)?
    };
    let mut scale = Decimal::ONE;
    for c in decimals.chars() {
        let digit = tables.digits.get(&c)?;
        scale /= Decimal::TEN;
        value += *digit * scale;
    }
    Some(value)
}

pub(crate) fn parse_integer(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    integer_value(text, tables).ok_or_else(|| malformed("cjk-integer", text, "not an integer numeral"))
}

pub(crate) fn parse_double(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    double_value(text, tables).ok_or_else(|| malformed("cjk-double", text, "not a decimal numeral"))
}

/// "三分之一" is 1/3; "二又三分之一" is 2 + 1/3.
pub(crate) fn parse_fraction(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    let (integer, fraction) = match trimmed.split_once(tables.mixed_marker) {
        Some((integer, fraction)) => (Some(integer), fraction),
        None => (None, trimmed),
    };
    let (denominator, numerator) = fraction
        .split_once(tables.fraction_marker.as_str())
        .ok_or_else(|| malformed("cjk-fraction", text, "no fraction marker"))?;

    let value = |part: &str| {
        number_value(part, tables).ok_or_else(|| malformed("cjk-fraction", text, "bad operand"))
    };
    let denominator = value(denominator)?;
    if denominator.is_zero() {
        return Err(ParseError::DivisionByZero {
            text: text.to_string(),
        });
    }
    let fraction = value(numerator)?
        .checked_div(denominator)
        .ok_or_else(|| ParseError::overflow(text))?;

    match integer {
        Some(integer) => Ok(value(integer)? + fraction),
        None => Ok(fraction),
    }
}

pub(crate) fn parse_ordinal(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    let body = text
        .trim()
        .strip_prefix(tables.ordinal_prefix)
        .ok_or_else(|| malformed("cjk-ordinal", text, "no ordinal prefix"))?;
    integer_value(body, tables).ok_or_else(|| malformed("cjk-ordinal", text, "not an integer numeral"))
}

/// "百分之五十" is 50 (percent).
pub(crate) fn parse_percent(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    let body = tables
        .percent_prefixes
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix.as_str()))
        .ok_or_else(|| malformed("cjk-percent", text, "no percent prefix"))?;
    number_value(body, tables).ok_or_else(|| malformed("cjk-percent", text, "bad numeral"))
}

/// Discount and tenth notations, in percent: "七五折" is 75, "八点五折" is 85,
/// "三成五" is 35, "半成" is 5, "十成" is 100.
pub(crate) fn parse_special_percent(text: &str, tables: &CjkTables) -> Result<Decimal, ParseError> {
    let trimmed = normalize_width(text.trim());
    let bad = || malformed("cjk-special-percent", text, "bad numeral");

    if let Some(amount) = trimmed.strip_suffix(tables.discount_char) {
        let chars: Vec<char> = amount.chars().collect();
        if chars == [tables.half_char] {
            return Ok(Decimal::from(50));
        }
        if chars.iter().any(|c| tables.point_chars.contains(c)) {
            return double_value(amount, tables)
                .map(|v| v * Decimal::TEN)
                .ok_or_else(bad);
        }
        let digits: Option<Vec<Decimal>> = chars.iter().map(|c| tables.digits.get(c).copied()).collect();
        return match digits.ok_or_else(bad)?.as_slice() {
            [single] => Ok(*single * Decimal::TEN),
            [tens, ones] => Ok(*tens * Decimal::TEN + *ones),
            _ => Err(bad()),
        };
    }

    let (tenths, extra) = trimmed
        .split_once(tables.tenth_char)
        .ok_or_else(|| malformed("cjk-special-percent", text, "no discount or tenth marker"))?;
    if tenths.chars().eq([tables.half_char]) {
        return Ok(Decimal::from(5));
    }
    let base = integer_value(tenths, tables).ok_or_else(bad)? * Decimal::TEN;
    if extra.is_empty() {
        return Ok(base);
    }
    let extra = integer_value(extra, tables).ok_or_else(bad)?;
    Ok(base + extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn tables() -> &'static CjkTables {
        provider(Culture::Chinese).cjk().unwrap()
    }

    fn int(text: &str) -> Decimal {
        parse_integer(text, tables()).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(int("二百三十五"), dec("235"));
        assert_eq!(int("两万三千"), dec("23000"));
        assert_eq!(int("三千万"), dec("30000000"));
        assert_eq!(int("十二万三千四百五十六"), dec("123456"));
        assert_eq!(int("一百零五"), dec("105"));
        assert_eq!(int("十"), dec("10"));
        assert_eq!(int("一亿三千万"), dec("130000000"));
        assert_eq!(int("零"), dec("0"));
    }

    #[test]
    fn test_abbreviated_magnitudes() {
        assert_eq!(int("三千五"), dec("3500"));
        assert_eq!(int("两万五"), dec("25000"));
        assert_eq!(int("十五"), dec("15"));
    }

    #[test]
    fn test_positional_and_mixed_digits() {
        assert_eq!(int("一二三"), dec("123"));
        assert_eq!(int("3百"), dec("300"));
        assert_eq!(int("３５万"), dec("350000"));
    }

    #[test]
    fn test_dozen_and_pair() {
        assert_eq!(int("一打"), dec("12"));
        assert_eq!(int("三双"), dec("6"));
    }

    #[test]
    fn test_rejects_non_numerals() {
        assert!(parse_integer("苹果", tables()).is_err());
    }

    #[test]
    fn test_doubles() {
        assert_eq!(parse_double("一百二十三点五", tables()).unwrap(), dec("123.5"));
        assert_eq!(parse_double("三点一四", tables()).unwrap(), dec("3.14"));
    }

    #[test]
    fn test_fractions() {
        let third = Decimal::ONE / Decimal::from(3);
        assert_eq!(parse_fraction("三分之一", tables()).unwrap(), third);
        assert_eq!(
            parse_fraction("二又三分之一", tables()).unwrap(),
            Decimal::TWO + third
        );
        assert_eq!(parse_fraction("4分之3", tables()).unwrap(), dec("0.75"));
        assert!(matches!(
            parse_fraction("零分之一", tables()),
            Err(ParseError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_ordinals_and_percents() {
        assert_eq!(parse_ordinal("第三", tables()).unwrap(), dec("3"));
        assert_eq!(parse_ordinal("第12", tables()).unwrap(), dec("12"));
        assert_eq!(parse_percent("百分之五十", tables()).unwrap(), dec("50"));
        assert_eq!(parse_percent("百分之十二点五", tables()).unwrap(), dec("12.5"));
    }

    #[test]
    fn test_special_percents() {
        let special = |t: &str| parse_special_percent(t, tables()).unwrap();
        assert_eq!(special("七五折"), dec("75"));
        assert_eq!(special("八点五折"), dec("85"));
        assert_eq!(special("九折"), dec("90"));
        assert_eq!(special("9.5折"), dec("95"));
        assert_eq!(special("三成"), dec("30"));
        assert_eq!(special("三成五"), dec("35"));
        assert_eq!(special("半成"), dec("5"));
        assert_eq!(special("十成"), dec("100"));
    }
}
