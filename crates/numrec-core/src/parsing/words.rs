//! Spelled-out numbers: cardinals, ordinals, fractions and relative ordinals.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::digit::{normalize_width, parse_digits};
use crate::error::ParseError;
use crate::locale::{LocaleProvider, WordTables};
use crate::models::RelativeTo;

/// One element of a magnitude composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// Added to the pending group ("twenty", "5").
    Value(Decimal),
    /// Multiplies everything of lower magnitude before it ("thousand").
    Round(Decimal),
}

/// Compose magnitudes left to right.
///
/// Groups are kept on a stack of `(magnitude, value)`. A round word absorbs the pending
/// small value and every stacked group of lower magnitude, so "nine hundred thousand"
/// is (9 × 100) × 1000 while "one million two hundred thousand" keeps the million apart.
pub(crate) fn compose(tokens: &[Token]) -> Option<Decimal> {
    let mut groups: Vec<(Decimal, Decimal)> = Vec::new();
    let mut small = Decimal::ZERO;
    let mut has_small = false;

    for token in tokens {
        match *token {
            Token::Value(value) => {
                small = small.checked_add(value)?;
                has_small = true;
            }
            Token::Round(round) => {
                let mut group = small;
                let mut absorbed = has_small;
                while let Some(&(magnitude, value)) = groups.last() {
                    if magnitude >= round {
                        break;
                    }
                    group = group.checked_add(value)?;
                    groups.pop();
                    absorbed = true;
                }
                if !absorbed {
                    group = Decimal::ONE;
                }
                groups.push((round, group.checked_mul(round)?));
                small = Decimal::ZERO;
                has_small = false;
            }
        }
    }

    groups
        .iter()
        .try_fold(small, |total, (_, value)| total.checked_add(*value))
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn cardinal_tokens(words: &[String], tables: &WordTables) -> Option<Vec<Token>> {
    words
        .iter()
        .filter(|w| !tables.fillers.contains(w))
        .map(|w| {
            if let Some(round) = tables.round_numbers.get(w) {
                Some(Token::Round(*round))
            } else if let Some(value) = tables.cardinals.get(w) {
                Some(Token::Value(*value))
            } else {
                Decimal::from_str(&w.replace(',', "")).ok().map(Token::Value)
            }
        })
        .collect()
}

fn words_value(words: &[String], tables: &WordTables, text: &str) -> Result<Decimal, ParseError> {
    let tokens = cardinal_tokens(words, tables)
        .ok_or_else(|| ParseError::malformed("words", text, "unknown number word"))?;
    compose(&tokens).ok_or_else(|| ParseError::overflow(text))
}

/// Parse a spelled-out cardinal, optionally with a decimal part ("twenty point five").
pub(crate) fn parse_words(text: &str, locale: &LocaleProvider) -> Result<Decimal, ParseError> {
    let tables = locale.words();
    let (negative, body) = locale.strip_negative(text.trim());
    let words = tokenize(body);
    if words.is_empty() {
        return Err(ParseError::malformed("words", text, "empty"));
    }

    let point = words.iter().position(|w| tables.point_words.contains(w));
    let (integer, decimals) = match point {
        Some(i) => (&words[..i], Some(&words[i + 1..])),
        None => (&words[..], None),
    };

    let mut value = if integer.is_empty() {
        Decimal::ZERO
    } else {
        words_value(integer, tables, text)?
    };

    if let Some(decimals) = decimals {
        let mut scale = Decimal::ONE;
        for word in decimals {
            let digit = tables
                .cardinals
                .get(word)
                .filter(|d| **d < Decimal::TEN)
                .ok_or_else(|| ParseError::malformed("words", text, "decimal part is not a digit"))?;
            scale /= Decimal::TEN;
            value += *digit * scale;
        }
    }

    Ok(if negative { -value } else { value })
}

/// Parse "twenty-first", "one hundred and first", "three hundredth".
pub(crate) fn parse_word_ordinal(
    text: &str,
    locale: &LocaleProvider,
) -> Result<Decimal, ParseError> {
    let tables = locale.words();
    let words = tokenize(text);
    let (last, rest) = words
        .split_last()
        .ok_or_else(|| ParseError::malformed("word-ordinal", text, "empty"))?;
    let ordinal = *tables
        .ordinals
        .get(last)
        .ok_or_else(|| ParseError::malformed("word-ordinal", text, "no ordinal word"))?;

    let mut tokens = cardinal_tokens(rest, tables)
        .ok_or_else(|| ParseError::malformed("word-ordinal", text, "unknown number word"))?;
    tokens.push(if tables.is_round_ordinal(ordinal) {
        Token::Round(ordinal)
    } else {
        Token::Value(ordinal)
    });
    compose(&tokens).ok_or_else(|| ParseError::overflow(text))
}

/// Value of a fraction operand written in digits or words.
fn operand(text: &str, locale: &LocaleProvider) -> Result<Decimal, ParseError> {
    if text.chars().any(|c| c.is_ascii_digit()) {
        parse_digits(text, locale)
    } else {
        parse_words(text, locale)
    }
}

fn divide(numerator: Decimal, denominator: Decimal, text: &str) -> Result<Decimal, ParseError> {
    if denominator.is_zero() {
        return Err(ParseError::DivisionByZero {
            text: text.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| ParseError::overflow(text))
}

/// Parse "3/4", "2 1/2", "one over four", "two and a half", "three-fourths".
pub(crate) fn parse_fraction(text: &str, locale: &LocaleProvider) -> Result<Decimal, ParseError> {
    let normalized = normalize_width(text.trim());
    let (negative, body) = locale.strip_negative(&normalized);

    let over = locale
        .fraction_over()
        .find(body)
        .filter(|m| m.start() > 0 && m.end() < body.len());
    let value = match over {
        Some(m) => {
            let left = body[..m.start()].trim();
            let denominator = operand(body[m.end()..].trim(), locale)?;
            let mixed = left.rsplit_once(char::is_whitespace).filter(|(i, n)| {
                let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
                digits(i.trim()) && digits(n.trim())
            });
            match mixed {
                Some((integer, numerator)) => {
                    operand(integer, locale)?
                        + divide(operand(numerator.trim(), locale)?, denominator, text)?
                }
                None => divide(operand(left, locale)?, denominator, text)?,
            }
        }
        None => spelled_fraction(body, locale.words(), text)?,
    };

    Ok(if negative { -value } else { value })
}

fn spelled_fraction(body: &str, tables: &WordTables, text: &str) -> Result<Decimal, ParseError> {
    let mut words: Vec<String> = body
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let last = words
        .pop()
        .ok_or_else(|| ParseError::malformed("fraction", text, "empty"))?;

    // "twenty-fifths" is one denominator; "three-fourths" carries its numerator.
    let (denominator, leading) = match last.rsplit_once('-') {
        Some((prefix, tail)) => {
            let tail = *tables
                .denominators
                .get(tail)
                .ok_or_else(|| ParseError::malformed("fraction", text, "no denominator"))?;
            match tables.cardinals.get(prefix) {
                Some(&tens) if tens >= Decimal::from(20) && (tens % Decimal::TEN).is_zero() => {
                    (tens + tail, None)
                }
                _ => (tail, Some(prefix.to_string())),
            }
        }
        None => (
            *tables
                .denominators
                .get(&last)
                .ok_or_else(|| ParseError::malformed("fraction", text, "no denominator"))?,
            None,
        ),
    };
    words.extend(leading);

    let split = words
        .iter()
        .rposition(|w| tables.fraction_separators.contains(w));
    let (integer, numerator) = match split {
        Some(i) => (&words[..i], &words[i + 1..]),
        None => (&words[..0], &words[..]),
    };

    let numerator_value = if numerator.is_empty() {
        Decimal::ONE
    } else {
        words_value(numerator, tables, text)?
    };
    if integer.is_empty() {
        return divide(numerator_value, denominator, text);
    }

    if numerator_value < denominator {
        let integer_value = words_value(integer, tables, text)?;
        Ok(integer_value + divide(numerator_value, denominator, text)?)
    } else {
        // "one hundred and twenty fifths": the separator belongs to the numerator.
        divide(words_value(&words, tables, text)?, denominator, text)
    }
}

/// Resolve "the next one", "the second to last" into an offset and anchor.
pub(crate) fn parse_relative(
    text: &str,
    locale: &LocaleProvider,
) -> Result<(i64, RelativeTo), ParseError> {
    let normalized = format!(
        " {} ",
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| *w != "the")
            .collect::<Vec<_>>()
            .join(" ")
    );
    locale
        .words()
        .relative_ordinals
        .iter()
        .find(|(phrase, ..)| normalized.contains(&format!(" {phrase} ")))
        .map(|(_, offset, anchor)| (*offset, *anchor))
        .ok_or_else(|| ParseError::malformed("relative-ordinal", text, "no relative phrase"))
}

/// Look up a percentage idiom ("half a percent") in the locale's idiom table.
pub(crate) fn parse_percent_idiom(
    text: &str,
    locale: &LocaleProvider,
) -> Result<Decimal, ParseError> {
    let key = text
        .to_lowercase()
        .split_whitespace()
        .filter(|w| !matches!(*w, "a" | "an" | "of"))
        .collect::<Vec<_>>()
        .join(" ")
        .replace("per cent", "percent");
    locale
        .words()
        .percent_idioms
        .get(&key)
        .copied()
        .ok_or_else(|| ParseError::malformed("percent-idiom", text, "unknown idiom"))
}
