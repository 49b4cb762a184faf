//! Parsers: resolve extraction results into values.
//!
//! The tag of a result selects a [`Strategy`] through the locale; an unknown tag is a
//! configuration error ([`ParseError::UnsupportedTag`]). Composite results (ranges,
//! percentages, merge groups, currency amounts) are resolved from their children.

pub mod cjk;
pub mod digit;
pub mod format;
pub mod words;

use rust_decimal::Decimal;
use tracing::trace;

use crate::error::ParseError;
use crate::locale::{CjkTables, CurrencyUnit, LocaleProvider, MergeClass, RangeShape, Strategy};
use crate::models::{ExtractionResult, Interval, ParseResult, Value};
use format::{format_interval, format_number, format_percent, format_relative};
use words::Token;

/// Trait for value parsers.
pub trait Parser {
    fn parse(&self, result: &ExtractionResult) -> Result<ParseResult, ParseError>;
}

struct Resolution {
    value: Value,
    text: String,
    unit: Option<String>,
}

/// Tag-driven parser for every result kind a locale produces.
#[derive(Debug, Clone, Copy)]
pub struct NumberParser<'a> {
    locale: &'a LocaleProvider,
}

impl<'a> NumberParser<'a> {
    pub fn new(locale: &'a LocaleProvider) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &'a LocaleProvider {
        self.locale
    }

    fn number(&self, value: Decimal) -> Resolution {
        Resolution {
            value: Value::Number(value),
            text: format_number(value, self.locale.decimal_separator()),
            unit: None,
        }
    }

    fn percent(&self, value: Decimal) -> Resolution {
        Resolution {
            value: Value::Number(value),
            text: format_percent(value, self.locale.decimal_separator()),
            unit: None,
        }
    }

    fn cjk(&self, text: &str) -> Result<&'a CjkTables, ParseError> {
        self.locale
            .cjk()
            .ok_or_else(|| ParseError::malformed("cjk", text, "locale has no numeral tables"))
    }

    /// Run `parse` on the text without its negative marker, then restore the sign.
    fn signed(
        &self,
        text: &str,
        parse: impl FnOnce(&str) -> Result<Decimal, ParseError>,
    ) -> Result<Decimal, ParseError> {
        let (negative, body) = self.locale.strip_negative(text.trim());
        let value = parse(body)?;
        Ok(if negative { -value } else { value })
    }

    fn value_of(&self, result: &ExtractionResult) -> Result<Decimal, ParseError> {
        match self.resolve(result)?.value {
            Value::Number(value) => Ok(value),
            _ => Err(ParseError::malformed(
                "operand",
                &result.text,
                "does not resolve to a number",
            )),
        }
    }

    fn resolve(&self, result: &ExtractionResult) -> Result<Resolution, ParseError> {
        let tag = result.tag();
        let strategy = self
            .locale
            .strategy(&tag.name)
            .ok_or_else(|| ParseError::UnsupportedTag {
                tag: tag.name.clone(),
            })?;
        trace!(tag = %tag, strategy = strategy.name(), text = %result.text, "resolving");

        let text = result.text.as_str();
        let locale = self.locale;
        let resolution = match strategy {
            Strategy::Digit => {
                self.number(self.signed(text, |t| digit::parse_digits(t, locale))?)
            }
            Strategy::Power => self.number(self.signed(text, |t| digit::parse_power(t, locale))?),
            Strategy::Words => self.number(words::parse_words(text, locale)?),
            Strategy::WordOrdinal => self.number(words::parse_word_ordinal(text, locale)?),
            Strategy::DigitOrdinal => self.number(digit::parse_digit_ordinal(text, locale)?),
            Strategy::RelativeOrdinal => {
                let (offset, relative_to) = words::parse_relative(text, locale)?;
                Resolution {
                    value: Value::Relative {
                        offset,
                        relative_to,
                    },
                    text: format_relative(offset, relative_to),
                    unit: None,
                }
            }
            Strategy::Fraction => self.number(words::parse_fraction(text, locale)?),
            Strategy::Compound => self.number(self.compound(result)?),
            Strategy::Percent => self.percent(self.percentage(result)?),
            Strategy::PercentIdiom => self.percent(words::parse_percent_idiom(text, locale)?),
            Strategy::Currency => self.currency(result)?,
            Strategy::Range(shape) => self.range(result, shape)?,
            Strategy::CjkInteger => {
                let tables = self.cjk(text)?;
                self.number(self.signed(text, |t| cjk::parse_integer(t, tables))?)
            }
            Strategy::CjkDouble => {
                let tables = self.cjk(text)?;
                self.number(self.signed(text, |t| cjk::parse_double(t, tables))?)
            }
            Strategy::CjkFraction => {
                let tables = self.cjk(text)?;
                self.number(self.signed(text, |t| cjk::parse_fraction(t, tables))?)
            }
            Strategy::CjkOrdinal => self.number(cjk::parse_ordinal(text, self.cjk(text)?)?),
            Strategy::CjkPercent => {
                let tables = self.cjk(text)?;
                self.percent(self.signed(text, |t| cjk::parse_percent(t, tables))?)
            }
            Strategy::CjkSpecialPercent => {
                self.percent(cjk::parse_special_percent(text, self.cjk(text)?)?)
            }
        };
        Ok(resolution)
    }

    /// Compose merged magnitudes. A negative first child negates the whole group.
    fn compound(&self, result: &ExtractionResult) -> Result<Decimal, ParseError> {
        let children = result.children();
        if children.is_empty() {
            return Err(ParseError::malformed("compound", &result.text, "no children"));
        }

        let mut negative = false;
        let mut tokens = Vec::with_capacity(children.len());
        for (i, child) in children.iter().enumerate() {
            let mut value = self.value_of(child)?;
            if i == 0 && value.is_sign_negative() {
                negative = true;
                value = -value;
            }
            tokens.push(match self.locale.merge_class(&child.tag().name) {
                MergeClass::Round => Token::Round(value),
                _ => Token::Value(value),
            });
        }

        let total = words::compose(&tokens).ok_or_else(|| ParseError::overflow(&result.text))?;
        Ok(if negative { -total } else { total })
    }

    /// Percent value of a percentage result: the child number, a ratio of two children
    /// times 100, or the digits of a childless result.
    fn percentage(&self, result: &ExtractionResult) -> Result<Decimal, ParseError> {
        match result.children() {
            [] => {
                let digits = result.text.trim().trim_end_matches(['%', '％']);
                digit::parse_digits(digits, self.locale)
            }
            [number] => self.value_of(number),
            [numerator, denominator] => {
                let denominator = self.value_of(denominator)?;
                if denominator.is_zero() {
                    return Err(ParseError::DivisionByZero {
                        text: result.text.clone(),
                    });
                }
                self.value_of(numerator)?
                    .checked_div(denominator)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| ParseError::overflow(&result.text))
            }
            _ => Err(ParseError::malformed(
                "percent",
                &result.text,
                "too many operands",
            )),
        }
    }

    fn currency_unit(&self, unit: &ExtractionResult) -> Result<&'a CurrencyUnit, ParseError> {
        self.locale
            .currency_unit(&unit.text)
            .ok_or_else(|| ParseError::malformed("currency", &unit.text, "unknown currency unit"))
    }

    /// Sum each run of numbers times the unit that closes it (or the prefix symbol
    /// that opens it). All units must belong to one currency.
    fn currency(&self, result: &ExtractionResult) -> Result<Resolution, ParseError> {
        let text = &result.text;
        let mut total = Decimal::ZERO;
        let mut iso: Option<&str> = None;
        let mut prefix: Option<&CurrencyUnit> = None;
        let mut pending: Vec<Token> = Vec::new();

        let mut add = |tokens: &mut Vec<Token>, unit: &'a CurrencyUnit| {
            if iso.is_some_and(|code| code != unit.iso) {
                return Err(ParseError::malformed("currency", text, "mixed currencies"));
            }
            iso = Some(unit.iso.as_str());
            let amount = words::compose(tokens).ok_or_else(|| ParseError::overflow(text))?;
            total = amount
                .checked_mul(unit.ratio)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(|| ParseError::overflow(text))?;
            tokens.clear();
            Ok(())
        };

        for child in result.children() {
            match self.locale.merge_class(&child.tag().name) {
                MergeClass::PrefixUnit => prefix = Some(self.currency_unit(child)?),
                MergeClass::Unit => add(&mut pending, self.currency_unit(child)?)?,
                MergeClass::Round => pending.push(Token::Round(self.value_of(child)?)),
                _ => pending.push(Token::Value(self.value_of(child)?)),
            }
        }
        if !pending.is_empty() {
            let unit = prefix
                .ok_or_else(|| ParseError::malformed("currency", text, "amount without unit"))?;
            add(&mut pending, unit)?;
        }

        let iso = iso
            .ok_or_else(|| ParseError::malformed("currency", text, "no unit"))?
            .to_string();
        Ok(Resolution {
            unit: Some(iso),
            ..self.number(total)
        })
    }

    fn range(&self, result: &ExtractionResult, shape: RangeShape) -> Result<Resolution, ParseError> {
        let values = result
            .children()
            .iter()
            .map(|child| self.value_of(child))
            .collect::<Result<Vec<_>, _>>()?;

        let interval = |start, end, left_closed, right_closed| Interval {
            start,
            end,
            left_closed,
            right_closed,
        };
        let interval = match (shape, values.as_slice()) {
            (RangeShape::Between | RangeShape::AtLeastAndAtMost, [a, b]) => {
                interval(Some(*a.min(b)), Some(*a.max(b)), true, true)
            }
            (RangeShape::Till, [a, b]) => interval(Some(*a.min(b)), Some(*a.max(b)), true, false),
            (RangeShape::MoreAndLess, [a, b]) => {
                interval(Some(*a.min(b)), Some(*a.max(b)), false, false)
            }
            (RangeShape::More, [a]) => interval(Some(*a), None, false, false),
            (RangeShape::Less, [a]) => interval(None, Some(*a), false, false),
            (RangeShape::MoreOrEqual, [a]) => interval(Some(*a), None, true, false),
            (RangeShape::LessOrEqual, [a]) => interval(None, Some(*a), false, true),
            (RangeShape::Equal, [a]) => interval(Some(*a), Some(*a), true, true),
            _ => {
                return Err(ParseError::malformed(
                    "range",
                    &result.text,
                    "operand count does not fit the range",
                ));
            }
        };

        Ok(Resolution {
            text: format_interval(&interval, self.locale.decimal_separator()),
            value: Value::Interval(interval),
            unit: None,
        })
    }
}

impl Parser for NumberParser<'_> {
    fn parse(&self, result: &ExtractionResult) -> Result<ParseResult, ParseError> {
        let resolution = self.resolve(result)?;
        Ok(ParseResult {
            extraction: result.clone(),
            value: Some(resolution.value),
            resolution_str: resolution.text,
            unit: resolution.unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{
        CurrencyExtractor, Extractor, NumberExtractor, PatternExtractor, PercentageExtractor,
        RangeExtractor,
    };
    use crate::locale::{Culture, provider};
    use crate::models::{ExtractKind, ExtractionData, RelativeTo, Tag};
    use pretty_assertions::assert_eq;

    fn resolve_all(
        culture: Culture,
        extractor: &dyn Extractor,
        source: &str,
    ) -> Vec<(String, String)> {
        let parser = NumberParser::new(provider(culture));
        extractor
            .extract(source)
            .iter()
            .map(|r| {
                let parsed = parser.parse(r).unwrap();
                (parsed.extraction.text, parsed.resolution_str)
            })
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn numbers(culture: Culture, source: &str) -> Vec<(String, String)> {
        let extractor = NumberExtractor::numbers(provider(culture), &Default::default());
        resolve_all(culture, &extractor, source)
    }

    #[test]
    fn test_english_numbers() {
        assert_eq!(
            numbers(
                Culture::English,
                "nine hundred thousand, 1.5k, -5 and two and a half"
            ),
            pairs(&[
                ("nine hundred thousand", "900000"),
                ("1.5k", "1500"),
                ("-5", "-5"),
                ("two and a half", "2.5"),
            ])
        );
    }

    #[test]
    fn test_negative_compound() {
        assert_eq!(
            numbers(Culture::English, "minus nine hundred thousand"),
            pairs(&[("minus nine hundred thousand", "-900000")])
        );
    }

    #[test]
    fn test_chinese_numbers() {
        assert_eq!(
            numbers(Culture::Chinese, "负五和一百二十三点五还有三分之一"),
            pairs(&[
                ("负五", "-5"),
                ("一百二十三点五", "123.5"),
                ("三分之一", "0.333333333333333"),
            ])
        );
    }

    #[test]
    fn test_ordinals() {
        let locale = provider(Culture::English);
        let extractor = PatternExtractor::ordinals(locale, &Default::default());
        assert_eq!(
            resolve_all(
                Culture::English,
                &extractor,
                "the 22nd, the twenty-first and the next one"
            ),
            pairs(&[
                ("22nd", "22"),
                ("twenty-first", "21"),
                ("the next one", "+1"),
            ])
        );

        let relative = extractor.extract("the last")[0].clone();
        let parsed = NumberParser::new(locale).parse(&relative).unwrap();
        assert_eq!(
            parsed.value,
            Some(Value::Relative {
                offset: 0,
                relative_to: RelativeTo::End
            })
        );
        assert_eq!(parsed.resolution_str, "end");
    }

    #[test]
    fn test_percentages() {
        let english = PercentageExtractor::new(provider(Culture::English), &Default::default());
        assert_eq!(
            resolve_all(
                Culture::English,
                &english,
                "50% of them, fifty percent, one in every four"
            ),
            pairs(&[
                ("50%", "50%"),
                ("fifty percent", "50%"),
                ("one in every four", "25%"),
            ])
        );
        assert_eq!(
            resolve_all(
                Culture::English,
                &english,
                "half a percent, half of a per cent"
            ),
            pairs(&[
                ("half a percent", "0.5%"),
                ("half of a per cent", "0.5%"),
            ])
        );

        let chinese = PercentageExtractor::new(provider(Culture::Chinese), &Default::default());
        assert_eq!(
            resolve_all(Culture::Chinese, &chinese, "百分之五十，打七五折，增长12.5%"),
            pairs(&[
                ("百分之五十", "50%"),
                ("七五折", "75%"),
                ("12.5%", "12.5%"),
            ])
        );
    }

    #[test]
    fn test_ranges() {
        let extractor = RangeExtractor::new(provider(Culture::English), &Default::default());
        assert_eq!(
            resolve_all(
                Culture::English,
                &extractor,
                "between ten and five, more than 20 and pages 5-10"
            ),
            pairs(&[
                ("between ten and five", "[5,10]"),
                ("more than 20", "(20,)"),
                ("5-10", "[5,10)"),
            ])
        );

        let chinese = RangeExtractor::new(provider(Culture::Chinese), &Default::default());
        assert_eq!(
            resolve_all(Culture::Chinese, &chinese, "大于等于5"),
            pairs(&[("大于等于5", "[5,)")])
        );
    }

    #[test]
    fn test_negative_range_operands() {
        let english = RangeExtractor::new(provider(Culture::English), &Default::default());
        assert_eq!(
            resolve_all(
                Culture::English,
                &english,
                "more than -5, between -5 and 5, above minus ten, pages 3-7"
            ),
            pairs(&[
                ("more than -5", "(-5,)"),
                ("between -5 and 5", "[-5,5]"),
                ("above minus ten", "(-10,)"),
                ("3-7", "[3,7)"),
            ])
        );

        let chinese = RangeExtractor::new(provider(Culture::Chinese), &Default::default());
        assert_eq!(
            resolve_all(Culture::Chinese, &chinese, "负5到10，大于负五"),
            pairs(&[("负5到10", "[-5,10)"), ("大于负五", "(-5,)")])
        );
    }

    #[test]
    fn test_currency() {
        let extractor = CurrencyExtractor::new(provider(Culture::English), &Default::default());
        let parser = NumberParser::new(provider(Culture::English));
        let results: Vec<ParseResult> = extractor
            .extract("5 dollars and 20 cents, or $30")
            .iter()
            .map(|r| parser.parse(r).unwrap())
            .collect();

        assert_eq!(results[0].resolution_str, "5.2");
        assert_eq!(results[0].unit.as_deref(), Some("USD"));
        assert_eq!(results[1].resolution_str, "30");
        assert_eq!(results[1].unit.as_deref(), Some("USD"));

        let chinese = CurrencyExtractor::new(provider(Culture::Chinese), &Default::default());
        let parsed = NumberParser::new(provider(Culture::Chinese))
            .parse(&chinese.extract("五元二角")[0])
            .unwrap();
        assert_eq!(parsed.resolution_str, "5.2");
        assert_eq!(parsed.unit.as_deref(), Some("CNY"));
    }

    #[test]
    fn test_unknown_tag_is_a_configuration_error() {
        let result = ExtractionResult::from_span(
            "42",
            0,
            2,
            ExtractKind::Number,
            ExtractionData::Tag(Tag::new("NoSuchTag", 0)),
        );
        let err = NumberParser::new(provider(Culture::English))
            .parse(&result)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedTag {
                tag: "NoSuchTag".to_string()
            }
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_zero_ratio_denominator() {
        let source = "1 in every 0";
        let extractor = PercentageExtractor::new(provider(Culture::English), &Default::default());
        let result = extractor.extract(source)[0].clone();
        assert!(matches!(
            NumberParser::new(provider(Culture::English)).parse(&result),
            Err(ParseError::DivisionByZero { .. })
        ));
    }
}
