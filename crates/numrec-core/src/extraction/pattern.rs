//! Table-driven pattern extraction.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::trace;

use super::{Candidate, Extractor, resolve_runs, timed_captures};
use crate::locale::LocaleProvider;
use crate::models::{ExtractKind, ExtractionData, ExtractionOptions, ExtractionResult, Tag};

/// A compiled locale pattern with the tag and kind it produces.
#[derive(Debug, Clone)]
pub struct TaggedPattern {
    pub regex: Regex,
    pub tag: Tag,
    pub kind: ExtractKind,
}

/// Drops a result whose text matches `trigger` when `disqualifier` matches an
/// overlapping span of the source ("one" in "this one").
#[derive(Debug, Clone)]
pub struct AmbiguityFilter {
    trigger: Regex,
    disqualifier: Regex,
}

impl AmbiguityFilter {
    pub fn new(trigger: Regex, disqualifier: Regex) -> Self {
        Self {
            trigger,
            disqualifier,
        }
    }

    pub fn rejects(&self, source: &str, result: &ExtractionResult) -> bool {
        self.trigger.is_match(&result.text)
            && self
                .disqualifier
                .find_iter(source)
                .any(|m| result.overlaps(m.start(), m.end()))
    }
}

/// Runs an ordered pattern table over the text and keeps exact-run winners.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    patterns: Vec<TaggedPattern>,
    negative_lookup: Option<Regex>,
    ambiguity_filters: Vec<AmbiguityFilter>,
    fraction_connector: Option<Regex>,
    cardinals: Arc<HashMap<String, Decimal>>,
    options: ExtractionOptions,
}

impl PatternExtractor {
    pub fn new(patterns: Vec<TaggedPattern>) -> Self {
        Self {
            patterns,
            negative_lookup: None,
            ambiguity_filters: Vec::new(),
            fraction_connector: None,
            cardinals: Arc::default(),
            options: ExtractionOptions::default(),
        }
    }

    /// Cardinal, fraction and digit patterns of a locale.
    pub fn numbers(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self::new(locale.number_patterns().to_vec())
            .with_negative_lookup(locale.negative_lookup().cloned())
            .with_ambiguity_filters(locale.ambiguity_filters().to_vec())
            .with_fraction_connector(locale.ambiguous_fraction_connector().cloned())
            .with_cardinals(locale.words().cardinals.clone())
            .with_options(options.clone())
    }

    pub fn ordinals(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self::new(locale.ordinal_patterns().to_vec())
            .with_ambiguity_filters(locale.ambiguity_filters().to_vec())
            .with_options(options.clone())
    }

    /// Currency unit names and symbols.
    pub fn currency_units(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self::new(locale.currency_patterns().to_vec())
            .with_ambiguity_filters(locale.ambiguity_filters().to_vec())
            .with_options(options.clone())
    }

    pub fn with_negative_lookup(mut self, lookup: Option<Regex>) -> Self {
        self.negative_lookup = lookup;
        self
    }

    pub fn with_ambiguity_filters(mut self, filters: Vec<AmbiguityFilter>) -> Self {
        self.ambiguity_filters = filters;
        self
    }

    pub fn with_fraction_connector(mut self, connector: Option<Regex>) -> Self {
        self.fraction_connector = connector;
        self
    }

    pub fn with_cardinals(mut self, cardinals: Arc<HashMap<String, Decimal>>) -> Self {
        self.cardinals = cardinals;
        self
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    fn discard(&self, pattern: &TaggedPattern, caps: &Captures<'_>) -> bool {
        let text = &caps[0];

        if pattern.kind == ExtractKind::Fraction && !self.options.experimental_mode {
            if let Some(connector) = &self.fraction_connector {
                if connector.is_match(text) {
                    return true;
                }
            }
        }

        if self.options.suppress_extended_types && caps.name("relord").is_some() {
            return true;
        }

        if let (Some(numerator), Some(denominator)) =
            (caps.name("numerator"), caps.name("denominator"))
        {
            let numerator = quick_value(numerator.as_str(), &self.cardinals);
            let denominator = quick_value(denominator.as_str(), &self.cardinals);
            if let (Some(n), Some(d)) = (numerator, denominator) {
                if n > d {
                    return true;
                }
            }
        }

        false
    }

    /// Start offset after absorbing a sign written just before the match.
    fn absorb_sign(&self, source: &str, start: usize) -> usize {
        let Some(lookup) = &self.negative_lookup else {
            return start;
        };
        lookup
            .captures(&source[..start])
            .and_then(|caps| caps.get(1))
            .map_or(start, |sign| sign.start())
    }
}

impl Extractor for PatternExtractor {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        let budget = self.options.match_budget();
        let mut candidates = Vec::new();

        for (order, pattern) in self.patterns.iter().enumerate() {
            for caps in timed_captures(pattern, source, budget) {
                let Some(m) = caps.get(0) else { continue };
                if self.discard(pattern, &caps) {
                    trace!(tag = %pattern.tag, text = m.as_str(), "discarded match");
                    continue;
                }
                candidates.push(Candidate {
                    start: self.absorb_sign(source, m.start()),
                    end: m.end(),
                    priority: pattern.tag.priority,
                    order,
                    payload: pattern,
                });
            }
        }

        resolve_runs(source.len(), candidates)
            .into_iter()
            .map(|c| {
                ExtractionResult::from_span(
                    source,
                    c.start,
                    c.end,
                    c.payload.kind,
                    ExtractionData::Tag(c.payload.tag.clone()),
                )
            })
            .filter(|result| {
                !self
                    .ambiguity_filters
                    .iter()
                    .any(|filter| filter.rejects(source, result))
            })
            .collect()
    }
}

/// Rough value of a short numeral, enough to compare fraction operands.
fn quick_value(text: &str, cardinals: &HashMap<String, Decimal>) -> Option<Decimal> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    if let Ok(value) = Decimal::from_str(cleaned.trim()) {
        return Some(value);
    }

    let mut value = Decimal::ZERO;
    for word in text
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty() && *w != "and")
    {
        if word == "hundred" {
            value = value.max(Decimal::ONE) * Decimal::ONE_HUNDRED;
        } else {
            value += *cardinals.get(word)?;
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use pretty_assertions::assert_eq;

    fn texts(results: &[ExtractionResult]) -> Vec<&str> {
        results.iter().map(|r| r.text.as_str()).collect()
    }

    fn english_numbers(options: ExtractionOptions) -> PatternExtractor {
        PatternExtractor::numbers(provider(Culture::English), &options)
    }

    #[test]
    fn test_grouped_digits_form_one_result() {
        let results = english_numbers(Default::default()).extract("I have 1,234 apples");
        assert_eq!(texts(&results), vec!["1,234"]);
        assert_eq!(results[0].start, 7);
        assert_eq!(results[0].tag().name, "IntegerNum");
    }

    #[test]
    fn test_word_segments_and_rounds_stay_separate() {
        let results = english_numbers(Default::default()).extract("nine hundred thousand");
        assert_eq!(texts(&results), vec!["nine hundred", "thousand"]);
        assert_eq!(results[1].tag().name, "RoundNumEng");
    }

    #[test]
    fn test_negative_sign_is_absorbed() {
        let extractor = english_numbers(Default::default());

        let results = extractor.extract("it is -5 degrees");
        assert_eq!(texts(&results), vec!["-5"]);
        assert_eq!(results[0].start, 6);

        let results = extractor.extract("minus five");
        assert_eq!(texts(&results), vec!["minus five"]);

        // A hyphen between two numbers is not a sign.
        let results = extractor.extract("pages 5-10");
        assert_eq!(texts(&results), vec!["5", "10"]);
    }

    #[test]
    fn test_ambiguous_fraction_connector() {
        let results = english_numbers(Default::default()).extract("one in five");
        assert_eq!(texts(&results), vec!["one", "five"]);

        let experimental = ExtractionOptions {
            experimental_mode: true,
            ..Default::default()
        };
        let results = english_numbers(experimental.clone()).extract("one in five");
        assert_eq!(texts(&results), vec!["one in five"]);
        assert_eq!(results[0].kind, ExtractKind::Fraction);

        // Numerator larger than denominator reads as a year, not a fraction.
        let results = english_numbers(experimental).extract("30000 in 2009");
        assert_eq!(texts(&results), vec!["30000", "2009"]);
    }

    #[test]
    fn test_ambiguity_filter_drops_pronoun_one() {
        let extractor = english_numbers(Default::default());
        assert!(extractor.extract("this one is fine").is_empty());
        assert_eq!(texts(&extractor.extract("one apple")), vec!["one"]);
    }

    #[test]
    fn test_relative_ordinals_can_be_suppressed() {
        let locale = provider(Culture::English);
        let ordinals = PatternExtractor::ordinals(locale, &Default::default());
        assert_eq!(texts(&ordinals.extract("take the next one")), vec!["the next one"]);

        let suppressed = ExtractionOptions {
            suppress_extended_types: true,
            ..Default::default()
        };
        let ordinals = PatternExtractor::ordinals(locale, &suppressed);
        assert!(ordinals.extract("take the next one").is_empty());
    }

    #[test]
    fn test_generous_budget_keeps_matches() {
        let options = ExtractionOptions {
            match_budget_ms: Some(60_000),
            ..Default::default()
        };
        assert_eq!(texts(&english_numbers(options).extract("7 and 8")), vec!["7", "8"]);
    }

    #[test]
    fn test_exhausted_budget_drops_only_that_pattern() {
        let pattern = |re: &str, tag: &str| TaggedPattern {
            regex: Regex::new(re).unwrap(),
            tag: Tag::new(tag, 0),
            kind: ExtractKind::Number,
        };
        let options = ExtractionOptions {
            match_budget_ms: Some(0),
            ..Default::default()
        };
        let extractor = PatternExtractor::new(vec![
            pattern(r"\d+", "IntegerNum"),
            pattern(r"\bend\b", "End"),
        ])
        .with_options(options);

        let mut source = (1..=500).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        source.push_str(" end");
        let results = extractor.extract(&source);
        assert_eq!(texts(&results), vec!["end"]);
        assert_eq!(results[0].tag().name, "End");
    }

    #[test]
    fn test_chinese_numbers() {
        let extractor =
            PatternExtractor::numbers(provider(Culture::Chinese), &Default::default());
        let results = extractor.extract("我有二百三十五个苹果和3万元");
        assert_eq!(texts(&results), vec!["二百三十五", "3万"]);
        assert_eq!(results[0].tag().name, "IntegerChs");
        assert_eq!(results[1].tag().name, "IntegerNum");
    }

    #[test]
    fn test_quick_value() {
        let locale = provider(Culture::English);
        let cardinals = &locale.words().cardinals;
        assert_eq!(quick_value("1,000", cardinals), Some(Decimal::from(1000)));
        assert_eq!(quick_value("twenty-one", cardinals), Some(Decimal::from(21)));
        assert_eq!(quick_value("two hundred", cardinals), Some(Decimal::from(200)));
        assert_eq!(quick_value("lots", cardinals), None);
    }
}
