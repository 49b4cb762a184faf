//! Percentage extraction.
//!
//! Placeholder-style locales first replace every extracted number with
//! [`NUMBER_PLACEHOLDER`] (fractions with [`FRACTION_PLACEHOLDER`]), match the percentage
//! patterns against the rewritten text and map spans back through a [`PositionMap`].
//! Matches without a placeholder are free-standing idioms and carry no children.
//! Direct-style locales match the raw text.

use super::pattern::{AmbiguityFilter, TaggedPattern};
use super::{Candidate, Extractor, NumberExtractor, resolve_runs, timed_captures};
use crate::locale::{LocaleProvider, PercentageStyle};
use crate::models::{ExtractKind, ExtractionData, ExtractionOptions, ExtractionResult};

pub const NUMBER_PLACEHOLDER: &str = "@builtin.num";
pub const FRACTION_PLACEHOLDER: &str = "@builtin.frac";

/// Text with numbers replaced by placeholders, plus per-byte offsets back into the
/// original text.
#[derive(Debug, Clone)]
pub struct PositionMap {
    text: String,
    starts: Vec<usize>,
    ends: Vec<usize>,
    /// Rewritten span of each placeholder and the number it stands for.
    replaced: Vec<(usize, usize, ExtractionResult)>,
}

impl PositionMap {
    /// Rewrite `source`, replacing each of `numbers` (sorted, non-overlapping).
    pub fn build(source: &str, numbers: &[ExtractionResult]) -> Self {
        let mut map = Self {
            text: String::with_capacity(source.len()),
            starts: Vec::with_capacity(source.len()),
            ends: Vec::with_capacity(source.len()),
            replaced: Vec::with_capacity(numbers.len()),
        };

        let mut cursor = 0;
        for number in numbers {
            map.copy(source, cursor, number.start);
            let placeholder = match number.kind {
                ExtractKind::Fraction => FRACTION_PLACEHOLDER,
                _ => NUMBER_PLACEHOLDER,
            };
            let at = map.text.len();
            map.text.push_str(placeholder);
            map.starts.extend(std::iter::repeat_n(number.start, placeholder.len()));
            map.ends.extend(std::iter::repeat_n(number.end(), placeholder.len()));
            map.replaced.push((at, map.text.len(), number.clone()));
            cursor = number.end();
        }
        map.copy(source, cursor, source.len());
        map
    }

    fn copy(&mut self, source: &str, from: usize, to: usize) {
        self.text.push_str(&source[from..to]);
        self.starts.extend(from..to);
        self.ends.extend(from + 1..to + 1);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Original span of the rewritten span `start..end`.
    pub fn original(&self, start: usize, end: usize) -> (usize, usize) {
        (self.starts[start], self.ends[end - 1])
    }

    /// Numbers whose placeholders lie inside the rewritten span.
    pub fn numbers_within(&self, start: usize, end: usize) -> Vec<ExtractionResult> {
        self.replaced
            .iter()
            .filter(|(s, e, _)| *s >= start && *e <= end)
            .map(|(_, _, number)| number.clone())
            .collect()
    }
}

pub struct PercentageExtractor {
    patterns: Vec<TaggedPattern>,
    /// Present for placeholder-style locales.
    numbers: Option<NumberExtractor>,
    ambiguity_filters: Vec<AmbiguityFilter>,
    options: ExtractionOptions,
}

impl PercentageExtractor {
    pub fn new(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        let numbers = match locale.percentage_style() {
            PercentageStyle::Placeholder => Some(NumberExtractor::numbers(locale, options)),
            PercentageStyle::Direct => None,
        };
        Self {
            patterns: locale.percentage_patterns().to_vec(),
            numbers,
            ambiguity_filters: locale.ambiguity_filters().to_vec(),
            options: options.clone(),
        }
    }

    fn extract_placeholders(
        &self,
        numbers: &NumberExtractor,
        source: &str,
    ) -> Vec<ExtractionResult> {
        let map = PositionMap::build(source, &numbers.extract(source));

        let mut candidates = Vec::new();
        for (order, pattern) in self.patterns.iter().enumerate() {
            for caps in timed_captures(pattern, map.text(), self.options.match_budget()) {
                let Some(m) = caps.get(0) else { continue };
                let children = map.numbers_within(m.start(), m.end());
                let (start, end) = map.original(m.start(), m.end());
                candidates.push(Candidate {
                    start,
                    end,
                    priority: pattern.tag.priority,
                    order,
                    payload: (pattern, children),
                });
            }
        }

        resolve_runs(source.len(), candidates)
            .into_iter()
            .map(|c| {
                let (pattern, children) = c.payload;
                // Idioms carry no number of their own.
                let data = if children.is_empty() {
                    ExtractionData::Tag(pattern.tag.clone())
                } else {
                    ExtractionData::Nested {
                        tag: pattern.tag.clone(),
                        children,
                    }
                };
                ExtractionResult::from_span(source, c.start, c.end, ExtractKind::Percentage, data)
            })
            .collect()
    }

    fn extract_direct(&self, source: &str) -> Vec<ExtractionResult> {
        let mut candidates = Vec::new();
        for (order, pattern) in self.patterns.iter().enumerate() {
            for caps in timed_captures(pattern, source, self.options.match_budget()) {
                let Some(m) = caps.get(0) else { continue };
                candidates.push(Candidate {
                    start: m.start(),
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
                    ExtractKind::Percentage,
                    ExtractionData::Tag(c.payload.tag.clone()),
                )
            })
            .collect()
    }
}

impl Extractor for PercentageExtractor {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        let results = match &self.numbers {
            Some(numbers) => self.extract_placeholders(numbers, source),
            None => self.extract_direct(source),
        };
        results
            .into_iter()
            .filter(|result| {
                !self
                    .ambiguity_filters
                    .iter()
                    .any(|filter| filter.rejects(source, result))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use crate::models::Tag;
    use pretty_assertions::assert_eq;

    fn extract(culture: Culture, source: &str) -> Vec<ExtractionResult> {
        PercentageExtractor::new(provider(culture), &Default::default()).extract(source)
    }

    #[test]
    fn test_position_map_round_trips_offsets() {
        let source = "a 12 b";
        let number = ExtractionResult::from_span(
            source,
            2,
            4,
            ExtractKind::Number,
            ExtractionData::Tag(Tag::new("IntegerNum", 0)),
        );
        let map = PositionMap::build(source, &[number]);

        assert_eq!(map.text(), "a @builtin.num b");
        let at = map.text().find('@').unwrap();
        assert_eq!(map.original(at, at + NUMBER_PLACEHOLDER.len()), (2, 4));
        assert_eq!(map.original(0, map.text().len()), (0, source.len()));
        assert_eq!(map.numbers_within(0, map.text().len()).len(), 1);
    }

    #[test]
    fn test_digit_percent() {
        let results = extract(Culture::English, "about 50% of people");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "50%");
        assert_eq!(results[0].start, 6);
        assert_eq!(results[0].tag().name, "PerNum");
        assert_eq!(results[0].children()[0].text, "50");
    }

    #[test]
    fn test_word_percent() {
        let results = extract(Culture::English, "fifty percent");
        assert_eq!(results[0].text, "fifty percent");
        assert_eq!(results[0].children()[0].text, "fifty");
    }

    #[test]
    fn test_fraction_percent() {
        let results = extract(Culture::English, "3/4 percent");
        assert_eq!(results[0].tag().name, "PerFrac");
    }

    #[test]
    fn test_ratio_percent() {
        let results = extract(Culture::English, "one in every four");
        assert_eq!(results[0].tag().name, "PerRatio");
        assert_eq!(results[0].children().len(), 2);
    }

    #[test]
    fn test_idiom_without_number() {
        let results = extract(Culture::English, "rates rose by half a percent");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "half a percent");
        assert_eq!(results[0].tag().name, "PerIdiom");
        assert!(results[0].children().is_empty());

        let results = extract(Culture::English, "half a percent, then 2%");
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].children()[0].text, "2");
    }

    #[test]
    fn test_no_percentage() {
        assert!(extract(Culture::English, "50 apples").is_empty());
        assert!(extract(Culture::English, "no numbers at all").is_empty());
    }

    #[test]
    fn test_chinese_direct_patterns() {
        let results = extract(Culture::Chinese, "增长了百分之五十");
        assert_eq!(results[0].text, "百分之五十");
        assert_eq!(results[0].tag().name, "PerChs");
        assert!(results[0].children().is_empty());

        let results = extract(Culture::Chinese, "打七五折");
        assert_eq!(results[0].text, "七五折");
        assert_eq!(results[0].tag().name, "PerSpe");

        let results = extract(Culture::Chinese, "增长50%");
        assert_eq!(results[0].tag().name, "PerNum");
    }

    #[test]
    fn test_tenth_inside_set_phrase_is_dropped() {
        assert!(extract(Culture::Chinese, "规则一成不变").is_empty());
        assert!(extract(Culture::Chinese, "三成人参加").is_empty());

        let results = extract(Culture::Chinese, "只有一成的人，三成五不变");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "一成");
        assert_eq!(results[1].text, "三成五");
    }
}
