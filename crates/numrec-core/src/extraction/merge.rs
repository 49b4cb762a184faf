//! Compound merging of adjacent results ("nine hundred" + "thousand",
//! "5 dollars and 20 cents").

use std::collections::HashMap;

use regex::Regex;

use super::Extractor;
use super::pattern::PatternExtractor;
use crate::locale::{LocaleProvider, MergeClass};
use crate::models::{ExtractKind, ExtractionData, ExtractionOptions, ExtractionResult, Tag};

#[derive(Debug, Clone, Copy)]
enum Edge {
    Leading,
    Trailing,
}

/// Locale rules deciding which adjacent results combine.
#[derive(Debug, Clone)]
pub struct MergeRules {
    connector: Regex,
    classes: HashMap<String, MergeClass>,
    families: HashMap<String, String>,
    number_tag: Tag,
    currency_tag: Tag,
}

impl MergeRules {
    pub fn for_locale(locale: &LocaleProvider) -> Self {
        Self {
            connector: locale.merge_connector().clone(),
            classes: locale.merge_classes().clone(),
            families: locale.currency_families(),
            number_tag: locale.compound_number_tag().clone(),
            currency_tag: locale.compound_currency_tag().clone(),
        }
    }

    /// Merge runs of adjacent mergeable results into composites.
    ///
    /// Input must be sorted by start offset. Groups of one are returned unchanged,
    /// so merging an already merged list is a no-op.
    pub fn merge(&self, source: &str, results: Vec<ExtractionResult>) -> Vec<ExtractionResult> {
        let mut merged = Vec::with_capacity(results.len());
        let mut group: Vec<ExtractionResult> = Vec::new();

        for i in 0..results.len() {
            if i > 0 && !self.mergeable(source, &results, i - 1) {
                merged.push(self.fold(source, std::mem::take(&mut group)));
            }
            group.push(results[i].clone());
        }
        if !group.is_empty() {
            merged.push(self.fold(source, group));
        }
        merged
    }

    fn class_of(&self, result: &ExtractionResult) -> MergeClass {
        self.classes
            .get(&result.tag().name)
            .copied()
            .unwrap_or(MergeClass::None)
    }

    fn edge<'r>(&self, result: &'r ExtractionResult, edge: Edge) -> &'r ExtractionResult {
        let children = result.children();
        let child = match edge {
            Edge::Leading => children.first(),
            Edge::Trailing => children.last(),
        };
        match child {
            Some(child) => self.edge(child, edge),
            None => result,
        }
    }

    fn edge_class(&self, result: &ExtractionResult, edge: Edge) -> MergeClass {
        self.class_of(self.edge(result, edge))
    }

    fn connects(&self, gap: &str) -> bool {
        let gap = gap.trim();
        gap.is_empty() || self.connector.is_match(&gap.to_lowercase())
    }

    fn same_family(&self, a: &ExtractionResult, b: &ExtractionResult) -> bool {
        let family = |r: &ExtractionResult| self.families.get(&r.text.trim().to_lowercase());
        matches!((family(a), family(b)), (Some(x), Some(y)) if x == y)
    }

    fn mergeable(&self, source: &str, results: &[ExtractionResult], i: usize) -> bool {
        let (left, right) = (&results[i], &results[i + 1]);
        if left.end() > right.start {
            return false;
        }
        let gap = &source[left.end()..right.start];
        let left_class = self.edge_class(left, Edge::Trailing);
        let right_class = self.edge_class(right, Edge::Leading);

        if left_class == MergeClass::PrefixUnit {
            return right_class.is_number() && gap.trim().is_empty();
        }
        if !self.connects(gap) {
            return false;
        }

        match (left_class, right_class) {
            (l, MergeClass::Round) if l.is_number() => true,
            (MergeClass::Round, MergeClass::Word) => true,
            (l, MergeClass::Unit) if l.is_number() => true,
            // "5 dollars and 20 cents": a unit continues only into a same-family unit.
            (MergeClass::Unit, r) if r.is_number() => {
                results.get(i + 2).is_some_and(|next| {
                    let unit = self.edge(next, Edge::Leading);
                    right.end() <= next.start
                        && self.class_of(unit) == MergeClass::Unit
                        && self.connects(&source[right.end()..next.start])
                        && self.same_family(self.edge(left, Edge::Trailing), unit)
                })
            }
            _ => false,
        }
    }

    fn is_composite(&self, result: &ExtractionResult) -> bool {
        matches!(&result.data, ExtractionData::Nested { tag, .. }
            if *tag == self.number_tag || *tag == self.currency_tag)
    }

    fn fold(&self, source: &str, mut group: Vec<ExtractionResult>) -> ExtractionResult {
        if group.len() == 1 {
            return group.remove(0);
        }

        let mut children = Vec::new();
        for member in group {
            if self.is_composite(&member) {
                children.extend(member.children().iter().cloned());
            } else {
                children.push(member);
            }
        }

        let start = children[0].start;
        let end = children[children.len() - 1].end();
        let currency = children.iter().any(|c| self.class_of(c).is_unit());
        let (kind, tag) = if currency {
            (ExtractKind::Currency, self.currency_tag.clone())
        } else {
            (ExtractKind::Number, self.number_tag.clone())
        };

        ExtractionResult::from_span(
            source,
            start,
            end,
            kind,
            ExtractionData::Nested { tag, children },
        )
    }
}

/// Wraps an extractor and merges adjacent mergeable results.
#[derive(Debug, Clone)]
pub struct CompoundMergeExtractor<E> {
    inner: E,
    rules: MergeRules,
}

impl<E> CompoundMergeExtractor<E> {
    pub fn new(inner: E, rules: MergeRules) -> Self {
        Self { inner, rules }
    }

    pub fn rules(&self) -> &MergeRules {
        &self.rules
    }
}

impl CompoundMergeExtractor<PatternExtractor> {
    /// The number extractor of a locale.
    pub fn numbers(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self::new(
            PatternExtractor::numbers(locale, options),
            MergeRules::for_locale(locale),
        )
    }
}

impl<E: Extractor> Extractor for CompoundMergeExtractor<E> {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        self.rules.merge(source, self.inner.extract(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use pretty_assertions::assert_eq;

    fn numbers() -> CompoundMergeExtractor<PatternExtractor> {
        CompoundMergeExtractor::numbers(provider(Culture::English), &Default::default())
    }

    fn texts(results: &[ExtractionResult]) -> Vec<&str> {
        results.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_segment_and_round_merge() {
        let results = numbers().extract("about nine hundred thousand people");
        assert_eq!(texts(&results), vec!["nine hundred thousand"]);
        assert_eq!(results[0].tag().name, "CompoundNum");
        assert_eq!(results[0].kind, ExtractKind::Number);
        assert_eq!(results[0].children().len(), 2);
    }

    #[test]
    fn test_connector_gap_merges() {
        let results = numbers().extract("two thousand and five");
        assert_eq!(texts(&results), vec!["two thousand and five"]);
        assert_eq!(results[0].children().len(), 3);
    }

    #[test]
    fn test_digits_with_round() {
        let results = numbers().extract("3 million");
        assert_eq!(texts(&results), vec!["3 million"]);
    }

    #[test]
    fn test_punctuation_blocks_merge() {
        let results = numbers().extract("nine hundred, thousand");
        assert_eq!(texts(&results), vec!["nine hundred", "thousand"]);
    }

    #[test]
    fn test_plain_words_do_not_merge() {
        let results = numbers().extract("two and five");
        assert_eq!(texts(&results), vec!["two", "five"]);
        assert_eq!(results[0].tag().name, "IntegerEng");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let extractor = numbers();
        let source = "one million two hundred thousand and 7, then 3 billion";
        let once = extractor.extract(source);
        let twice = extractor.rules().merge(source, once.clone());
        assert_eq!(once, twice);
    }
}
