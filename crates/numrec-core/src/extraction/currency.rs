//! Currency amounts: numbers merged with adjacent unit names or symbols.

use super::merge::{CompoundMergeExtractor, MergeRules};
use super::pattern::PatternExtractor;
use super::{Extractor, NumberExtractor};
use crate::locale::{LocaleProvider, currency_tags};
use crate::models::{ExtractKind, ExtractionOptions, ExtractionResult};

pub struct CurrencyExtractor {
    numbers: NumberExtractor,
    units: PatternExtractor,
    rules: MergeRules,
}

impl CurrencyExtractor {
    pub fn new(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self {
            numbers: CompoundMergeExtractor::numbers(locale, options),
            units: PatternExtractor::currency_units(locale, options),
            rules: MergeRules::for_locale(locale),
        }
    }

    fn is_unit(&self, result: &ExtractionResult) -> bool {
        [false, true]
            .iter()
            .any(|&prefix| currency_tags(prefix).0 == result.tag().name)
    }
}

impl Extractor for CurrencyExtractor {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        let numbers = self.numbers.extract(source);
        let units: Vec<ExtractionResult> = self
            .units
            .extract(source)
            .into_iter()
            .filter(|unit| !numbers.iter().any(|n| n.overlaps(unit.start, unit.end())))
            .collect();

        let mut all: Vec<ExtractionResult> = numbers.into_iter().chain(units).collect();
        all.sort_by_key(|r| r.start);

        self.rules
            .merge(source, all)
            .into_iter()
            .filter(|r| {
                r.kind == ExtractKind::Currency
                    && r.children().iter().any(|c| self.is_unit(c))
                    && r.children().iter().any(|c| !self.is_unit(c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Culture, provider};
    use pretty_assertions::assert_eq;

    fn extract(culture: Culture, source: &str) -> Vec<ExtractionResult> {
        CurrencyExtractor::new(provider(culture), &Default::default()).extract(source)
    }

    fn texts(results: &[ExtractionResult]) -> Vec<&str> {
        results.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_amount_with_unit() {
        let results = extract(Culture::English, "it costs 5 dollars and 20 cents today");
        assert_eq!(texts(&results), vec!["5 dollars and 20 cents"]);
        assert_eq!(results[0].tag().name, "CompoundCurrency");
        assert_eq!(results[0].children().len(), 4);
    }

    #[test]
    fn test_prefix_symbol() {
        let results = extract(Culture::English, "pay $30 now");
        assert_eq!(texts(&results), vec!["$30"]);
    }

    #[test]
    fn test_mixed_families_do_not_chain() {
        let results = extract(Culture::English, "5 dollars and 20 pence");
        assert_eq!(texts(&results), vec!["5 dollars", "20 pence"]);
    }

    #[test]
    fn test_bare_numbers_and_units_are_dropped() {
        assert!(extract(Culture::English, "5 apples and some dollars").is_empty());
    }

    #[test]
    fn test_chinese_yuan_and_jiao() {
        let results = extract(Culture::Chinese, "一共五元二角");
        assert_eq!(texts(&results), vec!["五元二角"]);

        // 分 inside a fraction is not a unit.
        assert!(extract(Culture::Chinese, "三分之一").is_empty());
    }
}
