//! Recognizer façade binding a culture and options to every extractor kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NumrecError, Result};
use crate::extraction::{
    CachedExtractor, CurrencyExtractor, Extractor, NumberExtractor, PatternExtractor,
    PercentageExtractor, RangeExtractor,
};
use crate::locale::{Culture, LocaleProvider, provider};
use crate::models::{CacheConfig, ExtractionOptions, ExtractionResult, NumrecConfig, ParseResult};
use crate::parsing::{NumberParser, Parser};

/// What a recognizer looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    Number,
    Ordinal,
    Percentage,
    Range,
    Currency,
}

impl RecognizerKind {
    pub const ALL: [RecognizerKind; 5] = [
        Self::Number,
        Self::Ordinal,
        Self::Percentage,
        Self::Range,
        Self::Currency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Ordinal => "ordinal",
            Self::Percentage => "percentage",
            Self::Range => "range",
            Self::Currency => "currency",
        }
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecognizerKind {
    type Err = NumrecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "number" | "numbers" => Ok(Self::Number),
            "ordinal" | "ordinals" => Ok(Self::Ordinal),
            "percentage" | "percent" => Ok(Self::Percentage),
            "range" | "ranges" => Ok(Self::Range),
            "currency" | "money" => Ok(Self::Currency),
            other => Err(NumrecError::Config(format!(
                "unknown recognizer kind: {other}"
            ))),
        }
    }
}

/// Extract-then-parse pipeline for one culture.
///
/// Extractors are built once; with caching enabled each one memoizes its results per
/// input text. The recognizer is `Send + Sync` and can be shared across threads.
pub struct NumberRecognizer {
    culture: Culture,
    options: ExtractionOptions,
    number: Box<dyn Extractor>,
    ordinal: Box<dyn Extractor>,
    percentage: Box<dyn Extractor>,
    range: Box<dyn Extractor>,
    currency: Box<dyn Extractor>,
}

fn boxed<E: Extractor + 'static>(extractor: E, cache: &CacheConfig) -> Box<dyn Extractor> {
    if cache.enabled {
        Box::new(CachedExtractor::new(extractor, cache.capacity))
    } else {
        Box::new(extractor)
    }
}

impl NumberRecognizer {
    /// Recognizer with default options and no cache.
    pub fn new(culture: Culture) -> Self {
        Self::with_options(culture, ExtractionOptions::default(), &CacheConfig::default())
    }

    pub fn with_options(culture: Culture, options: ExtractionOptions, cache: &CacheConfig) -> Self {
        let locale = provider(culture);
        debug!(
            culture = %culture,
            cache = cache.enabled,
            "building recognizer"
        );
        Self {
            culture,
            number: boxed(NumberExtractor::numbers(locale, &options), cache),
            ordinal: boxed(PatternExtractor::ordinals(locale, &options), cache),
            percentage: boxed(PercentageExtractor::new(locale, &options), cache),
            range: boxed(RangeExtractor::new(locale, &options), cache),
            currency: boxed(CurrencyExtractor::new(locale, &options), cache),
            options,
        }
    }

    /// Recognizer for the culture, options and cache settings of a configuration.
    pub fn from_config(config: &NumrecConfig) -> Result<Self> {
        let culture: Culture = config.culture_or_default().parse()?;
        Ok(Self::with_options(
            culture,
            config.options.clone(),
            &config.cache,
        ))
    }

    pub fn culture(&self) -> Culture {
        self.culture
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn locale(&self) -> &'static LocaleProvider {
        provider(self.culture)
    }

    pub fn parser(&self) -> NumberParser<'static> {
        NumberParser::new(self.locale())
    }

    fn extractor(&self, kind: RecognizerKind) -> &dyn Extractor {
        match kind {
            RecognizerKind::Number => self.number.as_ref(),
            RecognizerKind::Ordinal => self.ordinal.as_ref(),
            RecognizerKind::Percentage => self.percentage.as_ref(),
            RecognizerKind::Range => self.range.as_ref(),
            RecognizerKind::Currency => self.currency.as_ref(),
        }
    }

    /// Spans of the given kind, without values.
    pub fn extract(&self, kind: RecognizerKind, text: &str) -> Vec<ExtractionResult> {
        self.extractor(kind).extract(text)
    }

    /// Extract then parse. Results that fail to parse are logged and skipped; a tag
    /// without a parsing strategy is a configuration error and is returned.
    pub fn recognize(&self, kind: RecognizerKind, text: &str) -> Result<Vec<ParseResult>> {
        let parser = self.parser();
        let mut parsed = Vec::new();
        for result in self.extract(kind, text) {
            match parser.parse(&result) {
                Ok(value) => parsed.push(value),
                Err(e) if e.is_configuration_error() => return Err(e.into()),
                Err(e) => warn!(kind = %kind, text = %result.text, "skipping result: {}", e),
            }
        }
        debug!(kind = %kind, found = parsed.len(), "recognized");
        Ok(parsed)
    }

    /// Every kind, in [`RecognizerKind::ALL`] order.
    pub fn recognize_all(&self, text: &str) -> Result<Vec<(RecognizerKind, Vec<ParseResult>)>> {
        RecognizerKind::ALL
            .iter()
            .map(|&kind| Ok((kind, self.recognize(kind, text)?)))
            .collect()
    }
}

impl fmt::Debug for NumberRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberRecognizer")
            .field("culture", &self.culture)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn resolutions(results: &[ParseResult]) -> Vec<&str> {
        results.iter().map(|r| r.resolution_str.as_str()).collect()
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Percent".parse::<RecognizerKind>().unwrap(), RecognizerKind::Percentage);
        assert_eq!("range".parse::<RecognizerKind>().unwrap(), RecognizerKind::Range);
        assert!(matches!(
            "length".parse::<RecognizerKind>(),
            Err(NumrecError::Config(_))
        ));
    }

    #[test]
    fn test_recognize_numbers() {
        let recognizer = NumberRecognizer::new(Culture::English);
        let results = recognizer
            .recognize(RecognizerKind::Number, "I bought two thousand and five apples")
            .unwrap();
        assert_eq!(resolutions(&results), vec!["2005"]);
        assert_eq!(results[0].number(), Some(Decimal::from(2005)));
        assert_eq!(results[0].extraction.start, 9);
    }

    #[test]
    fn test_recognize_all_kinds() {
        let recognizer = NumberRecognizer::new(Culture::English);
        let all = recognizer
            .recognize_all("between 5 and 10 percent of $30")
            .unwrap();
        let kinds: Vec<RecognizerKind> = all.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, RecognizerKind::ALL.to_vec());

        let currency = &all[4].1;
        assert_eq!(resolutions(currency), vec!["30"]);
        assert_eq!(currency[0].unit.as_deref(), Some("USD"));
    }

    #[test]
    fn test_from_config() {
        let config: NumrecConfig = serde_json::from_str(
            r#"{"culture": "zh-CN", "cache": {"enabled": true}}"#,
        )
        .unwrap();
        let recognizer = NumberRecognizer::from_config(&config).unwrap();
        assert_eq!(recognizer.culture(), Culture::Chinese);

        let first = recognizer.recognize(RecognizerKind::Number, "三千五").unwrap();
        let second = recognizer.recognize(RecognizerKind::Number, "三千五").unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].value, Some(Value::Number(Decimal::from(3500))));
    }

    #[test]
    fn test_from_config_unknown_culture() {
        let config = NumrecConfig {
            culture: "xx-yy".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            NumberRecognizer::from_config(&config),
            Err(NumrecError::Locale(_))
        ));
    }

    #[test]
    fn test_suppressed_relative_ordinals() {
        let options = ExtractionOptions {
            suppress_extended_types: true,
            ..Default::default()
        };
        let recognizer =
            NumberRecognizer::with_options(Culture::English, options, &CacheConfig::default());
        let results = recognizer
            .recognize(RecognizerKind::Ordinal, "the next one and the 3rd")
            .unwrap();
        assert_eq!(resolutions(&results), vec!["3"]);
    }

    #[test]
    fn test_zero_budget_still_returns() {
        let options = ExtractionOptions {
            match_budget_ms: Some(0),
            ..Default::default()
        };
        let recognizer =
            NumberRecognizer::with_options(Culture::English, options, &CacheConfig::default());
        let source = "1, 2, 3, 4, 5 and 6 or more";
        for kind in RecognizerKind::ALL {
            assert!(recognizer.recognize(kind, source).is_ok());
        }
        assert!(recognizer.recognize(RecognizerKind::Number, source).unwrap().is_empty());
    }

    #[test]
    fn test_magnitude_continuation() {
        let recognizer = NumberRecognizer::new(Culture::English);
        let results = recognizer
            .recognize(RecognizerKind::Number, "one thousand nine hundred")
            .unwrap();
        assert_eq!(resolutions(&results), vec!["1900"]);
    }

    #[test]
    fn test_spans_are_valid_and_disjoint() {
        let samples = [
            (Culture::English, "Between 5 and 10 percent of the 3rd batch cost $1,250.50, minus 3 dollars."),
            (Culture::English, "nine hundred thousand people, two and a half hours, the last one"),
            (Culture::Chinese, "共有二百三十五人，打七五折，价格为五元二角，大于等于５"),
        ];
        for (culture, source) in samples {
            let recognizer = NumberRecognizer::new(culture);
            for kind in RecognizerKind::ALL {
                let results = recognizer.extract(kind, source);
                for r in &results {
                    assert_eq!(&source[r.start..r.end()], r.text, "{kind} in {source:?}");
                }
                for pair in results.windows(2) {
                    assert!(pair[0].end() <= pair[1].start, "{kind} overlap in {source:?}");
                }
            }
        }
    }

    #[test]
    fn test_number_resolution_round_trips() {
        let recognizer = NumberRecognizer::new(Culture::English);
        let results = recognizer
            .recognize(RecognizerKind::Number, "1,250.50 and nine hundred thousand and -0.25")
            .unwrap();
        assert!(!results.is_empty());
        for r in results {
            let reparsed: Decimal = r.resolution_str.parse().unwrap();
            assert_eq!(Some(reparsed), r.number());
        }
    }

    #[test]
    fn test_recognizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NumberRecognizer>();
    }
}
