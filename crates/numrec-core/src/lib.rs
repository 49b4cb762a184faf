//! Core library for multilingual number recognition.
//!
//! This crate provides:
//! - Locale providers (English, Chinese) compiled from pattern and word tables
//! - Pattern extraction with run resolution, negative-sign absorption and ambiguity filters
//! - Compound merging of adjacent numbers, magnitudes and currency units
//! - Percentage, range and currency extractors built on the number extractor
//! - Tag-driven parsing into exact decimal values, intervals and relative positions

pub mod error;
pub mod extraction;
pub mod locale;
pub mod models;
pub mod parsing;
pub mod recognizer;

pub use error::{LocaleError, NumrecError, ParseError, Result};
pub use extraction::{
    CachedExtractor, CompoundMergeExtractor, CurrencyExtractor, Extractor, NumberExtractor,
    PatternExtractor, PercentageExtractor, RangeExtractor,
};
pub use locale::{Culture, LocaleProvider, provider, provider_for};
pub use models::{
    ExtractKind, ExtractionData, ExtractionOptions, ExtractionResult, Interval, NumrecConfig,
    ParseResult, RelativeTo, Tag, Value,
};
pub use parsing::{NumberParser, Parser};
pub use recognizer::{NumberRecognizer, RecognizerKind};
