//! Data models for extraction results, parse results and configuration.

pub mod config;
pub mod result;

pub use config::{CacheConfig, ExtractionOptions, NumrecConfig, OutputConfig};
pub use result::{
    ExtractKind, ExtractionData, ExtractionResult, Interval, ParseResult, RelativeTo, Tag, Value,
};
