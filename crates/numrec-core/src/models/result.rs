//! Extraction and parse result models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse category of an extracted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractKind {
    Number,
    Ordinal,
    Fraction,
    Percentage,
    Range,
    Currency,
}

impl ExtractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Ordinal => "ordinal",
            Self::Fraction => "fraction",
            Self::Percentage => "percentage",
            Self::Range => "range",
            Self::Currency => "currency",
        }
    }
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category label attached during extraction, e.g. `IntegerNum` or `DoubleChs`.
///
/// The name selects a parsing strategy through the locale tables. The priority only
/// breaks ties when several patterns match an identical span: lower wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub priority: u8,
}

impl Tag {
    pub fn new(name: impl Into<String>, priority: u8) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Payload of an extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionData {
    /// A plain locale tag.
    Tag(Tag),
    /// A composite tag with the ordered child results it was built from.
    Nested {
        tag: Tag,
        children: Vec<ExtractionResult>,
    },
}

impl ExtractionData {
    pub fn tag(&self) -> &Tag {
        match self {
            Self::Tag(tag) | Self::Nested { tag, .. } => tag,
        }
    }

    pub fn children(&self) -> &[ExtractionResult] {
        match self {
            Self::Tag(_) => &[],
            Self::Nested { children, .. } => children,
        }
    }
}

/// A tagged substring span produced by an extractor.
///
/// `start` and `length` are UTF-8 byte offsets into the source text, and
/// `text == source[start..start + length]` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub start: usize,
    pub length: usize,
    pub text: String,
    pub kind: ExtractKind,
    pub data: ExtractionData,
}

impl ExtractionResult {
    /// Build a result by slicing `source`.
    pub fn from_span(
        source: &str,
        start: usize,
        end: usize,
        kind: ExtractKind,
        data: ExtractionData,
    ) -> Self {
        Self {
            start,
            length: end - start,
            text: source[start..end].to_string(),
            kind,
            data,
        }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn tag(&self) -> &Tag {
        self.data.tag()
    }

    pub fn children(&self) -> &[ExtractionResult] {
        self.data.children()
    }

    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end() && end > self.start
    }

    /// Shift the span (and any nested children) by `offset` bytes into an enclosing text.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.shift(offset);
        self
    }

    fn shift(&mut self, offset: usize) {
        self.start += offset;
        if let ExtractionData::Nested { children, .. } = &mut self.data {
            for child in children.iter_mut() {
                child.shift(offset);
            }
        }
    }
}

/// Anchor of a relative ordinal such as "the next one" or "the last".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeTo {
    Current,
    End,
}

/// Numeric interval produced by range parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Option<Decimal>,
    pub end: Option<Decimal>,
    pub left_closed: bool,
    pub right_closed: bool,
}

/// Resolved value of a parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Number(Decimal),
    Interval(Interval),
    Relative { offset: i64, relative_to: RelativeTo },
}

/// An extraction result with its resolved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(flatten)]
    pub extraction: ExtractionResult,
    pub value: Option<Value>,
    pub resolution_str: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ParseResult {
    /// The numeric value, if this result resolved to a single number.
    pub fn number(&self) -> Option<Decimal> {
        match self.value {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn interval(&self) -> Option<&Interval> {
        match &self.value {
            Some(Value::Interval(interval)) => Some(interval),
            _ => None,
        }
    }
}
