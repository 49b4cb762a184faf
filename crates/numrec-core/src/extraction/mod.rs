//! Extractors: find and classify numeric spans in text.
//!
//! Every extractor implements [`Extractor`]. Pattern-driven extractors share the same
//! conflict resolution: matched bytes are marked, contiguous marked runs are formed,
//! and a run is emitted only if some single match spans it exactly.

pub mod cache;
pub mod currency;
pub mod merge;
pub mod pattern;
pub mod percentage;
pub mod range;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use regex::Captures;
use tracing::warn;

use crate::models::ExtractionResult;

pub use cache::CachedExtractor;
pub use currency::CurrencyExtractor;
pub use merge::{CompoundMergeExtractor, MergeRules};
pub use pattern::{AmbiguityFilter, PatternExtractor, TaggedPattern};
pub use percentage::PercentageExtractor;
pub use range::RangeExtractor;

/// Number extractor of a locale: pattern matches followed by magnitude merging.
pub type NumberExtractor = CompoundMergeExtractor<PatternExtractor>;

/// Trait for numeric span extractors.
///
/// Extraction never fails: text without numbers yields an empty list. Results are
/// non-overlapping and sorted by start offset.
pub trait Extractor: Send + Sync {
    fn extract(&self, source: &str) -> Vec<ExtractionResult>;
}

impl<E: Extractor + ?Sized> Extractor for Box<E> {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        (**self).extract(source)
    }
}

impl<E: Extractor + ?Sized> Extractor for std::sync::Arc<E> {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        (**self).extract(source)
    }
}

/// A raw match competing for a run.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<P> {
    pub start: usize,
    pub end: usize,
    pub priority: u8,
    /// Declaration order of the producing pattern.
    pub order: usize,
    pub payload: P,
}

/// Keep only candidates that span a marked run exactly.
///
/// Among candidates with an identical span, the lowest priority wins, then the
/// earliest declared pattern. Output is sorted by start offset.
pub(crate) fn resolve_runs<P>(len: usize, candidates: Vec<Candidate<P>>) -> Vec<Candidate<P>> {
    let mut marked = vec![false; len];
    let mut best: HashMap<(usize, usize), Candidate<P>> = HashMap::new();

    for candidate in candidates {
        if candidate.start >= candidate.end {
            continue;
        }
        marked[candidate.start..candidate.end].fill(true);
        let key = (candidate.start, candidate.end);
        let replace = match best.get(&key) {
            Some(current) => {
                (candidate.priority, candidate.order) < (current.priority, current.order)
            }
            None => true,
        };
        if replace {
            best.insert(key, candidate);
        }
    }

    let mut resolved = Vec::new();
    let mut i = 0;
    while i < len {
        if !marked[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && marked[i] {
            i += 1;
        }
        if let Some(candidate) = best.remove(&(start, i)) {
            resolved.push(candidate);
        }
    }
    resolved
}

/// Collect all captures of `pattern`, giving up if the scan exceeds `budget`.
///
/// The budget is checked before each match after the first. An over-budget pattern
/// contributes no matches at all for this call; other patterns are unaffected.
pub(crate) fn timed_captures<'t>(
    pattern: &TaggedPattern,
    source: &'t str,
    budget: Option<Duration>,
) -> Vec<Captures<'t>> {
    let started = Instant::now();
    let mut captures = Vec::new();
    for caps in pattern.regex.captures_iter(source) {
        if let Some(budget) = budget {
            if !captures.is_empty() && started.elapsed() >= budget {
                warn!(
                    tag = %pattern.tag,
                    budget_ms = budget.as_millis() as u64,
                    "pattern exceeded its match budget; its matches are dropped"
                );
                return Vec::new();
            }
        }
        captures.push(caps);
    }
    captures
}
