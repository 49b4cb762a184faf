//! Numeric range extraction ("between 5 and 10", "more than twenty", "大于等于5").

use regex::Match;
use tracing::debug;

use super::pattern::{PatternExtractor, TaggedPattern};
use super::{Candidate, Extractor, NumberExtractor, resolve_runs, timed_captures};
use crate::locale::LocaleProvider;
use crate::models::{ExtractKind, ExtractionData, ExtractionOptions, ExtractionResult};

const OPERAND_GROUPS: [&str; 2] = ["number1", "number2"];

/// Finds range expressions and resolves their operands with the locale's number and
/// ordinal extractors.
///
/// Each `number1`/`number2` capture is re-extracted; the longest number or ordinal found
/// inside it becomes a child, ordinals winning ties. A candidate is dropped unless every
/// capture yields a child. Where a capture touches the edge of the whole match, the span
/// shrinks to the child, so the span never grows beyond what the pattern matched.
pub struct RangeExtractor {
    patterns: Vec<TaggedPattern>,
    numbers: NumberExtractor,
    ordinals: PatternExtractor,
    options: ExtractionOptions,
}

impl RangeExtractor {
    pub fn new(locale: &LocaleProvider, options: &ExtractionOptions) -> Self {
        Self {
            patterns: locale.range_patterns().to_vec(),
            numbers: NumberExtractor::numbers(locale, options),
            ordinals: PatternExtractor::ordinals(locale, options),
            options: options.clone(),
        }
    }

    fn operand(&self, group: &Match<'_>) -> Option<ExtractionResult> {
        let longest = |results: Vec<ExtractionResult>| results.into_iter().max_by_key(|r| r.length);
        let number = longest(self.numbers.extract(group.as_str()));
        let ordinal = longest(self.ordinals.extract(group.as_str()));

        let inner = match (number, ordinal) {
            (Some(n), Some(o)) if n.length > o.length => n,
            (_, Some(o)) => o,
            (Some(n), None) => n,
            (None, None) => return None,
        };
        Some(inner.shifted(group.start()))
    }
}

impl Extractor for RangeExtractor {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        let budget = self.options.match_budget();
        let mut candidates = Vec::new();

        for (order, pattern) in self.patterns.iter().enumerate() {
            for caps in timed_captures(pattern, source, budget) {
                let Some(m) = caps.get(0) else { continue };
                let groups: Vec<Match<'_>> = OPERAND_GROUPS
                    .iter()
                    .filter_map(|name| caps.name(name))
                    .collect();

                let children: Option<Vec<ExtractionResult>> =
                    groups.iter().map(|g| self.operand(g)).collect();
                let Some(children) = children.filter(|c| !c.is_empty()) else {
                    debug!(tag = %pattern.tag, text = m.as_str(), "range operand did not resolve");
                    continue;
                };

                let (mut start, mut end) = (m.start(), m.end());
                for (group, child) in groups.iter().zip(&children) {
                    if source[start..group.start()].trim().is_empty() {
                        start = child.start;
                    }
                    if group.end() <= end && source[group.end()..end].trim().is_empty() {
                        end = child.end();
                    }
                }

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
                ExtractionResult::from_span(
                    source,
                    c.start,
                    c.end,
                    ExtractKind::Range,
                    ExtractionData::Nested {
                        tag: pattern.tag.clone(),
                        children,
                    },
                )
            })
            .collect()
    }
}
