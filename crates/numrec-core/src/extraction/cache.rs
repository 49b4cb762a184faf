use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::trace;

use super::Extractor;
use crate::models::ExtractionResult;

/// Memoizes an extractor's results per input text.
///
/// Entries are never evicted; once `capacity` inputs are cached, new inputs are
/// extracted without being stored.
pub struct CachedExtractor<E> {
    inner: E,
    capacity: usize,
    entries: Mutex<HashMap<String, Arc<Vec<ExtractionResult>>>>,
}

impl<E: Extractor> CachedExtractor<E> {
    pub fn new(inner: E, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Results for `source`, shared with every other caller of the same text.
    pub fn extract_shared(&self, source: &str) -> Arc<Vec<ExtractionResult>> {
        if let Some(hit) = self.lock().get(source) {
            trace!(len = source.len(), "extraction cache hit");
            return Arc::clone(hit);
        }

        let results = Arc::new(self.inner.extract(source));
        let mut entries = self.lock();
        if entries.len() < self.capacity {
            entries.insert(source.to_string(), Arc::clone(&results));
        }
        results
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Vec<ExtractionResult>>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: Extractor> Extractor for CachedExtractor<E> {
    fn extract(&self, source: &str) -> Vec<ExtractionResult> {
        self.extract_shared(source).as_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractKind, ExtractionData, Tag};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl Extractor for Counting {
        fn extract(&self, source: &str) -> Vec<ExtractionResult> {
            self.0.fetch_add(1, Ordering::SeqCst);
            vec![ExtractionResult::from_span(
                source,
                0,
                source.len(),
                ExtractKind::Number,
                ExtractionData::Tag(Tag::new("IntegerNum", 0)),
            )]
        }
    }

    #[test]
    fn test_hits_share_results() {
        let cached = CachedExtractor::new(Counting(AtomicUsize::new(0)), 8);
        let a = cached.extract_shared("42");
        let b = cached.extract_shared("42");

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cached.inner.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_capacity_bounds_entries() {
        let cached = CachedExtractor::new(Counting(AtomicUsize::new(0)), 1);
        cached.extract("1");
        cached.extract("2");
        cached.extract("2");

        assert_eq!(cached.len(), 1);
        assert_eq!(cached.inner.0.load(Ordering::SeqCst), 3);
    }
}
