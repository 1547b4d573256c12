//! Batch segmentation over a whole vocabulary list.
//!
//! Entries are handed out through an atomic cursor to a fixed pool of scoped
//! threads; each worker keeps its own result list and outcome tally, and the
//! driver reassembles input order and merges the tallies afterwards. No locks
//! are taken on the hot path.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::debug;

use crate::entry::VocabularyEntry;
use crate::outcome::OutcomeTracker;
use crate::segmenter::{SegmentationResult, Segmenter};

/// One batch run: a result per entry, in input order, plus the per-level
/// tally. Entries without an example sentence yield an unmatched result but
/// stay out of the tally.
#[derive(Debug)]
pub struct BatchOutput {
    pub results: Vec<SegmentationResult>,
    pub outcomes: OutcomeTracker,
}

/// Resolve a configured worker count; zero means one per available core.
pub fn effective_workers(configured: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Segment every entry, fanning out across up to `workers` threads.
pub fn run(segmenter: &Segmenter, entries: &[VocabularyEntry], workers: usize) -> BatchOutput {
    let workers = effective_workers(workers).min(entries.len().max(1));
    debug!(total = entries.len(), workers, "segmenting batch");
    if workers <= 1 {
        return run_sequential(segmenter, entries);
    }

    let next = AtomicUsize::new(0);
    let mut collected: Vec<(usize, SegmentationResult)> = Vec::with_capacity(entries.len());
    let mut outcomes = OutcomeTracker::new();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut results = Vec::new();
                    let mut tally = OutcomeTracker::new();
                    loop {
                        let idx = next.fetch_add(1, Ordering::SeqCst);
                        let Some(entry) = entries.get(idx) else {
                            break;
                        };
                        let result = segmenter.segment(entry);
                        if entry.full_sentence.is_some() {
                            tally.record(&entry.level, result.is_matched());
                        }
                        results.push((idx, result));
                    }
                    (results, tally)
                })
            })
            .collect();

        for handle in handles {
            let (results, tally) = handle.join().expect("segmentation worker panicked");
            collected.extend(results);
            outcomes.merge(tally);
        }
    });

    collected.sort_unstable_by_key(|(idx, _)| *idx);
    BatchOutput {
        results: collected.into_iter().map(|(_, result)| result).collect(),
        outcomes,
    }
}

fn run_sequential(segmenter: &Segmenter, entries: &[VocabularyEntry]) -> BatchOutput {
    let mut results = Vec::with_capacity(entries.len());
    let mut outcomes = OutcomeTracker::new();
    for entry in entries {
        let result = segmenter.segment(entry);
        if entry.full_sentence.is_some() {
            outcomes.record(&entry.level, result.is_matched());
        }
        results.push(result);
    }
    BatchOutput { results, outcomes }
}
