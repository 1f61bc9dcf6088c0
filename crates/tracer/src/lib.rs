//! Lazy step traces for the classic comparison sorts.
//!
//! Each algorithm is a resumable state object. [`Tracer`] pulls one unit of
//! work at a time from it and hands out the queued [`Step`] snapshots, so a
//! consumer can stop after any single step and never pays for the rest of the
//! run.

use std::iter::FusedIterator;

use shared::domain::{SortingMethod, Step};

mod bubble;
mod insertion;
mod merge;
mod quick;
mod recorder;
mod selection;

use bubble::BubbleSort;
use insertion::InsertionSort;
use merge::MergeSort;
use quick::QuickSort;
use recorder::Recorder;
use selection::SelectionSort;

/// One resumable unit of an algorithm. Every call either queues steps,
/// finishes the recorder, or moves internal bookkeeping strictly forward.
pub(crate) trait Algorithm: Send {
    fn advance(&mut self, rec: &mut Recorder);
}

struct Tracer<A> {
    recorder: Recorder,
    algorithm: A,
}

impl<A: Algorithm> Tracer<A> {
    fn new(method: SortingMethod, input: &[i64], algorithm: A) -> Self {
        let mut recorder = Recorder::new(input);
        recorder.emit(&[], format!("Starting {}...", method.label()));
        Self {
            recorder,
            algorithm,
        }
    }
}

impl<A: Algorithm> Iterator for Tracer<A> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.recorder.pop() {
                return Some(step);
            }
            if self.recorder.is_finished() {
                return None;
            }
            self.algorithm.advance(&mut self.recorder);
        }
    }
}

/// A finite, non-restartable stream of steps for one run.
pub struct Trace {
    method: SortingMethod,
    steps: Box<dyn Iterator<Item = Step> + Send>,
    emitted: usize,
    exhausted: bool,
}

impl Trace {
    pub fn method(&self) -> SortingMethod {
        self.method
    }

    /// Number of steps handed out so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for Trace {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.exhausted {
            return None;
        }
        match self.steps.next() {
            Some(step) => {
                self.emitted += 1;
                Some(step)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl FusedIterator for Trace {}

impl std::fmt::Debug for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trace")
            .field("method", &self.method)
            .field("emitted", &self.emitted)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Builds the trace for `method` over a private copy of `input`.
pub fn trace(method: SortingMethod, input: &[i64]) -> Trace {
    let steps: Box<dyn Iterator<Item = Step> + Send> = match method {
        SortingMethod::Bubble => Box::new(Tracer::new(method, input, BubbleSort::default())),
        SortingMethod::Selection => {
            Box::new(Tracer::new(method, input, SelectionSort::default()))
        }
        SortingMethod::Insertion => Box::new(Tracer::new(method, input, InsertionSort::new())),
        SortingMethod::Quick => Box::new(Tracer::new(method, input, QuickSort::new(input.len()))),
        SortingMethod::Merge => Box::new(Tracer::new(method, input, MergeSort::new(input.len()))),
    };
    tracing::debug!(method = %method, len = input.len(), "trace created");

    Trace {
        method,
        steps,
        emitted: 0,
        exhausted: false,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
