//! Working array plus the step outbox shared by every algorithm.

use std::collections::{BTreeSet, VecDeque};

use shared::domain::{SortingMethod, Step};

pub(crate) struct Recorder {
    array: Vec<i64>,
    sorted: BTreeSet<usize>,
    outbox: VecDeque<Step>,
    finished: bool,
}

impl Recorder {
    pub(crate) fn new(input: &[i64]) -> Self {
        Self {
            array: input.to_vec(),
            sorted: BTreeSet::new(),
            outbox: VecDeque::new(),
            finished: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.array.len()
    }

    pub(crate) fn value(&self, index: usize) -> i64 {
        self.array[index]
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
    }

    /// Moves the element at `to` down to `from`, shifting `from..to` one slot
    /// right so the array stays a permutation.
    pub(crate) fn rotate_into(&mut self, from: usize, to: usize) {
        self.array[from..=to].rotate_right(1);
    }

    pub(crate) fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub(crate) fn mark_range_sorted(&mut self, range: std::ops::Range<usize>) {
        self.sorted.extend(range);
    }

    pub(crate) fn sorted_count(&self) -> usize {
        self.sorted.len()
    }

    pub(crate) fn emit(&mut self, highlights: &[usize], description: impl Into<String>) {
        self.push(highlights, description.into(), false);
    }

    /// Backfills the sorted set and queues the terminal step.
    pub(crate) fn finish(&mut self, method: SortingMethod) {
        let len = self.len();
        self.mark_range_sorted(0..len);
        self.push(&[], format!("{} Complete!", method.label()), true);
        self.finished = true;
    }

    pub(crate) fn pop(&mut self) -> Option<Step> {
        self.outbox.pop_front()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn push(&mut self, highlights: &[usize], description: String, completed: bool) {
        self.outbox.push_back(Step {
            array: self.array.clone(),
            highlights: highlights.to_vec(),
            sorted_indices: self.sorted.clone(),
            description,
            completed,
        });
    }
}
