use std::ops::Range;

use shared::domain::SortingMethod;

use crate::{recorder::Recorder, Algorithm};

/// Lomuto partition over an explicit stack of half-open ranges.
#[derive(Debug)]
pub(crate) struct QuickSort {
    pending: Vec<Range<usize>>,
    partition: Option<Partition>,
}

#[derive(Debug)]
struct Partition {
    low: usize,
    high: usize,
    pivot: i64,
    store: usize,
    cursor: usize,
}

impl QuickSort {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            pending: vec![0..len],
            partition: None,
        }
    }

    fn open(&mut self, range: Range<usize>, rec: &mut Recorder) {
        match range.len() {
            0 => {}
            1 => {
                rec.mark_sorted(range.start);
                rec.emit(&[], format!("Element {} sorted", rec.value(range.start)));
            }
            _ => {
                let high = range.end - 1;
                let pivot = rec.value(high);
                rec.emit(&[high], format!("Pivot chosen: {pivot}"));
                self.partition = Some(Partition {
                    low: range.start,
                    high,
                    pivot,
                    store: range.start,
                    cursor: range.start,
                });
            }
        }
    }
}

impl Algorithm for QuickSort {
    fn advance(&mut self, rec: &mut Recorder) {
        if let Some(part) = self.partition.as_mut() {
            let (j, high, pivot) = (part.cursor, part.high, part.pivot);
            if j < high {
                rec.emit(&[j, high], format!("Comparing {} vs Pivot {pivot}", rec.value(j)));
                if rec.value(j) < pivot {
                    let i = part.store;
                    rec.swap(i, j);
                    rec.emit(
                        &[i, j],
                        format!("Swapping {} and {}", rec.value(i), rec.value(j)),
                    );
                    part.store += 1;
                }
                part.cursor += 1;
                return;
            }

            let (low, resting) = (part.low, part.store);
            rec.swap(resting, high);
            rec.emit(&[resting, high], "Moving pivot to correct position");
            self.partition = None;

            rec.mark_sorted(resting);
            rec.emit(&[], format!("Pivot {} locked in position", rec.value(resting)));
            self.pending.push(resting + 1..high + 1);
            self.pending.push(low..resting);
            return;
        }

        match self.pending.pop() {
            Some(range) => self.open(range, rec),
            None => {
                if rec.sorted_count() != rec.len() {
                    tracing::debug!(
                        sorted = rec.sorted_count(),
                        len = rec.len(),
                        "quick sort backfilling sorted set"
                    );
                }
                rec.finish(SortingMethod::Quick);
            }
        }
    }
}
