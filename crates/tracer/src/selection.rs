use shared::domain::SortingMethod;

use crate::{recorder::Recorder, Algorithm};

#[derive(Debug, Clone, Copy, Default)]
enum Phase {
    #[default]
    Announce,
    Scan,
    Settle,
}

#[derive(Debug, Default)]
pub(crate) struct SelectionSort {
    position: usize,
    min: usize,
    cursor: usize,
    phase: Phase,
}

impl Algorithm for SelectionSort {
    fn advance(&mut self, rec: &mut Recorder) {
        let len = rec.len();
        match self.phase {
            Phase::Announce => {
                let i = self.position;
                if i >= len {
                    rec.finish(SortingMethod::Selection);
                    return;
                }
                self.min = i;
                self.cursor = i + 1;
                rec.emit(&[i], format!("Current minimum index: {i}"));
                self.phase = Phase::Scan;
            }
            Phase::Scan => {
                let j = self.cursor;
                if j >= len {
                    self.phase = Phase::Settle;
                    return;
                }
                rec.emit(
                    &[self.min, j],
                    format!("Checking {} < {}?", rec.value(j), rec.value(self.min)),
                );
                if rec.value(j) < rec.value(self.min) {
                    self.min = j;
                    rec.emit(&[j], format!("Found new minimum: {}", rec.value(j)));
                }
                self.cursor += 1;
            }
            Phase::Settle => {
                let i = self.position;
                if self.min != i {
                    rec.swap(i, self.min);
                    rec.emit(&[i, self.min], format!("Swapped new minimum to position {i}"));
                }
                rec.mark_sorted(i);
                rec.emit(&[], format!("Index {i} sorted."));
                self.position += 1;
                self.phase = Phase::Announce;
            }
        }
    }
}
