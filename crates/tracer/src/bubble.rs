use shared::domain::SortingMethod;

use crate::{recorder::Recorder, Algorithm};

#[derive(Debug, Default)]
pub(crate) struct BubbleSort {
    pass: usize,
    cursor: usize,
    swapped: bool,
    done: bool,
}

impl Algorithm for BubbleSort {
    fn advance(&mut self, rec: &mut Recorder) {
        if self.done {
            rec.finish(SortingMethod::Bubble);
            return;
        }

        let len = rec.len();
        if self.pass >= len {
            self.done = true;
            return;
        }

        let j = self.cursor;
        if j + 1 < len - self.pass {
            let (left, right) = (rec.value(j), rec.value(j + 1));
            rec.emit(&[j, j + 1], format!("Comparing {left} and {right}"));
            if left > right {
                rec.swap(j, j + 1);
                self.swapped = true;
                rec.emit(
                    &[j, j + 1],
                    format!("Swapped {} and {}", rec.value(j), rec.value(j + 1)),
                );
            }
            self.cursor += 1;
            return;
        }

        let settled = len - self.pass - 1;
        rec.mark_sorted(settled);
        rec.emit(&[], format!("Element at index {settled} is in final position."));

        if !self.swapped {
            // nothing moved, so the unsorted prefix is already in order
            tracing::debug!(pass = self.pass, settled, "bubble sort exited early");
            rec.mark_range_sorted(0..settled);
            self.done = true;
            return;
        }

        self.pass += 1;
        self.cursor = 0;
        self.swapped = false;
    }
}
