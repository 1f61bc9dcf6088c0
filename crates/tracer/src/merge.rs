use shared::domain::SortingMethod;

use crate::{recorder::Recorder, Algorithm};

#[derive(Debug, Clone, Copy)]
enum Task {
    Split { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// In-place stable merge. `next` is the slot being settled, the left run
/// occupies `next..right_head` and the right run `right_head..=right`.
#[derive(Debug)]
struct MergeCursor {
    next: usize,
    right_head: usize,
    right: usize,
}

#[derive(Debug)]
pub(crate) struct MergeSort {
    pending: Vec<Task>,
    merge: Option<MergeCursor>,
}

impl MergeSort {
    pub(crate) fn new(len: usize) -> Self {
        let mut pending = Vec::new();
        if len > 1 {
            pending.push(Task::Split {
                left: 0,
                right: len - 1,
            });
        }
        Self {
            pending,
            merge: None,
        }
    }
}

impl Algorithm for MergeSort {
    fn advance(&mut self, rec: &mut Recorder) {
        if let Some(cursor) = self.merge.as_mut() {
            let (k, r) = (cursor.next, cursor.right_head);
            if k > cursor.right {
                self.merge = None;
                return;
            }

            if k < r && r <= cursor.right {
                rec.emit(
                    &[k, r],
                    format!("Merging: Comparing {} and {}", rec.value(k), rec.value(r)),
                );
                // ties keep the left element in front
                if rec.value(k) > rec.value(r) {
                    rec.rotate_into(k, r);
                    cursor.right_head += 1;
                }
                cursor.next += 1;
                rec.emit(&[k], "Placed smaller element");
                return;
            }

            let description = if r > cursor.right {
                "Placing remaining left elements"
            } else {
                "Placing remaining right elements"
            };
            cursor.next += 1;
            rec.emit(&[k], description);
            return;
        }

        match self.pending.pop() {
            Some(Task::Split { left, right }) => {
                if left >= right {
                    return;
                }
                let mid = left + (right - left) / 2;
                self.pending.push(Task::Merge { left, mid, right });
                self.pending.push(Task::Split {
                    left: mid + 1,
                    right,
                });
                self.pending.push(Task::Split { left, right: mid });
            }
            Some(Task::Merge { left, mid, right }) => {
                self.merge = Some(MergeCursor {
                    next: left,
                    right_head: mid + 1,
                    right,
                });
            }
            None => rec.finish(SortingMethod::Merge),
        }
    }
}
