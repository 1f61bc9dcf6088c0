use shared::domain::SortingMethod;

use crate::{recorder::Recorder, Algorithm};

/// The key travels with the hole by swapping, so every snapshot stays a
/// permutation of the input. No index is reported sorted before the end.
#[derive(Debug)]
pub(crate) struct InsertionSort {
    next_key: usize,
    hole: Option<Hole>,
}

#[derive(Debug, Clone, Copy)]
struct Hole {
    key: i64,
    index: usize,
}

impl InsertionSort {
    pub(crate) fn new() -> Self {
        Self {
            next_key: 1,
            hole: None,
        }
    }
}

impl Algorithm for InsertionSort {
    fn advance(&mut self, rec: &mut Recorder) {
        let Some(hole) = self.hole else {
            let i = self.next_key;
            if i >= rec.len() {
                rec.finish(SortingMethod::Insertion);
                return;
            }
            let key = rec.value(i);
            rec.emit(&[i], format!("Selected key: {key}"));
            self.hole = Some(Hole { key, index: i });
            return;
        };

        let h = hole.index;
        if h > 0 && rec.value(h - 1) > hole.key {
            rec.emit(&[h - 1, h], format!("Moving {} forward", rec.value(h - 1)));
            rec.swap(h - 1, h);
            rec.emit(&[h - 1], "Shift complete");
            self.hole = Some(Hole {
                index: h - 1,
                ..hole
            });
            return;
        }

        rec.emit(&[h], format!("Inserted {} at correct position", hole.key));
        self.hole = None;
        self.next_key += 1;
    }
}
