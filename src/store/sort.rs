use std::collections::VecDeque;

use crate::models::Record;

/// Adjacent exchange sort on `name`, swapping whole records. Runs passes until
/// one makes no swap and returns how many passes that took.
///
/// Only a strictly greater name triggers a swap, so equal names keep their
/// relative order.
pub(super) fn exchange_sort_by_name(records: &mut VecDeque<Record>) -> usize {
    exchange_passes(records.len(), |idx| {
        if records[idx].name.as_bytes() > records[idx + 1].name.as_bytes() {
            records.swap(idx, idx + 1);
            true
        } else {
            false
        }
    })
}

/// Adjacent exchange sort on `priority` that moves only the priority values.
/// Name and category stay at their positions.
pub(super) fn exchange_sort_by_priority(records: &mut VecDeque<Record>) -> usize {
    exchange_passes(records.len(), |idx| {
        let (left, right) = (records[idx].priority, records[idx + 1].priority);
        if left > right {
            records[idx].priority = right;
            records[idx + 1].priority = left;
            true
        } else {
            false
        }
    })
}

/// Drive compare-and-swap passes over `len` positions. `step(idx)` looks at the
/// pair `(idx, idx + 1)` and reports whether it swapped.
fn exchange_passes(len: usize, mut step: impl FnMut(usize) -> bool) -> usize {
    if len < 2 {
        return 0;
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut swapped = false;
        for idx in 0..len - 1 {
            if step(idx) {
                swapped = true;
            }
        }
        if !swapped {
            return passes;
        }
    }
}
