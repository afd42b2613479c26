use crate::time::TimeTicks;

use std::cmp::Ordering;
use std::fmt;

/// Boxed unit of work posted to a task runner.
pub(crate) type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A task waiting in one of a runner's queues.
///
/// `PendingTask` is stored in the incoming and triage queues as-is, and
/// in the delayed-task heap when its run time lies in the future. The
/// heap ordering is earliest `run_time` first, with ties broken by the
/// smaller `sequence_num`, so delayed tasks sharing a deadline run in
/// post order.
pub(crate) struct PendingTask {
    /// The work to run.
    callback: Callback,

    /// Position in the runner's post order, assigned under the incoming
    /// queue lock.
    pub(crate) sequence_num: u64,

    /// When the task becomes runnable. Null means immediately.
    pub(crate) run_time: TimeTicks,
}

impl PendingTask {
    pub(crate) fn new(callback: Callback, sequence_num: u64, run_time: TimeTicks) -> Self {
        Self {
            callback,
            sequence_num,
            run_time,
        }
    }

    /// Runs the task on the calling thread, consuming it.
    pub(crate) fn run(self) {
        (self.callback)();
    }
}

impl Eq for PendingTask {}

impl PartialEq for PendingTask {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time && self.sequence_num == other.sequence_num
    }
}

impl Ord for PendingTask {
    /// Orders tasks by `(run_time, sequence_num)`.
    ///
    /// Note that the comparison is **reversed** so that a
    /// `BinaryHeap<PendingTask>` behaves as a min-heap, where the
    /// earliest task is popped first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .run_time
            .cmp(&self.run_time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

impl PartialOrd for PendingTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTask")
            .field("sequence_num", &self.sequence_num)
            .field("run_time", &self.run_time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BinaryHeap;

    fn task(sequence_num: u64, micros: i64) -> PendingTask {
        PendingTask::new(Box::new(|| {}), sequence_num, TimeTicks::from_micros(micros))
    }

    #[test]
    fn heap_pops_earliest_run_time_first() {
        let mut heap = BinaryHeap::new();
        heap.push(task(0, 300));
        heap.push(task(1, 100));
        heap.push(task(2, 200));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop())
            .map(|t| t.sequence_num)
            .collect();

        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn equal_run_times_keep_post_order() {
        let mut heap = BinaryHeap::new();
        for seq in [4, 2, 3, 0, 1] {
            heap.push(task(seq, 500));
        }

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop())
            .map(|t| t.sequence_num)
            .collect();

        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
