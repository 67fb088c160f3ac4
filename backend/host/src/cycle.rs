use tracing::debug;

/// The host's run-once-at-cycle-end facility, modeled as a task queue.
///
/// The embedding application owns one queue per processing cycle and
/// drains it after all other handlers have run, before cycle teardown.
/// Tasks run in ascending priority order; ties keep insertion order.
pub struct CycleEndQueue<T> {
    entries: Vec<(i32, T)>,
}

impl<T> CycleEndQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Enqueue a task to run at cycle end.
    pub fn schedule(&mut self, priority: i32, task: T) {
        debug!(priority, "Cycle-end task scheduled");
        self.entries.push((priority, task));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return all tasks in run order. The queue is empty
    /// afterwards; a second drain in the same cycle yields nothing.
    pub fn drain(&mut self) -> Vec<T> {
        let mut entries = std::mem::take(&mut self.entries);
        entries.sort_by_key(|(priority, _)| *priority);
        entries.into_iter().map(|(_, task)| task).collect()
    }
}

impl<T> Default for CycleEndQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
