use log::{debug, warn};

/// Outcome of a batch pop request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopReport {
    /// Indices that were actually popped, in pop order
    pub popped: Vec<usize>,
    /// Number of pops that found the stack already empty
    pub underflows: usize,
}

/// The ordered stack of saved resume points.
///
/// Each entry is the instruction index a later return jump should land on.
/// The stack outlives any single event run; nothing ties an entry to the
/// list that is current when it gets popped, which is why the host is given
/// [`ReturnStack::clear`] as an explicit reset boundary between runs.
#[derive(Debug, Clone, Default)]
pub struct ReturnStack {
    entries: Vec<usize>,
}

impl ReturnStack {
    pub fn new() -> Self {
        ReturnStack {
            entries: Vec::new(),
        }
    }

    /// Save a resume point
    pub fn push(&mut self, index: usize) {
        debug!("return stack push: {} (depth {})", index, self.entries.len() + 1);
        self.entries.push(index);
    }

    /// Take back the most recently saved resume point
    pub fn pop(&mut self) -> Option<usize> {
        let popped = self.entries.pop();
        match popped {
            Some(index) => debug!(
                "return stack pop: {} (depth {})",
                index,
                self.entries.len()
            ),
            None => debug!("return stack pop on empty stack"),
        }
        popped
    }

    /// Most recently saved resume point without removing it
    pub fn peek(&self) -> Option<usize> {
        self.entries.last().copied()
    }

    /// Forget every saved resume point.
    ///
    /// This is the recovery path for events whose save and return counts do
    /// not match, and the host-facing reset boundary between independent
    /// runs.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("return stack cleared ({} entries dropped)", self.entries.len());
        }
        self.entries.clear();
    }

    /// Pop up to `count` times, reporting each underflow instead of
    /// aborting the batch.
    pub fn pop_n(&mut self, count: usize) -> PopReport {
        let mut report = PopReport::default();
        for _ in 0..count {
            match self.entries.pop() {
                Some(index) => report.popped.push(index),
                None => {
                    warn!("pop requested on an empty return stack");
                    report.underflows += 1;
                }
            }
        }
        report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saved resume points, oldest first
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }
}
