//! Linear undo/redo log with branch truncation.

/// Ordered snapshots plus a cursor at the current one.
///
/// Never empty: the cursor always indexes a valid snapshot. Committing after
/// an undo discards everything past the cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> History<T> {
    /// Start a log at `initial`, keeping at most `capacity` snapshots (minimum 1).
    pub fn new(initial: T, capacity: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Append `state` after the cursor and make it current.
    pub fn commit(&mut self, state: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one snapshot; `None` at the oldest.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot; `None` at the newest.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
