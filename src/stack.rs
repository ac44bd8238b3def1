//! A minimal LIFO stack.
//!
//! This only exists to drive the iterative walks in [`crate::linked`] - the
//! pre-order iterator and the non-recursive teardown both want "push some
//! nodes, pop the most recent" and nothing else.

/// A last-in-first-out stack of items.
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Generates a new, empty `Stack`.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes an item onto the top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item, or `None` if the
    /// stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns `true` if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
