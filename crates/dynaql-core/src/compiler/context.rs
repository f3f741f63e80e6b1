//! Per-compiler collision state.

/// Source of the numeric suffixes used to keep placeholders unique.
///
/// One context is shared by every clause of a statement, and by default
/// across statements until [`CompilationContext::reset`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationContext {
    collision_index: u64,
}

impl CompilationContext {
    /// A fresh context; the first drawn index is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next collision index.
    pub fn next_index(&mut self) -> u64 {
        self.collision_index += 1;
        self.collision_index
    }

    /// The last index drawn, 0 if none.
    #[must_use]
    pub fn current_index(&self) -> u64 {
        self.collision_index
    }

    /// Start over from a fresh context.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
