//! Marks on a range of indicies, cleared in constant time.
//!
//! Each index holds the step at which it was last marked, and an index is marked only if its step is the current step.
//! So, moving to the next step clears every mark at once.
//!
//! ```rust
//! # use otter_simp::generic::mark_array::MarkArray;
//! let mut marks = MarkArray::with_capacity(8);
//! marks.next_step();
//! marks.set(3);
//! assert!(marks.is_marked(3));
//!
//! marks.next_step();
//! assert!(!marks.is_marked(3));
//! ```

/// Step-stamped marks.
#[derive(Clone, Debug, Default)]
pub struct MarkArray {
    steps: Vec<u32>,
    step: u32,
}

impl MarkArray {
    pub fn with_capacity(capacity: usize) -> Self {
        MarkArray {
            steps: vec![0; capacity],
            step: 1,
        }
    }

    /// Ensures indicies `0..capacity` may be marked.
    pub fn ensure(&mut self, capacity: usize) {
        if self.steps.len() < capacity {
            self.steps.resize(capacity, 0);
        }
    }

    /// Clears every mark.
    pub fn next_step(&mut self) {
        match self.step.checked_add(1) {
            Some(step) => self.step = step,
            None => {
                self.steps.iter_mut().for_each(|step| *step = 0);
                self.step = 1;
            }
        }
    }

    pub fn set(&mut self, index: usize) {
        self.ensure(index + 1);
        self.steps[index] = self.step;
    }

    pub fn unset(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            *step = 0;
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.steps.get(index).is_some_and(|step| *step == self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_outside_capacity() {
        let mut marks = MarkArray::with_capacity(2);
        assert!(!marks.is_marked(10));
        marks.set(10);
        assert!(marks.is_marked(10));
        marks.unset(10);
        assert!(!marks.is_marked(10));
    }
}
