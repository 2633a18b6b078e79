/*!
A min-heap on some subset of elements with fixed indicies.

That is, a heap backed by a vector of values with a companion vector which tracks the current location of each (initial) index in the heap.
The backing vector stays constant, so the structure also acts as a store of values, some of which are *active* on the heap.

Within the library [IndexHeap] orders variables by occurrence count, and the technique with a heap takes the variable with the fewest occurrences first.
For example, [pure literal elimination](crate::preprocessing::pure) walks literals by ascending occurrence, and [variable elimination](crate::preprocessing::bve) takes the cheapest candidate first.

```rust
# use otter_simp::generic::index_heap::IndexHeap;
let mut test_heap = IndexHeap::default();

test_heap.add(600, 10);
test_heap.add(0, 70);

test_heap.activate(600);
test_heap.activate(0);

assert_eq!(test_heap.count(), 601);
assert_eq!(test_heap.value_at(5), &u32::default());

assert_eq!(test_heap.pop_min(), Some(600));
assert_eq!(test_heap.pop_min(), Some(0));

assert!(test_heap.pop_min().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    values: Vec<V>,
    position_in_heap: Vec<Option<usize>>,
    heap: Vec<usize>,
    limit: usize,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
            limit: 0,
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Index `value` with `value_index`.
    /// Returns true if `value_index` was a fresh index, false otherwise.
    /// To *activate* `value_index` on the heap [activate](IndexHeap::activate) should be called after this method.
    ///
    /// The structure grows to the size required for `value_index` to be an index.
    pub fn add(&mut self, value_index: usize, value: V) -> bool {
        if self.values.len() <= value_index {
            let required = (value_index - self.values.len()) + 1;
            self.position_in_heap.resize(value_index + 1, None);
            self.values.resize_with(value_index + 1, V::default);
            self.heap.resize(self.heap.len() + required, usize::MAX);
            self.values[value_index] = value;
            true
        } else {
            self.revalue(value_index, value);
            self.heapify_if_active(value_index);
            false
        }
    }

    /// Remove `value_index` from the heap, if present.
    /// Returns true if `value_index` was removed, false otherwise.
    pub fn remove(&mut self, value_index: usize) -> bool {
        match self.heap_index(value_index) {
            Some(heap_index) => {
                self.limit -= 1;
                if heap_index == self.limit {
                    self.position_in_heap[value_index] = None;
                } else {
                    let last = self.heap[self.limit];
                    self.position_in_heap[last] = Some(heap_index);
                    self.heap.swap(heap_index, self.limit);
                    self.position_in_heap[value_index] = None;
                    self.heapify_down(heap_index);
                    self.heapify_up(heap_index);
                }
                true
            }
            None => false,
        }
    }

    /// Activate the value on the heap at `index`.
    /// Returns true if the index was not already active.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.heap_index(index) {
            None => {
                self.position_in_heap[index] = Some(self.limit);
                self.heap[self.limit] = index;
                self.heapify_up(self.limit);
                self.limit += 1;
                true
            }
            Some(heap_index) => {
                self.heapify_up(heap_index);
                self.heapify_down(heap_index);
                false
            }
        }
    }

    /// True if `value_index` is active on the heap.
    pub fn is_active(&self, value_index: usize) -> bool {
        self.heap_index(value_index).is_some()
    }

    /// Heapify (ensure invariants of the heap are upheld) if `value_index` is active.
    pub fn heapify_if_active(&mut self, value_index: usize) {
        if let Some(heap_index) = self.heap_index(value_index) {
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
    }

    /// Peak at the minimum index of the heap.
    pub fn peek_min(&self) -> Option<usize> {
        match self.limit {
            0 => None,
            _ => Some(self.heap[0]),
        }
    }

    /// Pop the minimum index off the heap.
    pub fn pop_min(&mut self) -> Option<usize> {
        let min_index = self.peek_min()?;
        self.remove(min_index);
        Some(min_index)
    }

    /// Heapify (ensure invariants of the heap are upheld) the heap.
    pub fn heapify(&mut self) {
        for heap_index in (0..self.limit / 2).rev() {
            self.heapify_down(heap_index)
        }
    }

    /// Return the value indexed by `value_index`.
    pub fn value_at(&self, value_index: usize) -> &V {
        &self.values[value_index]
    }

    /// Set the value of `value_index` to `value`.
    ///
    /// The heap is not updated, see [heapify_if_active](IndexHeap::heapify_if_active).
    pub fn revalue(&mut self, value_index: usize, value: V) {
        self.values[value_index] = value
    }

    /// Deactivates every index, keeping values.
    pub fn clear(&mut self) {
        for heap_index in 0..self.limit {
            let value_index = self.heap[heap_index];
            self.position_in_heap[value_index] = None;
        }
        self.limit = 0;
    }

    /// The active indicies, in heap order.
    pub fn active(&self) -> &[usize] {
        &self.heap[..self.limit]
    }

    /// A count of values indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of active indicies.
    pub fn len(&self) -> usize {
        self.limit
    }

    /// True if no index is active, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Where `value_index` is stored on the heap, if present.
    fn heap_index(&self, value_index: usize) -> Option<usize> {
        self.position_in_heap.get(value_index).copied().flatten()
    }

    fn heap_left(heap_index: usize) -> usize {
        (2 * heap_index) + 1
    }

    fn heap_right(heap_index: usize) -> usize {
        (2 * heap_index) + 2
    }

    fn heap_parent(heap_index: usize) -> usize {
        heap_index.saturating_sub(1) / 2
    }

    fn value_on_heap(&self, heap_index: usize) -> &V {
        &self.values[self.heap[heap_index]]
    }

    fn swap_on_heap(&mut self, a: usize, b: usize) {
        let (value_a, value_b) = (self.heap[a], self.heap[b]);
        self.position_in_heap.swap(value_a, value_b);
        self.heap.swap(a, b);
    }

    /// Shuffles the index down into the heap, if required.
    ///
    /// For any trio of an index, the left child of the index, and the right child, the smallest is found and swapped into the index.
    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left_index = Self::heap_left(heap_index);
            if left_index >= self.limit {
                break;
            }

            let mut update_index = heap_index;
            if self.value_on_heap(left_index) < self.value_on_heap(update_index) {
                update_index = left_index;
            }

            let right_index = Self::heap_right(heap_index);
            if right_index < self.limit
                && self.value_on_heap(right_index) < self.value_on_heap(update_index)
            {
                update_index = right_index;
            }

            if update_index == heap_index {
                break;
            }
            self.swap_on_heap(heap_index, update_index);
            heap_index = update_index;
        }
    }

    /// Swaps the index with it's parent in the heap, while the parent is larger.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent_index = Self::heap_parent(heap_index);
            if self.value_on_heap(parent_index) <= self.value_on_heap(heap_index) {
                break;
            }
            self.swap_on_heap(heap_index, parent_index);
            heap_index = parent_index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 10_u32);
        test_heap.add(5, 20);
        test_heap.add(4, 30);
        test_heap.add(1, 60);
        test_heap.add(0, 70);
        for index in [6, 5, 4, 1, 0] {
            test_heap.activate(index);
        }

        assert_eq!(test_heap.pop_min(), Some(6));
        assert_eq!(test_heap.pop_min(), Some(5));
        assert_eq!(test_heap.pop_min(), Some(4));
        assert_eq!(test_heap.pop_min(), Some(1));
        assert_eq!(test_heap.pop_min(), Some(0));
    }

    #[test]
    fn heap_update() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 10_u32);
        test_heap.add(4, 30);
        test_heap.add(1, 60);
        test_heap.add(0, 70);
        for index in [6, 4, 1, 0] {
            test_heap.activate(index);
        }

        test_heap.revalue(0, 0);
        test_heap.revalue(1, 1);
        test_heap.revalue(4, 4);
        test_heap.revalue(6, 6);

        test_heap.heapify();

        assert_eq!(test_heap.pop_min(), Some(0));
        assert_eq!(test_heap.pop_min(), Some(1));
        assert_eq!(test_heap.pop_min(), Some(4));
        assert_eq!(test_heap.pop_min(), Some(6));
        assert!(test_heap.pop_min().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut test_heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            test_heap.add(index, index as u32);
            test_heap.activate(index);
        }

        assert!(test_heap.remove(4));
        assert!(!test_heap.remove(4));
        assert!(test_heap.remove(0));
        assert!(!test_heap.add(4, 10));
        assert!(!test_heap.add(4, 2));
        test_heap.activate(4);

        assert_eq!(test_heap.len(), 4);
        assert_eq!(test_heap.pop_min(), Some(1));
        assert_eq!(test_heap.pop_min(), Some(4));
        assert_eq!(test_heap.pop_min(), Some(5));
        assert_eq!(test_heap.pop_min(), Some(6));
    }

    #[test]
    fn heap_clear() {
        let mut test_heap = IndexHeap::default();
        for index in 0..10 {
            test_heap.add(index, 10 - index as u32);
            test_heap.activate(index);
        }
        test_heap.clear();
        assert!(test_heap.is_empty());
        assert!(!test_heap.is_active(3));

        test_heap.activate(3);
        test_heap.activate(7);
        assert_eq!(test_heap.pop_min(), Some(7));
    }
}
