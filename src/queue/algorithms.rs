use tracing::trace;

use crate::error::{Error, Result};
use crate::list::{Links, NodeId};
use crate::queue::{Element, Queue};

mod sort;

/// Finds the middle node of the list headed by `ghost`.
///
/// Two cursors start at both ends and step toward each other until they meet
/// or become adjacent; the backward one is returned. In a list of *n*
/// elements it is the node at index `(n - 1) / 2` counted from the tail,
/// i.e. `n / 2` counted from the head. The ghost itself is returned for an
/// empty list.
pub(crate) fn find_mid<T>(links: &Links<T>, ghost: NodeId) -> NodeId {
    let (mut forward, mut backward) = (links.next(ghost), links.prev(ghost));
    while forward != backward && links.next(forward) != backward {
        forward = links.next(forward);
        backward = links.prev(backward);
    }
    backward
}

impl Queue {
    /// Removes and releases the middle element.
    ///
    /// The middle of *n* elements is the one at index `n / 2` from the front,
    /// so in a queue of even length the second of the two central elements
    /// is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// for value in &["1", "2", "3", "4"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.delete_mid()?;
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["1", "2", "4"]);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn delete_mid(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let mid = find_mid(&self.links, self.ghost);
        trace!(?mid, "delete_mid");
        self.take(mid)
            .map(Element::release)
            .ok_or(Error::EmptyQueue)
    }

    /// Removes and releases every element whose value equals one of its
    /// neighbours, keeping only the values that occur once. Returns the number
    /// of removed elements.
    ///
    /// The queue must already be sorted (see [`Queue::sort`]); on an unsorted
    /// queue only adjacent runs of equal values are found.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// for value in &["a", "a", "b", "c", "c"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// assert_eq!(queue.delete_dup(), 4);
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["b"]);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn delete_dup(&mut self) -> usize {
        let ghost = self.ghost;
        let mut removed = 0;
        let mut front = self.links.next(ghost);
        while front != ghost {
            // find the run `front..=back` of values equal to `front`
            let mut back = front;
            loop {
                let next = self.links.next(back);
                if next == ghost || self.value(next) != self.value(front) {
                    break;
                }
                back = next;
            }
            let after = self.links.next(back);
            if back != front {
                let mut node = front;
                while node != after {
                    let next = self.links.next(node);
                    if let Some(element) = self.take(node) {
                        element.release();
                        removed += 1;
                    }
                    node = next;
                }
            }
            front = after;
        }
        trace!(removed, "delete_dup");
        removed
    }

    /// Swaps every two adjacent elements by relinking them. With an odd
    /// number of elements the last one stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// for value in &["1", "2", "3", "4", "5"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.swap_pairs();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["2", "1", "4", "3", "5"]);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost;
        let mut node = self.links.next(ghost);
        while node != ghost {
            let next = self.links.next(node);
            if next == ghost {
                break;
            }
            self.links.move_before(next, node);
            node = self.links.next(node);
        }
        trace!(len = self.size(), "swap_pairs");
    }

    /// Reverses the order of the elements in place.
    ///
    /// The unreversed region shrinks from both ends: its front node is moved
    /// to its back, and its back node to where the front was. The last two
    /// nodes, if any, are swapped directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// for value in &["1", "2", "3", "4"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.reverse();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["4", "3", "2", "1"]);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn reverse(&mut self) {
        // the unreversed region lies strictly between `before` and `after`
        let (mut before, mut after) = (self.ghost, self.ghost);
        loop {
            let (front, back) = (self.links.next(before), self.links.prev(after));
            if front == after || front == back {
                break;
            }
            if self.links.next(front) == back {
                self.links.move_after(front, back);
                break;
            }
            self.links.move_after(front, back);
            self.links.move_after(back, before);
            before = back;
            after = front;
        }
        trace!(len = self.size(), "reverse");
    }

    /// Sorts the queue in ascending byte-wise order of the values.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and
    /// *O*(log(*n*)) extra memory (one temporary ghost node per recursion
    /// level).
    ///
    /// # Current Implementation
    ///
    /// A top-down merge sort. The list is split at the same middle node as
    /// [`Queue::delete_mid`] finds, the front half is cut into a temporary
    /// list, both halves are sorted recursively and then merged back by
    /// relinking runs of nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationError`] if the temporary lists cannot be
    /// allocated. No element is lost in that case, but their order is
    /// unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// for value in &["pear", "apple", "fig", "Banana"] {
    ///     queue.insert_tail(value)?;
    /// }
    /// queue.sort()?;
    /// assert_eq!(
    ///     queue.iter().collect::<Vec<_>>(),
    ///     vec!["Banana", "apple", "fig", "pear"]
    /// );
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn sort(&mut self) -> Result<()> {
        let len = self.size();
        let depth = (usize::BITS - len.leading_zeros()) as usize;
        self.links.try_reserve(depth)?;
        trace!(len, depth, "sort");
        sort::merge_sort(&mut self.links, self.ghost, &mut |a: &Element, b: &Element| {
            a.value() < b.value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::find_mid;
    use crate::list::Links;
    use crate::queue::tests::{queue_of, values};

    #[test]
    fn find_mid_converges() {
        // (length, index of the middle node from the head)
        for &(len, mid) in &[(0, None), (1, Some(0)), (2, Some(1)), (3, Some(1)), (4, Some(2)), (5, Some(2)), (6, Some(3))] {
            let mut links = Links::new();
            let ghost = links.new_ghost().unwrap();
            for element in 0..len {
                let node = links.new_detached(element).unwrap();
                links.link_before(node, ghost);
            }
            let found = find_mid(&links, ghost);
            assert_eq!(links.element(found).copied(), mid, "length {}", len);
        }
    }

    #[test]
    fn delete_mid_removes_one() {
        fn test_delete_mid(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            assert!(queue.delete_mid().is_ok());
            assert_eq!(values(&queue), expected);
            assert_eq!(queue.size(), input.len() - 1);
        }
        test_delete_mid(&["1"], &[]);
        test_delete_mid(&["1", "2"], &["1"]);
        test_delete_mid(&["1", "2", "3"], &["1", "3"]);
        test_delete_mid(&["1", "2", "3", "4"], &["1", "2", "4"]);
        test_delete_mid(&["1", "2", "3", "4", "5"], &["1", "2", "4", "5"]);
        test_delete_mid(&["1", "2", "3", "4", "5", "6"], &["1", "2", "3", "5", "6"]);
    }

    #[test]
    fn delete_dup_removes_every_run() {
        fn test_delete_dup(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            assert_eq!(queue.delete_dup(), input.len() - expected.len());
            assert_eq!(values(&queue), expected);
        }
        test_delete_dup(&["a", "a", "b", "c", "c"], &["b"]);
        test_delete_dup(&["a", "b", "c"], &["a", "b", "c"]);
        test_delete_dup(&["a"], &["a"]);
        test_delete_dup(&[], &[]);
        test_delete_dup(&["a", "a"], &[]);
        test_delete_dup(&["a", "a", "a", "b"], &["b"]);
        test_delete_dup(&["a", "b", "b", "b"], &["a"]);
        test_delete_dup(&["", "", "x", "y", "y", "z"], &["x", "z"]);
    }

    #[test]
    fn swap_pairs_relinks_neighbours() {
        fn test_swap(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            queue.swap_pairs();
            assert_eq!(values(&queue), expected);
        }
        test_swap(&["1", "2", "3", "4", "5"], &["2", "1", "4", "3", "5"]);
        test_swap(&["1", "2", "3", "4"], &["2", "1", "4", "3"]);
        test_swap(&["1", "2"], &["2", "1"]);
        test_swap(&["1"], &["1"]);
        test_swap(&[], &[]);
    }

    #[test]
    fn reverse_in_place() {
        fn test_reverse(input: &[&str]) {
            let mut queue = queue_of(input);
            queue.reverse();
            let mut expected = input.to_vec();
            expected.reverse();
            assert_eq!(values(&queue), expected);
        }
        test_reverse(&["1", "2", "3", "4"]);
        test_reverse(&["1", "2", "3", "4", "5"]);
        test_reverse(&["1", "2", "3"]);
        test_reverse(&["1", "2"]);
        test_reverse(&["1"]);
        test_reverse(&[]);
        test_reverse(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[test]
    fn sort_queue() {
        let mut queue = queue_of(&["delta", "alpha", "", "charlie", "alpha", "bravo"]);
        queue.sort().unwrap();
        assert_eq!(
            values(&queue),
            vec!["", "alpha", "alpha", "bravo", "charlie", "delta"]
        );
        assert_eq!(queue.size(), 6);

        // byte-wise, not by locale or length
        let mut queue = queue_of(&["b", "B", "ab", "a", "\u{e9}", "z"]);
        queue.sort().unwrap();
        assert_eq!(values(&queue), vec!["B", "a", "ab", "b", "z", "\u{e9}"]);
    }
}
