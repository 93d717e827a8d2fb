use std::mem;

use crate::error::Result;

pub use iterator::Iter;

pub mod iterator;

/// The node arena behind one or more cyclic lists.
///
/// Every node lives in a slot of the arena and refers to its neighbours by
/// index. A list is identified by its ghost node: a node with *NO* payload, of
/// which the `next` and `prev` links point to itself when the list is empty.
/// As elements are linked into the list, `ghost.next` refers to the first
/// element and `ghost.prev` to the last one.
///
/// Several lists may share one arena, which is what allows splicing and
/// cutting between them in constant time.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - a *detached* node is linked to itself only, and belongs to no list.
pub struct Links<T> {
    nodes: Vec<Node<T>>,
    /// head of the free list threaded through vacant slots
    vacant: Option<NodeId>,
}

/// Index of a node in its [`Links`] arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

struct Node<T> {
    next: NodeId,
    prev: NodeId,
    slot: Slot<T>,
}

enum Slot<T> {
    Ghost,
    Element(T),
    Vacant(Option<NodeId>),
}

// private methods
impl<T> Links<T> {
    fn alloc(&mut self, slot: Slot<T>) -> Result<NodeId> {
        if let Some(id) = self.vacant {
            let node = &mut self.nodes[id.0];
            self.vacant = match node.slot {
                Slot::Vacant(next) => next,
                _ => None,
            };
            node.slot = slot;
            node.next = id;
            node.prev = id;
            return Ok(id);
        }
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            next: id,
            prev: id,
            slot,
        });
        Ok(id)
    }

    fn free(&mut self, id: NodeId) -> Slot<T> {
        let node = &mut self.nodes[id.0];
        node.next = id;
        node.prev = id;
        let slot = mem::replace(&mut node.slot, Slot::Vacant(self.vacant));
        self.vacant = Some(id);
        slot
    }

    fn connect(&mut self, prev: NodeId, next: NodeId) {
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
    }

    fn attach(&mut self, prev: NodeId, next: NodeId, node: NodeId) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        debug_assert!(self.is_detached(node), "{:?} is still linked", node);
        self.connect(prev, node);
        self.connect(node, next);
    }

    fn is_detached(&self, node: NodeId) -> bool {
        self.next(node) == node && self.prev(node) == node
    }

    fn assert_adjacent(&self, prev: NodeId, next: NodeId) {
        assert_eq!(
            self.next(prev),
            next,
            "{:?}.next does not point to {:?}",
            prev,
            next
        );
        assert_eq!(
            self.prev(next),
            prev,
            "{:?}.prev does not point to {:?}",
            next,
            prev
        );
    }
}

impl<T> Links<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            vacant: None,
        }
    }

    /// Reserves room for at least `additional` more nodes.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Allocates a ghost node heading a new, empty list.
    pub(crate) fn new_ghost(&mut self) -> Result<NodeId> {
        self.alloc(Slot::Ghost)
    }

    /// Frees the ghost node of an empty list. Does nothing if `ghost` is not
    /// a ghost node.
    pub(crate) fn release_ghost(&mut self, ghost: NodeId) {
        debug_assert!(self.is_empty(ghost), "releasing the ghost of a non-empty list");
        if self.is_ghost(ghost) {
            self.free(ghost);
        }
    }

    /// Allocates a detached node holding `element`.
    pub(crate) fn new_detached(&mut self, element: T) -> Result<NodeId> {
        self.alloc(Slot::Element(element))
    }

    /// Frees a detached element node and returns its payload, or returns
    /// `None` if `node` is not an element node.
    pub(crate) fn release(&mut self, node: NodeId) -> Option<T> {
        debug_assert!(self.is_detached(node), "releasing a linked node");
        if !matches!(self.nodes[node.0].slot, Slot::Element(_)) {
            return None;
        }
        match self.free(node) {
            Slot::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn next(&self, node: NodeId) -> NodeId {
        self.nodes[node.0].next
    }

    pub(crate) fn prev(&self, node: NodeId) -> NodeId {
        self.nodes[node.0].prev
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<&T> {
        match &self.nodes[node.0].slot {
            Slot::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn is_ghost(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].slot, Slot::Ghost)
    }

    /// Returns `true` if the list headed by `ghost` has no element.
    pub(crate) fn is_empty(&self, ghost: NodeId) -> bool {
        self.next(ghost) == ghost
    }

    /// Returns `true` if the list headed by `ghost` has exactly one element.
    pub(crate) fn is_singular(&self, ghost: NodeId) -> bool {
        !self.is_empty(ghost) && self.next(ghost) == self.prev(ghost)
    }

    /// Links the detached `node` right after `at`.
    pub(crate) fn link_after(&mut self, node: NodeId, at: NodeId) {
        let next = self.next(at);
        self.attach(at, next, node);
    }

    /// Links the detached `node` right before `at`.
    pub(crate) fn link_before(&mut self, node: NodeId, at: NodeId) {
        let prev = self.prev(at);
        self.attach(prev, at, node);
    }

    /// Removes `node` from its list, leaving it detached. The node is not
    /// freed.
    pub(crate) fn unlink(&mut self, node: NodeId) {
        debug_assert!(!self.is_ghost(node), "unlinking a ghost node");
        let (prev, next) = (self.prev(node), self.next(node));
        self.connect(prev, next);
        self.connect(node, node);
    }

    pub(crate) fn move_after(&mut self, node: NodeId, at: NodeId) {
        if node == at {
            return;
        }
        self.unlink(node);
        self.link_after(node, at);
    }

    pub(crate) fn move_before(&mut self, node: NodeId, at: NodeId) {
        if node == at {
            return;
        }
        self.unlink(node);
        self.link_before(node, at);
    }

    /// Moves the range `front..=back` right before `at`.
    ///
    /// `at` must not be inside `front..=back`, otherwise the lists involved
    /// become ill-formed.
    pub(crate) fn move_range_before(&mut self, front: NodeId, back: NodeId, at: NodeId) {
        let (before, after) = (self.prev(front), self.next(back));
        self.connect(before, after);
        let prev = self.prev(at);
        self.connect(prev, front);
        self.connect(back, at);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, front);
            self.assert_adjacent(back, at);
        }
    }

    /// Moves all elements of the list `src` to the front of the list `dst`.
    /// After this operation, `src` becomes empty.
    pub(crate) fn splice(&mut self, src: NodeId, dst: NodeId) {
        if self.is_empty(src) {
            return;
        }
        let (front, back) = (self.next(src), self.prev(src));
        let after = self.next(dst);
        self.connect(dst, front);
        self.connect(back, after);
        self.connect(src, src);
    }

    /// Moves all elements of the list `src` to the back of the list `dst`.
    /// After this operation, `src` becomes empty.
    pub(crate) fn splice_tail(&mut self, src: NodeId, dst: NodeId) {
        if self.is_empty(src) {
            return;
        }
        let (front, back) = (self.next(src), self.prev(src));
        let before = self.prev(dst);
        self.connect(before, front);
        self.connect(back, dst);
        self.connect(src, src);
    }

    /// Detaches the elements `src.next..=cut` into the empty list `dst`.
    ///
    /// Cutting at `src` itself detaches nothing.
    pub(crate) fn cut_at(&mut self, dst: NodeId, src: NodeId, cut: NodeId) {
        debug_assert!(self.is_empty(dst), "cutting into a non-empty list");
        if cut == src {
            return;
        }
        let (front, after) = (self.next(src), self.next(cut));
        self.connect(src, after);
        self.connect(dst, front);
        self.connect(cut, dst);
    }

    /// Provides a forward iterator over the list headed by `ghost`.
    pub(crate) fn iter(&self, ghost: NodeId) -> Iter<'_, T> {
        Iter::new(self, ghost)
    }

    /// Walks the list headed by `ghost` in both directions and panics if the
    /// links are not circular and doubly consistent, or if a node other than
    /// `ghost` on the cycle is not an element. Returns the number of elements.
    pub(crate) fn assert_valid(&self, ghost: NodeId) -> usize {
        assert!(self.is_ghost(ghost), "{:?} is not a ghost node", ghost);
        let mut forward = Vec::new();
        let mut node = self.next(ghost);
        while node != ghost {
            assert!(
                forward.len() < self.nodes.len(),
                "the cycle from {:?} never returns to it",
                ghost
            );
            assert!(
                self.element(node).is_some(),
                "{:?} in the list of {:?} is not an element node",
                node,
                ghost
            );
            self.assert_adjacent(self.prev(node), node);
            forward.push(node);
            node = self.next(node);
        }
        self.assert_adjacent(self.prev(ghost), ghost);

        let mut node = self.prev(ghost);
        for &expected in forward.iter().rev() {
            assert_eq!(node, expected, "backward walk diverges from forward walk");
            node = self.prev(node);
        }
        assert_eq!(node, ghost, "backward walk does not return to the ghost");
        forward.len()
    }
}

#[cfg(test)]
impl<T> Links<T> {
    /// Number of slots ever allocated, vacant ones included.
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Links, NodeId};

    fn list_of(links: &mut Links<i32>, elements: &[i32]) -> NodeId {
        let ghost = links.new_ghost().unwrap();
        for &element in elements {
            let node = links.new_detached(element).unwrap();
            links.link_before(node, ghost);
        }
        ghost
    }

    fn collect(links: &Links<i32>, ghost: NodeId) -> Vec<i32> {
        links.assert_valid(ghost);
        links.iter(ghost).copied().collect()
    }

    fn nth(links: &Links<i32>, ghost: NodeId, n: usize) -> NodeId {
        (0..=n).fold(ghost, |node, _| links.next(node))
    }

    #[test]
    fn list_create() {
        let mut links = Links::new();
        let ghost = links.new_ghost().unwrap();
        assert!(links.is_empty(ghost));
        assert!(!links.is_singular(ghost));
        assert_eq!(links.assert_valid(ghost), 0);

        let node = links.new_detached(1).unwrap();
        links.link_after(node, ghost);
        assert!(!links.is_empty(ghost));
        assert!(links.is_singular(ghost));
        assert_eq!(links.assert_valid(ghost), 1);

        links.unlink(node);
        assert!(links.is_empty(ghost));
        assert_eq!(links.release(node), Some(1));
        links.release_ghost(ghost);
    }

    #[test]
    fn list_link_after_and_before() {
        let mut links = Links::new();
        let ghost = list_of(&mut links, &[2]);
        let first = links.next(ghost);

        let node = links.new_detached(1).unwrap();
        links.link_before(node, first);
        let node = links.new_detached(3).unwrap();
        links.link_after(node, first);
        let node = links.new_detached(4).unwrap();
        links.link_before(node, ghost);
        let node = links.new_detached(0).unwrap();
        links.link_after(node, ghost);

        assert_eq!(collect(&links, ghost), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn list_release_ghost_is_not_an_element() {
        let mut links = Links::<i32>::new();
        let ghost = links.new_ghost().unwrap();
        assert_eq!(links.release(ghost), None);
        assert!(links.is_ghost(ghost));
        assert_eq!(links.assert_valid(ghost), 0);
    }

    #[test]
    fn list_reuses_vacant_slots() {
        let mut links = Links::new();
        let ghost = list_of(&mut links, &[1, 2, 3]);
        let second = nth(&links, ghost, 1);
        links.unlink(second);
        assert_eq!(links.release(second), Some(2));

        let node = links.new_detached(5).unwrap();
        assert_eq!(node, second);
        links.link_before(node, ghost);
        assert_eq!(collect(&links, ghost), vec![1, 3, 5]);
    }

    #[test]
    fn list_move() {
        let mut links = Links::new();
        let ghost = list_of(&mut links, &[0, 1, 2, 3]);
        let (first, last) = (links.next(ghost), links.prev(ghost));

        links.move_after(first, last);
        assert_eq!(collect(&links, ghost), vec![1, 2, 3, 0]);

        links.move_before(last, links.next(ghost));
        assert_eq!(collect(&links, ghost), vec![3, 1, 2, 0]);

        // moving a node next to itself is a no-op
        links.move_after(last, last);
        links.move_before(first, first);
        assert_eq!(collect(&links, ghost), vec![3, 1, 2, 0]);
    }

    #[test]
    fn list_move_range() {
        let mut links = Links::new();
        let ghost = list_of(&mut links, &[0, 1, 2, 3, 4, 5]);
        let (front, back) = (nth(&links, ghost, 3), nth(&links, ghost, 4));
        links.move_range_before(front, back, nth(&links, ghost, 1));
        assert_eq!(collect(&links, ghost), vec![0, 3, 4, 1, 2, 5]);

        // to the position it already occupies
        let (front, back) = (nth(&links, ghost, 1), nth(&links, ghost, 2));
        links.move_range_before(front, back, nth(&links, ghost, 3));
        assert_eq!(collect(&links, ghost), vec![0, 3, 4, 1, 2, 5]);

        // across lists
        let other = list_of(&mut links, &[9]);
        let (front, back) = (links.next(ghost), links.prev(ghost));
        links.move_range_before(front, back, links.next(other));
        assert_eq!(collect(&links, ghost), vec![]);
        assert_eq!(collect(&links, other), vec![0, 3, 4, 1, 2, 5, 9]);
    }

    #[test]
    fn list_splice() {
        fn test_list_splice(list: &[i32], other: &[i32], tail: bool, spliced: &[i32]) {
            let mut links = Links::new();
            let dst = list_of(&mut links, list);
            let src = list_of(&mut links, other);
            if tail {
                links.splice_tail(src, dst);
            } else {
                links.splice(src, dst);
            }
            assert!(links.is_empty(src));
            assert_eq!(collect(&links, src), vec![]);
            assert_eq!(collect(&links, dst), spliced.to_vec());
        }
        test_list_splice(&[0, 1, 2], &[3, 4], true, &[0, 1, 2, 3, 4]);
        test_list_splice(&[0, 1, 2], &[3, 4], false, &[3, 4, 0, 1, 2]);
        test_list_splice(&[], &[3, 4], true, &[3, 4]);
        test_list_splice(&[], &[3, 4], false, &[3, 4]);
        test_list_splice(&[0, 1], &[], true, &[0, 1]);
        test_list_splice(&[0, 1], &[], false, &[0, 1]);
        test_list_splice(&[], &[], false, &[]);
        test_list_splice(&[0], &[1], false, &[1, 0]);
    }

    #[test]
    fn list_cut() {
        fn test_list_cut(list: &[i32], at: Option<usize>, cut: &[i32], rest: &[i32]) {
            let mut links = Links::new();
            let src = list_of(&mut links, list);
            let dst = links.new_ghost().unwrap();
            let cut_node = at.map_or(src, |at| nth(&links, src, at));
            links.cut_at(dst, src, cut_node);
            assert_eq!(collect(&links, dst), cut.to_vec());
            assert_eq!(collect(&links, src), rest.to_vec());
        }
        test_list_cut(&[0, 1, 2, 3], Some(1), &[0, 1], &[2, 3]);
        test_list_cut(&[0, 1, 2, 3], Some(0), &[0], &[1, 2, 3]);
        test_list_cut(&[0, 1, 2, 3], Some(3), &[0, 1, 2, 3], &[]);
        test_list_cut(&[0, 1, 2, 3], None, &[], &[0, 1, 2, 3]);
        test_list_cut(&[], None, &[], &[]);
    }

    #[test]
    #[should_panic]
    fn list_assert_valid_detects_broken_links() {
        let mut links = Links::new();
        let ghost = list_of(&mut links, &[0, 1, 2]);
        let (first, last) = (links.next(ghost), links.prev(ghost));
        // a forward link that skips the middle node, without fixing `prev`
        links.nodes[first.0].next = last;
        links.assert_valid(ghost);
    }
}
