use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::Result;
use crate::list::{self, Links, NodeId};

mod algorithms;

/// A double-ended queue of owned strings, implemented as a cyclic list with a
/// ghost node.
///
/// Inserting and removing at either end take constant time. The structural
/// algorithms ([`delete_mid`], [`delete_dup`], [`swap_pairs`], [`reverse`]
/// and [`sort`]) work by relinking nodes in place; no element value is ever
/// copied or moved between nodes.
///
/// The `Queue` contains:
/// - the node arena of its list, where each element lives in one slot
///   together with its links;
/// - the index of its ghost node;
/// - a length field `len` indicating the length of the queue. It can be
///   disabled by disabling the `length` feature in your `Cargo.toml`:
/// ```text
/// [dependencies]
/// cyclic_queue = { default-features = false }
/// ```
///
/// [`delete_mid`]: Queue::delete_mid
/// [`delete_dup`]: Queue::delete_dup
/// [`swap_pairs`]: Queue::swap_pairs
/// [`reverse`]: Queue::reverse
/// [`sort`]: Queue::sort
pub struct Queue {
    links: Links<Element>,
    ghost: NodeId,
    #[cfg(feature = "length")]
    /// the length of the queue
    len: usize,
}

/// An entry of a [`Queue`]: one owned string.
///
/// Elements removed from a queue are owned by the caller, who releases them
/// with [`Element::release`] (or simply by dropping them).
pub struct Element {
    value: String,
}

impl Element {
    /// Copy `value` into a new buffer of exactly `value.len()` bytes.
    fn new(value: &str) -> Result<Self> {
        let mut buf = String::new();
        buf.try_reserve_exact(value.len())?;
        buf.push_str(value);
        Ok(Self { value: buf })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Frees the string buffer and the element itself.
    pub fn release(self) {}
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value).finish()
    }
}

/// Copies as much of `value` as fits into `buf`, followed by a `0`
/// terminator, and zero-fills the rest of `buf`.
///
/// At most `buf.len() - 1` bytes of `value` are copied. Nothing is written
/// into an empty buffer. Returns the number of bytes of `value` copied.
///
/// # Examples
///
/// ```
/// use cyclic_queue::copy_value;
///
/// let mut buf = [0xff; 4];
/// assert_eq!(copy_value("hello", &mut buf), 3);
/// assert_eq!(&buf, b"hel\0");
///
/// let mut buf = [0xff; 4];
/// assert_eq!(copy_value("a", &mut buf), 1);
/// assert_eq!(&buf, b"a\0\0\0");
///
/// assert_eq!(copy_value("a", &mut []), 0);
/// ```
pub fn copy_value(value: &str, buf: &mut [u8]) -> usize {
    let capacity = match buf.len().checked_sub(1) {
        Some(capacity) => capacity,
        None => return 0,
    };
    let copied = value.len().min(capacity);
    buf[..copied].copy_from_slice(&value.as_bytes()[..copied]);
    buf[copied..].fill(0);
    copied
}

// private methods
impl Queue {
    fn new_node(&mut self, value: &str) -> Result<NodeId> {
        let element = Element::new(value)?;
        // `element` and its buffer are dropped here if no node is available
        self.links.new_detached(element)
    }

    /// Unlinks `node` and hands its element back, or returns `None` for the
    /// ghost node.
    fn take(&mut self, node: NodeId) -> Option<Element> {
        if node == self.ghost {
            return None;
        }
        self.links.unlink(node);
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        self.links.release(node)
    }

    fn value(&self, node: NodeId) -> Option<&str> {
        self.links.element(node).map(Element::value)
    }
}

impl Queue {
    /// Creates an empty `Queue`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationError`] if the ghost node cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let queue = Queue::new()?;
    /// assert!(queue.is_empty());
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    ///
    /// [`Error::AllocationError`]: crate::Error::AllocationError
    pub fn new() -> Result<Self> {
        Self::with_capacity(0)
    }

    /// Creates an empty `Queue` with room for at least `capacity` elements
    /// before its node arena grows.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut links = Links::new();
        links.try_reserve(capacity.saturating_add(1))?;
        let ghost = links.new_ghost()?;
        trace!(capacity, "queue created");
        Ok(Self {
            links,
            ghost,
            #[cfg(feature = "length")]
            len: 0,
        })
    }

    /// Releases every element, then the ghost node.
    pub fn destroy(mut self) {
        self.clear();
        self.links.release_ghost(self.ghost);
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty(self.ghost)
    }

    /// Returns the number of elements. Enabled by `feature = "length"`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[cfg(feature = "length")]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[cfg(not(feature = "length"))]
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Same as [`Queue::size`].
    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Copies `value` into a new element at the front of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationError`] if either the string buffer or the
    /// node cannot be allocated; the queue is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// queue.insert_head("b")?;
    /// queue.insert_head("a")?;
    /// assert_eq!(queue.front(), Some("a"));
    /// assert_eq!(queue.back(), Some("b"));
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    ///
    /// [`Error::AllocationError`]: crate::Error::AllocationError
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        let node = self.new_node(value)?;
        self.links.link_after(node, self.ghost);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        Ok(())
    }

    /// Copies `value` into a new element at the back of the queue.
    ///
    /// # Errors
    ///
    /// Same as [`Queue::insert_head`].
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        let node = self.new_node(value)?;
        self.links.link_before(node, self.ghost);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        Ok(())
    }

    /// Removes the first element and returns it, or `None` if the queue is
    /// empty.
    pub fn pop_front(&mut self) -> Option<Element> {
        let front = self.links.next(self.ghost);
        self.take(front)
    }

    /// Removes the last element and returns it, or `None` if the queue is
    /// empty.
    pub fn pop_back(&mut self) -> Option<Element> {
        let back = self.links.prev(self.ghost);
        self.take(back)
    }

    /// Removes the first element and returns it, or `None` if the queue is
    /// empty.
    ///
    /// If `buf` is given, the removed value is copied into it with
    /// [`copy_value`]. Nothing is written when the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// queue.insert_tail("dolphin")?;
    /// queue.insert_tail("bear")?;
    ///
    /// let mut buf = [0u8; 5];
    /// let element = queue.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(element.value(), "dolphin");
    /// assert_eq!(&buf, b"dolp\0");
    /// element.release();
    ///
    /// assert_eq!(queue.remove_head(None).unwrap().value(), "bear");
    /// assert!(queue.remove_head(Some(&mut buf)).is_none());
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.pop_front()?;
        if let Some(buf) = buf {
            copy_value(element.value(), buf);
        }
        Some(element)
    }

    /// Removes the last element and returns it, or `None` if the queue is
    /// empty. See [`Queue::remove_head`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.pop_back()?;
        if let Some(buf) = buf {
            copy_value(element.value(), buf);
        }
        Some(element)
    }

    /// Removes and releases all elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        while let Some(element) = self.pop_front() {
            element.release();
        }
    }

    /// Provides a reference to the front value, or `None` if the queue is
    /// empty.
    pub fn front(&self) -> Option<&str> {
        self.value(self.links.next(self.ghost))
    }

    /// Provides a reference to the back value, or `None` if the queue is
    /// empty.
    pub fn back(&self) -> Option<&str> {
        self.value(self.links.prev(self.ghost))
    }

    /// Provides a double-ended iterator over the values, from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new()?;
    /// queue.insert_tail("x")?;
    /// queue.insert_tail("y")?;
    ///
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["x", "y"]);
    /// assert_eq!(queue.iter().rev().collect::<Vec<_>>(), vec!["y", "x"]);
    /// # Ok::<(), cyclic_queue::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.links.iter(self.ghost),
        }
    }

    /// Checks that the list is circular and doubly consistent in both
    /// directions, and panics otherwise.
    pub fn assert_valid(&self) {
        let walked = self.links.assert_valid(self.ghost);
        #[cfg(feature = "length")]
        assert_eq!(
            walked, self.len,
            "cached length differs from the number of linked elements"
        );
        #[cfg(not(feature = "length"))]
        let _ = walked;
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the values of a [`Queue`].
///
/// This `struct` is created by [`Queue::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: list::Iter<'a, Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Element::value)
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Element::value)
    }
}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
