//! Entry points taking nullable queue handles.
//!
//! Each function mirrors a [`Queue`] method, but accepts an absent queue
//! (`None`) and, for insertion, an absent string. Those are reported as a
//! failed result (`false`, `None` or `0`) or ignored, and never panic.
//!
//! ```
//! use cyclic_queue::handle;
//!
//! let mut queue = handle::create()?;
//! assert!(handle::insert_tail(Some(&mut queue), Some("a")));
//! assert!(!handle::insert_tail(Some(&mut queue), None));
//! assert!(!handle::insert_tail(None, Some("a")));
//! assert_eq!(handle::size(Some(&queue)), 1);
//! assert_eq!(handle::size(None), 0);
//!
//! let mut buf = [0u8; 8];
//! let element = handle::remove_head(Some(&mut queue), Some(&mut buf));
//! assert_eq!(element.map(|e| e.into_value()), Some("a".to_string()));
//! assert_eq!(&buf[..2], b"a\0");
//!
//! handle::destroy(Some(queue));
//! handle::destroy(None);
//! # Ok::<(), cyclic_queue::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::queue::{Element, Queue};

fn present<T>(handle: Option<T>) -> Result<T> {
    handle.ok_or(Error::InvalidHandle)
}

fn insert(
    queue: Option<&mut Queue>,
    value: Option<&str>,
    at: fn(&mut Queue, &str) -> Result<()>,
) -> Result<()> {
    let queue = present(queue)?;
    let value = present(value)?;
    at(queue, value)
}

/// Creates an empty queue. See [`Queue::new`].
pub fn create() -> Result<Queue> {
    Queue::new()
}

/// Releases every element of the queue, then the queue itself. Does nothing
/// for `None`.
pub fn destroy(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

/// Inserts a copy of `value` at the head. Returns `false`, without touching
/// the queue, if either argument is `None` or memory runs out.
pub fn insert_head(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    insert(queue, value, Queue::insert_head).is_ok()
}

/// Inserts a copy of `value` at the tail. See [`insert_head`].
pub fn insert_tail(queue: Option<&mut Queue>, value: Option<&str>) -> bool {
    insert(queue, value, Queue::insert_tail).is_ok()
}

/// Removes the head element, copying its value into `buf` (`buf.len()` is
/// the buffer size). See [`Queue::remove_head`].
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_head(buf)
}

/// Removes the tail element, copying its value into `buf`. See
/// [`Queue::remove_tail`].
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_tail(buf)
}

/// Returns the number of elements, or `0` for `None`.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Deletes the middle element. Returns `false` for `None` or an empty queue.
pub fn delete_middle(queue: Option<&mut Queue>) -> bool {
    present(queue).and_then(Queue::delete_mid).is_ok()
}

/// Deletes every element with a duplicated value from a sorted queue.
/// Returns `false` only for `None`.
pub fn delete_duplicates(queue: Option<&mut Queue>) -> bool {
    match queue {
        Some(queue) => {
            queue.delete_dup();
            true
        }
        None => false,
    }
}

/// Swaps every two adjacent elements. Does nothing for `None`.
pub fn swap_pairs(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap_pairs();
    }
}

/// Reverses the queue. Does nothing for `None`.
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Sorts the queue in ascending order. Does nothing for `None`.
///
/// When the temporary lists cannot be allocated the queue keeps all its
/// elements, in unspecified order.
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        let _ = queue.sort();
    }
}
