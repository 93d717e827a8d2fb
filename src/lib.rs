//! This crate provides a double-ended queue of owned strings, implemented as a
//! cyclic doubly-linked list with a ghost node.
//!
//! Besides inserting and removing at both ends in constant time, the
//! [`Queue`] offers structural algorithms that only relink nodes: deleting
//! the middle element, deleting duplicated values, swapping adjacent pairs,
//! reversing and a stable merge sort.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new()?;
//! for value in &["b", "a", "c", "a"] {
//!     queue.insert_tail(value)?;
//! }
//!
//! queue.sort()?; // becomes [a, a, b, c]
//! assert_eq!(queue.delete_dup(), 2); // becomes [b, c]
//! queue.insert_head("z")?; // becomes [z, b, c]
//! queue.reverse(); // becomes [c, b, z]
//!
//! let mut buf = [0u8; 4];
//! let element = queue.remove_head(Some(&mut buf)).unwrap();
//! assert_eq!(element.value(), "c");
//! assert_eq!(&buf, b"c\0\0\0");
//! element.release();
//!
//! assert_eq!(queue.iter().collect::<Vec<_>>(), vec!["b", "z"]);
//! # Ok::<(), cyclic_queue::Error>(())
//! ```
//!
//! # Memory Layout
//!
//! All nodes of a queue live in one arena and refer to each other by index:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║  Element  ║           ║  Element  ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   links   ║ (the arena of nodes)
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! Each element node owns an [`Element`], which holds a string buffer of
//! exactly the length of its value. The ghost node has *NO* payload.
//!
//! Initially, there is a ghost node in an empty queue, of which the `next` and
//! `prev` links point to itself. As elements are inserted, `ghost.next` refers
//! to the first element, and `ghost.prev` to the last one.
//!
//! Freed nodes are kept on a free list inside the arena and reused by later
//! insertions. The merge sort borrows temporary ghost nodes from the same
//! arena, so cutting a list in two and splicing it back are constant-time.
//!
//! # Handles
//!
//! The [`handle`] module exposes the same operations as free functions over
//! nullable handles (`Option<&mut Queue>`), reporting absent queues or strings
//! as failures instead of panicking.
//!
//! # Features
//!
//! - `length` (default): cache the number of elements, so [`Queue::size`]
//!   takes *O*(1) instead of *O*(*n*) time.
//!
//! [`Queue::size`]: crate::Queue::size

mod error;
mod list;
mod queue;

pub mod handle;

#[cfg(test)]
mod test_util;

pub use error::{Error, Result};
#[doc(inline)]
pub use queue::{copy_value, Element, Iter, Queue};
