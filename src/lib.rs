//! This crate provides a doubly-linked list with owned nodes, implemented as a
//! cyclic list anchored by a ghost node.
//!
//! The [`List`] inserts and removes elements at any given position in constant
//! time, and splices ranges between lists by relinking nodes, never copying
//! or moving an element. Positions are either borrowed, as cursors, or
//! detached, as [`Position`]s that can be held while the list is modified and
//! are checked each time they are used.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use splice_list::List;
//!
//! let mut l1 = List::from([1, 2, 3, 4]);
//! let mut l2 = List::from([5, 6, 7, 8]);
//!
//! // Move `6, 7` of `l2` right before `3` in `l1`. The nodes are relinked,
//! // so no element is copied.
//! let pos = l1.next(l1.next(l1.begin()));
//! let start = l2.next(l2.begin());
//! let end = l2.prev(l2.end());
//! l1.splice(pos, &mut l2, start, end);
//! assert_eq!(Vec::from_iter(l1.iter().copied()), vec![1, 2, 6, 7, 3, 4]);
//! assert_eq!(Vec::from_iter(l2.iter().copied()), vec![5, 8]);
//!
//! // Positions follow their nodes.
//! assert_eq!(l1.get(start), Ok(&6));
//!
//! // Erase the first three elements.
//! let end = l1.next(l1.next(l1.next(l1.begin())));
//! l1.erase_range(l1.begin(), end);
//! assert_eq!(Vec::from_iter(l1), vec![7, 3, 4]);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║   stamp   ║           ║   stamp   ║                        │   stamp   │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   nodes   ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `ghost` that points to the ghost node, which is allocated once
//!   and lives as long as the list, so moving the `List` value keeps it in
//!   place;
//! - a registry `nodes` of the element nodes it owns. It gives the length of
//!   the list, and tells whether a [`Position`] belongs to the list.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - a `stamp` that is unique in the process, so a position of an erased node is
//!   never mistaken for a node allocated later at the same address;
//! - the actual payload `T` that depends on the element type of the list, except
//!   the ghost node.
//!
//! The ghost node has the layout of an element node, so it is aligned for `T`,
//! but its payload slot is never initialized.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself.
//!
//! As elements are inserted into the list, `ghost.next` points to the first element,
//! and `ghost.prev` points to the last element of the list.
//!
//! # Positions
//!
//! [`List::begin`] and [`List::end`] give the first position and the position one
//! past the last element. A [`Position`] is `Copy` and does not borrow the list.
//! Operations taking positions report a [`PositionError`] (or panic, for the
//! editing ones) when a position is not a live node of the list.
//!
//! - [`insert`]: insert a new element before a position;
//! - [`erase`]: remove the element at a position;
//! - [`erase_range`]: remove the elements of a half-open range;
//! - [`splice`]: move a range of nodes from another list;
//! - [`splice_within`]: move a range of nodes inside the list;
//! - [`swap`]: exchange the contents of two lists.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ## Examples
//!
//! ```
//! use splice_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! [`List::cursor_at`] and [`List::cursor_mut_at`] give a [`Cursor`] or a
//! [`CursorMut`] sitting on a position. A cursor borrows the list, so it moves
//! and reads without any check, and stops at the ghost node like positions do.
//! A [`CursorMut`] can also insert before itself and remove the element under
//! it. It turns into a [`Cursor`], never the reverse, just as an [`IterMut`]
//! turns into an [`Iter`].
//!
//! ## Examples
//!
//! ```
//! use splice_list::List;
//!
//! let mut list = List::from([1, 2, 4]);
//!
//! let mut cursor = list.cursor_mut_at(list.begin());
//! assert_eq!(cursor.remove(), Some(1)); // becomes [2, 4], points to 2
//! assert!(cursor.move_next().is_ok());
//! cursor.insert(3); // becomes [2, 3, 4], still points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![2, 3, 4]);
//! ```
//!
//! # Logging
//!
//! Bulk relinking (splices, swaps, range erasures, clears) is reported through
//! the [`log`] facade at `trace` level, and rolled back copies at `debug` level.
//! Nothing is printed unless the application installs a logger.
//!
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: List::insert
//! [`erase`]: List::erase
//! [`erase_range`]: List::erase_range
//! [`splice`]: List::splice
//! [`splice_within`]: List::splice_within
//! [`swap`]: List::swap

#[doc(inline)]
pub use error::PositionError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::position::Position;
#[doc(inline)]
pub use list::List;

pub mod list;

mod error;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Trace)
        .init();
}
