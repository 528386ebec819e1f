//! Cursors are borrowed views sitting on one node of a [`List`].
//!
//! They are the borrow-checked counterpart of [`Position`]: a cursor holds
//! the list borrowed, so it reads and moves without validating anything, and
//! the list cannot change under it except through the cursor itself.

use std::fmt;
use std::ptr::{self, NonNull};

use crate::error::PositionError;
use crate::list::{next_of, prev_of, List, Node};
use crate::Position;

/// A read-only cursor on an element node or on the ghost node of a [`List`].
///
/// A [`CursorMut`] converts into a `Cursor` (see [`CursorMut::as_cursor`] and
/// the `From` impl), never the other way.
///
/// # Examples
///
/// ```
/// use splice_list::{List, PositionError};
///
/// let list = List::from([1, 2]);
/// let mut cursor = list.cursor_at(list.begin());
/// assert_eq!(cursor.current(), Some(&1));
///
/// assert!(cursor.move_next().is_ok());
/// assert!(cursor.move_next().is_ok());
/// assert!(cursor.is_end());
/// assert_eq!(cursor.move_next(), Err(PositionError::Boundary));
/// ```
pub struct Cursor<'a, T> {
    list: &'a List<T>,
    node: NonNull<Node<T>>,
}

/// A cursor on a [`List`] that can read elements mutably and insert or
/// remove elements where it sits.
///
/// # Examples
///
/// ```
/// use splice_list::List;
///
/// let mut list = List::from([1, 3]);
/// let three = list.next(list.begin());
///
/// let mut cursor = list.cursor_mut_at(three);
/// cursor.insert(2);
/// assert_eq!(cursor.current(), Some(&3));
/// *cursor.current_mut().unwrap() = 4;
/// assert_eq!(Vec::from_iter(list), vec![1, 2, 4]);
/// ```
pub struct CursorMut<'a, T> {
    list: &'a mut List<T>,
    node: NonNull<Node<T>>,
}

/// The node after `node`, unless `node` is the ghost.
fn step_forward<T>(list: &List<T>, node: NonNull<Node<T>>) -> Result<NonNull<Node<T>>, PositionError> {
    if list.is_ghost(node) {
        return Err(PositionError::Boundary);
    }
    // SAFETY: cursors only sit on nodes of their list.
    Ok(unsafe { next_of(node) })
}

/// The node before `node`, unless that is the ghost.
fn step_backward<T>(list: &List<T>, node: NonNull<Node<T>>) -> Result<NonNull<Node<T>>, PositionError> {
    // SAFETY: cursors only sit on nodes of their list.
    let prev = unsafe { prev_of(node) };
    if list.is_ghost(prev) {
        return Err(PositionError::Boundary);
    }
    Ok(prev)
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, node: NonNull<Node<T>>) -> Self {
        Self { list, node }
    }

    /// The position the cursor sits on.
    pub fn position(&self) -> Position<T> {
        self.list.position_of(self.node)
    }

    /// Returns `true` if the cursor sits on the ghost node.
    pub fn is_end(&self) -> bool {
        self.list.is_ghost(self.node)
    }

    /// The element under the cursor, or `None` on the ghost node.
    ///
    /// The reference borrows the list, not the cursor, so the cursor may
    /// keep moving while it is held.
    pub fn current(&self) -> Option<&'a T> {
        self.list.element_of(self.node)
    }

    /// Moves to the next node. Fails with [`PositionError::Boundary`] on the
    /// ghost node.
    pub fn move_next(&mut self) -> Result<(), PositionError> {
        self.node = step_forward(self.list, self.node)?;
        Ok(())
    }

    /// Moves to the previous node. Fails with [`PositionError::Boundary`] on
    /// the first element, or on the ghost node of an empty list.
    pub fn move_prev(&mut self) -> Result<(), PositionError> {
        self.node = step_backward(self.list, self.node)?;
        Ok(())
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, node: NonNull<Node<T>>) -> Self {
        Self { list, node }
    }

    /// The position the cursor sits on.
    pub fn position(&self) -> Position<T> {
        self.list.position_of(self.node)
    }

    /// Returns `true` if the cursor sits on the ghost node.
    pub fn is_end(&self) -> bool {
        self.list.is_ghost(self.node)
    }

    /// The element under the cursor, or `None` on the ghost node.
    pub fn current(&self) -> Option<&T> {
        self.list.element_of(self.node)
    }

    /// The element under the cursor mutably, or `None` on the ghost node.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.element_mut_of(self.node)
    }

    /// Moves to the next node. Fails with [`PositionError::Boundary`] on the
    /// ghost node.
    pub fn move_next(&mut self) -> Result<(), PositionError> {
        self.node = step_forward(self.list, self.node)?;
        Ok(())
    }

    /// Moves to the previous node. Fails with [`PositionError::Boundary`] on
    /// the first element, or on the ghost node of an empty list.
    pub fn move_prev(&mut self) -> Result<(), PositionError> {
        self.node = step_backward(self.list, self.node)?;
        Ok(())
    }

    /// Inserts `elt` right before the cursor, which stays where it is.
    /// Returns the position of the new element.
    pub fn insert(&mut self, elt: T) -> Position<T> {
        // SAFETY: the cursor sits on a node of the list.
        let node = unsafe { self.list.link_before(self.node, elt) };
        self.list.position_of(node)
    }

    /// Removes the element under the cursor and moves the cursor to the node
    /// that followed it. Returns `None`, and changes nothing, on the ghost
    /// node.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut cursor = list.cursor_mut_at(list.begin());
    /// assert_eq!(cursor.remove(), Some(1));
    /// assert_eq!(cursor.remove(), Some(2));
    /// assert_eq!(cursor.remove(), None);
    /// assert!(cursor.is_end());
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        let node = self.node;
        if self.list.is_ghost(node) {
            return None;
        }
        // SAFETY: `node` is an element node of the list.
        unsafe {
            self.node = next_of(node);
            Some(self.list.unlink(node))
        }
    }

    /// A read-only cursor at the same node, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.node)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.list, cursor.node)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.node == other.node
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.current()).finish()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::list::cursor::Cursor;
    use crate::list::tests::contents;
    use crate::{List, PositionError};

    #[test]
    fn cursor_walks_both_ways() {
        let list = List::from([1, 2, 3]);
        let mut cursor = list.cursor_at(list.end());
        assert_eq!(cursor.current(), None);

        let mut seen: Vec<&i32> = Vec::new();
        while cursor.move_prev().is_ok() {
            seen.extend(cursor.current());
        }
        assert_eq!(seen, vec![&3, &2, &1]);
        assert_eq!(cursor.position(), list.begin());
        assert_eq!(cursor.move_prev(), Err(PositionError::Boundary));
        assert_eq!(cursor.position(), list.begin());
    }

    #[test]
    fn cursor_on_empty_list() {
        let mut list = List::<i32>::new();
        let mut cursor = list.cursor_at(list.begin());
        assert!(cursor.is_end());
        assert_eq!(cursor.move_next(), Err(PositionError::Boundary));
        assert_eq!(cursor.move_prev(), Err(PositionError::Boundary));

        let mut cursor = list.cursor_mut_at(list.end());
        assert_eq!(cursor.current_mut(), None);
        assert_eq!(cursor.remove(), None);
        let one = cursor.insert(1);
        assert!(cursor.is_end());
        assert_eq!(list.get(one), Ok(&1));
        list.assert_ring();
    }

    #[test]
    fn cursor_copies_are_independent() {
        let list = List::from([1, 2]);
        let first = list.cursor_at(list.begin());
        let mut second = first;
        assert_eq!(first, second);
        second.move_next().unwrap();
        assert_ne!(first, second);
        assert_eq!(first.current(), Some(&1));
        assert_eq!(second.current(), Some(&2));
        assert_eq!(format!("{:?}", second), "Cursor(Some(2))");

        let other = List::from([1, 2]);
        assert_ne!(first, other.cursor_at(other.begin()));
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut list = List::from([1, 2, 4]);
        let four = list.prev(list.end());
        let mut cursor = list.cursor_mut_at(four);
        let three = cursor.insert(3);
        assert_eq!(cursor.current(), Some(&4));
        cursor.move_prev().unwrap();
        assert_eq!(cursor.position(), three);
        cursor.move_prev().unwrap();
        assert_eq!(cursor.remove(), Some(2));
        assert_eq!(cursor.position(), three);
        assert_eq!(contents(&list), vec![1, 3, 4]);
        assert_eq!(list.len(), 3);
        list.assert_ring();
    }

    #[test]
    fn cursor_mut_becomes_read_only() {
        let mut list = List::from([5, 6]);
        let six = list.next(list.begin());
        let mut cursor = list.cursor_mut_at(six);
        *cursor.current_mut().unwrap() += 1;
        assert_eq!(cursor.as_cursor().current(), Some(&7));

        let read_only = Cursor::from(cursor);
        assert_eq!(read_only.current(), Some(&7));
        assert_eq!(read_only.position(), six);
    }
}
