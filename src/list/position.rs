use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::PositionError;
use crate::list::cursor::{Cursor, CursorMut};
use crate::list::{move_nodes, next_of, prev_of, stamp_of, List, Node};

/// A detached position in a [`List`]: either an element node, or the end
/// position (the ghost node).
///
/// A `Position` does not borrow the list, so the list may be modified while
/// positions are held. Every operation taking a position checks it against
/// the list first:
///
/// - the end position of a list is valid for as long as the list lives, and
///   never moves to another list;
/// - the position of an element is valid for as long as the element's node
///   lives. It follows the node when the node is spliced or swapped into
///   another list, and becomes stale (reported as
///   [`PositionError::Foreign`]) once the node is erased.
///
/// Two positions are equal when they denote the same node.
///
/// # Examples
///
/// ```
/// use splice_list::{List, PositionError};
///
/// let mut list = List::from([1, 2, 3]);
/// let two = list.next(list.begin());
/// assert_eq!(list.get(two), Ok(&2));
///
/// list.push_front(0);
/// assert_eq!(list.get(two), Ok(&2));
///
/// list.erase(two);
/// assert_eq!(list.get(two), Err(PositionError::Foreign));
/// ```
pub struct Position<T> {
    node: NonNull<Node<T>>,
    stamp: u64,
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state)
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("node", &self.node)
            .field("stamp", &self.stamp)
            .finish()
    }
}

// private methods
impl<T> List<T> {
    pub(crate) fn position_of(&self, node: NonNull<Node<T>>) -> Position<T> {
        // SAFETY: callers only pass the ghost node or element nodes of the list.
        let stamp = unsafe { stamp_of(node) };
        Position { node, stamp }
    }

    /// Resolve a position to a node of the list: the ghost node, or an element
    /// node in the registry that still carries the stamp of the position.
    fn resolve(&self, pos: Position<T>) -> Result<NonNull<Node<T>>, PositionError> {
        let owned = self.is_ghost(pos.node) || self.nodes.contains(&pos.node);
        // SAFETY: owned nodes are alive, so reading their stamp is fine.
        if owned && unsafe { stamp_of(pos.node) } == pos.stamp {
            Ok(pos.node)
        } else {
            Err(PositionError::Foreign)
        }
    }

    fn expect_node(&self, pos: Position<T>, op: &str) -> NonNull<Node<T>> {
        match self.resolve(pos) {
            Ok(node) => node,
            Err(err) => panic!("{}: {}", op, err),
        }
    }

    fn expect_element(&self, pos: Position<T>, op: &str) -> NonNull<Node<T>> {
        let node = self.expect_node(pos, op);
        if self.is_ghost(node) {
            panic!("{}: {}", op, PositionError::Ghost);
        }
        node
    }

    /// Walk `start..end` forward and count its nodes, panicking if `end`
    /// cannot be reached before the ghost node, or if `guard` lies inside
    /// the range. The whole list is known to be a forward range, so it is
    /// not walked.
    pub(crate) fn check_range(
        &self,
        start: NonNull<Node<T>>,
        end: NonNull<Node<T>>,
        guard: Option<NonNull<Node<T>>>,
        op: &str,
    ) -> usize {
        let whole = start == self.front_node() && self.is_ghost(end);
        if whole && guard.map_or(true, |node| self.is_ghost(node)) {
            return self.len();
        }
        let mut count = 0;
        let mut node = start;
        while node != end {
            if self.is_ghost(node) {
                panic!("{}: range end is not reachable from range start", op);
            }
            if Some(node) == guard {
                panic!("{}: destination lies inside the moved range", op);
            }
            count += 1;
            // SAFETY: `node` is an element node of the list.
            node = unsafe { next_of(node) };
        }
        count
    }
}

impl<T> List<T> {
    /// Returns the position of the first element, or [`end`] if the list is
    /// empty.
    ///
    /// [`end`]: List::end
    pub fn begin(&self) -> Position<T> {
        self.position_of(self.front_node())
    }

    /// Returns the end position, one past the last element.
    ///
    /// It is the ghost node of the list, so it is the same position for the
    /// whole life of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// let end = list.end();
    /// assert_eq!(list.begin(), end);
    ///
    /// list.push_back(42);
    /// assert_eq!(list.end(), end);
    /// assert_eq!(list.get(list.prev(end)), Ok(&42));
    /// ```
    pub fn end(&self) -> Position<T> {
        self.position_of(self.ghost_node())
    }

    /// Checks that `pos` denotes a live node of this list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn validate(&self, pos: Position<T>) -> Result<(), PositionError> {
        self.resolve(pos).map(|_| ())
    }

    /// Returns `true` if `pos` is the end position of this list.
    pub fn is_end(&self, pos: Position<T>) -> bool {
        self.is_ghost(pos.node)
    }

    /// Returns a reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// [`PositionError::Foreign`] if `pos` is not a live position of the list,
    /// and [`PositionError::Ghost`] if it is the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::{List, PositionError};
    ///
    /// let list = List::from(['a', 'b']);
    /// assert_eq!(list.get(list.begin()), Ok(&'a'));
    /// assert_eq!(list.get(list.end()), Err(PositionError::Ghost));
    ///
    /// let other = List::from(['a', 'b']);
    /// assert_eq!(list.get(other.begin()), Err(PositionError::Foreign));
    /// ```
    pub fn get(&self, pos: Position<T>) -> Result<&T, PositionError> {
        let node = self.resolve(pos)?;
        if self.is_ghost(node) {
            return Err(PositionError::Ghost);
        }
        // SAFETY: `node` is an element node of the list.
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    /// Returns a mutable reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// The same as [`List::get`].
    pub fn get_mut(&mut self, pos: Position<T>) -> Result<&mut T, PositionError> {
        let node = self.resolve(pos)?;
        if self.is_ghost(node) {
            return Err(PositionError::Ghost);
        }
        // SAFETY: `node` is an element node of the list, borrowed uniquely
        // through `self`.
        Ok(unsafe { &mut (*node.as_ptr()).element })
    }

    /// Returns the position after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list, or if it is the
    /// end position.
    pub fn next(&self, pos: Position<T>) -> Position<T> {
        let node = self.expect_node(pos, "next");
        if self.is_ghost(node) {
            panic!("next: {}", PositionError::Boundary);
        }
        // SAFETY: `node` is a live node of the list.
        self.position_of(unsafe { next_of(node) })
    }

    /// Returns the position before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list, or if it is the
    /// position of the first element (or the end position of an empty list).
    pub fn prev(&self, pos: Position<T>) -> Position<T> {
        let node = self.expect_node(pos, "prev");
        // SAFETY: `node` is a live node of the list.
        let prev = unsafe { prev_of(node) };
        if self.is_ghost(prev) {
            panic!("prev: {}", PositionError::Boundary);
        }
        self.position_of(prev)
    }

    /// Inserts `elt` right before `pos`, and returns the position of the new
    /// element. Positions held elsewhere stay valid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// let four = list.insert(list.end(), 4);
    /// let three = list.insert(four, 3);
    /// list.insert(list.begin(), 1);
    /// list.insert(three, 2);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, pos: Position<T>, elt: T) -> Position<T> {
        let next = self.expect_node(pos, "insert");
        // SAFETY: `next` is a live node of the list.
        let node = unsafe { self.link_before(next, elt) };
        self.position_of(node)
    }

    /// Like [`List::insert`], but the element is built by `f`. If `f` fails,
    /// the list is left untouched and the error is returned.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list. The position is
    /// checked before `f` is called.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let three = list.next(list.begin());
    ///
    /// let parsed = list.try_insert_with(three, || "2".parse::<i32>());
    /// assert!(parsed.is_ok());
    /// assert!(list.try_insert_with(three, || "two".parse::<i32>()).is_err());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn try_insert_with<E, F>(&mut self, pos: Position<T>, f: F) -> Result<Position<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.expect_node(pos, "insert");
        match f() {
            Ok(elt) => Ok(self.insert(pos, elt)),
            Err(err) => {
                debug!("element construction failed, list left unchanged");
                Err(err)
            }
        }
    }

    /// Removes the element at `pos`, and returns the position that followed it.
    ///
    /// The node is unlinked before the element is dropped.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list, or if it is the
    /// end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from_iter(2..8);
    /// let three = list.erase(list.begin());
    /// list.erase(three);
    /// list.erase(list.prev(list.end()));
    /// assert_eq!(Vec::from_iter(list), vec![4, 5, 6]);
    /// ```
    pub fn erase(&mut self, pos: Position<T>) -> Position<T> {
        let node = self.expect_element(pos, "erase");
        // SAFETY: `node` is a live element node of the list.
        let next = unsafe { next_of(node) };
        drop(unsafe { self.unlink(node) });
        self.position_of(next)
    }

    /// Removes the elements in `start..end`, from front to back, and returns
    /// `end`. An empty range is a no-op.
    ///
    /// The range is unlinked as a whole before any element is dropped, so the
    /// list is consistent even if a destructor panics.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*k*) time, where *k* is the number
    /// of erased elements.
    ///
    /// # Panics
    ///
    /// Panics if either position is not a live position of the list, or if
    /// `end` is not reachable from `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from_iter(1..=9);
    /// let start = list.begin();
    /// let end = list.next(list.next(list.next(start)));
    ///
    /// let after = list.erase_range(start, end);
    /// assert_eq!(list.get(after), Ok(&4));
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![4, 5, 6, 7, 8, 9]);
    /// ```
    pub fn erase_range(&mut self, start: Position<T>, end: Position<T>) -> Position<T> {
        let start_node = self.expect_node(start, "erase_range");
        let end_node = self.expect_node(end, "erase_range");
        self.check_range(start_node, end_node, None, "erase_range");
        // SAFETY: `start..end` is a forward range of the list, checked above.
        if let Some(detached) = unsafe { self.detach_range(start_node, end_node) } {
            trace!("erasing {} nodes", detached.nodes.len());
            drop(List::from_detached(detached));
        }
        end
    }

    /// Moves the nodes `start..end` of `other` right before `pos` in this list.
    ///
    /// No element is copied, moved or dropped: the nodes are relinked, and
    /// positions of the moved elements stay valid, now in this list. An empty
    /// range is a no-op.
    ///
    /// # Complexity
    ///
    /// The relinking is a constant number of link writes. Moving a part of
    /// `other` also walks the *k* moved nodes once to check the range and
    /// once to move their ownership entries, so it takes *O*(*k*) time.
    /// Moving the whole of `other` skips the walk and takes
    /// *O*(min(*n*, *m*)) time, or *O*(1) into an empty list.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of this list, if `start` or
    /// `end` is not a live position of `other`, or if `end` is not reachable
    /// from `start`. Nothing is changed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut l1 = List::from([1, 2, 3, 4]);
    /// let mut l2 = List::from([5, 6, 7, 8]);
    ///
    /// let pos = l1.next(l1.next(l1.begin()));
    /// let start = l2.next(l2.begin());
    /// let end = l2.prev(l2.end());
    /// l1.splice(pos, &mut l2, start, end);
    ///
    /// assert_eq!(Vec::from_iter(l1.iter().copied()), vec![1, 2, 6, 7, 3, 4]);
    /// assert_eq!(Vec::from_iter(l2.iter().copied()), vec![5, 8]);
    /// assert_eq!(l1.get(start), Ok(&6));
    /// ```
    pub fn splice(
        &mut self,
        pos: Position<T>,
        other: &mut List<T>,
        start: Position<T>,
        end: Position<T>,
    ) {
        let next = self.expect_node(pos, "splice");
        let start = other.expect_node(start, "splice");
        let end = other.expect_node(end, "splice");
        let count = other.check_range(start, end, None, "splice");
        if count == 0 {
            return;
        }
        trace!("splicing {} nodes between lists", count);
        // SAFETY: `start..end` is a forward range of `other`, and `next` is a
        // live node of `self`, adjacent to its `prev`.
        unsafe {
            if let Some(detached) = other.detach_range(start, end) {
                self.attach_nodes(prev_of(next), next, detached);
            }
        }
    }

    /// Moves the nodes `start..end` of this list right before `pos`, in the
    /// same list. An empty range, or a range already right before `pos`, is
    /// a no-op.
    ///
    /// # Panics
    ///
    /// Panics if any position is not a live position of the list, if `end` is
    /// not reachable from `start`, or if `pos` lies inside `start..end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from_iter(1..=6);
    /// let two = list.next(list.begin());
    /// let four = list.next(list.next(two));
    /// let six = list.prev(list.end());
    ///
    /// list.splice_within(six, two, four);
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 5, 2, 3, 6]);
    /// ```
    pub fn splice_within(&mut self, pos: Position<T>, start: Position<T>, end: Position<T>) {
        let next = self.expect_node(pos, "splice_within");
        let start = self.expect_node(start, "splice_within");
        let end = self.expect_node(end, "splice_within");
        let count = self.check_range(start, end, Some(next), "splice_within");
        if count == 0 || next == end {
            return;
        }
        trace!("moving {} nodes within a list", count);
        // SAFETY: `start..end` is a non-empty forward range of the list that
        // does not contain `next`.
        unsafe { move_nodes(start, prev_of(end), next) };
    }

    /// Provides a cursor at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list.
    pub fn cursor_at(&self, pos: Position<T>) -> Cursor<'_, T> {
        let node = self.expect_node(pos, "cursor_at");
        Cursor::new(self, node)
    }

    /// Provides a cursor with editing operations at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a live position of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1, 2, 4]);
    /// let four = list.prev(list.end());
    /// list.cursor_mut_at(four).insert(3);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4]);
    /// ```
    pub fn cursor_mut_at(&mut self, pos: Position<T>) -> CursorMut<'_, T> {
        let node = self.expect_node(pos, "cursor_mut_at");
        CursorMut::new(self, node)
    }
}
