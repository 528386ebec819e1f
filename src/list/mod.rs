use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

use fxhash::FxHashSet;
use log::trace;

use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;
pub mod position;

mod clone;

/// A doubly-linked list whose nodes form a ring closed by a ghost node.
///
/// Elements are inserted, erased and spliced in constant time at any
/// [`Position`]. Positions do not borrow the list and are checked against it
/// each time they are used. Element nodes never move in memory: `splice`,
/// `swap`, `append` and `prepend` only relink them.
///
/// The list holds:
/// - `ghost`, the ghost node. It is allocated with the list, freed with it,
///   and its address tells the list apart from any other list;
/// - `nodes`, the set of element nodes the list owns. A position belongs to
///   the list when its node is in the set, and the set size is the length.
///
/// # Naming Conventions
///
/// - `front..=back`: nodes from `front` to `back`, both included;
/// - `start..end`: nodes from `start` up to `end` excluded, `end` being
///   possibly the ghost node.
///
/// [`Position`]: crate::Position
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    /// element nodes owned by the list
    pub(crate) nodes: FxHashSet<NonNull<Node<T>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of the ring.
///
/// The ghost node is allocated as a `Node<MaybeUninit<T>>`: it has the
/// layout and alignment of an element node, but its `element` is never
/// written, read or dropped.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    /// Process-unique identity of the node, never reused.
    pub(crate) stamp: u64,
    pub(crate) element: T,
}

/// A run of nodes `front..=back` unlinked from a list, carrying the
/// ownership entries of its nodes until it is linked into a list again.
///
/// `front.prev` and `back.next` are stale while the run is detached.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) nodes: FxHashSet<NonNull<Node<T>>>,
}

static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

// Link accessors. They only touch `next`, `prev` and `stamp`, never
// `element`, so they are valid on the ghost node as well.

pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

pub(crate) unsafe fn stamp_of<T>(node: NonNull<Node<T>>) -> u64 {
    (*node.as_ptr()).stamp
}

pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

/// Move the nodes `from_front..=from_back` to the place right before `to`,
/// within one ring.
pub(crate) unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(prev_of(from_front), next_of(from_back));
    connect(prev_of(to), from_front);
    connect(from_back, to);
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost is alive as long as the list, and its `next` is
        // either the ghost itself or the first element.
        unsafe { next_of(self.ghost) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost is alive as long as the list, and its `prev` is
        // either the ghost itself or the last element.
        unsafe { prev_of(self.ghost) }
    }
    pub(crate) fn is_ghost(&self, node: NonNull<Node<T>>) -> bool {
        node == self.ghost
    }

    /// The element of `node`, or `None` for the ghost node.
    fn element_of(&self, node: NonNull<Node<T>>) -> Option<&T> {
        if self.is_ghost(node) {
            return None;
        }
        // SAFETY: callers pass nodes of the ring, and only the ghost lacks an
        // element.
        unsafe { Some(&(*node.as_ptr()).element) }
    }

    fn element_mut_of(&mut self, node: NonNull<Node<T>>) -> Option<&mut T> {
        if self.is_ghost(node) {
            return None;
        }
        // SAFETY: as in `element_of`, and `self` is borrowed uniquely.
        unsafe { Some(&mut (*node.as_ptr()).element) }
    }

    /// Allocate a node holding `elt` and link it right before `next`.
    ///
    /// The element is moved into the node before anything is linked, so the
    /// ring is never seen with a half-built node.
    ///
    /// It is unsafe because `next` must be a node of this list.
    pub(crate) unsafe fn link_before(&mut self, next: NonNull<Node<T>>, elt: T) -> NonNull<Node<T>> {
        let node = NonNull::from(Box::leak(Box::new(Node {
            next,
            prev: prev_of(next),
            stamp: next_stamp(),
            element: elt,
        })));
        #[cfg(debug_assertions)]
        assert_adjacent(prev_of(next), next);
        connect(prev_of(next), node);
        connect(node, next);
        self.nodes.insert(node);
        node
    }

    /// Unlink the element node `node`, free it and return its element.
    ///
    /// It is unsafe because `node` must be an element node of this list.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        self.nodes.remove(&node);
        connect(prev_of(node), next_of(node));
        Box::from_raw(node.as_ptr()).element
    }

    /// Unlink the half-open range `start..end`, moving the ownership entries
    /// of its nodes into the returned run, or return `None` if the range is
    /// empty.
    ///
    /// Taking the whole list hands the set over at once; a part of the list
    /// is walked node by node.
    ///
    /// It is unsafe because `start..end` must be a forward range of the list
    /// (see [`List::check_range`]).
    pub(crate) unsafe fn detach_range(
        &mut self,
        start: NonNull<Node<T>>,
        end: NonNull<Node<T>>,
    ) -> Option<DetachedNodes<T>> {
        if start == end {
            return None;
        }
        let back = prev_of(end);
        let nodes = if start == self.front_node() && self.is_ghost(end) {
            mem::take(&mut self.nodes)
        } else {
            let mut nodes = FxHashSet::default();
            let mut node = start;
            while node != end {
                self.nodes.remove(&node);
                nodes.insert(node);
                node = next_of(node);
            }
            nodes
        };
        connect(prev_of(start), end);
        debug_assert!(!nodes.is_empty(), "detached an empty run");
        Some(DetachedNodes {
            front: start,
            back,
            nodes,
        })
    }

    /// Link a detached run between the adjacent nodes `prev` and `next`, and
    /// take over its ownership entries. The smaller set is merged into the
    /// larger one.
    ///
    /// It is unsafe because `prev` and `next` must be adjacent nodes of this
    /// list (checked only under `debug_assertions`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        mut run: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, run.front);
        connect(run.back, next);
        if self.nodes.len() < run.nodes.len() {
            mem::swap(&mut self.nodes, &mut run.nodes);
        }
        self.nodes.extend(run.nodes);
    }

    /// Unlink every element node, or return `None` if the list is empty.
    pub(crate) fn detach_all(&mut self) -> Option<DetachedNodes<T>> {
        let (front, ghost) = (self.front_node(), self.ghost);
        // SAFETY: `front..ghost` covers the whole list.
        unsafe { self.detach_range(front, ghost) }
    }

    /// Build a list owning a detached run.
    pub(crate) fn from_detached(run: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        let ghost = list.ghost;
        // SAFETY: the ghost of an empty list is adjacent to itself.
        unsafe { list.attach_nodes(ghost, ghost, run) };
        list
    }
}

impl<T> List<T> {
    /// Creates an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use splice_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            nodes: FxHashSet::default(),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the list holds no element.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_ghost(self.front_node())
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every element, from front to back.
    ///
    /// Each node is unlinked before its element is dropped, so the ring is
    /// well-formed after every single destruction.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// assert_eq!(list.begin(), list.end());
    /// ```
    pub fn clear(&mut self) {
        if !self.is_empty() {
            trace!("clearing {} nodes", self.len());
        }
        while self.pop_front().is_some() {}
    }

    /// Returns the first element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.element_of(self.front_node())
    }

    /// Returns the first element mutably, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1]);
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.element_mut_of(self.front_node())
    }

    /// Returns the last element, or `None` if the list is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.element_of(self.back_node())
    }

    /// Returns the last element mutably, or `None` if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.element_mut_of(self.back_node())
    }

    /// Inserts an element before the first one.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let front = self.front_node();
        // SAFETY: the front node is a node of the list.
        unsafe { self.link_before(front, elt) };
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([3, 1]);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let front = self.front_node();
        if self.is_ghost(front) {
            return None;
        }
        // SAFETY: the front node of a non-empty list is an element node.
        Some(unsafe { self.unlink(front) })
    }

    /// Inserts an element after the last one.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let ghost = self.ghost;
        // SAFETY: the ghost is a node of the list.
        unsafe { self.link_before(ghost, elt) };
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let back = self.back_node();
        if self.is_ghost(back) {
            return None;
        }
        // SAFETY: the back node of a non-empty list is an element node.
        Some(unsafe { self.unlink(back) })
    }

    /// Provides a front-to-back iterator over shared references. Reverse it
    /// with [`Iterator::rev`].
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let list = List::from([0, 1, 2]);
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a front-to-back iterator over mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves every element of `other` after the last element of `self`,
    /// leaving `other` empty. Nodes are relinked, not reallocated, and their
    /// positions now belong to `self`.
    ///
    /// # Complexity
    ///
    /// The relinking takes *O*(1) time. The ownership entries of the smaller
    /// of the two lists are merged into the larger one, which takes
    /// *O*(min(*n*, *m*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    /// let b = list2.begin();
    ///
    /// list1.append(&mut list2);
    /// assert_eq!(Vec::from_iter(list1.iter().copied()), vec!['a', 'b', 'c']);
    /// assert_eq!(list1.get(b), Ok(&'b'));
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(run) = other.detach_all() {
            trace!("appending {} nodes", run.nodes.len());
            let (back, ghost) = (self.back_node(), self.ghost);
            // SAFETY: the back node and the ghost are adjacent nodes of `self`.
            unsafe { self.attach_nodes(back, ghost, run) }
        }
    }

    /// Moves every element of `other` before the first element of `self`,
    /// leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    ///
    /// list2.prepend(&mut list1);
    /// assert_eq!(Vec::from_iter(list2), vec!['a', 'b', 'c']);
    /// assert!(list1.is_empty());
    /// ```
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(run) = other.detach_all() {
            trace!("prepending {} nodes", run.nodes.len());
            let (ghost, front) = (self.ghost, self.front_node());
            // SAFETY: the ghost and the front node are adjacent nodes of `self`.
            unsafe { self.attach_nodes(ghost, front, run) }
        }
    }

    /// Exchanges the contents of two lists.
    ///
    /// No element is moved, copied or dropped: each ring of element nodes is
    /// relinked to the ghost node of the other list. Each list keeps its own
    /// ghost node, so the [`end`] position of a list stays with that list,
    /// while positions of elements follow their elements into the other list.
    ///
    /// This differs from [`std::mem::swap`], which exchanges the ghost nodes
    /// together with the elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let mut a = List::from([1, 2, 3, 4]);
    /// let mut b = List::from([5, 6]);
    /// let a_end = a.end();
    /// let five = b.begin();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(Vec::from_iter(a.iter().copied()), vec![5, 6]);
    /// assert_eq!(Vec::from_iter(b.iter().copied()), vec![1, 2, 3, 4]);
    ///
    /// assert!(a.is_end(a_end));
    /// assert_eq!(a.get(five), Ok(&5));
    /// ```
    ///
    /// [`end`]: List::end
    pub fn swap(&mut self, other: &mut Self) {
        trace!("swapping lists of {} and {} nodes", self.len(), other.len());
        let mine = self.detach_all();
        let theirs = other.detach_all();
        let (my_ghost, their_ghost) = (self.ghost, other.ghost);
        // SAFETY: both lists are empty now, and an empty ghost is adjacent to
        // itself.
        unsafe {
            if let Some(run) = theirs {
                self.attach_nodes(my_ghost, my_ghost, run);
            }
            if let Some(run) = mine {
                other.attach_nodes(their_ghost, their_ghost, run);
            }
        }
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocate a ghost node linked to itself. Its `element` stays
/// uninitialized for the whole life of the list.
fn new_ghost<T>() -> NonNull<Node<T>> {
    let ghost: Box<Node<MaybeUninit<T>>> = Box::new(Node {
        next: NonNull::dangling(),
        prev: NonNull::dangling(),
        stamp: next_stamp(),
        element: MaybeUninit::uninit(),
    });
    // `Node` is `#[repr(C)]` and `MaybeUninit<T>` has the layout of `T`, so
    // the cast keeps every field in place.
    let ghost = NonNull::from(Box::leak(ghost)).cast::<Node<T>>();
    // SAFETY: the ghost is freshly allocated; linking it to itself makes an
    // empty ring.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was leaked from a `Box<Node<MaybeUninit<T>>>` in
        // `new_ghost`, and freeing it as such never drops an element.
        unsafe { drop(Box::from_raw(self.ghost.cast::<Node<MaybeUninit<T>>>().as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// `List` and its read-only iterators must stay covariant in `T`.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
impl<T> List<T> {
    /// Check the ring invariants: every link is mirrored by its neighbor, the
    /// ghost closes the ring, and the registry holds exactly the element nodes.
    pub(crate) fn assert_ring(&self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        let mut count = 0;
        loop {
            let next = unsafe { next_of(node) };
            assert_eq!(unsafe { prev_of(next) }, node, "broken `prev` link");
            node = next;
            if node == ghost {
                break;
            }
            assert!(self.nodes.contains(&node), "node missing in registry");
            count += 1;
        }
        assert_eq!(count, self.nodes.len(), "registry holds foreign nodes");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::list::List;
    use std::cell::RefCell;

    #[derive(Debug)]
    pub(crate) struct DropChecker<'a, T: Copy> {
        pub(crate) value: T,
        dropped: &'a RefCell<Vec<T>>,
    }

    impl<'a, T: Copy> DropChecker<'a, T> {
        pub(crate) fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
            Self { value, dropped }
        }
    }

    impl<'a, T: Copy> Drop for DropChecker<'a, T> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    pub(crate) fn contents<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        list.assert_ring();
    }

    #[test]
    fn list_drop() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_clear_in_order() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_front(DropChecker::new(2, &dropped));
        list.push_front(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        list.clear();
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        list.assert_ring();
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        list.assert_ring();

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        list.assert_ring();
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        list.assert_ring();
    }

    #[test]
    fn list_boundaries_follow_pushes_and_pops() {
        let mut list = List::new();
        for i in 0..10 {
            list.push_back(i);
        }
        for i in (0..10).rev() {
            assert_eq!(list.back(), Some(&i));
            list.pop_back();
        }
        assert!(list.is_empty());

        for i in 0..10 {
            list.push_back(i);
        }
        for i in 0..10 {
            assert_eq!(list.front(), Some(&i));
            list.pop_front();
        }
        assert!(list.is_empty());

        for i in 0..10 {
            list.push_front(i);
        }
        for i in (0..10).rev() {
            assert_eq!(list.front(), Some(&i));
            list.pop_front();
        }
        assert!(list.is_empty());
        list.assert_ring();
    }

    #[test]
    fn list_front_and_back_after_pops() {
        let mut list = List::from([10, 8, 9, 6, 4]);
        assert_eq!(list.back(), Some(&4));
        assert_eq!(list.front(), Some(&10));
        list.pop_back();
        list.pop_front();
        assert_eq!(list.back(), Some(&6));
        assert_eq!(list.front(), Some(&8));

        *list.front_mut().unwrap() = 1;
        *list.back_mut().unwrap() = 2;
        assert_eq!(contents(&list), vec![1, 9, 2]);
    }

    #[test]
    fn list_append_and_prepend() {
        fn test_append_and_prepend(list: Vec<i32>, other: Vec<i32>) {
            let joined = Vec::from_iter(list.iter().chain(other.iter()).copied());

            let mut appended = List::from_iter(list.clone());
            let mut tail = List::from_iter(other.clone());
            appended.append(&mut tail);
            assert!(tail.is_empty());
            assert_eq!(contents(&appended), joined);
            assert_eq!(appended.len(), joined.len());
            appended.assert_ring();
            tail.assert_ring();

            let mut head = List::from_iter(list);
            let mut prepended = List::from_iter(other);
            prepended.prepend(&mut head);
            assert!(head.is_empty());
            assert_eq!(contents(&prepended), joined);
            assert_eq!(prepended.len(), joined.len());
            prepended.assert_ring();
        }
        test_append_and_prepend(vec![0, 1, 2, 3, 4], vec![5, 6]);
        test_append_and_prepend(vec![0, 1, 2, 3, 4], vec![]);
        test_append_and_prepend(vec![0], vec![1, 2]);
        test_append_and_prepend(vec![], vec![0, 1]);
        test_append_and_prepend(vec![], vec![]);
    }

    #[test]
    fn list_swap() {
        crate::init_test_logger();
        let mut a = List::from([1, 2, 3, 4]);
        let mut b = List::from([5, 6, 7]);
        a.swap(&mut b);
        assert_eq!(contents(&a), vec![5, 6, 7]);
        assert_eq!(contents(&b), vec![1, 2, 3, 4]);
        assert_eq!((a.len(), b.len()), (3, 4));
        a.assert_ring();
        b.assert_ring();

        let mut empty = List::new();
        a.swap(&mut empty);
        assert!(a.is_empty());
        assert_eq!(contents(&empty), vec![5, 6, 7]);
        a.assert_ring();
        empty.assert_ring();

        {
            let mut temporary = List::from([1, 2, 3]);
            b.swap(&mut temporary);
        }
        assert_eq!(contents(&b), vec![1, 2, 3]);
    }

    #[test]
    fn list_swap_does_not_touch_elements() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut a = List::new();
        a.push_back(DropChecker::new(1, &dropped));
        let mut b = List::new();
        b.push_back(DropChecker::new(2, &dropped));
        let one: *const _ = a.front().unwrap();

        a.swap(&mut b);
        assert!(dropped.borrow().is_empty());
        assert_eq!(b.front().unwrap() as *const _, one);
        assert_eq!(a.front().map(|checker| checker.value), Some(2));
    }

    #[repr(align(4096))]
    #[derive(Debug, Clone, PartialEq)]
    struct Page(u8);

    #[test]
    fn over_aligned_elements() {
        let mut list = List::new();
        list.push_back(Page(1));
        list.push_front(Page(0));
        list.push_back(Page(2));
        assert_eq!(list.front(), Some(&Page(0)));
        assert_eq!(list.back(), Some(&Page(2)));
        for page in list.iter() {
            assert_eq!(page as *const Page as usize % 4096, 0);
        }

        let mut other = List::from([Page(3)]);
        list.swap(&mut other);
        assert_eq!(contents(&list), vec![Page(3)]);
        list.append(&mut other);
        assert_eq!(list.len(), 4);
        assert_eq!(list.pop_back(), Some(Page(2)));
        list.assert_ring();
        other.assert_ring();
    }

    #[test]
    fn append_merges_into_larger_registry() {
        let mut small = List::from([1]);
        let mut large = List::from_iter(2..100);
        small.append(&mut large);
        assert_eq!(small.len(), 99);
        assert_eq!(contents(&small), Vec::from_iter(1..100));
        small.assert_ring();
        large.assert_ring();

        let mut tail = List::from([100]);
        let hundred = tail.begin();
        small.append(&mut tail);
        assert_eq!(small.get(hundred), Ok(&100));
        assert_eq!(small.len(), 100);
        small.assert_ring();
    }
}
