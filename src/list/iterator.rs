use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::list::{next_of, prev_of, List, Node};

/// A double-ended iterator over shared references to the elements of a
/// [`List`].
///
/// The iterator keeps the first and the last node it has not yielded yet,
/// and how many nodes lie between them. It stops when that count reaches
/// zero, so both ends can be consumed in any order.
///
/// It borrows the list immutably for `'a`:
///
/// ```compile_fail
/// use splice_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

/// A double-ended iterator over mutable references to the elements of a
/// [`List`].
///
/// It converts into an [`Iter`] over the elements it has not yielded yet;
/// an [`Iter`] never converts back.
///
/// ```compile_fail
/// use splice_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.back_node(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            head: list.front_node(),
            tail: list.back_node(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }

    /// A shared view of the elements not yielded yet, borrowing `self`.
    fn as_iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head;
        self.remaining -= 1;
        // SAFETY: `remaining > 0`, so `head` is an element node not yielded
        // yet, and the list is borrowed for `'a`.
        unsafe {
            self.head = next_of(node);
            Some(&(*node.as_ptr()).element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail;
        self.remaining -= 1;
        // SAFETY: as in `next`, with `tail` for `head`.
        unsafe {
            self.tail = prev_of(node);
            Some(&(*node.as_ptr()).element)
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head;
        self.remaining -= 1;
        // SAFETY: `head` is an element node not yielded yet. Each node is
        // yielded once, from one end or the other, so the references do not
        // alias.
        unsafe {
            self.head = next_of(node);
            Some(&mut (*node.as_ptr()).element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail;
        self.remaining -= 1;
        // SAFETY: as in `next`, with `tail` for `head`.
        unsafe {
            self.tail = prev_of(node);
            Some(&mut (*node.as_ptr()).element)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    /// Gives up mutable access to the elements not yielded yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::{Iter, List};
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut iter_mut = list.iter_mut();
    /// *iter_mut.next().unwrap() = 10;
    ///
    /// let iter = Iter::from(iter_mut);
    /// assert_eq!(Vec::from_iter(iter.copied()), vec![2, 3]);
    /// ```
    fn from(iter: IterMut<'a, T>) -> Self {
        Self {
            head: iter.head,
            tail: iter.tail,
            remaining: iter.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.as_iter().collect::<Vec<_>>()).finish()
    }
}

/// An owning iterator over the elements of a [`List`], created by
/// [`List::into_iter`].
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.0).finish()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Pushes the items at the back, in order. If the source iterator panics,
    /// the list built so far is dropped with every element in it.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    /// Builds a list holding the elements of a literal array, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
