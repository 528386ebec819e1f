use log::debug;

use crate::list::List;

impl<T: Clone> Clone for List<T> {
    /// Copies the list element by element, in order.
    ///
    /// If cloning an element panics, the elements copied so far are dropped
    /// while unwinding and the source list is left untouched.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Replaces the contents of `self` with a copy of `source`.
    ///
    /// The copy is built aside first and then exchanged with `self`, so if
    /// cloning an element panics, `self` keeps its previous contents. The
    /// end position of `self` stays valid either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let source = List::from([1, 2, 3]);
    /// let mut list = List::from([9]);
    /// let end = list.end();
    ///
    /// list.clone_from(&source);
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3]);
    /// assert!(list.is_end(end));
    /// ```
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> List<T> {
    /// Builds a new list by converting every element with `f`, in order.
    ///
    /// If `f` fails, the elements converted so far are dropped, the error is
    /// returned and `self` is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice_list::List;
    ///
    /// let words = List::from(["1", "2", "3"]);
    /// let numbers = words.try_clone_with(|word| word.parse::<i32>()).unwrap();
    /// assert_eq!(Vec::from_iter(numbers), vec![1, 2, 3]);
    ///
    /// let words = List::from(["1", "two", "3"]);
    /// assert!(words.try_clone_with(|word| word.parse::<i32>()).is_err());
    /// ```
    pub fn try_clone_with<U, E, F>(&self, mut f: F) -> Result<List<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let mut copy = List::new();
        for elt in self.iter() {
            match f(elt) {
                Ok(converted) => copy.push_back(converted),
                Err(err) => {
                    debug!(
                        "copy failed after {} of {} elements, rolling back",
                        copy.len(),
                        self.len()
                    );
                    return Err(err);
                }
            }
        }
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    use crate::list::tests::contents;
    use crate::List;

    /// An element whose clone panics on demand, tracking live instances.
    struct Fragile {
        value: i32,
        poisoned: bool,
        live: Rc<Cell<usize>>,
    }

    impl Fragile {
        fn new(value: i32, poisoned: bool, live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self {
                value,
                poisoned,
                live: Rc::clone(live),
            }
        }
    }

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            if self.poisoned {
                panic!("cannot clone {}", self.value);
            }
            Fragile::new(self.value, false, &self.live)
        }
    }

    impl Drop for Fragile {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn values(list: &List<Fragile>) -> Vec<i32> {
        list.iter().map(|fragile| fragile.value).collect()
    }

    #[test]
    fn clone_is_independent() {
        let mut l1 = List::from([1, 2, 3]);
        let l2 = l1.clone();
        assert_eq!(contents(&l2), vec![1, 2, 3]);
        l1.push_back(4);
        *l1.front_mut().unwrap() = 0;
        assert_eq!(contents(&l2), vec![1, 2, 3]);
        assert_eq!(contents(&l1), vec![0, 2, 3, 4]);
        assert!(l2.validate(l1.begin()).is_err());
        l2.assert_ring();

        let empty = List::<i32>::new().clone();
        assert!(empty.is_empty());
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = List::from([5, 6]);
        let mut target = List::from([1, 2, 3]);
        let end = target.end();
        target.clone_from(&source);
        assert_eq!(contents(&target), vec![5, 6]);
        assert!(target.is_end(end));
        target.assert_ring();

        target.clone_from(&List::new());
        assert!(target.is_empty());
    }

    #[test]
    fn clone_from_is_independent() {
        let mut source = List::from([1, 2, 3]);
        let mut target = List::from([9]);
        target.clone_from(&source);
        assert_eq!(contents(&target), contents(&source));

        source.push_back(4);
        *source.front_mut().unwrap() = 0;
        assert_eq!(contents(&target), vec![1, 2, 3]);

        target.pop_front();
        *target.back_mut().unwrap() = 30;
        assert_eq!(contents(&source), vec![0, 2, 3, 4]);
        assert_eq!(contents(&target), vec![2, 30]);
        assert!(source.validate(target.begin()).is_err());
        assert!(target.validate(source.begin()).is_err());
        source.assert_ring();
        target.assert_ring();
    }

    #[test]
    fn clone_over_aligned_elements() {
        #[repr(align(64))]
        #[derive(Clone, Debug, PartialEq)]
        struct Line(u64);

        let source = List::from([Line(1), Line(2)]);
        let mut target = List::from([Line(3)]);
        target.clone_from(&source);
        assert_eq!(contents(&target), vec![Line(1), Line(2)]);
        assert!(target.iter().all(|line| line as *const Line as usize % 64 == 0));
        target.assert_ring();
    }

    #[test]
    fn clone_panic_rolls_back() {
        let live = Rc::new(Cell::new(0));
        let source = List::from_iter((0..5).map(|i| Fragile::new(i, i == 3, &live)));
        assert_eq!(live.get(), 5);

        let result = catch_unwind(AssertUnwindSafe(|| source.clone()));
        assert!(result.is_err());
        assert_eq!(live.get(), 5);
        assert_eq!(values(&source), vec![0, 1, 2, 3, 4]);
        source.assert_ring();
    }

    #[test]
    fn clone_from_panic_keeps_target() {
        let live = Rc::new(Cell::new(0));
        let source = List::from_iter((0..3).map(|i| Fragile::new(i, i == 2, &live)));
        let mut target = List::from([Fragile::new(7, false, &live), Fragile::new(8, false, &live)]);
        assert_eq!(live.get(), 5);

        let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
        assert!(result.is_err());
        assert_eq!(live.get(), 5);
        assert_eq!(values(&target), vec![7, 8]);
        assert_eq!(values(&source), vec![0, 1, 2]);
        target.assert_ring();
    }

    #[test]
    fn try_clone_with_rolls_back() {
        crate::init_test_logger();
        let live = Rc::new(Cell::new(0));
        let source = List::from_iter((0..4).map(|i| Fragile::new(i, false, &live)));

        let result = source.try_clone_with(|fragile| {
            if fragile.value == 2 {
                Err(fragile.value)
            } else {
                Ok(fragile.clone())
            }
        });
        assert_eq!(result.err(), Some(2));
        assert_eq!(live.get(), 4);

        let copy = source
            .try_clone_with(|fragile| Ok::<_, ()>(fragile.clone()))
            .unwrap();
        assert_eq!(values(&copy), vec![0, 1, 2, 3]);
        assert_eq!(live.get(), 8);
    }

    #[test]
    fn collect_results() {
        let ok: Result<List<i32>, String> = ["1", "2"]
            .iter()
            .map(|s| s.parse::<i32>().map_err(|err| err.to_string()))
            .collect();
        assert_eq!(contents(&ok.unwrap()), vec![1, 2]);

        let err: Result<List<i32>, String> = ["1", "x"]
            .iter()
            .map(|s| s.parse::<i32>().map_err(|err| err.to_string()))
            .collect();
        assert!(err.is_err());
    }
}
