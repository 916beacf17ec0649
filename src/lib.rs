// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A priority queue implemented with a binary heap and ordered by an arbitrary comparator.
//!
//! A `PriorityQueue` always yields the item that comes *first* according to its comparator:
//! the smallest item for the natural order, the greatest one for the reversed natural order,
//! or whatever a custom [`Compare`][cmp] implementation, closure or boolean predicate decides.
//!
//! Insertion has amortized `O(log n)` time complexity. Popping the next item is `O(log n)`.
//! Retrieving it is `O(1)`. Building a queue from a vector is `O(n)`.
//!
//! ```
//! use pqueue::PriorityQueue;
//!
//! // "a is popped before b" iff a < b
//! let mut queue = PriorityQueue::from_vec_with_order(vec![1, 3, 7, 8, -20, 56],
//!                                                    |a: &i32, b: &i32| a < b);
//! assert_eq!(queue.peek(), Some(&-20));
//! queue.push(-30);
//! assert_eq!(queue.pop(), Some(-30));
//! assert_eq!(queue.len(), 6);
//! ```
//!
//! [cmp]: https://docs.rs/compare/0.0.6/compare/trait.Compare.html

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::{self, Debug};
use std::iter;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::slice;
use std::vec;

use compare::{Compare, Natural, natural};

use crate::heap::Heap;

mod heap;

/// Number of slots allocated on top of the capacity requested at construction.
pub const DEFAULT_HEADROOM: usize = 8;

/// A comparator built from a boolean "comes before" predicate.
///
/// `order(a, b)` must return `true` iff `a` has to be popped before `b`, and must behave as a
/// strict weak ordering: irreflexive, asymmetric and transitive. A predicate breaking these
/// rules makes the order in which items are popped unspecified, but is otherwise harmless.
///
/// # Examples
///
/// ```
/// use compare::Compare;
/// use std::cmp::Ordering::{Equal, Greater, Less};
///
/// let longest_first = pqueue::precedes(|a: &&str, b: &&str| a.len() > b.len());
/// assert_eq!(longest_first.compare(&"three", &"one"), Less);
/// assert_eq!(longest_first.compare(&"one", &"three"), Greater);
/// assert_eq!(longest_first.compare(&"one", &"two"), Equal);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Precedes<F>(F);

/// Wraps a boolean "comes before" predicate into a comparator.
pub fn precedes<T: ?Sized, F: Fn(&T, &T) -> bool>(order: F) -> Precedes<F> {
    Precedes(order)
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Compare<T> for Precedes<F> {
    fn compare(&self, l: &T, r: &T) -> std::cmp::Ordering {
        if (self.0)(l, r) {
            std::cmp::Ordering::Less
        } else if (self.0)(r, l) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }

    fn compares_lt(&self, l: &T, r: &T) -> bool {
        (self.0)(l, r)
    }
}

impl<F> Debug for Precedes<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Precedes")
    }
}

/// The error returned when a queue's storage cannot be allocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityError {
    capacity: usize,
    source: TryReserveError,
}

impl CapacityError {
    /// Returns the number of slots that could not be allocated.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot allocate a priority queue holding {} items", self.capacity)
    }
}

impl Error for CapacityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A priority queue implemented with a binary heap.
///
/// The item popped next is the one ordered first by the queue's comparator. Items that compare
/// equal are popped in an unspecified order.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the queue's
/// comparator, changes while it is in the queue. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct PriorityQueue<T, C: Compare<T> = Natural<T>> {
    heap: Heap<T, C>,
}

impl<T, C: Compare<T> + Default> Default for PriorityQueue<T, C> {
    #[inline]
    fn default() -> PriorityQueue<T, C> {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Returns an empty queue that pops its smallest item first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let queue = PriorityQueue::<u32>::new();
    /// assert!(queue.is_empty());
    /// ```
    pub fn new() -> PriorityQueue<T> { Self::with_comparator(natural()) }

    /// Returns an empty queue that pops its smallest item first, with room for at least
    /// `capacity` items before reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let queue = PriorityQueue::<u32>::with_capacity(5);
    /// assert!(queue.is_empty());
    /// assert!(queue.capacity() >= 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> PriorityQueue<T> {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<T: Ord> From<Vec<T>> for PriorityQueue<T> {
    /// Returns a queue containing all the items of the given vector that pops its smallest
    /// item first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let queue = PriorityQueue::from(vec![5, 1, 6, 4]);
    /// assert_eq!(queue.len(), 4);
    /// assert_eq!(queue.peek(), Some(&1));
    /// ```
    fn from(vec: Vec<T>) -> PriorityQueue<T> {
        Self::from_vec_and_comparator(vec, natural())
    }
}

impl<T, F: Fn(&T, &T) -> bool> PriorityQueue<T, Precedes<F>> {
    /// Returns an empty queue that pops `a` before `b` whenever `order(a, b)` holds.
    ///
    /// See [`Precedes`](struct.Precedes.html) for the requirements on `order`.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::with_order(0, |a: &i32, b: &i32| a > b);
    /// queue.push(3);
    /// queue.push(8);
    /// assert_eq!(queue.pop(), Some(8));
    /// ```
    pub fn with_order(capacity: usize, order: F) -> PriorityQueue<T, Precedes<F>> {
        Self::with_capacity_and_comparator(capacity, precedes(order))
    }

    /// Returns a queue containing all the items of the given vector that pops `a` before `b`
    /// whenever `order(a, b)` holds.
    pub fn from_vec_with_order(vec: Vec<T>, order: F) -> PriorityQueue<T, Precedes<F>> {
        Self::from_vec_and_comparator(vec, precedes(order))
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> {
    /// Returns an empty queue ordered according to the given comparator.
    pub fn with_comparator(cmp: C) -> PriorityQueue<T, C> {
        Self::with_capacity_and_comparator(0, cmp)
    }

    /// Returns an empty queue ordered according to the given comparator, with room for at
    /// least `capacity` items before reallocating.
    ///
    /// The storage is allocated with [`DEFAULT_HEADROOM`](constant.DEFAULT_HEADROOM.html)
    /// extra slots. The capacity is only a hint: the queue grows as needed.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows. Use
    /// [`try_with_capacity_and_comparator`](#method.try_with_capacity_and_comparator) to
    /// handle that case.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> PriorityQueue<T, C> {
        PriorityQueue {
            heap: Heap::with_capacity(capacity.saturating_add(DEFAULT_HEADROOM), cmp),
        }
    }

    /// Returns an empty queue ordered according to the given comparator, or an error if room
    /// for `capacity` items cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    /// use compare::natural;
    ///
    /// let queue = PriorityQueue::<u64, _>::try_with_capacity_and_comparator(10, natural());
    /// assert!(queue.unwrap().capacity() >= 10);
    ///
    /// let queue = PriorityQueue::<u64, _>::try_with_capacity_and_comparator(usize::MAX, natural());
    /// assert_eq!(queue.unwrap_err().capacity(), usize::MAX);
    /// ```
    pub fn try_with_capacity_and_comparator(capacity: usize, cmp: C)
                                            -> Result<PriorityQueue<T, C>, CapacityError> {
        let heap = Heap::try_with_capacity(capacity.saturating_add(DEFAULT_HEADROOM), cmp)
            .map_err(|source| CapacityError { capacity, source })?;
        Ok(PriorityQueue { heap })
    }

    /// Returns a queue containing all the items of the given vector and ordered
    /// according to the given comparator.
    ///
    /// The vector is reused as storage and rearranged in `O(n)` time.
    pub fn from_vec_and_comparator(vec: Vec<T>, cmp: C) -> PriorityQueue<T, C> {
        PriorityQueue { heap: Heap::heapify(vec, cmp) }
    }

    /// Returns the queue's comparator.
    pub fn comparator(&self) -> &C {
        self.heap.cmp()
    }

    /// Returns an iterator visiting all items in the queue in storage order.
    ///
    /// The first item is the next one to be popped; the rest follow no particular order.
    pub fn iter(&self) -> Iter<T> {
        Iter(self.heap.iter())
    }

    /// Returns a reference to the next item to be popped.
    ///
    /// Returns `None` if the queue is empty.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Returns a mutable reference to the next item to be popped.
    ///
    /// The queue is reordered when the returned guard is dropped, if the item was modified.
    ///
    /// Returns `None` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::from(vec![2, 1, 3]);
    /// if let Some(mut first) = queue.peek_mut() {
    ///     *first = 4;
    /// }
    /// assert_eq!(queue.peek(), Some(&2));
    /// ```
    pub fn peek_mut(&mut self) -> Option<PeekMut<T, C>> {
        if self.is_empty() {
            None
        } else {
            Some(PeekMut { queue: self, sift: false })
        }
    }

    /// Returns the number of items the queue can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Reserves the minimum capacity for exactly `additional` more items to be inserted into the
    /// queue.
    ///
    /// Does nothing if the capacity is already sufficient.
    ///
    /// Note that the allocator may give the queue more space than it
    /// requests. Therefore capacity can not be relied upon to be precisely
    /// minimal. Prefer `reserve` if future insertions are expected.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.heap.reserve_exact(additional);
    }

    /// Reserves capacity for at least `additional` more items to be inserted into the queue.
    ///
    /// The queue may reserve more space to avoid frequent reallocations.
    pub fn reserve(&mut self, additional: usize) {
        self.heap.reserve(additional);
    }

    /// Discards as much additional capacity from the queue as possible.
    pub fn shrink_to_fit(&mut self) {
        self.heap.shrink_to_fit()
    }

    /// Removes the next item from the queue and returns it.
    ///
    /// Returns `None` if the queue was empty.
    pub fn pop(&mut self) -> Option<T> {
        match self.heap.len() {
            0 => None,
            1 => self.heap.pop_back(),
            _ => {
                self.heap.swap_root_with_last();
                let root = self.heap.pop_back();
                self.heap.sift_down(0);
                root
            }
        }
    }

    /// Pushes an item onto the queue.
    pub fn push(&mut self, item: T) {
        self.heap.push_back(item);
        let last = self.heap.len() - 1;
        self.heap.sift_up(last);
    }

    /// Pushes an item onto the queue, then removes the next item and returns it.
    ///
    /// This is faster than `push` followed by `pop`. If `item` would be popped first, it is
    /// returned right away and the queue is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::from(vec![3, 5]);
    /// assert_eq!(queue.push_pop(1), 1);
    /// assert_eq!(queue.push_pop(4), 3);
    /// assert_eq!(queue.into_sorted_vec(), vec![4, 5]);
    /// ```
    pub fn push_pop(&mut self, item: T) -> T {
        let first = match self.heap.first() {
            Some(first) => self.heap.cmp().compares_lt(first, &item),
            None => false,
        };
        if !first {
            return item;
        }
        let root = mem::replace(&mut self.heap.as_mut_slice()[0], item);
        self.heap.sift_down(0);
        root
    }

    /// Consumes the queue and returns its items as a vector in storage order.
    pub fn into_vec(self) -> Vec<T> { self.heap.into_vec() }

    /// Consumes the queue and returns its items as a vector in the order they would be
    /// popped.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }

    /// Returns the number of items in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the number of items in the queue.
    ///
    /// Same as [`len`](#method.len).
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the queue contains no items.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes all items from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Clears the queue, returning an iterator over the removed items in storage order.
    pub fn drain(&mut self) -> Drain<T> {
        Drain(self.heap.drain())
    }

    /// Clears the queue, returning an iterator over the removed items in the order they are
    /// popped.
    ///
    /// Items left in the iterator when it is dropped are removed as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqueue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::from(vec![4, 1, 3]);
    /// assert_eq!(queue.drain_sorted().take(2).collect::<Vec<_>>(), vec![1, 3]);
    /// assert!(queue.is_empty());
    /// ```
    pub fn drain_sorted(&mut self) -> DrainSorted<T, C> {
        DrainSorted(self)
    }
}

impl<T: Debug, C: Compare<T>> Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, C: Compare<T> + Default> iter::FromIterator<T> for PriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> PriorityQueue<T, C> {
        PriorityQueue::from_vec_and_comparator(iter.into_iter().collect(), C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

/// An iterator over a `PriorityQueue` in storage order.
///
/// Acquire through [`PriorityQueue::iter`](struct.PriorityQueue.html#method.iter).
pub struct Iter<'a, T: 'a>(slice::Iter<'a, T>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline] fn next(&mut self) -> Option<&'a T> { self.0.next() }
    #[inline] fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A consuming iterator over a `PriorityQueue` in storage order.
///
/// Acquire through [`IntoIterator::into_iter`](
/// https://doc.rust-lang.org/stable/std/iter/trait.IntoIterator.html#tymethod.into_iter).
pub struct IntoIter<T>(vec::IntoIter<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator that drains a `PriorityQueue` in storage order.
///
/// Acquire through [`PriorityQueue::drain`](struct.PriorityQueue.html#method.drain).
pub struct Drain<'a, T: 'a>(vec::Drain<'a, T>);

impl<'a, T: 'a> Iterator for Drain<'a, T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T: 'a> DoubleEndedIterator for Drain<'a, T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back() }
}

impl<'a, T: 'a> ExactSizeIterator for Drain<'a, T> {}

/// An iterator that drains a `PriorityQueue` in the order its items are popped.
///
/// Acquire through [`PriorityQueue::drain_sorted`](
/// struct.PriorityQueue.html#method.drain_sorted).
pub struct DrainSorted<'a, T: 'a, C: 'a + Compare<T>>(&'a mut PriorityQueue<T, C>);

impl<'a, T: 'a, C: Compare<T>> Iterator for DrainSorted<'a, T, C> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.pop() }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.len();
        (len, Some(len))
    }
}

impl<'a, T: 'a, C: Compare<T>> ExactSizeIterator for DrainSorted<'a, T, C> {}

impl<'a, T: 'a, C: Compare<T>> Drop for DrainSorted<'a, T, C> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl<T, C: Compare<T>> IntoIterator for PriorityQueue<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(self.heap.into_vec().into_iter()) }
}

impl<'a, T, C: Compare<T>> IntoIterator for &'a PriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

/// A guard granting mutable access to the next item of a `PriorityQueue`.
///
/// Acquire through [`PriorityQueue::peek_mut`](struct.PriorityQueue.html#method.peek_mut).
pub struct PeekMut<'a, T: 'a, C: 'a + Compare<T> = Natural<T>> {
    queue: &'a mut PriorityQueue<T, C>,
    sift: bool,
}

impl<'a, T: 'a, C: Compare<T>> Drop for PeekMut<'a, T, C> {
    fn drop(&mut self) {
        // the item may have been changed so that it no longer comes first
        if self.sift {
            self.queue.heap.sift_down(0);
        }
    }
}

impl<'a, T: 'a, C: Compare<T>> Deref for PeekMut<'a, T, C> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.queue.heap.as_slice()[0]
    }
}

impl<'a, T: 'a, C: Compare<T>> DerefMut for PeekMut<'a, T, C> {
    fn deref_mut(&mut self) -> &mut T {
        self.sift = true;
        &mut self.queue.heap.as_mut_slice()[0]
    }
}

impl<'a, T: 'a, C: Compare<T>> PeekMut<'a, T, C> {
    /// Removes the peeked item from the queue and returns it.
    pub fn pop(mut this: PeekMut<'a, T, C>) -> T {
        // pop restores the heap property on its own
        this.sift = false;
        match this.queue.pop() {
            Some(item) => item,
            None => unreachable!("PeekMut is only handed out for a non-empty queue"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::cmp::Ordering;
    use std::error::Error;

    use compare::{natural, Compare};
    use rand::{thread_rng, Rng};
    use super::{PeekMut, PriorityQueue};

    fn less(a: &i32, b: &i32) -> bool { a < b }

    #[test]
    fn test_from_list_drains_sorted() {
        let mut pq = PriorityQueue::from_vec_with_order(vec![1, 3, 7, 8, -20, 56], less);
        assert_eq!(pq.count(), 6);
        let mut out = vec![];
        while let Some(x) = pq.pop() {
            out.push(x);
        }
        assert_eq!(out, vec![-20, 1, 3, 7, 8, 56]);
        assert_eq!(pq.count(), 0);
        assert_eq!(pq.len(), 0);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut pq = PriorityQueue::with_order(0, less);
        assert_eq!(pq.pop(), None);
        assert_eq!(pq.count(), 0);

        let mut out = vec![];
        for &x in &[1, 3, 7, 8, -20, 56] {
            pq.push(x);
            assert_eq!(pq.count(), 1);
            assert_eq!(pq.peek(), Some(&x));
            out.push(pq.pop().unwrap());
            assert_eq!(pq.count(), 0);
        }
        assert_eq!(out, vec![1, 3, 7, 8, -20, 56]);
    }

    #[test]
    fn test_empty_queue() {
        let mut pq = PriorityQueue::<i32>::with_capacity(2);
        assert_eq!(pq.count(), 0);
        assert!(pq.is_empty());
        assert_eq!(pq.peek(), None);
        assert!(pq.peek_mut().is_none());
        assert_eq!(pq.pop(), None);
        assert_eq!(pq.pop(), None);
        assert_eq!(pq.len(), 0);

        let mut pq = PriorityQueue::<i32>::from(vec![]);
        assert_eq!(pq.pop(), None);
        assert!(pq.is_empty());
    }

    #[test]
    fn test_capacity_hint() {
        let pq = PriorityQueue::<u8>::with_capacity(0);
        assert!(pq.capacity() >= super::DEFAULT_HEADROOM);

        let mut pq = PriorityQueue::<u8>::with_capacity(2);
        for x in 0..100 {
            pq.push(x);
        }
        assert_eq!(pq.len(), 100);
        assert_eq!(pq.peek(), Some(&0));
    }

    #[test]
    fn test_capacity_error() {
        let err = PriorityQueue::<u64, _>::try_with_capacity_and_comparator(usize::MAX, natural())
            .unwrap_err();
        assert_eq!(err.capacity(), usize::MAX);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(),
                   format!("cannot allocate a priority queue holding {} items", usize::MAX));
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let pq = PriorityQueue::from(vec![5, 2, 9]);
        assert_eq!(pq.peek(), Some(&2));
        assert_eq!(pq.peek(), Some(&2));
        assert_eq!(pq.len(), 3);
    }

    #[test]
    fn test_round_trip() {
        let mut pq = PriorityQueue::from(vec![5, 2, 9]);
        pq.push(1);
        assert_eq!(pq.pop(), Some(1));
        assert_eq!(pq.len(), 3);
        assert_eq!(pq.peek(), Some(&2));
    }

    #[test]
    fn test_max_queue() {
        let mut pq: PriorityQueue<i32, _> = PriorityQueue::with_comparator(natural().rev());
        pq.extend(&[3, 9, 1, 4]);
        assert_eq!(pq.peek(), Some(&9));
        assert_eq!(pq.into_sorted_vec(), vec![9, 4, 3, 1]);
    }

    #[test]
    fn test_closure_comparator() {
        let mut pq = PriorityQueue::with_comparator(|a: &(u8, char), b: &(u8, char)| b.0.cmp(&a.0));
        pq.push((1, 'l'));
        pq.push((5, 'h'));
        pq.push((3, 'm'));
        assert_eq!(pq.pop(), Some((5, 'h')));

        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        let words = vec!["ccc".to_string(), "a".to_string(), "bb".to_string()];
        let pq = PriorityQueue::from_vec_and_comparator(words, by_len);
        assert_eq!(pq.into_sorted_vec(), vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_peek_mut() {
        let mut pq = PriorityQueue::from(vec![2, 1, 3]);

        {
            let mut peek = pq.peek_mut().unwrap();
            *peek = 0;
        }
        assert_eq!(pq.peek(), Some(&0));

        {
            let mut peek = pq.peek_mut().unwrap();
            *peek = 5;
        }
        assert_eq!(pq.peek(), Some(&2));

        assert_eq!(PeekMut::pop(pq.peek_mut().unwrap()), 2);
        assert_eq!(pq.into_sorted_vec(), vec![3, 5]);
    }

    #[test]
    fn test_push_pop() {
        let mut pq = PriorityQueue::new();
        assert_eq!(pq.push_pop(7), 7);
        assert!(pq.is_empty());

        pq.push(5);
        assert_eq!(pq.push_pop(5), 5);
        assert_eq!(pq.push_pop(6), 5);
        assert_eq!(pq.into_vec(), vec![6]);
    }

    #[test]
    fn test_drain() {
        let mut pq = PriorityQueue::from(vec![4, 2, 8, 6]);
        let mut drained: Vec<_> = pq.drain().collect();
        assert!(pq.is_empty());
        drained.sort();
        assert_eq!(drained, vec![2, 4, 6, 8]);

        pq.extend(vec![4, 2, 8, 6]);
        assert_eq!(pq.drain_sorted().len(), 4);
        assert!(pq.is_empty());

        pq.extend(vec![4, 2, 8, 6]);
        assert_eq!(pq.drain_sorted().collect::<Vec<_>>(), vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_iter_starts_with_next_item() {
        let pq: PriorityQueue<_> = vec![7, 3, 5, 1].into_iter().collect();
        assert_eq!(pq.iter().len(), 4);
        assert_eq!(pq.iter().next(), Some(&1));
        assert_eq!((&pq).into_iter().count(), 4);
        let mut items: Vec<_> = pq.into_iter().collect();
        items.sort();
        assert_eq!(items, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_debug() {
        let pq = PriorityQueue::from(vec![2, 1]);
        assert_eq!(format!("{:?}", pq), "[1, 2]");
    }

    #[test]
    fn test_equal_priorities() {
        let by_key = |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0);
        let mut pq = PriorityQueue::with_comparator(by_key);
        for (i, c) in "abcdef".chars().enumerate() {
            pq.push(((i % 2) as u8, c));
        }
        let keys: Vec<u8> = pq.drain_sorted().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_inconsistent_order_does_not_panic() {
        let flip = Cell::new(false);
        let mut pq = PriorityQueue::with_order(0, |_: &i32, _: &i32| {
            flip.set(!flip.get());
            flip.get()
        });
        for x in 0..50 {
            pq.push(x);
        }
        let mut n = 0;
        while pq.peek().is_some() {
            pq.pop();
            n += 1;
        }
        assert_eq!(n, 50);
    }

    #[test]
    fn fuzz_push_pop_invariant() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut pq = PriorityQueue::with_order(0, less);
            let mut pushed = 0;
            let mut popped = 0;
            for _ in 0..100 {
                if rng.gen_weighted_bool(3) {
                    if pq.pop().is_some() {
                        popped += 1;
                    }
                } else {
                    pq.push(rng.gen_range(-1000, 1000));
                    pushed += 1;
                }
                assert!(pq.heap.is_valid());
                assert_eq!(pq.count(), pushed - popped);
            }
        }
    }

    #[test]
    fn fuzz_pop_sorted() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut expected = Vec::with_capacity(100);
            let mut pq = PriorityQueue::new();
            for _ in 0..100 {
                let x = rng.next_u32();
                expected.push(x);
                pq.push(x);
            }
            expected.sort();
            let mut tmpx: Option<u32> = None;
            let mut out = vec![];
            loop {
                let tmpy = pq.pop();
                match (tmpx, tmpy) {
                    (_, None) => break,
                    (Some(x), Some(y)) => assert!(x <= y),
                    _ => ()
                }
                out.extend(tmpy);
                tmpx = tmpy;
            }
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn fuzz_from_vec_into_sorted_vec() {
        let mut rng = thread_rng();
        for len in 0..100 {
            let vec: Vec<i64> = (0..len).map(|_| rng.gen_range(-10, 10)).collect();
            let mut expected = vec.clone();
            expected.sort_by(|a, b| b.cmp(a));

            let pq = PriorityQueue::from_vec_with_order(vec, |a: &i64, b: &i64| a > b);
            assert_eq!(pq.len(), len);
            assert_eq!(pq.into_sorted_vec(), expected);
        }
    }

    #[test]
    fn test_precedes_agrees_with_natural() {
        let cmp = super::precedes(less);
        for &(a, b) in &[(1, 2), (2, 1), (3, 3)] {
            assert_eq!(cmp.compare(&a, &b), natural().compare(&a, &b));
        }
        assert_eq!(cmp.compare(&-1, &0), Ordering::Less);
    }
}
