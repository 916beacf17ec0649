// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The array-backed binary heap underneath `PriorityQueue`.

use std::collections::TryReserveError;
use std::slice;
use std::vec;

use compare::Compare;

// A binary heap is stored in a linear array using a Vec. The children of
// the item at offset `i` live at `2i + 1` and `2i + 2`:
//
//              0
//           /     \
//         1         2
//       /   \     /   \
//      3     4   5     6
//     / \   /
//    7   8 9
//
// The heap property: no child is ordered *before* its parent according to
// the comparator. Hence the item at offset 0 is always the next one out.
// "a before b" is `cmp.compares_lt(a, b)`; items that compare equal may sit
// in either order.

fn parent(x: usize) -> usize {
    debug_assert!(x > 0);
    (x - 1) / 2
}

/// Moves the item at `pos` towards the root until its parent is not ordered
/// after it.
fn sift_up<T, C: Compare<T>>(v: &mut [T], mut pos: usize, cmp: &C) {
    while pos > 0 {
        let par = parent(pos);
        if cmp.compares_lt(&v[pos], &v[par]) {
            v.swap(pos, par);
            pos = par;
        } else {
            return;
        }
    }
}

/// Moves the item at `pos` towards the leaves until neither child is ordered
/// before it.
fn sift_down<T, C: Compare<T>>(v: &mut [T], mut pos: usize, cmp: &C) {
    loop {
        let c1 = pos * 2 + 1;
        let c2 = c1 + 1;
        if v.len() <= c1 { return; } // No children. We're done.
        // Prefer the right child only if it strictly comes first.
        let ch = if c2 < v.len() && cmp.compares_lt(&v[c2], &v[c1]) { c2 }
                 else { c1 };
        if cmp.compares_lt(&v[ch], &v[pos]) {
            v.swap(ch, pos);
            pos = ch;
        } else {
            return;
        }
    }
}

#[derive(Clone)]
pub struct Heap<T, C> {
    data: Vec<T>,
    cmp: C,
}

impl<T, C: Compare<T>> Heap<T, C> {
    pub fn with_capacity(capacity: usize, cmp: C) -> Heap<T, C> {
        Heap { data: Vec::with_capacity(capacity), cmp }
    }

    pub fn try_with_capacity(capacity: usize, cmp: C) -> Result<Heap<T, C>, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Heap { data, cmp })
    }

    /// Takes ownership of `vec` as storage and establishes the heap property.
    ///
    /// Sifts every internal node down, from the last one to the root, which
    /// takes `O(n)` time.
    pub fn heapify(mut vec: Vec<T>, cmp: C) -> Heap<T, C> {
        for pos in (0..vec.len() / 2).rev() {
            sift_down(&mut vec, pos, &cmp);
        }
        Heap { data: vec, cmp }
    }

    pub fn sift_up(&mut self, pos: usize) {
        sift_up(&mut self.data, pos, &self.cmp);
    }

    pub fn sift_down(&mut self, pos: usize) {
        sift_down(&mut self.data, pos, &self.cmp);
    }

    /// Appends an item without restoring the heap property.
    ///
    /// The caller must follow up with `sift_up(len - 1)`.
    pub fn push_back(&mut self, item: T) {
        self.data.push(item);
    }

    /// Removes the last item of the storage, which is not the root unless
    /// it is the only item.
    pub fn pop_back(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Exchanges the root with the last item, breaking the heap property at
    /// the root.
    pub fn swap_root_with_last(&mut self) {
        let last = self.data.len() - 1;
        self.data.swap(0, last);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Callers that reorder items through this slice must restore the heap
    /// property before the next public operation.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn reserve_exact(&mut self, additional: usize) {
        self.data.reserve_exact(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.data.iter()
    }

    pub fn drain(&mut self) -> vec::Drain<T> {
        self.data.drain(..)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Consumes the heap and returns its items in the order they would have
    /// been popped.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let Heap { mut data, cmp } = self;
        // Each round moves the current root behind the shrinking heap, which
        // leaves the items in reverse extraction order.
        for end in (1..data.len()).rev() {
            data.swap(0, end);
            sift_down(&mut data[..end], 0, &cmp);
        }
        data.reverse();
        data
    }

    /// Checks if the heap is valid.
    ///
    /// The heap is valid if no item is ordered before its parent.
    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        (1..self.data.len()).all(|i| {
            !self.cmp.compares_lt(&self.data[i], &self.data[parent(i)])
        })
    }
}
