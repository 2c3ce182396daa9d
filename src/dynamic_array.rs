//! # DynamicArray with Explicit Capacity Management
//!
//! This module implements a growable array that owns a single, explicitly
//! sized backing block of slots. The block doubles when an append finds it
//! full and halves when a pop leaves it less than a quarter occupied, which
//! keeps both `append` and `pop` amortized constant-time.
//!
//! Every resize allocates a fresh block before any element moves, then moves
//! the live elements across in order and drops the old block. Allocation
//! failures on growth or shrink are reported as
//! [`ArrayError::AllocationFailure`] and leave the array untouched.
//!
//! ## Example
//!
//! ```rust
//! use dynarray::dynamic_array::DynamicArray;
//! use dynarray::ArrayError;
//!
//! let mut array = DynamicArray::new();
//! array.append(1).unwrap();
//! array.append(2).unwrap();
//! array.append(3).unwrap();
//! assert_eq!(array.len(), 3);
//! assert_eq!(array.get(1), Ok(&2));
//! assert_eq!(array.find(&3), Some(2));
//! assert_eq!(array.to_string(), "[1, 2, 3]");
//!
//! assert_eq!(array.pop(), Ok(3));
//! array.clear();
//! assert_eq!(array.pop(), Err(ArrayError::EmptyContainer));
//! ```

use std::fmt;

use log::{debug, trace, warn};

use crate::error::{ArrayError, Result};

/// A growable array backed by an exclusively owned block of slots.
///
/// Slots `[0, len)` hold the live elements in insertion order; the remaining
/// slots up to `capacity` are empty. The capacity never drops below one.
pub struct DynamicArray<T> {
    storage: Box<[Option<T>]>,
    length: usize,
}

impl<T> DynamicArray<T> {
    /// Capacity of a freshly created or cleared array.
    pub const INITIAL_CAPACITY: usize = 1;

    /// Factor the capacity is multiplied by on growth and divided by on shrink.
    pub const GROWTH_FACTOR: usize = 2;

    /// A pop shrinks the block once `len < capacity / SHRINK_DIVISOR`.
    pub const SHRINK_DIVISOR: usize = 4;

    /// Creates an empty array with a single-slot backing block.
    pub fn new() -> Self {
        Self {
            storage: Self::initial_block(),
            length: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of slots in the current backing block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Fails with [`ArrayError::OutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.live()
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(ArrayError::OutOfRange {
                index,
                length: self.length,
            })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Fails with [`ArrayError::OutOfRange`] unless `index < len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let length = self.length;
        self.storage[..length]
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(ArrayError::OutOfRange { index, length })
    }

    /// Appends `value` to the end of the array, doubling the backing block
    /// first if it is full.
    ///
    /// This operation is amortized constant-time. If the larger block cannot
    /// be allocated the array is left unchanged and `value` is dropped; use
    /// [`try_append`](Self::try_append) to get it back.
    pub fn append(&mut self, value: T) -> Result<()> {
        self.try_append(value).map_err(|(_, err)| err)
    }

    /// Like [`append`](Self::append), but hands `value` back alongside the
    /// error when the growth step fails.
    pub fn try_append(&mut self, value: T) -> std::result::Result<(), (T, ArrayError)> {
        if self.length == self.capacity() {
            let grown = match self.capacity().checked_mul(Self::GROWTH_FACTOR) {
                Some(new_capacity) => Self::allocate_block(new_capacity),
                None => Err(ArrayError::AllocationFailure {
                    requested: usize::MAX,
                }),
            };
            match grown {
                Ok(block) => self.move_into(block),
                Err(err) => return Err((value, err)),
            }
        }
        self.storage[self.length] = Some(value);
        self.length += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// Fails with [`ArrayError::EmptyContainer`] on an empty array. When the
    /// remaining elements would occupy less than a quarter of the block, the
    /// block is halved (never below one slot); if that smaller block cannot be
    /// allocated the pop fails with [`ArrayError::AllocationFailure`]. Either
    /// way a failed pop leaves the array unchanged.
    pub fn pop(&mut self) -> Result<T> {
        if self.length == 0 {
            return Err(ArrayError::EmptyContainer);
        }
        let remaining = self.length - 1;

        // Allocate before touching any slot.
        let shrunk = if remaining < self.capacity() / Self::SHRINK_DIVISOR {
            let new_capacity =
                (self.capacity() / Self::GROWTH_FACTOR).max(Self::INITIAL_CAPACITY);
            Some(Self::allocate_block(new_capacity)?)
        } else {
            None
        };

        let value = self.storage[remaining]
            .take()
            .expect("slots below length are always occupied");
        self.length = remaining;

        if let Some(block) = shrunk {
            self.move_into(block);
        }
        Ok(value)
    }

    /// Drops every element and returns to the freshly created state.
    pub fn clear(&mut self) {
        trace!(
            "clearing array: length {}, capacity {}",
            self.length,
            self.capacity()
        );
        self.storage = Self::initial_block();
        self.length = 0;
    }

    /// Returns the index of the first element equal to `value`, or `None`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.live()
            .iter()
            .position(|slot| slot.as_ref() == Some(value))
    }

    /// The occupied prefix of the backing block.
    #[inline]
    fn live(&self) -> &[Option<T>] {
        &self.storage[..self.length]
    }

    fn initial_block() -> Box<[Option<T>]> {
        Box::new([None])
    }

    /// Allocates an empty block of `capacity` slots, reporting failure
    /// instead of aborting.
    fn allocate_block(capacity: usize) -> Result<Box<[Option<T>]>> {
        let mut block = Vec::new();
        if capacity > max_block_slots() || block.try_reserve_exact(capacity).is_err() {
            warn!("failed to allocate backing block of {capacity} slots");
            return Err(ArrayError::AllocationFailure {
                requested: capacity,
            });
        }
        block.resize_with(capacity, || None);
        Ok(block.into_boxed_slice())
    }

    /// Moves the live elements into `block` and releases the old one.
    fn move_into(&mut self, mut block: Box<[Option<T>]>) {
        debug_assert!(block.len() >= self.length);
        for (dst, src) in block.iter_mut().zip(&mut self.storage[..self.length]) {
            *dst = src.take();
        }
        debug!(
            "resized array from {} to {} slots ({} live)",
            self.capacity(),
            block.len(),
            self.length
        );
        self.storage = block;
    }
}

#[cfg(not(test))]
#[inline]
fn max_block_slots() -> usize {
    usize::MAX
}

#[cfg(test)]
thread_local! {
    static MAX_BLOCK_SLOTS: std::cell::Cell<usize> = const { std::cell::Cell::new(usize::MAX) };
}

/// Largest block the allocator may hand out on this thread; tests lower it
/// to make growth and shrink steps fail.
#[cfg(test)]
fn max_block_slots() -> usize {
    MAX_BLOCK_SLOTS.with(std::cell::Cell::get)
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.live().iter().flatten().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Elements<'a, T>(&'a [Option<T>]);

        impl<T: fmt::Debug> fmt::Debug for Elements<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter().flatten()).finish()
            }
        }

        f.debug_struct("DynamicArray")
            .field("length", &self.length)
            .field("capacity", &self.capacity())
            .field("elements", &Elements(self.live()))
            .finish()
    }
}
