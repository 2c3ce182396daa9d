//! # dynarray
//!
//! This crate provides a growable array that manages its own capacity. Rather than
//! delegating to `Vec`'s growth strategy, [`DynamicArray`] owns an explicitly sized
//! block of slots that doubles when an append finds it full and halves when a pop
//! leaves it under a quarter full. Append and pop run in amortized constant time;
//! index access is constant time and search is linear.
//!
//! Failures (out-of-range access, popping an empty array, a growth step that cannot
//! allocate) are returned as [`ArrayError`] and never leave the array in a partial state.

#![deny(unsafe_code)]

pub mod dynamic_array;
pub mod error;

pub use dynamic_array::DynamicArray;
pub use error::{ArrayError, Result};
